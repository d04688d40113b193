// crates/provider-contract/src/request.rs
// ============================================================================
// Module: Provider Request Builder
// Description: Authenticated request construction for Provider endpoints.
// Purpose: Produce method, URL, Authorization header, and form body per call.
// Dependencies: reqwest, serde, url
// ============================================================================

//! ## Overview
//! [`build_request`] targets `base_url + path` with a verbatim
//! `Authorization` header. Mutating verbs attach a
//! `application/x-www-form-urlencoded` body of `name=<name>&price=<price>`
//! through [`ProviderRequest::with_form`].
//!
//! Invariants:
//! - Header bytes are validated before any I/O.
//! - `path` must start with `/`; a trailing `/` on the base URL is dropped.
//! - Only POST and PUT carry a form body.

// ============================================================================
// SECTION: Imports
// ============================================================================

use reqwest::Method;
use reqwest::header::HeaderValue;
use serde::Deserialize;
use serde::Serialize;
use url::Url;
use url::form_urlencoded;

use crate::config::ContractConfig;
use crate::error::ContractError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Content type attached to POST/PUT bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// Collection path for Provider resources.
pub const PROVIDER_COLLECTION_PATH: &str = "/provider";

/// Returns the item path for a Provider id.
#[must_use]
pub fn provider_item_path(id: i64) -> String {
    format!("{PROVIDER_COLLECTION_PATH}/{id}")
}

// ============================================================================
// SECTION: Form Body
// ============================================================================

/// Encoding applied to form values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormEncoding {
    /// `application/x-www-form-urlencoded` escaping of names and values.
    #[default]
    Escaped,
    /// Literal `key=value` concatenation. Values containing `&`, `=`, or
    /// whitespace are sent unescaped and may corrupt the body.
    Verbatim,
}

/// Input fields for creating or replacing a Provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderForm {
    /// Provider display name.
    pub name: String,
    /// Provider price.
    pub price: f64,
}

impl ProviderForm {
    /// Creates a form from a name and price.
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Renders the form body with the given encoding.
    #[must_use]
    pub fn encode(&self, encoding: FormEncoding) -> String {
        let price = format_price(self.price);
        match encoding {
            FormEncoding::Escaped => form_urlencoded::Serializer::new(String::new())
                .append_pair("name", &self.name)
                .append_pair("price", &price)
                .finish(),
            FormEncoding::Verbatim => format!("name={}&price={price}", self.name),
        }
    }
}

/// Formats a price with the shortest round-trip representation (`100.0` is `100`).
#[must_use]
pub fn format_price(price: f64) -> String {
    price.to_string()
}

// ============================================================================
// SECTION: Request
// ============================================================================

/// Fully built request, ready for execution by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    /// HTTP method.
    method: Method,
    /// Absolute target URL.
    url: Url,
    /// Authorization header value sent verbatim.
    authorization: HeaderValue,
    /// Encoded form body for mutating verbs.
    body: Option<String>,
}

impl ProviderRequest {
    /// Builds a request against an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidRequest`] when the path is not absolute,
    /// the URL does not parse, or the header value has invalid bytes.
    pub fn new(
        base_url: &str,
        path: &str,
        method: Method,
        auth_header: &str,
    ) -> Result<Self, ContractError> {
        if !path.starts_with('/') {
            return Err(ContractError::InvalidRequest(format!("path must start with '/': {path}")));
        }
        let joined = format!("{}{path}", base_url.trim_end_matches('/'));
        let url = Url::parse(&joined)
            .map_err(|err| ContractError::InvalidRequest(format!("invalid url {joined}: {err}")))?;
        let mut authorization = HeaderValue::from_str(auth_header).map_err(|err| {
            ContractError::InvalidRequest(format!("invalid authorization header: {err}"))
        })?;
        authorization.set_sensitive(true);
        Ok(Self {
            method,
            url,
            authorization,
            body: None,
        })
    }

    /// Attaches a form body to a POST or PUT request.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidRequest`] for any other method.
    pub fn with_form(
        mut self,
        form: &ProviderForm,
        encoding: FormEncoding,
    ) -> Result<Self, ContractError> {
        if self.method != Method::POST && self.method != Method::PUT {
            return Err(ContractError::InvalidRequest(format!(
                "{} requests do not carry a form body",
                self.method
            )));
        }
        self.body = Some(form.encode(encoding));
        Ok(self)
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the absolute target URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the Authorization header value.
    #[must_use]
    pub const fn authorization(&self) -> &HeaderValue {
        &self.authorization
    }

    /// Returns the encoded form body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Builds a request against the configured base URL.
///
/// # Errors
///
/// Returns [`ContractError::InvalidRequest`] under the same conditions as
/// [`ProviderRequest::new`].
pub fn build_request(
    config: &ContractConfig,
    path: &str,
    method: Method,
    auth_header: &str,
) -> Result<ProviderRequest, ContractError> {
    ProviderRequest::new(config.base_url_trimmed(), path, method, auth_header)
}
