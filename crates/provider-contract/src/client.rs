// crates/provider-contract/src/client.rs
// ============================================================================
// Module: Provider HTTP Client
// Description: Blocking HTTP execution of built Provider requests.
// Purpose: Send one request, capture status and body, record a transcript.
// Dependencies: reqwest, serde
// ============================================================================

//! ## Overview
//! [`ProviderClient`] executes [`ProviderRequest`] values synchronously and
//! returns the raw status and body. It holds no credentials or default
//! headers: every request carries its own Authorization value.
//!
//! Invariants:
//! - One attempt per request; transport failures are returned, never retried.
//! - Redirects are not followed.
//! - No timeout is applied unless one is configured.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;

use crate::config::ContractConfig;
use crate::error::ContractError;
use crate::request::FORM_CONTENT_TYPE;
use crate::request::ProviderRequest;
use crate::transcript::TranscriptEntry;
use crate::transcript::TranscriptSink;

// ============================================================================
// SECTION: Raw Response
// ============================================================================

/// Status and body captured from one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Blocking Provider client with transcript capture.
#[derive(Clone)]
pub struct ProviderClient {
    /// Underlying HTTP client.
    client: Client,
    /// Exchanges recorded so far.
    transcript: Arc<Mutex<Vec<TranscriptEntry>>>,
    /// Optional external transcript destination.
    sink: Option<Arc<dyn TranscriptSink>>,
}

impl ProviderClient {
    /// Builds a client with an optional timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Transport`] when the HTTP client cannot be built.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ContractError> {
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|err| ContractError::Transport(format!("failed to build http client: {err}")))?;
        Ok(Self::with_client(client))
    }

    /// Builds a client using the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Config`] when `config` fails validation and
    /// [`ContractError::Transport`] when the HTTP client cannot be built.
    pub fn from_config(config: &ContractConfig) -> Result<Self, ContractError> {
        config.validate()?;
        Self::new(config.timeout())
    }

    /// Wraps an existing reqwest client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            transcript: Arc::new(Mutex::new(Vec::new())),
            sink: None,
        }
    }

    /// Forwards every recorded exchange to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn TranscriptSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Returns a snapshot of the transcript entries.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Sends the request and returns the raw status and body.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Transport`] when the exchange does not complete
    /// or the transcript cannot be written. A failed exchange is reported in
    /// preference to a sink failure.
    pub fn execute(&self, request: &ProviderRequest) -> Result<RawResponse, ContractError> {
        let mut builder = self
            .client
            .request(request.method().clone(), request.url().clone())
            .header(AUTHORIZATION, request.authorization().clone());
        if let Some(body) = request.body() {
            builder = builder.header(CONTENT_TYPE, FORM_CONTENT_TYPE).body(body.to_string());
        }
        let outcome = builder
            .send()
            .map_err(|err| ContractError::Transport(err.to_string()))
            .and_then(|response| {
                let status = response.status().as_u16();
                let body = response.text().map_err(|err| {
                    ContractError::Transport(format!("failed to read response body: {err}"))
                })?;
                Ok(RawResponse {
                    status,
                    body,
                })
            });
        let recorded = self.record(request, &outcome);
        let raw = outcome?;
        recorded?;
        Ok(raw)
    }

    /// Appends the exchange to the transcript and the sink.
    fn record(
        &self,
        request: &ProviderRequest,
        outcome: &Result<RawResponse, ContractError>,
    ) -> Result<(), ContractError> {
        let entry = {
            let mut entries = self.transcript.lock().unwrap_or_else(PoisonError::into_inner);
            let sequence = u64::try_from(entries.len()).unwrap_or(u64::MAX).saturating_add(1);
            let entry = TranscriptEntry {
                sequence,
                method: request.method().to_string(),
                url: request.url().to_string(),
                request_body: request.body().map(str::to_string),
                status: outcome.as_ref().ok().map(|raw| raw.status),
                response_body: outcome.as_ref().ok().map(|raw| raw.body.clone()),
                error: outcome.as_ref().err().map(ToString::to_string),
            };
            entries.push(entry.clone());
            entry
        };
        if let Some(sink) = &self.sink {
            sink.record(&entry)?;
        }
        Ok(())
    }
}
