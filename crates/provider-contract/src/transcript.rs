// crates/provider-contract/src/transcript.rs
// ============================================================================
// Module: Exchange Transcript
// Description: Structured records of every HTTP exchange made by the client.
// Purpose: Persist request/response records as JSON lines for later review.
// Dependencies: serde, serde_json, std
// ============================================================================

//! ## Overview
//! The client appends one [`TranscriptEntry`] per exchange to its in-memory
//! transcript and forwards it to an optional [`TranscriptSink`].
//! [`TranscriptLog`] writes each entry as one JSON object per line.
//!
//! Invariants:
//! - Authorization values are never recorded.
//! - Sequence numbers start at 1 and increase per client.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Mutex;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ContractError;

// ============================================================================
// SECTION: Entries
// ============================================================================

/// One recorded HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Per-client sequence number, starting at 1.
    pub sequence: u64,
    /// HTTP method.
    pub method: String,
    /// Absolute request URL.
    pub url: String,
    /// Form body sent, if any.
    pub request_body: Option<String>,
    /// Response status, absent on transport failure.
    pub status: Option<u16>,
    /// Response body, absent on transport failure.
    pub response_body: Option<String>,
    /// Transport error message, if the exchange failed.
    pub error: Option<String>,
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Destination for transcript entries.
pub trait TranscriptSink: Send + Sync {
    /// Records one exchange.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Transport`] when the entry cannot be written.
    fn record(&self, entry: &TranscriptEntry) -> Result<(), ContractError>;
}

/// JSON-lines transcript writer.
pub struct TranscriptLog<W: Write + Send> {
    /// Output writer for transcript records.
    writer: Mutex<W>,
}

impl<W: Write + Send> TranscriptLog<W> {
    /// Creates a transcript log over the writer.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the log and returns the writer.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Transport`] when the writer mutex is poisoned.
    pub fn into_inner(self) -> Result<W, ContractError> {
        self.writer
            .into_inner()
            .map_err(|_| ContractError::Transport("transcript writer mutex poisoned".to_string()))
    }
}

impl<W: Write + Send> TranscriptSink for TranscriptLog<W> {
    fn record(&self, entry: &TranscriptEntry) -> Result<(), ContractError> {
        let mut guard = self
            .writer
            .lock()
            .map_err(|_| ContractError::Transport("transcript writer mutex poisoned".to_string()))?;
        serde_json::to_writer(&mut *guard, entry)
            .map_err(|err| ContractError::Transport(format!("transcript write failed: {err}")))?;
        guard
            .write_all(b"\n")
            .and_then(|()| guard.flush())
            .map_err(|err| ContractError::Transport(format!("transcript write failed: {err}")))?;
        drop(guard);
        Ok(())
    }
}
