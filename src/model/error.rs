//! Error types for prodfind.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all failure modes
//!   - [`FetchError`] - Catalog request failures (transport, HTTP status, body decoding)
//!   - [`crate::config::ConfigError`] - Config file and endpoint problems
//!
//! Terminal failures are `std::io::Error`s carried by
//! [`crate::view::TuiError`], next to the code that drives the terminal.
//!
//! # Error Recovery Strategy
//!
//! Fetch errors are **non-fatal**: the widget records them as a failed fetch
//! status, the dropdown shows an inline error, and typing continues to work.
//! Configuration and terminal errors are fatal and propagate out of `main`.

use crate::config::ConfigError;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// # Recovery Behavior
///
/// - **Config errors**: Fatal - reported on stderr, process exits non-zero
/// - **Fetch errors**: Never reach this type during normal operation; they are
///   folded into the widget's fetch status. The variant exists for callers that
///   drive the catalog client directly.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog request failed.
    #[error("Failed to fetch catalog: {0}")]
    Fetch(#[from] FetchError),

    /// Configuration could not be loaded or resolved.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors encountered while fetching the product catalog.
///
/// Messages are flattened to strings so the error is `Clone` and can be
/// shipped across the fetch channel and stored in UI state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, timeout, TLS).
    #[error("Request to {url} failed: {reason}")]
    Transport {
        /// Endpoint that was requested.
        url: String,
        /// Transport-level failure description.
        reason: String,
    },

    /// The server answered with a non-success status code.
    #[error("Catalog returned HTTP {status} for {url}")]
    Status {
        /// Endpoint that was requested.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The body was not a JSON array of products.
    #[error("Malformed catalog response: {reason}")]
    Decode {
        /// Decoder error message.
        reason: String,
    },

    /// The fetch worker went away before reporting a result.
    #[error("Fetch worker disconnected")]
    Disconnected,
}

impl FetchError {
    /// Whether a retry has any chance of succeeding.
    ///
    /// Transport failures and 5xx responses are retried; 4xx responses and
    /// malformed bodies are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport { .. } => true,
            FetchError::Status { status, .. } => *status >= 500,
            FetchError::Decode { .. } | FetchError::Disconnected => false,
        }
    }
}
