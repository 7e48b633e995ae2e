//! Failure taxonomy for rate fetching and validation.

use thiserror::Error;

/// Errors surfaced by the rate provider and repository. Carried inside
/// `anyhow::Error` so callers can downcast when the kind matters.
#[derive(Debug, Error)]
pub enum RateError {
    /// Live fetches cannot proceed without a key. Raised before any
    /// network call.
    #[error("no API key configured, add one with `valuta settings set-key`")]
    MissingApiKey,

    /// Non-2xx response from the rate provider.
    #[error("rate provider returned HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    /// 2xx response whose payload reports `success: false`.
    #[error("rate provider rejected the request: {message}")]
    Provider { message: String },

    /// Rejected before any I/O happens.
    #[error("day count must be at least 1, got {0}")]
    InvalidDayCount(i64),
}
