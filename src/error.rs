//! Unified error type for the watch face engine.
//!
//! Variants carry no data so the enum stays `Copy` and cheap to log
//! through `defmt`. None of these ever escape the engine's event loop:
//! they are folded into outcome values and logged.

use thiserror::Error;

/// Top-level error type used across the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Settings payload is not a JSON object or a field has the wrong type.
    #[error("malformed settings payload")]
    MalformedPayload,

    /// Settings payload has no member for this application's namespace.
    #[error("settings payload has no application namespace")]
    MissingNamespace,

    /// Formatted text did not fit its fixed-capacity buffer.
    #[error("text exceeds its buffer")]
    TextOverflow,
}

pub type Result<T> = core::result::Result<T, Error>;
