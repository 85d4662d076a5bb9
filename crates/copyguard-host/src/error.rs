//! Error types for copyguard-host

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HostError>;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Unknown text unit: {0}")]
    UnknownUnit(String),

    #[error("Typeface enumeration unavailable for unit {0}")]
    TypefacesUnavailable(String),

    #[error("Typeface {family} {style} failed to load")]
    TypefaceLoad { family: String, style: String },

    #[error("Typefaces of unit {0} must be loaded before editing")]
    TypefacesNotLoaded(String),

    #[error("Host error: {0}")]
    Other(String),
}
