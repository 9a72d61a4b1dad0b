//! Error types for humscribe

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HumscribeError {
    #[error("Unknown scale: {0}")]
    UnknownScale(String),
    #[error("Unknown root note: {0}")]
    UnknownRoot(String),
    #[error("Unknown groove template: {0}")]
    UnknownGroove(String),
    #[error("Unknown quantize grid: {0}")]
    UnknownGrid(String),
    #[error("Unknown enhancement mode: {0}")]
    UnknownMode(String),
    #[error("Unknown ornament style: {0}")]
    UnknownOrnament(String),
    #[error("Unknown articulation style: {0}")]
    UnknownArticulation(String),
}

pub type Result<T> = std::result::Result<T, HumscribeError>;

/// Resolve a name through `FromStr`, substituting `fallback` on failure.
///
/// Unknown names are never fatal in the pipeline; they are logged and
/// replaced with the documented default for that parameter.
pub(crate) fn parse_or_fallback<T>(name: &str, fallback: T) -> T
where
    T: std::str::FromStr<Err = HumscribeError> + std::fmt::Debug,
{
    match name.parse::<T>() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("{e}, falling back to {fallback:?}");
            fallback
        }
    }
}
