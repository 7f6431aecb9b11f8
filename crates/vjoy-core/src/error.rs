use thiserror::Error;

/// Configuration errors.
///
/// Geometry never fails: out-of-range input is clamped and events that
/// arrive while idle are ignored. Only construction and option handling
/// can go wrong.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{0} controller does not exist")]
    UnsupportedModality(String),
    #[error("unknown joystick option: {0}")]
    UnknownOption(String),
    #[error("invalid value for option `{key}`: {message}")]
    InvalidOption { key: String, message: String },
    #[error("invalid colour: {0}")]
    InvalidColor(String),
}
