use thiserror::Error;

/// All the ways things can go wrong in Newsreel
///
/// The matcher itself never fails. Errors come from the edges: parsing
/// settings, loading config, handing notifications to a sink.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid time '{0}': expected 24-hour HH:MM")]
    InvalidTime(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Notification delivery failed: {0}")]
    DeliveryError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
