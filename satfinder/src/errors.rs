use thiserror::Error;

/// Errors raised by the codec, the configuration layer and the native driver.
///
/// None of these are fatal to a session: the controller logs codec errors and
/// drops the offending message, and the driver turns transport errors into a
/// close followed by a timed reconnect.
#[derive(Debug, Error)]
pub enum SatError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload is not a json object")]
    NotAnObject,
    #[error("message has no action discriminator")]
    MissingAction,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("link is not open")]
    LinkClosed,
}
