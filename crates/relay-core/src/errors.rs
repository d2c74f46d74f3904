/// Core error type for the relay.
///
/// Adapter crates map their specific errors into this type so the handler can
/// treat every failure of a port the same way (log it, recover locally).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
