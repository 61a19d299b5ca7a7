use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid event {id}: {message}")]
    UpstreamFetch { id: String, message: String },

    #[error("Error during {operation} on {table}: {message}")]
    Storage {
        table: &'static str,
        operation: &'static str,
        message: String,
    },

    #[error("Missing or malformed field: {0}")]
    MalformedField(String),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

pub type Result<T> = std::result::Result<T, SyncError>;
