use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON5 error: {0}")]
    Json5(#[from] json5::Error),

    #[error("invalid time of day {value:?} (expected HH:MM)")]
    InvalidTime { value: String },

    #[error("task not found: {0}")]
    UnknownTask(String),
}

pub type Result<T> = std::result::Result<T, BoardError>;
