use thiserror::Error;

#[derive(Error, Debug)]
pub enum IrrigoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fuzzy system definition error: {0}")]
    Definition(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IrrigoError>;
