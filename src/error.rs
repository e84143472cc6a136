//! Error types for submission parsing and disclosure metrics

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: input is not text (invalid at byte {0})")]
    Decode(usize),

    #[error("Invalid metrics input: {0}")]
    InvalidInput(String),

    #[error("Invalid XML: {0}")]
    InvalidXml(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
