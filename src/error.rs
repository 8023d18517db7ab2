//! Error handling and custom error types
//!
//! Provides unified error handling across the relay and report paths using thiserror.

use thiserror::Error;

/// Message returned to callers when no OpenAI credential was configured.
pub const MISSING_API_KEY_MESSAGE: &str = ".env 파일에 OPENAI_API_KEY가 설정되지 않았습니다.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("{}", MISSING_API_KEY_MESSAGE)]
    MissingApiKey,

    /// Upstream failure carrying the best-effort message extracted from the reply.
    #[error("OpenAI API 호출 실패: {0}")]
    Upstream(String),

    #[error("Document rendering error: {0}")]
    Document(String),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] dotenvy::Error),

    #[error("Invariant violation: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
