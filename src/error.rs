use thiserror::Error;

/// Failures inside the core. None of these cross the JNI boundary: the router
/// folds them into state (error flags, generator message) or a short error code.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("decode_failed:{0}")]
    Decode(String),

    /// Encoder failure. The payload is the encoder's own message and may be empty.
    #[error("{0}")]
    Encode(String),

    #[error("image_failed:{0}")]
    Image(#[from] image::ImageError),

    #[error("io_failed:{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid_buffer:{0}")]
    InvalidBuffer(String),

    #[error("json_failed:{0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Text shown to the user for encoder failures; empty when the encoder gave none.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Encode(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
