use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid record timestamp: '{value}' (expected YYYYMMDDHHmm)")]
    InvalidTimestamp { value: String },

    #[error("METAR decode error: {message}")]
    Decode { message: String },

    #[error("Unmapped {field} value: '{value}'")]
    UnmappedCategory { field: &'static str, value: String },
}

impl ProcessingError {
    pub fn decode(message: impl Into<String>) -> Self {
        ProcessingError::Decode {
            message: message.into(),
        }
    }
}
