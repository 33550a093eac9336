use crate::i18n::MessageKey;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Not an image file: {media_type}")]
    NotAnImage { media_type: String },
    #[error("File too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },
}

impl ValidationError {
    pub fn message_key(&self) -> MessageKey {
        match self {
            ValidationError::NotAnImage { .. } => MessageKey::SelectImageFile,
            ValidationError::TooLarge { .. } => MessageKey::FileSizeError,
        }
    }
}

/// A transition the session refused to take.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("No image selected")]
    NoImageSelected,
    #[error("No prediction available")]
    NoPrediction,
    #[error("Advice is unavailable for an uncertain prediction")]
    AdviceUnavailable,
    #[error("Advice has already been received for this prediction")]
    AdviceAlreadyReceived,
    #[error("This image has already been analyzed; select an image to scan again")]
    AlreadyDetected,
    #[error("A request is already in progress")]
    Busy,
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("No advice received")]
    EmptyAdvice,
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ScanError {
    fn from(err: serde_json::Error) -> Self {
        ScanError::Parse(err.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid URL in {var}: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("Unknown advice mode: {0}")]
    InvalidAdviceMode(String),
    #[error("Unknown language: {0}")]
    InvalidLanguage(String),
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("Preference file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Preference file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
