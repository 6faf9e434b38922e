use thiserror::Error;

/// AWS error codes Bedrock uses when a caller is being rate limited.
const THROTTLING_CODES: &[&str] = &[
    "ThrottlingException",
    "TooManyRequestsException",
    "ServiceQuotaExceededException",
];

#[derive(Debug, Error)]
pub enum BedrockError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Arguments rejected locally before anything is sent.
    #[error("Request error: {0}")]
    RequestError(String),

    #[error("Response error: {0}")]
    ResponseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    /// The remote call failed: network, auth, throttling or validation on the service side.
    #[error("AWS service error: {}", format_service_error(.code.as_deref(), .message))]
    ServiceError {
        code: Option<String>,
        message: String,
    },

    #[error("No image produced")]
    NoImageProduced,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_service_error(code: Option<&str>, message: &str) -> String {
    match code {
        Some(code) => format!("{} - {}", code, message),
        None => message.to_string(),
    }
}

impl BedrockError {
    pub fn service(code: Option<&str>, message: impl Into<String>) -> Self {
        BedrockError::ServiceError {
            code: code.map(String::from),
            message: message.into(),
        }
    }

    pub fn is_service_error(&self) -> bool {
        matches!(self, BedrockError::ServiceError { .. })
    }

    pub fn is_throttling(&self) -> bool {
        match self {
            BedrockError::ServiceError {
                code: Some(code), ..
            } => THROTTLING_CODES.contains(&code.as_str()),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, BedrockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display() {
        let err = BedrockError::service(Some("ValidationException"), "bad mask");
        assert_eq!(
            err.to_string(),
            "AWS service error: ValidationException - bad mask"
        );

        let err = BedrockError::service(None, "dispatch failure");
        assert_eq!(err.to_string(), "AWS service error: dispatch failure");
    }

    #[test]
    fn test_is_throttling() {
        assert!(BedrockError::service(Some("ThrottlingException"), "slow down").is_throttling());
        assert!(!BedrockError::service(Some("AccessDeniedException"), "nope").is_throttling());
        assert!(!BedrockError::service(None, "timeout").is_throttling());
        assert!(!BedrockError::NoImageProduced.is_throttling());
    }

    #[test]
    fn test_io_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.png");
        let err: BedrockError = io.into();
        assert_eq!(err.to_string(), "missing.png");
        assert!(!err.is_service_error());
    }
}
