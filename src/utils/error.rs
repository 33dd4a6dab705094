use thiserror::Error;

#[derive(Error, Debug)]
pub enum KitError {
    #[error("Image not found: {path}")]
    ImageNotFound { path: String },

    #[error("Image processing failed: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Image size mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("No works_id returned in {step} response")]
    MissingWorksId { step: String },

    #[error("Step '{step}' failed: {details}")]
    StepFailed { step: String, details: String },

    #[error("Display error: {message}")]
    DisplayError { message: String },
}

impl KitError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            KitError::ImageNotFound { path } => {
                format!("Image not found. Check path and filename: {}", path)
            }
            KitError::ImageError(_) => "The image could not be decoded".to_string(),
            KitError::ApiError(e) if e.is_timeout() => "The API did not answer in time".to_string(),
            KitError::ApiError(_) => "The API request could not be completed".to_string(),
            KitError::MissingWorksId { .. } => "No works_id returned. Exiting.".to_string(),
            KitError::ConfigError { .. }
            | KitError::ConfigValidationError { .. }
            | KitError::InvalidConfigValueError { .. }
            | KitError::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            KitError::ImageNotFound { .. } => "Pass the image path as the first argument",
            KitError::ImageError(_) => "Use a JPEG or PNG file",
            KitError::ApiError(_) => "Check network connectivity and the endpoint URL",
            KitError::SerializationError(_) => "The API answered with something that is not JSON",
            KitError::MissingWorksId { .. } => "Check that the token is still valid",
            KitError::ConfigError { .. }
            | KitError::ConfigValidationError { .. }
            | KitError::InvalidConfigValueError { .. }
            | KitError::MissingConfigError { .. } => "Fix the configuration file or CLI flags",
            KitError::DisplayError { .. } => "Run with --headless --save-dir <DIR> instead",
            _ => "Re-run with --verbose for details",
        }
    }

    /// 所有致命錯誤都以 1 結束行程
    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T> = std::result::Result<T, KitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_works_id_message() {
        let err = KitError::MissingWorksId {
            step: "Works.save".to_string(),
        };
        assert_eq!(err.to_string(), "No works_id returned in Works.save response");
        assert_eq!(err.user_friendly_message(), "No works_id returned. Exiting.");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_image_not_found_message() {
        let err = KitError::ImageNotFound {
            path: "phone_case.jpg".to_string(),
        };
        assert!(err.user_friendly_message().contains("phone_case.jpg"));
        assert_eq!(
            err.recovery_suggestion(),
            "Pass the image path as the first argument"
        );
    }
}
