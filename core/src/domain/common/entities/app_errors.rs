use thiserror::Error;

/// Every failure the core can report.
///
/// The `Display` output is the message shown to the end user. Diagnostic
/// detail (raw bodies, parse errors) is carried in fields that are only ever
/// logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Unsupported file type: {0}. Please upload a JPG, PNG, WebP or HEIC image.")]
    UnsupportedMediaType(String),

    #[error("File is too large. Maximum size is {} MB.", .max / (1024 * 1024))]
    FileTooLarge { size: u64, max: u64 },

    #[error("The selected file is empty.")]
    EmptyImage,

    #[error("Failed to read image: {0}")]
    ImageRead(String),

    #[error("API key required")]
    CredentialMissing,

    #[error("API key must not be empty")]
    EmptyCredential,

    #[error("API key is provided by the environment and cannot be changed here")]
    CredentialNotEditable,

    #[error("Invalid request — please check your API key and try again.")]
    InvalidRequest,

    #[error("API key is invalid or does not have permission to use AI vision.")]
    InvalidCredential,

    #[error("Rate limit exceeded — please wait a moment and try again.")]
    RateLimited,

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Could not reach the AI service. Please check your connection and try again.")]
    Transport(String),

    #[error("No response received from AI. Please try again.")]
    NoContent,

    #[error("AI returned an unexpected response format. Please try again.")]
    UnexpectedFormat,

    #[error("AI returned an incomplete analysis. Please try again.")]
    InvalidResultSchema(String),

    #[error("An analysis is already in progress")]
    AttemptInProgress,

    #[error("Local storage is unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Local storage quota exceeded ({required} of {quota} bytes)")]
    StorageQuotaExceeded { required: u64, quota: u64 },

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
}

impl CoreError {
    /// The image itself was refused, before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::UnsupportedMediaType(_)
                | CoreError::FileTooLarge { .. }
                | CoreError::EmptyImage
        )
    }

    /// The remote model answered, but not in the agreed shape.
    pub fn is_contract(&self) -> bool {
        matches!(
            self,
            CoreError::NoContent | CoreError::UnexpectedFormat | CoreError::InvalidResultSchema(_)
        )
    }
}
