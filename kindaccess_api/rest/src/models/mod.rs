use serde::Serialize;

pub mod contact;

pub const SUCCESS_MESSAGE: &str = "Email sent successfully";

#[derive(Debug, Serialize)]
pub struct ApiSuccess {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ApiFailure {
    pub success: bool,
    pub kind: ApiErrorKind,
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorKind {
    /// The body could not be read as a valid contact submission.
    MalformedRequest,
    /// The email provider refused or failed to accept an email.
    DeliveryFailed,
    InternalError,
}

impl Default for ApiSuccess {
    fn default() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE,
        }
    }
}

impl ApiFailure {
    pub fn new(kind: ApiErrorKind, error: impl Into<String>) -> Self {
        Self {
            success: false,
            kind,
            error: error.into(),
        }
    }
}
