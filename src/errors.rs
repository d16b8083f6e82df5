use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Transport-level HTTP failure (connect, timeout, TLS, ...).
    Http(reqwest::Error),
    /// Response body could not be decoded.
    Json(serde_json::Error),
    /// The API answered with a non-success status.
    Api { status: u16, message: String },
    /// Wallet missing, not ready, or signature request rejected.
    Wallet(String),
    NotFound,
    PermissionDenied(String),
    /// The proposal's current status does not allow the requested action.
    InvalidTransition { from: &'static str, action: &'static str },
    Validation(String),
    /// Another action on the same controller is still in flight.
    Busy,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Http(e) => write!(f, "Request error: {e}"),
            AppError::Json(e) => write!(f, "Decode error: {e}"),
            AppError::Api { status, message } => write!(f, "API error {status}: {message}"),
            AppError::Wallet(e) => write!(f, "Wallet error: {e}"),
            AppError::NotFound => write!(f, "Not found"),
            AppError::PermissionDenied(what) => write!(f, "Permission denied: {what}"),
            AppError::InvalidTransition { from, action } => {
                write!(f, "Cannot {action} a proposal in status '{from}'")
            }
            AppError::Validation(e) => write!(f, "{e}"),
            AppError::Busy => write!(f, "Another action is already in progress"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Http(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}
