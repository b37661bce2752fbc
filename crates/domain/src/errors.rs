//! Domain error types.

use thiserror::Error;

/// Why a submission or query was rejected before reaching storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Invalid value for {field}: {value}")]
    InvalidChoice { field: &'static str, value: String },

    #[error("Invalid {field}: {message}")]
    Invalid { field: String, message: String },
}

impl FeedbackValidationError {
    /// Name of the offending field, when one is known.
    pub fn field(&self) -> Option<&str> {
        match self {
            FeedbackValidationError::MissingField(field) => Some(*field),
            FeedbackValidationError::InvalidEmail => Some("email"),
            FeedbackValidationError::InvalidChoice { field, .. } => Some(*field),
            FeedbackValidationError::Invalid { field, .. } => Some(field.as_str()),
        }
    }
}

impl From<validator::ValidationErrors> for FeedbackValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Report the alphabetically first field so the message is stable.
        let mut fields: Vec<(String, String)> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    (
                        field.to_string(),
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string()),
                    )
                })
            })
            .collect();
        fields.sort();

        match fields.into_iter().next() {
            Some((field, message)) => FeedbackValidationError::Invalid { field, message },
            None => FeedbackValidationError::Invalid {
                field: "request".to_string(),
                message: "invalid request".to_string(),
            },
        }
    }
}

/// Failure of a feedback store operation.
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error(transparent)]
    Validation(#[from] FeedbackValidationError),

    #[error("Feedback submission {0} not found")]
    NotFound(i64),

    #[error("Storage error: {0}")]
    Persistence(String),
}

/// Failure of an admin authentication attempt.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Admin login required")]
    Unauthenticated,

    #[error("Credential storage error: {0}")]
    Persistence(String),
}
