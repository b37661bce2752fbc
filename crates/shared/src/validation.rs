//! Common validation utilities.

use validator::ValidationError;

/// Validates that a required text field has non-whitespace content.
pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("This field is required".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates the loose email shape accepted on the submission form:
/// the address must contain both an `@` and a `.`.
pub fn validate_contact_email(email: &str) -> Result<(), ValidationError> {
    if email.contains('@') && email.contains('.') {
        Ok(())
    } else {
        let mut err = ValidationError::new("email_format");
        err.message = Some("Please enter a valid email address".into());
        Err(err)
    }
}

/// Normalizes optional free text: trims it and maps blank input to `None`.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
