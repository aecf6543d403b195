#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum InputValidationError {
    #[error("Reason is empty")]
    EmptyReason,
    #[error("Message is empty")]
    EmptyMessage,
    #[error("Action taken is empty")]
    EmptyActionTaken,
    #[error("Member name is empty")]
    EmptyName,
}

/// Empty and whitespace only text is blank.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
