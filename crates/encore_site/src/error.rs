//! Error types for encore_site

use thiserror::Error;

/// A news date attribute that cannot be displayed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Not three dash separated numbers
    #[error("Malformed date `{0}`, expected YYYY-MM-DD")]
    Malformed(String),

    /// Numbers parse but name no calendar day
    #[error("No such calendar day: {0}")]
    OutOfRange(String),
}

/// Contact form validation failure
///
/// The `Display` text is exactly what the form shows to the visitor.
/// Variants are listed in the order the rules are checked.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your name.")]
    MissingName,

    #[error("Please enter your email.")]
    MissingEmail,

    #[error("Please enter a valid email.")]
    InvalidEmail,

    #[error("Please enter a message.")]
    MissingMessage,
}
