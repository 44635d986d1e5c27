// src/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifierError {
    #[error("{0}")]
    Validation(String),

    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Session expired or not authenticated")]
    Unauthorized,

    #[error("Could not reach the server: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),
}

impl VerifierError {
    /// The text shown to the user in a toast or on stderr.
    ///
    /// Server messages are passed through untouched; everything else uses the
    /// `Display` form.
    pub fn user_message(&self) -> String {
        match self {
            VerifierError::Api { message, .. } => message.clone(),
            VerifierError::Http(_) => "Could not connect to the server".to_string(),
            other => other.to_string(),
        }
    }
}

pub type VerifierResult<T> = std::result::Result<T, VerifierError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_surface_the_server_message() {
        let err = VerifierError::Api { status: 409, message: "Duplicate code".into() };
        assert_eq!(err.user_message(), "Duplicate code");
        assert_eq!(err.to_string(), "Server returned 409: Duplicate code");
    }

    #[test]
    fn validation_errors_display_verbatim() {
        let err = VerifierError::Validation("Enter a code".into());
        assert_eq!(err.user_message(), "Enter a code");
    }
}
