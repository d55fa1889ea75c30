//! Error types for the FamilyHub application
//!
//! All errors use thiserror for structured error handling.
//! These errors can be serialized to the frontend.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Tauri error: {0}")]
    Tauri(#[from] tauri::Error),

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Invalid e-mail or password")]
    InvalidCredentials,

    #[error("An account with this e-mail already exists")]
    EmailTaken,

    #[error("No family has been set up for this account yet")]
    FamilyNotBootstrapped,

    #[error("Family member not found: {0}")]
    MemberNotFound(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Generic(String),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_serialize_as_their_display_string() {
        let json = serde_json::to_string(&AppError::NotSignedIn).unwrap();
        assert_eq!(json, "\"Not signed in\"");

        let json = serde_json::to_string(&AppError::Validation(
            "Item name must not be empty".to_string(),
        ))
        .unwrap();
        assert_eq!(json, "\"Item name must not be empty\"");
    }
}
