//! Error taxonomy shared by the repositories, the service layer and the web handlers.

use sea_orm::{DbErr, SqlErr};

/// Errors surfaced by tracker operations.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("{0} is required")]
    Validation(String),

    #[error("File storage error: {0}")]
    FileStorage(#[from] std::io::Error),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(DbErr),
}

pub type Result<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<DbErr> for TrackerError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Constraint(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::Constraint(msg),
            _ => Self::Database(err),
        }
    }
}

/// Turns an optional lookup result into a `NotFound` error.
pub trait OrNotFound<T> {
    fn or_not_found(self, entity: &'static str, id: i32) -> Result<T>;
}

impl<T> OrNotFound<T> for Option<T> {
    fn or_not_found(self, entity: &'static str, id: i32) -> Result<T> {
        self.ok_or(TrackerError::NotFound { entity, id })
    }
}

/// Trims a required form field, rejecting blank input.
pub fn require(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::validation(field));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional form field, mapping blank input to `None`.
pub fn optional(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_trims_and_rejects_blank() {
        assert_eq!(require("title", "  Bear ").unwrap(), "Bear");
        let err = require("title", "   ").unwrap_err();
        assert!(matches!(err, TrackerError::Validation(ref f) if f == "title"));
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn test_optional_maps_blank_to_none() {
        assert_eq!(optional(Some("  ")), None);
        assert_eq!(optional(None), None);
        assert_eq!(optional(Some(" https://x ")), Some("https://x".to_string()));
    }

    #[test]
    fn test_or_not_found() {
        let missing: Option<i32> = None;
        let err = missing.or_not_found("Project", 7).unwrap_err();
        assert_eq!(err.to_string(), "Project 7 not found");
        assert_eq!(Some(3).or_not_found("Project", 7).unwrap(), 3);
    }
}
