// Error handling framework

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;
use uuid::Uuid;

/// Invalid scheduling requests. Always surfaced to the caller, never retried.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Cannot schedule {posts} posts across {days} days; post count must not exceed day count")]
    PostCountExceedsDays { posts: usize, days: i64 },

    #[error("Invalid date window: end date {end} is before start date {start}")]
    InvalidDateWindow { start: NaiveDate, end: NaiveDate },

    #[error("Campaign {0} has no posts to schedule")]
    EmptyCampaign(Uuid),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Local time {local} does not exist in timezone {timezone}")]
    NonexistentLocalTime {
        local: NaiveDateTime,
        timezone: String,
    },
}

/// Referenced entities that do not exist
#[derive(Error, Debug)]
pub enum NotFoundError {
    #[error("Brand not found: {0}")]
    Brand(Uuid),

    #[error("Campaign not found: {0}")]
    Campaign(Uuid),

    #[error("Post not found: {0}")]
    Post(Uuid),

    #[error("No schedule found for post {0}")]
    ScheduleForPost(Uuid),

    #[error("No schedules found for campaign {0}")]
    SchedulesForCampaign(Uuid),
}

/// Persistence collaborator failures
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Duplicate key violation: {0}")]
    DuplicateKey(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

/// Top-level error returned by the scheduling service
#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// API response error type for HTTP responses
#[derive(Debug, serde::Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::new("VALIDATION_ERROR", err.to_string())
    }
}

impl From<NotFoundError> for ApiError {
    fn from(err: NotFoundError) -> Self {
        ApiError::new("NOT_FOUND", err.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::new("STORAGE_ERROR", err.to_string())
    }
}

impl From<SchedulingError> for ApiError {
    fn from(err: SchedulingError) -> Self {
        match err {
            SchedulingError::Validation(e) => e.into(),
            SchedulingError::NotFound(e) => e.into(),
            SchedulingError::Storage(e) => e.into(),
        }
    }
}

// Implement From for common external errors
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                // Check for specific database error codes
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => StorageError::DuplicateKey(db_err.message().to_string()),
                        "23503" => StorageError::ForeignKeyViolation(db_err.message().to_string()),
                        _ => StorageError::QueryFailed(db_err.message().to_string()),
                    }
                } else {
                    StorageError::QueryFailed(db_err.message().to_string())
                }
            }
            sqlx::Error::Io(io_err) => StorageError::ConnectionFailed(io_err.to_string()),
            sqlx::Error::PoolTimedOut => {
                StorageError::ConnectionFailed("connection pool timed out".to_string())
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::PostCountExceedsDays { posts: 5, days: 2 };
        assert!(err.to_string().contains("5 posts across 2 days"));
    }

    #[test]
    fn test_not_found_error_display() {
        let id = Uuid::new_v4();
        let err = NotFoundError::Post(id);
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_validation_error_to_api_error() {
        let err = ValidationError::InvalidTimezone("Mars/Olympus".to_string());
        let api_err: ApiError = err.into();
        assert_eq!(api_err.code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_scheduling_error_preserves_api_code() {
        let err = SchedulingError::NotFound(NotFoundError::Campaign(Uuid::new_v4()));
        let api_err: ApiError = err.into();
        assert_eq!(api_err.code, "NOT_FOUND");
    }

    #[test]
    fn test_api_error_with_details() {
        let err = ApiError::new("TEST_ERROR", "Test message")
            .with_details(serde_json::json!({"field": "value"}));
        assert!(err.details.is_some());
    }
}
