//! Error types shared by every layer of the crate.
//!
//! [`ValidationError`] covers problems with caller input and is recoverable by
//! the caller. [`AppError`] wraps it together with storage and lookup failures.

use serde_json::{Value, json};
use thiserror::Error;

use crate::domain::entities::Link;
use crate::utils::db_error::{is_connectivity_error, unique_violation_constraint};

/// Input problems a caller can fix or branch on.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The submitted URL was absent or blank.
    #[error("url can't be blank")]
    MissingUrl,

    /// The URL already belongs to another link. Callers redirect to
    /// `existing_link` instead of treating this as a generic failure.
    #[error("url has already been submitted as link {}", .existing_link.id)]
    DuplicateUrl { existing_link: Box<Link> },

    #[error("unknown content kind '{0}'")]
    UnknownContentKind(String),
}

/// Application-level error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// A storage uniqueness constraint rejected a write.
    #[error("{message}")]
    Conflict {
        message: String,
        constraint: Option<String>,
    },

    /// Persistence is unreachable. Never retried internally.
    #[error("storage unavailable: {message}")]
    StorageUnavailable { message: String },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, constraint: Option<&str>) -> Self {
        Self::Conflict {
            message: message.into(),
            constraint: constraint.map(str::to_string),
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn duplicate_url(existing_link: Link) -> Self {
        ValidationError::DuplicateUrl {
            existing_link: Box::new(existing_link),
        }
        .into()
    }

    /// Returns true if this error is a unique violation on `constraint`.
    pub fn is_unique_violation_on(&self, constraint: &str) -> bool {
        matches!(
            self,
            AppError::Conflict { constraint: Some(c), .. } if c == constraint
        )
    }

    /// Returns the link this error points at when it is a duplicate-URL rejection.
    pub fn existing_link(&self) -> Option<&Link> {
        match self {
            AppError::Validation(ValidationError::DuplicateUrl { existing_link }) => {
                Some(existing_link.as_ref())
            }
            _ => None,
        }
    }

    /// Stable machine-readable code for outer layers.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(ValidationError::MissingUrl) => "missing_url",
            AppError::Validation(ValidationError::DuplicateUrl { .. }) => "duplicate_url",
            AppError::Validation(ValidationError::UnknownContentKind(_)) => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::StorageUnavailable { .. } => "storage_unavailable",
            AppError::Internal { .. } => "internal_error",
        }
    }

    /// Renders the `{code, message, details}` shape used by outer layers.
    pub fn to_error_info(&self) -> Value {
        let details = match self {
            AppError::Validation(ValidationError::DuplicateUrl { existing_link }) => {
                json!({ "existing_link_id": existing_link.id, "url": existing_link.url })
            }
            AppError::Validation(ValidationError::UnknownContentKind(tag)) => {
                json!({ "kind": tag })
            }
            AppError::Validation(ValidationError::MissingUrl) => json!({ "field": "url" }),
            AppError::NotFound { details, .. } | AppError::Internal { details, .. } => {
                details.clone()
            }
            AppError::Conflict { constraint, .. } => json!({ "constraint": constraint }),
            AppError::StorageUnavailable { .. } => json!({}),
        };

        json!({
            "code": self.code(),
            "message": self.to_string(),
            "details": details,
        })
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(constraint) = unique_violation_constraint(&e) {
            return AppError::conflict("Unique constraint violation", constraint.as_deref());
        }

        if is_connectivity_error(&e) {
            tracing::error!(error = %e, "database unavailable");
            return AppError::StorageUnavailable {
                message: e.to_string(),
            };
        }

        match e {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found", json!({})),
            other => {
                tracing::error!(error = %other, "database error");
                AppError::internal("Database error", json!({}))
            }
        }
    }
}
