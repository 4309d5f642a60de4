use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("movie {0} not found")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{op} failed: {source}")]
    Storage {
        op: &'static str,
        id: Option<i32>,
        title: Option<String>,
        #[source]
        source: DbErr,
    },
}

/// Coarse classification of a storage failure, used only for logging.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StorageFailureKind {
    Constraint,
    Connection,
    Query,
}

impl StorageFailureKind {
    pub fn classify(err: &DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(_) | SqlErr::ForeignKeyConstraintViolation(_)) =
            err.sql_err()
        {
            return Self::Constraint;
        }
        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::Connection,
            _ => Self::Query,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Constraint => "constraint",
            Self::Connection => "connection",
            Self::Query => "query",
        }
    }
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound(id.to_string())
    }

    pub fn storage(op: &'static str, id: Option<i32>) -> impl FnOnce(DbErr) -> Self {
        move |source| Self::Storage { op, id, title: None, source }
    }

    /// Storage failure on a row that has no id yet.
    pub fn storage_for_title(op: &'static str, title: String) -> impl FnOnce(DbErr) -> Self {
        move |source| Self::Storage { op, id: None, title: Some(title), source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(id) => {
                tracing::debug!(id = %id, "movie not found");
                StatusCode::NOT_FOUND.into_response()
            },
            AppError::Validation(msg) => {
                tracing::debug!(error = %msg, "rejected request");
                (StatusCode::BAD_REQUEST, Json(json!({ "success": false, "error": msg })))
                    .into_response()
            },
            AppError::Storage { op, id, title, source } => {
                let kind = StorageFailureKind::classify(&source);
                tracing::error!(
                    op,
                    id,
                    title = title.as_deref(),
                    kind = kind.as_str(),
                    error = %source,
                    "database error"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "success": false })))
                    .into_response()
            },
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
