use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::{DbErr, RuntimeErr, SqlErr, sqlx};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failure kinds surfaced by the record store.
///
/// Every driver error is mapped into one of these at the store boundary, so
/// services and handlers never have to inspect `DbErr` themselves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write (e.g. duplicate `student_id`).
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("record not found: {0}")]
    NotFound(String),

    /// The database could not be reached or no pooled connection was available.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage error: {0}")]
    Internal(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

// Primary SQLite result codes; extended codes carry these in the low byte.
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }

    /// The store was busy or unreachable; repeating the operation may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// True when SQLite refused the statement because another connection holds
/// the lock it needs.
fn is_sqlite_busy(err: &DbErr) -> bool {
    if let DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(e)))
    | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(e))) = err
    {
        return e
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .is_some_and(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED));
    }
    false
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        if is_sqlite_busy(&err) {
            return StoreError::Unavailable(err.to_string());
        }
        if let Some(sql_err) = err.sql_err() {
            return match sql_err {
                SqlErr::UniqueConstraintViolation(msg) => StoreError::Conflict(msg),
                SqlErr::ForeignKeyConstraintViolation(msg) => StoreError::Internal(msg),
                other => StoreError::Internal(other.to_string()),
            };
        }
        match err {
            DbErr::RecordNotFound(msg) => StoreError::NotFound(msg),
            DbErr::Conn(e) => StoreError::Unavailable(e.to_string()),
            DbErr::ConnectionAcquire(e) => StoreError::Unavailable(e.to_string()),
            other => StoreError::Internal(other.to_string()),
        }
    }
}

/// Errors returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("API route not found")]
    RouteNotFound,

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Every store failure is a 500 on the wire regardless of its kind.
            ApiError::Store(err) => {
                error!(error = %err, conflict = err.is_conflict(), "store operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
