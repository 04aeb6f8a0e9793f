use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::Display;
use serde_json::json;

/// Error taxonomy for the domain layer. Every failed precondition surfaces
/// one of these; the JSON body carries a stable `error` kind so callers can
/// branch on it instead of scraping the message text.
#[derive(Debug, Display)]
pub enum ApiError {
    /// Malformed or missing input, the caller's fault.
    #[display(fmt = "{}", _0)]
    Validation(String),

    /// Referenced entity does not exist.
    #[display(fmt = "{}", _0)]
    NotFound(String),

    /// Uniqueness violation on `employee_id` or `email`.
    #[display(fmt = "{}", message)]
    DuplicateKey {
        field: &'static str,
        message: String,
    },

    /// Attendance already marked for that employee and date.
    #[display(fmt = "{}", _0)]
    Conflict(String),

    #[display(fmt = "Internal Server Error")]
    Database(sqlx::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::NotFound(_) => "not_found",
            ApiError::DuplicateKey { .. } => "duplicate_key",
            ApiError::Conflict(_) => "conflict",
            ApiError::Database(_) => "internal",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DuplicateKey { .. } | ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = json!({
            "error": self.kind(),
            "message": self.to_string(),
        });
        if let ApiError::DuplicateKey { field, .. } = self {
            body["field"] = json!(field);
        }
        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Database error");
        ApiError::Database(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(
            ApiError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("gone".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::DuplicateKey {
                field: "email",
                message: "taken".into()
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Conflict("already marked".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn duplicate_key_reports_the_colliding_field() {
        let err = ApiError::DuplicateKey {
            field: "email",
            message: "Employee with email 'jane@x.com' already exists".into(),
        };
        assert_eq!(err.kind(), "duplicate_key");
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn database_errors_do_not_leak_details() {
        let err = ApiError::Database(sqlx::Error::PoolClosed);
        assert_eq!(err.to_string(), "Internal Server Error");
    }
}
