//! Business-error value surfaced verbatim through the error envelope.
//!
//! A `BizError` carries its own application code, display message, HTTP
//! status and an optional list of structured details. Business functions
//! return it through `anyhow::Error`; the adapter recovers it by downcast
//! and writes status and body exactly as constructed, without translation.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::envelope::{Code, ErrorBody};

/// Application-level failure with its own transport status.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct BizError {
    code: Code,
    message: String,
    status: StatusCode,
    details: Vec<serde_json::Value>,
}

impl BizError {
    pub fn new(code: impl Into<Code>, message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            status,
            details: Vec::new(),
        }
    }

    /// Like [`BizError::new`] but with a list of structured sub-errors,
    /// preserved in order on the wire.
    pub fn with_details(
        code: impl Into<Code>,
        message: impl Into<String>,
        status: StatusCode,
        details: Vec<serde_json::Value>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            status,
            details,
        }
    }

    pub fn bad_request(code: impl Into<Code>, message: impl Into<String>) -> Self {
        Self::new(code, message, StatusCode::BAD_REQUEST)
    }

    pub fn unauthorized(code: impl Into<Code>, message: impl Into<String>) -> Self {
        Self::new(code, message, StatusCode::UNAUTHORIZED)
    }

    pub fn forbidden(code: impl Into<Code>, message: impl Into<String>) -> Self {
        Self::new(code, message, StatusCode::FORBIDDEN)
    }

    pub fn not_found(code: impl Into<Code>, message: impl Into<String>) -> Self {
        Self::new(code, message, StatusCode::NOT_FOUND)
    }

    pub fn conflict(code: impl Into<Code>, message: impl Into<String>) -> Self {
        Self::new(code, message, StatusCode::CONFLICT)
    }

    pub fn internal(code: impl Into<Code>, message: impl Into<String>) -> Self {
        Self::new(code, message, StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn code(&self) -> &Code {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn details(&self) -> &[serde_json::Value] {
        &self.details
    }
}

impl IntoResponse for BizError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code,
            message: self.message,
            errors: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Detail shape the adapter itself manufactures for validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl From<FieldError> for serde_json::Value {
    fn from(e: FieldError) -> Self {
        serde_json::json!({ "field": e.field, "message": e.message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_constructors_fix_status() {
        let cases = [
            (
                BizError::bad_request(1, "m").status(),
                StatusCode::BAD_REQUEST,
            ),
            (
                BizError::unauthorized(1, "m").status(),
                StatusCode::UNAUTHORIZED,
            ),
            (BizError::forbidden(1, "m").status(), StatusCode::FORBIDDEN),
            (BizError::not_found(1, "m").status(), StatusCode::NOT_FOUND),
            (BizError::conflict(1, "m").status(), StatusCode::CONFLICT),
            (
                BizError::internal(1, "m").status(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (got, want) in cases {
            assert_eq!(got, want);
        }
    }

    #[test]
    fn new_has_no_details() {
        let err = BizError::new("E_ID", "id required", StatusCode::BAD_REQUEST);
        assert!(err.details().is_empty());
        assert_eq!(err.code(), &Code::Str("E_ID".into()));
        assert_eq!(err.message(), "id required");
    }

    #[test]
    fn with_details_preserves_order_and_length() {
        let details = vec![
            serde_json::json!({"field": "a"}),
            serde_json::json!({"field": "b"}),
        ];
        let err =
            BizError::with_details(400, "bad", StatusCode::BAD_REQUEST, details.clone());
        assert_eq!(err.details(), details.as_slice());
    }

    #[test]
    fn display_is_the_message() {
        let err = BizError::not_found(40400, "user 7 not found");
        assert_eq!(err.to_string(), "user 7 not found");
    }

    #[test]
    fn downcast_through_anyhow() {
        let err: anyhow::Error = BizError::conflict(40900, "email taken").into();
        let biz = err.downcast_ref::<BizError>().unwrap();
        assert_eq!(biz.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn into_response_uses_own_status_and_body() {
        let resp = BizError::bad_request(40000, "id required").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
