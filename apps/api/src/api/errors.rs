use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

/// Machine-readable error codes returned in `{ "code": ... }` bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    RequireStart,
    RequireEnd,
    RequireId,
    RequireDescription,
    RequireTimestamp,
    InvalidTimestamp,
    RequireCategory,
    RequireAmount,
    InvalidAmount,
    InternalError,
}

impl ErrorCode {
    /// Returns the wire representation of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::RequireStart => "REQUIRE_START",
            ErrorCode::RequireEnd => "REQUIRE_END",
            ErrorCode::RequireId => "REQUIRE_ID",
            ErrorCode::RequireDescription => "REQUIRE_DESCRIPTION",
            ErrorCode::RequireTimestamp => "REQUIRE_TIMESTAMP",
            ErrorCode::InvalidTimestamp => "INVALID_TIMESTAMP",
            ErrorCode::RequireCategory => "REQUIRE_CATEGORY",
            ErrorCode::RequireAmount => "REQUIRE_AMOUNT",
            ErrorCode::InvalidAmount => "INVALID_AMOUNT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: ErrorCode,
}

/// API error type with HTTP status code and error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: ErrorCode,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, code: ErrorCode) -> Self {
        Self { status, code }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(code: ErrorCode) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code)
    }

    /// Creates a 500 Internal Server Error
    ///
    /// The cause is never part of the response; callers log it.
    pub fn internal_server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { code: self.code })).into_response()
    }
}
