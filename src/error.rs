use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, Clone, PartialEq)]
pub enum IntakeError {
    NoBody,
    InvalidJson(String),
    NotObject,
    NotConfigured(String),
    Sheet(String),
    Mail(String),
}

impl std::fmt::Display for IntakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntakeError::NoBody => write!(f, "No valid POST data received"),
            IntakeError::InvalidJson(msg) => write!(f, "Invalid JSON: {msg}"),
            IntakeError::NotObject => write!(f, "Expected a JSON object"),
            IntakeError::NotConfigured(what) => write!(f, "{what} is not configured"),
            IntakeError::Sheet(msg) => write!(f, "Sheet error: {msg}"),
            IntakeError::Mail(msg) => write!(f, "Mail error: {msg}"),
        }
    }
}

impl std::error::Error for IntakeError {}

pub const GENERIC_ERROR_BODY: &str = "Something went wrong!";

/// Unhandled failure while serving the site. The detail is logged, never sent.
#[derive(Debug)]
pub enum SiteError {
    Internal(String),
    Panic(String),
}

impl std::fmt::Display for SiteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteError::Internal(msg) => write!(f, "Internal error: {msg}"),
            SiteError::Panic(msg) => write!(f, "Handler panicked: {msg}"),
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        tracing::error!("Error: {self}");
        (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_BODY).into_response()
    }
}
