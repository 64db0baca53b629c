use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::reply::Reply;
use crate::store::StoreError;

/// Faults that end a request on the generic internal-error reply.
///
/// The variant only affects what gets logged. Clients always see the same body.
#[derive(Debug)]
pub enum AppError {
    Body(String),
    Form(String),
    Serialize(serde_json::Error),
    Store(StoreError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Body(msg) => write!(f, "Body Error: {msg}"),
            AppError::Form(msg) => write!(f, "Form Error: {msg}"),
            AppError::Serialize(err) => write!(f, "Serialize Error: {err}"),
            AppError::Store(err) => write!(f, "Store Error: {err}"),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {self}");
        (StatusCode::INTERNAL_SERVER_ERROR, Reply::internal_error()).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialize(err)
    }
}

/// Turn a panic caught by `CatchPanicLayer` into the generic internal-error reply.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic"
    };
    tracing::error!("Handler panicked: {detail}");
    (StatusCode::INTERNAL_SERVER_ERROR, Reply::internal_error()).into_response()
}
