//! Maps domain errors to JSON error bodies with matching status codes.

use crate::state::StateError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use swatch_common::StoreError;
use swatch_editor::EditorError;
use swatch_export::ExportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// Entitlement failure. `code` tells clients why.
    #[error("{message}")]
    Forbidden { code: &'static str, message: String },

    /// The template store could not be reached
    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::Forbidden { code, .. } => (StatusCode::FORBIDDEN, *code),
            AppError::BadGateway(_) => (StatusCode::BAD_GATEWAY, "STORE_UNAVAILABLE"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({
            "error": {
                "code": code,
                "message": self.to_string(),
            }
        });
        (status, axum::Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => AppError::NotFound(e.to_string()),
            StoreError::Transport(_) => AppError::BadGateway(e.to_string()),
        }
    }
}

impl From<EditorError> for AppError {
    fn from(e: EditorError) -> Self {
        match e {
            EditorError::Store(store) => store.into(),
            EditorError::TemplateMismatch { .. } => AppError::Internal(e.to_string()),
        }
    }
}

impl From<StateError> for AppError {
    fn from(e: StateError) -> Self {
        match e {
            StateError::ViewNotFound(_) => AppError::NotFound(e.to_string()),
            StateError::Editor(editor) => editor.into(),
        }
    }
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::Denied(reason) => AppError::Forbidden {
                code: reason.code(),
                message: reason.to_string(),
            },
            ExportError::NotFound(_) => AppError::NotFound(e.to_string()),
            ExportError::Transport(_) => AppError::BadGateway(e.to_string()),
        }
    }
}
