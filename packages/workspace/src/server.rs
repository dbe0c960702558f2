//! HTTP boundary for previews, edit views and exports.
//!
//! This is the only component holding the template store. Exports go
//! through the [`ExportGate`] here and nowhere else, so the entitlement check
//! runs on the same side as the canonical fragments.

use crate::access::{proxy_access, Caller};
use crate::error::AppError;
use crate::state::{ViewId, WorkspaceState};
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use swatch_common::{FragmentKind, Fragments, TemplateId, TemplateStore};
use swatch_compiler_html::{compose, RenderableDocument, SandboxPolicy};
use swatch_export::{ExportArtifact, ExportGate};
use tower_http::trace::TraceLayer;

/// Shared state behind every route
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TemplateStore>,
    gate: ExportGate,
    workspace: Arc<Mutex<WorkspaceState>>,
}

impl AppState {
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self {
            gate: ExportGate::new(store.clone()),
            store,
            workspace: Arc::new(Mutex::new(WorkspaceState::new())),
        }
    }

    pub fn workspace_state(&self) -> MutexGuard<'_, WorkspaceState> {
        self.workspace
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ServerOptions {
    /// Derive caller context from `x-swatch-*` headers set by a fronting proxy
    pub trust_proxy_headers: bool,
}

pub fn router(state: AppState, options: &ServerOptions) -> Router {
    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/templates/:id/preview", get(template_preview))
        .route("/api/templates/:id/download", get(template_download))
        .route("/api/views", post(open_view))
        .route("/api/views/:view", get(get_view).delete(close_view))
        .route("/api/views/:view/fragments/:kind", put(set_fragment))
        .route("/api/views/:view/reset", post(reset_view))
        .route("/api/views/:view/preview", get(view_preview))
        .with_state(state);

    let app = if options.trust_proxy_headers {
        app.layer(axum::middleware::from_fn(proxy_access))
    } else {
        app
    };

    app.layer(TraceLayer::new_for_http())
}

/// Bind and serve until ctrl-c
pub async fn serve(addr: SocketAddr, app: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await
}

// ============================================================================
// Responses
// ============================================================================

/// Serve a composed document under the sandbox policy
fn sandboxed_html(document: RenderableDocument) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (
                header::CONTENT_SECURITY_POLICY,
                SandboxPolicy::PREVIEW.content_security_policy(),
            ),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        document.into_string(),
    )
        .into_response()
}

fn attachment(artifact: ExportArtifact) -> Response {
    let disposition = content_disposition(artifact.filename());
    let content_type = format!("{}; charset=utf-8", artifact.mime_type());

    let mut response = (
        [
            (
                header::CONTENT_SECURITY_POLICY,
                SandboxPolicy::PREVIEW.content_security_policy(),
            ),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        artifact.into_content(),
    )
        .into_response();

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&content_type) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    response
}

/// `attachment` disposition with an ASCII fallback name and a UTF-8 name
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' && c != '%' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let mut encoded = String::new();
    for byte in filename.bytes() {
        if byte.is_ascii_alphanumeric() || b"-._~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback, encoded
    )
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    pub view_id: ViewId,
    pub template_id: TemplateId,
    pub version: u64,
    pub fragments: Fragments,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionResponse {
    pub view_id: ViewId,
    pub version: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenViewRequest {
    pub template_id: TemplateId,
}

fn view_response(state: &WorkspaceState, view_id: ViewId) -> Result<ViewResponse, AppError> {
    let session = state.get_view(view_id)?;
    Ok(ViewResponse {
        view_id,
        template_id: session.template_id(),
        version: session.version,
        fragments: session.snapshot(),
    })
}

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Canonical document for card thumbnails and read-only previews
async fn template_preview(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Response, AppError> {
    let template = state.store.get_template(TemplateId(id)).await?;
    Ok(sandboxed_html(compose(&template.fragments())))
}

async fn template_download(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Caller(ctx): Caller,
) -> Result<Response, AppError> {
    let artifact = state.gate.request_export(TemplateId(id), &ctx).await?;
    Ok(attachment(artifact))
}

async fn open_view(
    State(state): State<AppState>,
    Json(request): Json<OpenViewRequest>,
) -> Result<(StatusCode, Json<ViewResponse>), AppError> {
    // Fetch first; a view only exists once its template resolved
    let template = state.store.get_template(request.template_id).await?;

    let mut workspace = state.workspace_state();
    let view_id = workspace.open_view(&template);
    tracing::info!(%view_id, template_id = %template.id, "opened view");

    Ok((StatusCode::CREATED, Json(view_response(&workspace, view_id)?)))
}

async fn get_view(
    State(state): State<AppState>,
    Path(view): Path<u64>,
) -> Result<Json<ViewResponse>, AppError> {
    Ok(Json(view_response(&state.workspace_state(), ViewId(view))?))
}

async fn set_fragment(
    State(state): State<AppState>,
    Path((view, kind)): Path<(u64, String)>,
    text: String,
) -> Result<Json<VersionResponse>, AppError> {
    let kind: FragmentKind = kind
        .parse()
        .map_err(|e: swatch_common::UnknownFragmentKind| AppError::BadRequest(e.to_string()))?;
    let view_id = ViewId(view);

    let version = state.workspace_state().set_fragment(view_id, kind, text)?;
    Ok(Json(VersionResponse { view_id, version }))
}

async fn reset_view(
    State(state): State<AppState>,
    Path(view): Path<u64>,
) -> Result<Json<ViewResponse>, AppError> {
    let view_id = ViewId(view);
    let template_id = state.workspace_state().template_of(view_id)?;

    // The lock is not held across the fetch; the view may close meanwhile
    let template = state.store.get_template(template_id).await?;

    let mut workspace = state.workspace_state();
    workspace.reset_view(view_id, &template).map_err(|e| {
        tracing::debug!(%view_id, error = %e, "discarding reset result");
        e
    })?;

    Ok(Json(view_response(&workspace, view_id)?))
}

async fn view_preview(
    State(state): State<AppState>,
    Path(view): Path<u64>,
) -> Result<Response, AppError> {
    let document = state.workspace_state().get_view(ViewId(view))?.preview();
    Ok(sandboxed_html(document))
}

async fn close_view(
    State(state): State<AppState>,
    Path(view): Path<u64>,
) -> Result<StatusCode, AppError> {
    let view_id = ViewId(view);
    if state.workspace_state().close_view(view_id) {
        tracing::info!(%view_id, "closed view");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("View {} is not open", view_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_ascii() {
        assert_eq!(
            content_disposition("fancy-card.html"),
            "attachment; filename=\"fancy-card.html\"; filename*=UTF-8''fancy-card.html"
        );
    }

    #[test]
    fn test_content_disposition_non_ascii() {
        let value = content_disposition("café\"card.html");
        assert!(value.starts_with("attachment; filename=\"caf__card.html\""));
        assert!(value.ends_with("filename*=UTF-8''caf%C3%A9%22card.html"));
    }
}
