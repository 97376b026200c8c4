use axum::extract::{Request, State};
use axum::http::{Method, header};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

/// Requires `Authorization: Bearer <API_TOKEN>` on mutating requests when a token is configured.
pub async fn require_token(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let read_only = matches!(*req.method(), Method::GET | Method::HEAD | Method::OPTIONS);
    let Some(expected) = state.api_token.as_deref().filter(|_| !read_only) else {
        return Ok(next.run(req).await);
    };

    let provided = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    if provided == Some(expected) {
        Ok(next.run(req).await)
    } else {
        warn!("rejected {} {}: bad or missing bearer token", req.method(), req.uri().path());
        Err(AppError::Unauthorized)
    }
}
