use anyhow::anyhow;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tracing::info;

use crate::board::{encode_png, RenderRequest};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /render
///
/// Decodes and validates the board before any drawing happens, then renders on
/// the blocking pool and answers with `image/png`.
pub async fn handle_render(
    State(state): State<AppState>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = payload.map_err(|e| AppError::InvalidLayout(e.body_text()))?;
    info!("Drawing board with world {}", req.world);

    let layout = req.into_layout(&state.board)?;

    let png = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, AppError> {
        let image = state.compositor.render(&state.board, &layout)?;
        encode_png(&image).map_err(|e| AppError::Internal(e.into()))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow!("spawn_blocking failed in render: {e}")))??;

    Ok(([(header::CONTENT_TYPE, "image/png")], Bytes::from(png)).into_response())
}
