use std::sync::Arc;

use crate::board::{BoardCompositor, BoardConfig};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Compositor and, through it, the process-wide sprite cache.
    pub compositor: Arc<BoardCompositor>,
    pub board: Arc<BoardConfig>,
}
