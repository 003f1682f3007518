use std::sync::Arc;

use crate::analysis::vocabulary::Vocabulary;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only skill vocabulary, built once at startup. Never mutated, so
    /// unsynchronized concurrent reads from all requests are safe.
    pub vocabulary: Arc<Vocabulary>,
    pub config: Config,
}
