use std::sync::Arc;

use crate::backend_client::RankerBackend;
use crate::config::Config;

/// Shared application state injected into all page handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Ranking backend. Default: `HttpBackend`; tests swap in an in-memory fake.
    pub backend: Arc<dyn RankerBackend>,
    pub config: Config,
}
