use crate::config::Config;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    /// Startup configuration, reserved for handlers that need deployment
    /// values beyond what the store carries.
    #[allow(dead_code)]
    pub config: Config,
}
