//! Shared application state handed to every request handler.

use std::sync::Arc;

use prometheus::{IntCounterVec, Opts};

use crate::config::AppConfig;
use crate::document::{DocumentRenderer, TypstRenderEngine};
use crate::store::RecordStore;

/// Application-level counters, registered onto the middleware registry at
/// startup.
pub struct Metrics {
    pub documents_generated: IntCounterVec,
}

impl Metrics {
    fn new() -> Self {
        let documents_generated = IntCounterVec::new(
            Opts::new(
                "documents_generated_total",
                "Documents rendered successfully, by record kind.",
            ),
            &["kind"],
        )
        .expect("Failed to create documents_generated_total counter");
        Metrics {
            documents_generated,
        }
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub store: RecordStore,
    pub renderer: Arc<dyn DocumentRenderer + Send + Sync>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self::with_renderer(config, Arc::new(TypstRenderEngine))
    }

    /// Build state with an injected renderer; used by tests to avoid the
    /// Typst CLI dependency.
    pub fn with_renderer(
        config: AppConfig,
        renderer: Arc<dyn DocumentRenderer + Send + Sync>,
    ) -> Self {
        AppState {
            config,
            store: RecordStore::new(),
            renderer,
            metrics: Metrics::new(),
        }
    }
}
