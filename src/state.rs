//! Application state
//!
//! One explicit store instance and one provider client, constructed at process
//! start and handed to the router by handle. No ambient globals.

use crate::config::ProviderConfig;
use crate::orchestrator::Orchestrator;
use crate::provider::CompletionClient;
use crate::store::MemStore;
use std::sync::Arc;

/// Shared state available to every request handler
#[derive(Clone)]
pub struct AppState {
    /// The in-memory entity store
    pub store: Arc<MemStore>,
    /// Chat turn orchestrator (store + completion provider)
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    /// Build the state from provider configuration
    pub fn new(provider: &ProviderConfig) -> Self {
        let store = Arc::new(MemStore::new());
        let completions = Arc::new(CompletionClient::new(provider));
        let orchestrator = Arc::new(Orchestrator::new(store.clone(), completions));
        Self {
            store,
            orchestrator,
        }
    }
}
