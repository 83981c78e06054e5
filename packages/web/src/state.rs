use std::sync::Arc;

use api::CredentialManager;
use store::FeedbackStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FeedbackStore>,
    pub credentials: CredentialManager,
}

impl AppState {
    pub fn new(store: Arc<dyn FeedbackStore>) -> Self {
        Self {
            credentials: CredentialManager::new(store.clone()),
            store,
        }
    }
}
