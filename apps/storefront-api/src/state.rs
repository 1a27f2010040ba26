//! Shared application state.

use std::sync::Arc;

use crate::auth::JwtManager;
use crate::config::ApiConfig;
use crate::events::AuthEvents;
use freshmart_store::{BlobStore, Store};

/// State shared by every handler. Cloning is cheap (Arc + pool handles).
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub blobs: BlobStore,
    pub jwt: Arc<JwtManager>,
    pub auth_events: AuthEvents,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    /// Assembles state from loaded config and a connected store.
    pub fn new(config: ApiConfig, store: Store) -> Self {
        let blobs = BlobStore::new(&config.blob_root);
        let jwt = Arc::new(JwtManager::new(
            config.jwt_secret.clone(),
            config.session_lifetime_secs,
        ));

        AppState {
            store,
            blobs,
            jwt,
            auth_events: AuthEvents::new(),
            config: Arc::new(config),
        }
    }
}
