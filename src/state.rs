//! Shared application state, built once at startup and injected into
//! handlers via axum's `State` extractor rather than a process-global.

use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::routes::auth::AuthConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub auth: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(store: Store, config: &Config) -> Self {
        Self {
            store,
            auth: Arc::new(AuthConfig {
                admin_username: config.admin_username.clone(),
                admin_password_hash: config.admin_password_hash.clone(),
                jwt_secret: config.jwt_secret.clone(),
            }),
        }
    }
}
