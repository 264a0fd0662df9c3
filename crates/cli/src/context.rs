//! Per-invocation service wiring.

use std::sync::Arc;

use tracing::debug;

use canteen_app::{
    api::{ApiClient, ApiConfig, AuthApi, OrdersApi, ProductsApi},
    session::Session,
    storage::{JsonFileCartStorage, JsonFileTokenStorage, StateDir},
    store::CartStore,
};

use crate::config::AppConfig;

/// Shared services built once per invocation.
#[derive(Clone)]
pub struct AppContext {
    /// Catalog and product-management calls.
    pub products: ProductsApi,

    /// Order calls.
    pub orders: OrdersApi,

    /// Staff session and admin gating.
    pub session: Session,

    state: StateDir,
}

impl AppContext {
    /// Builds the context from CLI configuration, restoring any persisted
    /// tokens.
    pub fn from_config(config: &AppConfig) -> Self {
        debug!(api_url = %config.api_url, state_dir = %config.state_dir, "building app context");

        let state = StateDir::new(&config.state_dir);
        let token_storage = Arc::new(JsonFileTokenStorage::new(&state));
        let client = ApiClient::new(
            ApiConfig {
                base_url: config.api_url.clone(),
            },
            token_storage,
        );

        Self {
            products: ProductsApi::new(client.clone()),
            orders: OrdersApi::new(client.clone()),
            session: Session::new(AuthApi::new(client)),
            state,
        }
    }

    /// Restores the persisted cart store.
    pub fn cart_store(&self) -> CartStore {
        CartStore::load(Box::new(JsonFileCartStorage::new(&self.state)))
    }
}
