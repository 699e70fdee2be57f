//! Shared application state for the web layer.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::error::{Result, TestOrdersError};
use crate::store::{OrderStore, SettingsStore};
use crate::web::auth::ActionTokenIssuer;

/// State threaded through every handler: the store handles, configuration,
/// and the action-token issuer.
#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderStore>,
    pub settings: Arc<dyn SettingsStore>,
    pub config: Arc<ServiceConfig>,
    pub tokens: ActionTokenIssuer,
}

impl AppState {
    /// Build state from a store implementing both persistence traits.
    pub fn new<S>(store: S, config: ServiceConfig) -> Result<Self>
    where
        S: OrderStore + SettingsStore + Clone + 'static,
    {
        let tokens = ActionTokenIssuer::from_config(&config.auth)
            .map_err(|e| TestOrdersError::configuration(e.to_string()))?;

        Ok(Self {
            orders: Arc::new(store.clone()),
            settings: Arc::new(store),
            config: Arc::new(config),
            tokens,
        })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("tokens", &self.tokens)
            .finish()
    }
}
