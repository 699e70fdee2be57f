//! # Gateway Settings
//!
//! The two persisted options controlling test-order processing, modeled as an
//! explicit struct so the gateway never reads stored options ad hoc.

use serde::{Deserialize, Serialize};

use crate::constants::{PURGEABLE_STATUSES, SETTING_ORDER_STATUS, SETTING_REDUCE_STOCK};
use crate::error::{Result, TestOrdersError};
use crate::models::order::OrderStatus;
use crate::store::SettingsStore;

/// Persisted gateway behavior: which status a test order receives at payment
/// time, and whether stock levels are reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySettings {
    pub order_status: OrderStatus,
    pub reduce_stock: bool,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            order_status: OrderStatus::Completed,
            reduce_stock: true,
        }
    }
}

impl GatewaySettings {
    /// Load settings from the store, applying defaults for unset or
    /// unparseable values.
    pub async fn load(store: &dyn SettingsStore) -> Result<Self> {
        let defaults = Self::default();

        let order_status = match store.setting(SETTING_ORDER_STATUS).await? {
            Some(raw) => raw.parse().unwrap_or(defaults.order_status),
            None => defaults.order_status,
        };

        let reduce_stock = match store.setting(SETTING_REDUCE_STOCK).await? {
            Some(raw) => raw == "yes",
            None => defaults.reduce_stock,
        };

        Ok(Self {
            order_status,
            reduce_stock,
        })
    }

    /// Validate and persist the settings.
    ///
    /// The status must be one of the four statuses the purge scans, matching
    /// the choices offered on the admin form.
    pub async fn save(&self, store: &dyn SettingsStore) -> Result<()> {
        if !PURGEABLE_STATUSES.contains(&self.order_status) {
            return Err(TestOrdersError::validation(format!(
                "{} is not a valid test order status",
                self.order_status
            )));
        }

        store
            .put_setting(SETTING_ORDER_STATUS, self.order_status.as_str())
            .await?;
        store
            .put_setting(
                SETTING_REDUCE_STOCK,
                if self.reduce_stock { "yes" } else { "no" },
            )
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn load_applies_defaults_on_empty_store() {
        let store = MemoryStore::new();
        let settings = GatewaySettings::load(&store).await.unwrap();
        assert_eq!(settings.order_status, OrderStatus::Completed);
        assert!(settings.reduce_stock);
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = MemoryStore::new();
        let settings = GatewaySettings {
            order_status: OrderStatus::OnHold,
            reduce_stock: false,
        };
        settings.save(&store).await.unwrap();

        let loaded = GatewaySettings::load(&store).await.unwrap();
        assert_eq!(loaded, settings);
    }

    #[tokio::test]
    async fn cancelled_is_not_a_valid_gateway_status() {
        let store = MemoryStore::new();
        let settings = GatewaySettings {
            order_status: OrderStatus::Cancelled,
            reduce_stock: true,
        };
        assert!(settings.save(&store).await.is_err());
    }

    #[tokio::test]
    async fn garbage_stored_status_falls_back_to_default() {
        let store = MemoryStore::new();
        store
            .put_setting(SETTING_ORDER_STATUS, "shipped")
            .await
            .unwrap();
        let loaded = GatewaySettings::load(&store).await.unwrap();
        assert_eq!(loaded.order_status, OrderStatus::Completed);
    }
}
