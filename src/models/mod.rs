//! Domain models for orders and gateway settings.

pub mod order;
pub mod settings;

pub use order::{NewOrder, Order, OrderStatus};
pub use settings::GatewaySettings;
