pub mod config;
pub mod connectors;
pub mod ctx;

pub use config::{AppConfig, ConfigArgs};
pub use connectors::Connectors;
pub use ctx::{AppContext, AppCtx, BridgeDispatcher};
