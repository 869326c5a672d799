// scaffold-core - Configuration core for the scaffold admin-UI plugin
//
// This is the library crate containing the layered configuration model:
// global defaults, per-model configurations, per-action sub-configs and
// per-user copy-on-write overlays. Rendering, routing and ORM introspection
// live in the host framework.

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod overlay;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::{
    ActionConfig, ConfigManager, GlobalConfig, ScaffoldConfig, SealedGlobalConfig,
    SealedScaffoldConfig, SettingValue,
};
pub use error::ConfigError;
pub use models::{Action, ActionRegistry, ColumnSet, ModelSchema};
pub use overlay::UserSettingsOverlay;
pub use state::ConfigRegistry;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
