//! Host-facing services around the configuration core.
//!
//! Currently asset discovery only: enumerating installed frontends/themes
//! and their script assets for the serving layer.

pub mod assets;

pub use assets::{asset_path, available_frontends, javascript_assets};
