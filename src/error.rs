use thiserror::Error;

use crate::models::Action;

/// Errors raised by the configuration core.
///
/// Construction-time failures ([`ConfigError::InvalidSchema`]) and
/// finalize-time failures ([`ConfigError::MissingStiChildren`]) propagate to
/// the caller immediately; there is never a partially built configuration.
/// Unresolvable action names are deliberately *not* an error — see
/// [`ScaffoldConfig::action_config_by_name`](crate::config::ScaffoldConfig::action_config_by_name).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A known action kind was referenced but is not in the model's action
    /// registry. The message carries a remediation hint for the host author.
    #[error(
        "{} is not enabled. Please enable it or remove any references in your \
         configuration (e.g. config.{action}.columns = [...])",
        .action.title_case()
    )]
    ActionNotEnabled { action: Action },

    /// Attribute-style access to a name that is neither an action kind nor a
    /// declared setting. The generic "no such member" failure.
    #[error("unknown configuration setting: {0}")]
    UnknownSetting(String),

    /// STI was configured for a select widget but no child models were given.
    #[error(
        "model {model_id} uses single-table inheritance without sti_create_links; \
         sti_children must be set before finalizing"
    )]
    MissingStiChildren { model_id: String },

    /// The model schema handed to the constructor cannot seed a configuration.
    #[error("invalid schema for model {model_id}: {reason}")]
    InvalidSchema { model_id: String, reason: String },
}
