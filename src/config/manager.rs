use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::config::global::GlobalConfig;
use crate::models::Action;

/// Bootstrap defaults loaded from `scaffold.yaml`.
///
/// Every field is optional; absent keys leave the hard-coded defaults in
/// [`GlobalConfig`] untouched, so a minimal file only lists the deviations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalSettings {
    #[serde(default)]
    pub frontend: Option<String>,

    #[serde(default)]
    pub theme: Option<String>,

    /// Default action names; unknown names are rejected at load time.
    #[serde(default)]
    pub actions: Option<Vec<String>>,

    #[serde(default)]
    pub ignore_columns: Option<Vec<String>>,

    #[serde(default)]
    pub cache_action_link_urls: Option<bool>,

    #[serde(default)]
    pub cache_association_options: Option<bool>,

    #[serde(default)]
    pub conditional_get_support: Option<bool>,

    #[serde(default)]
    pub store_user_settings: Option<bool>,

    #[serde(default)]
    pub dhtml_history: Option<bool>,

    #[serde(default)]
    pub sti_create_links: Option<bool>,

    #[serde(default)]
    pub timestamped_messages: Option<String>,
}

impl GlobalSettings {
    /// Apply these settings on top of `global`.
    ///
    /// # Errors
    /// Fails on an unrecognized action name; a typo silently dropping an
    /// action from every model would be hard to diagnose later.
    pub fn apply(&self, global: &mut GlobalConfig) -> Result<()> {
        if let Some(frontend) = &self.frontend {
            global.frontend = frontend.clone();
        }
        if let Some(theme) = &self.theme {
            global.theme = theme.clone();
        }
        if let Some(names) = &self.actions {
            let actions = names
                .iter()
                .map(|name| {
                    name.parse::<Action>()
                        .map_err(|()| anyhow::anyhow!("unknown action name in settings: {name}"))
                })
                .collect::<Result<Vec<Action>>>()?;
            global.set_actions(actions);
        }
        if let Some(names) = &self.ignore_columns {
            global.ignore_columns = names.iter().cloned().collect::<IndexSet<String>>();
        }
        if let Some(v) = self.cache_action_link_urls {
            global.cache_action_link_urls = v;
        }
        if let Some(v) = self.cache_association_options {
            global.cache_association_options = v;
        }
        if let Some(v) = self.conditional_get_support {
            global.conditional_get_support = v;
        }
        if let Some(v) = self.store_user_settings {
            global.store_user_settings = v;
        }
        if let Some(v) = self.dhtml_history {
            global.dhtml_history = v;
        }
        if let Some(v) = self.sti_create_links {
            global.sti_create_links = v;
        }
        if let Some(format) = &self.timestamped_messages {
            global.timestamped_messages = Some(format.clone());
        }
        Ok(())
    }
}

/// Loads and saves the plugin's bootstrap configuration file.
///
/// Manages a single YAML file (`scaffold.yaml`) inside the configuration
/// directory. A missing file is not an error; the hard-coded defaults apply.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory containing the settings file
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        // Create config directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            settings_path: config_dir.join("scaffold.yaml"),
            config_dir,
        })
    }

    /// Load the bootstrap settings file, or defaults when it doesn't exist.
    pub fn load_settings(&self) -> Result<GlobalSettings> {
        if !self.settings_path.exists() {
            tracing::warn!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
            return Ok(GlobalSettings::default());
        }

        let file_contents = fs::read_to_string(&self.settings_path)
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?;

        let settings: GlobalSettings = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!("Loaded settings from {}", self.settings_path);
        Ok(settings)
    }

    /// Save the bootstrap settings file.
    pub fn save_settings(&self, settings: &GlobalSettings) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Load a [`GlobalConfig`]: hard-coded defaults with the settings file
    /// applied on top.
    pub fn load_global_config(&self) -> Result<GlobalConfig> {
        let settings = self.load_settings()?;
        let mut global = GlobalConfig::default();
        settings.apply(&mut global)?;
        Ok(global)
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = ConfigManager::new(&config_path).unwrap();
        (manager, temp_dir)
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let (manager, _temp_dir) = create_test_config_manager();
        let global = manager.load_global_config().unwrap();
        assert_eq!(global.frontend, "default");
        assert_eq!(global.actions.len(), 8);
    }

    #[test]
    fn test_load_save_round_trip() {
        let (manager, _temp_dir) = create_test_config_manager();

        let settings = GlobalSettings {
            theme: Some("slate".to_string()),
            ignore_columns: Some(vec!["created_at".to_string()]),
            conditional_get_support: Some(true),
            ..GlobalSettings::default()
        };
        manager.save_settings(&settings).unwrap();

        let global = manager.load_global_config().unwrap();
        assert_eq!(global.theme, "slate");
        assert!(global.ignore_columns.contains("created_at"));
        assert!(global.conditional_get_support);
        // untouched defaults survive
        assert_eq!(global.frontend, "default");
        assert!(global.cache_action_link_urls);
    }

    #[test]
    fn test_settings_restrict_actions() {
        let (manager, _temp_dir) = create_test_config_manager();

        let settings = GlobalSettings {
            actions: Some(vec!["list".to_string(), "show".to_string()]),
            ..GlobalSettings::default()
        };
        manager.save_settings(&settings).unwrap();

        let global = manager.load_global_config().unwrap();
        assert_eq!(global.actions.len(), 2);
        assert!(global.actions.contains(Action::Show));
        assert!(!global.actions.contains(Action::Create));
    }

    #[test]
    fn test_unknown_action_name_is_rejected() {
        let settings = GlobalSettings {
            actions: Some(vec!["frobnicate".to_string()]),
            ..GlobalSettings::default()
        };
        let mut global = GlobalConfig::default();
        assert!(settings.apply(&mut global).is_err());
    }
}
