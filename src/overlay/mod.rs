//! Per-user copy-on-write views over a sealed configuration.
//!
//! A request/session gets one [`UserSettingsOverlay`] per model. Reads fall
//! through to the shared [`SealedScaffoldConfig`] until the user customizes
//! something; only then does the overlay materialize a sparse override.
//! Nested structures (per-action settings, columns) are wrapped lazily in
//! overlays of their own and memoized, so touching one column never copies
//! the whole tree. Nothing an overlay does is visible to any other overlay,
//! to the sealed configuration, or to the global defaults.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::config::{SealedScaffoldConfig, SettingValue};
use crate::error::ConfigError;
use crate::models::{Action, ColumnDescriptor};

/// Copy-on-write view over one model's sealed configuration for one user.
pub struct UserSettingsOverlay {
    base: Arc<SealedScaffoldConfig>,
    overrides: IndexMap<String, SettingValue>,
    action_overlays: IndexMap<Action, ActionSettingsOverlay>,
    columns: Option<UserColumnsOverlay>,
}

impl UserSettingsOverlay {
    pub fn new(base: Arc<SealedScaffoldConfig>) -> Self {
        Self {
            base,
            overrides: IndexMap::new(),
            action_overlays: IndexMap::new(),
            columns: None,
        }
    }

    pub fn base(&self) -> &SealedScaffoldConfig {
        &self.base
    }

    /// Read a scalar setting: the user's override if present, else the
    /// sealed base value.
    ///
    /// # Errors
    /// [`ConfigError::UnknownSetting`] when the key names nothing the
    /// configuration declares.
    pub fn get(&self, key: &str) -> Result<SettingValue, ConfigError> {
        if let Some(value) = self.overrides.get(key) {
            return Ok(value.clone());
        }
        self.base
            .setting(key)
            .ok_or_else(|| ConfigError::UnknownSetting(key.to_string()))
    }

    /// Override a scalar setting for this user only.
    ///
    /// # Errors
    /// [`ConfigError::UnknownSetting`] for keys the base configuration does
    /// not declare; overlays never invent settings.
    pub fn set(&mut self, key: &str, value: SettingValue) -> Result<(), ConfigError> {
        if self.base.setting(key).is_none() {
            return Err(ConfigError::UnknownSetting(key.to_string()));
        }
        self.overrides.insert(key.to_string(), value);
        Ok(())
    }

    /// The per-action overlay, created lazily and memoized: repeated access
    /// returns the same overlay for the lifetime of this view.
    ///
    /// # Errors
    /// [`ConfigError::ActionNotEnabled`] when the action is not enabled for
    /// the underlying model.
    pub fn action(&mut self, action: Action) -> Result<&mut ActionSettingsOverlay, ConfigError> {
        // validate against the base before memoizing
        self.base.action_config(action)?;
        if !self.action_overlays.contains_key(&action) {
            self.action_overlays.insert(
                action,
                ActionSettingsOverlay::new(Arc::clone(&self.base), action),
            );
        }
        Ok(self
            .action_overlays
            .get_mut(&action)
            .expect("action overlay cached above"))
    }

    /// Name-based variant of [`UserSettingsOverlay::action`] with the same
    /// silent-miss semantics as the configuration layer.
    pub fn action_by_name(
        &mut self,
        name: &str,
    ) -> Result<Option<&mut ActionSettingsOverlay>, ConfigError> {
        match name.parse::<Action>() {
            Ok(action) => self.action(action).map(Some),
            Err(()) => Ok(None),
        }
    }

    /// The per-user column view, created on first access.
    pub fn columns(&mut self) -> &mut UserColumnsOverlay {
        self.columns
            .get_or_insert_with(|| UserColumnsOverlay::new(Arc::clone(&self.base)))
    }

    /// The sparse override map, for hosts that persist user settings.
    pub fn overrides(&self) -> &IndexMap<String, SettingValue> {
        &self.overrides
    }

    /// Restore overrides from a persisted session, dropping keys the base no
    /// longer declares.
    pub fn restore(&mut self, overrides: IndexMap<String, SettingValue>) {
        for (key, value) in overrides {
            if self.base.setting(&key).is_some() {
                self.overrides.insert(key, value);
            } else {
                tracing::debug!("Dropping stale persisted setting {key:?}");
            }
        }
    }
}

/// Copy-on-write view over one action's configuration.
pub struct ActionSettingsOverlay {
    base: Arc<SealedScaffoldConfig>,
    action: Action,
    overrides: IndexMap<String, SettingValue>,
}

impl ActionSettingsOverlay {
    fn new(base: Arc<SealedScaffoldConfig>, action: Action) -> Self {
        Self {
            base,
            action,
            overrides: IndexMap::new(),
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Read an action setting, override first, then the sealed base config.
    pub fn get(&self, key: &str) -> Result<SettingValue, ConfigError> {
        if let Some(value) = self.overrides.get(key) {
            return Ok(value.clone());
        }
        self.base
            .action_config(self.action)?
            .setting(key)
            .ok_or_else(|| ConfigError::UnknownSetting(key.to_string()))
    }

    /// Override an action setting for this user only.
    pub fn set(&mut self, key: &str, value: SettingValue) -> Result<(), ConfigError> {
        if self.base.action_config(self.action)?.setting(key).is_none() {
            return Err(ConfigError::UnknownSetting(key.to_string()));
        }
        self.overrides.insert(key.to_string(), value);
        Ok(())
    }

    pub fn overrides(&self) -> &IndexMap<String, SettingValue> {
        &self.overrides
    }
}

/// Per-user view over the sealed column set.
///
/// Wraps each requested column in a [`CowColumn`] on first request, memoized
/// by name, so repeated access within a session sees the user's own edits.
pub struct UserColumnsOverlay {
    base: Arc<SealedScaffoldConfig>,
    wrapped: IndexMap<String, CowColumn>,
}

impl UserColumnsOverlay {
    fn new(base: Arc<SealedScaffoldConfig>) -> Self {
        Self {
            base,
            wrapped: IndexMap::new(),
        }
    }

    /// The copy-on-write proxy for `name`, or `None` for a column the sealed
    /// configuration does not know.
    pub fn get(&mut self, name: &str) -> Option<&mut CowColumn> {
        if !self.wrapped.contains_key(name) {
            self.base.columns().get(name)?;
            self.wrapped.insert(
                name.to_string(),
                CowColumn::new(Arc::clone(&self.base), name),
            );
        }
        self.wrapped.get_mut(name)
    }

    /// Active column names, straight from the sealed base.
    pub fn active_names(&self) -> Vec<&str> {
        self.base.columns().active_names()
    }

    /// Number of columns this user has actually customized.
    pub fn customized_count(&self) -> usize {
        self.wrapped.values().filter(|c| c.is_overridden()).count()
    }
}

/// Copy-on-write proxy around one column descriptor.
///
/// Reads delegate to the sealed descriptor until the first write, which
/// clones it into a private copy. The sealed descriptor is never touched.
pub struct CowColumn {
    base: Arc<SealedScaffoldConfig>,
    name: String,
    local: Option<ColumnDescriptor>,
}

impl CowColumn {
    fn new(base: Arc<SealedScaffoldConfig>, name: &str) -> Self {
        Self {
            base,
            name: name.to_string(),
            local: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this user has written to the column.
    pub fn is_overridden(&self) -> bool {
        self.local.is_some()
    }

    /// The descriptor this proxy currently reads: the private copy if one
    /// exists, else the sealed base descriptor.
    pub fn read(&self) -> &ColumnDescriptor {
        match &self.local {
            Some(descriptor) => descriptor,
            None => self
                .base
                .columns()
                .get(&self.name)
                .expect("CowColumn wraps only known columns"),
        }
    }

    /// Mutable access, cloning the sealed descriptor on first use.
    pub fn modify(&mut self) -> &mut ColumnDescriptor {
        if self.local.is_none() {
            let copied = self
                .base
                .columns()
                .get(&self.name)
                .expect("CowColumn wraps only known columns")
                .clone();
            self.local = Some(copied);
        }
        self.local.as_mut().expect("local copy created above")
    }
}
