//! Per-model configuration: construction from schema + global defaults,
//! action-config caching, finalize passes and the sealed (frozen) form.
//!
//! The lifecycle is `new()` (construction from [`GlobalConfig`] and
//! [`ModelSchema`]) → mutation through `&mut self` accessors during the setup
//! phase → [`ScaffoldConfig::seal`], which runs any finalize pass not yet run
//! and returns a [`SealedScaffoldConfig`]. The sealed type exposes no `&mut`
//! API, so the frozen invariant holds at the type level and sealed configs
//! can be shared across request threads without locks.

pub mod actions;
pub mod global;
pub mod manager;

use indexmap::IndexMap;

use crate::error::ConfigError;
use crate::models::inflect;
use crate::models::{
    Action, ActionLinkSet, ActionRegistry, ColumnDescriptor, ColumnSet, FormUi, ModelSchema,
    SelectOption,
};

pub use actions::{ActionConfig, SettingValue};
pub use global::{GlobalConfig, SealedGlobalConfig};
pub use manager::{ConfigManager, GlobalSettings};

/// Per-model configuration object.
///
/// Owns the model's column set, action registry, action links, scalar
/// settings and the lazily populated action-config cache. Constructed by
/// cloning global defaults and deriving columns from the model schema; never
/// shared until sealed.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldConfig {
    model_id: String,
    schema: ModelSchema,

    actions: ActionRegistry,
    columns: ColumnSet,
    action_links: ActionLinkSet,

    pub frontend: String,
    pub theme: String,
    pub cache_action_link_urls: bool,
    pub cache_association_options: bool,
    pub conditional_get_support: bool,
    pub store_user_settings: bool,
    pub sti_create_links: bool,

    /// STI child model names, underscored or camelized.
    pub sti_children: Option<Vec<String>>,

    pub timestamped_messages: Option<String>,
    pub highlight_messages: Option<IndexMap<String, String>>,

    /// Explicit page/section header; display falls back to the pluralized
    /// humanized model name.
    pub label: Option<String>,

    /// Action-config cache: at most one entry per action, created on first
    /// access and reused for the lifetime of this configuration.
    action_configs: IndexMap<Action, ActionConfig>,

    lazy_values_cached: bool,
    action_columns_loaded: bool,
}

impl ScaffoldConfig {
    /// Build the initial configuration for one model.
    ///
    /// Inherits the action registry, link set and scalar settings from the
    /// global defaults (cloned, never referenced, so later mutation of one
    /// model can't affect another or the global state) and derives the
    /// default column set from the schema:
    /// attribute names and association names, each sorted by string form,
    /// minus the globally ignored names, minus schema-backed columns that are
    /// not content columns, minus polymorphic foreign-type columns.
    ///
    /// # Errors
    /// [`ConfigError::InvalidSchema`] when introspection produced no usable
    /// schema; there is never a partial configuration.
    pub fn new(schema: ModelSchema, global: &GlobalConfig) -> Result<Self, ConfigError> {
        schema.validate()?;

        let mut attribute_names = schema.attributes.clone();
        attribute_names.sort();

        let mut association_names: Vec<String> = schema
            .associations
            .iter()
            .map(|a| a.name.clone())
            .chain(schema.extra_associations.iter().cloned())
            .collect();
        association_names.sort();

        let mut columns = ColumnSet::new();
        for name in &attribute_names {
            columns.add(ColumnDescriptor::attribute(name, &global.column_defaults));
        }
        for name in &association_names {
            columns.add(ColumnDescriptor::association(name, &global.column_defaults));
        }

        // cumulative exclusion passes; each only removes from the active view
        columns.exclude(global.ignore_columns.iter());

        let non_content: Vec<String> = columns
            .iter_active()
            .filter(|c| c.is_schema_backed() && !schema.is_content_column(c.name()))
            .map(|c| c.name().to_string())
            .collect();
        columns.exclude(non_content);

        let foreign_type_columns: Vec<String> = schema
            .associations
            .iter()
            .filter(|a| a.polymorphic)
            .filter_map(|a| a.foreign_type_column.clone())
            .collect();
        columns.exclude(foreign_type_columns);

        tracing::debug!(
            "Built configuration for model {}: {} actions, {} columns",
            schema.model_id,
            global.actions.len(),
            columns.len()
        );

        Ok(Self {
            model_id: schema.model_id.clone(),
            actions: global.actions.clone(),
            columns,
            action_links: global.action_links.clone(),
            frontend: global.frontend.clone(),
            theme: global.theme.clone(),
            cache_action_link_urls: global.cache_action_link_urls,
            cache_association_options: global.cache_association_options,
            conditional_get_support: global.conditional_get_support,
            store_user_settings: global.store_user_settings,
            sti_create_links: global.sti_create_links,
            sti_children: None,
            timestamped_messages: global.timestamped_messages.clone(),
            highlight_messages: global.highlight_messages.clone(),
            label: None,
            schema,
            action_configs: IndexMap::new(),
            lazy_values_cached: false,
            action_columns_loaded: false,
        })
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    /// Replace the action registry wholesale (not merged).
    pub fn set_actions<I: IntoIterator<Item = Action>>(&mut self, actions: I) {
        self.actions = ActionRegistry::new(actions);
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut ColumnSet {
        &mut self.columns
    }

    /// Replace the active column list. Names the schema never declared become
    /// virtual placeholder columns rather than erroring.
    pub fn set_columns<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.columns.set_active(names);
    }

    pub fn action_links(&self) -> &ActionLinkSet {
        &self.action_links
    }

    pub fn action_links_mut(&mut self) -> &mut ActionLinkSet {
        &mut self.action_links
    }

    /// Page/section header for this model: the explicit label if set, else
    /// the humanized model name pluralized.
    pub fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| inflect::pluralize(&inflect::humanize(&self.model_id)))
    }

    /// Whether create links per STI child should be added: requires the flag
    /// and a configured child list.
    pub fn add_sti_create_links(&self) -> bool {
        self.sti_create_links && self.sti_children.is_some()
    }

    /// The action-config cache entry for `action`, created on first access.
    ///
    /// # Errors
    /// [`ConfigError::ActionNotEnabled`] when the action kind exists but is
    /// not in this model's registry.
    pub fn action_config_mut(&mut self, action: Action) -> Result<&mut ActionConfig, ConfigError> {
        if !self.actions.contains(action) {
            return Err(ConfigError::ActionNotEnabled { action });
        }
        if !self.action_configs.contains_key(&action) {
            let config = ActionConfig::build(action, self);
            tracing::debug!("Instantiated {} config for model {}", action, self.model_id);
            self.action_configs.insert(action, config);
        }
        Ok(self
            .action_configs
            .get_mut(&action)
            .expect("action config cached above"))
    }

    /// Read access to an already-instantiated action config.
    pub fn action_config(&self, action: Action) -> Option<&ActionConfig> {
        self.action_configs.get(&action)
    }

    /// Name-based action lookup, the seam generic dispatch goes through.
    ///
    /// An unrecognized name is a silent miss (`Ok(None)`, logged at debug
    /// level) so callers can fall through to their own "unknown member"
    /// handling; a recognized-but-disabled action is a hard error.
    pub fn action_config_by_name(
        &mut self,
        name: &str,
    ) -> Result<Option<&mut ActionConfig>, ConfigError> {
        match name.parse::<Action>() {
            Ok(action) => self.action_config_mut(action).map(Some),
            Err(()) => {
                tracing::debug!(
                    "No action config type for {name:?} on model {}",
                    self.model_id
                );
                Ok(None)
            }
        }
    }

    /// Finalize pass: materialize every lazy value that depends on mutable
    /// settings. Idempotent; cached values are never recomputed.
    ///
    /// Precomputes link cache names when URL caching is on, forces the
    /// member/collection link grouping, and forces sort clauses for sortable
    /// columns.
    pub fn cache_lazy_values(&mut self) {
        if self.cache_action_link_urls {
            self.action_links.cache_link_names();
        }
        self.action_links.ensure_groups();
        self.columns
            .for_each_active_mut(ColumnDescriptor::ensure_sort_cached);
        self.lazy_values_cached = true;
    }

    /// Finalize pass: instantiate every enabled action's config and inject
    /// the resolved column set where the action renders columns.
    pub fn load_action_columns(&mut self) -> Result<(), ConfigError> {
        let columns = self.columns.clone();
        let enabled: Vec<Action> = self.actions.iter().collect();
        for action in enabled {
            let config = self.action_config_mut(action)?;
            if config.accepts_columns() {
                config.set_columns(&columns);
            }
        }
        self.action_columns_loaded = true;
        Ok(())
    }

    /// Configure the STI discriminator column's form widget.
    ///
    /// With STI create-links enabled the children are reached through
    /// separate create links, so the column is hidden; otherwise it becomes a
    /// select whose options pair each child's humanized name with its
    /// camelized stored value.
    ///
    /// # Errors
    /// [`ConfigError::MissingStiChildren`] in select mode without a
    /// configured child list. No-op for models without a discriminator.
    pub fn configure_sti(&mut self) -> Result<(), ConfigError> {
        let Some(discriminator) = self.schema.inheritance_column.clone() else {
            return Ok(());
        };

        if self.sti_create_links {
            if let Some(column) = self.columns.get_mut(&discriminator) {
                column.form_ui_default(FormUi::Hidden);
            }
            return Ok(());
        }

        let children = self
            .sti_children
            .clone()
            .ok_or_else(|| ConfigError::MissingStiChildren {
                model_id: self.model_id.clone(),
            })?;
        if let Some(column) = self.columns.get_mut(&discriminator) {
            column.form_ui_default(FormUi::Select);
            if column.select_options.is_empty() {
                column.select_options = children
                    .iter()
                    .map(|child| {
                        let value = inflect::camelize(child);
                        SelectOption {
                            label: inflect::humanize(&value),
                            value,
                        }
                    })
                    .collect();
            }
        }
        Ok(())
    }

    /// Freeze the configuration.
    ///
    /// Runs the STI pass and any finalize pass the host did not call
    /// explicitly (both are idempotent), then consumes `self`: after sealing
    /// there is no mutable handle left, so the frozen state cannot be
    /// observed mid-change by any consumer.
    ///
    /// # Errors
    /// Any finalize failure propagates here; a silently incomplete frozen
    /// configuration would be unrecoverable.
    pub fn seal(mut self) -> Result<SealedScaffoldConfig, ConfigError> {
        self.configure_sti()?;
        if !self.lazy_values_cached {
            self.cache_lazy_values();
        }
        if !self.action_columns_loaded {
            self.load_action_columns()?;
        }
        tracing::info!(
            "Sealed configuration for model {}: {} actions, {} columns, {} links",
            self.model_id,
            self.actions.len(),
            self.columns.len(),
            self.action_links.len()
        );
        Ok(SealedScaffoldConfig { inner: self })
    }

    /// Key-based scalar read shared with the sealed form and the overlays.
    fn scalar_setting(&self, key: &str) -> Option<SettingValue> {
        match key {
            "frontend" => Some(SettingValue::Text(self.frontend.clone())),
            "theme" => Some(SettingValue::Text(self.theme.clone())),
            "label" => Some(SettingValue::Text(self.label())),
            "cache_action_link_urls" => Some(SettingValue::Bool(self.cache_action_link_urls)),
            "cache_association_options" => {
                Some(SettingValue::Bool(self.cache_association_options))
            }
            "conditional_get_support" => Some(SettingValue::Bool(self.conditional_get_support)),
            "store_user_settings" => Some(SettingValue::Bool(self.store_user_settings)),
            "sti_create_links" => Some(SettingValue::Bool(self.sti_create_links)),
            "timestamped_messages" => Some(SettingValue::Text(
                self.timestamped_messages.clone().unwrap_or_default(),
            )),
            "highlight_messages" => Some(SettingValue::Map(
                self.highlight_messages.clone().unwrap_or_default(),
            )),
            _ => None,
        }
    }
}

/// Immutable, shareable form of [`ScaffoldConfig`].
///
/// Exposes read accessors only; the serving layer may cache it process-wide
/// and hand references to concurrent requests without synchronization.
#[derive(Debug, Clone, PartialEq)]
pub struct SealedScaffoldConfig {
    inner: ScaffoldConfig,
}

impl SealedScaffoldConfig {
    pub fn model_id(&self) -> &str {
        self.inner.model_id()
    }

    pub fn actions(&self) -> &ActionRegistry {
        &self.inner.actions
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.inner.columns
    }

    /// Link grouping is materialized before sealing, so exposing the link
    /// set immutably is enough for the serving layer.
    pub fn action_links(&self) -> &ActionLinkSet {
        &self.inner.action_links
    }

    pub fn frontend(&self) -> &str {
        &self.inner.frontend
    }

    pub fn theme(&self) -> &str {
        &self.inner.theme
    }

    pub fn label(&self) -> String {
        self.inner.label()
    }

    pub fn store_user_settings(&self) -> bool {
        self.inner.store_user_settings
    }

    pub fn conditional_get_support(&self) -> bool {
        self.inner.conditional_get_support
    }

    pub fn add_sti_create_links(&self) -> bool {
        self.inner.add_sti_create_links()
    }

    /// The cached config for an enabled action. Every enabled action is
    /// materialized during sealing, so a miss here means the action is not
    /// enabled for this model.
    pub fn action_config(&self, action: Action) -> Result<&ActionConfig, ConfigError> {
        self.inner
            .action_configs
            .get(&action)
            .ok_or(ConfigError::ActionNotEnabled { action })
    }

    /// Name-based action lookup with the same miss semantics as the mutable
    /// form: unknown kind is `Ok(None)`, known-but-disabled is an error.
    pub fn action_config_by_name(
        &self,
        name: &str,
    ) -> Result<Option<&ActionConfig>, ConfigError> {
        match name.parse::<Action>() {
            Ok(action) => self.action_config(action).map(Some),
            Err(()) => {
                tracing::debug!("No action config type for {name:?}");
                Ok(None)
            }
        }
    }

    /// Key-based scalar read, the fallthrough target for per-user overlays.
    pub fn setting(&self, key: &str) -> Option<SettingValue> {
        self.inner.scalar_setting(key)
    }

    /// Names of enabled actions whose configs hold a column set.
    pub fn actions_with_columns(&self) -> Vec<Action> {
        self.inner
            .action_configs
            .values()
            .filter(|c| c.accepts_columns())
            .map(ActionConfig::action)
            .collect()
    }
}
