use std::ops::Deref;

use indexmap::{IndexMap, IndexSet};

use crate::models::{Action, ActionLinkSet, ActionRegistry, ColumnDefaults};

/// Process-wide default configuration.
///
/// Initialized once at process start with hard-coded defaults, mutated freely
/// while the application bootstraps, then sealed. Every
/// [`ScaffoldConfig`](crate::config::ScaffoldConfig) clones its starting
/// state from the sealed value, so later per-model mutation never leaks back
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Actions enabled by default for every model.
    pub actions: ActionRegistry,

    /// Default frontend identifier.
    pub frontend: String,

    /// Default theme identifier for the frontend.
    pub theme: String,

    /// Enable caching of action link URLs.
    pub cache_action_link_urls: bool,

    /// Enable caching of association options.
    pub cache_association_options: bool,

    /// Enable ETag/Last-Modified support so the serving layer can answer 304s.
    pub conditional_get_support: bool,

    /// Enable persisting user settings (per-page, sort, search params) in the
    /// host session store.
    pub store_user_settings: bool,

    /// Enable the DHTML history scripts. Global only; it only affects which
    /// assets are served.
    pub dhtml_history: bool,

    /// Add a create link per STI child instead of a discriminator widget.
    pub sti_create_links: bool,

    /// Columns ignored for every model (metadata columns like change dates).
    pub ignore_columns: IndexSet<String>,

    /// Links shared by every model configuration.
    pub action_links: ActionLinkSet,

    /// Prefix messages with a timestamp in the given format.
    pub timestamped_messages: Option<String>,

    /// Words to highlight in messages, keyed by the word to match.
    pub highlight_messages: Option<IndexMap<String, String>>,

    /// Prototype applied to every freshly derived column descriptor.
    pub column_defaults: ColumnDefaults,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            actions: ActionRegistry::new([
                Action::Create,
                Action::List,
                Action::Search,
                Action::Update,
                Action::Delete,
                Action::Show,
                Action::Nested,
                Action::Subform,
            ]),
            frontend: "default".to_string(),
            theme: "default".to_string(),
            cache_action_link_urls: true,
            cache_association_options: true,
            conditional_get_support: false,
            store_user_settings: true,
            dhtml_history: true,
            sti_create_links: true,
            ignore_columns: IndexSet::new(),
            action_links: ActionLinkSet::new(),
            timestamped_messages: None,
            highlight_messages: None,
            column_defaults: ColumnDefaults::default(),
        }
    }
}

impl GlobalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default action registry wholesale.
    pub fn set_actions<I: IntoIterator<Item = Action>>(&mut self, actions: I) {
        self.actions = ActionRegistry::new(actions);
    }

    /// Replace the globally ignored column names.
    pub fn set_ignore_columns<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_columns = names.into_iter().map(Into::into).collect();
    }

    /// End the bootstrap phase. The returned value is read-only; this is the
    /// single irreversible transition for process-wide state, covering the
    /// action registry, the shared links and the column prototype alike.
    pub fn seal(self) -> SealedGlobalConfig {
        tracing::info!(
            "Sealing global configuration: {} default actions, {} ignored columns, frontend={}",
            self.actions.len(),
            self.ignore_columns.len(),
            self.frontend
        );
        SealedGlobalConfig(self)
    }
}

/// Immutable snapshot of [`GlobalConfig`], safe to read from any thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedGlobalConfig(GlobalConfig);

impl Deref for SealedGlobalConfig {
    type Target = GlobalConfig;

    fn deref(&self) -> &GlobalConfig {
        &self.0
    }
}
