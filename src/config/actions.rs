use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::ScaffoldConfig;
use crate::models::{Action, ColumnSet};

/// A scalar setting value, as stored in per-user override maps and exposed by
/// key-based lookup on action configs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(u64),
    Text(String),
    Map(IndexMap<String, String>),
}

/// Configuration for the list action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListConfig {
    pub label: Option<String>,
    pub per_page: u64,
    pub page: u64,
    pub sort: Option<String>,
    pub columns: Option<ColumnSet>,
    model_label: String,
}

/// Configuration for the create action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateConfig {
    pub label: Option<String>,
    /// Keep the form open after save for rapid entry.
    pub persistent: bool,
    pub columns: Option<ColumnSet>,
    model_label: String,
}

/// Configuration for the update action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateConfig {
    pub label: Option<String>,
    pub columns: Option<ColumnSet>,
    model_label: String,
}

/// Configuration for the delete action. Acts on whole records; no columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfig {
    pub label: Option<String>,
    /// Ask for confirmation before destroying the record.
    pub confirm: bool,
}

/// Configuration for the show action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowConfig {
    pub label: Option<String>,
    pub columns: Option<ColumnSet>,
    model_label: String,
}

/// Configuration for the search action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub label: Option<String>,
    /// Search as the user types instead of on submit.
    pub live: bool,
    pub columns: Option<ColumnSet>,
}

/// Configuration for nested scaffolds shown under a parent record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedConfig {
    pub label: Option<String>,
    /// Delete removes the association instead of the record.
    pub shallow_delete: bool,
}

/// Configuration for inline subforms on create/update forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubformConfig {
    pub label: Option<String>,
    pub layout: String,
    pub columns: Option<ColumnSet>,
}

/// Action-specific configuration, resolved from an [`Action`] by
/// [`ActionConfig::build`].
///
/// The mapping from action to config type is a closed match, so "no such
/// config type" corresponds exactly to an action name that fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionConfig {
    List(ListConfig),
    Create(CreateConfig),
    Update(UpdateConfig),
    Delete(DeleteConfig),
    Show(ShowConfig),
    Search(SearchConfig),
    Nested(NestedConfig),
    Subform(SubformConfig),
}

impl ActionConfig {
    /// Instantiate the config for `action`, parented to `parent`: defaults
    /// that depend on the owning model (labels) are captured here.
    pub fn build(action: Action, parent: &ScaffoldConfig) -> Self {
        let model_label = parent.label();
        match action {
            Action::List => ActionConfig::List(ListConfig {
                label: None,
                per_page: 15,
                page: 1,
                sort: None,
                columns: None,
                model_label,
            }),
            Action::Create => ActionConfig::Create(CreateConfig {
                label: None,
                persistent: false,
                columns: None,
                model_label,
            }),
            Action::Update => ActionConfig::Update(UpdateConfig {
                label: None,
                columns: None,
                model_label,
            }),
            Action::Delete => ActionConfig::Delete(DeleteConfig {
                label: None,
                confirm: true,
            }),
            Action::Show => ActionConfig::Show(ShowConfig {
                label: None,
                columns: None,
                model_label,
            }),
            Action::Search => ActionConfig::Search(SearchConfig {
                label: None,
                live: false,
                columns: None,
            }),
            Action::Nested => ActionConfig::Nested(NestedConfig {
                label: None,
                shallow_delete: false,
            }),
            Action::Subform => ActionConfig::Subform(SubformConfig {
                label: None,
                layout: "horizontal".to_string(),
                columns: None,
            }),
        }
    }

    pub fn action(&self) -> Action {
        match self {
            ActionConfig::List(_) => Action::List,
            ActionConfig::Create(_) => Action::Create,
            ActionConfig::Update(_) => Action::Update,
            ActionConfig::Delete(_) => Action::Delete,
            ActionConfig::Show(_) => Action::Show,
            ActionConfig::Search(_) => Action::Search,
            ActionConfig::Nested(_) => Action::Nested,
            ActionConfig::Subform(_) => Action::Subform,
        }
    }

    /// Whether this action renders columns (and so receives the resolved
    /// column set during finalize).
    pub fn accepts_columns(&self) -> bool {
        !matches!(
            self,
            ActionConfig::Delete(_) | ActionConfig::Nested(_)
        )
    }

    /// Inject the resolved column set. No-op for actions without columns.
    pub fn set_columns(&mut self, columns: &ColumnSet) {
        let slot = match self {
            ActionConfig::List(c) => &mut c.columns,
            ActionConfig::Create(c) => &mut c.columns,
            ActionConfig::Update(c) => &mut c.columns,
            ActionConfig::Show(c) => &mut c.columns,
            ActionConfig::Search(c) => &mut c.columns,
            ActionConfig::Subform(c) => &mut c.columns,
            ActionConfig::Delete(_) | ActionConfig::Nested(_) => return,
        };
        *slot = Some(columns.clone());
    }

    pub fn columns(&self) -> Option<&ColumnSet> {
        match self {
            ActionConfig::List(c) => c.columns.as_ref(),
            ActionConfig::Create(c) => c.columns.as_ref(),
            ActionConfig::Update(c) => c.columns.as_ref(),
            ActionConfig::Show(c) => c.columns.as_ref(),
            ActionConfig::Search(c) => c.columns.as_ref(),
            ActionConfig::Subform(c) => c.columns.as_ref(),
            ActionConfig::Delete(_) | ActionConfig::Nested(_) => None,
        }
    }

    /// Display label: explicit override, else an action-appropriate default
    /// built from the parent model's label.
    pub fn display_label(&self) -> String {
        let explicit = match self {
            ActionConfig::List(c) => c.label.clone(),
            ActionConfig::Create(c) => c.label.clone(),
            ActionConfig::Update(c) => c.label.clone(),
            ActionConfig::Delete(c) => c.label.clone(),
            ActionConfig::Show(c) => c.label.clone(),
            ActionConfig::Search(c) => c.label.clone(),
            ActionConfig::Nested(c) => c.label.clone(),
            ActionConfig::Subform(c) => c.label.clone(),
        };
        if let Some(label) = explicit {
            return label;
        }
        match self {
            ActionConfig::List(c) => c.model_label.clone(),
            ActionConfig::Create(c) => format!("Create {}", c.model_label),
            ActionConfig::Update(c) => format!("Update {}", c.model_label),
            ActionConfig::Show(c) => format!("Show {}", c.model_label),
            other => other.action().title_case().to_string(),
        }
    }

    /// Key-based read used by per-user overlays. Returns `None` for keys the
    /// action does not declare.
    pub fn setting(&self, key: &str) -> Option<SettingValue> {
        match (self, key) {
            (ActionConfig::List(c), "per_page") => Some(SettingValue::Int(c.per_page)),
            (ActionConfig::List(c), "page") => Some(SettingValue::Int(c.page)),
            (ActionConfig::List(c), "sort") => {
                Some(SettingValue::Text(c.sort.clone().unwrap_or_default()))
            }
            (ActionConfig::Create(c), "persistent") => Some(SettingValue::Bool(c.persistent)),
            (ActionConfig::Delete(c), "confirm") => Some(SettingValue::Bool(c.confirm)),
            (ActionConfig::Search(c), "live") => Some(SettingValue::Bool(c.live)),
            (ActionConfig::Nested(c), "shallow_delete") => {
                Some(SettingValue::Bool(c.shallow_delete))
            }
            (ActionConfig::Subform(c), "layout") => Some(SettingValue::Text(c.layout.clone())),
            _ => None,
        }
    }
}
