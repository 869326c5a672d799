use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// The closed set of operations the scaffold supports for a model.
///
/// Action lookup by name is explicit: [`Action::from_str`] failing means "no
/// such action kind", which is a silent miss for generic dispatch, distinct
/// from "known kind but not enabled" (a hard error at the config layer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    List,
    Search,
    Update,
    Delete,
    Show,
    Nested,
    Subform,
}

impl Action {
    /// All action kinds, in default registry order.
    pub const ALL: [Action; 8] = [
        Action::Create,
        Action::List,
        Action::Search,
        Action::Update,
        Action::Delete,
        Action::Show,
        Action::Nested,
        Action::Subform,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::List => "list",
            Action::Search => "search",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Show => "show",
            Action::Nested => "nested",
            Action::Subform => "subform",
        }
    }

    /// Title-cased name, used in error messages.
    pub fn title_case(&self) -> &'static str {
        match self {
            Action::Create => "Create",
            Action::List => "List",
            Action::Search => "Search",
            Action::Update => "Update",
            Action::Delete => "Delete",
            Action::Show => "Show",
            Action::Nested => "Nested",
            Action::Subform => "Subform",
        }
    }

    /// Whether links for this action act on one record (member) or on the
    /// whole set (collection). Used when link placement is left unspecified.
    pub fn acts_on_member(&self) -> bool {
        matches!(
            self,
            Action::Update | Action::Delete | Action::Show | Action::Nested
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Action::Create),
            "list" => Ok(Action::List),
            "search" => Ok(Action::Search),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            "show" => Ok(Action::Show),
            "nested" => Ok(Action::Nested),
            "subform" => Ok(Action::Subform),
            _ => Err(()),
        }
    }
}

/// Ordered unique set of enabled actions for a scope (global or per-model).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRegistry {
    actions: IndexSet<Action>,
}

impl ActionRegistry {
    pub fn new<I: IntoIterator<Item = Action>>(actions: I) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    pub fn contains(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.actions.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
