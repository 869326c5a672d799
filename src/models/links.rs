use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::models::actions::Action;

/// Where a link appears: on each record row, or above the whole set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Member,
    Collection,
}

/// A UI affordance tying one action's output to triggering another action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLink {
    /// Unique link identifier within a set.
    name: String,

    /// The action this link triggers.
    pub action: Action,

    /// Display label; falls back to the link name in the frontend.
    pub label: Option<String>,

    /// Explicit placement. `None` defers to the action's default grouping.
    pub placement: Option<Placement>,

    /// Cache key for the resolved link URL, filled in during finalize when
    /// URL caching is enabled.
    cached_name: Option<String>,
}

impl ActionLink {
    pub fn new(name: impl Into<String>, action: Action) -> Self {
        Self {
            name: name.into(),
            action,
            label: None,
            placement: None,
            cached_name: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Effective placement: explicit tag, else the action's default.
    pub fn effective_placement(&self) -> Placement {
        self.placement.unwrap_or(if self.action.acts_on_member() {
            Placement::Member
        } else {
            Placement::Collection
        })
    }

    /// Compute and cache the identifier the serving layer keys URL caches by.
    /// Idempotent; an already-cached name is kept as is.
    pub fn cache_name(&mut self) {
        if self.cached_name.is_none() {
            self.cached_name = Some(format!("{}_{}_link", self.action, self.name));
        }
    }

    pub fn cached_name(&self) -> Option<&str> {
        self.cached_name.as_deref()
    }
}

/// Named links grouped by placement.
///
/// Grouping is computed once, from explicit placement tags where present and
/// from each action's default otherwise. Recomputing on an already-grouped
/// set is a no-op, so the finalize pass stays idempotent; adding a link
/// invalidates the grouping so it is rebuilt on next access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLinkSet {
    links: Vec<ActionLink>,
    member: Option<IndexSet<String>>,
    collection: Option<IndexSet<String>>,
}

impl ActionLinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link, replacing any link of the same name.
    pub fn add(&mut self, link: ActionLink) {
        if let Some(existing) = self.links.iter_mut().find(|l| l.name == link.name) {
            *existing = link;
        } else {
            self.links.push(link);
        }
        // grouping is stale now; next access recomputes it
        self.member = None;
        self.collection = None;
    }

    pub fn get(&self, name: &str) -> Option<&ActionLink> {
        self.links.iter().find(|l| l.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionLink> {
        self.links.iter()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Ensure both placement groups exist. Safe to call repeatedly; already
    /// populated groups are left untouched.
    pub fn ensure_groups(&mut self) {
        if self.member.is_some() && self.collection.is_some() {
            return;
        }
        let mut member = IndexSet::new();
        let mut collection = IndexSet::new();
        for link in &self.links {
            match link.effective_placement() {
                Placement::Member => member.insert(link.name.clone()),
                Placement::Collection => collection.insert(link.name.clone()),
            };
        }
        self.member = Some(member);
        self.collection = Some(collection);
    }

    /// Names of member-level links, grouping first if needed.
    pub fn member(&mut self) -> Vec<&str> {
        self.ensure_groups();
        self.member
            .as_ref()
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Names of collection-level links, grouping first if needed.
    pub fn collection(&mut self) -> Vec<&str> {
        self.ensure_groups();
        self.collection
            .as_ref()
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Precompute URL-cache identifiers for every link.
    pub fn cache_link_names(&mut self) {
        for link in &mut self.links {
            link.cache_name();
        }
    }
}
