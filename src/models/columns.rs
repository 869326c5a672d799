use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::models::column::ColumnDescriptor;

/// Ordered collection of column descriptors for one model.
///
/// Two layers: every descriptor ever declared lives in `descriptors` (names
/// unique), while `active` is the ordered view inherited by action configs.
/// Exclusion only removes a name from the active view; the descriptor stays
/// behind so the column can be re-included later with its settings intact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSet {
    descriptors: IndexMap<String, ColumnDescriptor>,
    active: IndexSet<String>,
}

impl ColumnSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor. New names join the active view at the end; an
    /// existing name keeps its descriptor (names are unique).
    pub fn add(&mut self, descriptor: ColumnDescriptor) {
        let name = descriptor.name().to_string();
        if !self.descriptors.contains_key(&name) {
            self.descriptors.insert(name.clone(), descriptor);
            self.active.insert(name);
        }
    }

    /// Remove names from the active view. Monotone: excluding an unknown or
    /// already-excluded name is a no-op, and descriptors are never dropped.
    pub fn exclude<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.active.shift_remove(name.as_ref());
        }
    }

    /// Re-add a previously excluded name to the active view (appended at the
    /// end). Unknown names are ignored; use [`ColumnSet::add`] for new columns.
    pub fn include(&mut self, name: &str) {
        if self.descriptors.contains_key(name) {
            self.active.insert(name.to_string());
        }
    }

    /// Replace the active view wholesale with `names`, in the given order.
    /// Names without a descriptor become virtual placeholder columns instead
    /// of erroring, so config can reference computed values.
    pub fn set_active<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.active.clear();
        for name in names {
            let name = name.as_ref();
            if !self.descriptors.contains_key(name) {
                self.descriptors
                    .insert(name.to_string(), ColumnDescriptor::virtual_column(name));
            }
            self.active.insert(name.to_string());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.active.contains(name)
    }

    pub fn get(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.descriptors.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ColumnDescriptor> {
        self.descriptors.get_mut(name)
    }

    /// Active descriptors in view order.
    pub fn iter_active(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.active
            .iter()
            .filter_map(|name| self.descriptors.get(name))
    }

    /// Mutable pass over the active descriptors, used by finalize.
    pub fn for_each_active_mut(&mut self, mut f: impl FnMut(&mut ColumnDescriptor)) {
        for name in self.active.clone() {
            if let Some(descriptor) = self.descriptors.get_mut(&name) {
                f(descriptor);
            }
        }
    }

    /// Every descriptor ever declared, active or not.
    pub fn iter_all(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.descriptors.values()
    }

    pub fn active_names(&self) -> Vec<&str> {
        self.active.iter().map(String::as_str).collect()
    }

    /// Number of active columns.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
