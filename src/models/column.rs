use serde::{Deserialize, Serialize};

use crate::models::inflect;

/// Form widget hint for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormUi {
    Text,
    Textarea,
    Checkbox,
    Select,
    Hidden,
}

/// One option of a select widget: display label plus stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// Prototype applied to every freshly derived column descriptor.
///
/// Lives on the global configuration so a host can change the defaults once
/// during bootstrap; frozen together with the rest of the global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefaults {
    /// Whether schema-backed columns are sortable unless overridden.
    pub sortable: bool,

    /// Default form widget, `None` leaves the choice to the frontend.
    pub form_ui: Option<FormUi>,
}

impl Default for ColumnDefaults {
    fn default() -> Self {
        Self {
            sortable: true,
            form_ui: None,
        }
    }
}

/// Metadata for one field or association exposed in the scaffold UI.
///
/// A descriptor is not a raw schema column: association columns and virtual
/// placeholder columns have no schema backing at all. The sort clause is
/// derived lazily and cached during the finalize pass so the frozen
/// configuration never computes it under request traffic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    name: String,

    /// True when the name maps to a persisted schema column.
    schema_backed: bool,

    /// True for placeholder columns declared in config but absent from the
    /// schema and association lists.
    virtual_column: bool,

    pub form_ui: Option<FormUi>,

    /// Options payload for select-style widgets.
    pub select_options: Vec<SelectOption>,

    pub sortable: bool,

    /// Explicit label override; display falls back to a humanized name.
    pub label: Option<String>,

    /// Sort clause cached by [`ColumnDescriptor::ensure_sort_cached`].
    sort_clause: Option<String>,
}

impl ColumnDescriptor {
    /// Descriptor for a schema-backed attribute.
    pub fn attribute(name: impl Into<String>, defaults: &ColumnDefaults) -> Self {
        Self {
            name: name.into(),
            schema_backed: true,
            virtual_column: false,
            form_ui: defaults.form_ui,
            select_options: Vec::new(),
            sortable: defaults.sortable,
            label: None,
            sort_clause: None,
        }
    }

    /// Descriptor for an association column (no schema backing).
    pub fn association(name: impl Into<String>, defaults: &ColumnDefaults) -> Self {
        Self {
            name: name.into(),
            schema_backed: false,
            virtual_column: false,
            form_ui: defaults.form_ui,
            select_options: Vec::new(),
            // associations have no schema column to order by
            sortable: false,
            label: None,
            sort_clause: None,
        }
    }

    /// Placeholder descriptor for a configured name the schema knows nothing
    /// about. Never sortable, never schema-backed.
    pub fn virtual_column(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema_backed: false,
            virtual_column: true,
            form_ui: None,
            select_options: Vec::new(),
            sortable: false,
            label: None,
            sort_clause: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_schema_backed(&self) -> bool {
        self.schema_backed
    }

    pub fn is_virtual(&self) -> bool {
        self.virtual_column
    }

    /// Display label: explicit override, else humanized column name.
    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| inflect::humanize(&self.name))
    }

    /// Set the form widget only if none is configured yet.
    pub fn form_ui_default(&mut self, ui: FormUi) {
        if self.form_ui.is_none() {
            self.form_ui = Some(ui);
        }
    }

    /// Compute and cache the sort clause. Idempotent; a cached value is never
    /// recomputed, so repeated finalize passes are stable.
    pub fn ensure_sort_cached(&mut self) {
        if !self.sortable || self.sort_clause.is_some() {
            return;
        }
        self.sort_clause = Some(format!("{} ASC", self.name));
    }

    /// The cached sort clause, if finalize has run and the column is sortable.
    pub fn sort_clause(&self) -> Option<&str> {
        self.sort_clause.as_deref()
    }
}
