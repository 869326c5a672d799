use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One association declared on a model.
///
/// Only the facts the configuration core needs survive introspection: the
/// association name, whether it is polymorphic, and (for polymorphic
/// associations) the name of the foreign-type discriminator column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub name: String,

    #[serde(default)]
    pub polymorphic: bool,

    /// Foreign-type column backing a polymorphic association
    /// (e.g. `owner_type` for a polymorphic `owner`).
    #[serde(default)]
    pub foreign_type_column: Option<String>,
}

impl Association {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            polymorphic: false,
            foreign_type_column: None,
        }
    }

    pub fn polymorphic(name: impl Into<String>, foreign_type_column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            polymorphic: true,
            foreign_type_column: Some(foreign_type_column.into()),
        }
    }
}

/// Introspected schema facts for one model.
///
/// The surrounding framework owns real ORM introspection; it hands this
/// struct to [`ScaffoldConfig::new`](crate::config::ScaffoldConfig::new) to
/// seed the default column list. Nothing in this crate queries a database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Model identifier in underscored form (e.g. `blog_post`).
    pub model_id: String,

    /// Persisted attribute (schema column) names.
    pub attributes: Vec<String>,

    /// Persisted, non-computed column names. Attributes outside this list are
    /// pseudo-columns and are dropped from the default column set.
    pub content_columns: Vec<String>,

    /// Primary association list.
    #[serde(default)]
    pub associations: Vec<Association>,

    /// Association names contributed by a secondary association mechanism
    /// the model may mix in, such as a document-store relation layer.
    #[serde(default)]
    pub extra_associations: Vec<String>,

    /// Discriminator column when the model uses single-table inheritance.
    #[serde(default)]
    pub inheritance_column: Option<String>,
}

impl ModelSchema {
    /// Validate that this schema can seed a configuration.
    ///
    /// A blank model id or an empty attribute list means introspection failed
    /// upstream; constructing a degraded configuration from it is worse than
    /// failing here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model_id.trim().is_empty() {
            return Err(ConfigError::InvalidSchema {
                model_id: self.model_id.clone(),
                reason: "model identifier is blank".into(),
            });
        }
        if self.attributes.is_empty() {
            return Err(ConfigError::InvalidSchema {
                model_id: self.model_id.clone(),
                reason: "schema reports no persisted attributes".into(),
            });
        }
        Ok(())
    }

    /// Whether `name` is backed by a real schema column.
    pub fn has_column(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a == name)
    }

    /// Whether `name` is a persisted content column (not a pseudo-column).
    pub fn is_content_column(&self, name: &str) -> bool {
        self.content_columns.iter().any(|c| c == name)
    }
}
