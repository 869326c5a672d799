// Process-level configuration registry
//
// This module provides the ConfigRegistry which memoizes sealed per-model
// configurations behind Arc<RwLock<T>> so request handlers share one frozen
// configuration per model.

use std::sync::{Arc, RwLock};
use std::time::Instant;

use indexmap::IndexMap;

use crate::config::{ScaffoldConfig, SealedGlobalConfig, SealedScaffoldConfig};
use crate::error::ConfigError;
use crate::metrics::Metrics;
use crate::models::ModelSchema;

/// Thread-safe registry of sealed model configurations.
///
/// This is the process-wide memoization point:
/// - Holds the sealed global defaults every model configuration clones from
/// - Builds a [`ScaffoldConfig`] at first access, runs the caller's setup
///   closure, seals it and caches the result
/// - Hands out `Arc<SealedScaffoldConfig>` clones, safe to read from any
///   request thread without further locking
///
/// # Related Types
///
/// - [`crate::config::ScaffoldConfig`]: the mutable configuration being built
/// - [`crate::overlay::UserSettingsOverlay`]: per-session view over a cached
///   sealed configuration
pub struct ConfigRegistry {
    global: Arc<SealedGlobalConfig>,

    /// Sealed configurations keyed by model identifier
    configs: Arc<RwLock<IndexMap<String, Arc<SealedScaffoldConfig>>>>,

    metrics: Arc<Metrics>,
}

impl ConfigRegistry {
    pub fn new(global: SealedGlobalConfig) -> Self {
        Self {
            global: Arc::new(global),
            configs: Arc::new(RwLock::new(IndexMap::new())),
            metrics: Arc::new(Metrics::new()),
        }
    }

    pub fn global(&self) -> &SealedGlobalConfig {
        &self.global
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The cached configuration for a model, if one was built already.
    pub fn get(&self, model_id: &str) -> Option<Arc<SealedScaffoldConfig>> {
        self.configs.read().unwrap().get(model_id).cloned()
    }

    /// The memoized configuration for `schema`'s model, building it on first
    /// access.
    ///
    /// `setup` runs between construction and sealing; this is the
    /// configuration phase where the host enables actions, replaces column
    /// lists and adds links. The closure runs at most once per model for the
    /// lifetime of the registry.
    ///
    /// # Errors
    /// Construction and finalize errors propagate; nothing is cached on
    /// failure, so a later call may retry with a fixed setup.
    pub fn get_or_build<F>(
        &self,
        schema: &ModelSchema,
        setup: F,
    ) -> Result<Arc<SealedScaffoldConfig>, ConfigError>
    where
        F: FnOnce(&mut ScaffoldConfig) -> Result<(), ConfigError>,
    {
        if let Some(existing) = self.get(&schema.model_id) {
            self.metrics.record_registry_hit();
            return Ok(existing);
        }
        self.metrics.record_registry_miss();

        let started = Instant::now();
        let mut config = ScaffoldConfig::new(schema.clone(), &self.global)?;
        setup(&mut config)?;
        let sealed = Arc::new(config.seal()?);
        self.metrics.record_config_built();
        self.metrics.record_build_time(started.elapsed());

        let mut configs = self.configs.write().unwrap();
        // another thread may have built the same model meanwhile; keep the
        // first entry so every consumer shares one sealed value
        let entry = configs
            .entry(schema.model_id.clone())
            .or_insert(sealed)
            .clone();
        Ok(entry)
    }

    /// Execute a function with read access to the memoized map.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&IndexMap<String, Arc<SealedScaffoldConfig>>) -> R,
    {
        let configs = self.configs.read().unwrap();
        f(&configs)
    }

    /// Number of models with a cached configuration.
    pub fn len(&self) -> usize {
        self.configs.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.read().unwrap().is_empty()
    }

    pub fn model_ids(&self) -> Vec<String> {
        self.configs.read().unwrap().keys().cloned().collect()
    }
}

// Make ConfigRegistry cloneable for sharing across threads
impl Clone for ConfigRegistry {
    fn clone(&self) -> Self {
        Self {
            global: Arc::clone(&self.global),
            configs: Arc::clone(&self.configs),
            metrics: Arc::clone(&self.metrics),
        }
    }
}
