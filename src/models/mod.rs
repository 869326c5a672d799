//! Data structures for the configuration core.
//!
//! This module contains the building blocks the per-model configuration is
//! assembled from:
//! - [`ModelSchema`]: introspection facts handed in by the host framework
//! - [`ColumnSet`] / [`ColumnDescriptor`]: ordered column metadata with an
//!   active (inheritable) view
//! - [`Action`] / [`ActionRegistry`]: the closed action set and per-scope
//!   enablement
//! - [`ActionLink`] / [`ActionLinkSet`]: UI links grouped by placement
//!
//! # Architecture Note
//!
//! All of these are plain owned values. Sharing happens only after the owning
//! [`ScaffoldConfig`](crate::config::ScaffoldConfig) is sealed, so none of
//! them carry locks; collections use `IndexMap`/`IndexSet` to keep the
//! insertion order configuration authors expect.

pub mod actions;
pub mod column;
pub mod columns;
pub mod inflect;
pub mod links;
pub mod schema;

pub use actions::{Action, ActionRegistry};
pub use column::{ColumnDefaults, ColumnDescriptor, FormUi, SelectOption};
pub use columns::ColumnSet;
pub use links::{ActionLink, ActionLinkSet, Placement};
pub use schema::{Association, ModelSchema};
