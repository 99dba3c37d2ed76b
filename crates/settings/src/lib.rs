//! Scoped settings registry.
//!
//! A catalog of named, typed configuration settings for a distributed
//! data-storage/search cluster. Settings are declared once at startup by
//! collaborating subsystems, frozen into an immutable per-scope [`Catalog`],
//! merged from layered [`Source`]s into immutable [`SettingsView`]
//! snapshots, and selectively updated at runtime through all-or-nothing
//! batch arbitration. Only settings declared dynamic may change at runtime.
//!
//! # Scopes
//!
//! Two scopes share one mechanism: [`SettingScope::Cluster`] (one view for
//! the whole cluster) and [`SettingScope::Index`] (one view per logical
//! index). Scopes are independent namespaces.
//!
//! # Merge order
//!
//! 1. Declaration defaults (lowest)
//! 2. Ordered source layers, later layers winning key by key
//! 3. For [`Catalog::derive_view`]: the base view's resolved values form
//!    the lowest layer and the partition-metadata overrides the highest
//!
//! Unknown keys are never tolerated: any source naming an undeclared key
//! fails the whole merge.
//!
//! # Concurrency
//!
//! Catalogs are built single-threaded, then read-only. Views are immutable
//! once published; [`SettingsCell`] swaps in fully-built successors while
//! readers keep loaded snapshots lock-free.

pub mod catalog;
pub mod cell;
pub mod def;
pub mod error;
pub mod merge;
pub mod parse;
pub mod typed;
pub mod update;
pub mod value;
pub mod view;

pub use catalog::{
	Catalog, DependencyValues, cluster_catalog, index_catalog, init_cluster_catalog,
	init_index_catalog,
};
pub use cell::SettingsCell;
pub use def::{DependencyValidator, SettingDef, SettingScope, SettingValidator};
pub use error::{Result, SettingsError};
pub use merge::Source;
pub use typed::TypedSettingKey;
pub use update::UpdateListener;
pub use value::{FromSettingValue, SettingDefault, SettingType, SettingValue};
pub use view::SettingsView;
