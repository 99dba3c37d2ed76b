//! Catalog construction and the process-wide accessor surface.
//!
//! A [`Catalog`] is the frozen schema for one scope: every declared setting,
//! indexed by key, plus the per-key listener table consulted on update
//! commits. Construction is eager and fail-fast; after it succeeds the
//! catalog is immutable and safe for unsynchronized concurrent reads.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::def::{SettingDef, SettingScope};
use crate::error::{Result, SettingsError};
use crate::update::UpdateListener;
use crate::value::SettingValue;


/// Immutable, deduplicated schema of all declared settings for one scope.
pub struct Catalog {
	scope: SettingScope,
	defs: Vec<SettingDef>,
	by_key: FxHashMap<&'static str, usize>,
	listeners: RwLock<FxHashMap<&'static str, Vec<UpdateListener>>>,
}

impl Catalog {
	/// Builds a catalog from collaborator-contributed declarations.
	///
	/// Fails fast on the first inconsistency: a declaration bound to a
	/// different scope, a duplicate key, a default that does not satisfy its
	/// own declaration, or a dependency on an undeclared key. A failed
	/// construction must abort startup; there is no partial catalog.
	pub fn new(
		scope: SettingScope,
		declarations: impl IntoIterator<Item = SettingDef>,
	) -> Result<Self> {
		let mut defs: Vec<SettingDef> = Vec::new();
		let mut by_key: FxHashMap<&'static str, usize> = FxHashMap::default();

		for def in declarations {
			if def.scope != scope {
				return Err(SettingsError::ScopeMismatch {
					key: def.key.to_string(),
					expected: scope,
					got: def.scope,
				});
			}
			if by_key.contains_key(def.key) {
				return Err(SettingsError::DuplicateKey {
					key: def.key.to_string(),
					scope,
				});
			}

			let default = def.default.to_value();
			if !default.matches_type(def.value_type) {
				return Err(SettingsError::InvalidDefault {
					key: def.key.to_string(),
					reason: format!(
						"default is {} but declared type is {}",
						default.type_name(),
						def.value_type
					),
				});
			}
			if let Err(reason) = def.validate(&default) {
				return Err(SettingsError::InvalidDefault {
					key: def.key.to_string(),
					reason,
				});
			}

			by_key.insert(def.key, defs.len());
			defs.push(def);
		}

		let catalog = Self {
			scope,
			defs,
			by_key,
			listeners: RwLock::new(FxHashMap::default()),
		};

		// Dependencies must name declared keys, and the pure-default state
		// must already satisfy every dependency validator so an empty merge
		// always succeeds.
		let defaults = catalog.default_values();
		for def in &catalog.defs {
			for dep in def.depends_on {
				if !catalog.by_key.contains_key(dep) {
					return Err(SettingsError::UnknownDependency {
						key: def.key.to_string(),
						dependency: dep.to_string(),
					});
				}
			}
			if let Some(validate) = def.depends_validator {
				let peers = DependencyValues {
					catalog: &catalog,
					values: &defaults,
				};
				let id = catalog.by_key[def.key];
				if let Err(reason) = validate(&defaults[id], &peers) {
					return Err(SettingsError::InvalidDefault {
						key: def.key.to_string(),
						reason,
					});
				}
			}
		}

		Ok(catalog)
	}

	/// Returns the scope this catalog is bound to.
	pub fn scope(&self) -> SettingScope {
		self.scope
	}

	/// Returns the number of declared settings.
	pub fn len(&self) -> usize {
		self.defs.len()
	}

	/// Returns `true` if the catalog declares no settings.
	pub fn is_empty(&self) -> bool {
		self.defs.is_empty()
	}

	/// Returns `true` if the key is declared in this catalog.
	pub fn contains(&self, key: &str) -> bool {
		self.by_key.contains_key(key)
	}

	/// Looks up a declaration by key.
	pub fn def(&self, key: &str) -> Option<&SettingDef> {
		self.id(key).map(|id| &self.defs[id])
	}

	/// Iterates declarations in declaration order.
	pub fn defs(&self) -> impl Iterator<Item = &SettingDef> {
		self.defs.iter()
	}

	/// Suggests the closest declared key for an unknown input, if any is
	/// within editing distance. Useful for "unknown setting" diagnostics.
	pub fn suggest(&self, key: &str) -> Option<&'static str> {
		crate::parse::suggest(key, self.defs.iter().map(|d| d.key))
	}

	/// Registers a listener invoked synchronously after an accepted update
	/// changes the given key.
	pub fn register_listener(&self, key: &str, listener: UpdateListener) -> Result<()> {
		let id = self.id(key).ok_or_else(|| SettingsError::UnknownSetting {
			key: key.to_string(),
		})?;
		let key = self.defs[id].key;
		self.listeners.write().entry(key).or_default().push(listener);
		Ok(())
	}

	pub(crate) fn id(&self, key: &str) -> Option<usize> {
		self.by_key.get(key).copied()
	}

	pub(crate) fn def_at(&self, id: usize) -> &SettingDef {
		&self.defs[id]
	}

	/// Materializes the pure-default value vector, in declaration order.
	pub(crate) fn default_values(&self) -> Vec<SettingValue> {
		self.defs.iter().map(|d| d.default.to_value()).collect()
	}

	/// Invokes listeners registered for `key` with the committed transition.
	pub(crate) fn notify(&self, key: &str, old: &SettingValue, new: &SettingValue) {
		let listeners = self.listeners.read();
		if let Some(registered) = listeners.get(key) {
			for listener in registered {
				listener(key, old, new);
			}
		}
	}
}

impl core::fmt::Debug for Catalog {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Catalog")
			.field("scope", &self.scope)
			.field("len", &self.defs.len())
			.finish()
	}
}

/// Read-only window onto a proposed settings state, handed to dependency
/// validators so they can consult peer values.
pub struct DependencyValues<'a> {
	catalog: &'a Catalog,
	values: &'a [SettingValue],
}

impl<'a> DependencyValues<'a> {
	pub(crate) fn new(catalog: &'a Catalog, values: &'a [SettingValue]) -> Self {
		Self { catalog, values }
	}

	/// Returns the proposed value of a peer setting, if declared.
	pub fn get(&self, key: &str) -> Option<&SettingValue> {
		self.catalog.id(key).map(|id| &self.values[id])
	}
}

static CLUSTER: OnceLock<Arc<Catalog>> = OnceLock::new();
static INDEX: OnceLock<Arc<Catalog>> = OnceLock::new();

fn init_catalog(
	cell: &'static OnceLock<Arc<Catalog>>,
	scope: SettingScope,
	declarations: impl IntoIterator<Item = SettingDef>,
) -> Result<Arc<Catalog>> {
	// First initialization wins; later calls observe the existing catalog so
	// the process never holds two disagreeing schemas for one scope.
	if let Some(existing) = cell.get() {
		return Ok(existing.clone());
	}
	let catalog = Arc::new(Catalog::new(scope, declarations)?);
	Ok(cell.get_or_init(|| catalog).clone())
}

/// Initializes the process-wide cluster catalog from collaborator
/// declarations, or returns the already-initialized one.
pub fn init_cluster_catalog(
	declarations: impl IntoIterator<Item = SettingDef>,
) -> Result<Arc<Catalog>> {
	init_catalog(&CLUSTER, SettingScope::Cluster, declarations)
}

/// Initializes the process-wide index catalog from collaborator
/// declarations, or returns the already-initialized one.
pub fn init_index_catalog(
	declarations: impl IntoIterator<Item = SettingDef>,
) -> Result<Arc<Catalog>> {
	init_catalog(&INDEX, SettingScope::Index, declarations)
}

/// Returns the process-wide cluster catalog, if initialized.
pub fn cluster_catalog() -> Option<Arc<Catalog>> {
	CLUSTER.get().cloned()
}

/// Returns the process-wide index catalog, if initialized.
pub fn index_catalog() -> Option<Arc<Catalog>> {
	INDEX.get().cloned()
}
