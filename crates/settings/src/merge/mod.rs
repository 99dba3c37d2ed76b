//! Layered merge of raw settings sources into effective views.
//!
//! Sources are applied in increasing precedence: later layers override
//! earlier ones key by key, and a key absent from every layer keeps its
//! declaration default. The merge is a strict whitelist: any key the
//! catalog does not declare aborts the whole build with no partial view.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::catalog::{Catalog, DependencyValues};
use crate::error::{Result, SettingsError};
use crate::parse;
use crate::value::SettingValue;
use crate::view::SettingsView;

#[cfg(test)]
mod tests;

/// One named precedence layer of raw key/value overrides.
///
/// Entries keep insertion order; setting a key that is already present in
/// the layer replaces its value in place, so within a single layer the last
/// write wins.
#[derive(Debug, Clone, Default)]
pub struct Source {
	name: String,
	entries: Vec<(String, String)>,
}

impl Source {
	/// Creates an empty source layer with a diagnostic name.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			entries: Vec::new(),
		}
	}

	/// Returns the layer's diagnostic name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Sets a raw value, replacing any earlier value for the same key.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		let value = value.into();
		if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
			entry.1 = value;
		} else {
			self.entries.push((key, value));
		}
	}

	/// Builder-style [`set`](Source::set).
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.set(key, value);
		self
	}

	/// Iterates entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Returns the number of entries in the layer.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` if the layer has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl Catalog {
	/// Computes an effective view for one scope instance from ordered
	/// sources.
	///
	/// `instance` identifies the owner (an index name, or the cluster
	/// singleton). Sources apply lowest precedence first. The same inputs
	/// always produce the same effective values.
	pub fn build_view(
		self: &Arc<Self>,
		instance: impl Into<String>,
		sources: &[Source],
	) -> Result<SettingsView> {
		let mut values = self.default_values();
		for (index, source) in sources.iter().enumerate() {
			self.apply_source(&mut values, source, index)?;
		}
		self.validate_dependencies(&values, None)?;
		Ok(SettingsView::new(self.clone(), instance.into(), values))
	}

	/// Produces a fresh view for the same instance from updated
	/// externally-owned metadata.
	///
	/// The base view's resolved values form the lowest layer and
	/// `overrides` the highest. The base view is untouched; in-flight
	/// readers holding it keep a consistent snapshot.
	pub fn derive_view(
		self: &Arc<Self>,
		base: &SettingsView,
		overrides: &Source,
	) -> Result<SettingsView> {
		debug_assert!(
			Arc::ptr_eq(self, base.catalog()),
			"view derived against a foreign catalog"
		);
		let mut values = base.values().to_vec();
		self.apply_source(&mut values, overrides, 1)?;
		self.validate_dependencies(&values, None)?;
		Ok(SettingsView::new(
			self.clone(),
			base.instance().to_string(),
			values,
		))
	}

	/// Coerces and validates one layer's entries into `values`.
	pub(crate) fn apply_source(
		&self,
		values: &mut [SettingValue],
		source: &Source,
		index: usize,
	) -> Result<()> {
		for (key, raw) in source.iter() {
			let id = self
				.id(key)
				.ok_or_else(|| SettingsError::UnknownSettingInSource {
					key: key.to_string(),
					source: source.name().to_string(),
					index,
				})?;
			values[id] = self.coerce_entry(id, raw)?;
		}
		Ok(())
	}

	/// Coerces a raw value against the declaration at `id` and runs its
	/// per-value validator.
	pub(crate) fn coerce_entry(&self, id: usize, raw: &str) -> Result<SettingValue> {
		let def = self.def_at(id);
		let value =
			parse::coerce(raw, def.value_type).map_err(|_| SettingsError::TypeMismatch {
				key: def.key.to_string(),
				expected: def.value_type.to_string(),
				got: raw.to_string(),
			})?;
		def.validate(&value)
			.map_err(|reason| SettingsError::Validation {
				key: def.key.to_string(),
				reason,
			})?;
		Ok(value)
	}

	/// Runs dependency validators against a proposed state.
	///
	/// With `changed = None` every declaration with a dependency validator is
	/// checked (merge paths). With a changed-id set, only declarations that
	/// changed or depend on a changed key are re-checked (update paths).
	pub(crate) fn validate_dependencies(
		&self,
		values: &[SettingValue],
		changed: Option<&FxHashSet<usize>>,
	) -> Result<()> {
		for (id, def) in self.defs().enumerate() {
			let Some(validate) = def.depends_validator else {
				continue;
			};
			let relevant = match changed {
				None => true,
				Some(set) => {
					set.contains(&id)
						|| def
							.depends_on
							.iter()
							.any(|dep| self.id(dep).is_some_and(|dep_id| set.contains(&dep_id)))
				}
			};
			if !relevant {
				continue;
			}
			let peers = DependencyValues::new(self, values);
			validate(&values[id], &peers).map_err(|reason| SettingsError::Validation {
				key: def.key.to_string(),
				reason,
			})?;
		}
		Ok(())
	}
}
