//! Runtime update arbitration.
//!
//! Updates arrive as batches of raw key/value pairs against a live view.
//! The whole batch is validated before anything is applied: unknown keys,
//! static keys, coercion failures, validator failures, and cross-key
//! dependency violations each abort the batch with no partial application
//! and no listener invocation. An accepted batch produces a successor view
//! (copy-on-write); the input view is left untouched for in-flight readers.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::catalog::Catalog;
use crate::error::{Result, SettingsError};
use crate::value::SettingValue;
use crate::view::SettingsView;


/// Callback invoked synchronously with `(key, old, new)` after an accepted
/// update changes the key's effective value.
pub type UpdateListener = Arc<dyn Fn(&str, &SettingValue, &SettingValue) + Send + Sync>;

impl Catalog {
	/// Validates a batch of proposed changes and, if every entry is
	/// acceptable, returns a successor view with all of them applied.
	///
	/// Only dynamic settings may change; a static key fails the batch with
	/// [`SettingsError::StaticSetting`] regardless of value validity.
	/// Listeners fire once per actually-changed key, after the whole batch
	/// has committed, on the calling thread.
	pub fn apply_update<'a>(
		self: &Arc<Self>,
		view: &SettingsView,
		updates: impl IntoIterator<Item = (&'a str, &'a str)>,
	) -> Result<SettingsView> {
		debug_assert!(
			Arc::ptr_eq(self, view.catalog()),
			"update applied against a foreign catalog"
		);

		let mut values = view.values().to_vec();
		let mut changed: Vec<usize> = Vec::new();

		for (key, raw) in updates {
			let id = self.id(key).ok_or_else(|| SettingsError::UnknownSetting {
				key: key.to_string(),
			})?;
			let def = self.def_at(id);
			if !def.dynamic {
				return Err(SettingsError::StaticSetting {
					key: def.key.to_string(),
				});
			}
			values[id] = self.coerce_entry(id, raw)?;
			if !changed.contains(&id) {
				changed.push(id);
			}
		}

		if changed.is_empty() {
			return Ok(view.clone());
		}

		let changed_set: FxHashSet<usize> = changed.iter().copied().collect();
		self.validate_dependencies(&values, Some(&changed_set))?;

		let next = SettingsView::new(self.clone(), view.instance().to_string(), values);

		for &id in &changed {
			let key = self.def_at(id).key;
			let old = &view.values()[id];
			let new = &next.values()[id];
			if old == new {
				continue;
			}
			tracing::debug!(
				domain = "settings",
				key,
				instance = view.instance(),
				"setting updated",
			);
			self.notify(key, old, new);
		}

		Ok(next)
	}
}
