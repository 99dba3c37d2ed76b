//! Immutable effective-settings snapshots.
//!
//! A [`SettingsView`] is produced by the merge engine and superseded, never
//! mutated, by update arbitration. Any number of threads may read a view
//! without synchronization; holders of an old view keep a consistent,
//! stale-but-valid snapshot.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::error::{Result, SettingsError};
use crate::typed::TypedSettingKey;
use crate::value::{FromSettingValue, SettingValue};


/// Immutable snapshot of effective setting values for one scope instance.
#[derive(Clone)]
pub struct SettingsView {
	catalog: Arc<Catalog>,
	instance: Box<str>,
	values: Vec<SettingValue>,
}

impl SettingsView {
	pub(crate) fn new(catalog: Arc<Catalog>, instance: String, values: Vec<SettingValue>) -> Self {
		debug_assert_eq!(catalog.len(), values.len());
		Self {
			catalog,
			instance: instance.into_boxed_str(),
			values,
		}
	}

	/// Returns the catalog this view was built from.
	pub fn catalog(&self) -> &Arc<Catalog> {
		&self.catalog
	}

	/// Returns the identifier of the scope instance this view represents.
	pub fn instance(&self) -> &str {
		&self.instance
	}

	/// Returns the effective value for a declared key.
	///
	/// An undeclared key is a programmer error on the read path and is
	/// reported, never defaulted.
	pub fn get(&self, key: &str) -> Result<&SettingValue> {
		self.catalog
			.id(key)
			.map(|id| &self.values[id])
			.ok_or_else(|| SettingsError::UnknownSetting {
				key: key.to_string(),
			})
	}

	/// Returns the effective value converted to `T`, failing on a type
	/// mismatch.
	pub fn get_as<T: FromSettingValue>(&self, key: &str) -> Result<T> {
		let value = self.get(key)?;
		T::from_setting(value).ok_or_else(|| SettingsError::TypeMismatch {
			key: key.to_string(),
			expected: T::type_name().to_string(),
			got: value.type_name().to_string(),
		})
	}

	/// Typed accessor for boolean settings.
	pub fn get_bool(&self, key: &str) -> Result<bool> {
		self.get_as(key)
	}

	/// Typed accessor for integer settings.
	pub fn get_int(&self, key: &str) -> Result<i64> {
		self.get_as(key)
	}

	/// Typed accessor for byte-size settings.
	pub fn get_bytes(&self, key: &str) -> Result<u64> {
		self.get_as(key)
	}

	/// Typed accessor for duration settings.
	pub fn get_duration(&self, key: &str) -> Result<std::time::Duration> {
		self.get_as(key)
	}

	/// Typed accessor for string and enum settings.
	pub fn get_str(&self, key: &str) -> Result<&str> {
		let value = self.get(key)?;
		value.as_str().ok_or_else(|| SettingsError::TypeMismatch {
			key: key.to_string(),
			expected: "string".to_string(),
			got: value.type_name().to_string(),
		})
	}

	/// Typed accessor for list settings.
	pub fn get_list(&self, key: &str) -> Result<Vec<String>> {
		self.get_as(key)
	}

	/// Iterates all declared keys with their effective values, in
	/// declaration order. Declaration order keeps listings stable and
	/// diff-friendly across snapshots regardless of source insertion order.
	pub fn all(&self) -> impl Iterator<Item = (&'static str, &SettingValue)> {
		self.catalog
			.defs()
			.map(|d| d.key)
			.zip(self.values.iter())
	}

	/// Resolves a typed key, falling back to the declaration default.
	///
	/// Unlike [`get_as`](SettingsView::get_as) this never fails: if the key
	/// is missing from this view's catalog or the value type does not match
	/// `T`, the declaration default is returned and a warning is logged.
	/// Intended for hot read paths that pair a typed key with its own
	/// declaration.
	pub fn resolve<T: FromSettingValue>(&self, key: TypedSettingKey<T>) -> T {
		let def = key.def();
		if let Some(id) = self.catalog.id(def.key)
			&& let Some(value) = T::from_setting(&self.values[id])
		{
			return value;
		}

		tracing::warn!(
			domain = "settings",
			key = def.key,
			instance = &*self.instance,
			expected = T::type_name(),
			"setting missing or mistyped in view; falling back to declaration default",
		);

		match T::from_default(&def.default) {
			Some(value) => value,
			None => unreachable!("default type validated at catalog construction"),
		}
	}

	/// Returns the number of declared settings in this view.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns `true` if the view holds no settings.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub(crate) fn values(&self) -> &[SettingValue] {
		&self.values
	}
}

impl core::fmt::Debug for SettingsView {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("SettingsView")
			.field("scope", &self.catalog.scope())
			.field("instance", &self.instance)
			.field("len", &self.values.len())
			.finish()
	}
}
