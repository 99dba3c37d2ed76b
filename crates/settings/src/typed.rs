use std::marker::PhantomData;

use crate::def::SettingDef;
use crate::value::FromSettingValue;

/// Typed handle to a setting declaration with compile-time type information.
///
/// Collaborators that declare a setting usually also export a typed key for
/// it, so read sites get a plain `bool`/`i64`/`Duration` back without
/// matching on [`SettingValue`](crate::value::SettingValue) variants.
pub struct TypedSettingKey<T: FromSettingValue> {
	pub(crate) def: &'static SettingDef,
	pub(crate) _marker: PhantomData<T>,
}

impl<T: FromSettingValue> Clone for TypedSettingKey<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T: FromSettingValue> Copy for TypedSettingKey<T> {}

impl<T: FromSettingValue> TypedSettingKey<T> {
	/// Creates a typed key from a static declaration.
	pub const fn new(def: &'static SettingDef) -> Self {
		Self {
			def,
			_marker: PhantomData,
		}
	}

	/// Returns the underlying declaration.
	pub fn def(&self) -> &'static SettingDef {
		self.def
	}

	/// Returns the setting key string.
	pub fn key(&self) -> &'static str {
		self.def.key
	}
}

impl<T: FromSettingValue> core::fmt::Debug for TypedSettingKey<T> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_tuple("TypedSettingKey").field(&self.def.key).finish()
	}
}
