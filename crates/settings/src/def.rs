use crate::catalog::DependencyValues;
use crate::value::{SettingDefault, SettingType, SettingValue};

/// Per-value validator for a setting declaration.
pub type SettingValidator = fn(&SettingValue) -> Result<(), String>;

/// Cross-key validator consulted during merges and updates.
///
/// Receives the setting's proposed value plus a read-only window onto the
/// proposed combined state of its declared dependencies.
pub type DependencyValidator = fn(&SettingValue, &DependencyValues<'_>) -> Result<(), String>;

/// The namespace a setting belongs to.
///
/// Scopes are fully independent: the same key string may exist in both the
/// cluster and index catalogs without conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingScope {
	/// Applies cluster-wide; one view for the whole cluster.
	Cluster,
	/// Applies per logical index; one view per index.
	Index,
}

impl SettingScope {
	/// Returns the stable string form of this scope.
	pub const fn as_str(self) -> &'static str {
		match self {
			SettingScope::Cluster => "cluster",
			SettingScope::Index => "index",
		}
	}
}

impl core::fmt::Display for SettingScope {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Declaration of a configurable setting (static input).
///
/// Declarations are contributed by collaborating subsystems at startup and
/// frozen into a [`Catalog`](crate::catalog::Catalog). A setting is static
/// unless marked [`dynamic`](SettingDef::dynamic): static settings are fixed
/// at instance-creation time and rejected by runtime updates.
#[derive(Clone, Copy)]
pub struct SettingDef {
	/// Unique key within the scope, e.g. `index.replica.count`.
	pub key: &'static str,
	/// Scope this declaration belongs to.
	pub scope: SettingScope,
	/// Declared value type.
	pub value_type: SettingType,
	/// Default used when no source layer provides the key.
	pub default: SettingDefault,
	/// Whether the setting may change after the owning instance is created.
	pub dynamic: bool,
	/// Optional per-value validator.
	pub validator: Option<SettingValidator>,
	/// Keys consulted by the dependency validator.
	pub depends_on: &'static [&'static str],
	/// Optional cross-key validator, re-run whenever this setting or one of
	/// its dependencies changes.
	pub depends_validator: Option<DependencyValidator>,
}

impl SettingDef {
	/// Creates a static declaration with no validator.
	pub const fn new(
		key: &'static str,
		scope: SettingScope,
		value_type: SettingType,
		default: SettingDefault,
	) -> Self {
		Self {
			key,
			scope,
			value_type,
			default,
			dynamic: false,
			validator: None,
			depends_on: &[],
			depends_validator: None,
		}
	}

	/// Marks the setting as changeable at runtime.
	pub const fn dynamic(mut self) -> Self {
		self.dynamic = true;
		self
	}

	/// Attaches a per-value validator.
	pub const fn with_validator(mut self, validator: SettingValidator) -> Self {
		self.validator = Some(validator);
		self
	}

	/// Declares dependencies and the validator that checks them.
	pub const fn with_dependencies(
		mut self,
		keys: &'static [&'static str],
		validator: DependencyValidator,
	) -> Self {
		self.depends_on = keys;
		self.depends_validator = Some(validator);
		self
	}

	/// Runs the per-value validator, if any.
	pub(crate) fn validate(&self, value: &SettingValue) -> Result<(), String> {
		match self.validator {
			Some(validate) => validate(value),
			None => Ok(()),
		}
	}
}

impl core::fmt::Debug for SettingDef {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("SettingDef")
			.field("key", &self.key)
			.field("scope", &self.scope)
			.field("value_type", &self.value_type)
			.field("dynamic", &self.dynamic)
			.finish()
	}
}
