//! Error types for the settings registry.

use crate::def::SettingScope;

/// Errors produced by catalog construction, merge, lookup, and update paths.
///
/// Construction-time errors (`DuplicateKey`, `InvalidDefault`,
/// `UnknownDependency`, `ScopeMismatch`) are fatal: a process must not start
/// with an inconsistent schema. Merge and update errors are recoverable; the
/// prior view stays valid and in effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
	/// Two declarations share a key within one scope.
	DuplicateKey {
		/// The key declared more than once.
		key: String,
		/// Scope of the catalog under construction.
		scope: SettingScope,
	},

	/// A declaration's default value does not satisfy its own declaration.
	InvalidDefault {
		/// The offending declaration's key.
		key: String,
		/// Why the default was rejected.
		reason: String,
	},

	/// A declaration names a dependency that is not declared in the catalog.
	UnknownDependency {
		/// The declaring setting's key.
		key: String,
		/// The missing dependency key.
		dependency: String,
	},

	/// A declaration was handed to a catalog bound to a different scope.
	ScopeMismatch {
		/// The offending declaration's key.
		key: String,
		/// Scope the catalog is bound to.
		expected: SettingScope,
		/// Scope the declaration carries.
		got: SettingScope,
	},

	/// A lookup or update referenced a key absent from the catalog.
	UnknownSetting {
		/// The undeclared key.
		key: String,
	},

	/// A merge source contained a key absent from the catalog.
	UnknownSettingInSource {
		/// The undeclared key.
		key: String,
		/// Name of the offending source layer.
		source: String,
		/// Position of the source in the precedence order.
		index: usize,
	},

	/// A raw value could not be coerced to the declared type.
	TypeMismatch {
		/// The setting's key.
		key: String,
		/// The declared type.
		expected: String,
		/// The rejected input.
		got: String,
	},

	/// A coerced value failed the declaration's validator or a cross-key
	/// dependency check.
	Validation {
		/// The setting's key.
		key: String,
		/// Validator-supplied reason.
		reason: String,
	},

	/// A runtime change was attempted on a non-dynamic setting.
	StaticSetting {
		/// The static setting's key.
		key: String,
	},
}

impl std::fmt::Display for SettingsError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::DuplicateKey { key, scope } => {
				write!(f, "duplicate setting key '{key}' in {scope} catalog")
			}
			Self::InvalidDefault { key, reason } => {
				write!(f, "invalid default for setting '{key}': {reason}")
			}
			Self::UnknownDependency { key, dependency } => {
				write!(f, "setting '{key}' depends on undeclared setting '{dependency}'")
			}
			Self::ScopeMismatch { key, expected, got } => {
				write!(
					f,
					"setting '{key}' is {got}-scoped but the catalog is {expected}-scoped"
				)
			}
			Self::UnknownSetting { key } => write!(f, "unknown setting '{key}'"),
			Self::UnknownSettingInSource { key, source, index } => {
				write!(f, "unknown setting '{key}' in source '{source}' (layer {index})")
			}
			Self::TypeMismatch { key, expected, got } => {
				write!(f, "type mismatch for setting '{key}': expected {expected}, got '{got}'")
			}
			Self::Validation { key, reason } => {
				write!(f, "invalid value for setting '{key}': {reason}")
			}
			Self::StaticSetting { key } => {
				write!(f, "setting '{key}' is static and cannot be updated at runtime")
			}
		}
	}
}

impl std::error::Error for SettingsError {}

/// Result type for settings registry operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
