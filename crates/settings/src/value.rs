use std::time::Duration;

/// The effective value of a setting.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
	/// Boolean value (true/false).
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Byte size in bytes.
	Bytes(u64),
	/// Time duration.
	Duration(Duration),
	/// String value. Also carries enum-typed settings, constrained to the
	/// variants listed in [`SettingType::Enum`].
	String(String),
	/// List of strings.
	List(Vec<String>),
}

impl SettingValue {
	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			SettingValue::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer value if this is an `Int` variant.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			SettingValue::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the byte count if this is a `Bytes` variant.
	pub fn as_bytes(&self) -> Option<u64> {
		match self {
			SettingValue::Bytes(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the duration if this is a `Duration` variant.
	pub fn as_duration(&self) -> Option<Duration> {
		match self {
			SettingValue::Duration(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string value if this is a `String` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			SettingValue::String(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the list if this is a `List` variant.
	pub fn as_list(&self) -> Option<&[String]> {
		match self {
			SettingValue::List(v) => Some(v),
			_ => None,
		}
	}

	/// Returns true if this value matches the given type.
	///
	/// For [`SettingType::Enum`] the check is membership: the value must be a
	/// string equal to one of the declared variants.
	pub fn matches_type(&self, ty: SettingType) -> bool {
		match (self, ty) {
			(SettingValue::Bool(_), SettingType::Bool)
			| (SettingValue::Int(_), SettingType::Int)
			| (SettingValue::Bytes(_), SettingType::Bytes)
			| (SettingValue::Duration(_), SettingType::Duration)
			| (SettingValue::String(_), SettingType::String)
			| (SettingValue::List(_), SettingType::List) => true,
			(SettingValue::String(s), SettingType::Enum(variants)) => {
				variants.contains(&s.as_str())
			}
			_ => false,
		}
	}

	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		match self {
			SettingValue::Bool(_) => "bool",
			SettingValue::Int(_) => "int",
			SettingValue::Bytes(_) => "bytes",
			SettingValue::Duration(_) => "duration",
			SettingValue::String(_) => "string",
			SettingValue::List(_) => "list",
		}
	}
}

impl From<bool> for SettingValue {
	fn from(v: bool) -> Self {
		SettingValue::Bool(v)
	}
}

impl From<i64> for SettingValue {
	fn from(v: i64) -> Self {
		SettingValue::Int(v)
	}
}

impl From<Duration> for SettingValue {
	fn from(v: Duration) -> Self {
		SettingValue::Duration(v)
	}
}

impl From<String> for SettingValue {
	fn from(v: String) -> Self {
		SettingValue::String(v)
	}
}

impl From<&str> for SettingValue {
	fn from(v: &str) -> Self {
		SettingValue::String(v.to_string())
	}
}

/// The declared type of a setting's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingType {
	/// Boolean type.
	Bool,
	/// Integer type.
	Int,
	/// Byte size type (raw values accept unit suffixes, e.g. "512MiB").
	Bytes,
	/// Duration type (raw values carry a unit suffix, e.g. "30s").
	Duration,
	/// Closed string enumeration over the listed variants.
	Enum(&'static [&'static str]),
	/// Free-form string type.
	String,
	/// Comma-separated list of strings.
	List,
}

impl core::fmt::Display for SettingType {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			SettingType::Bool => f.write_str("bool"),
			SettingType::Int => f.write_str("int"),
			SettingType::Bytes => f.write_str("bytes"),
			SettingType::Duration => f.write_str("duration"),
			SettingType::Enum(variants) => write!(f, "enum [{}]", variants.join(", ")),
			SettingType::String => f.write_str("string"),
			SettingType::List => f.write_str("list"),
		}
	}
}

/// Typed carrier for setting default values.
///
/// Unlike [`SettingValue`], this encodes the variant type at the Rust level
/// via function pointers. This lets catalog construction verify that a
/// declaration's default matches its declared [`SettingType`] and eliminates
/// runtime downcasting during typed resolution.
#[derive(Clone, Copy)]
pub enum SettingDefault {
	/// Boolean default factory.
	Bool(fn() -> bool),
	/// Integer default factory.
	Int(fn() -> i64),
	/// Byte size default factory.
	Bytes(fn() -> u64),
	/// Duration default factory.
	Duration(fn() -> Duration),
	/// String default factory. Also used for enum-typed settings.
	String(fn() -> String),
	/// List default factory.
	List(fn() -> Vec<String>),
}

impl core::fmt::Debug for SettingDefault {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			SettingDefault::Bool(_) => f.write_str("SettingDefault::Bool(..)"),
			SettingDefault::Int(_) => f.write_str("SettingDefault::Int(..)"),
			SettingDefault::Bytes(_) => f.write_str("SettingDefault::Bytes(..)"),
			SettingDefault::Duration(_) => f.write_str("SettingDefault::Duration(..)"),
			SettingDefault::String(_) => f.write_str("SettingDefault::String(..)"),
			SettingDefault::List(_) => f.write_str("SettingDefault::List(..)"),
		}
	}
}

impl SettingDefault {
	/// Invokes the factory and returns the value as a [`SettingValue`].
	pub fn to_value(self) -> SettingValue {
		match self {
			SettingDefault::Bool(f) => SettingValue::Bool(f()),
			SettingDefault::Int(f) => SettingValue::Int(f()),
			SettingDefault::Bytes(f) => SettingValue::Bytes(f()),
			SettingDefault::Duration(f) => SettingValue::Duration(f()),
			SettingDefault::String(f) => SettingValue::String(f()),
			SettingDefault::List(f) => SettingValue::List(f()),
		}
	}
}

// Seal the FromSettingValue trait to prevent external implementations.
mod sealed {
	pub trait Sealed {}
	impl Sealed for bool {}
	impl Sealed for i64 {}
	impl Sealed for u64 {}
	impl Sealed for std::time::Duration {}
	impl Sealed for String {}
	impl Sealed for Vec<String> {}
}

/// Trait for types that can be extracted from a [`SettingValue`].
pub trait FromSettingValue: sealed::Sealed + Sized {
	/// Extracts the value, returning `None` if the variant doesn't match.
	fn from_setting(value: &SettingValue) -> Option<Self>;

	/// Extracts the typed default, returning `None` on a variant mismatch.
	fn from_default(default: &SettingDefault) -> Option<Self>;

	/// Name of the expected value type, for diagnostics.
	fn type_name() -> &'static str;
}

impl FromSettingValue for bool {
	fn from_setting(value: &SettingValue) -> Option<Self> {
		value.as_bool()
	}

	fn from_default(default: &SettingDefault) -> Option<Self> {
		match default {
			SettingDefault::Bool(f) => Some(f()),
			_ => None,
		}
	}

	fn type_name() -> &'static str {
		"bool"
	}
}

impl FromSettingValue for i64 {
	fn from_setting(value: &SettingValue) -> Option<Self> {
		value.as_int()
	}

	fn from_default(default: &SettingDefault) -> Option<Self> {
		match default {
			SettingDefault::Int(f) => Some(f()),
			_ => None,
		}
	}

	fn type_name() -> &'static str {
		"int"
	}
}

impl FromSettingValue for u64 {
	fn from_setting(value: &SettingValue) -> Option<Self> {
		value.as_bytes()
	}

	fn from_default(default: &SettingDefault) -> Option<Self> {
		match default {
			SettingDefault::Bytes(f) => Some(f()),
			_ => None,
		}
	}

	fn type_name() -> &'static str {
		"bytes"
	}
}

impl FromSettingValue for Duration {
	fn from_setting(value: &SettingValue) -> Option<Self> {
		value.as_duration()
	}

	fn from_default(default: &SettingDefault) -> Option<Self> {
		match default {
			SettingDefault::Duration(f) => Some(f()),
			_ => None,
		}
	}

	fn type_name() -> &'static str {
		"duration"
	}
}

impl FromSettingValue for String {
	fn from_setting(value: &SettingValue) -> Option<Self> {
		value.as_str().map(|s| s.to_string())
	}

	fn from_default(default: &SettingDefault) -> Option<Self> {
		match default {
			SettingDefault::String(f) => Some(f()),
			_ => None,
		}
	}

	fn type_name() -> &'static str {
		"string"
	}
}

impl FromSettingValue for Vec<String> {
	fn from_setting(value: &SettingValue) -> Option<Self> {
		value.as_list().map(|l| l.to_vec())
	}

	fn from_default(default: &SettingDefault) -> Option<Self> {
		match default {
			SettingDefault::List(f) => Some(f()),
			_ => None,
		}
	}

	fn type_name() -> &'static str {
		"list"
	}
}
