//! Coercion of raw source strings into typed setting values.
//!
//! Layered sources and update requests deliver values as flat strings; this
//! module consolidates the per-type parsing used by both the merge engine and
//! runtime update arbitration.

use std::time::Duration;

use bytesize::ByteSize;

use crate::value::{SettingType, SettingValue};

/// Coerces a raw string into a [`SettingValue`] of the declared type.
///
/// Returns a human-readable reason on failure; callers wrap it into a
/// type-mismatch error carrying the setting key.
pub fn coerce(raw: &str, ty: SettingType) -> Result<SettingValue, String> {
	match ty {
		SettingType::Bool => parse_bool(raw).map(SettingValue::Bool),
		SettingType::Int => parse_int(raw).map(SettingValue::Int),
		SettingType::Bytes => parse_bytes(raw).map(SettingValue::Bytes),
		SettingType::Duration => parse_duration(raw).map(SettingValue::Duration),
		SettingType::Enum(variants) => {
			if variants.contains(&raw) {
				Ok(SettingValue::String(raw.to_string()))
			} else {
				Err(format!(
					"'{raw}' is not one of [{}]",
					variants.join(", ")
				))
			}
		}
		SettingType::String => Ok(SettingValue::String(raw.to_string())),
		SettingType::List => Ok(SettingValue::List(parse_list(raw))),
	}
}

/// Parse a boolean value from common string representations.
pub fn parse_bool(value: &str) -> Result<bool, String> {
	match value.to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		_ => Err(format!(
			"invalid boolean: '{value}' (expected true/false, yes/no, on/off, 1/0)"
		)),
	}
}

/// Parse an integer value.
pub fn parse_int(value: &str) -> Result<i64, String> {
	value
		.trim()
		.parse::<i64>()
		.map_err(|_| format!("invalid integer: '{value}'"))
}

/// Parse a byte size, accepting unit suffixes like "4kb" or "512MiB".
pub fn parse_bytes(value: &str) -> Result<u64, String> {
	value
		.trim()
		.parse::<ByteSize>()
		.map(|b| b.as_u64())
		.map_err(|_| format!("invalid byte size: '{value}'"))
}

/// Parse a duration with a required unit suffix: ms, s, m, h, or d.
///
/// A bare "0" is accepted without a unit.
pub fn parse_duration(value: &str) -> Result<Duration, String> {
	let v = value.trim();
	if v == "0" {
		return Ok(Duration::ZERO);
	}
	let (digits, millis_per_unit) = if let Some(d) = v.strip_suffix("ms") {
		(d, 1u64)
	} else if let Some(d) = v.strip_suffix('s') {
		(d, 1_000)
	} else if let Some(d) = v.strip_suffix('m') {
		(d, 60_000)
	} else if let Some(d) = v.strip_suffix('h') {
		(d, 3_600_000)
	} else if let Some(d) = v.strip_suffix('d') {
		(d, 86_400_000)
	} else {
		return Err(format!(
			"invalid duration: '{value}' (expected a unit suffix: ms, s, m, h, d)"
		));
	};
	let count: u64 = digits
		.trim()
		.parse()
		.map_err(|_| format!("invalid duration: '{value}'"))?;
	count
		.checked_mul(millis_per_unit)
		.map(Duration::from_millis)
		.ok_or_else(|| format!("duration overflow: '{value}'"))
}

/// Parse a comma-separated list, trimming entries and dropping empties.
pub fn parse_list(value: &str) -> Vec<String> {
	value
		.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(String::from)
		.collect()
}

/// Suggests the closest declared key using fuzzy matching.
pub(crate) fn suggest<'a>(
	key: &str,
	candidates: impl Iterator<Item = &'a str>,
) -> Option<&'a str> {
	candidates
		.min_by_key(|k| strsim::levenshtein(key, k))
		.filter(|k| strsim::levenshtein(key, k) <= 3)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bool_representations() {
		assert_eq!(parse_bool("true"), Ok(true));
		assert_eq!(parse_bool("ON"), Ok(true));
		assert_eq!(parse_bool("no"), Ok(false));
		assert_eq!(parse_bool("0"), Ok(false));
		assert!(parse_bool("enabled").is_err());
	}

	#[test]
	fn duration_units() {
		assert_eq!(parse_duration("500ms"), Ok(Duration::from_millis(500)));
		assert_eq!(parse_duration("30s"), Ok(Duration::from_secs(30)));
		assert_eq!(parse_duration("5m"), Ok(Duration::from_secs(300)));
		assert_eq!(parse_duration("2h"), Ok(Duration::from_secs(7200)));
		assert_eq!(parse_duration("1d"), Ok(Duration::from_secs(86400)));
		assert_eq!(parse_duration("0"), Ok(Duration::ZERO));
		assert!(parse_duration("30").is_err());
		assert!(parse_duration("abc s").is_err());
	}

	#[test]
	fn byte_sizes() {
		assert_eq!(parse_bytes("1024"), Ok(1024));
		assert_eq!(parse_bytes("4kb"), Ok(4_000));
		assert!(parse_bytes("four").is_err());
	}

	#[test]
	fn list_trims_and_drops_empties() {
		assert_eq!(
			parse_list("a, b ,,c"),
			vec!["a".to_string(), "b".to_string(), "c".to_string()]
		);
		assert!(parse_list("").is_empty());
	}

	#[test]
	fn enum_membership() {
		let ty = SettingType::Enum(&["none", "all"]);
		assert_eq!(
			coerce("all", ty),
			Ok(SettingValue::String("all".to_string()))
		);
		assert!(coerce("some", ty).is_err());
	}

	#[test]
	fn suggestion_distance_cap() {
		let keys = ["index.replica.count", "index.shard.count"];
		assert_eq!(
			suggest("index.replica.conut", keys.iter().copied()),
			Some("index.replica.count")
		);
		assert_eq!(suggest("completely.different", keys.iter().copied()), None);
	}
}
