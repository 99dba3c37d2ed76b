use std::sync::Arc;
use std::time::Duration;

use super::Source;
use crate::catalog::{Catalog, DependencyValues};
use crate::def::{SettingDef, SettingScope};
use crate::error::SettingsError;
use crate::value::{SettingDefault, SettingType, SettingValue};

fn replica_range(value: &SettingValue) -> Result<(), String> {
	match value.as_int() {
		Some(n) if !(0..=10).contains(&n) => Err(format!("out of range 0-10: {n}")),
		_ => Ok(()),
	}
}

fn merge_within_pool(value: &SettingValue, peers: &DependencyValues<'_>) -> Result<(), String> {
	let max = peers
		.get("pool.max.threads")
		.and_then(|v| v.as_int())
		.unwrap_or(i64::MAX);
	match value.as_int() {
		Some(n) if n > max => Err(format!("{n} exceeds pool.max.threads ({max})")),
		_ => Ok(()),
	}
}

static REPLICA_COUNT: SettingDef = SettingDef::new(
	"index.replica.count",
	SettingScope::Index,
	SettingType::Int,
	SettingDefault::Int(|| 1),
)
.dynamic()
.with_validator(replica_range);

static SHARD_COUNT: SettingDef = SettingDef::new(
	"index.shard.count",
	SettingScope::Index,
	SettingType::Int,
	SettingDefault::Int(|| 5),
);

static REFRESH_INTERVAL: SettingDef = SettingDef::new(
	"index.refresh.interval",
	SettingScope::Index,
	SettingType::Duration,
	SettingDefault::Duration(|| Duration::from_secs(1)),
)
.dynamic();

static TRANSLOG_SIZE: SettingDef = SettingDef::new(
	"index.translog.flush_threshold",
	SettingScope::Index,
	SettingType::Bytes,
	SettingDefault::Bytes(|| 512 * 1024 * 1024),
)
.dynamic();

static ROUTING_INCLUDE: SettingDef = SettingDef::new(
	"index.routing.include",
	SettingScope::Index,
	SettingType::List,
	SettingDefault::List(Vec::new),
)
.dynamic();

static POOL_MAX: SettingDef = SettingDef::new(
	"pool.max.threads",
	SettingScope::Index,
	SettingType::Int,
	SettingDefault::Int(|| 8),
)
.dynamic();

static POOL_MERGE: SettingDef = SettingDef::new(
	"pool.merge.threads",
	SettingScope::Index,
	SettingType::Int,
	SettingDefault::Int(|| 4),
)
.dynamic()
.with_dependencies(&["pool.max.threads"], merge_within_pool);

fn catalog() -> Arc<Catalog> {
	Arc::new(
		Catalog::new(
			SettingScope::Index,
			[
				REPLICA_COUNT,
				SHARD_COUNT,
				REFRESH_INTERVAL,
				TRANSLOG_SIZE,
				ROUTING_INCLUDE,
				POOL_MAX,
				POOL_MERGE,
			],
		)
		.unwrap(),
	)
}

#[test]
fn empty_sources_yield_defaults() {
	let view = catalog().build_view("logs-0", &[]).unwrap();
	assert_eq!(view.get_int("index.replica.count").unwrap(), 1);
	assert_eq!(view.get_int("index.shard.count").unwrap(), 5);
	assert_eq!(
		view.get_duration("index.refresh.interval").unwrap(),
		Duration::from_secs(1)
	);
	assert_eq!(
		view.get_bytes("index.translog.flush_threshold").unwrap(),
		512 * 1024 * 1024
	);
	assert!(view.get_list("index.routing.include").unwrap().is_empty());
}

#[test]
fn single_layer_value_wins_over_default() {
	let source = Source::new("node defaults").with("index.replica.count", "3");
	let view = catalog().build_view("logs-0", &[source]).unwrap();
	assert_eq!(view.get_int("index.replica.count").unwrap(), 3);
	// Keys absent from the layer keep their defaults.
	assert_eq!(view.get_int("index.shard.count").unwrap(), 5);
}

#[test]
fn later_layer_overrides_earlier() {
	let cluster = Source::new("cluster")
		.with("index.replica.count", "2")
		.with("index.refresh.interval", "5s");
	let partition = Source::new("index metadata").with("index.replica.count", "4");

	let view = catalog().build_view("logs-0", &[cluster, partition]).unwrap();
	assert_eq!(view.get_int("index.replica.count").unwrap(), 4);
	// Not overridden by the higher layer: nearest earlier source wins.
	assert_eq!(
		view.get_duration("index.refresh.interval").unwrap(),
		Duration::from_secs(5)
	);
}

#[test]
fn within_layer_last_write_wins() {
	let source = Source::new("cluster")
		.with("index.replica.count", "2")
		.with("index.replica.count", "6");
	assert_eq!(source.len(), 1);
	let view = catalog().build_view("logs-0", &[source]).unwrap();
	assert_eq!(view.get_int("index.replica.count").unwrap(), 6);
}

#[test]
fn unknown_key_fails_whole_build() {
	let cluster = Source::new("cluster").with("index.replica.count", "2");
	let bogus = Source::new("index metadata").with("index.replicas", "3");
	let err = catalog()
		.build_view("logs-0", &[cluster, bogus])
		.unwrap_err();
	assert_eq!(
		err,
		SettingsError::UnknownSettingInSource {
			key: "index.replicas".to_string(),
			source: "index metadata".to_string(),
			index: 1,
		}
	);
}

#[test]
fn coercion_failure_is_type_mismatch() {
	let source = Source::new("cluster").with("index.replica.count", "lots");
	let err = catalog().build_view("logs-0", &[source]).unwrap_err();
	assert_eq!(
		err,
		SettingsError::TypeMismatch {
			key: "index.replica.count".to_string(),
			expected: "int".to_string(),
			got: "lots".to_string(),
		}
	);
}

#[test]
fn validator_rejection_fails_build() {
	let source = Source::new("cluster").with("index.replica.count", "20");
	let err = catalog().build_view("logs-0", &[source]).unwrap_err();
	assert_eq!(
		err,
		SettingsError::Validation {
			key: "index.replica.count".to_string(),
			reason: "out of range 0-10: 20".to_string(),
		}
	);
}

#[test]
fn merged_state_must_satisfy_dependency_validators() {
	let source = Source::new("cluster")
		.with("pool.max.threads", "2")
		.with("pool.merge.threads", "6");
	let err = catalog().build_view("logs-0", &[source]).unwrap_err();
	assert_eq!(
		err,
		SettingsError::Validation {
			key: "pool.merge.threads".to_string(),
			reason: "6 exceeds pool.max.threads (2)".to_string(),
		}
	);
}

#[test]
fn derive_layers_overrides_on_resolved_base() {
	let catalog = catalog();
	let base = catalog
		.build_view(
			"logs-0",
			&[Source::new("cluster").with("index.replica.count", "2")],
		)
		.unwrap();

	let overrides = Source::new("index metadata").with("index.replica.count", "7");
	let derived = catalog.derive_view(&base, &overrides).unwrap();

	assert_eq!(derived.get_int("index.replica.count").unwrap(), 7);
	assert_eq!(derived.instance(), "logs-0");
	// Resolved base values, not raw defaults, form the lowest layer.
	assert_eq!(derived.get_int("index.shard.count").unwrap(), 5);
	// The base view is unaffected.
	assert_eq!(base.get_int("index.replica.count").unwrap(), 2);
}

#[test]
fn derive_rejects_unknown_override_keys() {
	let catalog = catalog();
	let base = catalog.build_view("logs-0", &[]).unwrap();
	let overrides = Source::new("index metadata").with("index.bogus", "1");
	let err = catalog.derive_view(&base, &overrides).unwrap_err();
	assert!(matches!(
		err,
		SettingsError::UnknownSettingInSource { ref key, .. } if key == "index.bogus"
	));
}

#[test]
fn deterministic_merge() {
	let sources = [
		Source::new("cluster")
			.with("index.replica.count", "2")
			.with("index.routing.include", "rack1, rack2"),
		Source::new("index metadata").with("index.refresh.interval", "30s"),
	];
	let a = catalog().build_view("logs-0", &sources).unwrap();
	let b = catalog().build_view("logs-0", &sources).unwrap();
	let left: Vec<_> = a.all().map(|(k, v)| (k, v.clone())).collect();
	let right: Vec<_> = b.all().map(|(k, v)| (k, v.clone())).collect();
	assert_eq!(left, right);
}
