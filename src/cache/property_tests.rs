//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store against a simple model of its behavior.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::cache::{Cache, CacheStore, SetOptions};
use crate::config::CacheConfig;
use crate::keys::{self, TeamQuery};

// == Strategies ==
/// Generates valid cache keys (non-empty)
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_:]{1,32}"
}

/// Generates values from tiny to well above the compression threshold
fn valid_value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,64}",
        "[a-zA-Z0-9 ]{1024,2048}",
    ]
}

fn tag_strategy() -> impl Strategy<Value = String> {
    "(team|league|player):[0-9]{1,2}"
}

fn tags_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(tag_strategy(), 0..4)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    // Small key space so operations actually collide
    let key = "k[0-9]";
    prop_oneof![
        (key, valid_value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key.prop_map(|key| CacheOp::Get { key }),
        key.prop_map(|key| CacheOp::Delete { key }),
    ]
}

fn store() -> CacheStore {
    CacheStore::new(CacheConfig::default())
}

fn store_with_budget(max_memory_bytes: usize) -> CacheStore {
    CacheStore::new(CacheConfig {
        max_memory_bytes,
        ..CacheConfig::default()
    })
}

/// Footprint of a single entry, measured on an empty store.
fn entry_size(key: &str, value: &str) -> usize {
    let mut fresh = store();
    fresh.set(key, value, SetOptions::default()).unwrap();
    fresh.stats().memory_usage
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Hits and misses reported by stats match what get() returned, and
    // hit_rate is hits / (hits + misses).
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = store();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(&key, &value, SetOptions::default()).unwrap();
                }
                CacheOp::Get { key } => match store.get::<String>(&key).unwrap() {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Delete { key } => {
                    store.delete(&key);
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.total_keys, store.len());

        let lookups = expected_hits + expected_misses;
        let expected_rate = if lookups == 0 { 0.0 } else { expected_hits as f64 / lookups as f64 };
        prop_assert!((stats.hit_rate() - expected_rate).abs() < f64::EPSILON);
    }

    // A stored value reads back unchanged, compressed or not.
    #[test]
    fn prop_roundtrip_storage(
        key in valid_key_strategy(),
        value in valid_value_strategy(),
        force_compress in any::<bool>()
    ) {
        let mut store = store();
        let options = SetOptions { force_compress, ..SetOptions::default() };

        store.set(&key, &value, options).unwrap();

        prop_assert_eq!(store.get::<String>(&key).unwrap(), Some(value));
    }

    // delete() reports true once, then false.
    #[test]
    fn prop_delete_is_idempotent(key in valid_key_strategy(), value in valid_value_strategy()) {
        let mut store = store();
        store.set(&key, &value, SetOptions::default()).unwrap();

        prop_assert!(store.delete(&key));
        prop_assert!(!store.delete(&key));
        prop_assert!(store.get::<String>(&key).unwrap().is_none());
        prop_assert_eq!(store.stats().memory_usage, 0);
    }

    // clear_by_tags removes exactly the entries sharing a tag with the query.
    #[test]
    fn prop_tag_invalidation_matches_model(
        entries in prop::collection::vec(tags_strategy(), 1..20),
        query in prop::collection::vec(tag_strategy(), 1..3)
    ) {
        let mut store = store();
        for (i, tags) in entries.iter().enumerate() {
            store.set(&format!("k{}", i), &i, SetOptions::new().tags(tags.clone())).unwrap();
        }

        let query_set: HashSet<&String> = query.iter().collect();
        let expected_removed: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, tags)| tags.iter().any(|t| query_set.contains(t)))
            .map(|(i, _)| i)
            .collect();

        let removed = store.clear_by_tags(&query);
        prop_assert_eq!(removed, expected_removed.len());

        for i in 0..entries.len() {
            let key = format!("k{}", i);
            prop_assert_eq!(store.has(&key), !expected_removed.contains(&i));
        }
    }

    // Eviction always takes the oldest writes: survivors are a suffix of
    // the insertion sequence, and usage never overshoots the budget by more
    // than the entry just written.
    #[test]
    fn prop_eviction_keeps_newest_writes(
        values in prop::collection::vec("[a-z]{1,80}", 1..40),
        budget in 100usize..1000
    ) {
        let mut store = store_with_budget(budget);
        let keys: Vec<String> = (0..values.len()).map(|i| format!("key{:03}", i)).collect();

        for (key, value) in keys.iter().zip(&values) {
            store.set(key, value, SetOptions::default()).unwrap();
            prop_assert!(store.stats().memory_usage <= budget + entry_size(key, value));
        }

        let present: Vec<bool> = keys.iter().map(|k| store.has(k)).collect();
        let first_present = present.iter().position(|p| *p).unwrap_or(present.len());
        prop_assert!(present[first_present..].iter().all(|p| *p), "survivors must be a suffix");
        prop_assert_eq!(store.stats().evictions as usize, first_present);
        prop_assert!(store.has(keys.last().unwrap()));
    }

    // Overwriting a key leaves a single entry holding the new value.
    #[test]
    fn prop_overwrite_semantics(
        key in valid_key_strategy(),
        value1 in valid_value_strategy(),
        value2 in valid_value_strategy()
    ) {
        let mut store = store();

        store.set(&key, &value1, SetOptions::default()).unwrap();
        store.set(&key, &value2, SetOptions::default()).unwrap();

        prop_assert_eq!(store.len(), 1);
        prop_assert_eq!(store.stats().memory_usage, entry_size(&key, &value2));
        prop_assert_eq!(store.get::<String>(&key).unwrap(), Some(value2));
    }

    // Team keys are equal exactly when the queries are equal.
    #[test]
    fn prop_team_keys_collide_only_for_equal_queries(
        id_a in 0u32..50, stats_a in any::<bool>(), squad_a in any::<bool>(), season_a in proptest::option::of(2000u16..2030),
        id_b in 0u32..50, stats_b in any::<bool>(), squad_b in any::<bool>(), season_b in proptest::option::of(2000u16..2030)
    ) {
        let a = TeamQuery { include_stats: stats_a, include_squad: squad_a, season: season_a };
        let b = TeamQuery { include_stats: stats_b, include_squad: squad_b, season: season_b };

        let same_query = id_a == id_b && a == b;
        prop_assert_eq!(keys::team(id_a, &a) == keys::team(id_b, &b), same_query);
    }
}

// == Property Test for Error Response Format ==
// This tests the CacheError -> HTTP response conversion

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // Every error variant renders as JSON with a string "error" field
    // carrying the error's message.
    #[test]
    fn prop_error_response_format(error_msg in "[a-zA-Z0-9 _-]{1,100}") {
        use crate::error::CacheError;
        use axum::body::to_bytes;
        use axum::response::IntoResponse;

        let error_variants = vec![
            CacheError::Serialization(error_msg.clone()),
            CacheError::Compression(error_msg.clone()),
            CacheError::InvalidRequest(error_msg.clone()),
            CacheError::NotFound(error_msg.clone()),
            CacheError::Internal(error_msg.clone()),
        ];

        for error in error_variants {
            let expected_msg = error.to_string();
            let response = error.into_response();

            let content_type = response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok());
            prop_assert!(content_type.is_some_and(|ct| ct.contains("application/json")));

            let bytes = tokio_test::block_on(to_bytes(response.into_body(), usize::MAX)).unwrap();
            let json: serde_json::Value = serde_json::from_slice(&bytes)
                .expect("Response body should be valid JSON");

            prop_assert_eq!(json["error"].as_str(), Some(expected_msg.as_str()));
        }
    }
}

// == Property Test for Concurrent Operation Correctness ==
// This tests shared access through cloned Cache handles

proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    // Concurrent reads only ever observe complete values that some writer
    // stored, and the accounting stays consistent afterwards.
    #[test]
    fn prop_concurrent_operation_correctness(
        operations in prop::collection::vec(cache_op_strategy(), 10..50)
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();

        rt.block_on(async {
            let cache = Cache::new(CacheConfig::default());
            let written: HashSet<String> = operations
                .iter()
                .filter_map(|op| match op {
                    CacheOp::Set { value, .. } => Some(value.clone()),
                    _ => None,
                })
                .collect();

            let mut handles = vec![];
            for op in operations {
                let cache = cache.clone();
                handles.push(tokio::spawn(async move {
                    match op {
                        CacheOp::Set { key, value } => {
                            cache.set(&key, &value, SetOptions::default()).await.unwrap();
                            None
                        }
                        CacheOp::Get { key } => cache.get::<String>(&key).await.unwrap(),
                        CacheOp::Delete { key } => {
                            cache.delete(&key).await;
                            None
                        }
                    }
                }));
            }

            for handle in handles {
                let observed = handle.await.expect("Task should not panic");
                if let Some(value) = observed {
                    prop_assert!(written.contains(&value), "read a value nobody wrote");
                }
            }

            let stats = cache.stats().await;
            prop_assert_eq!(stats.total_keys, cache.keys(None).await.unwrap().len());
            prop_assert!(stats.hit_rate() >= 0.0 && stats.hit_rate() <= 1.0);

            cache.clear().await;
            prop_assert_eq!(cache.stats().await.memory_usage, 0);
            Ok(())
        })?;
    }
}

// == TTL Properties ==
// Fewer cases: each one sleeps past an expiry boundary

proptest! {
    #![proptest_config(ProptestConfig::with_cases(3))]

    // After the TTL has elapsed get() misses even though no sweep ran.
    #[test]
    fn prop_ttl_expiration_behavior(key in valid_key_strategy(), value in valid_value_strategy()) {
        let mut store = store();

        store.set(&key, &value, SetOptions::new().ttl(1)).unwrap();
        prop_assert_eq!(store.get::<String>(&key).unwrap(), Some(value));

        std::thread::sleep(std::time::Duration::from_millis(1100));

        let misses_before = store.stats().misses;
        prop_assert!(store.get::<String>(&key).unwrap().is_none());
        prop_assert_eq!(store.stats().misses, misses_before + 1);
    }
}
