//! Integration Tests for the Public Cache API
//!
//! Exercises the crate the way an embedding owner would: fetch-or-compute
//! flows, composite keys, a shared cache kept trim by the purge task, and
//! stats reporting.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use memocache::{spawn_purge_task, CacheError, Config, MemoCache, PurgeOptions};
use tokio::sync::RwLock;

// == Helper Functions ==

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("memocache=debug")
        .with_test_writer()
        .try_init();
}

// == Fetch-Or-Compute Flow ==

#[test]
fn fetch_or_compute_pays_the_computation_once() {
    init_tracing();
    let mut cache = MemoCache::new();
    let mut calls = 0;

    for _ in 0..3 {
        let value = cache
            .fetch_with("report".to_string(), || {
                calls += 1;
                Ok("rendered".to_string())
            })
            .cloned();
        assert_eq!(value, Some("rendered".to_string()));
    }

    assert_eq!(calls, 1, "the computation ran more than once");
    assert_eq!(cache.len(), 1);
}

#[test]
fn failed_compute_is_not_cached() {
    let mut cache: MemoCache<String, i64> = MemoCache::new();

    // A callback can bubble any anyhow-compatible error with `?`.
    let result = cache.fetch_with("answer".to_string(), || {
        let parsed: i64 = "forty-two".parse().context("parsing the answer")?;
        Ok(parsed)
    });
    assert!(result.is_none());
    assert_eq!(cache.len(), 0);

    // The explicit failure channel behaves the same way.
    let result = cache.fetch_with("answer".to_string(), || {
        Err(CacheError::Compute("upstream offline".to_string()))
    });
    assert!(result.is_none());
    assert!(cache.fetch(&"answer".to_string()).is_none());
}

#[test]
fn composite_keys_memoize_by_structural_equality() {
    let mut cache = MemoCache::new();
    cache.fetch_with(("part1".to_string(), 7u32), || Ok("v1"));

    let value = cache.fetch(&("part1".to_string(), 7u32)).copied();
    assert_eq!(value, Some("v1"));

    assert!(cache.fetch(&("part1".to_string(), 8u32)).is_none());
    assert_eq!(cache.len(), 1);
}

// == Recency And Purging ==

#[test]
fn purge_trims_to_the_freshest_entries() {
    let mut cache = MemoCache::new();
    for i in 1..=10 {
        cache.store(format!("k{i}"), format!("v{i}"));
    }

    // Touching k1 rescues it from the stale end.
    cache.fetch(&"k1".to_string());
    cache.purge(PurgeOptions::by_size(2));

    let survivors: Vec<String> = cache.iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(survivors, vec!["k10".to_string(), "k1".to_string()]);
}

#[tokio::test]
async fn purge_task_maintains_a_shared_cache() {
    init_tracing();
    let cache = Arc::new(RwLock::new(MemoCache::new()));

    {
        let mut guard = cache.write().await;
        for i in 0..20 {
            guard.store(format!("session-{i}"), i);
        }
        assert_eq!(guard.len(), 20);
    }

    let handle = spawn_purge_task(
        cache.clone(),
        Duration::from_millis(100),
        PurgeOptions::by_age(Duration::from_millis(50)),
    );

    // Let the entries age out and the task run a few times.
    tokio::time::sleep(Duration::from_millis(400)).await;

    assert!(cache.read().await.is_empty());
    handle.abort();
}

#[test]
fn config_defaults_shape_purge_options() {
    let options = Config::default().purge_options();
    assert_eq!(options.max_size, Some(1000));
    assert_eq!(options.max_age, Some(Duration::from_secs(300)));
}

// == Stats Reporting ==

#[test]
fn stats_serialize_for_reporting() {
    let mut cache = MemoCache::new();
    cache.store("k1".to_string(), "v1".to_string());
    cache.fetch(&"k1".to_string());
    cache.fetch(&"missing".to_string());

    let stats = serde_json::to_value(cache.stats()).unwrap();
    assert_eq!(stats["hits"], 1);
    assert_eq!(stats["misses"], 1);
    assert_eq!(stats["total_entries"], 1);
}
