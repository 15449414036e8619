//! Process-wide LRU cache of computed birth charts
//!
//! Charts are keyed on the nine numeric birth values only. The native's name
//! and place name never reach the engine, so they are applied to a copy of
//! the cached chart on the way out.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use chrono::{Datelike, NaiveDateTime, Timelike};
use lru::LruCache;

use crate::error::Result;
use crate::models::VedicChart;
use crate::vedic::{compute_birth_chart, BirthDetails};

/// Number of distinct birth tuples kept
pub const CACHE_CAPACITY: usize = 32;

/// Exact-match cache key; floats are compared by bit pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BirthKey {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    latitude: u64,
    longitude: u64,
    timezone_offset: u64,
}

fn float_bits(value: f64) -> u64 {
    // -0.0 == 0.0, so both must hash alike
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

impl From<&BirthDetails> for BirthKey {
    fn from(birth: &BirthDetails) -> Self {
        Self {
            year: birth.year,
            month: birth.month,
            day: birth.day,
            hour: birth.hour,
            minute: birth.minute,
            second: birth.second,
            latitude: float_bits(birth.latitude),
            longitude: float_bits(birth.longitude),
            timezone_offset: float_bits(birth.timezone_offset),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Current number of entries
    pub size: usize,
    pub capacity: usize,
}

/// Bounded memoizing cache handing out shared values
///
/// A hit returns the same `Arc` that was stored. Values are computed outside
/// the lock; if two callers race on one key, the first stored value wins and
/// both receive it. Failed computations are not stored.
pub struct MemoCache<K, V> {
    entries: Mutex<LruCache<K, Arc<V>>>,
}

impl<K: Hash + Eq + std::fmt::Debug, V> MemoCache<K, V> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<K, Arc<V>>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached value for `key`, refreshing its recency
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.lock().get(key).cloned()
    }

    /// Cached value for `key`, or the result of `compute` stored under it
    pub fn get_or_try_insert_with<E>(
        &self,
        key: K,
        compute: impl FnOnce() -> std::result::Result<V, E>,
    ) -> std::result::Result<Arc<V>, E> {
        if let Some(hit) = self.get(&key) {
            tracing::debug!("Chart cache hit for {:?}", key);
            return Ok(hit);
        }

        tracing::debug!("Chart cache miss for {:?}", key);
        let value = Arc::new(compute()?);

        let mut entries = self.lock();
        if let Some(existing) = entries.get(&key) {
            return Ok(Arc::clone(existing));
        }
        if let Some((evicted, _)) = entries.push(key, Arc::clone(&value)) {
            tracing::debug!("Chart cache evicted {:?}", evicted);
        }
        Ok(value)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.lock();
        CacheStats {
            size: entries.len(),
            capacity: entries.cap().get(),
        }
    }
}

static CHART_CACHE: OnceLock<MemoCache<BirthKey, VedicChart>> = OnceLock::new();

fn chart_cache() -> &'static MemoCache<BirthKey, VedicChart> {
    CHART_CACHE.get_or_init(|| {
        MemoCache::new(NonZeroUsize::new(CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    })
}

/// Chart for a birth tuple, computed at most once while it stays cached
pub fn get_birth_chart_cached(birth: &BirthDetails) -> Result<Arc<VedicChart>> {
    chart_cache().get_or_try_insert_with(BirthKey::from(birth), || compute_birth_chart(birth))
}

/// Chart for a birth, labelled with the native's name when one is given
///
/// `location_name` is accepted for callers that have one; it is not part of
/// the chart and does not affect caching.
pub fn get_birth_chart(
    birth_date: NaiveDateTime,
    latitude: f64,
    longitude: f64,
    timezone_offset: f64,
    _location_name: Option<&str>,
    name: Option<&str>,
) -> Result<Arc<VedicChart>> {
    let birth = BirthDetails {
        year: birth_date.year(),
        month: birth_date.month(),
        day: birth_date.day(),
        hour: birth_date.hour(),
        minute: birth_date.minute(),
        second: birth_date.second(),
        latitude,
        longitude,
        timezone_offset,
    };
    let chart = get_birth_chart_cached(&birth)?;

    match name {
        Some(name) if !name.is_empty() => Ok(Arc::new(chart.with_person_name(name))),
        _ => Ok(chart),
    }
}

/// Drop every cached chart
pub fn clear_cache() {
    chart_cache().clear();
}

pub fn cache_stats() -> CacheStats {
    chart_cache().stats()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn cache(capacity: usize) -> MemoCache<u32, String> {
        MemoCache::new(NonZeroUsize::new(capacity).unwrap())
    }

    fn ok(value: &str) -> std::result::Result<String, ()> {
        Ok(value.to_string())
    }

    #[test]
    fn hit_returns_same_arc() {
        let cache = cache(4);
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            ok("chart")
        };
        let first = cache.get_or_try_insert_with(1, compute).unwrap();
        let second = cache.get_or_try_insert_with(1, || ok("other")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.get(), 1);
        assert_eq!(*second, "chart");
    }

    #[test]
    fn errors_are_not_cached() {
        let cache = cache(4);
        let failed: std::result::Result<Arc<String>, &str> =
            cache.get_or_try_insert_with(7, || Err("boom"));
        assert!(failed.is_err());
        assert_eq!(cache.stats().size, 0);
        let value = cache.get_or_try_insert_with(7, || ok("fine")).unwrap();
        assert_eq!(*value, "fine");
    }

    #[test]
    fn least_recently_used_is_evicted() {
        let cache = cache(3);
        let first = cache.get_or_try_insert_with(1, || ok("a")).unwrap();
        cache.get_or_try_insert_with(2, || ok("b")).unwrap();
        cache.get_or_try_insert_with(3, || ok("c")).unwrap();

        // Touch 1 so 2 becomes the oldest
        assert!(Arc::ptr_eq(&first, &cache.get(&1).unwrap()));
        cache.get_or_try_insert_with(4, || ok("d")).unwrap();

        assert!(cache.get(&2).is_none());
        assert!(cache.get(&1).is_some());
        assert_eq!(cache.stats(), CacheStats { size: 3, capacity: 3 });
    }

    #[test]
    fn clear_forces_recompute() {
        let cache = cache(2);
        let first = cache.get_or_try_insert_with(1, || ok("a")).unwrap();
        cache.clear();
        let second = cache.get_or_try_insert_with(1, || ok("a")).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn negative_zero_shares_a_key() {
        let birth = BirthDetails {
            year: 2000,
            month: 1,
            day: 1,
            hour: 12,
            minute: 0,
            second: 0,
            latitude: 0.0,
            longitude: -0.0,
            timezone_offset: 0.0,
        };
        let flipped = BirthDetails {
            latitude: -0.0,
            longitude: 0.0,
            ..birth
        };
        assert_eq!(BirthKey::from(&birth), BirthKey::from(&flipped));

        let moved = BirthDetails {
            latitude: 1e-12,
            ..birth
        };
        assert_ne!(BirthKey::from(&birth), BirthKey::from(&moved));
    }
}
