use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serial_test::serial;

use jyotish::chart_cache::{
    cache_stats, clear_cache, get_birth_chart, get_birth_chart_cached, CACHE_CAPACITY,
};
use jyotish::error::ChartError;
use jyotish::vedic::BirthDetails;

fn karmala() -> BirthDetails {
    BirthDetails {
        year: 1996,
        month: 7,
        day: 4,
        hour: 9,
        minute: 10,
        second: 0,
        latitude: 18.404,
        longitude: 75.195,
        timezone_offset: 5.5,
    }
}

fn birth_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1996, 7, 4)
        .unwrap()
        .and_hms_opt(9, 10, 0)
        .unwrap()
}

#[test]
#[serial]
fn same_tuple_hits_the_cache() {
    clear_cache();
    let first = get_birth_chart_cached(&karmala()).unwrap();
    let second = get_birth_chart_cached(&karmala()).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache_stats().size, 1);
}

#[test]
#[serial]
fn one_field_apart_is_a_miss() {
    clear_cache();
    let first = get_birth_chart_cached(&karmala()).unwrap();
    let shifted = BirthDetails {
        second: 1,
        ..karmala()
    };
    let second = get_birth_chart_cached(&shifted).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));

    let moved = BirthDetails {
        timezone_offset: 5.0,
        ..karmala()
    };
    let third = get_birth_chart_cached(&moved).unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(cache_stats().size, 3);
}

#[test]
#[serial]
fn clear_drops_cached_charts() {
    clear_cache();
    let first = get_birth_chart_cached(&karmala()).unwrap();
    clear_cache();
    assert_eq!(cache_stats().size, 0);
    let second = get_birth_chart_cached(&karmala()).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
}

#[test]
#[serial]
fn name_is_applied_to_a_copy() {
    clear_cache();
    let named = get_birth_chart(birth_date(), 18.404, 75.195, 5.5, Some("Karmala"), Some("Bhampu"))
        .unwrap();
    assert_eq!(named.person.name.as_deref(), Some("Bhampu"));

    let cached = get_birth_chart_cached(&karmala()).unwrap();
    assert!(!Arc::ptr_eq(&named, &cached));
    assert_eq!(cached.person.name, None);

    let unnamed = get_birth_chart(birth_date(), 18.404, 75.195, 5.5, None, Some("")).unwrap();
    assert!(Arc::ptr_eq(&unnamed, &cached));
    assert_eq!(cache_stats().size, 1);
}

#[test]
#[serial]
fn location_name_does_not_split_the_key() {
    clear_cache();
    let a = get_birth_chart(birth_date(), 18.404, 75.195, 5.5, Some("Karmala"), None).unwrap();
    let b = get_birth_chart(birth_date(), 18.404, 75.195, 5.5, Some("Pune"), None).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
#[serial]
fn oldest_chart_is_evicted_past_capacity() {
    clear_cache();
    let at_minute = |minute: u32| BirthDetails {
        hour: 10,
        minute,
        ..karmala()
    };

    let oldest = get_birth_chart_cached(&at_minute(0)).unwrap();
    let kept = get_birth_chart_cached(&at_minute(1)).unwrap();
    for minute in 2..CACHE_CAPACITY as u32 {
        get_birth_chart_cached(&at_minute(minute)).unwrap();
    }
    assert_eq!(cache_stats().size, CACHE_CAPACITY);

    // Refresh minute 1, leaving minute 0 as the least recently used
    assert!(Arc::ptr_eq(&kept, &get_birth_chart_cached(&at_minute(1)).unwrap()));
    get_birth_chart_cached(&at_minute(CACHE_CAPACITY as u32)).unwrap();
    assert_eq!(cache_stats().size, CACHE_CAPACITY);

    assert!(Arc::ptr_eq(&kept, &get_birth_chart_cached(&at_minute(1)).unwrap()));
    let recomputed = get_birth_chart_cached(&at_minute(0)).unwrap();
    assert!(!Arc::ptr_eq(&oldest, &recomputed));
}

#[test]
#[serial]
fn failures_are_surfaced_and_not_cached() {
    clear_cache();
    let bad_date = BirthDetails {
        day: 32,
        ..karmala()
    };
    assert!(matches!(
        get_birth_chart_cached(&bad_date),
        Err(ChartError::InvalidDateTime(_))
    ));

    let bad_place = BirthDetails {
        latitude: f64::NAN,
        ..karmala()
    };
    assert!(matches!(
        get_birth_chart_cached(&bad_place),
        Err(ChartError::InvalidCoordinates { .. })
    ));
    assert_eq!(cache_stats().size, 0);
}
