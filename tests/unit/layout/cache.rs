use super::*;
use crate::foundation::core::{CACHE_EPSILON, UNDEFINED};

fn key(w: f32, h: f32, max_w: f32) -> CacheKey {
    CacheKey {
        requested_width: w,
        requested_height: h,
        parent_max_width: max_w,
        parent_direction: Direction::Ltr,
    }
}

fn cached(k: CacheKey) -> CachedLayout {
    CachedLayout {
        key: k,
        layout: Layout {
            width: 10.0,
            height: 20.0,
            ..Layout::default()
        },
    }
}

#[test]
fn undefined_inputs_match_each_other() {
    let c = cached(key(UNDEFINED, UNDEFINED, UNDEFINED));
    let hit = c.probe(&key(UNDEFINED, UNDEFINED, UNDEFINED), CACHE_EPSILON);
    assert_eq!(hit.map(|l| (l.width, l.height)), Some((10.0, 20.0)));
}

#[test]
fn defined_input_never_matches_undefined_one() {
    let c = cached(key(UNDEFINED, UNDEFINED, 300.0));
    assert!(
        c.probe(&key(UNDEFINED, UNDEFINED, UNDEFINED), CACHE_EPSILON)
            .is_none()
    );
    assert!(c.probe(&key(100.0, UNDEFINED, 300.0), CACHE_EPSILON).is_none());
}

#[test]
fn changed_scalar_misses() {
    let c = cached(key(100.0, 50.0, 300.0));
    assert!(c.probe(&key(100.0, 50.0, 300.0), CACHE_EPSILON).is_some());
    assert!(c.probe(&key(100.0, 51.0, 300.0), CACHE_EPSILON).is_none());
    assert!(c.probe(&key(100.0, 50.0, 299.0), CACHE_EPSILON).is_none());
}

#[test]
fn direction_is_part_of_the_key() {
    let c = cached(key(100.0, 50.0, 300.0));
    let mut rtl = key(100.0, 50.0, 300.0);
    rtl.parent_direction = Direction::Rtl;
    assert!(c.probe(&rtl, CACHE_EPSILON).is_none());
}

#[test]
fn key_equality_treats_undefined_as_equal() {
    assert_eq!(key(UNDEFINED, 5.0, UNDEFINED), key(UNDEFINED, 5.0, UNDEFINED));
    assert_ne!(key(UNDEFINED, 5.0, UNDEFINED), key(0.0, 5.0, UNDEFINED));
    assert_ne!(key(1.0, 5.0, UNDEFINED), key(1.000_001, 5.0, UNDEFINED));
}

#[test]
fn natural_and_stretched_entries_live_side_by_side() {
    let natural = key(UNDEFINED, UNDEFINED, UNDEFINED);
    let stretched = key(40.0, 50.0, UNDEFINED);
    let mut cache = LayoutCache::default();
    cache.write(cached(natural));
    cache.write(cached(stretched));

    assert_eq!(cache.probe(&natural, CACHE_EPSILON).map(|(_, newest)| newest), Some(false));
    assert_eq!(cache.probe(&stretched, CACHE_EPSILON).map(|(_, newest)| newest), Some(true));
    assert_eq!(cache.newest().map(|c| c.key), Some(stretched));
}

#[test]
fn third_key_evicts_the_older_entry() {
    let mut cache = LayoutCache::default();
    cache.write(cached(key(1.0, 1.0, 1.0)));
    cache.write(cached(key(2.0, 2.0, 2.0)));
    cache.write(cached(key(1.0, 1.0, 1.0)));
    cache.write(cached(key(3.0, 3.0, 3.0)));

    assert!(cache.probe(&key(2.0, 2.0, 2.0), CACHE_EPSILON).is_none());
    assert!(cache.probe(&key(1.0, 1.0, 1.0), CACHE_EPSILON).is_some());
    assert_eq!(cache.newest().map(|c| c.key), Some(key(3.0, 3.0, 3.0)));

    cache.clear();
    assert!(cache.newest().is_none());
    assert!(cache.probe(&key(1.0, 1.0, 1.0), CACHE_EPSILON).is_none());
}
