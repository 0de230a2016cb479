//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::cache::filter::FilterCache;
use crate::core::point::PointRecord;
use crate::datasource::source::{identity_filter, PointFilter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn test_points() -> Vec<PointRecord> {
    (0..10)
        .map(|i| PointRecord::new(&format!("p{}", i), -71.0 + i as f64, 42.0))
        .collect()
}

fn counting_filter(calls: Arc<AtomicUsize>) -> PointFilter {
    Arc::new(move |zoom, points| {
        calls.fetch_add(1, Ordering::SeqCst);
        points
            .iter()
            .filter(|point| point.lon < -71.0 + zoom as f64)
            .cloned()
            .collect()
    })
}

#[test]
fn test_filter_invoked_once_per_zoom() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut cache = FilterCache::new(counting_filter(calls.clone()), test_points());

    let first = cache.compute(4);
    assert_eq!(first.len(), 4);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // repeated calls for the same zoom hit the cache
    for _ in 0..10 {
        let again = cache.compute(4);
        assert!(Arc::ptr_eq(&first, &again));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // a new zoom level invokes the filter once more
    let other = cache.compute(5);
    assert_eq!(other.len(), 5);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    // returning to a previously computed zoom stays cached
    let back = cache.compute(4);
    assert!(Arc::ptr_eq(&first, &back));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_identity_filter_cache() {
    let points = test_points();
    let mut cache = FilterCache::new(identity_filter(), points.clone());
    assert_eq!(cache.point_count(), 10);
    assert_eq!(*cache.compute(0), points);
    assert_eq!(*cache.compute(18), points);
}
