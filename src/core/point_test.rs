//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::point::{PointHash, PointRecord};

fn test_points() -> Vec<PointRecord> {
    vec![
        PointRecord::new("p1", -71.06, 42.36),
        PointRecord::new("p2", -72.54, 41.75),
        PointRecord::new("p3", -70.25, 43.66),
    ]
}

#[test]
fn test_point_deserialization() {
    let points: Vec<PointRecord> = serde_json::from_value(json!([
        {"id": "p1", "lon": -71.06, "lat": 42.36, "weight": 5, "station": "Boston"}
    ]))
    .unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].id, "p1");
    assert_eq!(points[0].lon, -71.06);
    assert_eq!(points[0].attributes.get("weight"), Some(&json!(5)));
    assert_eq!(points[0].attributes.get("station"), Some(&json!("Boston")));
    // derived fields are never part of the source data
    assert!(!points[0].selected);
    assert_eq!(points[0].label, "");
}

#[test]
fn test_hash_resets_derived_fields() {
    let mut records = test_points();
    records[0].selected = true;
    records[0].label = "stale".to_string();

    let hash = PointHash::from_records(&records);
    let point = hash.point("p1").unwrap();
    assert!(!point.selected);
    assert_eq!(point.label, "");
    assert_eq!(hash.len(), 3);
}

#[test]
fn test_lookup_returns_defensive_copy() {
    let mut hash = PointHash::from_records(&test_points());

    let mut copy = hash.point("p2").unwrap();
    copy.selected = true;
    copy.label = "99".to_string();
    copy.lat = 0.0;

    let canonical = hash.point("p2").unwrap();
    assert!(!canonical.selected);
    assert_eq!(canonical.label, "");
    assert_eq!(canonical.lat, 41.75);

    // mutation goes through the hash, not through copies
    assert!(hash.mark_selected("p2", "1"));
    let canonical = hash.point("p2").unwrap();
    assert!(canonical.selected);
    assert_eq!(canonical.label, "1");
}

#[test]
fn test_selection_flags() {
    let mut hash = PointHash::from_records(&test_points());

    assert!(hash.mark_selected("p1", "1"));
    assert!(hash.point("p1").unwrap().selected);

    assert!(hash.clear_selected("p1"));
    let point = hash.point("p1").unwrap();
    assert!(!point.selected);
    assert_eq!(point.label, "");

    assert!(hash.mark_selected("p3", "1"));
    assert!(hash.set_label("p3", "A"));
    assert_eq!(hash.point("p3").unwrap().label, "A");

    assert!(!hash.mark_selected("unknown", "1"));
    assert!(!hash.clear_selected("unknown"));
    assert!(!hash.set_label("unknown", "A"));
    assert!(!hash.contains("unknown"));
}
