//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::geom::{lonlat_to_merc, Projection};
use crate::core::layer::{MarkerLayerDef, MarkerStyle};
use crate::core::point::PointRecord;
use crate::render::materializer::materialize;
use crate::render::style::StyleTable;

fn stations_def() -> MarkerLayerDef {
    MarkerLayerDef {
        id: "stations".to_string(),
        name: "Weather stations".to_string(),
        color: "GREEN".to_string(),
        projection: Projection::wgs84(),
        style: None,
    }
}

fn test_points() -> Vec<PointRecord> {
    vec![
        PointRecord::new("p1", 4.0, 52.0),
        PointRecord::new("p2", 5.0, 53.0),
    ]
}

#[test]
fn test_wgs84_to_mercator() {
    let points = test_points();
    let layer = materialize(
        &stations_def(),
        points.iter(),
        &Projection::web_mercator(),
        &StyleTable::default(),
        false,
    )
    .unwrap();

    assert_eq!(layer.id, "stations");
    assert_eq!(layer.feature_count(), 2);
    assert_eq!(layer.projection, Projection::web_mercator());
    let (x, y) = lonlat_to_merc(4.0, 52.0);
    assert_eq!(layer.features[0].x, x);
    assert_eq!(layer.features[0].y, y);
    // the source record travels with the feature
    assert_eq!(layer.features[0].record.id, "p1");
    assert_eq!(layer.features[0].record.lon, 4.0);
}

#[test]
fn test_matching_projection_passthrough() {
    let mut def = stations_def();
    def.projection = Projection::new("EPSG:3857").unwrap();
    let points = vec![PointRecord::new("p1", 445277.96, 6800125.45)];

    // EPSG:3857 and the legacy web mercator code are aliases
    let layer = materialize(
        &def,
        points.iter(),
        &Projection::web_mercator(),
        &StyleTable::default(),
        false,
    )
    .unwrap();
    assert_eq!(layer.features[0].x, 445277.96);
    assert_eq!(layer.features[0].y, 6800125.45);
}

#[test]
fn test_unsupported_conversion() {
    let mut def = stations_def();
    def.projection = Projection::web_mercator();
    let points = test_points();

    let result = materialize(
        &def,
        points.iter(),
        &Projection::wgs84(),
        &StyleTable::default(),
        false,
    );
    assert_eq!(
        result.err(),
        Some("Unsupported coordinate conversion EPSG:900913 -> EPSG:4326".to_string())
    );
}

#[test]
fn test_malformed_point() {
    let mut points = test_points();
    points[1].lat = f64::NAN;

    let result = materialize(
        &stations_def(),
        points.iter(),
        &Projection::web_mercator(),
        &StyleTable::default(),
        false,
    );
    assert_eq!(
        result.err(),
        Some("Layer stations: point p2 has malformed coordinates".to_string())
    );
}

#[test]
fn test_default_style_from_color_token() {
    let points = test_points();
    let layer = materialize(
        &stations_def(),
        points.iter(),
        &Projection::web_mercator(),
        &StyleTable::default(),
        true,
    )
    .unwrap();
    assert_eq!(layer.style.icon, "markers/24/00e03c.png");
    assert!(layer.style.pointer_cursor);
}

#[test]
fn test_explicit_style_wins() {
    let mut def = stations_def();
    def.style = Some(MarkerStyle {
        icon: "img/station.png".to_string(),
        point_radius: 16,
        fill_opacity: 0.8,
        label_offset: (0, 20),
        pointer_cursor: false,
    });
    let points = test_points();
    let layer = materialize(
        &def,
        points.iter(),
        &Projection::web_mercator(),
        &StyleTable::default(),
        true,
    )
    .unwrap();
    assert_eq!(layer.style.icon, "img/station.png");
    assert_eq!(layer.style.point_radius, 16);
}

#[test]
fn test_labels_copied_from_records() {
    let mut points = test_points();
    points[0].selected = true;
    points[0].label = "1".to_string();

    let layer = materialize(
        &stations_def(),
        points.iter(),
        &Projection::web_mercator(),
        &StyleTable::default(),
        false,
    )
    .unwrap();
    assert_eq!(layer.features[0].label, "1");
    assert!(layer.features[0].record.selected);
    assert_eq!(layer.features[1].label, "");
}

#[test]
fn test_empty_point_set() {
    let layer = materialize(
        &stations_def(),
        std::iter::empty::<&PointRecord>(),
        &Projection::web_mercator(),
        &StyleTable::default(),
        false,
    )
    .unwrap();
    assert_eq!(layer.feature_count(), 0);
}
