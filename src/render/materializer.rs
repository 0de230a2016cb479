//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::geom::{lonlat_to_merc, Projection};
use crate::core::layer::{MarkerLayerDef, MarkerStyle};
use crate::core::point::PointRecord;
use crate::render::style::StyleTable;

/// Render-ready marker feature in map coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerFeature {
    pub x: f64,
    pub y: f64,
    pub label: String,
    /// Copy of the source record, for use by the calling application
    pub record: PointRecord,
}

/// Render-ready marker layer.
///
/// Immutable once built. Depends only on the layer definition, the point
/// set passed in and the map projection captured at build time - never on
/// selection state.
#[derive(Clone, Debug)]
pub struct RenderLayer {
    pub id: String,
    pub name: String,
    /// Map projection at build time
    pub projection: Projection,
    pub style: MarkerStyle,
    pub features: Vec<MarkerFeature>,
}

impl RenderLayer {
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }
}

/// Build a render layer from a marker layer definition and a point set.
///
/// Pure function of its inputs. Fails for malformed points and for
/// coordinate conversions other than WGS84 to Spherical Mercator.
pub fn materialize<'a, I>(
    def: &MarkerLayerDef,
    points: I,
    map_projection: &Projection,
    styles: &StyleTable,
    pointer_cursor: bool,
) -> Result<RenderLayer, String>
where
    I: IntoIterator<Item = &'a PointRecord>,
{
    let mut features = Vec::new();
    for point in points {
        if !point.lon.is_finite() || !point.lat.is_finite() {
            return Err(format!(
                "Layer {}: point {} has malformed coordinates",
                def.id, point.id
            ));
        }
        let (x, y) = project(&def.projection, map_projection, point.lon, point.lat)?;
        features.push(MarkerFeature {
            x,
            y,
            label: point.label.clone(),
            record: point.clone(),
        });
    }
    let style = match def.style {
        Some(ref style) => style.clone(),
        None => styles.default_style(&def.color, pointer_cursor),
    };
    debug!(
        "Layer {} materialized with {} features",
        def.id,
        features.len()
    );
    Ok(RenderLayer {
        id: def.id.clone(),
        name: def.name.clone(),
        projection: map_projection.clone(),
        style,
        features,
    })
}

fn project(
    source: &Projection,
    map: &Projection,
    lon: f64,
    lat: f64,
) -> Result<(f64, f64), String> {
    if source.matches(map) {
        Ok((lon, lat))
    } else if source.is_wgs84() && map.is_web_mercator() {
        Ok(lonlat_to_merc(lon, lat))
    } else {
        Err(format!(
            "Unsupported coordinate conversion {} -> {}",
            source, map
        ))
    }
}
