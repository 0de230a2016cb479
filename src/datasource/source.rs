//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::geom::Projection;
use crate::core::layer::{MarkerLayerDef, MarkerStyle};
use crate::core::point::PointRecord;
use crate::datasource::transport::Transport;
use std::fmt;
use std::sync::Arc;

/// Point filter of a data source.
///
/// Must be a pure function of `(zoom, points)` - the filter cache assumes
/// identical output for identical zoom and never re-invokes it.
pub type PointFilter = Arc<dyn Fn(u8, &[PointRecord]) -> Vec<PointRecord> + Send + Sync>;

/// The default filter: show all points at every zoom level
pub fn identity_filter() -> PointFilter {
    Arc::new(|_zoom, points| points.to_vec())
}

/// Configured provider of point records, rendered as a selectable
/// marker layer.
///
/// The point set is fetched once at widget initialization and never
/// refetched.
#[derive(Clone)]
pub struct PointSource {
    pub def: MarkerLayerDef,
    pub url: String,
    pub filter: PointFilter,
}

impl PointSource {
    pub fn new(
        id: &str,
        name: &str,
        url: &str,
        color: &str,
        projection: Projection,
    ) -> PointSource {
        PointSource {
            def: MarkerLayerDef {
                id: id.to_string(),
                name: name.to_string(),
                color: color.to_string(),
                projection,
                style: None,
            },
            url: url.to_string(),
            filter: identity_filter(),
        }
    }
    pub fn with_filter(mut self, filter: PointFilter) -> PointSource {
        self.filter = filter;
        self
    }
    pub fn with_style(mut self, style: MarkerStyle) -> PointSource {
        self.def.style = Some(style);
        self
    }
    pub fn id(&self) -> &str {
        &self.def.id
    }
    /// Fetch and decode the point set of this source
    pub async fn fetch_points(&self, transport: &dyn Transport) -> Result<Vec<PointRecord>, String> {
        let raw = transport.fetch_json(&self.url).await?;
        let points: Vec<PointRecord> = serde_json::from_value(raw)
            .map_err(|err| format!("{} - invalid point set: {}", self.url, err))?;
        debug!("{}: {} points fetched", self.def.id, points.len());
        Ok(points)
    }
}

impl fmt::Debug for PointSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointSource")
            .field("def", &self.def)
            .field("url", &self.url)
            .finish()
    }
}
