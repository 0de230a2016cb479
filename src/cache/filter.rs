//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::point::PointRecord;
use crate::datasource::source::PointFilter;
use std::collections::HashMap;
use std::sync::Arc;

/// Per-zoom cache around the point filter of a data source.
///
/// The first `compute` call for a zoom level invokes the filter, later
/// calls return the stored result. Correct only for pure filters.
pub struct FilterCache {
    filter: PointFilter,
    points: Vec<PointRecord>,
    cache: HashMap<u8, Arc<Vec<PointRecord>>>,
}

impl FilterCache {
    pub fn new(filter: PointFilter, points: Vec<PointRecord>) -> FilterCache {
        FilterCache {
            filter,
            points,
            cache: HashMap::new(),
        }
    }
    /// Points passing the filter at `zoom`
    pub fn compute(&mut self, zoom: u8) -> Arc<Vec<PointRecord>> {
        if let Some(filtered) = self.cache.get(&zoom) {
            return filtered.clone();
        }
        debug!("FilterCache.compute zoom {}", zoom);
        let filtered = Arc::new((self.filter)(zoom, &self.points));
        self.cache.insert(zoom, filtered.clone());
        filtered
    }
    /// Size of the unfiltered point set
    pub fn point_count(&self) -> usize {
        self.points.len()
    }
}
