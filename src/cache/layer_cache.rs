//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::render::materializer::RenderLayer;
use std::collections::HashMap;
use std::sync::Arc;

/// Cache of materialized marker layers, keyed by data source id and
/// zoom level.
///
/// Entries are never evicted or invalidated: a layer built for
/// (source, zoom) stays valid for the widget's lifetime, trading memory
/// for determinism across repeated zoom transitions.
#[derive(Default)]
pub struct LayerCache {
    cache: HashMap<String, HashMap<u8, Arc<RenderLayer>>>,
}

impl LayerCache {
    pub fn new() -> LayerCache {
        LayerCache {
            cache: HashMap::new(),
        }
    }
    pub fn get(&self, id: &str, zoom: u8) -> Option<Arc<RenderLayer>> {
        self.cache.get(id).and_then(|layers| layers.get(&zoom)).cloned()
    }
    pub fn contains(&self, id: &str, zoom: u8) -> bool {
        self.cache
            .get(id)
            .map(|layers| layers.contains_key(&zoom))
            .unwrap_or(false)
    }
    /// Store a built layer and return the shared handle
    pub fn insert(&mut self, id: &str, zoom: u8, layer: RenderLayer) -> Arc<RenderLayer> {
        debug!("LayerCache.insert {}/{}", id, zoom);
        let layer = Arc::new(layer);
        self.cache
            .entry(id.to_string())
            .or_insert_with(HashMap::new)
            .insert(zoom, layer.clone());
        layer
    }
    /// Total number of cached (source, zoom) entries
    pub fn len(&self) -> usize {
        self.cache.values().map(|layers| layers.len()).sum()
    }
}
