//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::geom::Projection;
use crate::datasource::transport::Transport;
use crate::service::engine::{EngineLayer, MapEngine};
use futures_util::future::BoxFuture;
use serde_json::Value as JsonValue;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Transport fixture with canned JSON responses
#[derive(Default)]
pub struct MockTransport {
    responses: HashMap<String, JsonValue>,
    failures: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> MockTransport {
        MockTransport::default()
    }
    pub fn respond(mut self, url: &str, body: JsonValue) -> MockTransport {
        self.responses.insert(url.to_string(), body);
        self
    }
    pub fn fail(mut self, url: &str) -> MockTransport {
        self.failures.insert(url.to_string());
        self
    }
    pub fn call_count(&self, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.as_str() == url)
            .count()
    }
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Transport for MockTransport {
    fn fetch_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<JsonValue, String>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(url.to_string());
            if self.failures.contains(url) {
                return Err(format!("GET {} failed", url));
            }
            self.responses
                .get(url)
                .cloned()
                .ok_or(format!("GET {}: not found", url))
        })
    }
}

/// Rendering engine fixture recording attached layers in z-order
pub struct MockEngine {
    pub layers: Vec<(String, EngineLayer, bool)>,
    pub opacities: HashMap<String, f64>,
    pub base_layer: Option<String>,
    pub hit_test_layers: Vec<String>,
    pub zoom: u8,
    pub projection: Projection,
    pub added: usize,
    pub removed: usize,
}

impl MockEngine {
    pub fn new() -> MockEngine {
        MockEngine {
            layers: Vec::new(),
            opacities: HashMap::new(),
            base_layer: None,
            hit_test_layers: Vec::new(),
            zoom: 4,
            projection: Projection::web_mercator(),
            added: 0,
            removed: 0,
        }
    }
    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom;
    }
    pub fn layer(&self, id: &str) -> Option<&EngineLayer> {
        self.layers
            .iter()
            .find(|(layer_id, _, _)| layer_id == id)
            .map(|(_, layer, _)| layer)
    }
    pub fn layer_count(&self, id: &str) -> usize {
        self.layers.iter().filter(|(layer_id, _, _)| layer_id == id).count()
    }
    pub fn top_layer_id(&self) -> Option<&str> {
        self.layers.last().map(|(id, _, _)| id.as_str())
    }
}

impl MapEngine for MockEngine {
    fn add_layer(&mut self, layer: EngineLayer) {
        self.added += 1;
        self.layers.push((layer.id().to_string(), layer, true));
    }
    fn remove_layer(&mut self, id: &str) -> bool {
        let size = self.layers.len();
        self.layers.retain(|(layer_id, _, _)| layer_id != id);
        if self.layers.len() < size {
            self.removed += 1;
            true
        } else {
            false
        }
    }
    fn has_layer(&self, id: &str) -> bool {
        self.layers.iter().any(|(layer_id, _, _)| layer_id == id)
    }
    fn is_visible(&self, id: &str) -> bool {
        self.layers
            .iter()
            .find(|(layer_id, _, _)| layer_id == id)
            .map(|(_, _, visible)| *visible)
            .unwrap_or(false)
    }
    fn set_visibility(&mut self, id: &str, visible: bool) {
        if let Some(entry) = self.layers.iter_mut().find(|(layer_id, _, _)| layer_id == id) {
            entry.2 = visible;
        }
    }
    fn set_opacity(&mut self, id: &str, opacity: f64) {
        self.opacities.insert(id.to_string(), opacity);
    }
    fn opacity(&self, id: &str) -> Option<f64> {
        self.opacities.get(id).cloned()
    }
    fn set_base_layer(&mut self, id: &str) {
        self.base_layer = Some(id.to_string());
    }
    fn raise_to_top(&mut self, id: &str) {
        if let Some(pos) = self.layers.iter().position(|(layer_id, _, _)| layer_id == id) {
            let entry = self.layers.remove(pos);
            self.layers.push(entry);
        }
    }
    fn zoom(&self) -> u8 {
        self.zoom
    }
    fn projection(&self) -> Projection {
        self.projection.clone()
    }
    fn set_hit_test_layers(&mut self, ids: &[String]) {
        self.hit_test_layers = ids.to_vec();
    }
}
