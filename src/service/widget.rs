//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::cache::filter::FilterCache;
use crate::cache::layer_cache::LayerCache;
use crate::core::config::MapCfg;
use crate::core::geom::Projection;
use crate::core::layer::{BaseLayer, MarkerLayerDef, TileBase};
use crate::core::point::{PointHash, PointRecord};
use crate::datasource::source::PointSource;
use crate::datasource::transport::Transport;
use crate::render::materializer::{materialize, RenderLayer};
use crate::render::style::StyleTable;
use crate::service::engine::{EngineLayer, MapEngine};
use crate::service::selection::SelectionSet;
use crate::service::translate::{translate, LayerSet, MapOptions, TranslatedConfig};
use futures_util::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;

/// Reserved id of the selection overlay layer
pub const SELECTION_LAYER_ID: &str = "lyr_selected";
pub const SELECTION_LAYER_NAME: &str = "Selected points";

pub type SelectCallback = Box<dyn Fn(&PointRecord) + Send>;

pub struct WidgetOptions {
    /// Raw configuration document; translated at widget creation and
    /// merged over the programmatic layer set
    pub config: Option<MapCfg>,
    pub layers: LayerSet,
    pub map_options: MapOptions,
    pub icon_path: Option<String>,
    /// Marker color token of the selection overlay
    pub selected_color: String,
    /// Invoked with a copy of the selected record on hit-test selection
    pub select_callback: Option<SelectCallback>,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        let mut layers = LayerSet::default();
        layers.bases.push(BaseLayer::Tile(TileBase::osm("osm")));
        WidgetOptions {
            config: None,
            layers,
            map_options: MapOptions::default(),
            icon_path: None,
            selected_color: "BLUE".to_string(),
            select_callback: None,
        }
    }
}

/// Map display widget core.
///
/// Owns the per-source point hashes and filter caches, the zoom-indexed
/// layer cache and the selection state. All methods run synchronously to
/// completion; the only suspension points are configuration translation
/// and the initial point set fetch during `create`.
pub struct MapWidget<E: MapEngine> {
    engine: E,
    map_options: MapOptions,
    layers: LayerSet,
    point_hashes: HashMap<String, PointHash>,
    filters: HashMap<String, FilterCache>,
    cache: LayerCache,
    selection: SelectionSet,
    selection_layer: Option<Arc<RenderLayer>>,
    styles: StyleTable,
    selected_color: String,
    select_callback: Option<SelectCallback>,
}

impl<E: MapEngine> MapWidget<E> {
    /// Create the widget: translate the configuration document (if any),
    /// attach base layers, fetch all point sets and run the initial
    /// rescale.
    ///
    /// A failed configuration translation rejects widget creation as a
    /// whole. A failed point set fetch is isolated: the source
    /// contributes no points, all other sources proceed.
    pub async fn create(
        engine: E,
        transport: &dyn Transport,
        mut options: WidgetOptions,
    ) -> Result<MapWidget<E>, String> {
        let mut layers = std::mem::take(&mut options.layers);
        let mut map_options = options.map_options.clone();
        if let Some(cfg) = options.config.take() {
            let translated = translate(&cfg, transport).await?;
            merge_translated(&mut layers, &mut map_options, translated);
        }
        let styles = match options.icon_path {
            Some(ref path) => StyleTable::with_icon_path(path),
            None => StyleTable::default(),
        };
        let mut widget = MapWidget {
            engine,
            map_options,
            layers,
            point_hashes: HashMap::new(),
            filters: HashMap::new(),
            cache: LayerCache::new(),
            selection: SelectionSet::new(),
            selection_layer: None,
            styles,
            selected_color: options.selected_color,
            select_callback: options.select_callback,
        };
        widget.init(transport).await;
        Ok(widget)
    }

    async fn init(&mut self, transport: &dyn Transport) {
        let default_base = self
            .layers
            .bases
            .iter()
            .find(|base| base.is_default())
            .or(self.layers.bases.first())
            .map(|base| base.id().to_string());

        for base in &self.layers.bases {
            self.engine.add_layer(EngineLayer::Base(base.clone()));
        }

        // Fetch all point sets behind a join barrier, isolating failures
        // per source
        let sources = self.layers.sources.clone();
        let fetches = sources.iter().map(|source| async move {
            (source.id().to_string(), source.fetch_points(transport).await)
        });
        for (id, result) in join_all(fetches).await {
            match result {
                Ok(points) => {
                    let source = sources.iter().find(|s| s.id() == id).unwrap();
                    self.point_hashes
                        .insert(id.clone(), PointHash::from_records(&points));
                    self.filters
                        .insert(id, FilterCache::new(source.filter.clone(), points));
                }
                Err(err) => {
                    error!("Point set of layer {} not available: {}", id, err);
                }
            }
        }

        self.rescale();
        if let Some(ref id) = default_base {
            self.set_base_layer(id);
        }
    }

    /// Zoom-change notification entry point
    pub fn on_zoom_changed(&mut self) {
        self.rescale();
    }

    /// Zoom transition protocol: materialize (or recall from cache) the
    /// marker layer of every point source for the current zoom. Attached
    /// source layers with a set visibility flag are detached first, so a
    /// source is never attached twice. Detached layer objects stay
    /// resident in the cache.
    pub fn rescale(&mut self) {
        let zoom = self.engine.zoom();
        let projection = self.engine.projection();
        let mut active: Vec<String> = Vec::new();
        let sources = self.layers.sources.clone();
        for source in &sources {
            let id = source.id();
            if !self.filters.contains_key(id) {
                // no point set loaded (fetch failed or still degraded)
                continue;
            }
            let mut to_add = false;
            if self.engine.has_layer(id) {
                if self.engine.is_visible(id) {
                    self.engine.remove_layer(id);
                    to_add = true;
                }
            } else {
                to_add = true;
            }
            if to_add {
                match self.cache_layer(source, zoom, &projection) {
                    Ok(layer) => {
                        self.engine.add_layer(EngineLayer::Markers(layer));
                        active.push(id.to_string());
                    }
                    Err(err) => {
                        error!("Layer {} not materialized at zoom {}: {}", id, zoom, err);
                    }
                }
            }
        }
        if self.selection_layer.is_some() {
            self.engine.raise_to_top(SELECTION_LAYER_ID);
            active.push(SELECTION_LAYER_ID.to_string());
        }
        self.engine.set_hit_test_layers(&active);
    }

    /// Cached marker layer of a source at a zoom level, materializing on
    /// miss. The map projection is captured at first build for that zoom;
    /// a cache hit returns the stored layer unchanged even if the
    /// projection changed since.
    fn cache_layer(
        &mut self,
        source: &PointSource,
        zoom: u8,
        projection: &Projection,
    ) -> Result<Arc<RenderLayer>, String> {
        if let Some(layer) = self.cache.get(source.id(), zoom) {
            return Ok(layer);
        }
        let filter = self
            .filters
            .get_mut(source.id())
            .ok_or(format!("No point set loaded for layer {}", source.id()))?;
        let points = filter.compute(zoom);
        let layer = materialize(
            &source.def,
            points.iter(),
            projection,
            &self.styles,
            self.select_callback.is_some(),
        )?;
        Ok(self.cache.insert(source.id(), zoom, layer))
    }

    /// Copy of a canonical point record with its current derived fields
    pub fn point(&self, source_id: &str, point_id: &str) -> Option<PointRecord> {
        self.point_hashes
            .get(source_id)
            .and_then(|hash| hash.point(point_id))
    }

    /// Select a point. No-op if the point is already selected or unknown.
    /// The assigned label is the selection count before insertion plus
    /// one. Returns a copy of the labeled record.
    pub fn select_point(&mut self, source_id: &str, point_id: &str) -> Option<PointRecord> {
        if self.selection.contains(point_id) {
            return None;
        }
        let label = self.selection.next_label();
        let hash = self.point_hashes.get_mut(source_id)?;
        let mut point = hash.point(point_id)?;
        hash.mark_selected(point_id, &label);
        point.selected = true;
        point.label = label;
        self.selection.insert(point.clone());
        self.rebuild_overlay();
        Some(point)
    }

    /// Unselect a point (no-op if not selected). Labels of the remaining
    /// selected points are not renumbered.
    pub fn unselect_point(&mut self, point_id: &str) {
        if self.selection.remove(point_id) {
            for hash in self.point_hashes.values_mut() {
                if hash.clear_selected(point_id) {
                    break;
                }
            }
        }
        self.rebuild_overlay();
    }

    /// Overwrite the label of a selected point. No-op if the point is
    /// not selected.
    pub fn set_label(&mut self, point_id: &str, label: &str) {
        if !self.selection.set_label(point_id, label) {
            debug!("set_label for unselected point {}", point_id);
            return;
        }
        for hash in self.point_hashes.values_mut() {
            if hash.set_label(point_id, label) {
                break;
            }
        }
        self.rebuild_overlay();
    }

    /// Hit-test entry point of the selection control
    pub fn notify_point_clicked(&mut self, layer_id: &str, point_id: &str) {
        if self.selection.contains(point_id) {
            return;
        }
        if let Some(point) = self.select_point(layer_id, point_id) {
            if let Some(ref callback) = self.select_callback {
                callback(&point);
            }
        }
    }

    /// Rebuild the selection overlay from the full selection snapshot.
    ///
    /// The overlay is materialized like any other marker layer (with the
    /// always-show filter), replaces a previously attached overlay of the
    /// reserved id, is re-attached topmost, and the hit-test layer list
    /// is rebound to every currently visible cached source layer plus
    /// the overlay.
    fn rebuild_overlay(&mut self) {
        self.engine.remove_layer(SELECTION_LAYER_ID);

        let def = MarkerLayerDef {
            id: SELECTION_LAYER_ID.to_string(),
            name: SELECTION_LAYER_NAME.to_string(),
            color: self.selected_color.clone(),
            projection: Projection::wgs84(),
            style: None,
        };
        let projection = self.engine.projection();
        let selected: Vec<PointRecord> = self.selection.iter().cloned().collect();
        match materialize(
            &def,
            selected.iter(),
            &projection,
            &self.styles,
            self.select_callback.is_some(),
        ) {
            Ok(layer) => {
                let layer = Arc::new(layer);
                self.engine.add_layer(EngineLayer::Markers(layer.clone()));
                self.engine.raise_to_top(SELECTION_LAYER_ID);
                self.selection_layer = Some(layer);
            }
            Err(err) => {
                error!("Selection overlay not materialized: {}", err);
            }
        }

        let zoom = self.engine.zoom();
        let mut active: Vec<String> = Vec::new();
        let sources = self.layers.sources.clone();
        for source in &sources {
            if self.engine.has_layer(source.id()) && self.engine.is_visible(source.id()) {
                if self.cache_layer(source, zoom, &projection).is_ok() {
                    active.push(source.id().to_string());
                }
            }
        }
        active.push(SELECTION_LAYER_ID.to_string());
        self.engine.set_hit_test_layers(&active);
    }

    /// Switch the base layer if `id` names a configured base layer
    pub fn set_base_layer(&mut self, id: &str) {
        if self.layers.bases.iter().any(|base| base.id() == id) {
            self.engine.set_base_layer(id);
        }
    }

    /// Toggle layer visibility. Shown overlays are attached lazily;
    /// showing a point source rescales so its markers materialize for
    /// the current zoom.
    pub fn set_layer_visibility(&mut self, id: &str, visible: bool) {
        let mut to_scale = false;
        if visible {
            self.add_overlay(id);
            to_scale = self.layers.sources.iter().any(|source| source.id() == id);
        }
        if !self.engine.has_layer(id) {
            return;
        }
        self.engine.set_visibility(id, visible);
        if to_scale {
            self.rescale();
        }
    }

    fn add_overlay(&mut self, id: &str) {
        if !self.engine.has_layer(id) {
            if let Some(overlay) = self.layers.overlays.get(id) {
                self.engine.add_layer(EngineLayer::Overlay(overlay.clone()));
            }
        }
    }

    pub fn set_layer_opacity(&mut self, id: &str, opacity: f64) {
        self.engine.set_opacity(id, opacity);
    }

    pub fn layer_opacity(&self, id: &str) -> Option<f64> {
        self.engine.opacity(id)
    }

    pub fn map_options(&self) -> &MapOptions {
        &self.map_options
    }

    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    pub fn selection_count(&self) -> usize {
        self.selection.len()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

/// Merge a translation result over the programmatic widget layers:
/// translated collections replace their counterparts when non-empty,
/// async map option contributions are shallow-merged, point sources
/// stay programmatic.
fn merge_translated(
    layers: &mut LayerSet,
    map_options: &mut MapOptions,
    translated: TranslatedConfig,
) {
    if !translated.layers.bases.is_empty() {
        layers.bases = translated.layers.bases;
    }
    layers.overlays.extend(translated.layers.overlays);
    if !translated.layers.groups.is_empty() {
        layers.groups = translated.layers.groups;
    }
    map_options.merge(&translated.map_options);
}
