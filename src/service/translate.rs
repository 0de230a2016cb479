//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::{BaseCfg, Config, MapCfg, OverlayCfg};
use crate::core::geom::Projection;
use crate::core::layer::{
    ArcGisBase, BaseLayer, LayerGroup, Overlay, RestOverlay, TileBase, WmsOverlay,
};
use crate::datasource::source::PointSource;
use crate::datasource::transport::Transport;
use futures_util::future::{try_join_all, BoxFuture};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Map construction options handed to the rendering engine
#[derive(Clone, Debug, PartialEq)]
pub struct MapOptions {
    /// Ground units of the map projection
    pub units: String,
    pub zoom: u8,
    pub center: (f64, f64),
    pub projection: Projection,
    /// Units-per-pixel per zoom level, derived from base layer metadata
    pub resolutions: Option<Vec<f64>>,
}

impl Default for MapOptions {
    fn default() -> Self {
        MapOptions {
            units: "m".to_string(),
            zoom: 4,
            center: (-10500000.0, 4500000.0),
            projection: Projection::web_mercator(),
            resolutions: None,
        }
    }
}

/// Map option contributions of asynchronous base layer translations,
/// shallow-merged over the synchronous options
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapOptionsPatch {
    pub resolutions: Option<Vec<f64>>,
}

impl MapOptions {
    pub fn merge(&mut self, patch: &MapOptionsPatch) {
        if let Some(ref resolutions) = patch.resolutions {
            self.resolutions = Some(resolutions.clone());
        }
    }
}

impl MapOptionsPatch {
    fn merge(&mut self, patch: MapOptionsPatch) {
        if patch.resolutions.is_some() {
            self.resolutions = patch.resolutions;
        }
    }
}

/// Layers of the widget: base layers, point sources, service overlays
/// and overlay groups
#[derive(Clone, Debug, Default)]
pub struct LayerSet {
    pub bases: Vec<BaseLayer>,
    pub sources: Vec<PointSource>,
    pub overlays: HashMap<String, Overlay>,
    pub groups: Vec<LayerGroup>,
}

/// Result of a completed configuration translation
#[derive(Clone, Debug, Default)]
pub struct TranslatedConfig {
    pub map_options: MapOptionsPatch,
    pub layers: LayerSet,
}

/// Contribution of one settled asynchronous base layer request
struct AsyncBase {
    layer: BaseLayer,
    map_options: MapOptionsPatch,
}

/// Transient aggregate of the synchronous translation results and the
/// outstanding metadata requests. Consumed by the join.
struct PendingConfig<'a> {
    layers: LayerSet,
    map_options: MapOptionsPatch,
    requests: Vec<BoxFuture<'a, Result<AsyncBase, String>>>,
}

/// Translate a raw configuration document into renderable layer
/// descriptors and map options.
///
/// Base layers requiring capability lookups are resolved behind a join
/// barrier: all outstanding requests must succeed before the merged
/// configuration is returned, a single failure rejects the whole
/// translation with no partial result. No retries are performed.
pub async fn translate<'a>(
    cfg: &MapCfg,
    transport: &'a dyn Transport,
) -> Result<TranslatedConfig, String> {
    let PendingConfig {
        mut layers,
        mut map_options,
        requests,
    } = translate_sync(cfg, transport)?;
    if requests.is_empty() {
        return Ok(TranslatedConfig {
            map_options,
            layers,
        });
    }
    info!(
        "Configuration translation waiting for {} metadata request(s)",
        requests.len()
    );
    let contributions = try_join_all(requests).await?;
    for contribution in contributions {
        layers.bases.push(contribution.layer);
        map_options.merge(contribution.map_options);
    }
    Ok(TranslatedConfig {
        map_options,
        layers,
    })
}

fn translate_sync<'a>(
    cfg: &MapCfg,
    transport: &'a dyn Transport,
) -> Result<PendingConfig<'a>, String> {
    let mut pending = PendingConfig {
        layers: LayerSet::default(),
        map_options: MapOptionsPatch::default(),
        requests: Vec::new(),
    };

    for base_cfg in &cfg.bases {
        translate_base(base_cfg, &mut pending, transport)?;
    }

    for overlay_cfg in &cfg.overlays {
        match translate_overlay(overlay_cfg)? {
            Some(overlay) => {
                pending
                    .layers
                    .overlays
                    .insert(overlay.id().to_string(), overlay);
            }
            None => warn!(
                "Overlay {} with unsupported type ignored",
                overlay_cfg.id
            ),
        }
    }

    for group_cfg in &cfg.groups {
        pending.layers.groups.push(LayerGroup::from_config(group_cfg)?);
    }

    Ok(pending)
}

fn translate_base<'a>(
    base_cfg: &BaseCfg,
    pending: &mut PendingConfig<'a>,
    transport: &'a dyn Transport,
) -> Result<(), String> {
    match base_cfg.base_type.as_deref() {
        Some("arcgis") => {
            let url = base_cfg
                .url
                .clone()
                .ok_or(format!("Base layer {} without url", base_cfg.id))?;
            let request_url = format!("{}?f=json", url);
            let base_cfg = base_cfg.clone();
            pending.requests.push(Box::pin(async move {
                let info = transport.fetch_json(&request_url).await?;
                let resolutions = tile_service_resolutions(&info)
                    .map_err(|err| format!("{} - {}", request_url, err))?;
                let layer = BaseLayer::ArcGisTiled(ArcGisBase {
                    id: base_cfg.id.clone(),
                    name: base_cfg.name.clone().unwrap_or(base_cfg.id.clone()),
                    url,
                    is_default: base_cfg.is_default,
                    toggle: base_cfg.toggle,
                    resolutions: resolutions.clone(),
                });
                Ok(AsyncBase {
                    layer,
                    map_options: MapOptionsPatch {
                        resolutions: Some(resolutions),
                    },
                })
            }));
        }
        _ => {
            let base = TileBase::from_config(base_cfg)?;
            pending.layers.bases.push(BaseLayer::Tile(base));
        }
    }
    Ok(())
}

fn translate_overlay(overlay_cfg: &OverlayCfg) -> Result<Option<Overlay>, String> {
    let name = overlay_cfg
        .name
        .clone()
        .unwrap_or(overlay_cfg.id.clone());
    let projection = match overlay_cfg.projection {
        Some(ref code) => Some(Projection::new(code)?),
        None => None,
    };
    let overlay = match overlay_cfg.overlay_type.as_deref() {
        None | Some("WMS") => Some(Overlay::Wms(WmsOverlay {
            id: overlay_cfg.id.clone(),
            name,
            url: overlay_cfg.url.clone(),
            layers: overlay_cfg.layers.join(","),
            transparent: true,
            projection,
        })),
        Some("REST") => Some(Overlay::Rest(RestOverlay {
            id: overlay_cfg.id.clone(),
            name,
            url: overlay_cfg.url.clone(),
            layers: format!("show:{}", overlay_cfg.layers.join(",")),
            transparent: true,
            projection,
        })),
        Some(_) => None,
    };
    Ok(overlay)
}

/// Resolutions per zoom level from a tiled service capability document
fn tile_service_resolutions(info: &JsonValue) -> Result<Vec<f64>, String> {
    #[derive(Deserialize)]
    struct ServiceInfo {
        #[serde(rename = "tileInfo")]
        tile_info: TileInfo,
    }
    #[derive(Deserialize)]
    struct TileInfo {
        lods: Vec<Lod>,
    }
    #[derive(Deserialize)]
    struct Lod {
        resolution: f64,
    }

    let info: ServiceInfo = serde_json::from_value(info.clone())
        .map_err(|err| format!("Invalid capability document: {}", err))?;
    if info.tile_info.lods.is_empty() {
        return Err("Capability document without tile levels".to_string());
    }
    Ok(info
        .tile_info
        .lods
        .iter()
        .map(|lod| lod.resolution)
        .collect())
}
