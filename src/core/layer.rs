//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::{BaseCfg, Config, GroupCfg, SubGroupCfg};
use crate::core::geom::Projection;

pub const OSM_LAYER_NAME: &str = "OSM (with buffer)";

pub const OSM_TILE_URLS: [&str; 3] = [
    "http://a.tile.openstreetmap.org/${z}/${x}/${y}.png",
    "http://b.tile.openstreetmap.org/${z}/${x}/${y}.png",
    "http://c.tile.openstreetmap.org/${z}/${x}/${y}.png",
];

/// Base layer of the map, produced by configuration translation.
///
/// Closed set of layer kinds; downstream code dispatches on the variant,
/// never on type strings.
#[derive(Clone, Debug, PartialEq)]
pub enum BaseLayer {
    /// Plain tile service, translated synchronously
    Tile(TileBase),
    /// Tiled service configured from fetched capability metadata
    ArcGisTiled(ArcGisBase),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TileBase {
    pub id: String,
    pub name: String,
    pub urls: Vec<String>,
    pub is_default: bool,
    pub toggle: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArcGisBase {
    pub id: String,
    pub name: String,
    pub url: String,
    pub is_default: bool,
    pub toggle: bool,
    /// Units-per-pixel for each zoom level of the service, largest first
    pub resolutions: Vec<f64>,
}

impl TileBase {
    /// OpenStreetMap tile set, the default base layer
    pub fn osm(id: &str) -> TileBase {
        TileBase {
            id: id.to_string(),
            name: OSM_LAYER_NAME.to_string(),
            urls: OSM_TILE_URLS.iter().map(|url| url.to_string()).collect(),
            is_default: false,
            toggle: false,
        }
    }
}

impl<'a> Config<'a, BaseCfg> for TileBase {
    fn from_config(base_cfg: &BaseCfg) -> Result<Self, String> {
        let mut base = TileBase::osm(&base_cfg.id);
        if let Some(ref name) = base_cfg.name {
            base.name = name.clone();
        }
        if let Some(ref url) = base_cfg.url {
            base.urls = vec![url.clone()];
        }
        base.is_default = base_cfg.is_default;
        base.toggle = base_cfg.toggle;
        Ok(base)
    }
}

impl BaseLayer {
    pub fn id(&self) -> &str {
        match self {
            BaseLayer::Tile(ref base) => &base.id,
            BaseLayer::ArcGisTiled(ref base) => &base.id,
        }
    }
    pub fn name(&self) -> &str {
        match self {
            BaseLayer::Tile(ref base) => &base.name,
            BaseLayer::ArcGisTiled(ref base) => &base.name,
        }
    }
    pub fn is_default(&self) -> bool {
        match self {
            BaseLayer::Tile(ref base) => base.is_default,
            BaseLayer::ArcGisTiled(ref base) => base.is_default,
        }
    }
}

/// Passthrough service overlay, translated synchronously.
#[derive(Clone, Debug, PartialEq)]
pub enum Overlay {
    Wms(WmsOverlay),
    Rest(RestOverlay),
}

#[derive(Clone, Debug, PartialEq)]
pub struct WmsOverlay {
    pub id: String,
    pub name: String,
    pub url: String,
    pub layers: String,
    pub transparent: bool,
    pub projection: Option<Projection>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RestOverlay {
    pub id: String,
    pub name: String,
    pub url: String,
    /// Layer visibility parameter of the service (`show:0,2,...`)
    pub layers: String,
    pub transparent: bool,
    pub projection: Option<Projection>,
}

impl Overlay {
    pub fn id(&self) -> &str {
        match self {
            Overlay::Wms(ref overlay) => &overlay.id,
            Overlay::Rest(ref overlay) => &overlay.id,
        }
    }
    pub fn name(&self) -> &str {
        match self {
            Overlay::Wms(ref overlay) => &overlay.name,
            Overlay::Rest(ref overlay) => &overlay.name,
        }
    }
}

/// Overlay grouping for the layer switcher collaborator
#[derive(Clone, Debug, PartialEq)]
pub struct LayerGroup {
    pub id: String,
    pub name: String,
    pub layers: Vec<String>,
    pub sub_groups: Vec<SubGroup>,
    pub is_default: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubGroup {
    pub name: String,
    pub layers: Vec<String>,
}

impl<'a> Config<'a, GroupCfg> for LayerGroup {
    fn from_config(group_cfg: &GroupCfg) -> Result<Self, String> {
        Ok(LayerGroup {
            id: group_cfg.id.clone(),
            name: group_cfg.name.clone().unwrap_or(group_cfg.id.clone()),
            layers: group_cfg.layers.clone(),
            sub_groups: group_cfg
                .sub_groups
                .iter()
                .map(|sub| SubGroup::from_config(sub))
                .collect::<Result<Vec<_>, _>>()?,
            is_default: group_cfg.is_default,
        })
    }
}

impl<'a> Config<'a, SubGroupCfg> for SubGroup {
    fn from_config(sub_cfg: &SubGroupCfg) -> Result<Self, String> {
        Ok(SubGroup {
            name: sub_cfg.name.clone(),
            layers: sub_cfg.layers.clone(),
        })
    }
}

/// Marker style of a data source layer. Explicit styles override the
/// default style derived from the style table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MarkerStyle {
    /// Icon graphic path
    pub icon: String,
    #[serde(default = "default_point_radius")]
    pub point_radius: u32,
    #[serde(default = "default_fill_opacity")]
    pub fill_opacity: f64,
    /// Label display offset relative to the marker, in pixels
    #[serde(default = "default_label_offset")]
    pub label_offset: (i32, i32),
    #[serde(default)]
    pub pointer_cursor: bool,
}

pub fn default_point_radius() -> u32 {
    12
}

pub fn default_fill_opacity() -> f64 {
    1.0
}

pub fn default_label_offset() -> (i32, i32) {
    (10, 16)
}

/// Definition of a marker layer, shared by configured data sources and
/// the synthetic selection overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerLayerDef {
    pub id: String,
    pub name: String,
    /// Marker color token, resolved against the style table
    pub color: String,
    /// Projection of the source coordinates
    pub projection: Projection,
    pub style: Option<MarkerStyle>,
}
