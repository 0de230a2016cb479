//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::geom::Projection;
use crate::core::layer::{BaseLayer, Overlay};
use crate::render::materializer::RenderLayer;
use std::sync::Arc;

/// Finished layer objects handed to the rendering engine
#[derive(Clone, Debug)]
pub enum EngineLayer {
    Base(BaseLayer),
    Overlay(Overlay),
    Markers(Arc<RenderLayer>),
}

impl EngineLayer {
    pub fn id(&self) -> &str {
        match self {
            EngineLayer::Base(ref base) => base.id(),
            EngineLayer::Overlay(ref overlay) => overlay.id(),
            EngineLayer::Markers(ref layer) => &layer.id,
        }
    }
}

/// Rendering engine collaborator.
///
/// The widget hands finished layer objects to the engine and queries zoom,
/// projection and layer visibility state. The engine forwards zoom-change
/// and hit-test events back via `MapWidget::on_zoom_changed` and
/// `MapWidget::notify_point_clicked`.
pub trait MapEngine {
    fn add_layer(&mut self, layer: EngineLayer);
    /// Detach a layer. Returns false if no layer with this id is attached.
    fn remove_layer(&mut self, id: &str) -> bool;
    fn has_layer(&self, id: &str) -> bool;
    /// Visibility flag of an attached layer (false if not attached)
    fn is_visible(&self, id: &str) -> bool;
    fn set_visibility(&mut self, id: &str, visible: bool);
    fn set_opacity(&mut self, id: &str, opacity: f64);
    fn opacity(&self, id: &str) -> Option<f64>;
    fn set_base_layer(&mut self, id: &str);
    /// Move a layer to the topmost z-order position
    fn raise_to_top(&mut self, id: &str);
    fn zoom(&self) -> u8;
    fn projection(&self) -> Projection;
    /// Rebind the layer list tracked by the hit-test/selection control
    fn set_hit_test_layers(&mut self, ids: &[String]);
}
