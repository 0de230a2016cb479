//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::layer::{
    default_fill_opacity, default_label_offset, default_point_radius, MarkerStyle,
};
use std::collections::HashMap;

pub const DEFAULT_ICON_PATH: &str = "markers/24/";
pub const ICON_EXTENSION: &str = ".png";

/// Immutable marker color and icon lookup, injected into the layer
/// materializer.
#[derive(Clone, Debug)]
pub struct StyleTable {
    icon_path: String,
    colors: HashMap<String, String>,
    fallback: String,
}

impl Default for StyleTable {
    fn default() -> Self {
        StyleTable::with_icon_path(DEFAULT_ICON_PATH)
    }
}

impl StyleTable {
    pub fn with_icon_path(icon_path: &str) -> StyleTable {
        let mut colors = HashMap::new();
        colors.insert("RED".to_string(), "#fb6254".to_string());
        colors.insert("GREEN".to_string(), "#00e03c".to_string());
        colors.insert("BLUE".to_string(), "#4462c8".to_string());
        colors.insert("CYAN".to_string(), "#54d6d6".to_string());
        colors.insert("PURPLE".to_string(), "#7d54fb".to_string());
        colors.insert("YELLOW".to_string(), "#fcf357".to_string());
        StyleTable {
            icon_path: icon_path.to_string(),
            colors,
            fallback: "#fb6254".to_string(),
        }
    }
    /// Hex color for a marker color token, falling back to the default
    /// color for unknown tokens
    pub fn hex(&self, token: &str) -> &str {
        self.colors
            .get(&token.to_uppercase())
            .unwrap_or(&self.fallback)
    }
    /// Icon graphic path for a marker color token
    pub fn icon(&self, token: &str) -> String {
        format!(
            "{}{}{}",
            self.icon_path,
            self.hex(token).trim_start_matches('#'),
            ICON_EXTENSION
        )
    }
    /// Default marker style for sources without an explicit style
    pub fn default_style(&self, token: &str, pointer_cursor: bool) -> MarkerStyle {
        MarkerStyle {
            icon: self.icon(token),
            point_radius: default_point_radius(),
            fill_opacity: default_fill_opacity(),
            label_offset: default_label_offset(),
            pointer_cursor,
        }
    }
}
