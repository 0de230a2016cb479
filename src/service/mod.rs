//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod engine;
pub mod selection;
pub mod translate;
pub mod widget;

pub use self::engine::{EngineLayer, MapEngine};
pub use self::selection::SelectionSet;
pub use self::translate::{translate, LayerSet, MapOptions, TranslatedConfig};
pub use self::widget::{MapWidget, WidgetOptions, SELECTION_LAYER_ID};

#[cfg(test)]
pub mod test_support;
