//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod materializer;
pub mod style;

pub use self::materializer::{materialize, MarkerFeature, RenderLayer};
pub use self::style::StyleTable;

#[cfg(test)]
mod materializer_test;
