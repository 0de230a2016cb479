//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod config;
pub mod geom;
pub mod layer;
pub mod point;

pub use self::config::{parse_config, read_config, Config, MapCfg};
pub use self::geom::Projection;
pub use self::point::{PointHash, PointRecord};

#[cfg(test)]
mod point_test;
