//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use regex::Regex;
use std::f64::consts;
use std::fmt;

lazy_static! {
    static ref PROJECTION_CODE: Regex = Regex::new(r"^EPSG:\d+$").unwrap();
}

/// Spatial reference of layer coordinates (EPSG code)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Projection(String);

impl Projection {
    pub fn new(code: &str) -> Result<Projection, String> {
        if PROJECTION_CODE.is_match(code) {
            Ok(Projection(code.to_string()))
        } else {
            Err(format!("Invalid projection code '{}'", code))
        }
    }
    /// Spherical Mercator as used by webmapping tile services.
    /// EPSG:900913 and EPSG:102100 are legacy aliases of EPSG:3857.
    pub fn web_mercator() -> Projection {
        Projection("EPSG:900913".to_string())
    }
    pub fn wgs84() -> Projection {
        Projection("EPSG:4326".to_string())
    }
    pub fn code(&self) -> &str {
        &self.0
    }
    pub fn is_web_mercator(&self) -> bool {
        match self.0.as_str() {
            "EPSG:3857" | "EPSG:900913" | "EPSG:102100" => true,
            _ => false,
        }
    }
    pub fn is_wgs84(&self) -> bool {
        self.0 == "EPSG:4326"
    }
    /// Equality up to Spherical Mercator aliasing
    pub fn matches(&self, other: &Projection) -> bool {
        self == other || (self.is_web_mercator() && other.is_web_mercator())
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns the Spherical Mercator (x, y) in meters
pub fn lonlat_to_merc(lon: f64, lat: f64) -> (f64, f64) {
    let x = 6378137.0 * lon.to_radians();
    let y = 6378137.0 * ((consts::PI * 0.25) + (0.5 * lat.to_radians())).tan().ln();
    (x, y)
}
