//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Point record of a data source.
///
/// `selected` and `label` are derived display state, not present in the
/// source data. They are maintained on the canonical records of the
/// point hash; every lookup returns a copy.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PointRecord {
    pub id: String,
    pub lon: f64,
    pub lat: f64,
    #[serde(flatten)]
    pub attributes: HashMap<String, JsonValue>,
    #[serde(skip)]
    pub selected: bool,
    #[serde(skip)]
    pub label: String,
}

impl PointRecord {
    pub fn new(id: &str, lon: f64, lat: f64) -> PointRecord {
        PointRecord {
            id: id.to_string(),
            lon,
            lat,
            attributes: HashMap::new(),
            selected: false,
            label: String::new(),
        }
    }
}

/// Canonical point records of a data source, keyed by point id.
///
/// Single-owner mutable structure. Derived fields are mutated in place so
/// they are always visible via lookup, but `point` returns a copy to keep
/// callers from corrupting canonical state.
#[derive(Clone, Debug, Default)]
pub struct PointHash {
    points: HashMap<String, PointRecord>,
}

impl PointHash {
    /// Build the hash from a fetched point set, resetting derived fields
    pub fn from_records(records: &[PointRecord]) -> PointHash {
        let mut points = HashMap::new();
        for record in records {
            let mut point = record.clone();
            point.selected = false;
            point.label = String::new();
            points.insert(point.id.clone(), point);
        }
        PointHash { points }
    }
    /// Copy of the record with the current derived fields
    pub fn point(&self, id: &str) -> Option<PointRecord> {
        self.points.get(id).cloned()
    }
    pub fn contains(&self, id: &str) -> bool {
        self.points.contains_key(id)
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn mark_selected(&mut self, id: &str, label: &str) -> bool {
        match self.points.get_mut(id) {
            Some(point) => {
                point.selected = true;
                point.label = label.to_string();
                true
            }
            None => false,
        }
    }
    pub fn clear_selected(&mut self, id: &str) -> bool {
        match self.points.get_mut(id) {
            Some(point) => {
                point.selected = false;
                point.label = String::new();
                true
            }
            None => false,
        }
    }
    pub fn set_label(&mut self, id: &str, label: &str) -> bool {
        match self.points.get_mut(id) {
            Some(point) => {
                point.label = label.to_string();
                true
            }
            None => false,
        }
    }
}
