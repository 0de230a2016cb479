//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::point::PointRecord;

/// Insertion-ordered set of selected point copies.
///
/// Labels are assigned from the membership size at insertion time, not
/// from a monotonic counter: after removals the next label can repeat a
/// previously used ordinal. Labels of remaining points are never
/// renumbered.
#[derive(Default, Debug, Clone)]
pub struct SelectionSet {
    points: Vec<PointRecord>,
}

impl SelectionSet {
    pub fn new() -> SelectionSet {
        SelectionSet { points: Vec::new() }
    }
    pub fn contains(&self, id: &str) -> bool {
        self.points.iter().any(|point| point.id == id)
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    /// Label for the next inserted point
    pub fn next_label(&self) -> String {
        (self.points.len() + 1).to_string()
    }
    /// Insert a point copy. The caller assigns the label beforehand.
    pub fn insert(&mut self, point: PointRecord) {
        debug_assert!(!self.contains(&point.id));
        self.points.push(point);
    }
    /// Returns false if the point was not selected
    pub fn remove(&mut self, id: &str) -> bool {
        let size = self.points.len();
        self.points.retain(|point| point.id != id);
        self.points.len() < size
    }
    /// Returns false if the point is not selected
    pub fn set_label(&mut self, id: &str, label: &str) -> bool {
        match self.points.iter_mut().find(|point| point.id == id) {
            Some(point) => {
                point.label = label.to_string();
                true
            }
            None => false,
        }
    }
    /// Selected point copies in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &PointRecord> {
        self.points.iter()
    }
}
