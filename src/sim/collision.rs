//! Collision detection between car silhouettes and track masks
//!
//! Cars collide by their rotated sprite silhouette, not a bounding box, so
//! irregular track borders respond pixel-exactly.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::mask::Mask;
use super::vehicle::Car;

/// Where a car's silhouette first touches `mask`, in mask-local pixels.
///
/// `mask_origin` is the mask's top-left corner in track space.
pub fn collide(car: &Car, mask: &Mask, mask_origin: IVec2) -> Option<IVec2> {
    let (silhouette, top_left) = car.silhouette();
    mask.overlap(&silhouette, top_left - mask_origin)
}

/// Which finish-line touches count as a lap.
///
/// The overlap point is the first solid finish pixel under the car, scanned
/// row by row from the top. A car entering from the top edge therefore
/// reports row 0, which the classic layout treats as driving the wrong way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossingRule {
    /// Reject touches whose first overlap lies on this row
    RejectRow(i32),
    /// Reject touches whose first overlap lies on this column
    RejectColumn(i32),
    /// Every touch is a valid crossing
    AcceptAll,
}

impl Default for CrossingRule {
    fn default() -> Self {
        CrossingRule::RejectRow(0)
    }
}

impl CrossingRule {
    pub fn accepts(&self, point: IVec2) -> bool {
        match *self {
            CrossingRule::RejectRow(row) => point.y != row,
            CrossingRule::RejectColumn(column) => point.x != column,
            CrossingRule::AcceptAll => true,
        }
    }
}

/// Result of a car touching the finish line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// Crossed in the racing direction
    Valid,
    /// Touched from the disallowed side
    Wrong,
}

/// Finish line mask placed on the track
#[derive(Debug, Clone)]
pub struct FinishLine {
    pub mask: Mask,
    /// Top-left corner in track space
    pub origin: IVec2,
    pub rule: CrossingRule,
}

impl FinishLine {
    pub fn new(mask: Mask, origin: IVec2, rule: CrossingRule) -> Self {
        Self { mask, origin, rule }
    }

    /// First overlap point with `car`, if touching
    pub fn touch(&self, car: &Car) -> Option<IVec2> {
        collide(car, &self.mask, self.origin)
    }

    /// Classify a touch by `car`, or `None` when it is clear of the line
    pub fn crossing(&self, car: &Car) -> Option<Crossing> {
        self.touch(car).map(|point| {
            if self.rule.accepts(point) {
                Crossing::Valid
            } else {
                Crossing::Wrong
            }
        })
    }
}
