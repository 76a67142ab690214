//! Detector geometry capability.
//!
//! The combiner never computes geometry itself; it only asks a
//! [`TrackerGeometry`] for the element a hit sits on and transforms the
//! hit's local position through it. [`PlacementTable`] is a plain in-memory
//! implementation, enough for tests and for event files that carry their
//! own placements.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Detector element identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DetId(pub u32);

impl DetId {
    /// Creates a new detector id.
    #[inline]
    #[must_use]
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    #[inline]
    #[must_use]
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// A point in the local frame of one detector element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocalPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl LocalPoint {
    /// Creates a new local point.
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A point in the global detector frame (centimetres).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GlobalPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl GlobalPoint {
    /// Creates a new global point.
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Computes the squared Euclidean distance to another point.
    #[inline]
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Computes the Euclidean distance to another point.
    #[inline]
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// A single detector element able to place local points in the global frame.
pub trait GeomDet {
    /// Transforms a point from this element's local frame to the global frame.
    fn to_global(&self, local: LocalPoint) -> GlobalPoint;
}

/// Lookup of detector elements by id.
pub trait TrackerGeometry {
    /// Element type returned by [`TrackerGeometry::det`].
    type Det: GeomDet;

    /// Returns the element with the given id, if the geometry knows it.
    fn det(&self, id: DetId) -> Option<&Self::Det>;

    /// Transforms `local` through the element `id`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownDetector`] if `id` is not part of the geometry.
    fn to_global(&self, id: DetId, local: LocalPoint) -> Result<GlobalPoint> {
        self.det(id)
            .map(|det| det.to_global(local))
            .ok_or(Error::UnknownDetector(id))
    }
}

/// Rigid placement of a detector element: `global = origin + rotation * local`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Position of the element's local origin in the global frame.
    pub origin: GlobalPoint,
    /// Row-major rotation from local to global axes.
    #[cfg_attr(feature = "serde", serde(default = "identity_rotation"))]
    pub rotation: [[f64; 3]; 3],
}

const IDENTITY: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

#[cfg(feature = "serde")]
fn identity_rotation() -> [[f64; 3]; 3] {
    IDENTITY
}

impl Placement {
    /// Creates a placement with an explicit rotation.
    #[must_use]
    pub fn new(origin: GlobalPoint, rotation: [[f64; 3]; 3]) -> Self {
        Self { origin, rotation }
    }

    /// Creates an unrotated placement at `origin`.
    #[must_use]
    pub fn translation(origin: GlobalPoint) -> Self {
        Self::new(origin, IDENTITY)
    }

    /// Creates a placement rotated by `angle` radians about the global z axis.
    #[must_use]
    pub fn rotated_z(origin: GlobalPoint, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(origin, [[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]])
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::translation(GlobalPoint::default())
    }
}

impl GeomDet for Placement {
    #[inline]
    fn to_global(&self, local: LocalPoint) -> GlobalPoint {
        let r = &self.rotation;
        GlobalPoint {
            x: self.origin.x + r[0][0] * local.x + r[0][1] * local.y + r[0][2] * local.z,
            y: self.origin.y + r[1][0] * local.x + r[1][1] * local.y + r[1][2] * local.z,
            z: self.origin.z + r[2][0] * local.x + r[2][1] * local.y + r[2][2] * local.z,
        }
    }
}

/// In-memory geometry: a table of element placements keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlacementTable {
    placements: HashMap<DetId, Placement>,
}

impl PlacementTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the placement of element `id`.
    pub fn insert(&mut self, id: DetId, placement: Placement) -> Option<Placement> {
        self.placements.insert(id, placement)
    }

    /// Builder-style variant of [`PlacementTable::insert`].
    #[must_use]
    pub fn with_placement(mut self, id: DetId, placement: Placement) -> Self {
        self.placements.insert(id, placement);
        self
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Returns true if the table holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Returns true if the table knows element `id`.
    #[must_use]
    pub fn contains(&self, id: DetId) -> bool {
        self.placements.contains_key(&id)
    }
}

impl FromIterator<(DetId, Placement)> for PlacementTable {
    fn from_iter<I: IntoIterator<Item = (DetId, Placement)>>(iter: I) -> Self {
        Self {
            placements: iter.into_iter().collect(),
        }
    }
}

impl TrackerGeometry for PlacementTable {
    type Det = Placement;

    fn det(&self, id: DetId) -> Option<&Placement> {
        self.placements.get(&id)
    }
}
