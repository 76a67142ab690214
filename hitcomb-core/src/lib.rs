//! hitcomb-core: Core types for tracker rec-hit combination.
//!
//! This crate provides the data model shared by the combiner and its
//! collaborators: simulated and reconstructed hits, rec-hit references,
//! combinations, the detector geometry capability and readout error records.
//!

pub mod combination;
pub mod data_error;
pub mod error;
pub mod geometry;
pub mod hit;

pub use combination::Combination;
pub use data_error::DataError;
pub use error::{Error, Result};
pub use geometry::{
    DetId, GeomDet, GlobalPoint, LocalPoint, Placement, PlacementTable, TrackerGeometry,
};
pub use hit::{pair_hits, HitPair, RecHit, RecHitCollection, RecHitRef, SimHit};
