//! Simulated and reconstructed hit types.

use crate::error::{Error, Result};
use crate::geometry::{DetId, GlobalPoint, LocalPoint};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A simulated energy deposit on one detector element.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimHit {
    /// Id of the simulated track that produced the deposit.
    pub track_id: u32,
    /// Position in the local frame of `det_id`.
    pub local_position: LocalPoint,
    /// Detector element the deposit sits on.
    pub det_id: DetId,
}

impl SimHit {
    /// Creates a new sim hit.
    #[inline]
    #[must_use]
    pub fn new(track_id: u32, local_position: LocalPoint, det_id: DetId) -> Self {
        Self {
            track_id,
            local_position,
            det_id,
        }
    }
}

/// A reconstructed hit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecHit {
    /// Detector element the hit was reconstructed on.
    pub det_id: DetId,
    /// Reconstructed position in the global frame.
    pub global_position: GlobalPoint,
}

impl RecHit {
    /// Creates a new rec hit.
    #[inline]
    #[must_use]
    pub fn new(det_id: DetId, global_position: GlobalPoint) -> Self {
        Self {
            det_id,
            global_position,
        }
    }
}

/// Reference to a rec hit stored in a [`RecHitCollection`].
///
/// Two references are equal iff they denote the same stored hit. A null
/// reference is spelled `Option::<RecHitRef>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RecHitRef(u32);

impl RecHitRef {
    /// Creates a reference to the hit at `index`.
    #[inline]
    #[must_use]
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the position of the referenced hit in its collection.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RecHitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owning storage for the rec hits of one event.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RecHitCollection {
    hits: Vec<RecHit>,
}

impl RecHitCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            hits: Vec::with_capacity(capacity),
        }
    }

    /// Stores a hit and returns a reference to it.
    ///
    /// References are 32-bit, so a collection holds at most `u32::MAX + 1`
    /// hits.
    ///
    /// # Errors
    /// Returns [`Error::CollectionFull`] once no further index fits in a
    /// reference; the hit is not stored then.
    pub fn push(&mut self, hit: RecHit) -> Result<RecHitRef> {
        let reference = next_ref(self.hits.len())?;
        self.hits.push(hit);
        Ok(reference)
    }

    /// Returns the number of hits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Returns true if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Returns the referenced hit, if the reference is in range.
    #[must_use]
    pub fn get(&self, reference: RecHitRef) -> Option<&RecHit> {
        self.hits.get(reference.index())
    }

    /// Resolves a reference, failing on a dangling one.
    ///
    /// # Errors
    /// Returns [`Error::DanglingRecHit`] if `reference` is out of range.
    pub fn resolve(&self, reference: RecHitRef) -> Result<&RecHit> {
        self.get(reference).ok_or(Error::DanglingRecHit {
            reference,
            len: self.hits.len(),
        })
    }

    /// Returns an iterator over the stored hits.
    pub fn iter(&self) -> impl Iterator<Item = &RecHit> {
        self.hits.iter()
    }
}

fn next_ref(len: usize) -> Result<RecHitRef> {
    u32::try_from(len)
        .map(RecHitRef)
        .map_err(|_| Error::CollectionFull { len })
}

impl FromIterator<RecHit> for RecHitCollection {
    fn from_iter<I: IntoIterator<Item = RecHit>>(iter: I) -> Self {
        Self {
            hits: iter.into_iter().collect(),
        }
    }
}

/// A sim hit together with the rec hit produced from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitPair<'a> {
    pub sim: &'a SimHit,
    pub rec: Option<RecHitRef>,
}

impl HitPair<'_> {
    /// Returns the track id of the sim hit.
    #[inline]
    #[must_use]
    pub fn track_id(&self) -> u32 {
        self.sim.track_id
    }
}

/// Zips sim hits with their index-aligned rec-hit references.
///
/// # Errors
/// Returns [`Error::LengthMismatch`] if the two sequences differ in length.
pub fn pair_hits<'a>(
    sim_hits: &'a [SimHit],
    sim_to_rec: &[Option<RecHitRef>],
) -> Result<Vec<HitPair<'a>>> {
    if sim_hits.len() != sim_to_rec.len() {
        return Err(Error::LengthMismatch {
            sim_hits: sim_hits.len(),
            rec_refs: sim_to_rec.len(),
        });
    }
    Ok(sim_hits
        .iter()
        .zip(sim_to_rec)
        .map(|(sim, rec)| HitPair { sim, rec: *rec })
        .collect())
}
