//! Document regions: inclusive offset ranges that move with edits.
//!
//! Regions are compared by value. Adding a region equal to one already
//! present returns the existing one; removing a region removes every region
//! equal to it.

use crate::anchor::{map_offset, Bias};

/// An inclusive range `[start, end]` of document offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Region {
    pub start: u32,
    pub end: u32,
}

impl Region {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "region {start}..={end} is reversed");
        Self { start, end }
    }

    /// Returns `true` if `offset` is in `[start, end]`.
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        self.start <= offset && offset <= self.end
    }
}

/// Regions of one document, kept sorted by start.
#[derive(Clone, Debug, Default)]
pub struct RegionManager {
    regions: Vec<Region>,
}

impl RegionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Add a region, or return the equal region already present.
    ///
    /// The flag is `true` when the region was newly added.
    pub fn add(&mut self, region: Region) -> (Region, bool) {
        match self.regions.binary_search(&region) {
            Ok(i) => (self.regions[i], false),
            Err(i) => {
                self.regions.insert(i, region);
                (region, true)
            }
        }
    }

    /// Remove every region equal to `region`. Returns how many were removed.
    pub fn remove(&mut self, region: Region) -> usize {
        let before = self.regions.len();
        self.regions.retain(|r| *r != region);
        before - self.regions.len()
    }

    /// The first region containing `offset`.
    pub fn region_at(&self, offset: u32) -> Option<Region> {
        self.regions.iter().copied().find(|r| r.contains(offset))
    }

    /// All regions, sorted by start.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Move every region over an edit. A region grows to take in text
    /// inserted at either of its edges.
    pub fn apply_edit(&mut self, offset: u32, removed_len: u32, inserted_len: u32) {
        for region in &mut self.regions {
            region.start = map_offset(region.start, Bias::Left, offset, removed_len, inserted_len);
            region.end = map_offset(region.end, Bias::Right, offset, removed_len, inserted_len);
        }
        // Starts stay ordered but collapsed regions can swap on their ends.
        // Regions that became equal are kept until removed.
        self.regions.sort_unstable();
    }
}
