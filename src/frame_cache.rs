// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Memoises finished frames.  Like the point cache this is a flat
//! array of slots indexed by a weak hash; a slot is trusted only when
//! every field of its key compares equal to the request.

use colors::ColorMode;
use planes::{RasterSize, Viewport};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The default number of slots.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Everything that determines the pixels of a frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameKey {
    /// Raster dimensions.
    pub raster: RasterSize,
    /// The complex region shown.
    pub viewport: Viewport,
    /// Iteration budget per point.
    pub budget: u32,
    /// Palette.
    pub mode: ColorMode,
}

impl FrameKey {
    /// A weighted sum of the key fields, reduced modulo `capacity`.
    pub fn index(&self, capacity: usize) -> usize {
        let vp = &self.viewport;
        let sum = f64::from(self.mode.flag() * 89)
            + f64::from(self.budget) * 83.0
            + f64::from(self.raster.width()) * 41.0
            + f64::from(self.raster.height()) * 17.0
            + vp.x_min() * 13.0
            + vp.x_max() * 7.0
            + vp.y_min() * 5.0
            + vp.y_max();
        let index = sum.rem_euclid(capacity as f64) as usize;
        // rem_euclid can round up to `capacity` for tiny negative sums.
        index.min(capacity - 1)
    }
}

/// A rendered frame and the key it was rendered for.
#[derive(Clone, Debug)]
pub struct FrameRecord {
    /// The key.
    pub key: FrameKey,
    /// Row-major RGBA bytes.
    pub pixels: Vec<u8>,
}

/// The per-frame cache.
pub struct FrameCache {
    capacity: usize,
    slots: Mutex<Vec<Option<FrameRecord>>>,
}

impl FrameCache {
    /// Constructor.  A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> FrameCache {
        let capacity = capacity.max(1);
        FrameCache {
            capacity,
            slots: Mutex::new(vec![None; capacity]),
        }
    }

    /// The number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> MutexGuard<Vec<Option<FrameRecord>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the stored pixels for `key`, if its slot holds a frame
    /// rendered for exactly that key.
    pub fn get(&self, key: &FrameKey) -> Option<Vec<u8>> {
        match self.lock()[key.index(self.capacity)] {
            Some(ref record) if record.key == *key => Some(record.pixels.clone()),
            _ => None,
        }
    }

    /// Store a frame, replacing whatever shared its slot.
    pub fn set(&self, key: FrameKey, pixels: Vec<u8>) {
        let index = key.index(self.capacity);
        self.lock()[index] = Some(FrameRecord { key, pixels });
    }

    /// Forget everything.
    pub fn clear(&self) {
        for slot in self.lock().iter_mut() {
            *slot = None;
        }
    }
}

impl Default for FrameCache {
    fn default() -> Self {
        FrameCache::new(DEFAULT_CAPACITY)
    }
}
