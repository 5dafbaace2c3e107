// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A fixed-size, lossy store of per-point iteration state.  Every
//! slot holds at most one record and a colliding write simply
//! replaces it.  A read only counts as a hit when the stored point is
//! exactly the one asked for, so a collision can cost a recompute but
//! can never produce a wrong answer.
//!
//! The slots are split across a handful of independently locked
//! shards so that stripe workers rarely contend with one another.

use num::Complex;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The default number of slots.
pub const DEFAULT_CAPACITY: usize = 100_000;

/// Coordinates are quantised to this many steps per unit before
/// hashing; points closer together than this alias to the same slot.
const QUANTUM: f64 = 1e6;

const SHARDS: usize = 64;

/// The state of `z <- z^2 + c` for one point after `n` steps.  When
/// `escaped` is false the iteration may be resumed from `z`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IterationRecord {
    /// The point being iterated.
    pub c: Complex<f64>,
    /// The most recent iterate.
    pub z: Complex<f64>,
    /// Steps taken so far, or the escape step.
    pub n: u32,
    /// Whether `z` has left the radius-2 disk.
    pub escaped: bool,
}

/// Quantise each coordinate, Cantor-pair the two integers, and take
/// the magnitude.  Collisions are expected.
pub fn point_hash(c: &Complex<f64>) -> u64 {
    let x = (c.re * QUANTUM).round() as i64;
    let y = (c.im * QUANTUM).round() as i64;
    let sum = x.wrapping_add(y);
    let pairing = (sum.wrapping_mul(sum.wrapping_add(1)) / 2).wrapping_add(y);
    pairing.unsigned_abs()
}

/// The per-point iteration cache.
pub struct PointCache {
    capacity: usize,
    shards: Vec<Mutex<Vec<Option<IterationRecord>>>>,
}

impl PointCache {
    /// Constructor.  A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> PointCache {
        let capacity = capacity.max(1);
        let per_shard = (capacity + SHARDS - 1) / SHARDS;
        let shards = (0..SHARDS)
            .map(|_| Mutex::new(vec![None; per_shard]))
            .collect();
        PointCache { capacity, shards }
    }

    /// The number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn slot(&self, c: &Complex<f64>) -> (usize, usize) {
        let index = (point_hash(c) % self.capacity as u64) as usize;
        (index % SHARDS, index / SHARDS)
    }

    // Records are plain values, so a poisoned shard is still coherent.
    fn lock(&self, shard: usize) -> MutexGuard<Vec<Option<IterationRecord>>> {
        self.shards[shard]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the record for `c`, if the slot currently holds that
    /// exact point.
    pub fn get(&self, c: &Complex<f64>) -> Option<IterationRecord> {
        let (shard, position) = self.slot(c);
        match self.lock(shard)[position] {
            Some(record) if record.c == *c => Some(record),
            _ => None,
        }
    }

    /// Store a record for `c`, replacing whatever shared its slot.
    pub fn set(&self, c: Complex<f64>, z: Complex<f64>, n: u32, escaped: bool) {
        let (shard, position) = self.slot(&c);
        self.lock(shard)[position] = Some(IterationRecord { c, z, n, escaped });
    }

    /// Forget everything.
    pub fn clear(&self) {
        for shard in 0..SHARDS {
            for slot in self.lock(shard).iter_mut() {
                *slot = None;
            }
        }
    }
}

impl Default for PointCache {
    fn default() -> Self {
        PointCache::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_cantor_pairing_of_quantised_coordinates() {
        assert_eq!(point_hash(&Complex::new(0.0, 0.0)), 0);
        // x = 1, y = 2: (3 * 4) / 2 + 2
        assert_eq!(point_hash(&Complex::new(1e-6, 2e-6)), 8);
        // x = -3, y = 1: (-2 * -1) / 2 + 1
        assert_eq!(point_hash(&Complex::new(-3e-6, 1e-6)), 2);
    }

    #[test]
    fn hash_ignores_detail_below_the_quantum() {
        let a = Complex::new(-0.75, 0.1);
        let b = Complex::new(-0.75 + 1e-9, 0.1 - 1e-9);
        assert_eq!(point_hash(&a), point_hash(&b));
    }

    #[test]
    fn empty_cache_misses() {
        let cache = PointCache::new(16);
        assert_eq!(cache.get(&Complex::new(0.25, 0.5)), None);
    }

    #[test]
    fn set_then_get() {
        let cache = PointCache::new(1000);
        let c = Complex::new(-0.5, 0.25);
        cache.set(c, Complex::new(0.1, 0.2), 12, false);
        assert_eq!(
            cache.get(&c),
            Some(IterationRecord {
                c,
                z: Complex::new(0.1, 0.2),
                n: 12,
                escaped: false,
            })
        );
    }

    #[test]
    fn aliased_points_are_not_hits() {
        let cache = PointCache::new(1000);
        let a = Complex::new(-0.75, 0.1);
        let b = Complex::new(-0.75 + 1e-9, 0.1);
        cache.set(a, Complex::new(0.0, 0.0), 3, false);
        assert_eq!(cache.get(&b), None);
        assert!(cache.get(&a).is_some());
    }

    #[test]
    fn collisions_overwrite() {
        let cache = PointCache::new(1);
        let a = Complex::new(1.0, 1.0);
        let b = Complex::new(-1.0, 0.5);
        cache.set(a, a, 1, true);
        cache.set(b, b, 2, true);
        assert_eq!(cache.get(&a), None);
        assert_eq!(cache.get(&b).map(|r| r.n), Some(2));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let cache = PointCache::new(0);
        assert_eq!(cache.capacity(), 1);
        let c = Complex::new(0.3, 0.5);
        cache.set(c, c, 4, true);
        assert!(cache.get(&c).is_some());
    }

    #[test]
    fn clear_forgets() {
        let cache = PointCache::default();
        let c = Complex::new(0.3, 0.5);
        cache.set(c, c, 4, true);
        cache.clear();
        assert_eq!(cache.get(&c), None);
    }
}
