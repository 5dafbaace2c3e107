// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time kernel.  For a point `c` we iterate `z <- z^2 + c`
//! from zero and count the steps until `|z|` passes 2, giving up at
//! the iteration budget.  Points that never escape are taken to be in
//! the Mandelbrot set.
//!
//! Because a user will often deepen the budget without moving the
//! view, the evaluator remembers where each point's iteration
//! stopped, and picks up from there rather than starting again.

use num::Complex;
use point_cache::PointCache;

/// The square of the bailout radius.
pub const BAILOUT: f64 = 4.0;

/// Whether an iterate has left the radius-2 disk.
#[inline]
pub fn escaped(z: &Complex<f64>) -> bool {
    z.norm_sqr() >= BAILOUT
}

/// Run the recurrence from `(z, n)` until escape or until `n` reaches
/// `max_iterations`, returning the final iterate and count.
#[inline]
pub fn iterate_from(
    c: Complex<f64>,
    mut z: Complex<f64>,
    mut n: u32,
    max_iterations: u32,
) -> (Complex<f64>, u32) {
    while n < max_iterations && !escaped(&z) {
        z = z * z + c;
        n += 1;
    }
    (z, n)
}

/// The escape count of `c` computed from scratch, without any cache.
pub fn escape_time(c: Complex<f64>, max_iterations: u32) -> u32 {
    iterate_from(c, Complex::new(0.0, 0.0), 0, max_iterations).1
}

/// Computes escape counts, consulting and refreshing a `PointCache`.
pub struct EscapeTimeEvaluator {
    cache: PointCache,
}

impl EscapeTimeEvaluator {
    /// Constructor.  The evaluator owns its cache.
    pub fn new(cache: PointCache) -> EscapeTimeEvaluator {
        EscapeTimeEvaluator { cache }
    }

    /// The underlying cache.
    pub fn cache(&self) -> &PointCache {
        &self.cache
    }

    /// The escape count of `c`, in `0..=max_iterations`.  A count equal
    /// to the budget means the point did not escape within it.
    pub fn iterations(&self, c: Complex<f64>, max_iterations: u32) -> u32 {
        let (z, n) = match self.cache.get(&c) {
            // An earlier pass already went at least this deep.
            Some(record) if record.n >= max_iterations => return max_iterations,
            Some(record) if record.escaped => return record.n,
            Some(record) => (record.z, record.n),
            None => (Complex::new(0.0, 0.0), 0),
        };

        let (z, n) = iterate_from(c, z, n, max_iterations);
        self.cache.set(c, z, n, escaped(&z));
        n
    }
}

impl Default for EscapeTimeEvaluator {
    fn default() -> Self {
        EscapeTimeEvaluator::new(PointCache::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        let ev = EscapeTimeEvaluator::default();
        for &budget in &[1, 2, 100, 5000] {
            assert_eq!(ev.iterations(Complex::new(0.0, 0.0), budget), budget);
        }
    }

    #[test]
    fn far_points_escape_at_once() {
        let ev = EscapeTimeEvaluator::default();
        assert_eq!(ev.iterations(Complex::new(3.0, 0.0), 100), 1);
        assert_eq!(ev.iterations(Complex::new(0.0, -2.5), 100), 1);
        assert_eq!(ev.iterations(Complex::new(-2.1, 0.0), 1), 1);
    }

    #[test]
    fn known_escape_counts() {
        // 1 -> 2, and |2|^2 sits on the bailout
        assert_eq!(escape_time(Complex::new(1.0, 0.0), 100), 2);
        // 1+i -> 1+3i
        assert_eq!(escape_time(Complex::new(1.0, 1.0), 100), 2);
        assert_eq!(escape_time(Complex::new(-1.0, 0.0), 100), 100);
    }

    #[test]
    fn deeper_budget_resumes_from_the_cache() {
        let ev = EscapeTimeEvaluator::new(PointCache::new(1000));
        let c = Complex::new(-0.75, 0.1);
        let shallow = ev.iterations(c, 10);
        assert_eq!(shallow, 10);
        let record = ev.cache().get(&c).unwrap();
        assert_eq!(record.n, 10);
        assert!(!record.escaped);

        let deep = ev.iterations(c, 1000);
        assert_eq!(deep, escape_time(c, 1000));
        assert!(deep < 1000);
        assert!(ev.cache().get(&c).unwrap().escaped);
    }

    #[test]
    fn shallower_budget_is_capped() {
        let ev = EscapeTimeEvaluator::default();
        let c = Complex::new(-0.75, 0.1);
        let deep = ev.iterations(c, 1000);
        assert_eq!(ev.iterations(c, 5), 5);
        assert_eq!(ev.iterations(c, 1000), deep);
    }

    #[test]
    fn escaped_points_ignore_larger_budgets() {
        let ev = EscapeTimeEvaluator::default();
        let c = Complex::new(0.5, 0.3);
        let n = ev.iterations(c, 1000);
        assert_eq!(n, 6);
        assert!(n < 1000);
        assert_eq!(ev.iterations(c, 50_000), n);
    }
}
