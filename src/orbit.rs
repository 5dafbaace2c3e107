// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Orbit tracing for overlays.  This walks the same recurrence as the
//! escape-time kernel but keeps every iterate, so it never touches
//! the point cache: a cached count is no use to someone who wants to
//! draw the path.

use error::{check_budget, MandelError};
use escape::escaped;
use num::Complex;
use planes::{PlaneMapper, RasterSize, Viewport};
use std::fmt;

/// How deep an unbounded ("super") trace is allowed to go.
pub const SUPER_TRACE_DEPTH: u32 = 50_000;

/// The iterates `z1, z2, ...` of one point, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct Orbit {
    /// Every iterate produced, the escaping one included.
    pub points: Vec<Complex<f64>>,
    /// Whether the path left the radius-2 disk.
    pub escaped: bool,
    /// The step at which iteration stopped.
    pub final_iteration: u32,
}

impl Orbit {
    /// The label an overlay puts at the end of the path.
    pub fn label(&self) -> OrbitLabel {
        if self.escaped {
            OrbitLabel::Escaped(self.final_iteration)
        } else {
            OrbitLabel::Unbounded
        }
    }

    /// Project the path onto the raster, ready to be stroked as one
    /// connected line.
    pub fn to_screen(&self, raster: RasterSize, viewport: Viewport) -> Vec<(f64, f64)> {
        let mapper = PlaneMapper::new(raster, viewport);
        self.points.iter().map(|z| mapper.point_to_pixel(z)).collect()
    }
}

/// What the end of an orbit says about its point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OrbitLabel {
    /// Escaped after this many steps.
    Escaped(u32),
    /// Still bounded when the trace gave up.
    Unbounded,
}

impl fmt::Display for OrbitLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            OrbitLabel::Escaped(n) => write!(f, "{}", n),
            OrbitLabel::Unbounded => write!(f, "Infinite"),
        }
    }
}

/// Trace the orbit of `c` until it escapes or `max_iterations` steps
/// have been taken.
pub fn trace(c: Complex<f64>, max_iterations: u32) -> Result<Orbit, MandelError> {
    let max_iterations = check_budget(max_iterations)?;
    let mut z = Complex::new(0.0, 0.0);
    let mut n = 0;
    let mut points = Vec::new();
    while n < max_iterations && !escaped(&z) {
        z = z * z + c;
        n += 1;
        points.push(z);
    }
    Ok(Orbit {
        points,
        escaped: escaped(&z),
        final_iteration: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use escape::escape_time;

    #[test]
    fn outside_point_escapes() {
        let orbit = trace(Complex::new(0.5, 0.3), 1000).unwrap();
        assert!(orbit.escaped);
        assert!(orbit.final_iteration < 1000);
        assert_eq!(orbit.points.len(), orbit.final_iteration as usize);
        assert!(orbit.points.last().unwrap().norm_sqr() >= 4.0);
        assert_eq!(orbit.label(), OrbitLabel::Escaped(6));
        assert_eq!(orbit.label().to_string(), "6");
    }

    #[test]
    fn point_in_a_bulb_stays_bounded() {
        let orbit = trace(Complex::new(0.3, 0.5), SUPER_TRACE_DEPTH).unwrap();
        assert!(!orbit.escaped);
        assert_eq!(orbit.final_iteration, SUPER_TRACE_DEPTH);
        assert_eq!(orbit.points.len(), SUPER_TRACE_DEPTH as usize);
        assert_eq!(orbit.label(), OrbitLabel::Unbounded);
    }

    #[test]
    fn agrees_with_the_escape_kernel() {
        for &c in &[
            Complex::new(0.3, 0.5),
            Complex::new(-0.75, 0.1),
            Complex::new(1.0, 1.0),
            Complex::new(-1.0, 0.0),
        ] {
            assert_eq!(trace(c, 500).unwrap().final_iteration, escape_time(c, 500));
        }
    }

    #[test]
    fn bounded_point_runs_to_the_limit() {
        let orbit = trace(Complex::new(-1.0, 0.0), 6).unwrap();
        assert!(!orbit.escaped);
        assert_eq!(orbit.final_iteration, 6);
        assert_eq!(
            orbit.points,
            vec![
                Complex::new(-1.0, 0.0),
                Complex::new(0.0, 0.0),
                Complex::new(-1.0, 0.0),
                Complex::new(0.0, 0.0),
                Complex::new(-1.0, 0.0),
                Complex::new(0.0, 0.0),
            ]
        );
        assert_eq!(orbit.label().to_string(), "Infinite");
    }

    #[test]
    fn zero_budget_is_refused() {
        assert!(trace(Complex::new(0.0, 0.0), 0).is_err());
    }

    #[test]
    fn path_projects_onto_the_raster() {
        let orbit = trace(Complex::new(1.0, 0.0), 10).unwrap();
        let raster = RasterSize::new(4, 4).unwrap();
        let vp = Viewport::new(-2.0, 2.0, -2.0, 2.0).unwrap();
        assert_eq!(orbit.to_screen(raster, vp), vec![(3.0, 2.0), (4.0, 2.0)]);
    }
}
