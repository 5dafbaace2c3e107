// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Colouring functions.  Both palettes are pure functions of the
//! escape count and the iteration budget; nothing here touches the
//! caches.

use error::MandelError;
use std::fmt;
use std::str::FromStr;

/// Which palette to paint a frame with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// A smooth warm palette built from three cubic polynomials.
    Cubic,
    /// Hue cycles with the escape count; points that never escape
    /// are black.
    Hsv,
}

impl ColorMode {
    /// The numeric flag used when hashing a frame key.
    pub fn flag(self) -> u32 {
        match self {
            ColorMode::Cubic => 1,
            ColorMode::Hsv => 2,
        }
    }

    /// Map an escape count to a colour.
    pub fn rgb(self, iterations: u32, max_iterations: u32) -> [u8; 3] {
        match self {
            ColorMode::Cubic => cubic(iterations, max_iterations),
            ColorMode::Hsv => hsv_cycle(iterations, max_iterations),
        }
    }

    /// Map an escape count to an opaque RGBA pixel.
    pub fn rgba(self, iterations: u32, max_iterations: u32) -> [u8; 4] {
        let [r, g, b] = self.rgb(iterations, max_iterations);
        [r, g, b, 255]
    }
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode::Cubic
    }
}

impl FromStr for ColorMode {
    type Err = MandelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cubic" | "rgb" => Ok(ColorMode::Cubic),
            "hsv" => Ok(ColorMode::Hsv),
            _ => Err(MandelError::InvalidArgument(format!(
                "unknown colour mode '{}', expected cubic or hsv",
                s
            ))),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ColorMode::Cubic => write!(f, "cubic"),
            ColorMode::Hsv => write!(f, "hsv"),
        }
    }
}

#[inline]
fn channel(v: f64) -> u8 {
    (v * 255.0).floor() as u8
}

/// Bernstein-style polynomials over the normalised count.  A count of
/// zero is black, as is a count equal to the budget.
pub fn cubic(iterations: u32, max_iterations: u32) -> [u8; 3] {
    let t = f64::from(iterations) / f64::from(max_iterations);
    [
        channel(9.0 * (1.0 - t) * t * t * t),
        channel(15.0 * (1.0 - t) * (1.0 - t) * t * t),
        channel(8.5 * (1.0 - t) * (1.0 - t) * (1.0 - t) * t),
    ]
}

/// Hue follows the normalised count at full saturation.  Points that
/// reached the budget get a value of zero.
pub fn hsv_cycle(iterations: u32, max_iterations: u32) -> [u8; 3] {
    let hue = f64::from(iterations) / f64::from(max_iterations);
    let value = if iterations < max_iterations { 1.0 } else { 0.0 };
    hsv_to_rgb(hue, 1.0, value)
}

/// Six-sector HSV conversion.  All three inputs are in [0, 1]; the
/// channels are floored, not rounded.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [u8; 3] {
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [channel(r), channel(g), channel(b)]
}
