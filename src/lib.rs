#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring and adding, `z <- z^2 + c` starting
//! at zero, never runs away to infinity.  Once `|z|` passes 2 it is
//! guaranteed to escape, so the number of steps it takes to get
//! there (the "escape time") is what we paint; points still bounded
//! when the iteration budget runs out are painted as members.
//!
//! A `FrameRenderer` takes a viewport, a raster size, a budget and a
//! palette, and returns a row-major RGBA buffer.  It splits the raster
//! into column stripes evaluated on separate threads, and keeps two
//! lossy caches: one of per-point iteration state, so that deepening
//! the budget resumes work rather than repeating it, and one of
//! finished frames, so that re-asking for an unchanged view is free.
//!
//! `orbit::trace` follows a single point's iterates for drawing as an
//! overlay, and `navigate` holds the arithmetic a host needs to pan,
//! zoom and select regions.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

pub mod colors;
pub mod error;
pub mod escape;
pub mod frame_cache;
pub mod navigate;
pub mod orbit;
pub mod planes;
pub mod point_cache;
pub mod render;

pub use colors::ColorMode;
pub use error::MandelError;
pub use escape::EscapeTimeEvaluator;
pub use frame_cache::FrameCache;
pub use orbit::{trace, Orbit, OrbitLabel};
pub use planes::{complex_to_screen, screen_to_complex, PlaneMapper, RasterSize, Viewport};
pub use point_cache::{IterationRecord, PointCache};
pub use render::{FrameRenderer, RenderConfig};
