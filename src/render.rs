// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The frame renderer.  A frame is split into stripes of columns,
//! column `x` belonging to stripe `x % stripes`, and each stripe is
//! evaluated on its own thread.  A stripe paints into a private
//! buffer, so no two threads ever write the same memory; once every
//! thread has been joined the stripes are woven back into one
//! row-major RGBA image.
//!
//! Finished frames are memoised, so asking again for a view that has
//! not changed costs a copy rather than a render.

use colors::ColorMode;
use crossbeam;
use crossbeam::thread::ScopedJoinHandle;
use error::{check_budget, MandelError};
use escape::EscapeTimeEvaluator;
use frame_cache::{self, FrameCache, FrameKey};
use itertools::iproduct;
use planes::{PlaneMapper, RasterSize, Viewport};
use point_cache::{self, PointCache};
use std::iter::StepBy;
use std::ops::Range;
use std::time::Instant;

/// How many stripes a frame is split into unless told otherwise.
pub const DEFAULT_STRIPES: usize = 8;

/// Sizes for the renderer's caches and its fan-out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Slots in the per-point cache.
    pub point_cache_capacity: usize,
    /// Slots in the per-frame cache.
    pub frame_cache_capacity: usize,
    /// Number of concurrently evaluated column stripes.
    pub stripes: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            point_cache_capacity: point_cache::DEFAULT_CAPACITY,
            frame_cache_capacity: frame_cache::DEFAULT_CAPACITY,
            stripes: DEFAULT_STRIPES,
        }
    }
}

/// The columns owned by one stripe.
fn stripe_columns(stripe: usize, stripes: usize, width: u32) -> StepBy<Range<u32>> {
    ((stripe as u32)..width).step_by(stripes)
}

/// Renders frames, owning both caches.
pub struct FrameRenderer {
    evaluator: EscapeTimeEvaluator,
    frames: FrameCache,
    stripes: usize,
}

impl FrameRenderer {
    /// Constructor.  Zero-sized settings are raised to one.
    pub fn new(config: RenderConfig) -> FrameRenderer {
        FrameRenderer {
            evaluator: EscapeTimeEvaluator::new(PointCache::new(config.point_cache_capacity)),
            frames: FrameCache::new(config.frame_cache_capacity),
            stripes: config.stripes.max(1),
        }
    }

    /// The fan-out used per frame.
    pub fn stripes(&self) -> usize {
        self.stripes
    }

    /// The escape-time evaluator and its point cache.
    pub fn evaluator(&self) -> &EscapeTimeEvaluator {
        &self.evaluator
    }

    /// The frame cache.
    pub fn frame_cache(&self) -> &FrameCache {
        &self.frames
    }

    /// Empty both caches.  Output is unaffected; only timing changes.
    pub fn clear_caches(&self) {
        self.evaluator.cache().clear();
        self.frames.clear();
    }

    /// Produce the row-major RGBA image of `viewport` at `raster`
    /// resolution.  Blocks until every stripe is done.
    pub fn render(
        &self,
        raster: RasterSize,
        viewport: Viewport,
        budget: u32,
        mode: ColorMode,
    ) -> Result<Vec<u8>, MandelError> {
        let budget = check_budget(budget)?;
        let key = FrameKey {
            raster,
            viewport,
            budget,
            mode,
        };

        if let Some(pixels) = self.frames.get(&key) {
            debug!("frame cache hit for {:?}", key);
            return Ok(pixels);
        }

        let started = Instant::now();
        let pixels = self.render_frame(&key)?;
        debug!(
            "rendered {}x{} at {} iterations in {:?} over {} stripes",
            raster.width(),
            raster.height(),
            budget,
            started.elapsed(),
            self.stripes
        );

        self.frames.set(key, pixels.clone());
        Ok(pixels)
    }

    fn render_frame(&self, key: &FrameKey) -> Result<Vec<u8>, MandelError> {
        let mapper = PlaneMapper::new(key.raster, key.viewport);
        let (budget, mode) = (key.budget, key.mode);

        let stripes = crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<Vec<u8>>> = (0..self.stripes)
                .map(|stripe| {
                    let mapper = &mapper;
                    spawner.spawn(move |_| self.render_stripe(mapper, stripe, budget, mode))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Result<Vec<Vec<u8>>, _>>()
        })
        .map_err(|_| MandelError::RenderFailed)?
        .map_err(|_| MandelError::RenderFailed)?;

        let width = key.raster.width();
        let mut pixels = vec![0 as u8; key.raster.buffer_len()];
        for (stripe, colors) in stripes.iter().enumerate() {
            let columns = stripe_columns(stripe, self.stripes, width);
            let coordinates = iproduct!(columns, 0..key.raster.height());
            for ((column, row), rgba) in coordinates.zip(colors.chunks(4)) {
                let offset = mapper.byte_offset(column, row);
                pixels[offset..offset + 4].copy_from_slice(rgba);
            }
        }
        Ok(pixels)
    }

    /// Evaluate and colour every pixel of one stripe, column by column.
    fn render_stripe(
        &self,
        mapper: &PlaneMapper,
        stripe: usize,
        budget: u32,
        mode: ColorMode,
    ) -> Vec<u8> {
        let width = mapper.raster.width();
        let height = mapper.raster.height();
        let columns = stripe_columns(stripe, self.stripes, width);
        let mut colors = Vec::with_capacity(columns.len() * height as usize * 4);
        for (column, row) in iproduct!(columns, 0..height) {
            let c = mapper.pixel_to_point(f64::from(column), f64::from(row));
            let n = self.evaluator.iterations(c, budget);
            colors.extend_from_slice(&mode.rgba(n, budget));
        }
        trace!("stripe {} finished with {} pixels", stripe, colors.len() / 4);
        colors
    }
}

impl Default for FrameRenderer {
    fn default() -> Self {
        FrameRenderer::new(RenderConfig::default())
    }
}
