// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Helpers a host uses to turn pointer and keyboard gestures into new
//! viewports and budgets.  None of these touch the renderer; they only
//! produce the arguments for the next call to it.

use error::MandelError;
use num::Complex;
use planes::{PlaneMapper, RasterSize, Viewport};

/// The budget paired with the home view.
pub const HOME_BUDGET: u32 = 200;

/// The smallest budget a host should step down to.
pub const MIN_BUDGET: u32 = 2;

/// Zoom factor for one wheel notch toward the viewer.
pub const WHEEL_ZOOM_IN: f64 = 0.8;
/// Zoom factor for one wheel notch away from the viewer.
pub const WHEEL_ZOOM_OUT: f64 = 1.2;
/// Zoom factor for a page-up.
pub const PAGE_ZOOM_IN: f64 = 0.5;
/// Zoom factor for a page-down.
pub const PAGE_ZOOM_OUT: f64 = 1.5;

/// Drags shorter than this, on either axis, do not select anything.
pub const MIN_SELECTION: f64 = 10.0;

/// The home view is 3.5 units wide; zoom is reported relative to it.
const HOME_WIDTH: f64 = 3.5;

/// Scale the viewport about `point`, which stays fixed on screen.
/// Factors below one zoom in.
pub fn zoom_at(
    viewport: &Viewport,
    point: Complex<f64>,
    factor: f64,
) -> Result<Viewport, MandelError> {
    Viewport::new(
        point.re - (point.re - viewport.x_min()) * factor,
        (viewport.x_max() - point.re) * factor + point.re,
        point.im - (point.im - viewport.y_min()) * factor,
        (viewport.y_max() - point.im) * factor + point.im,
    )
}

/// Directions for keyboard panning.  `Down` moves toward larger y,
/// which is further down the screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pan {
    /// Toward smaller x.
    Left,
    /// Toward larger x.
    Right,
    /// Toward smaller y.
    Up,
    /// Toward larger y.
    Down,
}

/// Shift the viewport a tenth of its extent.
pub fn pan(viewport: &Viewport, direction: Pan) -> Result<Viewport, MandelError> {
    let dx = viewport.width() / 10.0;
    let dy = viewport.height() / 10.0;
    let (sx, sy) = match direction {
        Pan::Left => (-dx, 0.0),
        Pan::Right => (dx, 0.0),
        Pan::Up => (0.0, -dy),
        Pan::Down => (0.0, dy),
    };
    Viewport::new(
        viewport.x_min() + sx,
        viewport.x_max() + sx,
        viewport.y_min() + sy,
        viewport.y_max() + sy,
    )
}

/// Turn a drag from `anchor` to `cursor` (both in screen pixels) into
/// the viewport it selects.  The selection keeps the home view's
/// 3.5:2 aspect, sized by the shorter side of the drag, and hangs from
/// its upper-left corner.  Short drags select nothing.
pub fn select_region(
    anchor: (f64, f64),
    cursor: (f64, f64),
    raster: RasterSize,
    viewport: Viewport,
) -> Option<Viewport> {
    let dx = (cursor.0 - anchor.0).abs();
    let dy = (cursor.1 - anchor.1).abs();
    let side = dx.min(dy);
    if side < MIN_SELECTION {
        return None;
    }

    let left = cursor.0.min(anchor.0);
    let top = cursor.1.min(anchor.1);
    let mapper = PlaneMapper::new(raster, viewport);
    let upper_left = mapper.pixel_to_point(left, top);
    let lower_right = mapper.pixel_to_point(left + side, top + (2.0 * side) / HOME_WIDTH);
    Viewport::new(upper_left.re, lower_right.re, upper_left.im, lower_right.im).ok()
}

/// Raise or lower the budget by a step that grows with its size.
/// Never goes below `MIN_BUDGET`.
pub fn step_budget(current: u32, increase: bool) -> u32 {
    let delta = if current > 200 {
        100
    } else if current > 50 {
        10
    } else if current > 15 {
        5
    } else {
        1
    };
    if increase {
        current.saturating_add(delta)
    } else {
        current.saturating_sub(delta).max(MIN_BUDGET)
    }
}

/// The budget bound to a number key, if any.
pub fn preset_budget(key: char) -> Option<u32> {
    match key {
        '1' => Some(10),
        '2' => Some(50),
        '3' => Some(100),
        '4' => Some(200),
        '5' => Some(500),
        '6' => Some(1500),
        '7' => Some(2500),
        '8' => Some(5000),
        '9' => Some(10_000),
        '0' => Some(20_000),
        _ => None,
    }
}

/// Magnification relative to the home view.
pub fn zoom_level(viewport: &Viewport) -> f64 {
    HOME_WIDTH / viewport.width()
}

/// Render a point for a status line.  Screen y grows downward, so the
/// imaginary part is shown with its sign flipped.
pub fn format_complex(c: &Complex<f64>) -> String {
    if c.im < 0.0 {
        format!("{} + {}i", c.re, c.im.abs())
    } else {
        format!("{} - {}i", c.re, c.im)
    }
}
