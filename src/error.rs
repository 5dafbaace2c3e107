// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error conditions raised by the renderer.  All of them are caller
//! input validation failures, reported before any work begins, with
//! the exception of `RenderFailed`.

/// Everything that can go wrong when asking for a frame or an orbit.
#[derive(Debug, Fail, PartialEq)]
pub enum MandelError {
    /// The viewport has no area, is inverted, or is not finite.
    #[fail(
        display = "invalid viewport: x {}..{}, y {}..{}",
        x_min, x_max, y_min, y_max
    )]
    InvalidViewport {
        /// Left bound.
        x_min: f64,
        /// Right bound.
        x_max: f64,
        /// Top bound.
        y_min: f64,
        /// Bottom bound.
        y_max: f64,
    },

    /// One or both raster dimensions are zero.
    #[fail(display = "invalid raster size: {}x{}", width, height)]
    InvalidRasterSize {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// The iteration budget must be at least one.
    #[fail(display = "invalid iteration budget: {}", budget)]
    InvalidBudget {
        /// The rejected budget.
        budget: u32,
    },

    /// A stripe worker panicked before the frame was complete.
    #[fail(display = "a render worker failed before the frame was complete")]
    RenderFailed,

    /// A command-line value could not be understood.
    #[fail(display = "{}", _0)]
    InvalidArgument(String),
}

/// Rejects budgets that would make every point trivially part of the set.
pub fn check_budget(budget: u32) -> Result<u32, MandelError> {
    if budget < 1 {
        return Err(MandelError::InvalidBudget { budget });
    }
    Ok(budget)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_budget_is_rejected() {
        assert_eq!(
            check_budget(0),
            Err(MandelError::InvalidBudget { budget: 0 })
        );
    }

    #[test]
    fn positive_budget_passes_through() {
        assert_eq!(check_budget(1), Ok(1));
        assert_eq!(check_budget(20_000), Ok(20_000));
    }

    #[test]
    fn messages_name_the_bad_value() {
        let e = MandelError::InvalidRasterSize {
            width: 0,
            height: 4,
        };
        assert_eq!(format!("{}", e), "invalid raster size: 0x4");
    }
}
