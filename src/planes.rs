// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a raster of pixels with an origin at 0,0 in the upper
//! left, and a rectangle on the complex plane described by a
//! Viewport.  Screen y grows downward, so `y_min` lands on the top
//! row of the raster.
use error::MandelError;
use num::Complex;

/// The region of the complex plane that is mapped onto the raster.
/// Once built it cannot be changed; navigation produces a new one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

/// The view shown before any navigation has happened.
pub const HOME: Viewport = Viewport {
    x_min: -2.5,
    x_max: 1.0,
    y_min: -1.0,
    y_max: 1.0,
};

impl Viewport {
    /// Constructor.  The bounds must be finite and strictly ordered,
    /// otherwise the inverse mapping would divide by zero.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Viewport, MandelError> {
        let finite = [x_min, x_max, y_min, y_max].iter().all(|v| v.is_finite());
        if !finite || x_min >= x_max || y_min >= y_max {
            return Err(MandelError::InvalidViewport {
                x_min,
                x_max,
                y_min,
                y_max,
            });
        }
        Ok(Viewport {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Builds a viewport from two opposite corners, in any order.
    pub fn from_corners(a: Complex<f64>, b: Complex<f64>) -> Result<Viewport, MandelError> {
        Viewport::new(a.re.min(b.re), a.re.max(b.re), a.im.min(b.im), a.im.max(b.im))
    }

    /// Left bound.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Right bound.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Top bound.
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Bottom bound.
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Horizontal extent on the complex plane.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Vertical extent on the complex plane.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

impl Default for Viewport {
    fn default() -> Self {
        HOME
    }
}

/// The width and height of the raster in pixels.  Both are positive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RasterSize {
    width: u32,
    height: u32,
}

impl RasterSize {
    /// Constructor.  A raster with no pixels is not a meaningful
    /// request and is refused.
    pub fn new(width: u32, height: u32) -> Result<RasterSize, MandelError> {
        if width == 0 || height == 0 {
            return Err(MandelError::InvalidRasterSize { width, height });
        }
        Ok(RasterSize { width, height })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The total number of pixels in the raster.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Never true for a raster built through `new`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The length in bytes of an RGBA buffer covering the raster.
    pub fn buffer_len(&self) -> usize {
        self.len() * 4
    }
}

/// Maps points between the raster and the complex plane.  Neither
/// direction clamps: coordinates outside the raster extrapolate.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// The pixel raster.
    pub raster: RasterSize,
    /// The complex region it covers.
    pub viewport: Viewport,
}

impl PlaneMapper {
    /// Constructor.  Both halves are validated when built, so this
    /// cannot fail.
    pub fn new(raster: RasterSize, viewport: Viewport) -> PlaneMapper {
        PlaneMapper { raster, viewport }
    }

    /// Given a position on the raster, return the complex number at
    /// the equivalent location of the viewport.
    pub fn pixel_to_point(&self, px: f64, py: f64) -> Complex<f64> {
        let vp = &self.viewport;
        Complex::new(
            vp.x_min + (px / f64::from(self.raster.width)) * (vp.x_max - vp.x_min),
            vp.y_min + (py / f64::from(self.raster.height)) * (vp.y_max - vp.y_min),
        )
    }

    /// Given a complex number, return its position on the raster.
    /// The exact inverse of `pixel_to_point`.
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> (f64, f64) {
        let vp = &self.viewport;
        (
            ((point.re - vp.x_min) / (vp.x_max - vp.x_min)) * f64::from(self.raster.width),
            ((point.im - vp.y_min) / (vp.y_max - vp.y_min)) * f64::from(self.raster.height),
        )
    }

    /// The linear offset of a pixel's first byte in a row-major RGBA
    /// buffer.
    pub fn byte_offset(&self, column: u32, row: u32) -> usize {
        (row as usize * self.raster.width as usize + column as usize) * 4
    }
}

/// Free-standing form of `PlaneMapper::pixel_to_point`.
pub fn screen_to_complex(px: f64, py: f64, raster: RasterSize, viewport: Viewport) -> Complex<f64> {
    PlaneMapper::new(raster, viewport).pixel_to_point(px, py)
}

/// Free-standing form of `PlaneMapper::point_to_pixel`.
pub fn complex_to_screen(c: &Complex<f64>, raster: RasterSize, viewport: Viewport) -> (f64, f64) {
    PlaneMapper::new(raster, viewport).point_to_pixel(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn viewport_fails_on_bad_shape() {
        assert!(Viewport::new(1.0, -1.0, -1.0, 1.0).is_err());
        assert!(Viewport::new(-1.0, 1.0, 1.0, -1.0).is_err());
        assert!(Viewport::new(0.5, 0.5, -1.0, 1.0).is_err());
        assert!(Viewport::new(-1.0, 1.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn viewport_fails_on_non_finite_bounds() {
        assert!(Viewport::new(::std::f64::NAN, 1.0, -1.0, 1.0).is_err());
        assert!(Viewport::new(-1.0, ::std::f64::INFINITY, -1.0, 1.0).is_err());
    }

    #[test]
    fn viewport_passes_on_good_shape() {
        let vp = Viewport::new(-1.0, 1.0, -1.0, 1.0).unwrap();
        assert_eq!(vp.width(), 2.0);
        assert_eq!(vp.height(), 2.0);
    }

    #[test]
    fn corners_may_come_in_any_order() {
        let vp = Viewport::from_corners(Complex::new(1.0, -1.0), Complex::new(-2.0, 3.0)).unwrap();
        assert_eq!(vp, Viewport::new(-2.0, 1.0, -1.0, 3.0).unwrap());
    }

    #[test]
    fn raster_refuses_empty_dimensions() {
        assert_eq!(
            RasterSize::new(0, 0),
            Err(MandelError::InvalidRasterSize {
                width: 0,
                height: 0
            })
        );
        assert!(RasterSize::new(10, 0).is_err());
        assert_eq!(RasterSize::new(3, 2).unwrap().buffer_len(), 24);
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let pm = PlaneMapper::new(
            RasterSize::new(5, 5).unwrap(),
            Viewport::new(0.0, 5.0, 0.0, 5.0).unwrap(),
        );
        assert_eq!(pm.pixel_to_point(0.0, 0.0), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(2.0, 2.0), Complex::new(2.0, 2.0));
        assert_eq!(pm.pixel_to_point(4.0, 4.0), Complex::new(4.0, 4.0));
    }

    #[test]
    fn pixel_to_points_on_mixed_planes() {
        let pm = PlaneMapper::new(
            RasterSize::new(4, 4).unwrap(),
            Viewport::new(-2.0, 2.0, -2.0, 2.0).unwrap(),
        );
        assert_eq!(pm.pixel_to_point(2.0, 2.0), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(0.0, 0.0), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(4.0, 4.0), Complex::new(2.0, 2.0));
    }

    #[test]
    fn pixels_outside_the_raster_extrapolate() {
        let pm = PlaneMapper::new(
            RasterSize::new(4, 4).unwrap(),
            Viewport::new(-2.0, 2.0, -2.0, 2.0).unwrap(),
        );
        assert_eq!(pm.pixel_to_point(-2.0, 6.0), Complex::new(-4.0, 4.0));
    }

    #[test]
    fn point_to_pixel_maps_on_large_mixed_planes() {
        let pm = PlaneMapper::new(
            RasterSize::new(640, 640).unwrap(),
            Viewport::new(-2.0, 2.0, -2.0, 2.0).unwrap(),
        );
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, 0.0)), (320.0, 320.0));
        assert_eq!(pm.point_to_pixel(&Complex::new(-2.0, -2.0)), (0.0, 0.0));
        assert_eq!(pm.point_to_pixel(&Complex::new(2.0, 2.0)), (640.0, 640.0));
        assert_eq!(pm.point_to_pixel(&Complex::new(1.0, 2.0)), (480.0, 640.0));
    }

    #[test]
    fn mapping_round_trips_across_the_home_view() {
        let raster = RasterSize::new(317, 211).unwrap();
        let vp = Viewport::default();
        for &(px, py) in &[(0.0, 0.0), (316.0, 210.0), (158.5, 3.25), (1.0, 200.0)] {
            let c = screen_to_complex(px, py, raster, vp);
            assert!(close(complex_to_screen(&c, raster, vp), (px, py)));
        }
    }

    #[test]
    fn byte_offsets_are_row_major() {
        let pm = PlaneMapper::new(RasterSize::new(10, 3).unwrap(), HOME);
        assert_eq!(pm.byte_offset(0, 0), 0);
        assert_eq!(pm.byte_offset(9, 0), 36);
        assert_eq!(pm.byte_offset(1, 2), 84);
    }
}
