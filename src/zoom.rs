//! Horizontal zoom and pan behavior bound to a linear scale.
//!
//! The behavior owns the current view, i.e., a scale factor `k` and a translation `(x, y)`.
//! Every input event produces a new view, from which the zoomed scale is derived:
//! the unzoomed range is mapped back through the view and inverted with the unzoomed scale.
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::VizError;
use crate::line::Point;
use crate::scale::LinearScale;

/// Scale factors allowed by default on voltage traces.
pub const DEFAULT_SCALE_EXTENT: [f64; 2] = [1.0, 10.0];
/// Factor applied to wheel deltas before exponentiation: a delta of 500 doubles the scale.
pub const WHEEL_SENSITIVITY: f64 = 0.002;

/// A user input driving the zoom.
/// All points are in plot-area coordinates (margins excluded), i.e., the coordinate system of the scale range.
/// Pointer positions measured from the corner of the outer `svg` must have `margin.left` and `margin.top` subtracted first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomEvent {
    /// Mouse wheel at the given point; a positive delta zooms in.
    Wheel { point: Point, delta: f64 },
    /// Drag from one point to another, translating the view without zooming.
    Drag { from: Point, to: Point },
    /// Double click at the given point, doubling the scale (halving it with shift).
    DoubleClick { point: Point, shift: bool },
}

/// The current view: scale factor and translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl ZoomTransform {
    pub fn identity() -> Self {
        ZoomTransform {
            k: 1.0,
            x: 0.0,
            y: 0.0,
        }
    }

    /// Returns the unzoomed location displayed at the given point.
    pub fn location(&self, point: Point) -> Point {
        ((point.0 - self.x) / self.k, (point.1 - self.y) / self.k)
    }

    /// Returns the point at which the given unzoomed location is displayed.
    pub fn point(&self, location: Point) -> Point {
        (location.0 * self.k + self.x, location.1 * self.k + self.y)
    }
}

impl Default for ZoomTransform {
    fn default() -> Self {
        ZoomTransform::identity()
    }
}

/// Zoom behavior bound to the horizontal scale of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Zoom {
    x0: LinearScale,
    view: ZoomTransform,
    scale_extent: [f64; 2],
}

impl Zoom {
    /// Create a new zoom behavior on the given scale, with the default scale extent.
    pub fn new(x: LinearScale) -> Self {
        Zoom {
            x0: x,
            view: ZoomTransform::identity(),
            scale_extent: DEFAULT_SCALE_EXTENT,
        }
    }

    /// Create a new zoom behavior on the given scale, with scale factors limited to the given extent.
    /// Returns an error if the extent is not a valid positive interval.
    pub fn build(x: LinearScale, scale_extent: [f64; 2]) -> Result<Self, VizError> {
        let [min, max] = scale_extent;
        if min.is_nan() || max.is_nan() || min <= 0.0 || min > max {
            return Err(VizError::InvalidParameter(format!(
                "Invalid scale extent [{}, {}]",
                min, max
            )));
        }

        Ok(Zoom {
            x0: x,
            view: ZoomTransform::identity(),
            scale_extent,
        })
    }

    pub fn transform(&self) -> ZoomTransform {
        self.view
    }

    pub fn scale_extent(&self) -> [f64; 2] {
        self.scale_extent
    }

    /// Returns the unzoomed scale the behavior was bound to.
    pub fn base(&self) -> &LinearScale {
        &self.x0
    }

    /// Returns the scale for the current view.
    pub fn x(&self) -> LinearScale {
        let [r0, r1] = self.x0.range();
        let domain = [
            self.x0.invert((r0 - self.view.x) / self.view.k),
            self.x0.invert((r1 - self.view.x) / self.view.k),
        ];
        self.x0.with_domain(domain)
    }

    /// Update the view according to the event.
    pub fn handle(&mut self, event: ZoomEvent) {
        match event {
            ZoomEvent::Wheel { point, delta } => {
                let k = self.view.k * 2_f64.powf(delta * WHEEL_SENSITIVITY);
                self.scale_to(k, point);
            }
            ZoomEvent::Drag { from, to } => {
                let location = self.view.location(from);
                self.translate_to(to, location);
            }
            ZoomEvent::DoubleClick { point, shift } => {
                let level = self.view.k.log2();
                let level = if shift {
                    level.ceil() - 1.0
                } else {
                    level.floor() + 1.0
                };
                self.scale_to(2_f64.powf(level), point);
            }
        }
        debug!(
            "Zoom event {:?}: k={}, translate=({}, {})",
            event, self.view.k, self.view.x, self.view.y
        );
    }

    /// Zoom to the given scale factor (clamped to the extent), keeping the location under `center` in place.
    pub fn scale_to(&mut self, k: f64, center: Point) {
        let location = self.view.location(center);
        self.set_scale(k);
        self.translate_to(center, location);
    }

    /// Return to the identity view.
    pub fn reset(&mut self) {
        self.view = ZoomTransform::identity();
    }

    fn set_scale(&mut self, k: f64) {
        let [min, max] = self.scale_extent;
        self.view.k = min.max(max.min(k));
    }

    fn translate_to(&mut self, point: Point, location: Point) {
        let displayed = self.view.point(location);
        self.view.x += point.0 - displayed.0;
        self.view.y += point.1 - displayed.1;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn new_zoom() -> Zoom {
        Zoom::new(LinearScale::new([0.0, 100.0], [0.0, 890.0]))
    }

    #[test]
    fn test_build() {
        let x = LinearScale::new([0.0, 1.0], [0.0, 1.0]);
        assert!(Zoom::build(x.clone(), [1.0, 10.0]).is_ok());
        assert!(Zoom::build(x.clone(), [1.0, f64::INFINITY]).is_ok());
        assert!(Zoom::build(x.clone(), [0.0, 10.0]).is_err());
        assert!(Zoom::build(x.clone(), [10.0, 1.0]).is_err());
        assert!(Zoom::build(x, [f64::NAN, 1.0]).is_err());
    }

    #[test]
    fn test_identity_view() {
        let zoom = new_zoom();
        assert_eq!(zoom.transform(), ZoomTransform::identity());
        assert_eq!(zoom.x().domain(), [0.0, 100.0]);
        assert_eq!(zoom.x().range(), [0.0, 890.0]);
    }

    #[test]
    fn test_wheel_zooms_around_pointer() {
        let mut zoom = new_zoom();
        zoom.handle(ZoomEvent::Wheel {
            point: (445.0, 100.0),
            delta: 500.0,
        });
        assert_relative_eq!(zoom.transform().k, 2.0);
        assert_relative_eq!(zoom.transform().x, -445.0);
        let [d0, d1] = zoom.x().domain();
        assert_relative_eq!(d0, 25.0);
        assert_relative_eq!(d1, 75.0);
        // the data under the pointer did not move
        assert_relative_eq!(zoom.x().map(50.0), 445.0);
    }

    #[test]
    fn test_scale_is_clamped() {
        let mut zoom = new_zoom();
        zoom.handle(ZoomEvent::Wheel {
            point: (0.0, 0.0),
            delta: 1e6,
        });
        assert_eq!(zoom.transform().k, 10.0);
        let [d0, d1] = zoom.x().domain();
        assert_relative_eq!(d0, 0.0);
        assert_relative_eq!(d1, 10.0);

        let mut zoom = new_zoom();
        zoom.handle(ZoomEvent::Wheel {
            point: (300.0, 0.0),
            delta: -500.0,
        });
        assert_eq!(zoom.transform(), ZoomTransform::identity());
        assert_eq!(zoom.x().domain(), [0.0, 100.0]);
    }

    #[test]
    fn test_drag_pans() {
        let mut zoom = new_zoom();
        zoom.handle(ZoomEvent::Drag {
            from: (100.0, 0.0),
            to: (189.0, 0.0),
        });
        assert_eq!(zoom.transform().k, 1.0);
        let [d0, d1] = zoom.x().domain();
        assert_relative_eq!(d0, -10.0);
        assert_relative_eq!(d1, 90.0);
    }

    #[test]
    fn test_double_click() {
        let mut zoom = new_zoom();
        zoom.handle(ZoomEvent::DoubleClick {
            point: (0.0, 0.0),
            shift: false,
        });
        assert_relative_eq!(zoom.transform().k, 2.0);
        let [d0, d1] = zoom.x().domain();
        assert_relative_eq!(d0, 0.0);
        assert_relative_eq!(d1, 50.0);

        zoom.handle(ZoomEvent::DoubleClick {
            point: (0.0, 0.0),
            shift: true,
        });
        assert_relative_eq!(zoom.transform().k, 1.0);

        zoom.scale_to(8.0, (445.0, 0.0));
        zoom.handle(ZoomEvent::DoubleClick {
            point: (445.0, 0.0),
            shift: false,
        });
        assert_eq!(zoom.transform().k, 10.0);

        zoom.reset();
        assert_eq!(zoom.x().domain(), [0.0, 100.0]);
    }

    #[test]
    fn test_points_exclude_margins() {
        let margin = crate::layout::Margin::default();
        // a double click at the middle of the plot, as measured from the corner of the outer svg
        let (page_x, page_y) = (margin.left + 445.0, margin.top + 225.0);

        let mut zoom = new_zoom();
        zoom.handle(ZoomEvent::DoubleClick {
            point: (page_x - margin.left, page_y - margin.top),
            shift: false,
        });
        let [d0, d1] = zoom.x().domain();
        assert_relative_eq!(d0, 25.0);
        assert_relative_eq!(d1, 75.0);

        // forwarding the raw position shifts the fixed point by the left margin
        let mut zoom = new_zoom();
        zoom.handle(ZoomEvent::DoubleClick {
            point: (page_x, page_y),
            shift: false,
        });
        assert_relative_eq!(zoom.x().invert(page_x), zoom.base().invert(page_x), epsilon = 1e-9);
        assert!(zoom.x().domain()[0] > 25.0);
    }
}
