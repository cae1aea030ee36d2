use serde::{Deserialize, Serialize};

use crate::core::error::SimError;
use crate::core::model::Point;
use crate::core::params::ParameterSet;

pub const CANVAS_WIDTH_PX: f64 = 1000.0;
pub const CANVAS_HEIGHT_PX: f64 = 600.0;
/// Physical extent shown across the canvas.
pub const VIEW_WIDTH_M: f64 = 30.0;
pub const VIEW_HEIGHT_M: f64 = 15.0;

/// Maps physical meters (origin at the muzzle, y-up) to display pixels
/// (origin top-left, y-down) and back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    origin_px: Point,
    scale_x_px_per_m: f64,
    scale_y_px_per_m: f64,
}

impl CoordinateMapper {
    pub fn new(
        origin_px: Point,
        scale_x_px_per_m: f64,
        scale_y_px_per_m: f64,
    ) -> Result<Self, SimError> {
        check_scale("x", scale_x_px_per_m)?;
        check_scale("y", scale_y_px_per_m)?;
        Ok(Self {
            origin_px,
            scale_x_px_per_m,
            scale_y_px_per_m,
        })
    }

    pub fn origin_px(&self) -> Point {
        self.origin_px
    }

    pub fn to_display(&self, p: Point) -> Point {
        Point::new(
            self.origin_px.x + p.x * self.scale_x_px_per_m,
            self.origin_px.y - p.y * self.scale_y_px_per_m,
        )
    }

    pub fn to_physical(&self, px: Point) -> Point {
        Point::new(
            (px.x - self.origin_px.x) / self.scale_x_px_per_m,
            (self.origin_px.y - px.y) / self.scale_y_px_per_m,
        )
    }
}

fn check_scale(axis: &'static str, value: f64) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidScale { axis, value })
    }
}

/// Scene geometry the playback needs to place samples on screen: where the
/// cannon pivots, how long its barrel is, and the px/m scale per axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub pivot_px: Point,
    pub barrel_length_px: f64,
    pub scale_x_px_per_m: f64,
    pub scale_y_px_per_m: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            pivot_px: Point::new(40.0, CANVAS_HEIGHT_PX - 40.0),
            barrel_length_px: 80.0,
            scale_x_px_per_m: CANVAS_WIDTH_PX / VIEW_WIDTH_M,
            scale_y_px_per_m: CANVAS_HEIGHT_PX / VIEW_HEIGHT_M,
        }
    }
}

impl DisplayConfig {
    /// Tip of the barrel in pixels for the current launch angle.
    pub fn muzzle_display(&self, params: &ParameterSet) -> Point {
        let theta = params.launch_angle_rad();
        Point::new(
            self.pivot_px.x + self.barrel_length_px * theta.cos(),
            self.pivot_px.y - self.barrel_length_px * theta.sin(),
        )
    }

    pub fn mapper(&self, params: &ParameterSet) -> Result<CoordinateMapper, SimError> {
        CoordinateMapper::new(
            self.muzzle_display(params),
            self.scale_x_px_per_m,
            self.scale_y_px_per_m,
        )
    }

    /// Same as `mapper(params)?.to_display(p)` for a config that already
    /// passed `validate`.
    pub(crate) fn to_display(&self, params: &ParameterSet, p: Point) -> Point {
        self.validated_mapper(params).to_display(p)
    }

    pub(crate) fn to_physical(&self, params: &ParameterSet, px: Point) -> Point {
        self.validated_mapper(params).to_physical(px)
    }

    fn validated_mapper(&self, params: &ParameterSet) -> CoordinateMapper {
        CoordinateMapper {
            origin_px: self.muzzle_display(params),
            scale_x_px_per_m: self.scale_x_px_per_m,
            scale_y_px_per_m: self.scale_y_px_per_m,
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        check_scale("x", self.scale_x_px_per_m)?;
        check_scale("y", self.scale_y_px_per_m)
    }
}

#[cfg(test)]
mod tests {
    use super::{CoordinateMapper, DisplayConfig};
    use crate::core::error::SimError;
    use crate::core::model::Point;
    use crate::core::params::ParameterSet;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    #[test]
    fn flips_y_for_display() {
        let mapper = CoordinateMapper::new(Point::new(100.0, 500.0), 10.0, 20.0).unwrap();
        let px = mapper.to_display(Point::new(3.0, 2.0));
        assert_eq!(px, Point::new(130.0, 460.0));

        let below = mapper.to_display(Point::new(0.0, -1.0));
        assert_eq!(below.y, 520.0);
    }

    #[test]
    fn to_physical_undoes_to_display() {
        let mapper =
            CoordinateMapper::new(Point::new(120.0, 520.0), 1000.0 / 30.0, 40.0).unwrap();
        let p = Point::new(21.2298, 1.9317);
        let back = mapper.to_physical(mapper.to_display(p));
        assert_close(back.x, p.x, 1e-9);
        assert_close(back.y, p.y, 1e-9);
    }

    #[test]
    fn rejects_degenerate_scales() {
        let err = CoordinateMapper::new(Point::ORIGIN, 0.0, 1.0).expect_err("zero scale");
        assert!(matches!(err, SimError::InvalidScale { axis: "x", .. }));
        assert!(CoordinateMapper::new(Point::ORIGIN, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn muzzle_follows_the_angle() {
        let display = DisplayConfig::default();
        let flat = ParameterSet {
            launch_angle_deg: 0.0,
            ..ParameterSet::default()
        };
        assert_eq!(display.muzzle_display(&flat), Point::new(120.0, 560.0));

        let vertical = ParameterSet {
            launch_angle_deg: 90.0,
            ..ParameterSet::default()
        };
        let tip = display.muzzle_display(&vertical);
        assert_close(tip.x, 40.0, 1e-9);
        assert_close(tip.y, 480.0, 1e-9);
    }
}
