use crate::core::model::Point;

/// Matches the canvas: 30 m across, 15 m up.
pub const DISTANCE_TO_HEIGHT_RATIO: f64 = 2.0;

const X_PADDING_RATIO: f64 = 0.06;
const Y_PADDING_RATIO: f64 = 0.10;

/// Data extent for a chart with a fixed x:y aspect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartWindow {
    pub max_x_m: f64,
    pub max_y_m: f64,
}

impl ChartWindow {
    /// Smallest padded window with the fixed ratio that holds every point and
    /// the target marker.
    pub fn fitting(paths: &[&[Point]], target_distance_m: f64) -> Self {
        let (raw_x, raw_y) = paths
            .iter()
            .flat_map(|path| path.iter())
            .filter(|p| p.is_finite())
            .fold((target_distance_m.max(0.0), 0.0f64), |(mx, my), p| {
                (mx.max(p.x), my.max(p.y))
            });
        Self::padded(raw_x, raw_y)
    }

    fn padded(raw_max_x: f64, raw_max_y: f64) -> Self {
        let x_pad = raw_max_x.max(1.0) * X_PADDING_RATIO;
        let y_pad = raw_max_y.max(1.0) * Y_PADDING_RATIO;

        let mut max_x_m = (raw_max_x + x_pad).max(1.0);
        let mut max_y_m = (raw_max_y + y_pad).max(1.0);

        if max_x_m / max_y_m < DISTANCE_TO_HEIGHT_RATIO {
            max_x_m = max_y_m * DISTANCE_TO_HEIGHT_RATIO;
        } else {
            max_y_m = max_x_m / DISTANCE_TO_HEIGHT_RATIO;
        }

        Self { max_x_m, max_y_m }
    }
}
