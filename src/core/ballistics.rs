use serde::Serialize;

use crate::core::model::{Point, Velocity};
use crate::core::params::ParameterSet;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FlightSummary {
    pub time_of_flight_s: f64,
    pub range_m: f64,
    pub max_height_m: f64,
}

pub fn velocity_components(params: &ParameterSet) -> (f64, f64) {
    let theta = params.launch_angle_rad();
    let vx = params.launch_speed_mps * theta.cos();
    let vy = params.launch_speed_mps * theta.sin();
    (vx, vy)
}

pub fn trajectory_at_time(params: &ParameterSet, time_s: f64) -> Point {
    let (vx, vy) = velocity_components(params);
    let x = vx * time_s;
    let y = (vy * time_s) - (0.5 * params.gravity_mps2 * time_s * time_s);
    Point::new(x, y)
}

pub fn velocity_at_time(params: &ParameterSet, time_s: f64) -> Velocity {
    let (vx, vy) = velocity_components(params);
    Velocity::new(vx, vy - params.gravity_mps2 * time_s)
}

/// `None` when there is no gravity to bring the shot back down.
pub fn time_of_flight(params: &ParameterSet) -> Option<f64> {
    if params.gravity_mps2 <= 0.0 {
        return None;
    }
    let (_, vy) = velocity_components(params);
    Some((2.0 * vy) / params.gravity_mps2)
}

pub fn range(params: &ParameterSet) -> Option<f64> {
    let (vx, _) = velocity_components(params);
    time_of_flight(params).map(|t| vx * t)
}

pub fn max_height(params: &ParameterSet) -> Option<f64> {
    if params.gravity_mps2 <= 0.0 {
        return None;
    }
    let (_, vy) = velocity_components(params);
    Some((vy * vy) / (2.0 * params.gravity_mps2))
}

pub fn flight_summary(params: &ParameterSet) -> Option<FlightSummary> {
    Some(FlightSummary {
        time_of_flight_s: time_of_flight(params)?,
        range_m: range(params)?,
        max_height_m: max_height(params)?,
    })
}

/// Evenly spaced points over `[0, time_of_flight]`. Empty when the shot never
/// lands.
pub fn sample_trajectory(params: &ParameterSet, samples: usize) -> Vec<Point> {
    let Some(time_of_flight_s) = time_of_flight(params) else {
        return Vec::new();
    };
    let sample_count = samples.max(2);
    (0..=sample_count)
        .map(|i| {
            let t = (i as f64 * time_of_flight_s) / sample_count as f64;
            trajectory_at_time(params, t)
        })
        .collect()
}
