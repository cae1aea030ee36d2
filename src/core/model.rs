use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::ballistics;
use crate::core::drag;
use crate::core::params::ParameterSet;

/// A point in either physical space (meters, y-up) or display space
/// (pixels, y-down). Which one is implied by where it comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub vx: f64,
    pub vy: f64,
}

impl Velocity {
    pub fn new(vx: f64, vy: f64) -> Self {
        Self { vx, vy }
    }

    pub fn speed(self) -> f64 {
        self.vx.hypot(self.vy)
    }
}

/// Projectile state in physical space, relative to the muzzle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    pub elapsed_s: f64,
    pub position: Point,
    pub velocity: Velocity,
}

impl FlightState {
    pub fn at_muzzle(params: &ParameterSet) -> Self {
        let (vx, vy) = ballistics::velocity_components(params);
        Self {
            elapsed_s: 0.0,
            position: Point::ORIGIN,
            velocity: Velocity::new(vx, vy),
        }
    }
}

/// Which physics drives a flight. Chosen when the shot is fired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicsModel {
    /// Closed-form kinematics, no drag. Memoryless in time.
    #[default]
    Analytic,
    /// Semi-implicit Euler with quadratic drag. Depends on the previous state.
    Drag,
}

impl PhysicsModel {
    pub fn name(self) -> &'static str {
        match self {
            PhysicsModel::Analytic => "analytic",
            PhysicsModel::Drag => "drag",
        }
    }

    /// Advances `state` by `dt` seconds.
    pub fn advance(self, state: FlightState, dt: f64, params: &ParameterSet) -> FlightState {
        match self {
            PhysicsModel::Analytic => {
                let t = state.elapsed_s + dt;
                FlightState {
                    elapsed_s: t,
                    position: ballistics::trajectory_at_time(params, t),
                    velocity: ballistics::velocity_at_time(params, t),
                }
            }
            PhysicsModel::Drag => drag::step(state, dt, params),
        }
    }

    /// Returns the frozen landing state if the step from `prev` to `next`
    /// reached the ground, `None` while still airborne.
    pub fn ground_crossing(
        self,
        prev: FlightState,
        next: FlightState,
        params: &ParameterSet,
    ) -> Option<FlightState> {
        match self {
            PhysicsModel::Analytic => {
                // No gravity means no time of flight: the shot never comes down.
                let time_of_flight = ballistics::time_of_flight(params)?;
                if next.elapsed_s < time_of_flight {
                    return None;
                }
                Some(FlightState {
                    elapsed_s: time_of_flight,
                    position: Point::new(ballistics::range(params)?, 0.0),
                    velocity: ballistics::velocity_at_time(params, time_of_flight),
                })
            }
            PhysicsModel::Drag => drag::ground_crossing(prev, next),
        }
    }
}

impl fmt::Display for PhysicsModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::{FlightState, PhysicsModel, Point};
    use crate::core::params::ParameterSet;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    #[test]
    fn analytic_advance_ignores_previous_position() {
        let params = ParameterSet::default();
        let mut bogus = FlightState::at_muzzle(&params);
        bogus.position = Point::new(500.0, -3.0);
        let next = PhysicsModel::Analytic.advance(bogus, 0.5, &params);
        let clean = PhysicsModel::Analytic.advance(FlightState::at_muzzle(&params), 0.5, &params);
        assert_eq!(next, clean);
    }

    #[test]
    fn analytic_crossing_freezes_at_time_of_flight() {
        let params = ParameterSet {
            launch_angle_deg: 45.0,
            ..ParameterSet::default()
        };
        let prev = FlightState::at_muzzle(&params);
        let airborne = PhysicsModel::Analytic.advance(prev, 1.0, &params);
        assert!(PhysicsModel::Analytic
            .ground_crossing(prev, airborne, &params)
            .is_none());

        let past = PhysicsModel::Analytic.advance(prev, 3.0, &params);
        let landed = PhysicsModel::Analytic
            .ground_crossing(airborne, past, &params)
            .expect("should land");
        assert_close(landed.elapsed_s, 2.5950, 0.001);
        assert_close(landed.position.x, 33.0275, 0.01);
        assert_eq!(landed.position.y, 0.0);
    }

    #[test]
    fn analytic_without_gravity_never_lands() {
        let params = ParameterSet {
            gravity_mps2: 0.0,
            ..ParameterSet::default()
        };
        let prev = FlightState::at_muzzle(&params);
        let next = PhysicsModel::Analytic.advance(prev, 1_000.0, &params);
        assert!(next.position.is_finite());
        assert!(PhysicsModel::Analytic
            .ground_crossing(prev, next, &params)
            .is_none());
    }
}
