use crate::core::model::{FlightState, Point, Velocity};
use crate::core::params::ParameterSet;

const MIN_SPEED_MPS: f64 = 1e-9;

/// Magnitude of the quadratic drag force, F = 0.5 * rho * v^2 * Cd * A.
pub fn drag_force(speed_mps: f64, params: &ParameterSet) -> f64 {
    0.5 * params.air_density_kgpm3
        * speed_mps
        * speed_mps
        * params.drag_coefficient
        * params.cross_section_m2
}

/// Total acceleration (drag plus gravity). Drag opposes the velocity
/// component-wise; a resting projectile feels gravity only.
pub fn acceleration(velocity: Velocity, params: &ParameterSet) -> (f64, f64) {
    let speed = velocity.speed();
    if speed < MIN_SPEED_MPS || params.mass_kg <= 0.0 {
        return (0.0, -params.gravity_mps2);
    }
    let per_unit = drag_force(speed, params) / (speed * params.mass_kg);
    let ax = -per_unit * velocity.vx;
    let ay = -params.gravity_mps2 - per_unit * velocity.vy;
    (ax, ay)
}

/// One semi-implicit Euler step: velocity first, then position with the new
/// velocity. Keep that order; trajectories depend on it.
pub fn step(state: FlightState, dt: f64, params: &ParameterSet) -> FlightState {
    let (ax, ay) = acceleration(state.velocity, params);
    let velocity = Velocity::new(state.velocity.vx + ax * dt, state.velocity.vy + ay * dt);
    let position = Point::new(
        state.position.x + velocity.vx * dt,
        state.position.y + velocity.vy * dt,
    );
    FlightState {
        elapsed_s: state.elapsed_s + dt,
        position,
        velocity,
    }
}

/// Landing is the first step that ends at or below ground while descending.
/// The crossing is interpolated linearly inside the step.
pub fn ground_crossing(prev: FlightState, next: FlightState) -> Option<FlightState> {
    if next.position.y > 0.0 || next.velocity.vy >= 0.0 {
        return None;
    }

    let drop = prev.position.y - next.position.y;
    let fraction = if drop > 0.0 {
        (prev.position.y / drop).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let mut position = prev.position.lerp(next.position, fraction);
    position.y = 0.0;

    Some(FlightState {
        elapsed_s: prev.elapsed_s + (next.elapsed_s - prev.elapsed_s) * fraction,
        position,
        velocity: next.velocity,
    })
}
