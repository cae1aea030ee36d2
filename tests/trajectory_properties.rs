use approx::assert_abs_diff_eq;
use cannon_sim::core::ballistics::{
    flight_summary, max_height, range, time_of_flight, trajectory_at_time,
};
use cannon_sim::core::drag;
use cannon_sim::core::model::FlightState;
use cannon_sim::core::params::ParameterSet;
use proptest::prelude::*;

fn launch(speed: f64, angle: f64, gravity: f64) -> ParameterSet {
    ParameterSet {
        launch_speed_mps: speed,
        launch_angle_deg: angle,
        gravity_mps2: gravity,
        ..ParameterSet::default()
    }
}

proptest! {
    #[test]
    fn starts_at_the_muzzle(
        speed in 0.0..30.0f64,
        angle in 0.0..=90.0f64,
        gravity in 0.0..20.0f64
    ) {
        let p = trajectory_at_time(&launch(speed, angle, gravity), 0.0);
        prop_assert_eq!(p.x, 0.0);
        prop_assert_eq!(p.y, 0.0);
    }

    #[test]
    fn lands_at_range_after_time_of_flight(
        speed in 0.1..30.0f64,
        angle in 0.0..=90.0f64,
        gravity in 0.1..20.0f64
    ) {
        let params = launch(speed, angle, gravity);
        let t = time_of_flight(&params).unwrap();
        let end = trajectory_at_time(&params, t);
        prop_assert!(end.y.abs() < 1e-9, "y at landing = {}", end.y);
        prop_assert!((end.x - range(&params).unwrap()).abs() < 1e-9);
    }

    #[test]
    fn max_height_bounds_every_sample(
        speed in 0.1..30.0f64,
        angle in 1.0..=90.0f64,
        gravity in 0.1..20.0f64
    ) {
        let params = launch(speed, angle, gravity);
        let t_end = time_of_flight(&params).unwrap();
        let peak = max_height(&params).unwrap();
        let samples = 500;
        let mut highest = f64::MIN;
        for i in 0..=samples {
            let y = trajectory_at_time(&params, t_end * i as f64 / samples as f64).y;
            prop_assert!(y <= peak + 1e-9);
            highest = highest.max(y);
        }
        prop_assert!((peak - highest) <= peak * 1e-4 + 1e-12);
    }
}

#[test]
fn scenario_45_degrees() {
    let summary = flight_summary(&launch(18.0, 45.0, 9.81)).unwrap();
    assert_abs_diff_eq!(summary.time_of_flight_s, 2.593, epsilon = 0.005);
    assert_abs_diff_eq!(summary.range_m, 33.03, epsilon = 0.01);
    assert_abs_diff_eq!(summary.max_height_m, 8.26, epsilon = 0.01);
}

#[test]
fn scenario_20_degrees() {
    let summary = flight_summary(&launch(18.0, 20.0, 9.81)).unwrap();
    assert_abs_diff_eq!(summary.time_of_flight_s, 1.255, epsilon = 0.005);
    assert_abs_diff_eq!(summary.range_m, 21.21, epsilon = 0.05);
    // v0y^2 / 2g = 6.156^2 / 19.62
    assert_abs_diff_eq!(summary.max_height_m, 1.932, epsilon = 0.005);
}

#[test]
fn dragless_integrator_error_shrinks_with_step() {
    let params = ParameterSet {
        drag_coefficient: 0.0,
        ..launch(18.0, 45.0, 9.81)
    };
    let horizon = 2.0;
    let exact = trajectory_at_time(&params, horizon);

    let mut previous_error = f64::INFINITY;
    for dt in [0.1, 0.05, 0.01, 0.001] {
        let mut state = FlightState::at_muzzle(&params);
        for _ in 0..(horizon / dt).round() as usize {
            state = drag::step(state, dt, &params);
        }
        let error = (state.position.y - exact.y).abs();
        // Semi-implicit Euler under constant gravity is off by exactly g*t*dt/2.
        assert_abs_diff_eq!(error, 0.5 * 9.81 * horizon * dt, epsilon = 1e-6);
        assert!(error < previous_error);
        previous_error = error;
    }
}
