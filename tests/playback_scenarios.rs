use approx::assert_abs_diff_eq;
use cannon_sim::core::mapper::DisplayConfig;
use cannon_sim::core::model::PhysicsModel;
use cannon_sim::core::params::{Parameter, ParameterSet};
use cannon_sim::core::playback::{DEFAULT_TICK_S, Phase, PlaybackController, TickOutcome};
use proptest::prelude::*;

fn controller(model: PhysicsModel) -> PlaybackController {
    PlaybackController::new(model, DisplayConfig::default()).unwrap()
}

#[test]
fn pause_and_resume_match_uninterrupted_flight() {
    for model in [PhysicsModel::Analytic, PhysicsModel::Drag] {
        let params = ParameterSet {
            launch_angle_deg: 50.0,
            ..ParameterSet::default()
        };

        let mut straight = controller(model);
        straight.fire(&params);
        straight.run_to_landing(&params, DEFAULT_TICK_S, 10_000);

        let mut interrupted = controller(model);
        interrupted.fire(&params);
        let mut ticks = 0;
        while interrupted.phase() != Phase::Landed && ticks < 10_000 {
            if ticks % 7 == 3 {
                interrupted.pause();
                for _ in 0..5 {
                    interrupted.tick(DEFAULT_TICK_S, &params);
                }
                interrupted.resume();
            }
            interrupted.tick(DEFAULT_TICK_S, &params);
            ticks += 1;
        }

        assert_eq!(straight.trajectory(), interrupted.trajectory(), "{model}");
        assert_eq!(straight.metrics(), interrupted.metrics(), "{model}");
        assert_eq!(straight.flight_state(), interrupted.flight_state(), "{model}");
    }
}

#[test]
fn drag_model_lands_shorter_than_closed_form() {
    let params = ParameterSet {
        launch_speed_mps: 30.0,
        launch_angle_deg: 45.0,
        mass_kg: 1.0,
        drag_coefficient: 1.0,
        cross_section_m2: 0.1,
        ..ParameterSet::default()
    };

    let mut analytic = controller(PhysicsModel::Analytic);
    analytic.fire(&params);
    let ideal = analytic
        .run_to_landing(&params, DEFAULT_TICK_S, 10_000)
        .expect("analytic shot lands");

    let mut drag = controller(PhysicsModel::Drag);
    drag.fire(&params);
    let real = drag
        .run_to_landing(&params, DEFAULT_TICK_S, 10_000)
        .expect("drag shot lands");

    assert!(real < ideal, "drag {real} vs ideal {ideal}");
    assert!(drag.metrics().max_height_m < analytic.metrics().max_height_m);
}

#[test]
fn dragless_integrator_lands_near_closed_form() {
    let params = ParameterSet {
        launch_angle_deg: 45.0,
        air_density_kgpm3: 0.0,
        ..ParameterSet::default()
    };
    let mut analytic = controller(PhysicsModel::Analytic);
    analytic.fire(&params);
    let ideal = analytic.run_to_landing(&params, 0.001, 100_000).unwrap();

    let mut euler = controller(PhysicsModel::Drag);
    euler.fire(&params);
    let stepped = euler.run_to_landing(&params, 0.001, 100_000).unwrap();

    // Euler lands slightly early; the gap shrinks with dt.
    assert_abs_diff_eq!(stepped, ideal, epsilon = 0.05);
}

#[test]
fn landing_is_reported_once_and_later_ticks_are_ignored() {
    let params = ParameterSet::default();
    let mut c = controller(PhysicsModel::Drag);
    c.fire(&params);

    let mut outcomes = Vec::new();
    for _ in 0..500 {
        outcomes.push(c.tick(DEFAULT_TICK_S, &params));
    }
    let landed = outcomes.iter().filter(|o| **o == TickOutcome::Landed).count();
    assert_eq!(landed, 1);
    let first_ignored = outcomes
        .iter()
        .position(|o| *o == TickOutcome::Ignored)
        .unwrap();
    assert_eq!(outcomes[first_ignored - 1], TickOutcome::Landed);
    assert!(outcomes[first_ignored..].iter().all(|o| *o == TickOutcome::Ignored));

    let frozen = c.flight_state();
    assert_eq!(frozen.position.y, 0.0);
    assert_eq!(c.metrics().landing_distance_m.map(|d| d > 0.0), Some(true));
}

#[test]
fn parameter_edits_mid_flight_apply_on_the_next_tick() {
    let mut params = ParameterSet::default();
    let mut c = controller(PhysicsModel::Analytic);
    c.fire(&params);
    c.tick(DEFAULT_TICK_S, &params);

    params.set(Parameter::Gravity, 0.0).unwrap();
    for _ in 0..200 {
        c.tick(DEFAULT_TICK_S, &params);
    }
    // With gravity switched off the shot can no longer come down.
    assert_eq!(c.phase(), Phase::Running);
    assert!(c.trajectory().iter().all(|p| p.is_finite()));
}

proptest! {
    #[test]
    fn reset_from_any_phase_returns_to_idle(ops in proptest::collection::vec(0u8..5, 0..40)) {
        let params = ParameterSet::default();
        let mut c = controller(PhysicsModel::Analytic);
        for op in ops {
            match op {
                0 => { c.fire(&params); }
                1 => { c.pause(); }
                2 => { c.resume(); }
                3 => { c.tick(DEFAULT_TICK_S, &params); }
                _ => { c.tick(1.0, &params); }
            }
        }
        c.reset();
        prop_assert_eq!(c.phase(), Phase::Idle);
        prop_assert!(c.trajectory().is_empty());
        prop_assert_eq!(c.metrics().max_height_m, 0.0);
        prop_assert_eq!(c.metrics().landing_distance_m, None);
    }

    #[test]
    fn max_height_never_decreases(angle in 1.0..=90.0f64, speed in 1.0..30.0f64) {
        let params = ParameterSet {
            launch_angle_deg: angle,
            launch_speed_mps: speed,
            ..ParameterSet::default()
        };
        let mut c = controller(PhysicsModel::Drag);
        c.fire(&params);
        let mut last = 0.0;
        for _ in 0..2_000 {
            if c.tick(DEFAULT_TICK_S, &params) == TickOutcome::Ignored {
                break;
            }
            let now = c.metrics().max_height_m;
            prop_assert!(now >= last);
            last = now;
        }
        prop_assert_eq!(c.phase(), Phase::Landed);
    }
}
