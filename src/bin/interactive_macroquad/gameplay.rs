use cannon_sim::core::params::{Parameter, StepDirection};
use cannon_sim::core::playback::Phase;
use cannon_sim::core::scheduler::TickPolicy;
use macroquad::prelude::*;

use crate::controls::FrameActions;
use crate::state::AppRuntime;

pub(crate) fn apply_actions(state: &mut AppRuntime, actions: FrameActions) {
    if actions.reset {
        state.controller.reset();
        state.scheduler.cancel();
        state.status_line = "Reset".to_string();
    }

    if actions.fire && state.controller.fire(&state.params) {
        state.scheduler.cancel();
        state.status_line = format!("Fired ({} model)", state.controller.active_model());
    }

    if actions.pause && state.controller.pause() {
        state.scheduler.cancel();
        state.status_line = "Paused".to_string();
    }

    if actions.resume && state.controller.resume() {
        state.status_line = "Resumed".to_string();
    }

    if actions.toggle_model {
        state.toggle_model();
    }

    if actions.toggle_real_time {
        let next = match state.scheduler.policy() {
            TickPolicy::PerFrame => TickPolicy::RealTime,
            TickPolicy::RealTime => TickPolicy::PerFrame,
        };
        state.scheduler.set_policy(next);
    }
}

/// Arrow keys nudge angle and speed by their step size, like the -/+ buttons.
pub(crate) fn apply_keyboard_adjustments(state: &mut AppRuntime) {
    let bindings = [
        (KeyCode::Up, Parameter::LaunchAngle, StepDirection::Increase),
        (KeyCode::Down, Parameter::LaunchAngle, StepDirection::Decrease),
        (KeyCode::Right, Parameter::LaunchSpeed, StepDirection::Increase),
        (KeyCode::Left, Parameter::LaunchSpeed, StepDirection::Decrease),
    ];
    for (key, parameter, direction) in bindings {
        if is_key_pressed(key) {
            state.params.step(parameter, direction);
        }
    }
}

pub(crate) fn step_active_flight(state: &mut AppRuntime, frame_dt: f32) {
    let was_running = state.controller.phase() == Phase::Running;
    state
        .scheduler
        .on_frame(&mut state.controller, &state.params, f64::from(frame_dt));

    if was_running && state.controller.phase() == Phase::Landed {
        let metrics = state.controller.metrics();
        state.status_line = format!(
            "Landed at {:.2} m after {:.2} s",
            metrics.landing_distance_m.unwrap_or(0.0),
            state.controller.elapsed_s()
        );
    }
}
