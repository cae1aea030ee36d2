use cannon_sim::core::model::PhysicsModel;
use cannon_sim::core::params::{Parameter, ParameterSet, StepDirection};
use cannon_sim::core::playback::Phase;
use cannon_sim::core::scheduler::TickPolicy;
use macroquad::prelude::*;
use macroquad::ui::{Ui, hash, root_ui, widgets};

use crate::state::AppRuntime;

#[derive(Default, Clone, Copy)]
pub(crate) struct FrameActions {
    pub(crate) fire: bool,
    pub(crate) pause: bool,
    pub(crate) resume: bool,
    pub(crate) reset: bool,
    pub(crate) toggle_model: bool,
    pub(crate) toggle_real_time: bool,
}

impl FrameActions {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            fire: self.fire || other.fire,
            pause: self.pause || other.pause,
            resume: self.resume || other.resume,
            reset: self.reset || other.reset,
            toggle_model: self.toggle_model || other.toggle_model,
            toggle_real_time: self.toggle_real_time || other.toggle_real_time,
        }
    }
}

pub(crate) fn hotkey_actions() -> FrameActions {
    FrameActions {
        fire: is_key_pressed(KeyCode::Space),
        pause: is_key_pressed(KeyCode::P),
        resume: is_key_pressed(KeyCode::Enter),
        reset: is_key_pressed(KeyCode::R),
        toggle_model: is_key_pressed(KeyCode::M),
        toggle_real_time: is_key_pressed(KeyCode::T),
    }
}

fn value_text(parameter: Parameter, value: f64) -> String {
    match parameter {
        Parameter::LaunchAngle => format!("{value:.0}"),
        Parameter::LaunchSpeed | Parameter::TargetDistance => format!("{value:.1}"),
        Parameter::CrossSection => format!("{value:.3}"),
        _ => format!("{value:.2}"),
    }
}

fn parameter_row(
    ui: &mut Ui,
    id: u64,
    label: &str,
    parameter: Parameter,
    params: &mut ParameterSet,
) {
    let bounds = parameter.bounds();
    let before = params.get(parameter) as f32;
    let mut value = before;
    ui.slider(
        id,
        &format!("{label} [{}]", value_text(parameter, params.get(parameter))),
        bounds.min as f32..bounds.max as f32,
        &mut value,
    );
    if value != before {
        // Slider output is always finite.
        let _ = params.set(parameter, f64::from(value));
    }

    if ui.button(None, "-") {
        params.step(parameter, StepDirection::Decrease);
    }
    ui.same_line(0.0);
    if ui.button(None, "+") {
        params.step(parameter, StepDirection::Increase);
    }
}

pub(crate) fn draw_control_panel(
    state: &mut AppRuntime,
    x: f32,
    y: f32,
    w: f32,
) -> FrameActions {
    let model = state.controller.model();
    let real_time = state.scheduler.policy() == TickPolicy::RealTime;
    let phase = state.controller.phase();
    let params = &mut state.params;

    let mut actions = FrameActions::default();
    widgets::Window::new(hash!(), vec2(x, y), vec2(w, 620.0))
        .label("Controls")
        .ui(&mut *root_ui(), |ui| {
            parameter_row(ui, hash!(), "Speed (m/s)", Parameter::LaunchSpeed, params);
            parameter_row(ui, hash!(), "Angle (deg)", Parameter::LaunchAngle, params);
            parameter_row(ui, hash!(), "Mass (kg)", Parameter::Mass, params);
            parameter_row(ui, hash!(), "Gravity (m/s^2)", Parameter::Gravity, params);
            parameter_row(ui, hash!(), "Target (m)", Parameter::TargetDistance, params);
            if model == PhysicsModel::Drag {
                ui.separator();
                parameter_row(ui, hash!(), "Air density", Parameter::AirDensity, params);
                parameter_row(ui, hash!(), "Drag coeff.", Parameter::DragCoefficient, params);
                parameter_row(ui, hash!(), "Area (m^2)", Parameter::CrossSection, params);
            }
            ui.separator();
            if ui.button(None, "Fire (Space)") {
                actions.fire = true;
            }
            ui.same_line(0.0);
            if ui.button(None, "Pause (P)") {
                actions.pause = true;
            }
            ui.same_line(0.0);
            if ui.button(None, "Play (Enter)") {
                actions.resume = true;
            }
            ui.same_line(0.0);
            if ui.button(None, "Reset (R)") {
                actions.reset = true;
            }
            ui.separator();
            if ui.button(None, "Toggle Model (M)") {
                actions.toggle_model = true;
            }
            ui.same_line(0.0);
            if ui.button(None, "Toggle Real Time (T)") {
                actions.toggle_real_time = true;
            }
            ui.label(None, &format!("Model: {model}"));
            ui.label(
                None,
                if real_time {
                    "Playback: real time"
                } else {
                    "Playback: one step per frame"
                },
            );
            ui.label(None, &format!("Flight state: {}", phase_text(phase)));
        });

    actions
}

pub(crate) fn phase_text(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "Ready",
        Phase::Running => "Flying",
        Phase::Paused => "Paused",
        Phase::Landed => "Landed",
    }
}
