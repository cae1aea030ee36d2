use cannon_sim::core::ballistics;
use macroquad::prelude::*;

use crate::constants::{CONTROLS_Y, TITLE_Y};
use crate::controls::phase_text;
use crate::render::{SceneView, draw_ui_text};
use crate::state::AppRuntime;

pub(crate) fn draw_hud(state: &AppRuntime, view: SceneView, font: Option<&Font>) {
    draw_header_block(view.origin.x, font);
    draw_readout_block(state, view, font);
}

fn draw_header_block(left: f32, font: Option<&Font>) {
    draw_ui_text(
        "Cannon Simulator - Projectile Motion",
        left,
        TITLE_Y,
        30,
        Color::from_rgba(30, 30, 35, 255),
        font,
    );
    draw_ui_text(
        "Controls: Space fire | P pause | Enter play | R reset | Up/Down angle | Left/Right speed | M model | T real time",
        left,
        CONTROLS_Y,
        18,
        DARKGRAY,
        font,
    );
}

fn draw_readout_block(state: &AppRuntime, view: SceneView, font: Option<&Font>) {
    let header_color = Color::from_rgba(30, 30, 35, 255);
    let left = view.origin.x;
    let below = view.origin.y + view.height();
    let metrics = state.controller.metrics();
    let flight = state.controller.flight_state();
    let p = &state.params;

    draw_ui_text(
        &format!(
            "Speed: {:.1} m/s | Angle: {:.0} deg | Mass: {:.2} kg | Gravity: {:.2} m/s^2",
            p.launch_speed_mps, p.launch_angle_deg, p.mass_kg, p.gravity_mps2
        ),
        left,
        below + 28.0,
        22,
        header_color,
        font,
    );

    // Distance shows the live x until landing, then the frozen landing distance.
    let distance = metrics
        .landing_distance_m
        .unwrap_or_else(|| flight.position.x.max(0.0));
    draw_ui_text(
        &format!(
            "Max height: {:.2} m | Distance: {:.2} m | Time: {:.2} s | State: {}",
            metrics.max_height_m,
            distance,
            flight.elapsed_s,
            phase_text(state.controller.phase())
        ),
        left,
        below + 56.0,
        20,
        BLUE,
        font,
    );

    let prediction = match ballistics::flight_summary(p) {
        Some(summary) => format!(
            "No-drag prediction -> height {:.2} m, range {:.2} m, flight {:.2} s",
            summary.max_height_m, summary.range_m, summary.time_of_flight_s
        ),
        None => "No-drag prediction -> never lands (zero gravity)".to_string(),
    };
    draw_ui_text(
        &format!("{prediction} | {}", state.status_line),
        left,
        below + 82.0,
        18,
        DARKGRAY,
        font,
    );
}
