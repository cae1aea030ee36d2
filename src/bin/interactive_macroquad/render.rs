use cannon_sim::core::mapper::{CANVAS_HEIGHT_PX, CANVAS_WIDTH_PX};
use cannon_sim::core::model::Point;
use cannon_sim::core::playback::Phase;
use macroquad::prelude::*;

use crate::constants::{
    BARREL, BARREL_BAND, BARREL_WIDTH_PX, GROUND, GROUND_STRIP_PX, PROJECTILE_RADIUS_PX, SKY,
    START_BUTTON_COLOR, START_BUTTON_TEXT, TARGET_RING_RADII_PX, TITLE_SCREEN_BG, TRAJECTORY,
    WHEEL, WHEEL_RADIUS_PX,
};
use crate::state::AppRuntime;

/// Places the fixed-size logical canvas inside the window, scaled uniformly.
#[derive(Clone, Copy)]
pub(crate) struct SceneView {
    pub(crate) origin: Vec2,
    pub(crate) fit: f32,
}

impl SceneView {
    pub(crate) fn fit_into(left: f32, top: f32, avail_w: f32, avail_h: f32) -> Self {
        let fit = (avail_w / CANVAS_WIDTH_PX as f32)
            .min(avail_h / CANVAS_HEIGHT_PX as f32)
            .max(0.1);
        Self {
            origin: vec2(left, top),
            fit,
        }
    }

    pub(crate) fn to_screen(&self, px: Point) -> Vec2 {
        self.origin + vec2(px.x as f32, px.y as f32) * self.fit
    }

    pub(crate) fn width(&self) -> f32 {
        CANVAS_WIDTH_PX as f32 * self.fit
    }

    pub(crate) fn height(&self) -> f32 {
        CANVAS_HEIGHT_PX as f32 * self.fit
    }
}

pub(crate) fn draw_ui_text(
    text: &str,
    x: f32,
    y: f32,
    font_size: u16,
    color: Color,
    font: Option<&Font>,
) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font,
            font_size,
            color,
            ..Default::default()
        },
    );
}

fn draw_backdrop(view: SceneView) {
    draw_rectangle(view.origin.x, view.origin.y, view.width(), view.height(), SKY);
    let strip = GROUND_STRIP_PX * view.fit;
    draw_rectangle(
        view.origin.x,
        view.origin.y + view.height() - strip,
        view.width(),
        strip,
        GROUND,
    );
}

fn draw_cannon(view: SceneView, state: &AppRuntime) {
    let display = state.controller.display();
    let pivot = view.to_screen(display.pivot_px);
    let muzzle = view.to_screen(state.controller.muzzle_display(&state.params));
    let barrel_w = BARREL_WIDTH_PX * view.fit;

    draw_line(pivot.x, pivot.y, muzzle.x, muzzle.y, barrel_w, BARREL);

    // Reinforcing bands at breech and muzzle.
    let along = (muzzle - pivot).normalize_or_zero();
    let band = 10.0 * view.fit;
    let breech_end = pivot + along * band;
    let muzzle_start = muzzle - along * band;
    draw_line(pivot.x, pivot.y, breech_end.x, breech_end.y, barrel_w, BARREL_BAND);
    draw_line(muzzle_start.x, muzzle_start.y, muzzle.x, muzzle.y, barrel_w, BARREL_BAND);

    draw_circle(pivot.x, pivot.y, WHEEL_RADIUS_PX * view.fit, WHEEL);
}

fn draw_target(view: SceneView, state: &AppRuntime) {
    let Ok(mapper) = state.controller.display().mapper(&state.params) else {
        return;
    };
    let on_line = mapper.to_display(Point::new(state.params.target_distance_m, 0.0));
    let ground_y = CANVAS_HEIGHT_PX - f64::from(GROUND_STRIP_PX);
    let center = view.to_screen(Point::new(on_line.x, ground_y));
    for (idx, radius) in TARGET_RING_RADII_PX.iter().enumerate() {
        let color = if idx % 2 == 0 { RED } else { WHITE };
        draw_circle(center.x, center.y, radius * view.fit, color);
    }
}

fn draw_trajectory(view: SceneView, state: &AppRuntime) {
    let samples = state.controller.trajectory();
    if samples.is_empty() {
        return;
    }
    let mut prev = view.to_screen(state.controller.muzzle_display(&state.params));
    for sample in samples {
        let cur = view.to_screen(*sample);
        draw_line(prev.x, prev.y, cur.x, cur.y, 2.0 * view.fit, TRAJECTORY);
        prev = cur;
    }
}

fn draw_projectile(view: SceneView, state: &AppRuntime) {
    if matches!(state.controller.phase(), Phase::Idle) {
        return;
    }
    let p = view.to_screen(state.controller.projectile_display(&state.params));
    draw_circle(p.x, p.y, PROJECTILE_RADIUS_PX * view.fit, BLACK);
}

pub(crate) fn draw_scene(view: SceneView, state: &AppRuntime) {
    draw_backdrop(view);
    draw_cannon(view, state);
    draw_target(view, state);
    draw_trajectory(view, state);
    draw_projectile(view, state);
}

pub(crate) fn draw_title_screen(screen_w: f32, screen_h: f32, font: Option<&Font>) -> bool {
    clear_background(TITLE_SCREEN_BG);

    let title = "Cannon Simulator";
    let title_size: u16 = 96;
    let title_measure = measure_text(title, font, title_size, 1.0);
    let title_x = (screen_w - title_measure.width) * 0.5;
    let title_y = (screen_h * 0.40).max(180.0);
    draw_ui_text(title, title_x, title_y, title_size, BLACK, font);

    let button_w = 300.0;
    let button_h = 84.0;
    let button_rect = Rect::new((screen_w - button_w) * 0.5, title_y + 70.0, button_w, button_h);
    draw_rectangle(
        button_rect.x,
        button_rect.y,
        button_rect.w,
        button_rect.h,
        START_BUTTON_COLOR,
    );
    draw_rectangle_lines(
        button_rect.x,
        button_rect.y,
        button_rect.w,
        button_rect.h,
        3.0,
        WHITE,
    );

    let button_text_size: u16 = 42;
    let button_text_measure = measure_text(START_BUTTON_TEXT, font, button_text_size, 1.0);
    draw_ui_text(
        START_BUTTON_TEXT,
        button_rect.x + (button_rect.w - button_text_measure.width) * 0.5,
        button_rect.y + (button_rect.h + button_text_measure.height) * 0.5 - 8.0,
        button_text_size,
        WHITE,
        font,
    );

    let mouse = mouse_position();
    let clicked_start = is_mouse_button_pressed(MouseButton::Left)
        && button_rect.contains(vec2(mouse.0, mouse.1));
    let hotkey_start = is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Space);

    clicked_start || hotkey_start
}
