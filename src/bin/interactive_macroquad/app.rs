use macroquad::prelude::*;

use crate::constants::{
    HUD_HEIGHT, INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, MSAA_SAMPLES, PANEL_GAP, PANEL_WIDTH,
    SCENE_LEFT, SCENE_TOP, UI_FONT_PATH,
};
use crate::controls::{draw_control_panel, hotkey_actions};
use crate::gameplay::{apply_actions, apply_keyboard_adjustments, step_active_flight};
use crate::hud::draw_hud;
use crate::render::{SceneView, draw_scene, draw_title_screen};
use crate::state::{AppRuntime, AppScene};

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Cannon Simulator".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

pub(crate) async fn run() {
    let ui_font = match load_ttf_font(UI_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(err) => {
            println!("Could not load '{UI_FONT_PATH}': {err}. Falling back to default font.");
            None
        }
    };

    let mut state = match AppRuntime::new() {
        Ok(state) => state,
        Err(err) => {
            eprintln!("Error: {err}");
            return;
        }
    };

    loop {
        let frame_dt = get_frame_time();
        let screen_w = screen_width();
        let screen_h = screen_height();

        if state.scene == AppScene::Title {
            if draw_title_screen(screen_w, screen_h, ui_font.as_ref()) {
                state.scene = AppScene::Simulation;
                state.controller.reset();
                state.scheduler.cancel();
            }
            next_frame().await;
            continue;
        }

        let panel_x = (screen_w - PANEL_WIDTH - SCENE_LEFT).max(SCENE_LEFT);
        let view = SceneView::fit_into(
            SCENE_LEFT,
            SCENE_TOP,
            panel_x - PANEL_GAP - SCENE_LEFT,
            screen_h - SCENE_TOP - HUD_HEIGHT,
        );

        clear_background(Color::from_rgba(250, 251, 253, 255));

        let actions =
            hotkey_actions().merge(draw_control_panel(&mut state, panel_x, SCENE_TOP, PANEL_WIDTH));
        apply_actions(&mut state, actions);
        apply_keyboard_adjustments(&mut state);
        step_active_flight(&mut state, frame_dt);

        draw_scene(view, &state);
        draw_hud(&state, view, ui_font.as_ref());

        next_frame().await;
    }
}
