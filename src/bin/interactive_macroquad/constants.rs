use macroquad::prelude::Color;

pub const INITIAL_WINDOW_WIDTH: i32 = 1440;
pub const INITIAL_WINDOW_HEIGHT: i32 = 860;
pub const MSAA_SAMPLES: i32 = 4;
pub const UI_FONT_PATH: &str = "assets/fonts/Lato-Regular.ttf";

pub const SCENE_LEFT: f32 = 30.0;
pub const SCENE_TOP: f32 = 110.0;
pub const PANEL_WIDTH: f32 = 380.0;
pub const PANEL_GAP: f32 = 24.0;
pub const HUD_HEIGHT: f32 = 90.0;

pub const TITLE_Y: f32 = 46.0;
pub const CONTROLS_Y: f32 = 84.0;

pub const GROUND_STRIP_PX: f32 = 20.0;
pub const BARREL_WIDTH_PX: f32 = 20.0;
pub const WHEEL_RADIUS_PX: f32 = 20.0;
pub const PROJECTILE_RADIUS_PX: f32 = 5.0;
pub const TARGET_RING_RADII_PX: [f32; 3] = [20.0, 15.0, 10.0];

pub const SKY: Color = Color::new(0.53, 0.81, 0.92, 1.0);
pub const GROUND: Color = Color::new(0.56, 0.93, 0.56, 1.0);
pub const BARREL: Color = Color::new(0.55, 0.27, 0.07, 1.0);
pub const BARREL_BAND: Color = Color::new(0.63, 0.32, 0.18, 1.0);
pub const WHEEL: Color = Color::new(0.82, 0.41, 0.12, 1.0);
pub const TRAJECTORY: Color = Color::new(0.0, 0.0, 1.0, 1.0);
pub const TITLE_SCREEN_BG: Color = Color::new(0.92, 0.93, 0.95, 1.0);
pub const START_BUTTON_COLOR: Color = Color::new(0.14, 0.45, 0.95, 1.0);
pub const START_BUTTON_TEXT: &str = "Start";
