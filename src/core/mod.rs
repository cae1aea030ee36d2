pub mod ballistics;
pub mod drag;
pub mod error;
pub mod mapper;
pub mod model;
pub mod params;
pub mod playback;
pub mod scheduler;
pub mod window;
