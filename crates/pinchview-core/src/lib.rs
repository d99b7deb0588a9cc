pub mod animation;
pub mod config;
pub mod consts;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod haptics;
pub mod io;
pub mod previewer;
pub mod viewport;
pub mod zoom;
