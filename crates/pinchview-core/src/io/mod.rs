pub mod decode;
pub mod gif_probe;
pub mod resource;
