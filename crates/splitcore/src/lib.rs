pub mod config;
pub mod detector;
pub mod geometry;
pub mod locations;
pub mod mesh_data;
pub mod particles;
pub mod split;
pub mod texture;

pub use config::{get_config, reload_config};
