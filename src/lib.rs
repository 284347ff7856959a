pub mod application;
pub mod camera;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod renderer;
pub mod scene;
pub mod uniform;
pub mod util;
