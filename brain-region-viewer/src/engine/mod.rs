pub mod camera;
pub mod core;
pub mod loading;
pub mod regions;
pub mod scene;
pub mod ui;
