//! Core application setup and state management.
//!
//! Builds the single application context that owns the scene, camera, light
//! and region tables, for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the app, registers resources and events, and schedules the
/// loading, interaction and presentation systems.
pub mod app_setup;

/// Model lifecycle state.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
