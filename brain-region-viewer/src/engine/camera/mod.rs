//! Scene camera and pointer projection.
//!
//! Provides orbit controls around the model origin and the screen-to-world
//! ray construction used by region hit testing.

/// Orbit camera resource, spawn helper and controller system.
pub mod orbit_camera;

/// Screen-space pointer to world-space ray conversion.
pub mod pointer;
