//! Scene lighting and its user-facing controls.

/// Directional light, exposure and the control inputs that drive them.
pub mod lighting;
