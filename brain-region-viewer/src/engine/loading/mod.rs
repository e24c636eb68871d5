//! Brain model loading.
//!
//! Wraps the engine's asynchronous GLB load in an explicit
//! `Loading -> Loaded | Failed` lifecycle. Failures are logged and kept for
//! reporting; the rest of the scene is unaffected.

/// Classified model load failures.
pub mod error;

/// Model handle resource, load start and completion polling.
pub mod model_loader;
