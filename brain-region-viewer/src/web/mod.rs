//! Host document integration for the WASM build.
//!
//! Slider input events are queued from DOM callbacks and drained by a system
//! each frame; the info box element mirrors the `InfoBox` resource.

pub mod dom_controls;
