//! Clickable anatomical regions.
//!
//! The registry holds the fixed region table, markers give each region an
//! invisible hit-test sphere in the scene, and the resolver maps a click to
//! the nearest marked region along the pointer ray.

pub mod markers;
pub mod registry;
pub mod resolver;
