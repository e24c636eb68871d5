//! Static configuration shared across the workspace.
//!
//! Region definitions, render settings and resource paths live here so the
//! viewer never hard-codes magic numbers inline.

/// Anatomical region table and lookup helpers.
pub mod region;

/// Camera framing, lighting defaults and marker geometry.
pub mod render_settings;

/// Asset paths and host document element identifiers.
pub mod path;
