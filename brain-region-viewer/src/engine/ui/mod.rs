//! Region info box state and its native overlay.

pub mod info_box;
