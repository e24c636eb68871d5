/// Brain model, relative to the asset root.
pub const BRAIN_MODEL_PATH: &str = "brain.glb";

/// Range input driving the directional light intensity.
pub const LIGHT_SLIDER_ID: &str = "lightSlider";

/// Range input driving the camera exposure.
pub const BRIGHTNESS_SLIDER_ID: &str = "brightnessSlider";

/// Element receiving the selected region's name and techniques.
pub const INFO_BOX_ID: &str = "info-box";

/// Canvas selector the wasm build renders into.
pub const CANVAS_SELECTOR: &str = "#bevy";
