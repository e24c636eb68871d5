/// Vertical field of view of the scene camera, in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

/// Initial camera position; the orbit focus is the world origin.
pub const CAMERA_START_POSITION: [f32; 3] = [0.0, 0.0, 10.0];

pub const ORBIT_MIN_RADIUS: f32 = 0.5;
pub const ORBIT_MAX_RADIUS: f32 = 100.0;

/// Uniform scale applied to the loaded brain scene.
pub const MODEL_SCALE: f32 = 0.2;

pub const DIRECTIONAL_LIGHT_POSITION: [f32; 3] = [2.0, 2.0, 2.0];
pub const DEFAULT_LIGHT_INTENSITY: f32 = 1.0;
pub const DEFAULT_EXPOSURE: f32 = 1.0;

/// EV100 at which one lux of illuminance renders at unit brightness.
/// Light intensity is applied as raw illuminance, so this keeps an intensity of 1.0 readable.
pub const UNIT_EXPOSURE_EV100: f32 = -0.263;

/// EV100 used for a zero or negative exposure multiplier; renders black.
pub const BLACKOUT_EV100: f32 = 64.0;

/// Step applied by native keyboard shortcuts to light intensity and exposure.
pub const CONTROL_KEY_STEP: f32 = 0.1;

pub const MARKER_RADIUS: f32 = 0.1;
pub const MARKER_SEGMENTS: u32 = 16;
