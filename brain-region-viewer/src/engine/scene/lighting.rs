use crate::engine::camera::orbit_camera::SceneCamera;
use bevy::prelude::*;
use bevy::render::camera::Exposure;
use constants::render_settings::{
    BLACKOUT_EV100, CONTROL_KEY_STEP, DEFAULT_EXPOSURE, DEFAULT_LIGHT_INTENSITY,
    DIRECTIONAL_LIGHT_POSITION, UNIT_EXPOSURE_EV100,
};

/// Marks the directional light driven by the light intensity control.
#[derive(Component)]
pub struct SceneLight;

/// Current values of the two lighting controls.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LightingControls {
    pub light_intensity: f32,
    /// Multiplier on the camera's unit exposure.
    pub exposure: f32,
}

impl Default for LightingControls {
    fn default() -> Self {
        Self {
            light_intensity: DEFAULT_LIGHT_INTENSITY,
            exposure: DEFAULT_EXPOSURE,
        }
    }
}

impl LightingControls {
    /// Camera EV100 for the current exposure multiplier.
    /// A multiplier of zero or below has no logarithm and maps to a black frame.
    pub fn camera_ev100(&self) -> f32 {
        if self.exposure <= 0.0 {
            return BLACKOUT_EV100;
        }
        UNIT_EXPOSURE_EV100 - self.exposure.log2()
    }
}

/// A new value for one lighting control, from a slider, keyboard or RPC.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum LightingInput {
    LightIntensity(f32),
    Exposure(f32),
}

/// Parse a range input value. Values are used as-is, without clamping.
pub fn parse_control_value(raw: &str) -> Option<f32> {
    raw.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

pub fn spawn_lighting(commands: &mut Commands, controls: &LightingControls) {
    commands.spawn((
        Name::new("Scene light"),
        DirectionalLight {
            illuminance: controls.light_intensity,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(DIRECTIONAL_LIGHT_POSITION))
            .looking_at(Vec3::ZERO, Vec3::Y),
        SceneLight,
    ));
}

/// Fold lighting inputs into `LightingControls` and push them to the light and camera.
pub fn apply_lighting_input(
    mut inputs: EventReader<LightingInput>,
    mut controls: ResMut<LightingControls>,
    mut lights: Query<&mut DirectionalLight, With<SceneLight>>,
    mut cameras: Query<&mut Exposure, With<SceneCamera>>,
) {
    for input in inputs.read() {
        match *input {
            LightingInput::LightIntensity(value) => controls.light_intensity = value,
            LightingInput::Exposure(value) => controls.exposure = value,
        }
    }

    if !controls.is_changed() {
        return;
    }

    for mut light in &mut lights {
        light.illuminance = controls.light_intensity;
    }
    for mut exposure in &mut cameras {
        exposure.ev100 = controls.camera_ev100();
    }
}

/// Keyboard stand-in for the DOM sliders on native builds.
/// `[`/`]` step the light intensity, `-`/`=` step the exposure.
pub fn lighting_keyboard_system(
    #[cfg(not(target_arch = "wasm32"))] keyboard: Res<ButtonInput<KeyCode>>,
    #[cfg(not(target_arch = "wasm32"))] controls: Res<LightingControls>,
    #[cfg(not(target_arch = "wasm32"))] mut inputs: EventWriter<LightingInput>,
) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut light_step = 0.0;
        let mut exposure_step = 0.0;

        if keyboard.just_pressed(KeyCode::BracketLeft) {
            light_step -= CONTROL_KEY_STEP;
        }
        if keyboard.just_pressed(KeyCode::BracketRight) {
            light_step += CONTROL_KEY_STEP;
        }
        if keyboard.just_pressed(KeyCode::Minus) {
            exposure_step -= CONTROL_KEY_STEP;
        }
        if keyboard.just_pressed(KeyCode::Equal) {
            exposure_step += CONTROL_KEY_STEP;
        }

        if light_step != 0.0 {
            let value = controls.light_intensity + light_step;
            info!("Light intensity: {:.2}", value);
            inputs.write(LightingInput::LightIntensity(value));
        }
        if exposure_step != 0.0 {
            let value = controls.exposure + exposure_step;
            info!("Exposure: {:.2}", value);
            inputs.write(LightingInput::Exposure(value));
        }
    }
}
