use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::render::camera::Exposure;
use constants::render_settings::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_START_POSITION, ORBIT_MAX_RADIUS,
    ORBIT_MIN_RADIUS, UNIT_EXPOSURE_EV100,
};

const ROTATE_SENSITIVITY: f32 = 0.005;
const PAN_SENSITIVITY: f32 = 0.0015;
const ZOOM_SENSITIVITY: f32 = 0.1;
const PITCH_LIMIT: f32 = 1.55;

/// Marks the single camera used for rendering and click resolution.
#[derive(Component)]
pub struct SceneCamera;

/// Orbit state around a focus point. The camera transform is derived from it every frame.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl OrbitCamera {
    pub fn looking_at(position: Vec3, focus: Vec3) -> Self {
        let offset = position - focus;
        let radius = offset.length().clamp(ORBIT_MIN_RADIUS, ORBIT_MAX_RADIUS);
        let direction = offset.try_normalize().unwrap_or(Vec3::Z);

        Self {
            focus,
            radius,
            yaw: direction.x.atan2(direction.z),
            pitch: (-direction.y.asin()).clamp(-PITCH_LIMIT, PITCH_LIMIT),
        }
    }

    fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn transform(&self) -> Transform {
        let rotation = self.rotation();
        Transform {
            translation: self.focus + rotation * Vec3::Z * self.radius,
            rotation,
            ..default()
        }
    }

    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ROTATE_SENSITIVITY;
        self.pitch = (self.pitch - delta.y * ROTATE_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn pan(&mut self, delta: Vec2) {
        let rotation = self.rotation();
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        self.focus += (-right * delta.x + up * delta.y) * self.radius * PAN_SENSITIVITY;
    }

    /// Positive scroll moves towards the focus.
    pub fn zoom(&mut self, scroll: f32) {
        self.radius =
            (self.radius * (-scroll * ZOOM_SENSITIVITY).exp()).clamp(ORBIT_MIN_RADIUS, ORBIT_MAX_RADIUS);
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_at(Vec3::from_array(CAMERA_START_POSITION), Vec3::ZERO)
    }
}

pub fn spawn_scene_camera(commands: &mut Commands, orbit: &OrbitCamera) {
    commands.spawn((
        Name::new("Scene camera"),
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Exposure {
            ev100: UNIT_EXPOSURE_EV100,
        },
        orbit.transform(),
        SceneCamera,
    ));
}

/// Left drag rotates, right drag pans, wheel dollies.
pub fn camera_controller(
    mut orbit: ResMut<OrbitCamera>,
    mut cameras: Query<&mut Transform, With<SceneCamera>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    if mouse_delta != Vec2::ZERO {
        if mouse_button.pressed(MouseButton::Left) {
            orbit.rotate(mouse_delta);
        } else if mouse_button.pressed(MouseButton::Right) {
            orbit.pan(mouse_delta);
        }
    }

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        orbit.zoom(scroll_accum);
    }

    if !orbit.is_changed() {
        return;
    }
    for mut transform in &mut cameras {
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_orbit_starts_ten_units_back() {
        let orbit = OrbitCamera::default();
        let transform = orbit.transform();

        assert!((transform.translation - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-5);
        assert!((transform.forward().as_vec3() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn looking_at_round_trips_position() {
        let position = Vec3::new(3.0, 2.0, -4.0);
        let orbit = OrbitCamera::looking_at(position, Vec3::ZERO);
        let transform = orbit.transform();

        assert!((transform.translation - position).length() < 1e-4);
        assert!((transform.forward().as_vec3() - (-position).normalize()).length() < 1e-4);
    }

    #[test]
    fn pitch_and_radius_are_clamped() {
        let mut orbit = OrbitCamera::default();
        orbit.rotate(Vec2::new(0.0, 100_000.0));
        assert_eq!(orbit.pitch, -PITCH_LIMIT);

        orbit.zoom(1_000.0);
        assert_eq!(orbit.radius, ORBIT_MIN_RADIUS);
        orbit.zoom(-1_000.0);
        assert_eq!(orbit.radius, ORBIT_MAX_RADIUS);
    }

    #[test]
    fn panning_moves_focus_in_view_plane() {
        let mut orbit = OrbitCamera::default();
        orbit.pan(Vec2::new(100.0, 0.0));
        assert!(orbit.focus.x < 0.0);
        assert!(orbit.focus.z.abs() < 1e-5);
    }
}
