use bevy::prelude::*;

/// Convert a cursor position (logical pixels, origin top-left) into normalised device coordinates.
pub fn cursor_to_ndc(cursor: Vec2, viewport_size: Vec2) -> Vec2 {
    Vec2::new(
        (cursor.x / viewport_size.x) * 2.0 - 1.0,
        -(cursor.y / viewport_size.y) * 2.0 + 1.0,
    )
}

/// Build the world-space ray passing from the camera through `cursor`.
///
/// `clip_from_view` is the camera projection. Bevy uses reverse-Z, so the near
/// plane sits at NDC depth 1 and the far plane approaches 0.
pub fn pointer_ray(
    cursor: Vec2,
    viewport_size: Vec2,
    camera_transform: &GlobalTransform,
    clip_from_view: Mat4,
) -> Option<Ray3d> {
    if viewport_size.x <= 0.0 || viewport_size.y <= 0.0 {
        return None;
    }

    let ndc = cursor_to_ndc(cursor, viewport_size);
    let world_from_clip = camera_transform.compute_matrix() * clip_from_view.inverse();

    let near = world_from_clip.project_point3(ndc.extend(1.0));
    let far = world_from_clip.project_point3(ndc.extend(f32::EPSILON));
    if !near.is_finite() || !far.is_finite() {
        return None;
    }

    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d::new(near, direction))
}
