use super::markers::MarkerTable;
use super::registry::{Region, RegionId, RegionRegistry};
use crate::engine::camera::orbit_camera::SceneCamera;
use crate::engine::camera::pointer::pointer_ray;
use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Emitted when a click resolves to a region marker.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionSelected {
    pub region: RegionId,
}

/// Pick the first hit carrying a region marker.
///
/// `hits` must be ordered nearest first. Hits without a marker entry are
/// skipped, so a model mesh in front of a marker does not block it.
pub fn resolve_hits<'a>(
    hits: impl IntoIterator<Item = Entity>,
    markers: &MarkerTable,
    registry: &'a RegionRegistry,
) -> Option<(RegionId, &'a Region)> {
    hits.into_iter()
        .filter_map(|entity| markers.region_for(entity))
        .find_map(|id| registry.get(id).map(|region| (id, region)))
}

/// Cast `ray` through the scene meshes and resolve the nearest marker hit.
///
/// The cast only stops early on a marker, so unmarked meshes in front of one
/// are reported and skipped instead of ending the cast.
pub fn pick_region<'a>(
    ray: Ray3d,
    ray_cast: &mut MeshRayCast<'_, '_>,
    markers: &MarkerTable,
    registry: &'a RegionRegistry,
) -> Option<(RegionId, &'a Region)> {
    let stop_at_marker = |entity: Entity| markers.region_for(entity).is_some();
    let settings = MeshRayCastSettings::default().with_early_exit_test(&stop_at_marker);
    let hits = ray_cast.cast_ray(ray, &settings);
    resolve_hits(hits.iter().map(|(e, _)| *e), markers, registry)
}

/// Resolve left clicks over the primary window to regions.
/// A miss emits nothing, leaving whatever is displayed untouched.
pub fn handle_region_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<SceneCamera>>,
    mut ray_cast: MeshRayCast,
    markers: Res<MarkerTable>,
    registry: Res<RegionRegistry>,
    mut selections: EventWriter<RegionSelected>,
) {
    if !mouse_button.just_released(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Some(viewport) = camera.logical_viewport_rect() else {
        return;
    };
    let Some(ray) = pointer_ray(
        cursor_pos - viewport.min,
        viewport.size(),
        camera_transform,
        camera.clip_from_view(),
    ) else {
        return;
    };

    if let Some((id, region)) = pick_region(ray, &mut ray_cast, &markers, &registry) {
        info!("Region selected: {}", region.name);
        selections.write(RegionSelected { region: id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::primitives::Aabb;
    use bevy::render::view::ViewVisibility;
    use constants::render_settings::{
        CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_START_POSITION, MARKER_RADIUS,
    };

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    struct TestScene {
        registry: RegionRegistry,
        markers: MarkerTable,
        spheres: Vec<(Entity, Vec3, f32)>,
        camera: GlobalTransform,
        clip_from_view: Mat4,
    }

    impl TestScene {
        fn new() -> Self {
            let registry = RegionRegistry::builtin().unwrap();
            let mut markers = MarkerTable::default();
            let mut spheres = Vec::new();
            for (id, region) in registry.iter() {
                let entity = Entity::from_raw(id.0 as u32 + 1);
                markers.insert(entity, id);
                spheres.push((entity, region.position, MARKER_RADIUS));
            }

            Self {
                registry,
                markers,
                spheres,
                camera: GlobalTransform::from(Transform::from_translation(Vec3::from_array(
                    CAMERA_START_POSITION,
                ))),
                clip_from_view: Mat4::perspective_infinite_reverse_rh(
                    CAMERA_FOV_DEGREES.to_radians(),
                    VIEWPORT.x / VIEWPORT.y,
                    CAMERA_NEAR,
                ),
            }
        }

        fn project(&self, point: Vec3) -> Vec2 {
            let view_from_world = self.camera.compute_matrix().inverse();
            let ndc = (self.clip_from_view * view_from_world).project_point3(point);
            Vec2::new(
                (ndc.x + 1.0) * 0.5 * VIEWPORT.x,
                (1.0 - ndc.y) * 0.5 * VIEWPORT.y,
            )
        }

        /// Nearest-first sphere intersections, standing in for the engine's mesh ray cast.
        fn cast(&self, cursor: Vec2) -> Vec<Entity> {
            let ray = pointer_ray(cursor, VIEWPORT, &self.camera, self.clip_from_view).unwrap();
            let mut hits: Vec<(f32, Entity)> = self
                .spheres
                .iter()
                .filter_map(|(entity, centre, radius)| {
                    ray_sphere(ray, *centre, *radius).map(|t| (t, *entity))
                })
                .collect();
            hits.sort_by(|a, b| a.0.total_cmp(&b.0));
            hits.into_iter().map(|(_, e)| e).collect()
        }

        fn click(&self, cursor: Vec2) -> Option<&Region> {
            resolve_hits(self.cast(cursor), &self.markers, &self.registry).map(|(_, r)| r)
        }
    }

    fn ray_sphere(ray: Ray3d, centre: Vec3, radius: f32) -> Option<f32> {
        let oc = ray.origin - centre;
        let b = oc.dot(*ray.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let t = -b - disc.sqrt();
        (t >= 0.0).then_some(t)
    }

    #[test]
    fn each_region_resolves_from_its_projection() {
        let scene = TestScene::new();
        for (_, region) in scene.registry.iter() {
            let cursor = scene.project(region.position);
            let hit = scene.click(cursor).expect("marker should be hit");
            assert_eq!(hit.name, region.name);
            assert_eq!(hit.techniques, region.techniques);
        }
    }

    #[test]
    fn motor_cortex_click_reports_techniques() {
        let scene = TestScene::new();
        let (_, motor) = scene.registry.find_by_name("Motor Cortex").unwrap();
        let hit = scene.click(scene.project(motor.position)).unwrap();

        assert_eq!(hit.name, "Motor Cortex");
        assert_eq!(hit.techniques_label(), "Cortical Stimulation, DTI");
    }

    #[test]
    fn empty_space_resolves_to_nothing() {
        let scene = TestScene::new();
        assert!(scene.click(Vec2::new(5.0, 5.0)).is_none());
        assert!(scene.click(VIEWPORT * 0.5).is_none());
    }

    #[test]
    fn model_mesh_hits_are_skipped() {
        let mut scene = TestScene::new();
        let brain = Entity::from_raw(100);
        scene.spheres.push((brain, Vec3::new(0.0, 0.0, 2.0), 1.0));

        // Centre of the viewport: only the untagged mesh is under the cursor.
        assert_eq!(scene.cast(VIEWPORT * 0.5), vec![brain]);
        assert!(scene.click(VIEWPORT * 0.5).is_none());

        // A mesh in front of a marker does not block the marker.
        let (_, broca) = scene.registry.find_by_name("Broca’s Area").unwrap();
        let cursor = scene.project(broca.position);
        let blocker = Entity::from_raw(101);
        scene.spheres.push((blocker, broca.position + Vec3::Z * 2.0, 0.5));
        assert_eq!(scene.cast(cursor)[0], blocker);
        assert_eq!(scene.click(cursor).unwrap().name, "Broca’s Area");
    }

    #[test]
    fn nearest_of_overlapping_markers_wins() {
        let registry = RegionRegistry::builtin().unwrap();
        let mut markers = MarkerTable::default();
        let near = Entity::from_raw(1);
        let far = Entity::from_raw(2);
        markers.insert(near, RegionId(1));
        markers.insert(far, RegionId(0));

        let (_, region) = resolve_hits([near, far], &markers, &registry).unwrap();
        assert_eq!(region.name, "Wernicke’s Area");

        let (_, region) = resolve_hits([far, near], &markers, &registry).unwrap();
        assert_eq!(region.name, "Broca’s Area");
    }

    #[test]
    fn marker_for_unknown_region_is_ignored() {
        let registry = RegionRegistry::builtin().unwrap();
        let mut markers = MarkerTable::default();
        let stale = Entity::from_raw(7);
        let valid = Entity::from_raw(8);
        markers.insert(stale, RegionId(42));
        markers.insert(valid, RegionId(2));

        let (id, _) = resolve_hits([stale, valid], &markers, &registry).unwrap();
        assert_eq!(id, RegionId(2));
    }

    #[derive(Resource)]
    struct ClickRay(Ray3d);

    #[derive(Resource, Default)]
    struct Picked(Option<RegionId>);

    fn pick_system(
        ray: Res<ClickRay>,
        mut ray_cast: MeshRayCast,
        markers: Res<MarkerTable>,
        registry: Res<RegionRegistry>,
        mut picked: ResMut<Picked>,
    ) {
        picked.0 = pick_region(ray.0, &mut ray_cast, &markers, &registry).map(|(id, _)| id);
    }

    fn spawn_sphere_mesh(world: &mut World, centre: Vec3, radius: f32) -> Entity {
        let mesh = world
            .resource_mut::<Assets<Mesh>>()
            .add(Sphere::new(radius).mesh().uv(32, 16));
        let mut visibility = ViewVisibility::default();
        visibility.set();

        world
            .spawn((
                Mesh3d(mesh),
                Aabb::from_min_max(Vec3::splat(-radius), Vec3::splat(radius)),
                GlobalTransform::from_translation(centre),
                visibility,
            ))
            .id()
    }

    fn mesh_cast_app(ray: Ray3d) -> App {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<MarkerTable>()
            .init_resource::<Picked>()
            .insert_resource(RegionRegistry::builtin().unwrap())
            .insert_resource(ClickRay(ray))
            .add_systems(Update, pick_system);
        app
    }

    #[test]
    fn mesh_cast_reaches_marker_behind_model() {
        let ray = Ray3d::new(Vec3::new(0.0, 0.0, 10.0), Dir3::NEG_Z);
        let mut app = mesh_cast_app(ray);

        let world = app.world_mut();
        let marker = spawn_sphere_mesh(world, Vec3::ZERO, MARKER_RADIUS);
        // Unmarked model mesh sitting between the camera and the marker.
        spawn_sphere_mesh(world, Vec3::new(0.0, 0.0, 3.0), 1.0);
        world.resource_mut::<MarkerTable>().insert(marker, RegionId(2));

        app.update();

        assert_eq!(app.world().resource::<Picked>().0, Some(RegionId(2)));
    }

    #[test]
    fn mesh_cast_through_model_only_resolves_nothing() {
        let ray = Ray3d::new(Vec3::new(0.0, 0.0, 10.0), Dir3::NEG_Z);
        let mut app = mesh_cast_app(ray);

        let world = app.world_mut();
        spawn_sphere_mesh(world, Vec3::new(0.0, 0.0, 3.0), 1.0);
        let off_axis = spawn_sphere_mesh(world, Vec3::new(4.0, 0.0, 0.0), MARKER_RADIUS);
        world.resource_mut::<MarkerTable>().insert(off_axis, RegionId(0));

        app.update();

        assert_eq!(app.world().resource::<Picked>().0, None);
    }
}
