use super::registry::{RegionId, RegionRegistry};
use bevy::prelude::*;
use constants::render_settings::{MARKER_RADIUS, MARKER_SEGMENTS};
use std::collections::HashMap;

/// Side table from marker entity to the region it stands for.
/// Entities absent from the table (the brain mesh, lights) are never resolved to a region.
#[derive(Resource, Default, Debug)]
pub struct MarkerTable {
    markers: HashMap<Entity, RegionId>,
}

impl MarkerTable {
    pub fn insert(&mut self, entity: Entity, region: RegionId) {
        self.markers.insert(entity, region);
    }

    pub fn region_for(&self, entity: Entity) -> Option<RegionId> {
        self.markers.get(&entity).copied()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// Spawn one invisible hit-test sphere per registered region.
pub fn spawn_region_markers(
    mut commands: Commands,
    registry: Res<RegionRegistry>,
    mut table: ResMut<MarkerTable>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(
        Sphere::new(MARKER_RADIUS)
            .mesh()
            .uv(MARKER_SEGMENTS, MARKER_SEGMENTS),
    );
    // Fully transparent rather than hidden so the default ray cast visibility still sees it.
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 0.0, 0.0, 0.0),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    for (id, region) in registry.iter() {
        let entity = commands
            .spawn((
                Name::new(format!("Region marker: {}", region.name)),
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(region.position),
            ))
            .id();
        table.insert(entity, id);
    }

    info!("Spawned {} region markers", table.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_one_marker_per_region() {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<MarkerTable>()
            .insert_resource(RegionRegistry::builtin().unwrap())
            .add_systems(Update, spawn_region_markers);

        app.update();

        let world = app.world_mut();
        let mut query = world.query::<(Entity, &Transform)>();
        let table = world.resource::<MarkerTable>();
        assert_eq!(table.len(), 3);

        let mut positions: Vec<(RegionId, Vec3)> = query
            .iter(world)
            .filter_map(|(entity, transform)| {
                table
                    .region_for(entity)
                    .map(|id| (id, transform.translation))
            })
            .collect();
        positions.sort_by_key(|(id, _)| id.0);

        assert_eq!(positions[2], (RegionId(2), Vec3::new(-0.3, 1.5, 0.2)));
        assert_eq!(positions[0].1, Vec3::new(-0.5, 1.0, 0.3));
    }
}
