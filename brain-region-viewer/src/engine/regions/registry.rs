use bevy::prelude::*;
use constants::region::{BRAIN_REGIONS, RegionDefinition};
use thiserror::Error;

/// Index of a region in registry definition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub usize);

/// A named anatomical area with its marker position and associated techniques.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub position: Vec3,
    pub techniques: Vec<String>,
}

impl Region {
    /// Techniques joined for display, preserving definition order.
    pub fn techniques_label(&self) -> String {
        self.techniques.join(", ")
    }
}

impl From<&RegionDefinition> for Region {
    fn from(definition: &RegionDefinition) -> Self {
        Self {
            name: definition.name.to_string(),
            position: Vec3::from_array(definition.position),
            techniques: definition
                .techniques
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate region name: {0}")]
    DuplicateName(String),
}

/// Fixed set of regions, built once at startup and never mutated afterwards.
#[derive(Resource, Debug, Clone, Default)]
pub struct RegionRegistry {
    regions: Vec<Region>,
}

impl RegionRegistry {
    pub fn from_definitions(definitions: &[RegionDefinition]) -> Result<Self, RegistryError> {
        Self::from_regions(definitions.iter().map(Region::from).collect())
    }

    pub fn from_regions(regions: Vec<Region>) -> Result<Self, RegistryError> {
        for (i, region) in regions.iter().enumerate() {
            if regions[..i].iter().any(|r| r.name == region.name) {
                return Err(RegistryError::DuplicateName(region.name.clone()));
            }
        }
        Ok(Self { regions })
    }

    /// Registry built from the static brain region table.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_definitions(BRAIN_REGIONS)
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.0)
    }

    pub fn find_by_name(&self, name: &str) -> Option<(RegionId, &Region)> {
        self.iter().find(|(_, region)| region.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &Region)> {
        self.regions
            .iter()
            .enumerate()
            .map(|(i, region)| (RegionId(i), region))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_keeps_definition_order() {
        let registry = RegionRegistry::builtin().unwrap();
        let names: Vec<_> = registry.iter().map(|(_, r)| r.name.as_str()).collect();
        assert_eq!(names, ["Broca’s Area", "Wernicke’s Area", "Motor Cortex"]);

        let (id, motor) = registry.find_by_name("Motor Cortex").unwrap();
        assert_eq!(id, RegionId(2));
        assert_eq!(motor.position, Vec3::new(-0.3, 1.5, 0.2));
        assert_eq!(motor.techniques_label(), "Cortical Stimulation, DTI");
    }

    #[test]
    fn rejects_duplicate_names() {
        let region = Region {
            name: "Motor Cortex".into(),
            position: Vec3::ZERO,
            techniques: vec!["DTI".into()],
        };
        let err = RegionRegistry::from_regions(vec![region.clone(), region]).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("Motor Cortex".into()));
    }

    #[test]
    fn unknown_id_is_none() {
        let registry = RegionRegistry::builtin().unwrap();
        assert!(registry.get(RegionId(3)).is_none());
        assert_eq!(registry.len(), 3);
    }
}
