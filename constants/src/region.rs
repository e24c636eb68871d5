/// Static description of a clickable brain region.
pub struct RegionDefinition {
    pub name: &'static str,
    /// Model-space position of the region marker.
    pub position: [f32; 3],
    /// Research techniques in display order.
    pub techniques: &'static [&'static str],
}

pub const BRAIN_REGIONS: &[RegionDefinition] = &[
    RegionDefinition {
        name: "Broca’s Area",
        position: [-0.5, 1.0, 0.3],
        techniques: &["fMRI", "MEG", "ECoG"],
    },
    RegionDefinition {
        name: "Wernicke’s Area",
        position: [0.7, 0.8, -0.4],
        techniques: &["TMS", "EEG"],
    },
    RegionDefinition {
        name: "Motor Cortex",
        position: [-0.3, 1.5, 0.2],
        techniques: &["Cortical Stimulation", "DTI"],
    },
];
