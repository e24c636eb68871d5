use bevy::prelude::*;

/// Lifecycle of the brain model. Every state is renderable; only the mesh differs.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum ModelState {
    #[default]
    Loading,
    Loaded,
    Failed,
}

impl ModelState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Failed => "failed",
        }
    }
}

// Log transitions so a missing model is visible in the console.
pub fn log_model_state(state: Res<State<ModelState>>) {
    if state.is_changed() && !state.is_added() {
        info!("→ Model state: {}", state.get().as_str());
    }
}
