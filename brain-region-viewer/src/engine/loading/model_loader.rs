use crate::engine::core::app_state::ModelState;
use crate::engine::loading::error::ModelLoadError;
use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use constants::path::BRAIN_MODEL_PATH;
use constants::render_settings::MODEL_SCALE;

/// Handle and outcome of the one-shot brain model load.
#[derive(Resource, Default)]
pub struct ModelLoader {
    handle: Option<Handle<Gltf>>,
    failure: Option<ModelLoadError>,
    last_stage: Option<&'static str>,
}

impl ModelLoader {
    pub fn failure(&self) -> Option<&ModelLoadError> {
        self.failure.as_ref()
    }
}

/// Outcome of inspecting the asset server for the model handle.
#[derive(Debug, PartialEq)]
pub enum LoadPoll {
    Pending,
    Ready,
    Failed(ModelLoadError),
}

/// Short name of a load state for progress logging.
pub fn load_stage(state: Option<&LoadState>) -> &'static str {
    match state {
        Some(LoadState::Loading) => "fetching",
        Some(LoadState::Loaded) => "decoded",
        Some(LoadState::Failed(_)) => "failed",
        _ => "queued",
    }
}

pub fn poll_load_state(state: Option<&LoadState>, path: &str) -> LoadPoll {
    match state {
        Some(LoadState::Loaded) => LoadPoll::Ready,
        Some(LoadState::Failed(error)) => {
            LoadPoll::Failed(ModelLoadError::from_asset_error(path, error))
        }
        _ => LoadPoll::Pending,
    }
}

// Start the load; the scene keeps rendering lights and markers meanwhile.
pub fn start_loading(mut model_loader: ResMut<ModelLoader>, asset_server: Res<AssetServer>) {
    info!("Loading brain model from {}", BRAIN_MODEL_PATH);
    model_loader.handle = Some(asset_server.load(BRAIN_MODEL_PATH));
}

pub fn check_model_loading(
    mut model_loader: ResMut<ModelLoader>,
    mut next_state: ResMut<NextState<ModelState>>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
) {
    let Some(handle) = model_loader.handle.clone() else {
        return;
    };

    let load_state = asset_server.get_load_state(&handle);
    let stage = load_stage(load_state.as_ref());
    if model_loader.last_stage != Some(stage) {
        info!("Brain model {}: {}", BRAIN_MODEL_PATH, stage);
        model_loader.last_stage = Some(stage);
    }

    let outcome = match poll_load_state(load_state.as_ref(), BRAIN_MODEL_PATH) {
        LoadPoll::Pending => return,
        LoadPoll::Failed(err) => Err(err),
        LoadPoll::Ready => {
            let Some(gltf) = gltfs.get(&handle) else {
                return;
            };
            gltf.default_scene
                .clone()
                .or_else(|| gltf.scenes.first().cloned())
                .map(|scene| (scene, gltf.meshes.len()))
                .ok_or_else(|| ModelLoadError::no_scene(BRAIN_MODEL_PATH))
        }
    };

    match outcome {
        Ok((scene, mesh_count)) => {
            commands.spawn((
                Name::new("Brain model"),
                SceneRoot(scene),
                Transform::from_scale(Vec3::splat(MODEL_SCALE)),
            ));
            info!("Brain model loaded: {} meshes", mesh_count);
            next_state.set(ModelState::Loaded);
        }
        Err(err) => {
            error!("{}", err);
            model_loader.failure = Some(err);
            next_state.set(ModelState::Failed);
        }
    }
}
