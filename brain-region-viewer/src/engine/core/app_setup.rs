use bevy::asset::AssetMetaCheck;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;

// Crate engine modules
use crate::engine::camera::orbit_camera::{OrbitCamera, camera_controller, spawn_scene_camera};
use crate::engine::core::app_state::{ModelState, log_model_state};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::model_loader::{ModelLoader, check_model_loading, start_loading};
use crate::engine::regions::markers::{MarkerTable, spawn_region_markers};
use crate::engine::regions::registry::RegionRegistry;
use crate::engine::regions::resolver::{RegionSelected, handle_region_click};
use crate::engine::scene::lighting::{
    LightingControls, LightingInput, apply_lighting_input, lighting_keyboard_system,
    spawn_lighting,
};
use crate::engine::ui::info_box::{InfoBox, update_info_box};
// Host page integration
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::web::dom_controls::DomControlsPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::ui::info_box::{render_info_panel, spawn_info_panel};

const LOG_FILTER: &str = "wgpu=error,naga=warn,brain_region_viewer=info";

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<ModelState>()
        .add_plugins(WebRpcPlugin)
        .add_plugins(DomControlsPlugin);

    // No ambient term; the directional light is the only source.
    app.insert_resource(AmbientLight {
        brightness: 0.0,
        ..default()
    })
    .insert_resource(ClearColor(Color::BLACK));

    // Application context, created once and alive for the whole run
    app.insert_resource(load_region_registry())
        .init_resource::<MarkerTable>()
        .init_resource::<OrbitCamera>()
        .init_resource::<LightingControls>()
        .init_resource::<InfoBox>()
        .init_resource::<ModelLoader>()
        .add_event::<RegionSelected>()
        .add_event::<LightingInput>();

    app.add_systems(Startup, (setup, spawn_region_markers, start_loading))
        .add_systems(
            Update,
            check_model_loading.run_if(in_state(ModelState::Loading)),
        )
        .add_systems(
            Update,
            (
                log_model_state,
                camera_controller,
                (handle_region_click, update_info_box).chain(),
                (lighting_keyboard_system, apply_lighting_input).chain(),
            ),
        );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, render_info_panel.after(update_info_box));
    }

    app
}

fn load_region_registry() -> RegionRegistry {
    match RegionRegistry::builtin() {
        Ok(registry) => {
            info!("Region registry: {} regions", registry.len());
            registry
        }
        Err(e) => {
            error!("Invalid region table, no regions will be clickable: {}", e);
            RegionRegistry::default()
        }
    }
}

// Lights, camera and overlays; none of these wait on the model.
fn setup(mut commands: Commands, orbit: Res<OrbitCamera>, controls: Res<LightingControls>) {
    spawn_lighting(&mut commands, &controls);
    spawn_scene_camera(&mut commands, &orbit);

    #[cfg(not(target_arch = "wasm32"))]
    {
        spawn_info_panel(&mut commands);
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.into(),
        level: Level::INFO,
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
