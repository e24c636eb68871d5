use crate::engine::scene::lighting::{LightingInput, parse_control_value};
use bevy::prelude::*;
use std::sync::{Arc, Mutex};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::engine::ui::info_box::InfoBox;

#[cfg(target_arch = "wasm32")]
use web_sys::{Event, HtmlInputElement, window};

/// Which range input a raw value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderControl {
    LightIntensity,
    Exposure,
}

impl SliderControl {
    pub fn element_id(&self) -> &'static str {
        match self {
            Self::LightIntensity => constants::path::LIGHT_SLIDER_ID,
            Self::Exposure => constants::path::BRIGHTNESS_SLIDER_ID,
        }
    }

    fn input(&self, value: f32) -> LightingInput {
        match self {
            Self::LightIntensity => LightingInput::LightIntensity(value),
            Self::Exposure => LightingInput::Exposure(value),
        }
    }
}

/// Raw slider values pushed by DOM callbacks, drained once per frame.
#[derive(Resource, Clone, Default)]
pub struct SliderQueue(pub Arc<Mutex<Vec<(SliderControl, String)>>>);

impl SliderQueue {
    pub fn push(&self, control: SliderControl, raw: String) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push((control, raw));
        }
    }
}

/// Plugin wiring the host document's sliders and info box to the scene.
pub struct DomControlsPlugin;

impl Plugin for DomControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, drain_slider_queue);

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_slider_listeners)
            .add_systems(Update, write_info_box_to_dom);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_slider_listeners(mut commands: Commands) {
    let queue = SliderQueue::default();

    let Some(document) = window().and_then(|w| w.document()) else {
        error!("Document not available; sliders disabled");
        return;
    };

    for control in [SliderControl::LightIntensity, SliderControl::Exposure] {
        let Some(element) = document.get_element_by_id(control.element_id()) else {
            warn!("Slider #{} not found", control.element_id());
            continue;
        };
        let Ok(slider) = element.dyn_into::<HtmlInputElement>() else {
            warn!("#{} is not an input element", control.element_id());
            continue;
        };

        let queue_clone = queue.clone();
        let slider_clone = slider.clone();
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            queue_clone.push(control, slider_clone.value());
        }) as Box<dyn FnMut(Event)>);

        if let Err(e) =
            slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register listener on #{}: {:?}", control.element_id(), e);
        }

        // Prevent closure from being dropped by transferring ownership to JS.
        closure.forget();
    }

    commands.insert_resource(queue);
}

/// Turn queued slider values into lighting inputs. Unparsable values are dropped.
pub fn drain_slider_queue(
    queue: Option<Res<SliderQueue>>,
    mut inputs: EventWriter<LightingInput>,
) {
    let Some(queue) = queue else {
        return;
    };

    let pending = if let Ok(mut pending) = queue.0.lock() {
        std::mem::take(&mut *pending)
    } else {
        Vec::new()
    };

    for (control, raw) in pending {
        match parse_control_value(&raw) {
            Some(value) => {
                inputs.write(control.input(value));
            }
            None => warn!("Ignoring non-numeric value {:?} from #{}", raw, control.element_id()),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn write_info_box_to_dom(info_box: Res<InfoBox>) {
    if !info_box.is_changed() {
        return;
    }
    let Some(content) = info_box.content() else {
        return;
    };

    let Some(document) = window().and_then(|w| w.document()) else {
        error!("Document not available");
        return;
    };
    let Some(element) = document.get_element_by_id(constants::path::INFO_BOX_ID) else {
        warn!("Info box #{} not found", constants::path::INFO_BOX_ID);
        return;
    };

    element.set_inner_html(&content.to_html());
    if let Ok(html_element) = element.dyn_into::<web_sys::HtmlElement>() {
        if let Err(e) = html_element.style().set_property("display", "block") {
            error!("Failed to show info box: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::lighting::{LightingControls, apply_lighting_input};

    fn slider_app(queue: &SliderQueue) -> App {
        let mut app = App::new();
        app.add_event::<LightingInput>()
            .init_resource::<LightingControls>()
            .insert_resource(queue.clone())
            .add_systems(Update, (drain_slider_queue, apply_lighting_input).chain());
        app
    }

    #[test]
    fn slider_values_reach_lighting_controls() {
        let queue = SliderQueue::default();
        let mut app = slider_app(&queue);

        queue.push(SliderControl::LightIntensity, "2.5".into());
        queue.push(SliderControl::Exposure, "1.8".into());
        app.update();

        let controls = *app.world().resource::<LightingControls>();
        assert_eq!(controls.light_intensity, 2.5);
        assert_eq!(controls.exposure, 1.8);
        assert!(queue.0.lock().unwrap().is_empty());
    }

    #[test]
    fn bad_values_are_skipped() {
        let queue = SliderQueue::default();
        let mut app = slider_app(&queue);

        queue.push(SliderControl::LightIntensity, "".into());
        app.update();
        assert_eq!(
            *app.world().resource::<LightingControls>(),
            LightingControls::default()
        );
    }

    #[test]
    fn missing_queue_is_a_no_op() {
        let mut app = App::new();
        app.add_event::<LightingInput>()
            .add_systems(Update, drain_slider_queue);
        app.update();
    }

    #[test]
    fn element_ids_match_host_page() {
        assert_eq!(SliderControl::LightIntensity.element_id(), "lightSlider");
        assert_eq!(SliderControl::Exposure.element_id(), "brightnessSlider");
    }
}
