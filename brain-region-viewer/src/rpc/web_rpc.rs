use crate::engine::core::app_state::ModelState;
use crate::engine::loading::error::ModelLoadError;
use crate::engine::loading::model_loader::ModelLoader;
use crate::engine::regions::registry::RegionRegistry;
use crate::engine::regions::resolver::RegionSelected;
use crate::engine::scene::lighting::{LightingControls, LightingInput};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource queueing messages for the embedding page.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the parent window without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Read-only view of the scene handed to request handlers.
pub struct RpcContext<'a> {
    pub registry: &'a RegionRegistry,
    pub controls: &'a LightingControls,
    pub model_state: ModelState,
    pub model_failure: Option<&'a ModelLoadError>,
}

/// Plugin establishing the postMessage bridge to an embedding page.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    notify_region_selected,
                    notify_model_state,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping the message queue filled by the WASM listener.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing an incoming RPC message from the parent window.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    registry: Res<RegionRegistry>,
    controls: Res<LightingControls>,
    model_state: Res<State<ModelState>>,
    model_loader: Res<ModelLoader>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut lighting_events: EventWriter<LightingInput>,
) {
    let context = RpcContext {
        registry: &registry,
        controls: &controls,
        model_state: *model_state.get(),
        model_failure: model_loader.failure(),
    };

    let mut lighting = Vec::new();
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                if let Some(response) = handle_rpc_request(&request, &context, &mut lighting) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => warn!("Discarding malformed RPC message: {}", parse_error),
        }
    }

    lighting_events.write_batch(lighting);
}

/// Dispatch one request. Only requests carrying an ID get a response.
pub fn handle_rpc_request(
    request: &RpcRequest,
    context: &RpcContext,
    lighting: &mut Vec<LightingInput>,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "get_regions" => handle_get_regions(context.registry),
        "get_lighting" => handle_get_lighting(context.controls),
        "set_light_intensity" => {
            handle_set_lighting(&request.params, lighting, LightingInput::LightIntensity)
        }
        "set_exposure" => handle_set_lighting(&request.params, lighting, LightingInput::Exposure),
        "get_model_state" => handle_get_model_state(context),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return request.id.clone().map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(serde_json::json!({"method": request.method})),
                )
            });
        }
    };

    let id = request.id.clone()?;
    Some(match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    })
}

fn handle_get_regions(registry: &RegionRegistry) -> Result<serde_json::Value, RpcError> {
    let regions: Vec<_> = registry
        .iter()
        .map(|(_, region)| {
            serde_json::json!({
                "name": region.name,
                "position": region.position.to_array(),
                "techniques": region.techniques,
            })
        })
        .collect();

    Ok(serde_json::json!({ "regions": regions }))
}

fn handle_get_lighting(controls: &LightingControls) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "light_intensity": controls.light_intensity,
        "exposure": controls.exposure,
    }))
}

/// Shared handler for the two lighting setters; `{ "value": <number> }`.
fn handle_set_lighting(
    params: &serde_json::Value,
    lighting: &mut Vec<LightingInput>,
    input: fn(f32) -> LightingInput,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct ValueParams {
        value: f32,
    }

    let parsed = serde_json::from_value::<ValueParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected numeric 'value' parameter"))?;

    if !parsed.value.is_finite() {
        return Err(RpcError::invalid_params("'value' must be finite"));
    }

    lighting.push(input(parsed.value));
    Ok(serde_json::json!({
        "success": true,
        "value": parsed.value
    }))
}

fn handle_get_model_state(context: &RpcContext) -> Result<serde_json::Value, RpcError> {
    Ok(model_state_payload(context.model_state, context.model_failure))
}

fn model_state_payload(state: ModelState, failure: Option<&ModelLoadError>) -> serde_json::Value {
    serde_json::json!({
        "state": state.as_str(),
        "error": failure,
    })
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

fn notify_region_selected(
    mut selections: EventReader<RegionSelected>,
    registry: Res<RegionRegistry>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for selected in selections.read() {
        if let Some(region) = registry.get(selected.region) {
            rpc_interface.send_notification(
                "region_selected",
                serde_json::json!({
                    "name": region.name,
                    "techniques": region.techniques,
                }),
            );
        }
    }
}

fn notify_model_state(
    model_state: Res<State<ModelState>>,
    model_loader: Res<ModelLoader>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if !model_state.is_changed() {
        return;
    }
    rpc_interface.send_notification(
        "model_state_changed",
        model_state_payload(*model_state.get(), model_loader.failure()),
    );
}

/// Send queued notifications and responses to the parent window.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Notifications first, then responses, to keep ordering stable.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}
