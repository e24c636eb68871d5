//! JSON-RPC 2.0 bridge to an embedding page.
//!
//! When the viewer runs inside an iframe, the parent window can drive the
//! lighting controls and query regions or model state via `postMessage`.
//! Region selections and model state changes are pushed back as
//! notifications. On native targets outgoing messages are dropped.
//!
//! ## Methods
//!
//! - `get_regions`: list regions with positions and techniques
//! - `get_lighting`: current light intensity and exposure
//! - `set_light_intensity` / `set_exposure`: `{ "value": <number> }`
//! - `get_model_state`: `loading`, `loaded` or `failed`, with the load error
//!
//! ## Notifications
//!
//! - `region_selected`: `{ name, techniques }`
//! - `model_state_changed`: `{ state, error }`
//!
//! ## Error codes
//!
//! - `-32601`: Method not found
//! - `-32602`: Invalid params

/// Request dispatch, notification queueing and the WASM message listener.
pub mod web_rpc;
