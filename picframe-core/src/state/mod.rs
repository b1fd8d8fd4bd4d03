//! Connection state machine
//!
//! Tracks the BLE link. The state machine is explicit, finite, and
//! deterministic; the engine performs the side effects it requests.

pub mod events;
pub mod machine;

pub use events::LinkEvent;
pub use machine::{Action, ConnectionState, Transition};
