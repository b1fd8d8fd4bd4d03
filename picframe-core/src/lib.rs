//! Board-agnostic connection and command engine for the picture frame
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (display, image storage, radio)
//! - Connection state machine
//! - Command dispatcher
//! - Link event queue
//! - Engine tying the link, pipeline and collaborators together
//! - Configuration types and TOML loader

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod queue;
pub mod state;
pub mod traits;

#[cfg(test)]
mod mock;

pub use engine::{Engine, EngineStats, PipelineError, StartError};
pub use queue::{DefaultQueue, LinkEventQueue, QueueError, QueuedEvent};
pub use state::{ConnectionState, LinkEvent};
