//! Connection state machine definition
//!
//! The link state is a function of the previous state and one event. Side
//! effects are returned as an [`Action`] for the engine to carry out.

use super::events::LinkEvent;

/// Link states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionState {
    /// Waiting for a client, advertising the device name
    #[default]
    Advertising,
    /// One client connected
    Connected,
}

/// Side effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Nothing to do
    None,
    /// Restart advertising with the configured device name
    StartAdvertising,
    /// Run the write payload through the command pipeline
    Dispatch,
    /// Event is not valid in this state and was dropped
    Ignore,
}

/// Result of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub next: ConnectionState,
    pub action: Action,
}

impl ConnectionState {
    /// Check if a client is connected
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    /// Process an event and return the next state with its side effect
    pub fn transition(self, event: &LinkEvent<'_>) -> Transition {
        use ConnectionState::*;

        let (next, action) = match (self, event) {
            (Advertising, LinkEvent::Connected) => (Connected, Action::None),
            (Advertising, LinkEvent::Disconnected) => (Advertising, Action::None),
            // No client to answer
            (Advertising, LinkEvent::Write(_)) => (Advertising, Action::Ignore),

            // Single client only
            (Connected, LinkEvent::Connected) => (Connected, Action::Ignore),
            (Connected, LinkEvent::Disconnected) => (Advertising, Action::StartAdvertising),
            (Connected, LinkEvent::Write(_)) => (Connected, Action::Dispatch),
        };

        Transition { next, action }
    }
}
