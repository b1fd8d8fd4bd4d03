//! Link events delivered by the radio stack

/// Events that drive the connection state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent<'a> {
    /// A client connected
    Connected,
    /// The client disconnected or the link was lost
    Disconnected,
    /// The client wrote to the command characteristic
    Write(&'a [u8]),
}

impl LinkEvent<'_> {
    /// Check if this event changes the link state
    pub fn is_link_event(&self) -> bool {
        matches!(self, LinkEvent::Connected | LinkEvent::Disconnected)
    }
}
