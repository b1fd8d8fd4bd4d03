//! Link event queue
//!
//! Serializes events delivered from radio callbacks or interrupt context.
//! Producers push through a shared reference; a single consumer drains the
//! queue into the engine.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::{Deque, Vec};

use crate::state::LinkEvent;

/// Largest write payload carried by the queue (ATT attribute maximum)
pub const MAX_WRITE_LEN: usize = 512;

/// Default queue depth
pub const DEFAULT_QUEUE_DEPTH: usize = 8;

/// Owned copy of a [`LinkEvent`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueuedEvent {
    Connected,
    Disconnected,
    Write(Vec<u8, MAX_WRITE_LEN>),
}

impl QueuedEvent {
    /// Borrow as the event the engine consumes
    pub fn as_event(&self) -> LinkEvent<'_> {
        match self {
            QueuedEvent::Connected => LinkEvent::Connected,
            QueuedEvent::Disconnected => LinkEvent::Disconnected,
            QueuedEvent::Write(payload) => LinkEvent::Write(payload),
        }
    }
}

/// Queue errors, returned to the producer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueueError {
    /// No free slot
    Full,
    /// Write payload exceeds [`MAX_WRITE_LEN`]
    PayloadTooLarge,
}

struct Inner<const N: usize> {
    events: Deque<QueuedEvent, N>,
    /// Writes dropped by a disconnect and not yet reported
    purged: u32,
}

impl<const N: usize> Inner<N> {
    /// Queue a disconnect, making room if needed
    ///
    /// Queued writes are dropped. If only link events remain and the queue
    /// is full, they collapse to `Connected, Disconnected`: from either link
    /// state that ends advertising again.
    fn push_disconnect(&mut self) {
        let mut kept = Deque::new();
        while let Some(queued) = self.events.pop_front() {
            if queued.as_event().is_link_event() {
                let _ = kept.push_back(queued);
            } else {
                self.purged = self.purged.saturating_add(1);
            }
        }
        self.events = kept;

        if matches!(self.events.back(), Some(QueuedEvent::Disconnected)) {
            return;
        }
        if self.events.is_full() {
            self.events.clear();
            if N > 1 {
                let _ = self.events.push_back(QueuedEvent::Connected);
            }
        }
        let _ = self.events.push_back(QueuedEvent::Disconnected);
    }
}

/// Bounded FIFO of link events behind a blocking mutex
pub struct LinkEventQueue<M: RawMutex, const N: usize> {
    inner: Mutex<M, RefCell<Inner<N>>>,
}

/// Queue with [`DEFAULT_QUEUE_DEPTH`] slots
pub type DefaultQueue<M> = LinkEventQueue<M, DEFAULT_QUEUE_DEPTH>;

impl<M: RawMutex, const N: usize> LinkEventQueue<M, N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Inner {
                events: Deque::new(),
                purged: 0,
            })),
        }
    }

    /// Enqueue an event
    ///
    /// A `Disconnected` always succeeds and drops every write still queued
    /// for the lost link.
    pub fn push(&self, event: QueuedEvent) -> Result<(), QueueError> {
        self.inner.lock(|inner| {
            let mut inner = inner.borrow_mut();
            if matches!(event, QueuedEvent::Disconnected) {
                inner.push_disconnect();
                return Ok(());
            }
            inner.events.push_back(event).map_err(|_| QueueError::Full)
        })
    }

    /// Copy a write payload into the queue
    pub fn push_write(&self, payload: &[u8]) -> Result<(), QueueError> {
        let payload = Vec::from_slice(payload).map_err(|_| QueueError::PayloadTooLarge)?;
        self.push(QueuedEvent::Write(payload))
    }

    /// Take the oldest event
    pub fn pop(&self) -> Option<QueuedEvent> {
        self.inner.lock(|inner| inner.borrow_mut().events.pop_front())
    }

    /// Check if a disconnect is waiting behind the current event
    pub fn link_lost_pending(&self) -> bool {
        self.inner.lock(|inner| {
            inner
                .borrow()
                .events
                .iter()
                .any(|event| matches!(event, QueuedEvent::Disconnected))
        })
    }

    /// Number of writes dropped by disconnects since the last call
    pub fn take_purged(&self) -> u32 {
        self.inner
            .lock(|inner| core::mem::take(&mut inner.borrow_mut().purged))
    }

    pub fn len(&self) -> usize {
        self.inner.lock(|inner| inner.borrow().events.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<M: RawMutex, const N: usize> Default for LinkEventQueue<M, N> {
    fn default() -> Self {
        Self::new()
    }
}
