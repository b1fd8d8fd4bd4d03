//! Notification chunking
//!
//! BLE 4.x only guarantees 20 bytes of payload per notification
//! (23-byte ATT MTU minus the 3-byte header). Outbound messages are split
//! into ordered, non-overlapping fragments of at most the chunk size:
//! ```text
//! "OK: Image displayed sunset.jpg"
//!  ├──────── 20 B ─────┤├─ 10 B ─┤
//! ```
//! Fragments carry no header. Concatenating them yields the message.

use core::num::NonZeroUsize;

/// Default fragment size (minimum guaranteed notification payload)
pub const DEFAULT_CHUNK_SIZE: usize = 20;

const DEFAULT_SIZE: NonZeroUsize = match NonZeroUsize::new(DEFAULT_CHUNK_SIZE) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

/// Chunker construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChunkError {
    /// Fragment size must be at least one byte
    ZeroSize,
}

/// Splits messages into transport-sized fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    size: NonZeroUsize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self { size: DEFAULT_SIZE }
    }
}

impl Chunker {
    /// Create a chunker with the given fragment size
    pub fn new(size: usize) -> Result<Self, ChunkError> {
        NonZeroUsize::new(size)
            .map(|size| Self { size })
            .ok_or(ChunkError::ZeroSize)
    }

    /// Fragment size in bytes
    pub fn size(&self) -> usize {
        self.size.get()
    }

    /// Number of fragments a message of `len` bytes is sent as
    ///
    /// An empty message is still sent as one empty fragment.
    pub fn fragment_count(&self, len: usize) -> usize {
        len.div_ceil(self.size.get()).max(1)
    }

    /// Iterate over the fragments of `message`, in send order
    pub fn fragments<'a>(&self, message: &'a [u8]) -> Fragments<'a> {
        Fragments {
            rest: message,
            size: self.size.get(),
            remaining: self.fragment_count(message.len()),
        }
    }
}

/// Iterator over message fragments
#[derive(Debug, Clone)]
pub struct Fragments<'a> {
    rest: &'a [u8],
    size: usize,
    remaining: usize,
}

impl<'a> Iterator for Fragments<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let split = self.size.min(self.rest.len());
        let (fragment, rest) = self.rest.split_at(split);
        self.rest = rest;
        Some(fragment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Fragments<'_> {}
