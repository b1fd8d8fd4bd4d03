//! Picframe BLE Command Protocol
//!
//! This crate defines the text protocol spoken over the frame's single GATT
//! characteristic. The client writes a short command; the frame answers with
//! one or more notifications carrying a status string.
//!
//! # Protocol Overview
//!
//! Commands are plain UTF-8 text, matched exactly:
//! ```text
//! ┌──────────────┬───────────────────────────────┐
//! │ DI:<name>    │ Show image <name> from the SD │
//! │ R G B W BK   │ Fill screen (lowercase too)   │
//! │ LI           │ List image files              │
//! └──────────────┴───────────────────────────────┘
//! ```
//!
//! Replies are split into fragments of at most the chunk size (20 bytes by
//! default) and sent back to back. There is no length header and no
//! end-of-message marker; the client reassembles by concatenation.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod advert;
pub mod chunk;
pub mod color;
pub mod command;
pub mod report;

pub use advert::{
    AdvertError, AdvertisingData, GattProfile, FRAME_PROFILE, MAX_ADV_DATA_LEN, MAX_DEVICE_NAME_LEN,
};
pub use chunk::{ChunkError, Chunker, Fragments, DEFAULT_CHUNK_SIZE};
pub use color::Color;
pub use command::{parse, Command, ParseError, MAX_IMAGE_NAME_LEN};
pub use report::{encode_report, DispatchResult, ReportOverflow, ReportText, MAX_REPORT_LEN};
