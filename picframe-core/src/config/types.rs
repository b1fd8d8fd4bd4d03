//! Configuration type definitions
//!
//! Runtime configuration for the frame. Nothing here is persisted; the
//! board loads it at boot from embedded TOML or uses the defaults.

use heapless::{String, Vec};
use picframe_protocol::advert::MAX_DEVICE_NAME_LEN;
use picframe_protocol::{Color, DEFAULT_CHUNK_SIZE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum storage root length
pub const MAX_ROOT_LEN: usize = 32;

/// Maximum image extension length (including the dot)
pub const MAX_EXTENSION_LEN: usize = 8;

/// Maximum number of accepted image extensions
pub const MAX_EXTENSIONS: usize = 4;

/// Default advertised device name
pub const DEFAULT_DEVICE_NAME: &str = "ESP32_Test";

/// Default storage mount point
pub const DEFAULT_ROOT: &str = "/sd";

/// Default image extensions
pub const DEFAULT_EXTENSIONS: [&str; 2] = [".jpg", ".raw"];

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Device name is empty
    EmptyDeviceName,
    /// Chunk size of zero
    ZeroChunkSize,
    /// Display width or height of zero
    ZeroDimension,
    /// Storage root is empty
    EmptyRoot,
}

/// What to do with writes that are not commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnrecognizedPolicy {
    /// Log and drop, no notification
    #[default]
    Silent,
    /// Notify the parse error message
    Notify,
}

/// BLE link configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BleConfig {
    /// Advertised device name
    pub device_name: String<MAX_DEVICE_NAME_LEN>,
    /// Notification fragment size in bytes
    pub chunk_size: u16,
}

impl Default for BleConfig {
    fn default() -> Self {
        Self {
            device_name: String::try_from(DEFAULT_DEVICE_NAME).unwrap_or_default(),
            chunk_size: DEFAULT_CHUNK_SIZE as u16,
        }
    }
}

/// Display panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Panel width in pixels
    pub width: u16,
    /// Panel height in pixels
    pub height: u16,
    /// Backlight level applied before every draw (None = leave as is)
    pub brightness: Option<u8>,
    /// Color used to clear the frame before drawing
    #[cfg_attr(feature = "serde", serde(with = "color_name"))]
    pub background: Color,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 240,
            height: 320,
            brightness: None,
            background: Color::Black,
        }
    }
}

impl DisplayConfig {
    /// Inclusive corner coordinates covering the whole frame
    pub fn full_frame(&self) -> (u16, u16, u16, u16) {
        (
            0,
            0,
            self.width.saturating_sub(1),
            self.height.saturating_sub(1),
        )
    }
}

/// Image storage configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StorageConfig {
    /// Mount point of the image directory
    pub root: String<MAX_ROOT_LEN>,
    /// File suffixes listed as images (case sensitive)
    pub extensions: Vec<String<MAX_EXTENSION_LEN>, MAX_EXTENSIONS>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let mut extensions = Vec::new();
        for ext in DEFAULT_EXTENSIONS {
            if let Ok(ext) = String::try_from(ext) {
                let _ = extensions.push(ext);
            }
        }

        Self {
            root: String::try_from(DEFAULT_ROOT).unwrap_or_default(),
            extensions,
        }
    }
}

impl StorageConfig {
    /// Check whether `file_name` has one of the image extensions
    pub fn is_image(&self, file_name: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| file_name.ends_with(ext.as_str()))
    }
}

/// Command handling configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CommandConfig {
    /// Reporting policy for unparseable writes
    pub unrecognized: UnrecognizedPolicy,
}

/// Complete frame configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameConfig {
    pub ble: BleConfig,
    pub display: DisplayConfig,
    pub storage: StorageConfig,
    pub commands: CommandConfig,
}

impl FrameConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the configuration for values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ble.device_name.is_empty() {
            return Err(ConfigError::EmptyDeviceName);
        }
        if self.ble.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if self.storage.root.is_empty() {
            return Err(ConfigError::EmptyRoot);
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod color_name {
    use picframe_protocol::Color;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(color.name())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let name = <&str>::deserialize(deserializer)?;
        Color::from_name(name).ok_or_else(|| D::Error::custom("unknown color"))
    }
}
