//! Simple TOML parser for frame configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! Picframe configuration. It does NOT support the full TOML language.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [section] headers
//! - Single-line string arrays: extensions = [".jpg", ".raw"]
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings or arrays
//! - Escape sequences in strings
//! - Nested tables
//!
//! Unknown sections and keys are ignored so newer config files still load.

use heapless::{String as HString, Vec};
use picframe_protocol::Color;

use super::types::{FrameConfig, UnrecognizedPolicy, MAX_EXTENSIONS, MAX_EXTENSION_LEN};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// String longer than its field allows
    TooLong,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Ble,
    Display,
    Storage,
    Commands,
    Unknown,
}

/// Parse TOML configuration into a FrameConfig
///
/// Keys not present keep their default values.
pub fn parse_config(input: &str) -> Result<FrameConfig, ParseError> {
    let mut config = FrameConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    Ok(config)
}

/// Parse a section header line like "[display]"
fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let header = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?
        .trim();

    match header {
        "" => Err(ParseError::InvalidSection),
        "ble" => Ok(Section::Ble),
        "display" => Ok(Section::Display),
        "storage" => Ok(Section::Storage),
        "commands" => Ok(Section::Commands),
        _ => Ok(Section::Unknown),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else {
        // Allow unquoted strings for simple values
        Ok(value)
    }
}

/// Parse a string into a bounded heapless string
fn parse_bounded<const N: usize>(value: &str) -> Result<HString<N>, ParseError> {
    HString::try_from(parse_string(value)?).map_err(|_| ParseError::TooLong)
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a color name like "black"
fn parse_color(value: &str) -> Result<Color, ParseError> {
    Color::from_name(parse_string(value)?).ok_or(ParseError::InvalidValue)
}

/// Parse the unrecognized-command policy
fn parse_policy(value: &str) -> Result<UnrecognizedPolicy, ParseError> {
    match parse_string(value)? {
        "silent" => Ok(UnrecognizedPolicy::Silent),
        "notify" => Ok(UnrecognizedPolicy::Notify),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a single-line string array like [".jpg", ".raw"]
fn parse_extensions(
    value: &str,
) -> Result<Vec<HString<MAX_EXTENSION_LEN>, MAX_EXTENSIONS>, ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut extensions = Vec::new();
    for item in inner.split(',') {
        let item = item.trim();
        // Allow trailing comma
        if item.is_empty() {
            continue;
        }
        let ext = parse_bounded(item)?;
        extensions.push(ext).map_err(|_| ParseError::TooManyItems)?;
    }

    Ok(extensions)
}

/// Apply a key/value pair to the section being parsed
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut FrameConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Ble => match key {
            "device_name" | "name" => config.ble.device_name = parse_bounded(value)?,
            "chunk_size" => config.ble.chunk_size = parse_int(value)?,
            _ => {}
        },
        Section::Display => match key {
            "width" => config.display.width = parse_int(value)?,
            "height" => config.display.height = parse_int(value)?,
            "brightness" => config.display.brightness = Some(parse_int(value)?),
            "background" | "bg_color" => config.display.background = parse_color(value)?,
            _ => {}
        },
        Section::Storage => match key {
            "root" => config.storage.root = parse_bounded(value)?,
            "extensions" => config.storage.extensions = parse_extensions(value)?,
            _ => {}
        },
        Section::Commands => {
            if key == "unrecognized" {
                config.commands.unrecognized = parse_policy(value)?;
            }
        }
        Section::Root | Section::Unknown => {
            // No root-level keys
        }
    }

    Ok(())
}
