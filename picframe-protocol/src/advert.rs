//! Advertising payload and GATT identifiers
//!
//! Legacy advertising data layout:
//! ```text
//! ┌──────────────┬────────────────────────┬─────────────────────────┐
//! │ Flags        │ 16-bit service UUIDs   │ Complete local name     │
//! │ 02 01 06     │ 03 03 0D 18            │ len+1 09 <name bytes>   │
//! └──────────────┴────────────────────────┴─────────────────────────┘
//! ```

use heapless::Vec;

/// Maximum legacy advertising data length
pub const MAX_ADV_DATA_LEN: usize = 31;

/// Primary service exposing the command characteristic
pub const SERVICE_UUID: u16 = 0x180A;

/// Command characteristic (read | write | notify)
pub const CHARACTERISTIC_UUID: u16 = 0x2A00;

/// Service UUID listed in the advertising data
pub const ADVERTISED_SERVICE_UUID: u16 = 0x180D;

/// Advertising interval handed to the radio stack
pub const ADV_INTERVAL: u32 = 100;

// Characteristic property bits
pub const PROP_READ: u8 = 0x02;
pub const PROP_WRITE: u8 = 0x08;
pub const PROP_NOTIFY: u8 = 0x10;

/// Service layout and advertising parameters registered with the radio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GattProfile {
    pub service_uuid: u16,
    pub characteristic_uuid: u16,
    /// `PROP_*` bits of the command characteristic
    pub properties: u8,
    pub adv_interval: u32,
}

/// The frame's single service with its command characteristic
pub const FRAME_PROFILE: GattProfile = GattProfile {
    service_uuid: SERVICE_UUID,
    characteristic_uuid: CHARACTERISTIC_UUID,
    properties: PROP_READ | PROP_WRITE | PROP_NOTIFY,
    adv_interval: ADV_INTERVAL,
};

// AD types
const AD_FLAGS: u8 = 0x01;
const AD_COMPLETE_16BIT_UUIDS: u8 = 0x03;
const AD_COMPLETE_LOCAL_NAME: u8 = 0x09;

/// LE General Discoverable, BR/EDR not supported
const FLAGS_GENERAL_DISCOVERABLE: u8 = 0x06;

/// Bytes used before the name bytes
const HEADER_LEN: usize = 3 + 4 + 2;

/// Longest device name that fits the payload
pub const MAX_DEVICE_NAME_LEN: usize = MAX_ADV_DATA_LEN - HEADER_LEN;

/// Advertising payload errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdvertError {
    /// Device name is empty
    EmptyName,
    /// Device name exceeds [`MAX_DEVICE_NAME_LEN`]
    NameTooLong,
}

/// Encoded advertising data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvertisingData {
    bytes: Vec<u8, MAX_ADV_DATA_LEN>,
}

impl AdvertisingData {
    /// Build the advertising payload for `device_name`
    pub fn new(device_name: &str) -> Result<Self, AdvertError> {
        let name = device_name.as_bytes();
        if name.is_empty() {
            return Err(AdvertError::EmptyName);
        }
        if name.len() > MAX_DEVICE_NAME_LEN {
            return Err(AdvertError::NameTooLong);
        }

        let [uuid_lo, uuid_hi] = ADVERTISED_SERVICE_UUID.to_le_bytes();
        let mut bytes = Vec::new();
        bytes
            .extend_from_slice(&[
                0x02,
                AD_FLAGS,
                FLAGS_GENERAL_DISCOVERABLE,
                0x03,
                AD_COMPLETE_16BIT_UUIDS,
                uuid_lo,
                uuid_hi,
                name.len() as u8 + 1,
                AD_COMPLETE_LOCAL_NAME,
            ])
            .map_err(|_| AdvertError::NameTooLong)?;
        bytes
            .extend_from_slice(name)
            .map_err(|_| AdvertError::NameTooLong)?;

        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
