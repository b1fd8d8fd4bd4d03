//! Radio link trait (GATT server and advertising)

use picframe_protocol::GattProfile;

/// Handle of the command characteristic, assigned by the radio stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CharacteristicHandle(pub u16);

/// Errors during radio bring-up or advertising
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// Controller failed to initialize
    Init,
    /// GATT service registration failed
    Registration,
    /// Advertising could not be started
    Advertising,
}

/// Errors sending a single notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// No client connected
    NotConnected,
    /// Controller TX queue full
    Busy,
    /// Stack rejected the notification
    Rejected,
}

/// Trait for the BLE peripheral stack
///
/// Notifications are fire-and-forget: no acknowledgement, no retry.
pub trait RadioLink {
    /// Register the service described by `profile` and return the handle of
    /// its command characteristic
    fn register_service(
        &mut self,
        profile: &GattProfile,
    ) -> Result<CharacteristicHandle, RadioError>;

    /// Start (or restart) advertising under `device_name`
    fn start_advertising(&mut self, device_name: &str) -> Result<(), RadioError>;

    /// Send one notification on `handle`
    fn notify(
        &mut self,
        handle: CharacteristicHandle,
        fragment: &[u8],
    ) -> Result<(), TransportError>;
}

impl<T: RadioLink + ?Sized> RadioLink for &mut T {
    fn register_service(
        &mut self,
        profile: &GattProfile,
    ) -> Result<CharacteristicHandle, RadioError> {
        T::register_service(self, profile)
    }

    fn start_advertising(&mut self, device_name: &str) -> Result<(), RadioError> {
        T::start_advertising(self, device_name)
    }

    fn notify(
        &mut self,
        handle: CharacteristicHandle,
        fragment: &[u8],
    ) -> Result<(), TransportError> {
        T::notify(self, handle, fragment)
    }
}
