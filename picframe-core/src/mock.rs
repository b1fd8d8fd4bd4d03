//! Recording collaborators for tests

use std::string::{String, ToString};
use std::vec::Vec;

use picframe_protocol::{Color, GattProfile};

use crate::traits::{
    CharacteristicHandle, DisplayDriver, DisplayError, ImageStorage, RadioError, RadioLink,
    StorageError, TransportError,
};

/// Handle the mock radio assigns at registration
pub const MOCK_HANDLE: CharacteristicHandle = CharacteristicHandle(0x002A);

/// Display call, in the order received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOp {
    Clear(Color),
    Brightness(u8),
    DrawImage(String),
    FillRect(u16, u16, u16, u16, Color),
}

#[derive(Debug, Default)]
pub struct MockDisplay {
    pub ops: Vec<DisplayOp>,
    pub fail_draw: Option<DisplayError>,
    pub fail_fill: Option<DisplayError>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplayDriver for MockDisplay {
    fn clear(&mut self, color: Color) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::Clear(color));
        Ok(())
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::Brightness(level));
        Ok(())
    }

    fn draw_image(&mut self, path: &str) -> Result<(), DisplayError> {
        if let Some(e) = self.fail_draw {
            return Err(e);
        }
        self.ops.push(DisplayOp::DrawImage(path.to_string()));
        Ok(())
    }

    fn fill_rect(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        color: Color,
    ) -> Result<(), DisplayError> {
        if let Some(e) = self.fail_fill {
            return Err(e);
        }
        self.ops.push(DisplayOp::FillRect(x0, y0, x1, y1, color));
        Ok(())
    }
}

/// Flat directory mounted at `/sd`
#[derive(Debug)]
pub struct MockStorage {
    pub root: String,
    pub files: Vec<String>,
    pub available: bool,
    pub listed_dirs: Vec<String>,
}

impl MockStorage {
    pub fn new(files: &[&str]) -> Self {
        Self {
            root: "/sd".to_string(),
            files: files.iter().map(|f| f.to_string()).collect(),
            available: true,
            listed_dirs: Vec::new(),
        }
    }
}

impl ImageStorage for MockStorage {
    fn list_files(&mut self, dir: &str, visit: &mut dyn FnMut(&str)) -> Result<(), StorageError> {
        self.listed_dirs.push(dir.to_string());
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        if dir != self.root {
            return Err(StorageError::NotFound);
        }
        for file in &self.files {
            visit(file);
        }
        Ok(())
    }

    fn exists(&mut self, path: &str) -> Result<bool, StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        let name = path
            .strip_prefix(self.root.as_str())
            .and_then(|rest| rest.strip_prefix('/'));
        Ok(name.is_some_and(|name| self.files.iter().any(|f| f == name)))
    }
}

#[derive(Debug, Default)]
pub struct MockRadio {
    pub registered: Vec<GattProfile>,
    pub adverts: Vec<String>,
    pub notifications: Vec<Vec<u8>>,
    /// Zero-based notify calls that fail
    pub fail_notify: Vec<usize>,
    pub notify_calls: usize,
    pub fail_register: bool,
    pub fail_advertise: bool,
}

impl MockRadio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notification payloads joined back together
    pub fn received(&self) -> Vec<u8> {
        self.notifications.concat()
    }
}

impl RadioLink for MockRadio {
    fn register_service(
        &mut self,
        profile: &GattProfile,
    ) -> Result<CharacteristicHandle, RadioError> {
        if self.fail_register {
            return Err(RadioError::Registration);
        }
        self.registered.push(*profile);
        Ok(MOCK_HANDLE)
    }

    fn start_advertising(&mut self, device_name: &str) -> Result<(), RadioError> {
        self.adverts.push(device_name.to_string());
        if self.fail_advertise {
            return Err(RadioError::Advertising);
        }
        Ok(())
    }

    fn notify(
        &mut self,
        handle: CharacteristicHandle,
        fragment: &[u8],
    ) -> Result<(), TransportError> {
        let call = self.notify_calls;
        self.notify_calls += 1;
        if handle != MOCK_HANDLE {
            return Err(TransportError::Rejected);
        }
        if self.fail_notify.contains(&call) {
            return Err(TransportError::Busy);
        }
        self.notifications.push(fragment.to_vec());
        Ok(())
    }
}
