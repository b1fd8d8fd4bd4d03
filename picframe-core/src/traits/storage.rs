//! Image storage trait (SD card or other block storage)

use core::fmt::Write;

use heapless::String;

/// Maximum resolved path length in bytes
pub const MAX_PATH_LEN: usize = 128;

/// A path under the storage root
pub type ImagePath = String<MAX_PATH_LEN>;

/// Errors that can occur with storage access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// File does not exist
    NotFound,
    /// Card missing or filesystem not mounted
    Unavailable,
    /// Name would leave the storage root
    InvalidName,
    /// Resolved path exceeds [`MAX_PATH_LEN`]
    PathTooLong,
    /// Read error
    Io,
}

/// Trait for the file store holding the images
///
/// Only the root directory is ever listed; nothing is recursive.
pub trait ImageStorage {
    /// Call `visit` once per entry of `dir`, in the filesystem's order
    fn list_files(&mut self, dir: &str, visit: &mut dyn FnMut(&str)) -> Result<(), StorageError>;

    /// Check whether `path` names an existing file
    fn exists(&mut self, path: &str) -> Result<bool, StorageError>;

    /// Resolve `name` to an existing file directly under `root`
    fn resolve(&mut self, root: &str, name: &str) -> Result<ImagePath, StorageError> {
        if name.is_empty() || name.contains('/') || name == "." || name == ".." {
            return Err(StorageError::InvalidName);
        }

        let mut path = ImagePath::new();
        write!(path, "{}/{}", root.trim_end_matches('/'), name)
            .map_err(|_| StorageError::PathTooLong)?;

        if self.exists(&path)? {
            Ok(path)
        } else {
            Err(StorageError::NotFound)
        }
    }
}

impl<T: ImageStorage + ?Sized> ImageStorage for &mut T {
    fn list_files(&mut self, dir: &str, visit: &mut dyn FnMut(&str)) -> Result<(), StorageError> {
        T::list_files(self, dir, visit)
    }

    fn exists(&mut self, path: &str) -> Result<bool, StorageError> {
        T::exists(self, path)
    }

    fn resolve(&mut self, root: &str, name: &str) -> Result<ImagePath, StorageError> {
        T::resolve(self, root, name)
    }
}
