//! Hardware abstraction traits
//!
//! These traits define the interface between the command engine
//! and the board's display, storage, and radio stack.

pub mod display;
pub mod radio;
pub mod storage;

pub use display::{DisplayDriver, DisplayError};
pub use radio::{CharacteristicHandle, RadioError, RadioLink, TransportError};
pub use storage::{ImagePath, ImageStorage, StorageError, MAX_PATH_LEN};
