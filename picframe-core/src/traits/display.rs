//! Display driver trait for the frame's panel

use picframe_protocol::Color;

/// Errors that can occur while drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Image file could not be opened or read
    Io,
    /// Image data is not in a supported format
    Decode,
    /// Coordinates outside the panel
    InvalidCoordinates,
    /// SPI/bus communication error
    Communication,
}

/// Trait for the raster display
///
/// Implementations wrap the panel driver (ILI9341 or similar). All drawing
/// calls may block for the duration of the transfer.
pub trait DisplayDriver {
    /// Fill the whole frame buffer with `color`
    fn clear(&mut self, color: Color) -> Result<(), DisplayError>;

    /// Set backlight brightness (0-255)
    fn set_brightness(&mut self, level: u8) -> Result<(), DisplayError>;

    /// Draw the image at `path` full screen
    fn draw_image(&mut self, path: &str) -> Result<(), DisplayError>;

    /// Fill the rectangle from (`x0`, `y0`) to (`x1`, `y1`), inclusive
    fn fill_rect(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        color: Color,
    ) -> Result<(), DisplayError>;

    /// Prepare the frame before any draw or fill
    ///
    /// Applies `brightness` if given, then clears to `background`.
    fn prepare(&mut self, brightness: Option<u8>, background: Color) -> Result<(), DisplayError> {
        if let Some(level) = brightness {
            self.set_brightness(level)?;
        }
        self.clear(background)
    }
}

impl<T: DisplayDriver + ?Sized> DisplayDriver for &mut T {
    fn clear(&mut self, color: Color) -> Result<(), DisplayError> {
        T::clear(self, color)
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), DisplayError> {
        T::set_brightness(self, level)
    }

    fn draw_image(&mut self, path: &str) -> Result<(), DisplayError> {
        T::draw_image(self, path)
    }

    fn fill_rect(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        color: Color,
    ) -> Result<(), DisplayError> {
        T::fill_rect(self, x0, y0, x1, y1, color)
    }

    fn prepare(&mut self, brightness: Option<u8>, background: Color) -> Result<(), DisplayError> {
        T::prepare(self, brightness, background)
    }
}
