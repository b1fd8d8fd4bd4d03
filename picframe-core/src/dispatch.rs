//! Command dispatcher
//!
//! Executes a parsed [`Command`] against the display and storage and turns
//! the outcome into a [`DispatchResult`]. Collaborator failures never escape
//! this module; they become `Err` reports.

use picframe_protocol::{Color, Command, DispatchResult, ReportOverflow, ReportText};

use crate::config::FrameConfig;
use crate::traits::{DisplayDriver, DisplayError, ImageStorage, StorageError};

/// Failure reported for a missing or undrawable image
pub const IMAGE_FAILED: &str = "ERROR: Failed to display image";

/// Success prefix for a drawn image
pub const IMAGE_DISPLAYED: &str = "OK: Image displayed";

/// Separator between listed file names
const LIST_SEPARATOR: char = ',';

/// Collaborator failure behind an `Err` report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    Display(DisplayError),
    Storage(StorageError),
}

impl From<DisplayError> for DispatchError {
    fn from(e: DisplayError) -> Self {
        DispatchError::Display(e)
    }
}

impl From<StorageError> for DispatchError {
    fn from(e: StorageError) -> Self {
        DispatchError::Storage(e)
    }
}

/// Runs commands against borrowed collaborators
///
/// Holds no state between calls: dispatching the same command twice has the
/// same effect twice.
pub struct Dispatcher<'a, D, S> {
    display: &'a mut D,
    storage: &'a mut S,
    config: &'a FrameConfig,
}

impl<'a, D: DisplayDriver, S: ImageStorage> Dispatcher<'a, D, S> {
    pub fn new(display: &'a mut D, storage: &'a mut S, config: &'a FrameConfig) -> Self {
        Self {
            display,
            storage,
            config,
        }
    }

    /// Execute `command` and build its report
    ///
    /// Only fails if the report text overflows.
    pub fn dispatch(&mut self, command: &Command<'_>) -> Result<DispatchResult, ReportOverflow> {
        match *command {
            Command::ShowImage { name } => match self.show_image(name) {
                Ok(()) => {
                    debug!("Image {} displayed", name);
                    DispatchResult::ok_fmt(format_args!("{} {}", IMAGE_DISPLAYED, name))
                }
                Err(e) => {
                    warn!("Failed to display image {}: {:?}", name, e);
                    DispatchResult::err_fmt(format_args!("{} {}", IMAGE_FAILED, name))
                }
            },
            Command::FillColor { color } => match self.fill(color) {
                Ok(()) => {
                    debug!("{:?} screen displayed", color);
                    DispatchResult::ok_fmt(format_args!("{} screen", color.name()))
                }
                Err(e) => {
                    warn!("Failed to fill {:?} screen: {:?}", color, e);
                    DispatchResult::err_fmt(format_args!(
                        "ERROR: Failed to fill {} screen",
                        color.name()
                    ))
                }
            },
            Command::ListImages => Ok(DispatchResult::Ok(self.list_images())),
        }
    }

    /// Clear the frame with the configured brightness and background
    fn prepare(&mut self) -> Result<(), DisplayError> {
        let frame = &self.config.display;
        self.display.prepare(frame.brightness, frame.background)
    }

    fn show_image(&mut self, name: &str) -> Result<(), DispatchError> {
        // Resolve first so a missing file leaves the current picture up
        let path = self.storage.resolve(&self.config.storage.root, name)?;
        self.prepare()?;
        self.display.draw_image(&path)?;
        Ok(())
    }

    fn fill(&mut self, color: Color) -> Result<(), DispatchError> {
        self.prepare()?;
        let (x0, y0, x1, y1) = self.config.display.full_frame();
        self.display.fill_rect(x0, y0, x1, y1, color)?;
        Ok(())
    }

    /// Comma-joined image names in storage order
    ///
    /// Storage errors yield an empty list. Names that would overflow the
    /// report are left out.
    fn list_images(&mut self) -> ReportText {
        let storage_config = &self.config.storage;
        let mut list = ReportText::new();
        let mut skipped = 0usize;

        let result = self.storage.list_files(&storage_config.root, &mut |entry: &str| {
            if !storage_config.is_image(entry) {
                return;
            }
            let separator = if list.is_empty() { 0 } else { 1 };
            if list.len() + separator + entry.len() > list.capacity() {
                skipped += 1;
                return;
            }
            if separator == 1 {
                let _ = list.push(LIST_SEPARATOR);
            }
            let _ = list.push_str(entry);
        });

        if let Err(e) = result {
            warn!("Error listing files: {:?}", e);
            list.clear();
            return list;
        }
        if skipped > 0 {
            warn!("Image list full, {} names left out", skipped);
        }

        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{DisplayOp, MockDisplay, MockStorage};

    fn dispatch(
        command: Command<'_>,
        display: &mut MockDisplay,
        storage: &mut MockStorage,
        config: &FrameConfig,
    ) -> DispatchResult {
        Dispatcher::new(display, storage, config)
            .dispatch(&command)
            .unwrap()
    }

    #[test]
    fn test_fill_red() {
        let config = FrameConfig::new();
        let mut display = MockDisplay::new();
        let mut storage = MockStorage::new(&[]);

        let result = dispatch(
            Command::FillColor { color: Color::Red },
            &mut display,
            &mut storage,
            &config,
        );

        assert_eq!(result, DispatchResult::ok("red screen").unwrap());
        assert_eq!(
            display.ops,
            vec![
                DisplayOp::Clear(Color::Black),
                DisplayOp::FillRect(0, 0, 239, 319, Color::Red),
            ]
        );
    }

    #[test]
    fn test_fill_is_idempotent() {
        let config = FrameConfig::new();
        let mut display = MockDisplay::new();
        let mut storage = MockStorage::new(&[]);
        let command = Command::FillColor { color: Color::Red };

        let first = dispatch(command, &mut display, &mut storage, &config);
        let first_ops = display.ops.clone();
        display.ops.clear();
        let second = dispatch(command, &mut display, &mut storage, &config);

        assert!(first.is_ok());
        assert_eq!(first, second);
        assert_eq!(first_ops, display.ops);
    }

    #[test]
    fn test_fill_names_each_color() {
        let config = FrameConfig::new();
        let mut display = MockDisplay::new();
        let mut storage = MockStorage::new(&[]);

        for (color, message) in [
            (Color::Green, "green screen"),
            (Color::Blue, "blue screen"),
            (Color::White, "white screen"),
            (Color::Black, "black screen"),
        ] {
            let command = Command::FillColor { color };
            let result = dispatch(command, &mut display, &mut storage, &config);
            assert_eq!(result.message(), message);
        }
    }

    #[test]
    fn test_fill_failure_reported() {
        let config = FrameConfig::new();
        let mut display = MockDisplay::new();
        display.fail_fill = Some(DisplayError::Communication);
        let mut storage = MockStorage::new(&[]);

        let result = dispatch(
            Command::FillColor { color: Color::Blue },
            &mut display,
            &mut storage,
            &config,
        );

        assert!(result.is_err());
        assert_eq!(result.message(), "ERROR: Failed to fill blue screen");
    }

    #[test]
    fn test_prepare_applies_brightness_and_background() {
        let mut config = FrameConfig::new();
        config.display.brightness = Some(128);
        config.display.background = Color::White;
        let mut display = MockDisplay::new();
        let mut storage = MockStorage::new(&["sunset.jpg"]);

        let result = dispatch(
            Command::ShowImage { name: "sunset.jpg" },
            &mut display,
            &mut storage,
            &config,
        );

        assert_eq!(result.message(), "OK: Image displayed sunset.jpg");
        assert_eq!(
            display.ops,
            vec![
                DisplayOp::Brightness(128),
                DisplayOp::Clear(Color::White),
                DisplayOp::DrawImage("/sd/sunset.jpg".into()),
            ]
        );
    }

    #[test]
    fn test_missing_image_leaves_display_untouched() {
        let config = FrameConfig::new();
        let mut display = MockDisplay::new();
        let mut storage = MockStorage::new(&["a.jpg"]);

        let result = dispatch(
            Command::ShowImage { name: "missing.jpg" },
            &mut display,
            &mut storage,
            &config,
        );

        assert!(result.is_err());
        assert!(result.message().starts_with("ERROR"));
        assert!(result.message().contains("missing.jpg"));
        assert!(display.ops.is_empty());
    }

    #[test]
    fn test_image_outside_root_rejected() {
        let config = FrameConfig::new();
        let mut display = MockDisplay::new();
        let mut storage = MockStorage::new(&["a.jpg"]);

        let result = dispatch(
            Command::ShowImage { name: "../etc/a.jpg" },
            &mut display,
            &mut storage,
            &config,
        );

        assert!(result.is_err());
        assert!(display.ops.is_empty());
    }

    #[test]
    fn test_decode_failure_reported() {
        let config = FrameConfig::new();
        let mut display = MockDisplay::new();
        display.fail_draw = Some(DisplayError::Decode);
        let mut storage = MockStorage::new(&["broken.jpg"]);

        let result = dispatch(
            Command::ShowImage { name: "broken.jpg" },
            &mut display,
            &mut storage,
            &config,
        );

        assert_eq!(
            result,
            DispatchResult::err("ERROR: Failed to display image broken.jpg").unwrap()
        );
    }

    #[test]
    fn test_list_filters_extensions_in_storage_order() {
        let config = FrameConfig::new();
        let mut display = MockDisplay::new();
        let mut storage = MockStorage::new(&["a.jpg", "b.raw", "c.txt"]);

        let result = dispatch(Command::ListImages, &mut display, &mut storage, &config);

        assert_eq!(result, DispatchResult::ok("a.jpg,b.raw").unwrap());
        assert!(display.ops.is_empty());
        assert_eq!(storage.listed_dirs, vec!["/sd".to_string()]);
    }

    #[test]
    fn test_list_empty() {
        let config = FrameConfig::new();
        let mut display = MockDisplay::new();
        let mut storage = MockStorage::new(&["notes.txt"]);

        let result = dispatch(Command::ListImages, &mut display, &mut storage, &config);
        assert_eq!(result, DispatchResult::ok("").unwrap());
    }

    #[test]
    fn test_list_fails_open() {
        let config = FrameConfig::new();
        let mut display = MockDisplay::new();
        let mut storage = MockStorage::new(&["a.jpg"]);
        storage.available = false;

        let result = dispatch(Command::ListImages, &mut display, &mut storage, &config);
        assert_eq!(result, DispatchResult::ok("").unwrap());
    }

    #[test]
    fn test_list_drops_names_that_do_not_fit() {
        let config = FrameConfig::new();
        let mut display = MockDisplay::new();
        let names: std::vec::Vec<std::string::String> =
            (0..100).map(|i| std::format!("image_{i:04}.jpg")).collect();
        let refs: std::vec::Vec<&str> = names.iter().map(|n| n.as_str()).collect();
        let mut storage = MockStorage::new(&refs);

        let result = dispatch(Command::ListImages, &mut display, &mut storage, &config);
        let listed: std::vec::Vec<&str> = result.message().split(',').collect();

        assert!(result.message().len() <= picframe_protocol::MAX_REPORT_LEN);
        assert_eq!(listed[0], "image_0000.jpg");
        // 14-byte names plus separators
        assert_eq!(listed.len(), (picframe_protocol::MAX_REPORT_LEN + 1) / 15);
        assert!(listed.iter().all(|name| name.len() == 14));
    }
}
