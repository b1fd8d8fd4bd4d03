//! Command grammar for characteristic writes
//!
//! Every write payload is parsed exactly once into a [`Command`]. Matching is
//! exact and case sensitive: `R` and `r` fill red, `Red` is not a command.

use crate::color::Color;

/// Prefix selecting an image by file name
pub const SHOW_IMAGE_PREFIX: &str = "DI:";

/// Command requesting the image list
pub const LIST_IMAGES: &str = "LI";

/// Maximum image name length in bytes
pub const MAX_IMAGE_NAME_LEN: usize = 64;

/// Commands parsed from a characteristic write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    /// Show an image from storage
    ShowImage { name: &'a str },
    /// Fill the whole frame with a color
    FillColor { color: Color },
    /// List image files in the storage root
    ListImages,
}

/// Reasons a write payload is not a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Zero-length write
    Empty,
    /// Payload is not valid UTF-8
    InvalidUtf8,
    /// `DI:` with nothing after it
    MissingImageName,
    /// Image name exceeds [`MAX_IMAGE_NAME_LEN`]
    NameTooLong,
    /// Not part of the grammar
    Unrecognized,
}

impl ParseError {
    /// Status string reported when parse errors are notified
    pub const fn message(self) -> &'static str {
        match self {
            ParseError::Empty => "ERROR: empty command",
            ParseError::InvalidUtf8 => "ERROR: invalid UTF-8",
            ParseError::MissingImageName => "ERROR: missing image name",
            ParseError::NameTooLong => "ERROR: image name too long",
            ParseError::Unrecognized => "ERROR: unrecognized command",
        }
    }
}

/// Single-letter fill commands
const FILL_COMMANDS: [(&str, Color); 10] = [
    ("R", Color::Red),
    ("r", Color::Red),
    ("G", Color::Green),
    ("g", Color::Green),
    ("B", Color::Blue),
    ("b", Color::Blue),
    ("W", Color::White),
    ("w", Color::White),
    ("BK", Color::Black),
    ("bk", Color::Black),
];

/// Parse a raw write payload
pub fn parse(payload: &[u8]) -> Result<Command<'_>, ParseError> {
    if payload.is_empty() {
        return Err(ParseError::Empty);
    }

    let text = core::str::from_utf8(payload).map_err(|_| ParseError::InvalidUtf8)?;

    if let Some(name) = text.strip_prefix(SHOW_IMAGE_PREFIX) {
        if name.is_empty() {
            return Err(ParseError::MissingImageName);
        }
        if name.len() > MAX_IMAGE_NAME_LEN {
            return Err(ParseError::NameTooLong);
        }
        return Ok(Command::ShowImage { name });
    }

    if let Some(&(_, color)) = FILL_COMMANDS.iter().find(|(literal, _)| *literal == text) {
        return Ok(Command::FillColor { color });
    }

    if text == LIST_IMAGES {
        return Ok(Command::ListImages);
    }

    Err(ParseError::Unrecognized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fill_literals() {
        let cases = [
            ("R", Color::Red),
            ("r", Color::Red),
            ("G", Color::Green),
            ("g", Color::Green),
            ("B", Color::Blue),
            ("b", Color::Blue),
            ("W", Color::White),
            ("w", Color::White),
            ("BK", Color::Black),
            ("bk", Color::Black),
        ];

        for (literal, color) in cases {
            assert_eq!(
                parse(literal.as_bytes()),
                Ok(Command::FillColor { color }),
                "literal {literal}"
            );
        }
    }

    #[test]
    fn test_list_images() {
        assert_eq!(parse(b"LI"), Ok(Command::ListImages));
        assert_eq!(parse(b"li"), Err(ParseError::Unrecognized));
    }

    #[test]
    fn test_show_image() {
        assert_eq!(
            parse(b"DI:sunset.jpg"),
            Ok(Command::ShowImage { name: "sunset.jpg" })
        );
    }

    #[test]
    fn test_show_image_splits_on_first_colon_only() {
        assert_eq!(
            parse(b"DI:a:b.jpg"),
            Ok(Command::ShowImage { name: "a:b.jpg" })
        );
    }

    #[test]
    fn test_show_image_empty_name() {
        assert_eq!(parse(b"DI:"), Err(ParseError::MissingImageName));
    }

    #[test]
    fn test_show_image_name_too_long() {
        let mut payload = [b'x'; 3 + MAX_IMAGE_NAME_LEN + 1];
        payload[..3].copy_from_slice(b"DI:");
        assert_eq!(parse(&payload), Err(ParseError::NameTooLong));

        let exact = &payload[..3 + MAX_IMAGE_NAME_LEN];
        assert!(matches!(parse(exact), Ok(Command::ShowImage { .. })));
    }

    #[test]
    fn test_rejected_payloads() {
        assert_eq!(parse(b""), Err(ParseError::Empty));
        assert_eq!(parse(b"xyz"), Err(ParseError::Unrecognized));
        assert_eq!(parse(b"di:foo"), Err(ParseError::Unrecognized));
        assert_eq!(parse(b"Red"), Err(ParseError::Unrecognized));
        assert_eq!(parse(b"Bk"), Err(ParseError::Unrecognized));
        assert_eq!(parse(b"R\n"), Err(ParseError::Unrecognized));
        assert_eq!(parse(&[0xFF, 0xFE]), Err(ParseError::InvalidUtf8));
    }

    proptest! {
        #[test]
        fn prop_parse_never_panics(payload in proptest::collection::vec(any::<u8>(), 0..600)) {
            let _ = parse(&payload);
        }

        #[test]
        fn prop_show_image_keeps_name(name in "[a-zA-Z0-9_.:-]{1,64}") {
            let payload = std::format!("DI:{name}");
            prop_assert_eq!(parse(payload.as_bytes()), Ok(Command::ShowImage { name: &name }));
        }
    }
}
