//! Fill colors accepted by the frame

/// Full-screen fill colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    Red,
    Green,
    Blue,
    White,
    Black,
}

impl Color {
    /// All colors, in command order
    pub const ALL: [Color; 5] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::White,
        Color::Black,
    ];

    /// RGB565 encoding as sent to the panel
    pub const fn rgb565(self) -> u16 {
        match self {
            Color::Red => rgb565(0xFF, 0, 0),
            Color::Green => rgb565(0, 0xFF, 0),
            Color::Blue => rgb565(0, 0, 0xFF),
            Color::White => rgb565(0xFF, 0xFF, 0xFF),
            Color::Black => rgb565(0, 0, 0),
        }
    }

    /// Lowercase name, used in reports and configuration
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::White => "white",
            Color::Black => "black",
        }
    }

    /// Look up a color by its lowercase name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Pack 8-bit RGB components into RGB565
pub const fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}
