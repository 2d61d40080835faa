//! Color types for e-paper panels
//!
//! This module defines the [`Color`] enum and its encoding for each
//! [`ColorMode`].
//!
//! ## Color Representation
//!
//! Two-plane panels store each pixel as one bit in the black plane and one bit
//! in the accent plane. Both planes are active low:
//!
//! | Color | Black plane | Accent plane |
//! |-------|-------------|--------------|
//! | Black | 0 | 1 |
//! | White | 1 | 1 |
//! | Red / Yellow | 1 | 0 |
//!
//! Black/white panels draw accent colors as black. Four-color panels store one
//! 2-bit symbol per pixel in a single packed plane:
//!
//! | Color | Symbol |
//! |-------|--------|
//! | Black | `00` |
//! | White | `01` |
//! | Yellow | `10` |
//! | Red | `11` |
//!
//! ## Example
//!
//! ```
//! use epd_multi::{Color, ColorMode};
//!
//! assert_eq!(Color::Red.black_byte(ColorMode::Bwr), 0xFF);
//! assert_eq!(Color::Red.accent_byte(), 0x00);
//! assert_eq!(Color::Red.black_byte(ColorMode::Bw), 0x00);
//! assert_eq!(Color::White.packed_byte(), 0x55);
//! ```

use crate::model::ColorMode;

/// Colors an e-paper panel can show
///
/// Not every panel shows every color; see the module table for fallbacks.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Color {
    /// Black pixels
    Black,
    /// White pixels
    White,
    /// Red pixels (accent on two-plane panels)
    Red,
    /// Yellow pixels (accent on two-plane panels)
    Yellow,
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU8;
}

impl Color {
    /// Bit value in the black plane (`true` = white)
    pub fn black_bit(self, mode: ColorMode) -> bool {
        match self {
            Self::Black => false,
            Self::White => true,
            Self::Red | Self::Yellow => mode != ColorMode::Bw,
        }
    }

    /// Bit value in the accent plane (`true` = no accent)
    pub fn accent_bit(self) -> bool {
        matches!(self, Self::Black | Self::White)
    }

    /// 2-bit symbol in a packed four-color plane
    pub fn symbol(self) -> u8 {
        match self {
            Self::Black => 0b00,
            Self::White => 0b01,
            Self::Yellow => 0b10,
            Self::Red => 0b11,
        }
    }

    /// Black plane byte filled with this color
    pub fn black_byte(self, mode: ColorMode) -> u8 {
        if self.black_bit(mode) { 0xFF } else { 0x00 }
    }

    /// Accent plane byte filled with this color
    pub fn accent_byte(self) -> u8 {
        if self.accent_bit() { 0xFF } else { 0x00 }
    }

    /// Packed plane byte holding four pixels of this color
    pub fn packed_byte(self) -> u8 {
        self.symbol() * 0x55
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_bytes() {
        assert_eq!(Color::Black.packed_byte(), 0x00);
        assert_eq!(Color::White.packed_byte(), 0x55);
        assert_eq!(Color::Yellow.packed_byte(), 0xAA);
        assert_eq!(Color::Red.packed_byte(), 0xFF);
    }

    #[test]
    fn test_accent_falls_back_to_black_on_bw() {
        assert!(!Color::Yellow.black_bit(ColorMode::Bw));
        assert!(Color::Yellow.black_bit(ColorMode::Bwr));
        assert!(!Color::Yellow.accent_bit());
        assert!(Color::Black.accent_bit());
    }
}
