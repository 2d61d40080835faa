//! Coordinate rotation utilities
//!
//! Maps logical (rotated) pixel coordinates to the panel's native orientation
//! and locates native pixels inside caller-side plane buffers.
//!
//! ## Rotation Modes
//!
//! - **Rotate0**: Native orientation
//! - **Rotate90**: 90° clockwise, width and height swapped
//! - **Rotate180**: 180° rotation, origin at bottom-right
//! - **Rotate270**: 270° clockwise (or 90° counter-clockwise)
//!
//! ## Example
//!
//! ```
//! use epd_multi::{rotation::{bit_position, to_native}, Rotation};
//!
//! // 400x300 panel used in portrait: logical (0,0) is native (399,0)
//! let (x, y) = to_native(0, 0, 400, 300, Rotation::Rotate90);
//! assert_eq!((x, y), (399, 0));
//!
//! // Native (399,0) lives in the last byte of row 0, least significant bit
//! assert_eq!(bit_position(x, y, 400), (49, 0x01));
//! ```

use crate::config::Rotation;

/// Map logical coordinates to native coordinates
///
/// # Arguments
///
/// * `x`, `y` - Logical coordinates within the rotated size
/// * `width`, `height` - Native panel size in pixels
/// * `rotation` - Rotation mode
pub fn to_native(x: u32, y: u32, width: u32, height: u32, rotation: Rotation) -> (u32, u32) {
    match rotation {
        Rotation::Rotate0 => (x, y),
        Rotation::Rotate90 => (width - 1 - y, x),
        Rotation::Rotate180 => (width - 1 - x, height - 1 - y),
        Rotation::Rotate270 => (y, height - 1 - x),
    }
}

/// Byte index and bit mask of a native pixel in a 1bpp plane
///
/// Rows are padded to whole bytes; the leftmost pixel is the MSB.
pub fn bit_position(x: u32, y: u32, width: u32) -> (usize, u8) {
    let index = (x / 8 + width.div_ceil(8) * y) as usize;
    (index, 0x80 >> (x % 8))
}

/// Byte index and bit shift of a native pixel in a packed 2bpp plane
///
/// Four pixels per byte, leftmost pixel in the top two bits.
pub fn symbol_position(x: u32, y: u32, width: u32) -> (usize, u8) {
    let index = (x / 4 + width.div_ceil(4) * y) as usize;
    (index, 6 - 2 * (x % 4) as u8)
}
