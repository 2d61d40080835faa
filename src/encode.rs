//! Pixel plane encoders
//!
//! Converts caller bitplanes into controller RAM formats and streams them over
//! a [`DisplayInterface`]:
//!
//! | Encoder | Input | Output |
//! |---------|-------|--------|
//! | [`stream_plane`] | one 1bpp or packed 2bpp plane | copied verbatim |
//! | [`stream_four_level`] | black + accent 1bpp planes | 4 bits per pixel, two pixels per byte |
//!
//! Absent planes are replaced by the idle byte of the target format
//! ([`WHITE`] for 1bpp, [`PACKED_WHITE`] for packed 2bpp).
//!
//! ## 4-level symbols
//!
//! | Accent bit | Black bit | Symbol |
//! |------------|-----------|--------|
//! | 0 | any | [`SYMBOL_ACCENT`] (`0x4`) |
//! | 1 | 0 | [`SYMBOL_BLACK`] (`0x0`) |
//! | 1 | 1 | [`SYMBOL_WHITE`] (`0x3`) |
//!
//! The accent test comes first, so a pixel set in both planes shows the accent.
//!
//! ```
//! use epd_multi::encode::four_level;
//!
//! // Alternating white/black, no accent
//! assert_eq!(four_level(0xAA, 0xFF), [0x30, 0x30, 0x30, 0x30]);
//! ```

use crate::error::Error;
use crate::interface::DisplayInterface;

/// All-white byte of a 1bpp plane
pub const WHITE: u8 = 0xFF;
/// All-white byte of a packed 2bpp plane (four `01` symbols)
pub const PACKED_WHITE: u8 = 0x55;
/// Two white 4-level pixels
pub const FOUR_LEVEL_WHITE_PAIR: u8 = (SYMBOL_WHITE << 4) | SYMBOL_WHITE;

/// 4-level symbol for a black pixel
pub const SYMBOL_BLACK: u8 = 0x00;
/// 4-level symbol for a white pixel
pub const SYMBOL_WHITE: u8 = 0x03;
/// 4-level symbol for an accent pixel
pub const SYMBOL_ACCENT: u8 = 0x04;

/// Input bytes encoded per SPI transfer by [`stream_four_level`]
const FOUR_LEVEL_BATCH: usize = 16;

type EncodeResult<I> = core::result::Result<(), Error<I>>;

/// Check that an optional plane covers `required` bytes
pub fn check_plane<I: DisplayInterface>(plane: Option<&[u8]>, required: usize) -> EncodeResult<I> {
    match plane {
        Some(buf) if buf.len() < required => Err(Error::BufferTooSmall {
            required,
            provided: buf.len(),
        }),
        _ => Ok(()),
    }
}

/// Stream the first `len` bytes of a plane, or `len` idle bytes when absent
///
/// The plane must already have been validated with [`check_plane`].
pub fn stream_plane<I: DisplayInterface>(
    di: &mut I,
    plane: Option<&[u8]>,
    len: usize,
    idle: u8,
) -> EncodeResult<I> {
    match plane {
        Some(buf) => di.send_data(&buf[..len]),
        None => di.send_repeated(idle, len),
    }
    .map_err(Error::Interface)
}

/// 4-level symbol for the most significant bit pair
fn symbol(black: u8, accent: u8) -> u8 {
    if accent & 0x80 == 0 {
        SYMBOL_ACCENT
    } else if black & 0x80 == 0 {
        SYMBOL_BLACK
    } else {
        SYMBOL_WHITE
    }
}

/// Combine one black byte and one accent byte into four 4-level bytes
///
/// Consumes both inputs MSB first; each output byte holds two pixels with the
/// leftmost pixel in the high nibble.
pub fn four_level(black: u8, accent: u8) -> [u8; 4] {
    let mut out = [0u8; 4];
    let (mut black, mut accent) = (black, accent);
    for byte in &mut out {
        let high = symbol(black, accent);
        black <<= 1;
        accent <<= 1;
        let low = symbol(black, accent);
        black <<= 1;
        accent <<= 1;
        *byte = (high << 4) | low;
    }
    out
}

/// Stream `len` input byte pairs through the 4-level encoder
///
/// Absent planes read as [`WHITE`] (no black, no accent). Both planes must
/// already have been validated with [`check_plane`].
pub fn stream_four_level<I: DisplayInterface>(
    di: &mut I,
    black: Option<&[u8]>,
    accent: Option<&[u8]>,
    len: usize,
) -> EncodeResult<I> {
    let mut batch = [0u8; FOUR_LEVEL_BATCH * 4];
    let mut start = 0;
    while start < len {
        let count = (len - start).min(FOUR_LEVEL_BATCH);
        for i in 0..count {
            let b = black.map_or(WHITE, |buf| buf[start + i]);
            let a = accent.map_or(WHITE, |buf| buf[start + i]);
            batch[i * 4..i * 4 + 4].copy_from_slice(&four_level(b, a));
        }
        di.send_data(&batch[..count * 4]).map_err(Error::Interface)?;
        start += count;
    }
    Ok(())
}
