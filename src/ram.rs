//! RAM addressing types
//!
//! [`Region`] describes a rectangular partial write in pixel coordinates and
//! implements the byte-boundary rounding shared by every controller family.
//! [`RamSelector`] describes one chunk of a pre-encoded RAM stream.

/// Rectangle in native panel pixel coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    /// X coordinate in pixels
    pub x: u16,
    /// Y coordinate in pixels
    pub y: u16,
    /// Width in pixels
    pub w: u16,
    /// Height in pixels
    pub h: u16,
}

impl Region {
    /// Create a new region
    #[allow(clippy::many_single_char_names)]
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// Round the region out to byte boundaries
    ///
    /// `x` rounds down to a multiple of 8 and `w` rounds up to a multiple of 8.
    /// The width grows by whole bytes only: the bitmap row stride stays
    /// `ceil(w / 8)` bytes, so shifting `x` left does not widen the region.
    pub fn byte_aligned(self) -> Self {
        let row_bytes = self.w.div_ceil(8);
        Self {
            x: self.x - self.x % 8,
            y: self.y,
            w: row_bytes.saturating_mul(8),
            h: self.h,
        }
    }

    /// Bytes per row of a 1bpp bitmap covering this region
    pub fn row_bytes(&self) -> usize {
        (self.w as usize).div_ceil(8)
    }

    /// Byte-align the region and check it against the panel bounds
    ///
    /// Returns `None` when the rounded region is empty or does not lie entirely
    /// within `[0, width) x [0, height)`. Callers drop such writes without
    /// touching the bus.
    pub fn place(self, width: u16, height: u16) -> Option<Self> {
        let aligned = self.byte_aligned();
        if aligned.w == 0 || aligned.h == 0 {
            log::trace!("empty region {self:?} dropped");
            return None;
        }
        let x_end = u32::from(aligned.x) + u32::from(aligned.w);
        let y_end = u32::from(aligned.y) + u32::from(aligned.h);
        if x_end > u32::from(width) || y_end > u32::from(height) {
            log::warn!("region {self:?} outside {width}x{height} panel, write dropped");
            return None;
        }
        Some(aligned)
    }

    /// Last column covered (inclusive)
    pub fn x_end(&self) -> u16 {
        self.x + self.w - 1
    }

    /// Last row covered (inclusive)
    pub fn y_end(&self) -> u16 {
        self.y + self.h - 1
    }
}

/// Logical RAM plane targeted by a stream
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plane {
    /// Black/white plane (or the packed plane on four-color panels)
    Black,
    /// Accent color plane
    Accent,
}

/// Target of one [`write_ram`](crate::Display::write_ram) chunk
///
/// Packs into one byte on the wire protocol used by host tools: the upper
/// nibble is `0` when the chunk begins a new RAM write command, and the lower
/// nibble is `0xF` for the black plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RamSelector {
    /// Issue the RAM write command before streaming
    pub begin: bool,
    /// Plane the stream targets
    pub plane: Plane,
}

impl RamSelector {
    /// Begin a new stream into `plane`
    pub const fn begin(plane: Plane) -> Self {
        Self { begin: true, plane }
    }

    /// Continue the current stream into `plane`
    pub const fn resume(plane: Plane) -> Self {
        Self {
            begin: false,
            plane,
        }
    }

    /// Decode the packed selector byte
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            begin: (bits >> 4) == 0x00,
            plane: if (bits & 0x0F) == 0x0F {
                Plane::Black
            } else {
                Plane::Accent
            },
        }
    }

    /// Encode the packed selector byte
    pub const fn bits(self) -> u8 {
        let high = if self.begin { 0x00 } else { 0x10 };
        let low = match self.plane {
            Plane::Black => 0x0F,
            Plane::Accent => 0x00,
        };
        high | low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_rounds_x_down_and_width_up() {
        let aligned = Region::new(13, 5, 10, 4).byte_aligned();
        assert_eq!(aligned, Region::new(8, 5, 16, 4));
    }

    #[test]
    fn test_alignment_is_idempotent() {
        let once = Region::new(16, 0, 24, 10).byte_aligned();
        assert_eq!(once, Region::new(16, 0, 24, 10));
        assert_eq!(once.byte_aligned(), once);

        let odd = Region::new(3, 1, 7, 1).byte_aligned();
        assert_eq!(odd.byte_aligned(), odd);
    }

    #[test]
    fn test_place_rejects_width_overflow() {
        assert_eq!(Region::new(396, 0, 16, 10).place(400, 300), None);
    }

    #[test]
    fn test_place_rejects_height_overflow() {
        assert_eq!(Region::new(0, 295, 8, 6).place(400, 300), None);
    }

    #[test]
    fn test_place_rejects_empty_region() {
        assert_eq!(Region::new(0, 0, 0, 10).place(400, 300), None);
        assert_eq!(Region::new(0, 0, 8, 0).place(400, 300), None);
    }

    #[test]
    fn test_place_accepts_full_panel() {
        let region = Region::new(0, 0, 400, 300).place(400, 300);
        assert_eq!(region, Some(Region::new(0, 0, 400, 300)));
        assert_eq!(region.map(|r| (r.x_end(), r.y_end())), Some((399, 299)));
    }

    #[test]
    fn test_selector_bits() {
        assert_eq!(RamSelector::from_bits(0x0F), RamSelector::begin(Plane::Black));
        assert_eq!(RamSelector::from_bits(0x00), RamSelector::begin(Plane::Accent));
        assert_eq!(RamSelector::from_bits(0x1F), RamSelector::resume(Plane::Black));
        assert_eq!(RamSelector::from_bits(0x10), RamSelector::resume(Plane::Accent));
        assert_eq!(RamSelector::resume(Plane::Black).bits(), 0x1F);
        assert_eq!(RamSelector::begin(Plane::Accent).bits(), 0x00);
    }
}
