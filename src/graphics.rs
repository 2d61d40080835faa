//! Graphics support via embedded-graphics
//!
//! This module provides the [`GraphicDisplay`] struct which wraps [`Display`]
//! and implements the [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait from
//! the embedded-graphics ecosystem.
//!
//! Pixels are rendered into caller-owned plane buffers in the layout the
//! drivers consume: a 1bpp black plane plus a 1bpp accent plane on
//! black/white/red panels, or a single packed 2bpp plane on four-color panels.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     prelude::*,
//!     primitives::{Circle, Rectangle, PrimitiveStyle},
//!     text::Text,
//! };
//! use epd_multi::{Color, GraphicDisplay};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::{InputPin, OutputPin};
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # use epd_multi::{Builder, Display, Interface, ModelId, Registry};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let interface = Interface::new(MockSpi, MockPin, MockPin, MockPin);
//! # let config = match Builder::new().model(ModelId::Uc8176Bwr420).build(&Registry::new()) {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! # let mut delay = MockDelay;
//! let mut display_driver = Display::new(interface, config);
//! let _ = display_driver.init(&mut delay);
//! let plane_bytes = display_driver.model().plane_bytes();
//!
//! // Create graphic display with buffers
//! let mut display =
//!     GraphicDisplay::new(display_driver, vec![0xFFu8; plane_bytes], vec![0xFFu8; plane_bytes]);
//!
//! // Clear to white
//! display.clear(Color::White);
//!
//! // Draw shapes
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Color::Red))
//!     .draw(&mut display);
//!
//! let _ = Circle::new(Point::new(100, 50), 40)
//!     .into_styled(PrimitiveStyle::with_stroke(Color::Black, 2))
//!     .draw(&mut display);
//!
//! // Draw text
//! let _ = Text::new(
//!     "Hello, E-Paper!",
//!     Point::new(10, 100),
//!     MonoTextStyle::new(&FONT_6X10, Color::Black),
//! )
//! .draw(&mut display);
//!
//! // Update physical display
//! let _ = display.flush(&mut delay);
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    prelude::Pixel,
};
use embedded_hal::delay::DelayNs;

use crate::color::Color;
use crate::display::Display;
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::model::{ColorMode, Model};
use crate::rotation::{bit_position, symbol_position, to_native};

/// Display with graphics buffers
///
/// This wrapper around [`Display`] provides embedded-graphics support
/// and manages the pixel buffers for the panel's planes.
///
/// ## Type Parameters
///
/// * `I` - Interface type implementing [`DisplayInterface`]
/// * `B1` - Buffer for the black/white plane (packed plane on four-color panels)
/// * `B2` - Buffer for the accent plane (only read on black/white/red panels)
pub struct GraphicDisplay<I, B1, B2>
where
    I: DisplayInterface,
    B1: AsMut<[u8]>,
    B2: AsMut<[u8]>,
{
    /// The underlying display driver
    display: Display<I>,
    /// Black/white or packed plane
    black_buffer: B1,
    /// Accent plane
    accent_buffer: B2,
}

type GraphicsResult<I> = core::result::Result<(), Error<I>>;
type GraphicsNewResult<I, T> = core::result::Result<T, Error<I>>;

/// Bytes each buffer must hold for `model`
fn required_sizes(model: &Model) -> (usize, usize) {
    let plane = model.plane_bytes();
    let accent = if model.color == ColorMode::Bwr { plane } else { 0 };
    (plane, accent)
}

impl<I, B1, B2> GraphicDisplay<I, B1, B2>
where
    I: DisplayInterface,
    B1: AsMut<[u8]>,
    B2: AsMut<[u8]>,
{
    /// Create a new GraphicDisplay
    ///
    /// # Arguments
    ///
    /// * `display` - The [`Display`] driver instance
    /// * `black_buffer` - At least `model.plane_bytes()` bytes
    /// * `accent_buffer` - At least `model.plane_bytes()` bytes on
    ///   black/white/red panels; may be empty otherwise
    ///
    /// # Panics
    ///
    /// Panics if either buffer is smaller than required. Sizes are always
    /// based on the native (unrotated) resolution.
    pub fn new(display: Display<I>, mut black_buffer: B1, mut accent_buffer: B2) -> Self {
        let (black, accent) = required_sizes(display.model());
        assert!(
            black_buffer.as_mut().len() >= black,
            "black_buffer too small: required {} bytes, got {}",
            black,
            black_buffer.as_mut().len()
        );
        assert!(
            accent_buffer.as_mut().len() >= accent,
            "accent_buffer too small: required {} bytes, got {}",
            accent,
            accent_buffer.as_mut().len()
        );
        Self {
            display,
            black_buffer,
            accent_buffer,
        }
    }

    /// Try to create a new GraphicDisplay, returning an error if buffers are too small
    ///
    /// This is the fallible version of [`new`](Self::new).
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if either buffer is smaller than required.
    pub fn try_new(
        display: Display<I>,
        mut black_buffer: B1,
        mut accent_buffer: B2,
    ) -> GraphicsNewResult<I, Self> {
        let (black, accent) = required_sizes(display.model());
        if black_buffer.as_mut().len() < black {
            return Err(Error::BufferTooSmall {
                required: black,
                provided: black_buffer.as_mut().len(),
            });
        }
        if accent_buffer.as_mut().len() < accent {
            return Err(Error::BufferTooSmall {
                required: accent,
                provided: accent_buffer.as_mut().len(),
            });
        }
        Ok(Self {
            display,
            black_buffer,
            accent_buffer,
        })
    }

    /// Fill the buffers with one color
    pub fn clear(&mut self, color: Color) {
        let mode = self.display.model().color;
        let fill = match mode {
            ColorMode::Bwry => color.packed_byte(),
            ColorMode::Bw | ColorMode::Bwr => color.black_byte(mode),
        };
        self.black_buffer.as_mut().fill(fill);
        if mode == ColorMode::Bwr {
            self.accent_buffer.as_mut().fill(color.accent_byte());
        }
    }

    /// Write the buffers to the controller and refresh the panel
    pub fn flush<D: DelayNs>(&mut self, delay: &mut D) -> GraphicsResult<I> {
        let model = *self.display.model();
        let (black, accent) = required_sizes(&model);
        let accent_plane = if accent > 0 {
            Some(&self.accent_buffer.as_mut()[..accent])
        } else {
            None
        };
        self.display.write_image(
            Some(&self.black_buffer.as_mut()[..black]),
            accent_plane,
            model.full_region(),
        )?;
        self.display.refresh(delay)
    }

    /// Access the underlying Display
    pub fn display(&self) -> &Display<I> {
        &self.display
    }

    /// Access the underlying Display mutably
    ///
    /// Used for init, sleep and the other low-level operations.
    pub fn display_mut(&mut self) -> &mut Display<I> {
        &mut self.display
    }

    /// Consume the wrapper and return the display and buffers
    pub fn release(self) -> (Display<I>, B1, B2) {
        (self.display, self.black_buffer, self.accent_buffer)
    }

    /// Set a single pixel, in rotated coordinates, to a color
    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let config = self.display.config();
        let model = config.model;
        let width = u32::from(model.width);
        let height = u32::from(model.height);
        let (x, y) = to_native(x, y, width, height, config.rotation);
        if x >= width || y >= height {
            return;
        }

        match model.color {
            ColorMode::Bwry => {
                let (index, shift) = symbol_position(x, y, width);
                if let Some(byte) = self.black_buffer.as_mut().get_mut(index) {
                    *byte = (*byte & !(0b11 << shift)) | (color.symbol() << shift);
                }
            }
            mode => {
                let (index, bit) = bit_position(x, y, width);
                if let Some(byte) = self.black_buffer.as_mut().get_mut(index) {
                    if color.black_bit(mode) {
                        *byte |= bit;
                    } else {
                        *byte &= !bit;
                    }
                }
                if mode == ColorMode::Bwr {
                    if let Some(byte) = self.accent_buffer.as_mut().get_mut(index) {
                        if color.accent_bit() {
                            *byte |= bit;
                        } else {
                            *byte &= !bit;
                        }
                    }
                }
            }
        }
    }
}

impl<I, B1, B2> DrawTarget for GraphicDisplay<I, B1, B2>
where
    I: DisplayInterface,
    B1: AsMut<[u8]>,
    B2: AsMut<[u8]>,
{
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let sz = self.size();

        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }

            let x = x as u32;
            let y = y as u32;

            if x >= sz.width || y >= sz.height {
                continue;
            }

            self.set_pixel(x, y, color);
        }

        Ok(())
    }
}

impl<I, B1, B2> OriginDimensions for GraphicDisplay<I, B1, B2>
where
    I: DisplayInterface,
    B1: AsMut<[u8]>,
    B2: AsMut<[u8]>,
{
    fn size(&self) -> Size {
        let (width, height) = self.display.config().rotated_size();
        Size::new(u32::from(width), u32::from(height))
    }
}
