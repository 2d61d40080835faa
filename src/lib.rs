//! Multi-Controller E-Paper Display Driver
//!
//! One driver layer for a catalog of e-paper panels built on four controller
//! families: UC8176/UC8179, UC8159, SSD1619/SSD1677 and JD79668.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Static model registry with black/white, black/white/red and four-color panels
//! - Region writes, raw RAM streaming and on-die temperature reads
//! - Session state tracking with bounded busy waits
//! - Rotation support
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use epd_multi::{Builder, Display, Interface, ModelId, Region, Registry};
//!
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
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let busy = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi, dc, rst, busy);
//! let registry = Registry::new();
//! let config = match Builder::new().model(ModelId::Ssd1619Bwr420).build(&registry) {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! let _ = display.init(&mut delay);
//!
//! // All black, no accent
//! let black = [0x00u8; 15_000];
//! let _ = display.write_image(Some(&black), None, Region::new(0, 0, 400, 300));
//! let _ = display.refresh(&mut delay);
//! let _ = display.sleep(&mut delay);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Color types for multi-color e-paper panels
pub mod color;
/// Controller command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Controller family drivers
pub mod driver;
/// Pixel plane encoding and streaming
pub mod encode;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Panel model catalog
pub mod model;
/// Controller RAM addressing
pub mod ram;
/// Coordinate rotation utilities
pub mod rotation;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod testing;

pub use color::Color;
pub use config::{Builder, Config, DEFAULT_RESET_PULSE_MS, Rotation};
pub use display::{Display, SessionState};
pub use driver::{Driver, Jd79668, Ssd16xx, Uc8159, Uc81xx};
pub use error::{BuilderError, Error};
pub use interface::InterfaceError;
pub use interface::{DEFAULT_BUSY_TIMEOUT_MS, DisplayInterface, Interface};
pub use model::{ColorMode, DriverIc, Family, Model, ModelId, Registry};
pub use ram::{Plane, RamSelector, Region};

#[cfg(feature = "graphics")]
pub use graphics::GraphicDisplay;
