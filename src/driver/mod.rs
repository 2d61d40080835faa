//! Controller family drivers
//!
//! Every family implements the same seven operations through the [`Driver`]
//! trait. Drivers carry no state of their own: each call receives the panel
//! [`Config`], the transport and (where timing matters) a delay provider.
//! [`Family`] dispatches a call to the driver bound to a model.
//!
//! | Family | ICs | Busy level | Pixel format |
//! |--------|-----|------------|--------------|
//! | [`Uc81xx`] | UC8176, UC8179 | low | two 1bpp planes |
//! | [`Uc8159`] | UC8159 | low | 4-level, interleaved from two planes |
//! | [`Ssd16xx`] | SSD1619, SSD1677 | high | two 1bpp planes |
//! | [`Jd79668`] | JD79668 | low | one packed 2bpp plane |

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use crate::config::Config;
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::model::Family;
use crate::ram::{RamSelector, Region};

mod jd79668;
mod ssd16xx;
mod uc8159;
mod uc81xx;

pub use jd79668::Jd79668;
pub use ssd16xx::Ssd16xx;
pub use uc8159::Uc8159;
pub use uc81xx::Uc81xx;

type DriverResult<I> = core::result::Result<(), Error<I>>;

/// Operation set shared by every controller family
///
/// Implementations are unit types; all functions are associated functions so a
/// driver can be selected at compile time or dispatched through [`Family`].
pub trait Driver {
    /// Level of the BUSY pin while the controller is working
    const BUSY_LEVEL: PinState;

    /// Reset the controller and program its panel registers
    ///
    /// Busy expiry during init is logged and not returned; it surfaces as a
    /// timeout on the next operation that waits.
    fn init<I: DisplayInterface, D: DelayNs>(
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> DriverResult<I>;

    /// Fill every RAM plane with white, optionally followed by [`Driver::refresh`]
    fn clear<I: DisplayInterface, D: DelayNs>(
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
        refresh: bool,
    ) -> DriverResult<I>;

    /// Encode a rectangle from the caller's planes into controller RAM
    ///
    /// `None` planes are written as white. The region is byte aligned first;
    /// empty or out-of-bounds regions are dropped without bus traffic.
    fn write_image<I: DisplayInterface>(
        cfg: &Config,
        di: &mut I,
        black: Option<&[u8]>,
        accent: Option<&[u8]>,
        region: Region,
    ) -> DriverResult<I>;

    /// Stream pre-encoded bytes into a RAM plane
    fn write_ram<I: DisplayInterface>(
        cfg: &Config,
        di: &mut I,
        selector: RamSelector,
        data: &[u8],
    ) -> DriverResult<I>;

    /// Run the family's refresh sequence and wait for it to finish
    fn refresh<I: DisplayInterface, D: DelayNs>(
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> DriverResult<I>;

    /// Enter the lowest power retention state
    fn sleep<I: DisplayInterface, D: DelayNs>(
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> DriverResult<I>;

    /// Read the on-die temperature sensor in degrees Celsius
    fn read_temperature<I: DisplayInterface, D: DelayNs>(
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> Result<i8, Error<I>>;
}

/// Send a command with its parameters
fn command<I: DisplayInterface>(di: &mut I, cmd: u8, data: &[u8]) -> DriverResult<I> {
    di.send_command_data(cmd, data).map_err(Error::Interface)
}

/// Wait for BUSY to clear; expiry is fatal
fn wait_ready<I: DisplayInterface, D: DelayNs>(
    di: &mut I,
    busy_level: PinState,
    timeout_ms: u16,
    delay: &mut D,
) -> DriverResult<I> {
    if di
        .busy_wait(busy_level, timeout_ms, delay)
        .map_err(Error::Interface)?
    {
        Ok(())
    } else {
        log::warn!("controller still busy after {timeout_ms}ms");
        Err(Error::BusyTimeout { timeout_ms })
    }
}

/// Wait for BUSY to clear during init; expiry is only logged
fn settle<I: DisplayInterface, D: DelayNs>(
    di: &mut I,
    busy_level: PinState,
    timeout_ms: u16,
    delay: &mut D,
) -> DriverResult<I> {
    if !di
        .busy_wait(busy_level, timeout_ms, delay)
        .map_err(Error::Interface)?
    {
        log::warn!("controller still busy after {timeout_ms}ms during init, continuing");
    }
    Ok(())
}

/// Read one signed byte from the controller
fn read_i8<I: DisplayInterface>(di: &mut I) -> Result<i8, Error<I>> {
    di.read_byte()
        .map(|raw| raw as i8)
        .map_err(Error::Interface)
}

impl Family {
    /// Level of the BUSY pin while the controller is working
    pub fn busy_level(self) -> PinState {
        match self {
            Self::Uc81xx => Uc81xx::BUSY_LEVEL,
            Self::Uc8159 => Uc8159::BUSY_LEVEL,
            Self::Ssd16xx => Ssd16xx::BUSY_LEVEL,
            Self::Jd79668 => Jd79668::BUSY_LEVEL,
        }
    }

    /// See [`Driver::init`]
    pub fn init<I: DisplayInterface, D: DelayNs>(
        self,
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> DriverResult<I> {
        match self {
            Self::Uc81xx => Uc81xx::init(cfg, di, delay),
            Self::Uc8159 => Uc8159::init(cfg, di, delay),
            Self::Ssd16xx => Ssd16xx::init(cfg, di, delay),
            Self::Jd79668 => Jd79668::init(cfg, di, delay),
        }
    }

    /// See [`Driver::clear`]
    pub fn clear<I: DisplayInterface, D: DelayNs>(
        self,
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
        refresh: bool,
    ) -> DriverResult<I> {
        match self {
            Self::Uc81xx => Uc81xx::clear(cfg, di, delay, refresh),
            Self::Uc8159 => Uc8159::clear(cfg, di, delay, refresh),
            Self::Ssd16xx => Ssd16xx::clear(cfg, di, delay, refresh),
            Self::Jd79668 => Jd79668::clear(cfg, di, delay, refresh),
        }
    }

    /// See [`Driver::write_image`]
    pub fn write_image<I: DisplayInterface>(
        self,
        cfg: &Config,
        di: &mut I,
        black: Option<&[u8]>,
        accent: Option<&[u8]>,
        region: Region,
    ) -> DriverResult<I> {
        match self {
            Self::Uc81xx => Uc81xx::write_image(cfg, di, black, accent, region),
            Self::Uc8159 => Uc8159::write_image(cfg, di, black, accent, region),
            Self::Ssd16xx => Ssd16xx::write_image(cfg, di, black, accent, region),
            Self::Jd79668 => Jd79668::write_image(cfg, di, black, accent, region),
        }
    }

    /// See [`Driver::write_ram`]
    pub fn write_ram<I: DisplayInterface>(
        self,
        cfg: &Config,
        di: &mut I,
        selector: RamSelector,
        data: &[u8],
    ) -> DriverResult<I> {
        match self {
            Self::Uc81xx => Uc81xx::write_ram(cfg, di, selector, data),
            Self::Uc8159 => Uc8159::write_ram(cfg, di, selector, data),
            Self::Ssd16xx => Ssd16xx::write_ram(cfg, di, selector, data),
            Self::Jd79668 => Jd79668::write_ram(cfg, di, selector, data),
        }
    }

    /// See [`Driver::refresh`]
    pub fn refresh<I: DisplayInterface, D: DelayNs>(
        self,
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> DriverResult<I> {
        match self {
            Self::Uc81xx => Uc81xx::refresh(cfg, di, delay),
            Self::Uc8159 => Uc8159::refresh(cfg, di, delay),
            Self::Ssd16xx => Ssd16xx::refresh(cfg, di, delay),
            Self::Jd79668 => Jd79668::refresh(cfg, di, delay),
        }
    }

    /// See [`Driver::sleep`]
    pub fn sleep<I: DisplayInterface, D: DelayNs>(
        self,
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> DriverResult<I> {
        match self {
            Self::Uc81xx => Uc81xx::sleep(cfg, di, delay),
            Self::Uc8159 => Uc8159::sleep(cfg, di, delay),
            Self::Ssd16xx => Ssd16xx::sleep(cfg, di, delay),
            Self::Jd79668 => Jd79668::sleep(cfg, di, delay),
        }
    }

    /// See [`Driver::read_temperature`]
    pub fn read_temperature<I: DisplayInterface, D: DelayNs>(
        self,
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> Result<i8, Error<I>> {
        match self {
            Self::Uc81xx => Uc81xx::read_temperature(cfg, di, delay),
            Self::Uc8159 => Uc8159::read_temperature(cfg, di, delay),
            Self::Ssd16xx => Ssd16xx::read_temperature(cfg, di, delay),
            Self::Jd79668 => Jd79668::read_temperature(cfg, di, delay),
        }
    }
}
