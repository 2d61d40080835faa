//! UC8176 / UC8179 driver
//!
//! Two 1bpp RAM planes (DTM1, DTM2) addressed through the partial window, with
//! explicit power on/off around every refresh. The power, refresh, sleep and
//! temperature sequences are shared with the UC8159.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use super::{Driver, DriverResult, command, read_i8, wait_ready};
use crate::command::uc81xx::{
    CDI, DEEP_SLEEP_CHECK, DRF, DSLP, DTM1, DTM2, POF, PON, PSR, PTIN, PTL, PTOUT, TSC,
};
use crate::config::Config;
use crate::encode::{WHITE, check_plane, stream_plane};
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::model::ColorMode;
use crate::ram::{Plane, RamSelector, Region};

/// Budget for power on/off and temperature conversion
pub(super) const STEP_TIMEOUT_MS: u16 = 100;
/// Settling time between the refresh trigger and the first busy poll
pub(super) const REFRESH_SETTLE_MS: u32 = 100;

const BUSY: PinState = PinState::Low;

/// UltraChip UC8176 / UC8179
pub struct Uc81xx;

pub(super) fn power_on<I: DisplayInterface, D: DelayNs>(
    di: &mut I,
    delay: &mut D,
) -> DriverResult<I> {
    command(di, PON, &[])?;
    wait_ready(di, BUSY, STEP_TIMEOUT_MS, delay)
}

pub(super) fn power_off<I: DisplayInterface, D: DelayNs>(
    di: &mut I,
    delay: &mut D,
) -> DriverResult<I> {
    command(di, POF, &[])?;
    wait_ready(di, BUSY, STEP_TIMEOUT_MS, delay)
}

pub(super) fn temperature<I: DisplayInterface, D: DelayNs>(
    di: &mut I,
    delay: &mut D,
) -> Result<i8, Error<I>> {
    command(di, TSC, &[])?;
    wait_ready(di, BUSY, STEP_TIMEOUT_MS, delay)?;
    read_i8(di)
}

pub(super) fn refresh<I: DisplayInterface, D: DelayNs>(
    cfg: &Config,
    di: &mut I,
    delay: &mut D,
) -> DriverResult<I> {
    log::debug!("refresh begin");
    power_on(di, delay)?;
    if cfg.temperature_on_refresh {
        let celsius = temperature(di, delay)?;
        log::debug!("temperature: {celsius}");
    }
    command(di, DRF, &[])?;
    delay.delay_ms(REFRESH_SETTLE_MS);
    wait_ready(di, BUSY, cfg.refresh_timeout_ms, delay)?;
    power_off(di, delay)?;
    log::debug!("refresh end");
    Ok(())
}

pub(super) fn sleep<I: DisplayInterface, D: DelayNs>(
    di: &mut I,
    delay: &mut D,
) -> DriverResult<I> {
    power_off(di, delay)?;
    command(di, DSLP, &[DEEP_SLEEP_CHECK])
}

/// Enter partial mode and select the window covering `region`
///
/// `region` must already be byte aligned.
pub(super) fn partial_window<I: DisplayInterface>(di: &mut I, region: Region) -> DriverResult<I> {
    let x = region.x & 0xFFF8;
    let xe = region.x_end() | 0x0007;
    let (y, ye) = (region.y, region.y_end());
    log::trace!("partial window x {x}..={xe} y {y}..={ye}");

    let [x_hi, x_lo] = x.to_be_bytes();
    let [xe_hi, xe_lo] = xe.to_be_bytes();
    let [y_hi, y_lo] = y.to_be_bytes();
    let [ye_hi, ye_lo] = ye.to_be_bytes();
    command(di, PTIN, &[])?;
    command(
        di,
        PTL,
        &[x_hi, x_lo, xe_hi, xe_lo, y_hi, y_lo, ye_hi, ye_lo, 0x00],
    )
}

impl Driver for Uc81xx {
    const BUSY_LEVEL: PinState = BUSY;

    fn init<I: DisplayInterface, D: DelayNs>(
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> DriverResult<I> {
        di.reset(PinState::High, cfg.reset_pulse_ms, delay);

        let bwr = cfg.model.color == ColorMode::Bwr;
        command(di, PSR, &[if bwr { 0x0F } else { 0x1F }])?;
        command(di, CDI, &[if bwr { 0x77 } else { 0x97 }])
    }

    fn clear<I: DisplayInterface, D: DelayNs>(
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
        refresh: bool,
    ) -> DriverResult<I> {
        let model = &cfg.model;
        let ram_bytes = (model.width as usize).div_ceil(8) * model.height as usize;

        di.fill_ram(DTM1, WHITE, ram_bytes).map_err(Error::Interface)?;
        di.fill_ram(DTM2, WHITE, ram_bytes).map_err(Error::Interface)?;

        if refresh {
            Self::refresh(cfg, di, delay)?;
        }
        Ok(())
    }

    fn write_image<I: DisplayInterface>(
        cfg: &Config,
        di: &mut I,
        black: Option<&[u8]>,
        accent: Option<&[u8]>,
        region: Region,
    ) -> DriverResult<I> {
        let model = &cfg.model;
        let Some(region) = region.place(model.width, model.height) else {
            return Ok(());
        };
        let len = region.row_bytes() * region.h as usize;
        let bwr = model.color == ColorMode::Bwr;
        check_plane(black, len)?;
        if bwr {
            check_plane(accent, len)?;
        }

        partial_window(di, region)?;
        if bwr {
            command(di, DTM1, &[])?;
            stream_plane(di, black, len, WHITE)?;
            command(di, DTM2, &[])?;
            stream_plane(di, accent, len, WHITE)?;
        } else {
            command(di, DTM2, &[])?;
            stream_plane(di, black, len, WHITE)?;
        }
        command(di, PTOUT, &[])
    }

    fn write_ram<I: DisplayInterface>(
        cfg: &Config,
        di: &mut I,
        selector: RamSelector,
        data: &[u8],
    ) -> DriverResult<I> {
        if selector.begin {
            let cmd = match (cfg.model.color, selector.plane) {
                (ColorMode::Bwr, Plane::Black) => DTM1,
                _ => DTM2,
            };
            command(di, cmd, &[])?;
        }
        di.send_data(data).map_err(Error::Interface)
    }

    fn refresh<I: DisplayInterface, D: DelayNs>(
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> DriverResult<I> {
        refresh(cfg, di, delay)
    }

    fn sleep<I: DisplayInterface, D: DelayNs>(
        _cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> DriverResult<I> {
        sleep(di, delay)
    }

    fn read_temperature<I: DisplayInterface, D: DelayNs>(
        _cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> Result<i8, Error<I>> {
        temperature(di, delay)
    }
}
