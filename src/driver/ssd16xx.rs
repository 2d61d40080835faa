//! SSD1619 / SSD1677 driver
//!
//! Two 1bpp RAM planes (RAM1 black/white, RAM2 accent) written through an
//! address window. Refresh and power sequencing run as Display Update Control 2
//! sequences triggered by Master Activation; BUSY is high while the controller
//! works.
//!
//! The two ICs differ only in RAM X addressing: SSD1677 takes 16-bit pixel
//! addresses, SSD1619 takes byte columns.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use super::{Driver, DriverResult, command, read_i8, settle, wait_ready};
use crate::command::ssd16xx::{
    BORDER_WAVEFORM, CTRL1_BYPASS_RED, CTRL1_NORMAL, DATA_ENTRY_MODE, DEEP_SLEEP,
    DEEP_SLEEP_MODE_1, DISPLAY_UPDATE_CTRL1, DISPLAY_UPDATE_CTRL2, ENTRY_X_INC_Y_INC,
    MASTER_ACTIVATION, SET_RAM_X_COUNTER, SET_RAM_X_RANGE, SET_RAM_Y_COUNTER, SET_RAM_Y_RANGE,
    SW_RESET, TEMP_SENSOR_CONTROL, TEMP_SENSOR_READ, UPDATE_FULL, UPDATE_LOAD_TEMPERATURE,
    UPDATE_POWER_OFF, WRITE_RAM1, WRITE_RAM2,
};
use crate::config::Config;
use crate::encode::{WHITE, check_plane, stream_plane};
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::model::{ColorMode, DriverIc, Model};
use crate::ram::{Plane, RamSelector, Region};

const BUSY: PinState = PinState::High;

/// Budget for the soft reset
const RESET_TIMEOUT_MS: u16 = 200;
/// Budget for loading the temperature value
const TEMPERATURE_TIMEOUT_MS: u16 = 500;
/// Time to enter deep sleep; BUSY stays high once asleep
const SLEEP_SETTLE_MS: u32 = 100;

/// Solomon Systech SSD1619 / SSD1677
pub struct Ssd16xx;

/// Run a Display Update Control 2 sequence
fn update<I: DisplayInterface>(di: &mut I, sequence: u8) -> DriverResult<I> {
    command(di, DISPLAY_UPDATE_CTRL2, &[sequence])?;
    command(di, MASTER_ACTIVATION, &[])
}

/// Select the RAM window and park the address counters at its origin
fn set_window<I: DisplayInterface>(model: &Model, di: &mut I, region: Region) -> DriverResult<I> {
    let (x, xe) = (region.x, region.x_end());
    let (y, ye) = (region.y, region.y_end());
    log::trace!("ram window x {x}..={xe} y {y}..={ye}");

    let [y_lo, y_hi] = y.to_le_bytes();
    let [ye_lo, ye_hi] = ye.to_le_bytes();
    let y_range = [y_lo, y_hi, ye_lo, ye_hi];

    command(di, DATA_ENTRY_MODE, &[ENTRY_X_INC_Y_INC])?;
    if model.ic == DriverIc::Ssd1677 {
        let [x_lo, x_hi] = x.to_le_bytes();
        let [xe_lo, xe_hi] = xe.to_le_bytes();
        command(di, SET_RAM_X_RANGE, &[x_lo, x_hi, xe_lo, xe_hi])?;
        command(di, SET_RAM_X_COUNTER, &[x_lo, x_hi])?;
    } else {
        command(di, SET_RAM_X_RANGE, &[(x / 8) as u8, (xe / 8) as u8])?;
        command(di, SET_RAM_Y_RANGE, &y_range)?;
        command(di, SET_RAM_X_COUNTER, &[(x / 8) as u8])?;
    }
    command(di, SET_RAM_Y_RANGE, &y_range)?;
    command(di, SET_RAM_Y_COUNTER, &[y_lo, y_hi])
}

impl Driver for Ssd16xx {
    const BUSY_LEVEL: PinState = BUSY;

    fn init<I: DisplayInterface, D: DelayNs>(
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> DriverResult<I> {
        di.reset(PinState::High, cfg.reset_pulse_ms, delay);

        command(di, SW_RESET, &[])?;
        settle(di, BUSY, RESET_TIMEOUT_MS, delay)?;

        command(di, BORDER_WAVEFORM, &[0x01])?;
        command(di, TEMP_SENSOR_CONTROL, &[0x80])?;

        set_window(&cfg.model, di, cfg.model.full_region())
    }

    fn clear<I: DisplayInterface, D: DelayNs>(
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
        refresh: bool,
    ) -> DriverResult<I> {
        let model = &cfg.model;
        let ram_bytes = (model.width as usize).div_ceil(8) * model.height as usize;

        set_window(model, di, model.full_region())?;
        di.fill_ram(WRITE_RAM1, WHITE, ram_bytes)
            .map_err(Error::Interface)?;
        di.fill_ram(WRITE_RAM2, WHITE, ram_bytes)
            .map_err(Error::Interface)?;

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

        set_window(model, di, region)?;
        command(di, WRITE_RAM1, &[])?;
        stream_plane(di, black, len, WHITE)?;
        // Black/white panels mirror RAM1 into RAM2
        command(di, WRITE_RAM2, &[])?;
        stream_plane(di, if bwr { accent } else { black }, len, WHITE)
    }

    fn write_ram<I: DisplayInterface>(
        cfg: &Config,
        di: &mut I,
        selector: RamSelector,
        data: &[u8],
    ) -> DriverResult<I> {
        if selector.begin {
            let cmd = match (cfg.model.color, selector.plane) {
                (ColorMode::Bwr, Plane::Accent) => WRITE_RAM2,
                _ => WRITE_RAM1,
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
        let ctrl1 = if cfg.model.color == ColorMode::Bwr {
            CTRL1_NORMAL
        } else {
            CTRL1_BYPASS_RED
        };
        command(di, DISPLAY_UPDATE_CTRL1, &[ctrl1, 0x00])?;

        log::debug!("refresh begin");
        if cfg.temperature_on_refresh {
            let celsius = Self::read_temperature(cfg, di, delay)?;
            log::debug!("temperature: {celsius}");
        }
        update(di, UPDATE_FULL)?;
        wait_ready(di, BUSY, cfg.refresh_timeout_ms, delay)?;
        log::debug!("refresh end");

        // The address counters must be re-parked before powering down
        set_window(&cfg.model, di, cfg.model.full_region())?;
        update(di, UPDATE_POWER_OFF)
    }

    fn sleep<I: DisplayInterface, D: DelayNs>(
        _cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> DriverResult<I> {
        command(di, DEEP_SLEEP, &[DEEP_SLEEP_MODE_1])?;
        delay.delay_ms(SLEEP_SETTLE_MS);
        Ok(())
    }

    fn read_temperature<I: DisplayInterface, D: DelayNs>(
        _cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> Result<i8, Error<I>> {
        update(di, UPDATE_LOAD_TEMPERATURE)?;
        wait_ready(di, BUSY, TEMPERATURE_TIMEOUT_MS, delay)?;
        command(di, TEMP_SENSOR_READ, &[])?;
        read_i8(di)
    }
}
