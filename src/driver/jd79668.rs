//! JD79668 driver
//!
//! Single packed RAM plane with four 2-bit pixels per byte (`00` black, `01`
//! white, `10` yellow, `11` red). Caller bytes are copied without per-pixel
//! conversion. The charge pumps are switched on once during init and stay on
//! across refreshes; only sleep powers them down.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use super::uc81xx::REFRESH_SETTLE_MS;
use super::{Driver, DriverResult, command, read_i8, settle, wait_ready};
use crate::command::jd79668::{
    ANALOG_TRIM, BTST, CDI, DRF, DSLP, DTM1, PLL, POF, POFS, PON, PSR, PTL, PWR, PWS, TCON,
    TRES, TSC, VENDOR_B4, VENDOR_B5, VENDOR_E7, VENDOR_E9,
};
use crate::command::uc81xx::DEEP_SLEEP_CHECK;
use crate::config::Config;
use crate::encode::{PACKED_WHITE, check_plane, stream_plane};
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::ram::{Plane, RamSelector, Region};

const BUSY: PinState = PinState::Low;

/// Budget for reset, power on/off and temperature conversion
const STEP_TIMEOUT_MS: u16 = 100;

/// Fitipower JD79668
pub struct Jd79668;

/// Select the partial window covering `region`, in pixels
fn set_window<I: DisplayInterface>(di: &mut I, region: Region) -> DriverResult<I> {
    let (x, xe) = (region.x, region.x_end());
    let (y, ye) = (region.y, region.y_end());
    log::trace!("partial window x {x}..={xe} y {y}..={ye}");

    let [x_hi, x_lo] = x.to_be_bytes();
    let [xe_hi, xe_lo] = xe.to_be_bytes();
    let [y_hi, y_lo] = y.to_be_bytes();
    let [ye_hi, ye_lo] = ye.to_be_bytes();
    command(
        di,
        PTL,
        &[x_hi, x_lo, xe_hi, xe_lo, y_hi, y_lo, ye_hi, ye_lo, 0x01],
    )
}

impl Driver for Jd79668 {
    const BUSY_LEVEL: PinState = BUSY;

    fn init<I: DisplayInterface, D: DelayNs>(
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> DriverResult<I> {
        di.reset(PinState::High, cfg.reset_pulse_ms, delay);
        settle(di, BUSY, STEP_TIMEOUT_MS, delay)?;

        let [w_hi, w_lo] = cfg.model.width.to_be_bytes();
        let [h_hi, h_lo] = cfg.model.height.to_be_bytes();
        command(di, ANALOG_TRIM, &[0x78])?;
        command(di, PSR, &[0x0F, 0x29])?;
        command(di, PWR, &[0x07, 0x00])?;
        command(di, POFS, &[0x10, 0x54, 0x44])?;
        command(di, BTST, &[0x05, 0x00, 0x3F, 0x0A, 0x25, 0x12, 0x1A])?;
        command(di, CDI, &[0x37])?;
        command(di, TCON, &[0x02, 0x02])?;
        command(di, TRES, &[w_hi, w_lo, h_hi, h_lo])?;
        command(di, VENDOR_E7, &[0x1C])?;
        command(di, PWS, &[0x22])?;
        command(di, VENDOR_B4, &[0xD0])?;
        command(di, VENDOR_B5, &[0x03])?;
        command(di, VENDOR_E9, &[0x01])?;
        command(di, PLL, &[0x08])?;

        command(di, PON, &[])?;
        settle(di, BUSY, STEP_TIMEOUT_MS, delay)
    }

    fn clear<I: DisplayInterface, D: DelayNs>(
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
        refresh: bool,
    ) -> DriverResult<I> {
        let model = &cfg.model;
        let ram_bytes = (model.width as usize).div_ceil(4) * model.height as usize;
        di.fill_ram(DTM1, PACKED_WHITE, ram_bytes)
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
        if accent.is_some() {
            log::trace!("accent plane ignored, colors are packed into the black plane");
        }
        // Two bits per pixel: each bitmap row spans two 1bpp-sized rows
        let len = region.row_bytes() * region.h as usize * 2;
        check_plane(black, len)?;

        set_window(di, region)?;
        command(di, DTM1, &[])?;
        stream_plane(di, black, len, PACKED_WHITE)
    }

    fn write_ram<I: DisplayInterface>(
        _cfg: &Config,
        di: &mut I,
        selector: RamSelector,
        data: &[u8],
    ) -> DriverResult<I> {
        if selector.plane == Plane::Accent {
            log::trace!("accent stream written to the packed plane");
        }
        if selector.begin {
            command(di, DTM1, &[])?;
        }
        di.send_data(data).map_err(Error::Interface)
    }

    fn refresh<I: DisplayInterface, D: DelayNs>(
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> DriverResult<I> {
        log::debug!("refresh begin");
        set_window(di, cfg.model.full_region())?;
        command(di, DRF, &[0x00])?;
        delay.delay_ms(REFRESH_SETTLE_MS);
        wait_ready(di, BUSY, cfg.refresh_timeout_ms, delay)?;
        log::debug!("refresh end");
        Ok(())
    }

    fn sleep<I: DisplayInterface, D: DelayNs>(
        _cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> DriverResult<I> {
        command(di, POF, &[0x00])?;
        wait_ready(di, BUSY, STEP_TIMEOUT_MS, delay)?;
        command(di, DSLP, &[DEEP_SLEEP_CHECK])
    }

    fn read_temperature<I: DisplayInterface, D: DelayNs>(
        _cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> Result<i8, Error<I>> {
        command(di, TSC, &[])?;
        wait_ready(di, BUSY, STEP_TIMEOUT_MS, delay)?;
        read_i8(di)
    }
}
