//! UC8159 driver
//!
//! One pixel RAM (DTM1) holding 4-bit symbols, two pixels per byte. Pixels are
//! produced by interleaving the caller's black and accent planes through
//! [`four_level`](crate::encode::four_level); raw planes are never copied.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use super::uc81xx::{self, partial_window};
use super::{Driver, DriverResult, command};
use crate::command::uc81xx::{
    BTST, CDI, DTM1, FLASH_CONTROL, PLL, PSR, PTOUT, PWR, TCON, TRES, TSSET, VDCS,
};
use crate::config::Config;
use crate::encode::{FOUR_LEVEL_WHITE_PAIR, check_plane, stream_four_level};
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::ram::{Plane, RamSelector, Region};

/// UltraChip UC8159
pub struct Uc8159;

impl Driver for Uc8159 {
    const BUSY_LEVEL: PinState = PinState::Low;

    fn init<I: DisplayInterface, D: DelayNs>(
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> DriverResult<I> {
        di.reset(PinState::High, cfg.reset_pulse_ms, delay);

        let [w_hi, w_lo] = cfg.model.width.to_be_bytes();
        let [h_hi, h_lo] = cfg.model.height.to_be_bytes();
        command(di, PWR, &[0x37, 0x00])?;
        command(di, PSR, &[0xCF, 0x08])?;
        command(di, PLL, &[0x3A])?;
        command(di, VDCS, &[0x28])?;
        command(di, BTST, &[0xC7, 0xCC, 0x15])?;
        command(di, CDI, &[0x77])?;
        command(di, TCON, &[0x22])?;
        command(di, FLASH_CONTROL, &[0x00])?;
        command(di, TSSET, &[0x03])?;
        command(di, TRES, &[w_hi, w_lo, h_hi, h_lo])
    }

    fn clear<I: DisplayInterface, D: DelayNs>(
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
        refresh: bool,
    ) -> DriverResult<I> {
        let model = &cfg.model;
        // Four output bytes per source byte
        let ram_bytes = (model.width as usize).div_ceil(8) * 4 * model.height as usize;
        di.fill_ram(DTM1, FOUR_LEVEL_WHITE_PAIR, ram_bytes)
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
        check_plane(black, len)?;
        check_plane(accent, len)?;

        partial_window(di, region)?;
        command(di, DTM1, &[])?;
        stream_four_level(di, black, accent, len)?;
        command(di, PTOUT, &[])
    }

    fn write_ram<I: DisplayInterface>(
        _cfg: &Config,
        di: &mut I,
        selector: RamSelector,
        data: &[u8],
    ) -> DriverResult<I> {
        if selector.plane == Plane::Accent {
            log::debug!("accent stream ignored, 4-level RAM takes black data only");
            return Ok(());
        }
        if selector.begin {
            command(di, DTM1, &[])?;
        }
        stream_four_level(di, Some(data), None, data.len())
    }

    fn refresh<I: DisplayInterface, D: DelayNs>(
        cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> DriverResult<I> {
        uc81xx::refresh(cfg, di, delay)
    }

    fn sleep<I: DisplayInterface, D: DelayNs>(
        _cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> DriverResult<I> {
        uc81xx::sleep(di, delay)
    }

    fn read_temperature<I: DisplayInterface, D: DelayNs>(
        _cfg: &Config,
        di: &mut I,
        delay: &mut D,
    ) -> Result<i8, Error<I>> {
        uc81xx::temperature(di, delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::uc81xx::{DRF, POF, PON, PTIN, PTL, TSC};
    use crate::config::Builder;
    use crate::model::{ModelId, Registry};
    use crate::testing::{MockDelay, MockInterface};
    use alloc::vec;

    fn config() -> Config {
        Builder::new()
            .model(ModelId::Uc8159Bwr750Low)
            .build(&Registry::new())
            .unwrap()
    }

    #[test]
    fn test_init_writes_resolution_big_endian() {
        let mut di = MockInterface::new();
        Uc8159::init(&config(), &mut di, &mut MockDelay).unwrap();
        assert_eq!(
            di.commands(),
            vec![PWR, PSR, PLL, VDCS, BTST, CDI, TCON, FLASH_CONTROL, TSSET, TRES]
        );
        assert_eq!(di.payload(TRES), Some(vec![0x02, 0x80, 0x01, 0x80]));
        assert_eq!(di.payload(BTST), Some(vec![0xC7, 0xCC, 0x15]));
        assert_eq!(di.payload(TSSET), Some(vec![0x03]));
    }

    #[test]
    fn test_clear_streams_white_pairs() {
        let mut di = MockInterface::new();
        Uc8159::clear(&config(), &mut di, &mut MockDelay, false).unwrap();
        assert_eq!(di.commands(), vec![DTM1]);
        let data = di.data_bytes();
        assert_eq!(data.len(), 80 * 4 * 384);
        assert!(data.iter().all(|b| *b == 0x33));
    }

    #[test]
    fn test_write_image_interleaves_planes() {
        let mut di = MockInterface::new();
        let black = [0xAAu8];
        let accent = [0xFFu8];
        Uc8159::write_image(
            &config(),
            &mut di,
            Some(&black),
            Some(&accent),
            Region::new(0, 0, 8, 1),
        )
        .unwrap();
        assert_eq!(di.commands(), vec![PTIN, PTL, DTM1, PTOUT]);
        assert_eq!(di.payload(DTM1), Some(vec![0x30, 0x30, 0x30, 0x30]));
    }

    #[test]
    fn test_write_image_without_planes_is_white() {
        let mut di = MockInterface::new();
        Uc8159::write_image(&config(), &mut di, None, None, Region::new(8, 8, 16, 2)).unwrap();
        assert_eq!(di.payload(DTM1), Some(vec![0x33; 2 * 2 * 4]));
    }

    #[test]
    fn test_write_ram_encodes_black_only() {
        let cfg = config();
        let mut di = MockInterface::new();
        Uc8159::write_ram(&cfg, &mut di, RamSelector::begin(Plane::Black), &[0x00]).unwrap();
        Uc8159::write_ram(&cfg, &mut di, RamSelector::begin(Plane::Accent), &[0x00]).unwrap();
        assert_eq!(di.command_data(), vec![(DTM1, vec![0x00; 4])]);
    }

    #[test]
    fn test_refresh_shares_uc81xx_power_sequence() {
        let mut di = MockInterface::new();
        Uc8159::refresh(&config(), &mut di, &mut MockDelay).unwrap();
        assert_eq!(di.commands(), vec![PON, TSC, DRF, POF]);
    }
}
