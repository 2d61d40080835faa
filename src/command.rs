//! Controller command definitions
//!
//! Command bytes grouped by controller family. Commands are sent over SPI with
//! the DC pin low; their parameters follow with DC high.
//!
//! ## Example
//!
//! ```rust,no_run
//! use epd_multi::{command::ssd16xx, DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::{InputPin, OutputPin};
//! # use embedded_hal::spi::{Operation, SpiDevice};
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
//! # let mut interface = Interface::new(MockSpi, MockPin, MockPin, MockPin);
//! # let pixel_data = [0xFFu8; 4];
//! // Soft reset
//! let _ = interface.send_command(ssd16xx::SW_RESET);
//!
//! // Write to the black/white RAM
//! let _ = interface.send_command(ssd16xx::WRITE_RAM1);
//! let _ = interface.send_data(&pixel_data);
//! ```

/// Solomon Systech SSD1619 / SSD1677
pub mod ssd16xx {
    /// Soft reset (0x12)
    ///
    /// Resets the controller to default state. Must wait for BUSY low after issuing.
    pub const SW_RESET: u8 = 0x12;

    /// Deep sleep mode (0x10)
    ///
    /// Requires 1 byte: 0x01 = deep sleep mode 1 (RAM retained)
    pub const DEEP_SLEEP: u8 = 0x10;

    /// Data entry mode (0x11)
    ///
    /// Requires 1 byte; 0x03 = X increment, Y increment, X counter first.
    pub const DATA_ENTRY_MODE: u8 = 0x11;

    /// Temperature sensor control (0x18)
    ///
    /// Requires 1 byte: 0x80 = internal sensor
    pub const TEMP_SENSOR_CONTROL: u8 = 0x18;

    /// Temperature register read (0x1B)
    pub const TEMP_SENSOR_READ: u8 = 0x1B;

    /// Master activation (0x20)
    ///
    /// Runs the sequence selected by [`DISPLAY_UPDATE_CTRL2`]. BUSY goes high during update.
    pub const MASTER_ACTIVATION: u8 = 0x20;

    /// Display update control 1 (0x21)
    ///
    /// Requires 2 bytes: RAM source selection, source output mode
    pub const DISPLAY_UPDATE_CTRL1: u8 = 0x21;

    /// Display update control 2 (0x22)
    ///
    /// Requires 1 byte selecting the update sequence
    pub const DISPLAY_UPDATE_CTRL2: u8 = 0x22;

    /// Write black/white RAM (0x24)
    ///
    /// Bit=0: Black, Bit=1: White
    pub const WRITE_RAM1: u8 = 0x24;

    /// Write accent RAM (0x26)
    ///
    /// Bit=0: accent color, Bit=1: no accent
    pub const WRITE_RAM2: u8 = 0x26;

    /// Border waveform control (0x3C)
    pub const BORDER_WAVEFORM: u8 = 0x3C;

    /// Set RAM X address range (0x44)
    ///
    /// SSD1677 takes 4 bytes in pixels; SSD1619 takes 2 bytes in bytes.
    pub const SET_RAM_X_RANGE: u8 = 0x44;

    /// Set RAM Y address range (0x45)
    ///
    /// Requires 4 bytes: [start_LSB, start_MSB, end_LSB, end_MSB]
    pub const SET_RAM_Y_RANGE: u8 = 0x45;

    /// Set RAM X address counter (0x4E)
    pub const SET_RAM_X_COUNTER: u8 = 0x4E;

    /// Set RAM Y address counter (0x4F)
    ///
    /// Requires 2 bytes: [address_LSB, address_MSB]
    pub const SET_RAM_Y_COUNTER: u8 = 0x4F;

    /// Use both RAM planes during refresh
    pub const CTRL1_NORMAL: u8 = 0x80;

    /// Ignore the accent RAM during refresh
    pub const CTRL1_BYPASS_RED: u8 = 0x40;

    /// Full refresh: clock on, analog on, load temperature, load LUT, display, power off
    pub const UPDATE_FULL: u8 = 0xF7;

    /// Power down after refresh: analog off, clock off
    pub const UPDATE_POWER_OFF: u8 = 0x83;

    /// Load the temperature value with clock and analog enabled
    pub const UPDATE_LOAD_TEMPERATURE: u8 = 0xB1;

    /// X increment, Y increment
    pub const ENTRY_X_INC_Y_INC: u8 = 0x03;

    /// Deep sleep mode 1
    pub const DEEP_SLEEP_MODE_1: u8 = 0x01;
}

/// UltraChip UC8159 / UC8176 / UC8179
pub mod uc81xx {
    /// Panel setting (0x00)
    pub const PSR: u8 = 0x00;

    /// Power setting (0x01)
    pub const PWR: u8 = 0x01;

    /// Power off (0x02)
    pub const POF: u8 = 0x02;

    /// Power on (0x04)
    ///
    /// BUSY is held low until the charge pumps are stable.
    pub const PON: u8 = 0x04;

    /// Booster soft start (0x06)
    pub const BTST: u8 = 0x06;

    /// Deep sleep (0x07)
    ///
    /// Requires 1 byte: check code 0xA5
    pub const DSLP: u8 = 0x07;

    /// Display start transmission 1 (0x10)
    ///
    /// Old frame on UC8176/UC8179 (used as the black plane on BWR panels),
    /// the only pixel RAM on UC8159.
    pub const DTM1: u8 = 0x10;

    /// Display refresh (0x12)
    pub const DRF: u8 = 0x12;

    /// Display start transmission 2 (0x13)
    pub const DTM2: u8 = 0x13;

    /// PLL control (0x30)
    pub const PLL: u8 = 0x30;

    /// Temperature sensor calibration (0x40)
    ///
    /// Triggers a measurement; the result is read back as one signed byte.
    pub const TSC: u8 = 0x40;

    /// VCOM and data interval setting (0x50)
    pub const CDI: u8 = 0x50;

    /// TCON setting (0x60)
    pub const TCON: u8 = 0x60;

    /// Resolution setting (0x61)
    ///
    /// Requires 4 bytes: width and height, big-endian
    pub const TRES: u8 = 0x61;

    /// VCOM DC setting (0x82)
    pub const VDCS: u8 = 0x82;

    /// Partial window (0x90)
    pub const PTL: u8 = 0x90;

    /// Partial in (0x91)
    pub const PTIN: u8 = 0x91;

    /// Partial out (0x92)
    pub const PTOUT: u8 = 0x92;

    /// Force temperature (0xE5)
    ///
    /// The UC8159 init writes 0x03 here.
    pub const TSSET: u8 = 0xE5;

    /// UC8159 flash control (0x65)
    pub const FLASH_CONTROL: u8 = 0x65;

    /// Deep sleep check code
    pub const DEEP_SLEEP_CHECK: u8 = 0xA5;
}

/// Fitipower JD79668
pub mod jd79668 {
    pub use super::uc81xx::{
        BTST, CDI, DRF, DSLP, DTM1, PLL, POF, PON, PSR, PWR, TCON, TRES, TSC,
    };

    /// Power off sequence setting (0x03)
    pub const POFS: u8 = 0x03;

    /// Undocumented analog trim (0x4D)
    pub const ANALOG_TRIM: u8 = 0x4D;

    /// Partial window (0x83)
    ///
    /// Requires 9 bytes: x, x_end, y, y_end big-endian, then 0x01
    pub const PTL: u8 = 0x83;

    /// Vendor register 0xB4, written once during init
    pub const VENDOR_B4: u8 = 0xB4;
    /// Vendor register 0xB5, written once during init
    pub const VENDOR_B5: u8 = 0xB5;
    /// Power saving (0xE3)
    pub const PWS: u8 = 0xE3;
    /// Vendor register 0xE7, written once during init
    pub const VENDOR_E7: u8 = 0xE7;
    /// Vendor register 0xE9, written once during init
    pub const VENDOR_E9: u8 = 0xE9;
}
