//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for talking to any of the supported controllers over SPI.
//!
//! ## Hardware Requirements
//!
//! Every supported controller needs:
//! - SPI bus (MOSI + SCK, MISO or a shared SDA line for register reads)
//! - 3 GPIO pins:
//!   - **DC**: Data/Command select (output)
//!   - **RST**: Reset (output)
//!   - **BUSY**: Busy status (input, polarity depends on the controller family)
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin, PinState};
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use epd_multi::{DisplayInterface, Interface};
//! # use core::convert::Infallible;
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
//! # let mut delay = MockDelay;
//! let mut interface = Interface::new(MockSpi, MockPin, MockPin, MockPin);
//!
//! // Send command with one data byte
//! let _ = interface.send_command(0x10);
//! let _ = interface.send_data(&[0x01]);
//!
//! // Wait until a busy-high controller is ready (200ms budget)
//! let _ = interface.busy_wait(PinState::High, 200, &mut delay);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, PinState};
use embedded_hal::spi::SpiDevice;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Chunk size used when streaming a repeated fill byte
const FILL_CHUNK: usize = 64;

/// Trait for the byte-level transport to an e-paper controller
///
/// Drivers are written exclusively against this trait. The bus is assumed to be
/// exclusively owned by the caller for the duration of each call: commands and
/// their payloads never interleave with another sequence.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. Only the four required
/// methods need an implementation; the remaining ones are built on top of them.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a command byte to the controller (DC low)
    #[allow(clippy::type_complexity)]
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send data bytes to the controller (DC high)
    #[allow(clippy::type_complexity)]
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Read data bytes from the controller (DC high)
    #[allow(clippy::type_complexity)]
    fn read_data(&mut self, buffer: &mut [u8]) -> InterfaceResult<(), Self::Error>;

    /// Pulse the reset line
    ///
    /// Drives RST to `level`, waits `duration_ms`, drives the inverse level,
    /// waits again, then returns RST to `level` and waits a final period.
    fn reset<D: DelayNs>(&mut self, level: PinState, duration_ms: u32, delay: &mut D);

    /// Poll the BUSY pin while it reads `busy_level`
    ///
    /// Returns `Ok(true)` once the controller is ready, `Ok(false)` if it is
    /// still busy after `timeout_ms`. A timeout of 0 waits indefinitely.
    #[allow(clippy::type_complexity)]
    fn busy_wait<D: DelayNs>(
        &mut self,
        busy_level: PinState,
        timeout_ms: u16,
        delay: &mut D,
    ) -> InterfaceResult<bool, Self::Error>;

    /// Send a command followed by its parameter bytes
    fn send_command_data(&mut self, command: u8, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.send_command(command)?;
        if data.is_empty() {
            return Ok(());
        }
        self.send_data(data)
    }

    /// Send a single data byte
    fn send_byte(&mut self, value: u8) -> InterfaceResult<(), Self::Error> {
        self.send_data(&[value])
    }

    /// Read a single data byte
    fn read_byte(&mut self) -> InterfaceResult<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_data(&mut buf)?;
        Ok(buf[0])
    }

    /// Stream `count` copies of `value` as data
    fn send_repeated(&mut self, value: u8, count: usize) -> InterfaceResult<(), Self::Error> {
        let chunk = [value; FILL_CHUNK];
        let mut remaining = count;
        while remaining > 0 {
            let n = remaining.min(FILL_CHUNK);
            self.send_data(&chunk[..n])?;
            remaining -= n;
        }
        Ok(())
    }

    /// Select a RAM write command and stream `count` copies of `value` into it
    fn fill_ram(&mut self, command: u8, value: u8, count: usize) -> InterfaceResult<(), Self::Error> {
        self.send_command(command)?;
        self.send_repeated(value, count)
    }
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Default timeout for a full refresh busy-wait in milliseconds
pub const DEFAULT_BUSY_TIMEOUT_MS: u16 = 30_000;

/// Hardware interface implementation
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
/// * `BUSY` - Busy pin implementing [`InputPin`]
pub struct Interface<SPI, DC, RST, BUSY> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin
    rst: RST,
    /// Busy pin
    busy: BUSY,
}

impl<SPI, DC, RST, BUSY> Interface<SPI, DC, RST, BUSY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output)
    /// * `busy` - Busy pin (input)
    pub fn new(spi: SPI, dc: DC, rst: RST, busy: BUSY) -> Self {
        Self { spi, dc, rst, busy }
    }

    /// Consume the interface and return the SPI device and pins
    pub fn release(self) -> (SPI, DC, RST, BUSY) {
        (self.spi, self.dc, self.rst, self.busy)
    }
}

impl<SPI, DC, RST, BUSY, PinErr> DisplayInterface for Interface<SPI, DC, RST, BUSY>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn read_data(&mut self, buffer: &mut [u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.read(buffer).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, level: PinState, duration_ms: u32, delay: &mut D) {
        let _ = self.rst.set_state(level);
        delay.delay_ms(duration_ms);
        let _ = self.rst.set_state(!level);
        delay.delay_ms(duration_ms);
        let _ = self.rst.set_state(level);
        delay.delay_ms(duration_ms);
    }

    fn busy_wait<D: DelayNs>(
        &mut self,
        busy_level: PinState,
        timeout_ms: u16,
        delay: &mut D,
    ) -> InterfaceResult<bool, Self::Error> {
        let mut elapsed = 0u16;

        loop {
            let is_busy = match busy_level {
                PinState::High => self.busy.is_high(),
                PinState::Low => self.busy.is_low(),
            };

            let is_busy = match is_busy {
                Ok(value) => value,
                Err(e) => return Err(InterfaceError::Pin(e)),
            };

            if !is_busy {
                return Ok(true);
            }

            delay.delay_ms(1);
            elapsed = elapsed.saturating_add(1);
            if timeout_ms > 0 && elapsed >= timeout_ms {
                return Ok(false);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use alloc::vec;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as MockPinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    fn spi_write(data: &[u8]) -> [SpiTransaction<u8>; 3] {
        [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(data.to_vec()),
            SpiTransaction::transaction_end(),
        ]
    }

    #[test]
    fn test_default_busy_timeout() {
        assert_eq!(DEFAULT_BUSY_TIMEOUT_MS, 30_000);
    }

    #[test]
    fn test_command_then_data_toggles_dc() {
        let mut expectations = vec![];
        expectations.extend(spi_write(&[0x10]));
        expectations.extend(spi_write(&[0x01]));
        let spi = SpiMock::new(&expectations);
        let dc = PinMock::new(&[
            PinTransaction::set(MockPinState::Low),
            PinTransaction::set(MockPinState::High),
        ]);
        let rst = PinMock::new(&[]);
        let busy = PinMock::new(&[]);

        let mut interface = Interface::new(spi, dc, rst, busy);
        interface.send_command(0x10).unwrap();
        interface.send_data(&[0x01]).unwrap();

        let (mut spi, mut dc, mut rst, mut busy) = interface.release();
        spi.done();
        dc.done();
        rst.done();
        busy.done();
    }

    #[test]
    fn test_read_byte_uses_data_mode() {
        let spi = SpiMock::new(&[
            SpiTransaction::transaction_start(),
            SpiTransaction::read_vec(vec![0x19]),
            SpiTransaction::transaction_end(),
        ]);
        let dc = PinMock::new(&[PinTransaction::set(MockPinState::High)]);
        let mut interface = Interface::new(spi, dc, PinMock::new(&[]), PinMock::new(&[]));

        assert_eq!(interface.read_byte().unwrap(), 0x19);

        let (mut spi, mut dc, mut rst, mut busy) = interface.release();
        spi.done();
        dc.done();
        rst.done();
        busy.done();
    }

    #[test]
    fn test_reset_pulses_inverse_level() {
        let rst = PinMock::new(&[
            PinTransaction::set(MockPinState::High),
            PinTransaction::set(MockPinState::Low),
            PinTransaction::set(MockPinState::High),
        ]);
        let mut interface =
            Interface::new(SpiMock::new(&[]), PinMock::new(&[]), rst, PinMock::new(&[]));
        interface.reset(PinState::High, 10, &mut NoopDelay);

        let (mut spi, mut dc, mut rst, mut busy) = interface.release();
        spi.done();
        dc.done();
        rst.done();
        busy.done();
    }

    #[test]
    fn test_busy_wait_active_high_returns_when_low() {
        let busy = PinMock::new(&[
            PinTransaction::get(MockPinState::High),
            PinTransaction::get(MockPinState::High),
            PinTransaction::get(MockPinState::Low),
        ]);
        let mut interface =
            Interface::new(SpiMock::new(&[]), PinMock::new(&[]), PinMock::new(&[]), busy);
        let ready = interface
            .busy_wait(PinState::High, 100, &mut NoopDelay)
            .unwrap();
        assert!(ready);

        let (mut spi, mut dc, mut rst, mut busy) = interface.release();
        spi.done();
        dc.done();
        rst.done();
        busy.done();
    }

    #[test]
    fn test_busy_wait_active_low_times_out() {
        let busy = PinMock::new(&[
            PinTransaction::get(MockPinState::Low),
            PinTransaction::get(MockPinState::Low),
            PinTransaction::get(MockPinState::Low),
        ]);
        let mut interface =
            Interface::new(SpiMock::new(&[]), PinMock::new(&[]), PinMock::new(&[]), busy);
        let ready = interface
            .busy_wait(PinState::Low, 3, &mut NoopDelay)
            .unwrap();
        assert!(!ready);

        let (mut spi, mut dc, mut rst, mut busy) = interface.release();
        spi.done();
        dc.done();
        rst.done();
        busy.done();
    }

    #[test]
    fn test_fill_ram_streams_in_chunks() {
        let mut expectations = vec![];
        expectations.extend(spi_write(&[0x24]));
        expectations.extend(spi_write(&[0xFF; FILL_CHUNK]));
        expectations.extend(spi_write(&[0xFF; 6]));
        let spi = SpiMock::new(&expectations);
        let dc = PinMock::new(&[
            PinTransaction::set(MockPinState::Low),
            PinTransaction::set(MockPinState::High),
            PinTransaction::set(MockPinState::High),
        ]);
        let mut interface = Interface::new(spi, dc, PinMock::new(&[]), PinMock::new(&[]));
        interface.fill_ram(0x24, 0xFF, FILL_CHUNK + 6).unwrap();

        let (mut spi, mut dc, mut rst, mut busy) = interface.release();
        spi.done();
        dc.done();
        rst.done();
        busy.done();
    }
}
