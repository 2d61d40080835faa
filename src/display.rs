//! Core display operations
//!
//! [`Display`] owns one transport and one [`Config`] and drives the bound
//! controller family through its session states:
//!
//! ```text
//! Uninitialized --init--> Ready --clear/write--> Loaded <--refresh--> Loaded
//!        any   --init--> Ready          Ready/Loaded --sleep--> Sleeping
//!        any   --fatal error--> Faulted --init--> Ready
//! ```
//!
//! Operations called from the wrong state fail with
//! [`Error::InvalidState`] before touching the bus.

use embedded_hal::delay::DelayNs;

use crate::config::Config;
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::model::{Family, Model};
use crate::ram::{RamSelector, Region};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Controller session state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No init since power up or construction
    #[default]
    Uninitialized,
    /// Registers programmed, RAM content unknown
    Ready,
    /// RAM written since init
    Loaded,
    /// Refresh in progress
    Refreshing,
    /// Deep sleep; only `init` or another `sleep` is accepted
    Sleeping,
    /// A transport error or busy timeout left the panel in an undefined state
    Faulted,
}

impl SessionState {
    /// Whether RAM and refresh operations are accepted
    fn accepts_content(self) -> bool {
        matches!(self, Self::Ready | Self::Loaded)
    }
}

/// Core display driver
///
/// This struct provides the seven driver operations for one panel.
/// For graphics support, use `GraphicDisplay` (requires `graphics` feature).
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Session state
    state: SessionState,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// No bus traffic happens until [`Display::init`].
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            state: SessionState::Uninitialized,
        }
    }

    /// Reset and program the controller
    ///
    /// Legal from every state, including after a fault.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let result = self.family().init(&self.config, &mut self.interface, delay);
        self.finish(result, SessionState::Ready)
    }

    /// Fill all RAM planes with white, optionally refreshing afterwards
    pub fn clear<D: DelayNs>(&mut self, delay: &mut D, refresh: bool) -> DisplayResult<I> {
        self.require_content()?;
        let result = self
            .family()
            .clear(&self.config, &mut self.interface, delay, refresh);
        self.finish(result, SessionState::Loaded)
    }

    /// Write a region of the caller's planes into controller RAM
    ///
    /// # Arguments
    ///
    /// * `black` - Black/white plane (0=black, 1=white), or the packed 2bpp
    ///   plane on four-color panels. `None` writes white.
    /// * `accent` - Accent plane (0=accent). `None` writes "no accent".
    /// * `region` - Target rectangle in native pixels. It is byte aligned;
    ///   regions that end up empty or outside the panel are dropped.
    ///
    /// Plane row stride is `ceil(w / 8)` bytes (twice that for packed planes).
    pub fn write_image(
        &mut self,
        black: Option<&[u8]>,
        accent: Option<&[u8]>,
        region: Region,
    ) -> DisplayResult<I> {
        self.require_content()?;
        let result = self
            .family()
            .write_image(&self.config, &mut self.interface, black, accent, region);
        self.finish(result, SessionState::Loaded)
    }

    /// Stream controller-native bytes into a RAM plane
    ///
    /// Consecutive calls with [`RamSelector::resume`] continue the stream
    /// opened by the last [`RamSelector::begin`].
    pub fn write_ram(&mut self, selector: RamSelector, data: &[u8]) -> DisplayResult<I> {
        self.require_content()?;
        let result = self
            .family()
            .write_ram(&self.config, &mut self.interface, selector, data);
        self.finish(result, SessionState::Loaded)
    }

    /// Transfer RAM content to the panel
    pub fn refresh<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.require_content()?;
        self.transition(SessionState::Refreshing);
        let result = self
            .family()
            .refresh(&self.config, &mut self.interface, delay);
        self.finish(result, SessionState::Loaded)
    }

    /// Enter deep sleep
    ///
    /// Repeated calls re-issue the sleep sequence. Only [`Display::init`]
    /// wakes the controller.
    pub fn sleep<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        if !(self.state.accepts_content() || self.state == SessionState::Sleeping) {
            return Err(self.misuse("sleep"));
        }
        let result = self.family().sleep(&self.config, &mut self.interface, delay);
        self.finish(result, SessionState::Sleeping)
    }

    /// Read the on-die temperature sensor in degrees Celsius
    pub fn read_temperature<D: DelayNs>(&mut self, delay: &mut D) -> Result<i8, Error<I>> {
        self.require_content()?;
        let result = self
            .family()
            .read_temperature(&self.config, &mut self.interface, delay);
        if matches!(&result, Err(e) if e.is_fatal()) {
            self.transition(SessionState::Faulted);
        }
        result
    }

    /// Get the panel model
    pub fn model(&self) -> &Model {
        &self.config.model
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Consume the display and return the interface
    pub fn release(self) -> I {
        self.interface
    }

    fn family(&self) -> Family {
        self.config.model.family()
    }

    fn require_content(&self) -> DisplayResult<I> {
        if self.state.accepts_content() {
            Ok(())
        } else {
            Err(self.misuse("operation"))
        }
    }

    fn misuse(&self, what: &str) -> Error<I> {
        log::warn!("{what} rejected while {:?}", self.state);
        Error::InvalidState(self.state)
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            log::debug!("session {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    /// Apply the outcome of a driver call to the session state
    fn finish(&mut self, result: DisplayResult<I>, next: SessionState) -> DisplayResult<I> {
        match &result {
            Ok(()) => self.transition(next),
            Err(e) if e.is_fatal() => self.transition(SessionState::Faulted),
            Err(_) => {}
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ssd16xx::WRITE_RAM1;
    use crate::config::Builder;
    use crate::model::{ColorMode, DriverIc, ModelId, Registry};
    use crate::testing::{MockDelay, MockInterface};
    use alloc::vec;

    fn test_display(id: ModelId, interface: MockInterface) -> Display<MockInterface> {
        let config = Builder::new().model(id).build(&Registry::new()).unwrap();
        Display::new(interface, config)
    }

    #[test]
    fn test_operations_before_init_are_rejected() {
        let mut display = test_display(ModelId::Ssd1619Bw420, MockInterface::new());
        assert!(matches!(
            display.refresh(&mut MockDelay),
            Err(Error::InvalidState(SessionState::Uninitialized))
        ));
        assert!(matches!(
            display.write_ram(RamSelector::from_bits(0x0F), &[0]),
            Err(Error::InvalidState(SessionState::Uninitialized))
        ));
        assert!(matches!(
            display.sleep(&mut MockDelay),
            Err(Error::InvalidState(SessionState::Uninitialized))
        ));
        assert!(display.release().transfers.is_empty());
    }

    #[test]
    fn test_session_lifecycle() {
        let mut display = test_display(ModelId::Uc8176Bwr420, MockInterface::new());
        assert_eq!(display.state(), SessionState::Uninitialized);
        display.init(&mut MockDelay).unwrap();
        assert_eq!(display.state(), SessionState::Ready);
        display.clear(&mut MockDelay, false).unwrap();
        assert_eq!(display.state(), SessionState::Loaded);
        display.refresh(&mut MockDelay).unwrap();
        assert_eq!(display.state(), SessionState::Loaded);
        display.sleep(&mut MockDelay).unwrap();
        assert_eq!(display.state(), SessionState::Sleeping);

        assert!(matches!(
            display.write_image(None, None, Region::new(0, 0, 8, 8)),
            Err(Error::InvalidState(SessionState::Sleeping))
        ));

        display.init(&mut MockDelay).unwrap();
        assert_eq!(display.state(), SessionState::Ready);
    }

    #[test]
    fn test_end_to_end_black_frame() {
        let mut display = test_display(ModelId::Ssd1619Bwr420, MockInterface::new());
        display.init(&mut MockDelay).unwrap();
        let black = vec![0x00u8; 15_000];
        let region = display.model().full_region();
        display.write_image(Some(&black), None, region).unwrap();
        display.refresh(&mut MockDelay).unwrap();

        let di = display.release();
        let ram1 = di.payload(WRITE_RAM1).unwrap();
        assert_eq!(ram1.len(), 15_000);
        assert!(ram1.iter().all(|b| *b == 0x00));
    }

    #[test]
    fn test_double_sleep_reissues_command() {
        let mut display = test_display(ModelId::Ssd1677Bw750Hd, MockInterface::new());
        display.init(&mut MockDelay).unwrap();
        display.sleep(&mut MockDelay).unwrap();
        display.sleep(&mut MockDelay).unwrap();
        assert_eq!(display.state(), SessionState::Sleeping);

        let sleeps = display
            .release()
            .commands()
            .into_iter()
            .filter(|c| *c == crate::command::ssd16xx::DEEP_SLEEP)
            .count();
        assert_eq!(sleeps, 2);
    }

    #[test]
    fn test_timeout_faults_session_until_init() {
        // UC81xx init does not wait; the first wait is refresh's power on
        let mut display = test_display(ModelId::Uc8176Bw420, MockInterface::with_timeout_at(0));
        display.init(&mut MockDelay).unwrap();
        let result = display.refresh(&mut MockDelay);
        assert!(matches!(result, Err(Error::BusyTimeout { timeout_ms: 100 })));
        assert_eq!(display.state(), SessionState::Faulted);

        assert!(matches!(
            display.clear(&mut MockDelay, false),
            Err(Error::InvalidState(SessionState::Faulted))
        ));
        display.init(&mut MockDelay).unwrap();
        assert_eq!(display.state(), SessionState::Ready);
    }

    #[test]
    fn test_buffer_error_is_not_fatal() {
        let mut display = test_display(ModelId::Uc8176Bw420, MockInterface::new());
        display.init(&mut MockDelay).unwrap();
        let short = [0u8; 2];
        let result = display.write_image(Some(&short), None, Region::new(0, 0, 400, 300));
        assert!(matches!(result, Err(Error::BufferTooSmall { .. })));
        assert_eq!(display.state(), SessionState::Ready);
    }

    #[test]
    fn test_read_temperature_keeps_state() {
        let mut interface = MockInterface::new();
        interface.read_value = 25;
        let mut display = test_display(ModelId::Jd79668Bwry420, interface);
        display.init(&mut MockDelay).unwrap();
        assert_eq!(display.read_temperature(&mut MockDelay).ok(), Some(25));
        assert_eq!(display.state(), SessionState::Ready);
    }

    #[test]
    fn test_out_of_bounds_write_keeps_bus_silent() {
        let mut reference = test_display(ModelId::Uc8176Bw420, MockInterface::new());
        reference.init(&mut MockDelay).unwrap();
        let init_transfers = reference.release().transfers;

        let mut display = test_display(ModelId::Uc8176Bw420, MockInterface::new());
        display.init(&mut MockDelay).unwrap();
        let black = [0u8; 2 * 10];
        display
            .write_image(Some(&black), None, Region::new(396, 0, 16, 10))
            .unwrap();
        assert_eq!(display.release().transfers, init_transfers);
    }

    #[test]
    fn test_read_temperature_timeout_faults_session() {
        // UC81xx init does not wait; the first wait is the sensor conversion
        let interface = MockInterface::with_timeout_at(0);
        let mut display = test_display(ModelId::Uc8176Bwr420, interface);
        display.init(&mut MockDelay).unwrap();
        let result = display.read_temperature(&mut MockDelay);
        assert!(matches!(result, Err(Error::BusyTimeout { timeout_ms: 100 })));
        assert_eq!(display.state(), SessionState::Faulted);

        assert!(matches!(
            display.write_ram(RamSelector::from_bits(0x0F), &[0]),
            Err(Error::InvalidState(SessionState::Faulted))
        ));
        display.init(&mut MockDelay).unwrap();
        assert_eq!(display.read_temperature(&mut MockDelay).ok(), Some(0));
        assert_eq!(display.state(), SessionState::Ready);
    }

    #[test]
    fn test_sleep_timeout_faults_session() {
        // JD79668 init waits twice before sleep's power off wait
        let interface = MockInterface::with_timeout_at(2);
        let mut display = test_display(ModelId::Jd79668Bwry420, interface);
        display.init(&mut MockDelay).unwrap();
        let result = display.sleep(&mut MockDelay);
        assert!(matches!(result, Err(Error::BusyTimeout { timeout_ms: 100 })));
        assert_eq!(display.state(), SessionState::Faulted);
        assert!(matches!(
            display.sleep(&mut MockDelay),
            Err(Error::InvalidState(SessionState::Faulted))
        ));
    }

    #[test]
    fn test_custom_unaligned_width_cannot_reach_display() {
        let models = [Model::new(
            ModelId::Ssd1619Bw420,
            ColorMode::Bw,
            DriverIc::Ssd1619,
            250,
            122,
        )];
        assert!(Registry::from_models(&models).is_err());

        let aligned = [Model { width: 256, ..models[0] }];
        let registry = Registry::from_models(&aligned).unwrap();
        let config = Builder::new()
            .model(ModelId::Ssd1619Bw420)
            .build(&registry)
            .unwrap();
        let mut display = Display::new(MockInterface::new(), config);
        display.init(&mut MockDelay).unwrap();
        let black = vec![0x00u8; 32 * 122];
        let region = display.model().full_region();
        display.write_image(Some(&black), None, region).unwrap();
        assert_eq!(display.release().payload(WRITE_RAM1), Some(black));
    }
}
