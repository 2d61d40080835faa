//! Display configuration types and builder

pub use crate::error::BuilderError;
use crate::interface::DEFAULT_BUSY_TIMEOUT_MS;
use crate::model::{Model, ModelId, Registry};

/// Default reset pulse width in milliseconds
pub const DEFAULT_RESET_PULSE_MS: u32 = 10;

/// Display rotation relative to native orientation
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Rotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate 90 degrees clockwise
    Rotate90,
    /// Rotate 180 degrees
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

/// Display configuration
///
/// Binds one resolved [`Model`] to the session parameters. Use [`Builder`] to
/// create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Panel model, resolved from the registry
    pub model: Model,
    /// Display rotation (applies to the graphics layer only)
    pub rotation: Rotation,
    /// Busy-wait budget for a full refresh in milliseconds (0 waits forever)
    pub refresh_timeout_ms: u16,
    /// Reset pulse width in milliseconds
    pub reset_pulse_ms: u32,
    /// Read the on-die sensor as part of every refresh
    pub temperature_on_refresh: bool,
}

impl Config {
    /// Get the rotated dimensions (width, height) based on rotation setting
    pub fn rotated_size(&self) -> (u16, u16) {
        match self.rotation {
            Rotation::Rotate0 | Rotation::Rotate180 => (self.model.width, self.model.height),
            Rotation::Rotate90 | Rotation::Rotate270 => (self.model.height, self.model.width),
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use epd_multi::{Builder, ModelId, Registry, Rotation};
///
/// let registry = Registry::new();
/// let config = match Builder::new()
///     .model(ModelId::Uc8179Bwr750)
///     .rotation(Rotation::Rotate90)
///     .build(&registry)
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.rotated_size(), (480, 800));
/// ```
#[must_use]
pub struct Builder {
    /// Panel model (required)
    model: Option<ModelId>,
    /// Display rotation
    rotation: Rotation,
    /// Refresh busy budget
    refresh_timeout_ms: u16,
    /// Reset pulse width
    reset_pulse_ms: u32,
    /// Temperature read during refresh
    temperature_on_refresh: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            model: None,
            rotation: Rotation::Rotate0,
            refresh_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            reset_pulse_ms: DEFAULT_RESET_PULSE_MS,
            temperature_on_refresh: true,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the panel model (required)
    pub fn model(mut self, id: ModelId) -> Self {
        self.model = Some(id);
        self
    }

    /// Set display rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the refresh busy-wait budget in milliseconds
    pub fn refresh_timeout_ms(mut self, value: u16) -> Self {
        self.refresh_timeout_ms = value;
        self
    }

    /// Set the reset pulse width in milliseconds
    pub fn reset_pulse_ms(mut self, value: u32) -> Self {
        self.reset_pulse_ms = value;
        self
    }

    /// Enable or disable the on-die temperature read during refresh
    pub fn temperature_on_refresh(mut self, value: bool) -> Self {
        self.temperature_on_refresh = value;
        self
    }

    /// Build the configuration, resolving the model through `registry`
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingModel` if no model was set, or
    /// `BuilderError::UnknownModel` if the registry does not hold it
    pub fn build(self, registry: &Registry<'_>) -> Result<Config, BuilderError> {
        let id = self.model.ok_or(BuilderError::MissingModel)?;
        let model = *registry.get(id).ok_or(BuilderError::UnknownModel(id))?;
        Ok(Config {
            model,
            rotation: self.rotation,
            refresh_timeout_ms: self.refresh_timeout_ms,
            reset_pulse_ms: self.reset_pulse_ms,
            temperature_on_refresh: self.temperature_on_refresh,
        })
    }
}
