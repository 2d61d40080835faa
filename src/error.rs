//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! Out-of-bounds write regions are deliberately *not* an error: they are dropped
//! without touching the bus.
//!
//! ## Example
//!
//! ```
//! use epd_multi::{Builder, BuilderError, ModelId, Registry};
//!
//! let registry = Registry::new();
//!
//! // Missing model
//! let result = Builder::new().build(&registry);
//! assert!(matches!(result, Err(BuilderError::MissingModel)));
//!
//! // Unknown raw identifier
//! let result = ModelId::try_from(42u8);
//! assert!(matches!(result, Err(BuilderError::InvalidModelId(42))));
//! ```

use crate::display::SessionState;
use crate::interface::DisplayInterface;
use crate::model::ModelId;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    Interface(I::Error),
    /// The controller did not release BUSY within the time budget
    ///
    /// The panel is left in an undefined RAM/power state; run
    /// [`Display::init`](crate::Display::init) before issuing further commands.
    BusyTimeout {
        /// Budget that expired, in milliseconds
        timeout_ms: u16,
    },
    /// A plane buffer is shorter than the region it describes
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
    /// The operation is not legal in the current session state
    InvalidState(SessionState),
}

impl<I: DisplayInterface> Error<I> {
    /// Whether this error leaves the panel in an undefined state
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::BusyTimeout { .. })
    }
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::BusyTimeout { timeout_ms } => {
                write!(f, "Controller still busy after {timeout_ms}ms")
            }
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
            Self::InvalidState(state) => write!(f, "Operation not allowed while {state:?}"),
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// No model was selected
    ///
    /// [`Builder::model()`](crate::config::Builder::model) must be called before building.
    MissingModel,
    /// The model is not present in the registry used to build
    UnknownModel(ModelId),
    /// A raw identifier does not name any catalogued model
    InvalidModelId(u8),
    /// Invalid panel resolution in a custom model
    ///
    /// Both sizes must be non-zero and the width a multiple of 8.
    InvalidDimensions {
        /// Width (source outputs) requested
        width: u16,
        /// Height (gate outputs) requested
        height: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingModel => write!(f, "Model must be specified"),
            Self::UnknownModel(id) => write!(f, "Model {id:?} is not in the registry"),
            Self::InvalidModelId(raw) => write!(f, "Invalid model id {raw}"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions: {width}x{height}")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
