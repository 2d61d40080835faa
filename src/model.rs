//! Panel models and the model registry
//!
//! A [`Model`] is an immutable description of one physical panel variant: its
//! stable identifier, color mode, native resolution, and the controller IC that
//! drives it. The controller IC selects a [`Family`], which is the driver used
//! for every operation on that panel.
//!
//! ## Example
//!
//! ```
//! use epd_multi::{ColorMode, Family, ModelId, Registry};
//!
//! let registry = Registry::new();
//! let model = registry.get(ModelId::Ssd1619Bwr420).copied();
//! let model = match model {
//!     Some(model) => model,
//!     None => return,
//! };
//!
//! assert_eq!((model.width, model.height), (400, 300));
//! assert_eq!(model.color, ColorMode::Bwr);
//! assert_eq!(model.family(), Family::Ssd16xx);
//! assert_eq!(model.plane_bytes(), 15_000);
//! ```

use crate::error::BuilderError;
use crate::ram::Region;

/// Stable panel identifiers
///
/// The numeric values are an external contract (they are stored by host
/// applications) and must never be renumbered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ModelId {
    /// UC8176 4.2" 400x300 black/white
    Uc8176Bw420 = 1,
    /// SSD1619 4.2" 400x300 black/white/red
    Ssd1619Bwr420 = 2,
    /// UC8176 4.2" 400x300 black/white/red
    Uc8176Bwr420 = 3,
    /// SSD1619 4.2" 400x300 black/white
    Ssd1619Bw420 = 4,
    /// JD79668 4.2" 400x300 black/white/red/yellow
    Jd79668Bwry420 = 5,
    /// UC8179 7.5" 800x480 black/white
    Uc8179Bw750 = 6,
    /// UC8179 7.5" 800x480 black/white/red
    Uc8179Bwr750 = 7,
    /// UC8159 7.5" 640x384 black/white
    Uc8159Bw750Low = 8,
    /// UC8159 7.5" 640x384 black/white/red
    Uc8159Bwr750Low = 9,
    /// SSD1677 7.5" 880x528 black/white
    Ssd1677Bw750Hd = 10,
    /// SSD1677 7.5" 880x528 black/white/red
    Ssd1677Bwr750Hd = 11,
    /// JD79668 7.5" 800x480 black/white/red/yellow
    Jd79668Bwry750 = 12,
}

impl TryFrom<u8> for ModelId {
    type Error = BuilderError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Uc8176Bw420,
            2 => Self::Ssd1619Bwr420,
            3 => Self::Uc8176Bwr420,
            4 => Self::Ssd1619Bw420,
            5 => Self::Jd79668Bwry420,
            6 => Self::Uc8179Bw750,
            7 => Self::Uc8179Bwr750,
            8 => Self::Uc8159Bw750Low,
            9 => Self::Uc8159Bwr750Low,
            10 => Self::Ssd1677Bw750Hd,
            11 => Self::Ssd1677Bwr750Hd,
            12 => Self::Jd79668Bwry750,
            other => return Err(BuilderError::InvalidModelId(other)),
        })
    }
}

impl From<ModelId> for u8 {
    fn from(id: ModelId) -> Self {
        id as Self
    }
}

/// Color capability of a panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ColorMode {
    /// Black/white, one 1bpp plane
    Bw = 1,
    /// Black/white plus one accent color, two 1bpp planes
    Bwr = 2,
    /// Black/white/red/yellow, one packed 2bpp plane
    Bwry = 3,
}

impl ColorMode {
    /// Number of logical input planes the caller provides
    pub fn plane_count(self) -> usize {
        match self {
            Self::Bw | Self::Bwry => 1,
            Self::Bwr => 2,
        }
    }

    /// Bits per pixel of the caller-provided planes
    pub fn bits_per_pixel(self) -> u8 {
        match self {
            Self::Bw | Self::Bwr => 1,
            Self::Bwry => 2,
        }
    }
}

/// Controller IC fitted to a panel
///
/// Several ICs share one [`Family`] driver; the IC only matters where two
/// silicon variants diverge (for example the RAM X address width).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum DriverIc {
    /// UltraChip UC8159 (4-level interleaved pixels)
    Uc8159 = 0x10,
    /// UltraChip UC8176
    Uc8176 = 0x11,
    /// UltraChip UC8179
    Uc8179 = 0x12,
    /// Solomon Systech SSD1619
    Ssd1619 = 0x20,
    /// Solomon Systech SSD1677
    Ssd1677 = 0x21,
    /// Fitipower JD79668 (4-color)
    Jd79668 = 0x30,
}

impl DriverIc {
    /// Driver family implementing this IC
    pub fn family(self) -> Family {
        match self {
            Self::Uc8176 | Self::Uc8179 => Family::Uc81xx,
            Self::Uc8159 => Family::Uc8159,
            Self::Ssd1619 | Self::Ssd1677 => Family::Ssd16xx,
            Self::Jd79668 => Family::Jd79668,
        }
    }
}

/// Controller family, one driver per variant
///
/// Dispatches the seven driver operations to the matching implementation in
/// [`crate::driver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Family {
    /// UC8176/UC8179: two 1bpp planes, explicit power on/off around refresh
    Uc81xx,
    /// UC8159: 4-level pixels interleaved from the black and accent planes
    Uc8159,
    /// SSD1619/SSD1677: gate/source driver with master activation
    Ssd16xx,
    /// JD79668: packed 2bpp four-color plane
    Jd79668,
}

/// Immutable description of one panel variant
///
/// `width` and `height` are always in the native orientation of the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Model {
    /// Stable identifier
    pub id: ModelId,
    /// Color capability
    pub color: ColorMode,
    /// Controller IC
    pub ic: DriverIc,
    /// Width in pixels (source outputs)
    pub width: u16,
    /// Height in pixels (gate outputs)
    pub height: u16,
}

impl Model {
    /// Create a model descriptor
    pub const fn new(id: ModelId, color: ColorMode, ic: DriverIc, width: u16, height: u16) -> Self {
        Self {
            id,
            color,
            ic,
            width,
            height,
        }
    }

    /// Create a model descriptor, validating the resolution
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - width or height is 0
    /// - width % 8 != 0 (rows must be byte-aligned in controller RAM)
    pub fn try_new(
        id: ModelId,
        color: ColorMode,
        ic: DriverIc,
        width: u16,
        height: u16,
    ) -> Result<Self, BuilderError> {
        let model = Self::new(id, color, ic, width, height);
        model.validate()?;
        Ok(model)
    }

    /// Check that the resolution can be addressed by the drivers
    pub fn validate(&self) -> Result<(), BuilderError> {
        if self.width == 0 || self.height == 0 || self.width % 8 != 0 {
            return Err(BuilderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Driver family bound to this model
    pub fn family(&self) -> Family {
        self.ic.family()
    }

    /// Bytes per row of one caller-provided plane
    pub fn row_bytes(&self) -> usize {
        match self.color {
            ColorMode::Bw | ColorMode::Bwr => (self.width as usize).div_ceil(8),
            ColorMode::Bwry => (self.width as usize).div_ceil(4),
        }
    }

    /// Size in bytes of one full-panel plane
    pub fn plane_bytes(&self) -> usize {
        self.row_bytes() * self.height as usize
    }

    /// Region covering the whole panel
    pub fn full_region(&self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }
}

/// Number of catalogued models
pub const MODEL_COUNT: usize = 12;

/// Lookup table from [`ModelId`] to [`Model`]
///
/// The registry is an ordinary value: construct it once and pass it to
/// wherever models are resolved.
#[derive(Clone, Debug)]
pub struct Registry<'a> {
    models: RegistryModels<'a>,
}

#[derive(Clone, Debug)]
enum RegistryModels<'a> {
    Builtin([Model; MODEL_COUNT]),
    Custom(&'a [Model]),
}

impl Registry<'static> {
    /// Registry holding every catalogued panel
    pub fn new() -> Self {
        use ColorMode::{Bw, Bwr, Bwry};
        use DriverIc::{Jd79668, Ssd1619, Ssd1677, Uc8159, Uc8176, Uc8179};

        Self {
            models: RegistryModels::Builtin([
                Model::new(ModelId::Uc8176Bw420, Bw, Uc8176, 400, 300),
                Model::new(ModelId::Ssd1619Bwr420, Bwr, Ssd1619, 400, 300),
                Model::new(ModelId::Uc8176Bwr420, Bwr, Uc8176, 400, 300),
                Model::new(ModelId::Ssd1619Bw420, Bw, Ssd1619, 400, 300),
                Model::new(ModelId::Jd79668Bwry420, Bwry, Jd79668, 400, 300),
                Model::new(ModelId::Uc8179Bw750, Bw, Uc8179, 800, 480),
                Model::new(ModelId::Uc8179Bwr750, Bwr, Uc8179, 800, 480),
                Model::new(ModelId::Uc8159Bw750Low, Bw, Uc8159, 640, 384),
                Model::new(ModelId::Uc8159Bwr750Low, Bwr, Uc8159, 640, 384),
                Model::new(ModelId::Ssd1677Bw750Hd, Bw, Ssd1677, 880, 528),
                Model::new(ModelId::Ssd1677Bwr750Hd, Bwr, Ssd1677, 880, 528),
                Model::new(ModelId::Jd79668Bwry750, Bwry, Jd79668, 800, 480),
            ]),
        }
    }
}

impl Default for Registry<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Registry<'a> {
    /// Registry over a caller-provided catalog
    ///
    /// When an id appears more than once, the first entry wins.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` for the first model whose
    /// resolution fails [`Model::validate`].
    pub fn from_models(models: &'a [Model]) -> Result<Self, BuilderError> {
        for model in models {
            model.validate()?;
        }
        Ok(Self {
            models: RegistryModels::Custom(models),
        })
    }

    /// Look up a model by identifier
    pub fn get(&self, id: ModelId) -> Option<&Model> {
        self.iter().find(|model| model.id == id)
    }

    /// Look up a model by raw identifier
    pub fn get_raw(&self, raw: u8) -> Result<&Model, BuilderError> {
        let id = ModelId::try_from(raw)?;
        self.get(id).ok_or(BuilderError::UnknownModel(id))
    }

    /// Iterate over all models
    pub fn iter(&self) -> core::slice::Iter<'_, Model> {
        match &self.models {
            RegistryModels::Builtin(models) => models.iter(),
            RegistryModels::Custom(models) => models.iter(),
        }
    }

    /// Number of models in the registry
    pub fn len(&self) -> usize {
        self.iter().len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_resolutions_match_published_table() {
        let expected: [(u8, u16, u16, ColorMode); MODEL_COUNT] = [
            (1, 400, 300, ColorMode::Bw),
            (2, 400, 300, ColorMode::Bwr),
            (3, 400, 300, ColorMode::Bwr),
            (4, 400, 300, ColorMode::Bw),
            (5, 400, 300, ColorMode::Bwry),
            (6, 800, 480, ColorMode::Bw),
            (7, 800, 480, ColorMode::Bwr),
            (8, 640, 384, ColorMode::Bw),
            (9, 640, 384, ColorMode::Bwr),
            (10, 880, 528, ColorMode::Bw),
            (11, 880, 528, ColorMode::Bwr),
            (12, 800, 480, ColorMode::Bwry),
        ];
        let registry = Registry::new();
        assert_eq!(registry.len(), MODEL_COUNT);

        for (raw, width, height, color) in expected {
            let model = registry.get_raw(raw);
            assert!(model.is_ok(), "model {raw} missing");
            if let Ok(model) = model {
                assert_eq!(u8::from(model.id), raw);
                assert_eq!((model.width, model.height), (width, height), "model {raw}");
                assert_eq!(model.color, color, "model {raw}");
            }
        }
    }

    #[test]
    fn test_model_ids_round_trip_through_raw_values() {
        for raw in 1..=12u8 {
            let id = ModelId::try_from(raw);
            assert!(matches!(id, Ok(id) if u8::from(id) == raw));
        }
        assert_eq!(ModelId::try_from(0), Err(BuilderError::InvalidModelId(0)));
        assert_eq!(ModelId::try_from(13), Err(BuilderError::InvalidModelId(13)));
    }

    #[test]
    fn test_families() {
        let registry = Registry::new();
        let family = |id| registry.get(id).map(Model::family);
        assert_eq!(family(ModelId::Uc8176Bw420), Some(Family::Uc81xx));
        assert_eq!(family(ModelId::Uc8179Bwr750), Some(Family::Uc81xx));
        assert_eq!(family(ModelId::Uc8159Bwr750Low), Some(Family::Uc8159));
        assert_eq!(family(ModelId::Ssd1619Bw420), Some(Family::Ssd16xx));
        assert_eq!(family(ModelId::Ssd1677Bwr750Hd), Some(Family::Ssd16xx));
        assert_eq!(family(ModelId::Jd79668Bwry750), Some(Family::Jd79668));
    }

    #[test]
    fn test_plane_bytes() {
        let registry = Registry::new();
        let bytes = |id| registry.get(id).map(Model::plane_bytes);
        assert_eq!(bytes(ModelId::Ssd1619Bw420), Some(50 * 300));
        assert_eq!(bytes(ModelId::Ssd1677Bwr750Hd), Some(110 * 528));
        assert_eq!(bytes(ModelId::Jd79668Bwry420), Some(100 * 300));
        assert_eq!(bytes(ModelId::Jd79668Bwry750), Some(200 * 480));
    }

    #[test]
    fn test_custom_registry_reports_unknown_models() {
        let models = [Model::new(
            ModelId::Uc8176Bw420,
            ColorMode::Bw,
            DriverIc::Uc8176,
            200,
            200,
        )];
        let registry = Registry::from_models(&models).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get(ModelId::Uc8176Bw420).is_some());
        assert_eq!(
            registry.get_raw(2).err(),
            Some(BuilderError::UnknownModel(ModelId::Ssd1619Bwr420))
        );
    }

    #[test]
    fn test_plane_counts() {
        assert_eq!(ColorMode::Bw.plane_count(), 1);
        assert_eq!(ColorMode::Bwr.plane_count(), 2);
        assert_eq!(ColorMode::Bwry.plane_count(), 1);
        assert_eq!(ColorMode::Bwry.bits_per_pixel(), 2);
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        assert!(Registry::new().iter().all(|model| model.validate().is_ok()));
    }

    #[test]
    fn test_zero_sizes_are_rejected() {
        let zero_width =
            Model::try_new(ModelId::Ssd1619Bw420, ColorMode::Bw, DriverIc::Ssd1619, 0, 300);
        assert_eq!(
            zero_width.err(),
            Some(BuilderError::InvalidDimensions {
                width: 0,
                height: 300
            })
        );

        let models = [Model::new(
            ModelId::Jd79668Bwry420,
            ColorMode::Bwry,
            DriverIc::Jd79668,
            400,
            0,
        )];
        assert_eq!(
            Registry::from_models(&models).err(),
            Some(BuilderError::InvalidDimensions {
                width: 400,
                height: 0
            })
        );
    }

    #[test]
    fn test_unaligned_width_is_rejected() {
        let models = [
            Model::new(ModelId::Uc8176Bw420, ColorMode::Bw, DriverIc::Uc8176, 200, 200),
            Model::new(ModelId::Ssd1619Bw420, ColorMode::Bw, DriverIc::Ssd1619, 250, 122),
        ];
        assert_eq!(
            Registry::from_models(&models).err(),
            Some(BuilderError::InvalidDimensions {
                width: 250,
                height: 122
            })
        );
        let aligned =
            Model::try_new(ModelId::Ssd1619Bw420, ColorMode::Bw, DriverIc::Ssd1619, 256, 122);
        assert!(aligned.is_ok());
    }
}
