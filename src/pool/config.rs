//! Scene configuration and the constants shared by the builders.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::perimeter::{PoolShape, ShapeKind};

pub const INCHES_TO_METERS: f64 = 0.0254;

/// Tiles in one horizontal texture strip of the waterline band.
pub const REPEATING_STRIP_TILE_COUNT: u32 = 32;

/// Perimeter sampling used for the waterline, wall and coping.
pub const PERIMETER_SEGMENTS: usize = 128;

/// Perimeter sampling used for the floor and deck outlines.
pub const FLOOR_SEGMENTS: usize = 64;

pub const DEFAULT_WATERLINE_INSET: f64 = 0.01;
pub const DEFAULT_WALL_TEXTURE_REPEAT: f64 = 1.0;
pub const DEFAULT_FLOOR_TEXTURE_REPEAT: f64 = 1.0;
pub const DEFAULT_DECK_TEXTURE_REPEAT: f64 = 1.0;

pub const COPING_WIDTH: f64 = 0.4;
pub const COPING_HEIGHT: f64 = 0.1;

pub const FLOOR_THICKNESS: f64 = 0.3;

pub const DECK_WIDTH: f64 = 2.5;
pub const DECK_THICKNESS: f64 = 0.05;
/// Gap between the top of the waterline band and the deck surface.
pub const DECK_ELEVATION: f64 = 0.02;
pub const SKIRT_DEPTH: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolDimensions {
    pub length: f64,
    pub width: f64,
    pub depth: f64,
}

pub const POOL_DEFAULTS: PoolDimensions = PoolDimensions {
    length: 12.0,
    width: 6.0,
    depth: 1.8,
};

/// Nominal tile size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSize {
    pub width_inches: f64,
    pub height_inches: f64,
}

impl TileSize {
    #[must_use]
    pub const fn new(width_inches: f64, height_inches: f64) -> Self {
        Self {
            width_inches,
            height_inches,
        }
    }

    #[must_use]
    pub fn width_meters(self) -> f64 {
        self.width_inches * INCHES_TO_METERS
    }

    #[must_use]
    pub fn height_meters(self) -> f64 {
        self.height_inches * INCHES_TO_METERS
    }

    /// Display label such as `6" × 6"`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{}\" × {}\"", self.width_inches, self.height_inches)
    }
}

impl Default for TileSize {
    fn default() -> Self {
        DEFAULT_TILE_SIZE
    }
}

impl fmt::Display for TileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

pub const TILE_SIZE_PRESETS: [TileSize; 6] = [
    TileSize::new(1.0, 1.0),
    TileSize::new(2.0, 1.0),
    TileSize::new(2.0, 2.0),
    TileSize::new(3.0, 3.0),
    TileSize::new(4.0, 4.0),
    TileSize::new(6.0, 6.0),
];

pub const DEFAULT_TILE_SIZE: TileSize = TileSize::new(6.0, 6.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CopingSettings {
    pub width: f64,
    pub height: f64,
}

impl Default for CopingSettings {
    fn default() -> Self {
        Self {
            width: COPING_WIDTH,
            height: COPING_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeckSettings {
    pub enabled: bool,
    pub width: f64,
    pub thickness: f64,
    pub skirt_depth: f64,
    pub segments: usize,
    pub texture_repeat: f64,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            width: DECK_WIDTH,
            thickness: DECK_THICKNESS,
            skirt_depth: SKIRT_DEPTH,
            segments: FLOOR_SEGMENTS,
            texture_repeat: DEFAULT_DECK_TEXTURE_REPEAT,
        }
    }
}

/// Everything needed to rebuild the pool scene from scratch.
///
/// Missing fields fall back to the defaults, so `{}` and `{"shape": "oval"}`
/// are both valid JSON configs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoolConfig {
    pub shape: ShapeKind,
    pub length: f64,
    pub width: f64,
    pub depth: f64,
    pub tile_size: TileSize,
    pub segments: usize,
    pub floor_segments: usize,
    pub wall_texture_repeat: f64,
    pub floor_texture_repeat: f64,
    pub coping: CopingSettings,
    pub deck: DeckSettings,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            shape: ShapeKind::default(),
            length: POOL_DEFAULTS.length,
            width: POOL_DEFAULTS.width,
            depth: POOL_DEFAULTS.depth,
            tile_size: DEFAULT_TILE_SIZE,
            segments: PERIMETER_SEGMENTS,
            floor_segments: FLOOR_SEGMENTS,
            wall_texture_repeat: DEFAULT_WALL_TEXTURE_REPEAT,
            floor_texture_repeat: DEFAULT_FLOOR_TEXTURE_REPEAT,
            coping: CopingSettings::default(),
            deck: DeckSettings::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a positive finite number, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("pool depth {depth} m must exceed the waterline height {waterline} m")]
    DepthBelowWaterline { depth: f64, waterline: f64 },
    #[error("{name} must be at least {min}, got {value}")]
    TooFewSegments {
        name: &'static str,
        min: usize,
        value: usize,
    },
    #[error("failed to parse pool config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PoolConfig {
    #[must_use]
    pub fn with_shape(mut self, shape: ShapeKind) -> Self {
        self.shape = shape;
        self
    }

    #[must_use]
    pub fn with_dimensions(mut self, length: f64, width: f64, depth: f64) -> Self {
        self.length = length;
        self.width = width;
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn pool_shape(&self) -> PoolShape {
        PoolShape::new(self.shape, self.length, self.width)
    }

    /// Height of the waterline band, which is one tile tall.
    #[must_use]
    pub fn waterline_height(&self) -> f64 {
        self.tile_size.height_meters()
    }

    /// Wall height below the waterline band.
    #[must_use]
    pub fn wall_height(&self) -> f64 {
        self.depth - self.waterline_height()
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the fields that the builders cannot recover from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("length", self.length),
            ("width", self.width),
            ("depth", self.depth),
            ("tileSize.widthInches", self.tile_size.width_inches),
            ("tileSize.heightInches", self.tile_size.height_inches),
            ("wallTextureRepeat", self.wall_texture_repeat),
            ("floorTextureRepeat", self.floor_texture_repeat),
            ("coping.width", self.coping.width),
            ("coping.height", self.coping.height),
        ];
        for (name, value) in positives {
            ensure_positive(name, value)?;
        }
        if self.deck.enabled {
            ensure_positive("deck.width", self.deck.width)?;
            ensure_positive("deck.thickness", self.deck.thickness)?;
            ensure_positive("deck.skirtDepth", self.deck.skirt_depth)?;
            ensure_positive("deck.textureRepeat", self.deck.texture_repeat)?;
            ensure_segments("deck.segments", self.deck.segments)?;
        }
        ensure_segments("segments", self.segments)?;
        ensure_segments("floorSegments", self.floor_segments)?;

        let waterline = self.waterline_height();
        if self.depth <= waterline {
            return Err(ConfigError::DepthBelowWaterline {
                depth: self.depth,
                waterline,
            });
        }
        Ok(())
    }
}

fn ensure_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn ensure_segments(name: &'static str, value: usize) -> Result<(), ConfigError> {
    const MIN_SEGMENTS: usize = 4;
    if value >= MIN_SEGMENTS {
        Ok(())
    } else {
        Err(ConfigError::TooFewSegments {
            name,
            min: MIN_SEGMENTS,
            value,
        })
    }
}
