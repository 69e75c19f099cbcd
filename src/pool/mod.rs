mod arc_length;
mod config;
mod coping;
mod deck;
mod floor;
mod offset;
mod perimeter;
mod scene;
mod wall;
mod waterline;

pub use arc_length::{ArcLengthTable, compute_arc_lengths};
pub use config::{
    ConfigError, CopingSettings, DeckSettings, PoolConfig, PoolDimensions, TileSize, COPING_HEIGHT,
    COPING_WIDTH, DECK_ELEVATION, DECK_THICKNESS, DECK_WIDTH, DEFAULT_DECK_TEXTURE_REPEAT,
    DEFAULT_FLOOR_TEXTURE_REPEAT, DEFAULT_TILE_SIZE, DEFAULT_WALL_TEXTURE_REPEAT,
    DEFAULT_WATERLINE_INSET, FLOOR_SEGMENTS, FLOOR_THICKNESS, INCHES_TO_METERS, PERIMETER_SEGMENTS,
    POOL_DEFAULTS, REPEATING_STRIP_TILE_COUNT, SKIRT_DEPTH, TILE_SIZE_PRESETS,
};
pub use coping::{CopingOptions, CopingSegment, build_coping, coping_segments};
pub use deck::{DeckError, DeckOptions, build_deck_ring, build_deck_skirt};
pub use floor::{FloorError, FloorOptions, build_floor, floor_outline};
pub use offset::{MIN_MITER_DOT, MITER_EPSILON, OffsetDiagnostics, offset_loop, offset_outline};
pub use perimeter::{PerimeterError, PerimeterLoop, PoolShape, ShapeKind, generate_perimeter};
pub use scene::{PoolError, PoolScene, SceneBuffers, build_pool_scene};
pub use wall::{WallOptions, build_wall};
pub use waterline::{WaterlineBand, WaterlineMetadata, WaterlineOptions, build_waterline_band};

#[cfg(test)]
mod tests;
