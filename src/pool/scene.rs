//! Full pool scene: every mesh the viewer needs, built from one `PoolConfig`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::geom::{MeshBuffers, MeshDiagnostics, SurfaceMesh, TangentError, compute_tangents};

use super::config::{ConfigError, DECK_ELEVATION, PoolConfig};
use super::coping::{CopingOptions, build_coping};
use super::deck::{DeckError, DeckOptions, build_deck_ring, build_deck_skirt};
use super::floor::{FloorError, FloorOptions, build_floor};
use super::perimeter::{PerimeterError, PerimeterLoop, PoolShape, generate_perimeter};
use super::waterline::{WaterlineMetadata, WaterlineOptions, build_waterline_band};
use super::wall::{WallOptions, build_wall};

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Perimeter(#[from] PerimeterError),
    #[error("floor: {0}")]
    Floor(#[from] FloorError),
    #[error("tangents for {mesh}: {source}")]
    Tangents {
        mesh: &'static str,
        #[source]
        source: TangentError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PoolScene {
    pub config: PoolConfig,
    pub perimeter: PerimeterLoop,
    pub waterline: SurfaceMesh,
    pub waterline_metadata: WaterlineMetadata,
    pub wall: SurfaceMesh,
    pub coping: SurfaceMesh,
    pub floor: SurfaceMesh,
    pub deck: Option<SurfaceMesh>,
    pub deck_skirt: Option<SurfaceMesh>,
    /// Optional parts that were left out, with the reason.
    pub warnings: Vec<String>,
}

impl PoolScene {
    /// Named meshes in a stable order.
    #[must_use]
    pub fn meshes(&self) -> Vec<(&'static str, &SurfaceMesh)> {
        let mut meshes = vec![
            ("waterline", &self.waterline),
            ("wall", &self.wall),
            ("coping", &self.coping),
            ("floor", &self.floor),
        ];
        if let Some(deck) = &self.deck {
            meshes.push(("deck", deck));
        }
        if let Some(skirt) = &self.deck_skirt {
            meshes.push(("deckSkirt", skirt));
        }
        meshes
    }

    #[must_use]
    pub fn diagnostics(&self) -> BTreeMap<&'static str, MeshDiagnostics> {
        self.meshes()
            .into_iter()
            .map(|(name, mesh)| (name, MeshDiagnostics::from_mesh(mesh)))
            .collect()
    }

    /// Serializable, `f32`-packed form of the scene for JS.
    #[must_use]
    pub fn to_buffers(&self) -> SceneBuffers {
        SceneBuffers {
            meshes: self
                .meshes()
                .into_iter()
                .map(|(name, mesh)| (name, mesh.to_buffers()))
                .collect(),
            waterline: self.waterline_metadata.clone(),
            waterline_height: self.config.waterline_height(),
            wall_height: self.config.wall_height(),
            warnings: self.warnings.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneBuffers {
    pub meshes: BTreeMap<&'static str, MeshBuffers>,
    pub waterline: WaterlineMetadata,
    pub waterline_height: f64,
    pub wall_height: f64,
    pub warnings: Vec<String>,
}

/// Builds every pool mesh for `config` and fills in tangents.
///
/// Vertical layout: the waterline band spans `[0, waterline_height]`, the wall
/// hangs below it down to `-wall_height`, the floor slab's top meets the
/// bottom of the wall, the coping sits on the band and the deck floats just
/// above the band.
///
/// The deck is optional: if it cannot be built the scene keeps every other
/// mesh and records the reason in `warnings`.
pub fn build_pool_scene(config: &PoolConfig) -> Result<PoolScene, PoolError> {
    config.validate()?;

    let shape = config.pool_shape();
    let perimeter = generate_perimeter(&shape, config.segments)?;

    let waterline_height = config.waterline_height();
    let wall_height = config.wall_height();

    let band = build_waterline_band(
        &perimeter,
        &WaterlineOptions::new(config.tile_size.width_meters(), waterline_height),
    );
    let metadata = band.metadata;
    let mut waterline = band.mesh;

    let wall_options = WallOptions::new(wall_height).with_texture_repeat(config.wall_texture_repeat);
    let coping_options = CopingOptions::new(waterline_height).with_size(config.coping.width, config.coping.height);
    let floor_options = FloorOptions {
        segments: config.floor_segments,
        texture_repeat: config.floor_texture_repeat,
        ..FloorOptions::default()
    };

    let ((mut wall, mut coping), (floor, deck)) = join(
        || {
            join(
                || build_wall(&metadata, &wall_options),
                || build_coping(&metadata, &coping_options),
            )
        },
        || join(|| build_floor(&shape, &floor_options), || build_deck(config, &shape, waterline_height)),
    );

    let mut floor = floor?;
    floor.translate_y(-wall_height);
    let mut warnings = Vec::new();
    let (mut deck, mut deck_skirt) = deck_or_warning(deck, &mut warnings);

    with_tangents("waterline", &mut waterline)?;
    with_tangents("wall", &mut wall)?;
    with_tangents("coping", &mut coping)?;
    with_tangents("floor", &mut floor)?;
    if let Some(ring) = deck.as_mut() {
        with_tangents("deck", ring)?;
    }
    if let Some(skirt) = deck_skirt.as_mut() {
        with_tangents("deckSkirt", skirt)?;
    }

    let scene = PoolScene {
        config: config.clone(),
        perimeter,
        waterline,
        waterline_metadata: metadata,
        wall,
        coping,
        floor,
        deck,
        deck_skirt,
        warnings,
    };

    for (name, diagnostics) in scene.diagnostics() {
        if diagnostics.has_warnings() {
            log::warn!("{name}: {}", diagnostics.summary());
        } else {
            log::debug!("{name}: {}", diagnostics.summary());
        }
    }

    Ok(scene)
}

/// Deck ring and skirt, placed just above the waterline band.
fn build_deck(
    config: &PoolConfig,
    shape: &PoolShape,
    waterline_height: f64,
) -> Result<Option<(SurfaceMesh, SurfaceMesh)>, DeckError> {
    if !config.deck.enabled {
        return Ok(None);
    }

    let perimeter = generate_perimeter(shape, config.deck.segments)?;
    let options = DeckOptions {
        width: config.deck.width,
        thickness: config.deck.thickness,
        skirt_depth: config.deck.skirt_depth,
        texture_repeat: config.deck.texture_repeat,
        ..DeckOptions::default()
    }
    .at_height(waterline_height + DECK_ELEVATION);

    let ring = build_deck_ring(&perimeter, &options)?;
    let skirt = build_deck_skirt(&perimeter, &options)?;
    Ok(Some((ring, skirt)))
}

/// Unpacks the deck result, turning a failure into a scene warning.
pub(super) fn deck_or_warning(
    deck: Result<Option<(SurfaceMesh, SurfaceMesh)>, DeckError>,
    warnings: &mut Vec<String>,
) -> (Option<SurfaceMesh>, Option<SurfaceMesh>) {
    match deck {
        Ok(Some((ring, skirt))) => (Some(ring), Some(skirt)),
        Ok(None) => (None, None),
        Err(err) => {
            log::warn!("deck omitted: {err}");
            warnings.push(format!("deck omitted: {err}"));
            (None, None)
        }
    }
}

fn with_tangents(mesh_name: &'static str, mesh: &mut SurfaceMesh) -> Result<(), PoolError> {
    compute_tangents(mesh).map_err(|source| PoolError::Tangents {
        mesh: mesh_name,
        source,
    })
}

#[cfg(feature = "parallel")]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

#[cfg(not(feature = "parallel"))]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA,
    B: FnOnce() -> RB,
{
    (a(), b())
}
