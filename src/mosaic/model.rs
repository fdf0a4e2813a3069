use std::sync::Arc;

use crate::background::spec::{BackgroundSpec, DEFAULT_BACKGROUND};
use crate::foundation::core::{GridSpec, Millis, Point, Size, Surface, Vec2};
use crate::foundation::error::{TessellaError, TessellaResult};
use crate::schedule::stagger::TimingSpec;

/// Complete configuration of one reveal-and-assemble run.
///
/// A spec is a pure data model that can be:
/// - built programmatically (see [`crate::MosaicBuilder`])
/// - serialized/deserialized via Serde (JSON)
///
/// Driving a spec is performed by [`crate::TransitionController`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MosaicSpec {
    /// Target surface dimensions; immutable once the run begins.
    pub surface: Surface,
    /// Grid dimensions; fixed for the lifetime of one run.
    #[serde(default)]
    pub grid: GridSpec,
    /// Background descriptor string. Unresolvable descriptors fall back to
    /// the default gradient at construction time, silently.
    #[serde(default = "default_background_descriptor")]
    pub background: String,
    /// Scatter radius variant.
    #[serde(default)]
    pub scatter: ScatterRadius,
    /// Timing constants.
    #[serde(default)]
    pub timing: TimingSpec,
    /// Global deterministic seed for scatter, shuffle, and jitter draws.
    #[serde(default)]
    pub seed: u64,
}

fn default_background_descriptor() -> String {
    DEFAULT_BACKGROUND.to_string()
}

impl MosaicSpec {
    /// Build a spec with default grid, scatter, timing, and background.
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            grid: GridSpec::default(),
            background: default_background_descriptor(),
            scatter: ScatterRadius::default(),
            timing: TimingSpec::default(),
            seed: 0,
        }
    }

    /// Reject malformed configuration before any tile is created.
    pub fn validate(&self) -> TessellaResult<()> {
        self.surface.validate()?;
        self.grid.validate()?;
        self.scatter.validate()?;
        self.timing.validate()?;
        Ok(())
    }
}

/// Bound on the random offset between a tile's final and start positions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ScatterRadius {
    /// Fixed per-axis bounds in pixels.
    Fixed {
        /// Horizontal bound.
        x: f64,
        /// Vertical bound.
        y: f64,
    },
    /// Both axes bounded by `factor * max(width, height)` of the surface.
    Proportional {
        /// Multiplier on the surface's longer side.
        factor: f64,
    },
}

impl Default for ScatterRadius {
    fn default() -> Self {
        Self::Fixed { x: 800.0, y: 600.0 }
    }
}

impl ScatterRadius {
    /// Per-axis bounds for a given surface.
    pub fn bounds(self, surface: Surface) -> (f64, f64) {
        match self {
            Self::Fixed { x, y } => (x, y),
            Self::Proportional { factor } => {
                let r = factor * surface.max_side();
                (r, r)
            }
        }
    }

    /// Reject non-finite or negative bounds.
    pub fn validate(&self) -> TessellaResult<()> {
        let ok = match *self {
            Self::Fixed { x, y } => x.is_finite() && y.is_finite() && x >= 0.0 && y >= 0.0,
            Self::Proportional { factor } => factor.is_finite() && factor >= 0.0,
        };
        if !ok {
            return Err(TessellaError::validation(
                "scatter radius must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Randomized initial visual transform of a scattered tile.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StartTransform {
    /// Initial uniform scale, well under 1.
    pub scale: f64,
    /// Initial rotation in degrees.
    pub rotation_deg: f64,
}

/// A tile's lifecycle state. Transitions are monotonic:
/// `Scattered -> Transitioning -> Assembled`, never backward, driven solely
/// by the scheduler firing its delays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub enum VisualState {
    /// At its start position, transparent.
    Scattered,
    /// Instructed to animate toward its final state.
    Transitioning,
    /// Final position, full opacity (or discarded with the layer).
    Assembled,
}

/// One cell of the grid partition, carrying its own geometry and timing.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Tile {
    /// Grid row; unique with `col`; immutable.
    pub row: u32,
    /// Grid column; unique with `row`; immutable.
    pub col: u32,
    /// Final top-left corner derived from `(row, col)` and the surface.
    pub final_position: Point,
    /// Tile size derived from surface / grid.
    pub size: Size,
    /// Start position: final plus a bounded random offset; assigned once.
    pub start_position: Point,
    /// Start transform drawn at creation; immutable after creation.
    pub start_transform: StartTransform,
    /// Rank in the shuffled reveal sequence; unique across all tiles.
    pub reveal_order_index: u32,
    /// Delay from reveal-phase start at which this tile begins its
    /// transition.
    pub scheduled_delay: Millis,
    state: VisualState,
}

impl Tile {
    pub(crate) fn new(
        row: u32,
        col: u32,
        final_position: Point,
        size: Size,
        start_position: Point,
        start_transform: StartTransform,
        reveal_order_index: u32,
        scheduled_delay: Millis,
    ) -> Self {
        Self {
            row,
            col,
            final_position,
            size,
            start_position,
            start_transform,
            reveal_order_index,
            scheduled_delay,
            state: VisualState::Scattered,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> VisualState {
        self.state
    }

    /// `Scattered -> Transitioning`. A no-op once the tile has moved on;
    /// state never goes backward.
    pub(crate) fn begin_transition(&mut self) {
        if self.state == VisualState::Scattered {
            self.state = VisualState::Transitioning;
        }
    }

    /// Force the terminal state, from any earlier state.
    pub(crate) fn mark_assembled(&mut self) {
        self.state = VisualState::Assembled;
    }
}

/// The ordered collection of all `rows * cols` tiles for one run.
///
/// Created once per run; discarded when the terminal delay elapses and the
/// assembled surface is revealed.
#[derive(Clone, Debug, serde::Serialize)]
pub struct TileSet {
    tiles: Vec<Tile>,
}

impl TileSet {
    pub(crate) fn new(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the set is empty (never true for a validated spec).
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles in grid (row-major) order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    /// Whether the assigned reveal ranks form exactly `{0, ..., n-1}`.
    pub fn reveal_order_is_permutation(&self) -> bool {
        let mut seen = vec![false; self.tiles.len()];
        for tile in &self.tiles {
            let idx = tile.reveal_order_index as usize;
            if idx >= seen.len() || seen[idx] {
                return false;
            }
            seen[idx] = true;
        }
        true
    }
}

/// The final rectangle with the completed background.
///
/// Exists for the whole run but stays visually suppressed until the terminal
/// event. It shares one [`BackgroundSpec`] with every tile slice, so the
/// mosaic and the assembled surface are pixel-aligned by shared derivation
/// rather than by convention.
#[derive(Clone, Debug)]
pub struct AssembledSurface {
    surface: Surface,
    background: Arc<BackgroundSpec>,
    visible: bool,
}

impl AssembledSurface {
    pub(crate) fn new(surface: Surface, background: Arc<BackgroundSpec>) -> Self {
        Self {
            surface,
            background,
            visible: false,
        }
    }

    /// Surface dimensions, as handed to the completion hook.
    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// The shared background.
    pub fn background(&self) -> &Arc<BackgroundSpec> {
        &self.background
    }

    /// Whether the terminal event has revealed this surface.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Background offset for a tile slice: the complement of the tile's
    /// final position, mirroring `background-position: -left -top`.
    pub fn slice_offset_for(&self, final_position: Point) -> Vec2 {
        Vec2::new(-final_position.x, -final_position.y)
    }

    pub(crate) fn reveal(&mut self) {
        self.visible = true;
    }

    pub(crate) fn set_surface(&mut self, surface: Surface) {
        self.surface = surface;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mosaic/model.rs"]
mod tests;
