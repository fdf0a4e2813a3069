use std::sync::Arc;

use crate::background::spec::BackgroundSpec;
use crate::foundation::core::{Millis, Point, Size, Surface, Vec2};
use crate::mosaic::model::{AssembledSurface, Tile, TileSet};
use crate::schedule::stagger::TimingSpec;

/// Visual state of one tile at a sampled instant.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct TileFrameState {
    /// Grid row.
    pub row: u32,
    /// Grid column.
    pub col: u32,
    /// Current top-left corner.
    pub position: Point,
    /// Tile size (constant through the transition).
    pub size: Size,
    /// Current uniform scale, about the tile center.
    pub scale: f64,
    /// Current rotation in degrees, about the tile center.
    pub rotation_deg: f64,
    /// Current opacity in `[0, 1]`.
    pub opacity: f64,
    /// Background offset of this tile's slice (complement of its final
    /// position), constant through the transition.
    pub slice_offset: Vec2,
}

/// Everything the raster adapter needs for one frame.
#[derive(Clone, Debug)]
pub struct FrameSnapshot {
    /// Surface dimensions of the run.
    pub surface: Surface,
    /// Shared background sampled by tiles and the assembled surface alike.
    pub background: Arc<BackgroundSpec>,
    /// Whether the assembled surface is shown (terminal reached).
    pub assembled_visible: bool,
    /// Per-tile states; empty once the tile layer is discarded.
    pub tiles: Vec<TileFrameState>,
}

/// Sample one tile at `since_reveal` milliseconds after reveal-phase start.
///
/// Sampling is pure over the schedule: before the tile's delay it sits in
/// its scattered start state at zero opacity; afterward it interpolates
/// toward final position, unit scale, zero rotation, and full opacity over
/// `transition_duration` with the configured easing. `None` means the reveal
/// phase has not started.
pub fn sample_tile(tile: &Tile, timing: &TimingSpec, since_reveal: Option<Millis>) -> TileFrameState {
    let slice_offset = Vec2::new(-tile.final_position.x, -tile.final_position.y);
    let scattered = TileFrameState {
        row: tile.row,
        col: tile.col,
        position: tile.start_position,
        size: tile.size,
        scale: tile.start_transform.scale,
        rotation_deg: tile.start_transform.rotation_deg,
        opacity: 0.0,
        slice_offset,
    };

    let Some(elapsed) = since_reveal else {
        return scattered;
    };
    if elapsed < tile.scheduled_delay {
        return scattered;
    }

    let into = elapsed.saturating_sub(tile.scheduled_delay).as_f64();
    let t = (into / timing.transition_duration.as_f64()).clamp(0.0, 1.0);
    let eased = timing.ease.apply(t);

    TileFrameState {
        position: tile.start_position.lerp(tile.final_position, eased),
        scale: tile.start_transform.scale + (1.0 - tile.start_transform.scale) * eased,
        rotation_deg: tile.start_transform.rotation_deg * (1.0 - eased),
        opacity: eased,
        ..scattered
    }
}

/// Sample the whole run at one instant.
///
/// Once the tile layer is discarded (`tiles` is `None`), the snapshot
/// carries only the visible assembled surface.
pub fn sample_frame(
    tiles: Option<&TileSet>,
    assembled: &AssembledSurface,
    timing: &TimingSpec,
    since_reveal: Option<Millis>,
) -> FrameSnapshot {
    let tile_states = tiles
        .map(|set| {
            set.tiles()
                .iter()
                .map(|tile| sample_tile(tile, timing, since_reveal))
                .collect()
        })
        .unwrap_or_default();

    FrameSnapshot {
        surface: assembled.surface(),
        background: Arc::clone(assembled.background()),
        assembled_visible: assembled.is_visible(),
        tiles: tile_states,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/sampler.rs"]
mod tests;
