//! Tessella is a staggered tile reveal-and-assemble choreography engine.
//!
//! A rectangular surface is partitioned into a grid of tiles that start
//! scattered (randomly offset, rotated, scaled down, transparent), animate
//! into their final grid positions on a randomized, jittered schedule, and
//! are then discarded in favor of the assembled surface.
//!
//! # Pipeline overview
//!
//! 1. **Build**: `MosaicSpec -> TileSet` (partition, scatter, shuffle, stagger)
//! 2. **Drive**: [`TransitionController`] advances `Built -> Settling ->
//!    Revealing -> Assembled` over a deterministic timer queue
//! 3. **Sample**: `TileSet + Millis -> FrameSnapshot` (what each tile looks
//!    like right now)
//! 4. **Raster** (optional adapter): `FrameSnapshot -> FrameRGBA` (CPU)
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: all randomness flows from one seed; build,
//!   scheduling, and sampling are pure and stable for a given input.
//! - **No IO in the engine**: the background descriptor is resolved at
//!   construction time and unresolvable descriptors fall back to a constant.
//! - **Premultiplied RGBA8** end-to-end in the raster adapter.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod background;
mod engine;
mod eval;
mod foundation;
mod grid;
mod mosaic;
mod render;
mod scatter;
mod schedule;
mod sequence;

pub use animation::ease::Ease;
pub use background::spec::{BackgroundSpec, GradientStop, LinearGradient, default_background};
pub use engine::controller::{CompletionHook, RunPhase, TransitionController};
pub use engine::overlay::{OverlayPlacement, corner_offset, top_left_placement};
pub use engine::resize::ResizeDebouncer;
pub use foundation::core::{GridSpec, Millis, Point, Rect, Rgba8Premul, Size, Surface, Vec2};
pub use foundation::error::{TessellaError, TessellaResult};
pub use foundation::rng::Rng64;
pub use grid::partition::{TileGeometry, partition};
pub use mosaic::build::{MosaicBuilder, build_tile_set};
pub use mosaic::model::{
    AssembledSurface, MosaicSpec, ScatterRadius, StartTransform, Tile, TileSet, VisualState,
};
pub use render::raster::{FrameRGBA, render_snapshot, render_snapshots, to_rgba_image};
pub use scatter::place::{ScatterState, place};
pub use schedule::stagger::{TimingSpec, scheduled_delay, terminal_delay};
pub use sequence::shuffle::shuffled_order;

pub use eval::sampler::{FrameSnapshot, TileFrameState, sample_frame, sample_tile};
