use std::sync::Arc;

use crate::background::spec::BackgroundSpec;
use crate::engine::resize::ResizeDebouncer;
use crate::engine::timers::{EventKind, TimerQueue};
use crate::eval::sampler::{FrameSnapshot, sample_frame};
use crate::foundation::core::{Millis, Surface};
use crate::foundation::error::{TessellaError, TessellaResult};
use crate::grid::partition::{TileGeometry, partition};
use crate::mosaic::build::build_tile_set;
use crate::mosaic::model::{AssembledSurface, MosaicSpec, TileSet};
use crate::schedule::stagger::terminal_delay;

/// Callback invoked exactly once when the run reaches `Assembled`.
///
/// This is the sole integration point for post-assembly collaborators
/// (overlay frame, sticker). The handle carries the surface dimensions.
pub type CompletionHook = Box<dyn FnOnce(&AssembledSurface)>;

/// Lifecycle phase of one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum RunPhase {
    /// Tiles and assembled surface constructed; nothing moving yet.
    Built,
    /// Waiting out the initial settle delay.
    Settling,
    /// Tile transitions scheduled; tiles race toward their final states.
    Revealing,
    /// Terminal. Tile layer discarded, assembled surface shown, hook fired.
    Assembled,
}

/// Orchestrates the full lifecycle of one scatter-and-assemble run.
///
/// Single-threaded and cooperative: callers pump
/// [`advance_to`](TransitionController::advance_to) with the current run
/// clock, and every due event fires atomically inside that call. The only
/// suspension points are the scheduled delays (settle, per tile, terminal).
///
/// The tile set and assembled surface are exclusively owned by one
/// controller; a replacement run requires
/// [`teardown`](TransitionController::teardown) of this one first.
pub struct TransitionController {
    spec: MosaicSpec,
    background: Arc<BackgroundSpec>,
    tiles: Option<TileSet>,
    assembled: AssembledSurface,
    timers: TimerQueue,
    debouncer: ResizeDebouncer,
    phase: RunPhase,
    reveal_origin: Option<Millis>,
    pending_surface: Option<Surface>,
    hook: Option<CompletionHook>,
}

impl TransitionController {
    /// Build a controller in the `Built` phase.
    ///
    /// The background descriptor is resolved here: an unresolvable
    /// descriptor falls back to the default gradient now, never at reveal
    /// time. Construction fails only on malformed configuration, before any
    /// tile is created.
    #[tracing::instrument(skip_all)]
    pub fn new(spec: MosaicSpec, hook: Option<CompletionHook>) -> TessellaResult<Self> {
        spec.validate()?;
        let background = Arc::new(BackgroundSpec::resolve(&spec.background));
        let tiles = build_tile_set(&spec)?;
        let assembled = AssembledSurface::new(spec.surface, Arc::clone(&background));

        Ok(Self {
            spec,
            background,
            tiles: Some(tiles),
            assembled,
            timers: TimerQueue::new(),
            debouncer: ResizeDebouncer::default(),
            phase: RunPhase::Built,
            reveal_origin: None,
            pending_surface: None,
            hook,
        })
    }

    /// Enter `Settling` at `now` and schedule the reveal phase.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self, now: Millis) -> TessellaResult<()> {
        if self.phase != RunPhase::Built {
            return Err(TessellaError::evaluation("run already started"));
        }
        self.phase = RunPhase::Settling;
        self.timers.schedule(
            now.saturating_add(self.spec.timing.settle_delay),
            EventKind::SettleElapsed,
        );
        Ok(())
    }

    /// Fire every event due at or before `now`, in deadline order (equal
    /// deadlines in schedule order), and apply any debounced resize whose
    /// quiet window has expired.
    pub fn advance_to(&mut self, now: Millis) -> TessellaResult<()> {
        if let Some(surface) = self.debouncer.poll(now) {
            self.apply_resize(surface);
        }
        while let Some((due, kind)) = self.timers.pop_due(now) {
            self.dispatch(due, kind)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, due: Millis, kind: EventKind) -> TessellaResult<()> {
        match kind {
            EventKind::SettleElapsed => self.enter_revealing(due),
            EventKind::TileReveal { grid_index } => {
                if let Some(tiles) = self.tiles.as_mut()
                    && let Some(tile) = tiles.tiles_mut().get_mut(grid_index as usize)
                {
                    tile.begin_transition();
                }
                Ok(())
            }
            EventKind::TerminalElapsed => self.enter_assembled(),
        }
    }

    fn enter_revealing(&mut self, origin: Millis) -> TessellaResult<()> {
        let tiles = self
            .tiles
            .as_ref()
            .ok_or_else(|| TessellaError::evaluation("reveal fired without a tile set"))?;

        self.phase = RunPhase::Revealing;
        self.reveal_origin = Some(origin);
        for (grid_index, tile) in tiles.tiles().iter().enumerate() {
            self.timers.schedule(
                origin.saturating_add(tile.scheduled_delay),
                EventKind::TileReveal {
                    grid_index: grid_index as u32,
                },
            );
        }
        // Scheduled independently of the per-tile jitter draws; a validated
        // TimingSpec guarantees it lands after every one of them.
        self.timers.schedule(
            origin.saturating_add(terminal_delay(&self.spec.timing, tiles.len())),
            EventKind::TerminalElapsed,
        );
        Ok(())
    }

    fn enter_assembled(&mut self) -> TessellaResult<()> {
        if let Some(mut tiles) = self.tiles.take() {
            for tile in tiles.tiles_mut() {
                tile.mark_assembled();
            }
            tracing::debug!(tiles = tiles.len(), "tile layer discarded");
        }
        if let Some(surface) = self.pending_surface.take() {
            self.assembled.set_surface(surface);
        }
        self.assembled.reveal();
        self.phase = RunPhase::Assembled;
        if let Some(hook) = self.hook.take() {
            hook(&self.assembled);
        }
        Ok(())
    }

    /// Record an asynchronously delivered resize at `now`.
    ///
    /// The event is debounced; once its quiet window expires (inside a later
    /// [`advance_to`](TransitionController::advance_to)) the new surface is
    /// applied: immediately to the assembled presentation when the run is
    /// already terminal, otherwise it is held for after the terminal event.
    /// A resize never restarts an in-progress run and never re-fires the
    /// completion hook.
    pub fn resize(&mut self, surface: Surface, now: Millis) -> TessellaResult<()> {
        surface.validate()?;
        self.debouncer.submit(now, surface);
        Ok(())
    }

    fn apply_resize(&mut self, surface: Surface) {
        if self.phase == RunPhase::Assembled {
            self.assembled.set_surface(surface);
            self.pending_surface = None;
        } else {
            self.pending_surface = Some(surface);
        }
    }

    /// Recompute the grid partition against the effective surface (the most
    /// recent applied or pending resize, falling back to the construction
    /// surface). Consumers reposition against this after a resize.
    pub fn current_partition(&self) -> TessellaResult<Vec<TileGeometry>> {
        let surface = self
            .pending_surface
            .unwrap_or_else(|| self.assembled.surface());
        partition(surface, self.spec.grid)
    }

    /// Clear all pending timers and discard the tile layer without revealing
    /// the assembled surface or firing the hook.
    ///
    /// Required before a replacement run may start, so two tile sets never
    /// mutate the same surface.
    pub fn teardown(&mut self) {
        self.timers.clear();
        self.tiles = None;
        self.hook = None;
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// The tile set, while it exists (dropped at terminal and on teardown).
    pub fn tiles(&self) -> Option<&TileSet> {
        self.tiles.as_ref()
    }

    /// The assembled surface handle.
    pub fn assembled(&self) -> &AssembledSurface {
        &self.assembled
    }

    /// The shared, already-resolved background.
    pub fn background(&self) -> &Arc<BackgroundSpec> {
        &self.background
    }

    /// The validated run configuration.
    pub fn spec(&self) -> &MosaicSpec {
        &self.spec
    }

    /// Number of timer entries still pending.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Visual state of the whole run at `now`, for the raster adapter.
    pub fn snapshot(&self, now: Millis) -> FrameSnapshot {
        let since_reveal = self.reveal_origin.map(|origin| now.saturating_sub(origin));
        sample_frame(
            self.tiles.as_ref(),
            &self.assembled,
            &self.spec.timing,
            since_reveal,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/controller.rs"]
mod tests;
