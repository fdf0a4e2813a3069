use crate::animation::ease::Ease;
use crate::foundation::core::Millis;
use crate::foundation::error::{TessellaError, TessellaResult};
use crate::foundation::rng::Rng64;

/// Timing constants for one run, in milliseconds.
///
/// All delays are measured from the moment the reveal phase starts; the
/// reveal phase itself starts `settle_delay` after the controller is started.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct TimingSpec {
    /// Pause between construction and the start of the reveal phase.
    pub settle_delay: Millis,
    /// Per-rank stagger interval.
    pub base_interval: Millis,
    /// Upper bound (exclusive) of the per-tile jitter draw.
    pub jitter_bound: Millis,
    /// Buffer after the last tile's nominal slot, before the tile layer is
    /// discarded.
    pub closing_buffer: Millis,
    /// Visual duration of one tile's scatter-to-final transition.
    pub transition_duration: Millis,
    /// Easing applied to the transition progress.
    pub ease: Ease,
}

impl Default for TimingSpec {
    fn default() -> Self {
        Self {
            settle_delay: Millis(120),
            base_interval: Millis(18),
            jitter_bound: Millis(220),
            closing_buffer: Millis(600),
            transition_duration: Millis(700),
            ease: Ease::OutCubic,
        }
    }
}

impl TimingSpec {
    /// Reject constants that could discard the tile layer before the last
    /// tile has been instructed to move.
    ///
    /// `closing_buffer >= base_interval + jitter_bound` makes
    /// `terminal_delay(n) > (n-1) * base_interval + jitter` hold for every
    /// possible jitter draw, which is the invariant the terminal estimate
    /// rests on.
    pub fn validate(&self) -> TessellaResult<()> {
        if self.base_interval.0 == 0 {
            return Err(TessellaError::validation("base_interval must be > 0"));
        }
        if self.transition_duration.0 == 0 {
            return Err(TessellaError::validation("transition_duration must be > 0"));
        }
        if self.closing_buffer.0 < self.base_interval.0 + self.jitter_bound.0 {
            return Err(TessellaError::validation(
                "closing_buffer must be >= base_interval + jitter_bound",
            ));
        }
        Ok(())
    }

    /// Delay of the tile revealed at `rank`, with a fresh jitter draw.
    pub fn scheduled_delay(&self, rank: u32, rng: &mut Rng64) -> Millis {
        scheduled_delay(self, rank, rng)
    }

    /// Fixed upper-bound estimate for the whole tile layer.
    pub fn terminal_delay(&self, tile_count: usize) -> Millis {
        terminal_delay(self, tile_count)
    }
}

/// `rank * base_interval + floor(U(0, jitter_bound))`, from reveal start.
pub fn scheduled_delay(timing: &TimingSpec, rank: u32, rng: &mut Rng64) -> Millis {
    let jitter = rng.uniform(0.0, timing.jitter_bound.as_f64()).floor() as u64;
    Millis(u64::from(rank) * timing.base_interval.0 + jitter)
}

/// `tile_count * base_interval + closing_buffer`, from reveal start.
///
/// A scheduled-time estimate, not a measured completion signal: it is
/// computed independently of the per-tile jitter draws and, for a validated
/// [`TimingSpec`], exceeds every possible scheduled delay.
pub fn terminal_delay(timing: &TimingSpec, tile_count: usize) -> Millis {
    Millis(tile_count as u64 * timing.base_interval.0 + timing.closing_buffer.0)
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/stagger.rs"]
mod tests;
