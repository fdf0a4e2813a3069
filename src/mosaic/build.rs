use crate::foundation::core::{GridSpec, Surface};
use crate::foundation::error::TessellaResult;
use crate::foundation::math::stream_seed;
use crate::foundation::rng::Rng64;
use crate::grid::partition::partition;
use crate::mosaic::model::{MosaicSpec, ScatterRadius, StartTransform, Tile, TileSet};
use crate::scatter::place::place;
use crate::schedule::stagger::{TimingSpec, scheduled_delay};
use crate::sequence::shuffle::shuffled_order;

/// Build the full tile set for a validated spec: partition, scatter,
/// shuffle, stagger.
///
/// This is pure staged construction: it returns value objects and performs
/// no rendering or scheduling side effects. Each stage draws from its own
/// seeded stream, so a given `(spec, seed)` always produces the same set:
/// scatter states in grid order, then the reveal permutation, then jitter in
/// reveal-rank order.
pub fn build_tile_set(spec: &MosaicSpec) -> TessellaResult<TileSet> {
    spec.validate()?;
    let geoms = partition(spec.surface, spec.grid)?;
    let n = geoms.len();

    let mut scatter_rng = Rng64::new(stream_seed(spec.seed, "scatter"));
    let scatters: Vec<_> = geoms
        .iter()
        .map(|g| place(g, spec.scatter, spec.surface, &mut scatter_rng))
        .collect();

    let mut shuffle_rng = Rng64::new(stream_seed(spec.seed, "shuffle"));
    let order = shuffled_order(n, &mut shuffle_rng);
    // order[rank] is a grid index; invert so each tile knows its rank.
    let mut ranks = vec![0u32; n];
    for (rank, &grid_idx) in order.iter().enumerate() {
        ranks[grid_idx as usize] = rank as u32;
    }

    let mut stagger_rng = Rng64::new(stream_seed(spec.seed, "stagger"));
    let mut delays = Vec::with_capacity(n);
    for rank in 0..n as u32 {
        delays.push(scheduled_delay(&spec.timing, rank, &mut stagger_rng));
    }

    let tiles = geoms
        .into_iter()
        .zip(scatters)
        .enumerate()
        .map(|(grid_idx, (g, s))| {
            let rank = ranks[grid_idx];
            Tile::new(
                g.row,
                g.col,
                g.final_position,
                g.size,
                s.start_position,
                StartTransform {
                    scale: s.scale,
                    rotation_deg: s.rotation_deg,
                },
                rank,
                delays[rank as usize],
            )
        })
        .collect();

    Ok(TileSet::new(tiles))
}

/// Fluent construction of a [`MosaicSpec`], ending in a validating
/// [`build`](MosaicBuilder::build).
pub struct MosaicBuilder {
    surface: Surface,
    grid: GridSpec,
    background: Option<String>,
    scatter: ScatterRadius,
    timing: TimingSpec,
    seed: u64,
}

impl MosaicBuilder {
    /// Start from a surface; everything else defaults.
    pub fn new(surface: Surface) -> Self {
        let defaults = MosaicSpec::new(surface);
        Self {
            surface,
            grid: defaults.grid,
            background: None,
            scatter: defaults.scatter,
            timing: defaults.timing,
            seed: defaults.seed,
        }
    }

    /// Override the grid dimensions.
    pub fn grid(mut self, cols: u32, rows: u32) -> Self {
        self.grid = GridSpec { cols, rows };
        self
    }

    /// Set the background descriptor.
    pub fn background(mut self, descriptor: impl Into<String>) -> Self {
        self.background = Some(descriptor.into());
        self
    }

    /// Override the scatter radius.
    pub fn scatter(mut self, scatter: ScatterRadius) -> Self {
        self.scatter = scatter;
        self
    }

    /// Override the timing constants.
    pub fn timing(mut self, timing: TimingSpec) -> Self {
        self.timing = timing;
        self
    }

    /// Set the deterministic run seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate and produce the run configuration.
    pub fn build(self) -> TessellaResult<MosaicSpec> {
        let mut spec = MosaicSpec::new(self.surface);
        spec.grid = self.grid;
        if let Some(background) = self.background {
            spec.background = background;
        }
        spec.scatter = self.scatter;
        spec.timing = self.timing;
        spec.seed = self.seed;
        spec.validate()?;
        Ok(spec)
    }
}
