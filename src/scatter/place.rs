use crate::foundation::core::{Point, Surface};
use crate::foundation::rng::Rng64;
use crate::grid::partition::TileGeometry;
use crate::mosaic::model::ScatterRadius;

/// Scale range drawn for a scattered tile.
pub(crate) const SCATTER_SCALE: (f64, f64) = (0.08, 0.22);
/// Rotation range in degrees drawn for a scattered tile.
pub(crate) const SCATTER_ROTATION_DEG: (f64, f64) = (-45.0, 45.0);

/// Randomized start state of one tile, drawn once at creation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScatterState {
    /// Off-grid start position (`final_position` plus a bounded offset).
    pub start_position: Point,
    /// Initial uniform scale.
    pub scale: f64,
    /// Initial rotation in degrees.
    pub rotation_deg: f64,
}

/// Draw a tile's scatter state.
///
/// Offsets are uniform in `[-R, R)` per axis and rounded to whole pixels;
/// draws are independent per tile, so scattered tiles may overlap. The start
/// opacity is always zero and is not part of the drawn state.
pub fn place(
    geometry: &TileGeometry,
    radius: ScatterRadius,
    surface: Surface,
    rng: &mut Rng64,
) -> ScatterState {
    let (rx, ry) = radius.bounds(surface);
    let offset_x = rng.uniform(-rx, rx).round();
    let offset_y = rng.uniform(-ry, ry).round();

    ScatterState {
        start_position: Point::new(
            geometry.final_position.x + offset_x,
            geometry.final_position.y + offset_y,
        ),
        scale: rng.uniform(SCATTER_SCALE.0, SCATTER_SCALE.1),
        rotation_deg: rng.uniform(SCATTER_ROTATION_DEG.0, SCATTER_ROTATION_DEG.1),
    }
}
