use crate::foundation::core::{GridSpec, Point, Size, Surface};
use crate::foundation::error::TessellaResult;

/// Final geometry of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TileGeometry {
    /// Grid row in `[0, rows)`.
    pub row: u32,
    /// Grid column in `[0, cols)`.
    pub col: u32,
    /// Final top-left corner, rounded to whole pixels.
    pub final_position: Point,
    /// Tile size, ceiled so adjacent tiles leave no sub-pixel seams.
    pub size: Size,
}

/// Divide `surface` into `grid.cols x grid.rows` tiles, row-major.
///
/// Positions are `round(col * tileW), round(row * tileH)`; sizes are
/// `ceil(tileW), ceil(tileH)`. Ceiling absorbs the division remainder, so the
/// union of all tiles covers the surface exactly (edge tiles may be
/// fractionally larger). Pure function of its two inputs.
pub fn partition(surface: Surface, grid: GridSpec) -> TessellaResult<Vec<TileGeometry>> {
    surface.validate()?;
    grid.validate()?;

    let tile_w = surface.width / f64::from(grid.cols);
    let tile_h = surface.height / f64::from(grid.rows);
    let size = Size::new(tile_w.ceil(), tile_h.ceil());

    let mut out = Vec::with_capacity(grid.tile_count());
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            out.push(TileGeometry {
                row,
                col,
                final_position: Point::new(
                    (f64::from(col) * tile_w).round(),
                    (f64::from(row) * tile_h).round(),
                ),
                size,
            });
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/grid/partition.rs"]
mod tests;
