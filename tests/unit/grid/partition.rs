use super::*;
use crate::foundation::core::{GridSpec, Surface};

fn surface_500() -> Surface {
    Surface::new(500.0, 500.0).unwrap()
}

#[test]
fn twelve_by_eight_at_500_matches_known_geometry() {
    let tiles = partition(surface_500(), GridSpec::default()).unwrap();
    assert_eq!(tiles.len(), 96);

    let first = &tiles[0];
    assert_eq!((first.row, first.col), (0, 0));
    assert_eq!(first.final_position, Point::new(0.0, 0.0));
    assert_eq!(first.size, Size::new(42.0, 42.0));

    let last = tiles.last().unwrap();
    assert_eq!((last.row, last.col), (7, 11));
    assert_eq!(last.final_position, Point::new(458.0, 292.0));
}

#[test]
fn tiles_are_emitted_row_major() {
    let tiles = partition(surface_500(), GridSpec::new(3, 2).unwrap()).unwrap();
    let coords: Vec<(u32, u32)> = tiles.iter().map(|t| (t.row, t.col)).collect();
    assert_eq!(
        coords,
        vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
    );
}

#[test]
fn union_covers_the_surface_without_gaps() {
    // Ceiled sizes must reach (or pass) the next rounded position on both
    // axes, and the last tile must reach the surface edge.
    for (w, h, cols, rows) in [
        (500.0, 500.0, 12u32, 8u32),
        (333.0, 777.0, 7, 13),
        (1920.0, 1080.0, 12, 8),
        (41.0, 41.0, 12, 8),
    ] {
        let surface = Surface::new(w, h).unwrap();
        let grid = GridSpec::new(cols, rows).unwrap();
        let tiles = partition(surface, grid).unwrap();

        for tile in &tiles {
            let right = tile.final_position.x + tile.size.width;
            let bottom = tile.final_position.y + tile.size.height;
            let next_left = (f64::from(tile.col + 1) * w / f64::from(cols)).round();
            let next_top = (f64::from(tile.row + 1) * h / f64::from(rows)).round();
            if tile.col + 1 < cols {
                assert!(right >= next_left, "horizontal gap at {tile:?}");
            } else {
                assert!(right >= w, "right edge uncovered at {tile:?}");
            }
            if tile.row + 1 < rows {
                assert!(bottom >= next_top, "vertical gap at {tile:?}");
            } else {
                assert!(bottom >= h, "bottom edge uncovered at {tile:?}");
            }
            // Overlap never exceeds one rounding unit per axis.
            assert!(right - next_left <= 1.0 || tile.col + 1 == cols);
            assert!(bottom - next_top <= 1.0 || tile.row + 1 == rows);
        }
    }
}

#[test]
fn degenerate_inputs_are_rejected() {
    assert!(partition(Surface { width: 0.0, height: 500.0 }, GridSpec::default()).is_err());
    assert!(partition(surface_500(), GridSpec { cols: 0, rows: 8 }).is_err());
}
