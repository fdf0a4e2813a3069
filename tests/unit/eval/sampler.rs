use super::*;
use crate::animation::ease::Ease;
use crate::foundation::core::Surface;
use crate::mosaic::build::build_tile_set;
use crate::mosaic::model::{MosaicSpec, StartTransform, Tile};

fn timing() -> TimingSpec {
    TimingSpec {
        ease: Ease::Linear,
        ..TimingSpec::default()
    }
}

fn tile_with_delay(delay: u64) -> Tile {
    Tile::new(
        1,
        2,
        Point::new(84.0, 42.0),
        Size::new(42.0, 42.0),
        Point::new(-300.0, 500.0),
        StartTransform {
            scale: 0.1,
            rotation_deg: 40.0,
        },
        5,
        Millis(delay),
    )
}

#[test]
fn before_reveal_everything_is_scattered_and_invisible() {
    let tile = tile_with_delay(100);
    let s = sample_tile(&tile, &timing(), None);
    assert_eq!(s.position, tile.start_position);
    assert_eq!(s.scale, 0.1);
    assert_eq!(s.rotation_deg, 40.0);
    assert_eq!(s.opacity, 0.0);
}

#[test]
fn before_its_delay_a_tile_holds_its_start_state() {
    let tile = tile_with_delay(100);
    let s = sample_tile(&tile, &timing(), Some(Millis(99)));
    assert_eq!(s.position, tile.start_position);
    assert_eq!(s.opacity, 0.0);
}

#[test]
fn transition_interpolates_linearly_to_the_final_state() {
    let tile = tile_with_delay(100);
    let t = timing();

    // Halfway through a 700ms transition.
    let s = sample_tile(&tile, &t, Some(Millis(450)));
    assert!((s.opacity - 0.5).abs() < 1e-9);
    assert!((s.scale - 0.55).abs() < 1e-9);
    assert!((s.rotation_deg - 20.0).abs() < 1e-9);
    assert!((s.position.x - (-108.0)).abs() < 1e-9);
    assert!((s.position.y - 271.0).abs() < 1e-9);

    // Done (and long past done) pins the final state exactly.
    for at in [800u64, 5000] {
        let s = sample_tile(&tile, &t, Some(Millis(at)));
        assert_eq!(s.position, tile.final_position);
        assert_eq!(s.scale, 1.0);
        assert_eq!(s.rotation_deg, 0.0);
        assert_eq!(s.opacity, 1.0);
    }
}

#[test]
fn slice_offset_is_constant_through_the_transition() {
    let tile = tile_with_delay(100);
    for at in [None, Some(Millis(0)), Some(Millis(450)), Some(Millis(2000))] {
        let s = sample_tile(&tile, &timing(), at);
        assert_eq!(s.slice_offset, Vec2::new(-84.0, -42.0));
    }
}

#[test]
fn frame_snapshot_empties_once_the_layer_is_discarded() {
    let spec = MosaicSpec::new(Surface::new(500.0, 500.0).unwrap());
    let tiles = build_tile_set(&spec).unwrap();
    let background = std::sync::Arc::new(crate::background::spec::default_background());
    let mut assembled = AssembledSurface::new(spec.surface, background);

    let snap = sample_frame(Some(&tiles), &assembled, &spec.timing, Some(Millis(0)));
    assert_eq!(snap.tiles.len(), 96);
    assert!(!snap.assembled_visible);

    assembled.reveal();
    let snap = sample_frame(None, &assembled, &spec.timing, Some(Millis(9999)));
    assert!(snap.tiles.is_empty());
    assert!(snap.assembled_visible);
}
