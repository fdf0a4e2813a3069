use super::*;
use crate::background::spec::default_background;
use crate::mosaic::build::build_tile_set;

fn spec() -> MosaicSpec {
    MosaicSpec {
        seed: 13,
        ..MosaicSpec::new(Surface::new(500.0, 500.0).unwrap())
    }
}

#[test]
fn zero_width_is_rejected_before_any_tile_exists() {
    let bad = MosaicSpec {
        surface: Surface {
            width: 0.0,
            height: 500.0,
        },
        ..spec()
    };
    assert!(bad.validate().is_err());
    assert!(build_tile_set(&bad).is_err());
}

#[test]
fn reveal_order_is_a_permutation_every_run() {
    for seed in 0..20u64 {
        let tiles = build_tile_set(&MosaicSpec { seed, ..spec() }).unwrap();
        assert!(tiles.reveal_order_is_permutation(), "seed {seed}");
    }
}

#[test]
fn tile_state_only_moves_forward() {
    let mut tiles = build_tile_set(&spec()).unwrap();
    let tile = &mut tiles.tiles_mut()[0];
    assert_eq!(tile.state(), VisualState::Scattered);

    tile.begin_transition();
    assert_eq!(tile.state(), VisualState::Transitioning);

    tile.mark_assembled();
    assert_eq!(tile.state(), VisualState::Assembled);

    // A late reveal instruction cannot drag the tile backward.
    tile.begin_transition();
    assert_eq!(tile.state(), VisualState::Assembled);
}

#[test]
fn assembled_surface_starts_hidden_and_shares_the_background() {
    let background = std::sync::Arc::new(default_background());
    let surface = AssembledSurface::new(spec().surface, std::sync::Arc::clone(&background));
    assert!(!surface.is_visible());
    assert!(std::sync::Arc::ptr_eq(surface.background(), &background));
}

#[test]
fn slice_offset_complements_the_final_position() {
    let background = std::sync::Arc::new(default_background());
    let surface = AssembledSurface::new(spec().surface, background);
    let offset = surface.slice_offset_for(Point::new(458.0, 292.0));
    assert_eq!(offset, Vec2::new(-458.0, -292.0));
}

#[test]
fn spec_roundtrips_through_json() {
    let json = serde_json::to_string(&spec()).unwrap();
    let back: MosaicSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(back.surface, spec().surface);
    assert_eq!(back.grid, spec().grid);
    assert_eq!(back.seed, 13);
}

#[test]
fn spec_json_defaults_fill_everything_but_the_surface() {
    let back: MosaicSpec =
        serde_json::from_str(r#"{"surface":{"width":500.0,"height":500.0}}"#).unwrap();
    assert_eq!(back.grid, GridSpec::default());
    assert_eq!(back.scatter, ScatterRadius::default());
    back.validate().unwrap();
}

#[test]
fn proportional_radius_validates_like_fixed() {
    assert!(ScatterRadius::Proportional { factor: -1.0 }.validate().is_err());
    assert!(
        ScatterRadius::Fixed {
            x: f64::NAN,
            y: 1.0
        }
        .validate()
        .is_err()
    );
    ScatterRadius::Proportional { factor: 1.5 }.validate().unwrap();
}
