use crate::foundation::core::Surface;

/// Top-left anchor for post-assembly overlay content, relative to the frame
/// it decorates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayPlacement {
    /// Offset from the frame's left edge (negative: outside the frame).
    pub left: f64,
    /// Offset from the frame's top edge (negative: outside the frame).
    pub top: f64,
}

/// Corner offset for an overlay on a frame of the given dimensions:
/// 5% of the shorter side, clamped to `[5, 10]` pixels.
pub fn corner_offset(frame: Surface) -> f64 {
    (frame.min_side() * 0.05).clamp(5.0, 10.0)
}

/// Place an overlay just outside the frame's top-left corner.
///
/// Callers re-derive this after a resize to keep a still-visible overlay
/// anchored; the engine itself owns no overlay content.
pub fn top_left_placement(frame: Surface) -> OverlayPlacement {
    let offset = corner_offset(frame);
    OverlayPlacement {
        left: -offset,
        top: -offset,
    }
}
