use kurbo::Affine;
use rayon::prelude::*;

use crate::eval::sampler::{FrameSnapshot, TileFrameState};
use crate::foundation::error::{TessellaError, TessellaResult};
use crate::foundation::math::mul_div255_u8;

/// One rasterized frame. `data` is row-major RGBA8, premultiplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
    /// Always true for frames produced here.
    pub premultiplied: bool,
}

/// Rasterize one snapshot on the CPU.
///
/// While the tile layer exists, each tile is drawn by inverse-mapping frame
/// pixels through its center-anchored scale/rotation transform and sampling
/// the shared background at `final_position + local`, the slice rule that
/// makes the finished mosaic pixel-identical to the assembled surface. Once
/// the layer is discarded, the assembled surface is painted directly.
pub fn render_snapshot(snapshot: &FrameSnapshot) -> TessellaResult<FrameRGBA> {
    let width = snapshot.surface.width.ceil() as u32;
    let height = snapshot.surface.height.ceil() as u32;
    if width == 0 || height == 0 {
        return Err(TessellaError::evaluation("snapshot surface has no pixels"));
    }

    let mut data = vec![0u8; width as usize * height as usize * 4];

    if snapshot.assembled_visible {
        for y in 0..height {
            for x in 0..width {
                let c = snapshot.background.sample(
                    f64::from(x) + 0.5,
                    f64::from(y) + 0.5,
                    snapshot.surface,
                );
                let i = (y as usize * width as usize + x as usize) * 4;
                data[i] = c.r;
                data[i + 1] = c.g;
                data[i + 2] = c.b;
                data[i + 3] = c.a;
            }
        }
    } else {
        for tile in &snapshot.tiles {
            draw_tile(&mut data, width, height, snapshot, tile);
        }
    }

    Ok(FrameRGBA {
        width,
        height,
        data,
        premultiplied: true,
    })
}

/// Rasterize a sequence of snapshots, one frame per snapshot, in parallel.
pub fn render_snapshots(snapshots: &[FrameSnapshot]) -> TessellaResult<Vec<FrameRGBA>> {
    snapshots.par_iter().map(render_snapshot).collect()
}

/// Convert a premultiplied frame to a straight-alpha [`image::RgbaImage`].
pub fn to_rgba_image(frame: &FrameRGBA) -> TessellaResult<image::RgbaImage> {
    let mut out = Vec::with_capacity(frame.data.len());
    for px in frame.data.chunks_exact(4) {
        let a = px[3];
        if a == 0 {
            out.extend_from_slice(&[0, 0, 0, 0]);
        } else {
            for c in &px[..3] {
                out.push(((u16::from(*c) * 255 + u16::from(a) / 2) / u16::from(a)).min(255) as u8);
            }
            out.push(a);
        }
    }
    image::RgbaImage::from_raw(frame.width, frame.height, out)
        .ok_or_else(|| TessellaError::evaluation("frame buffer does not match its dimensions"))
}

fn draw_tile(
    data: &mut [u8],
    width: u32,
    height: u32,
    snapshot: &FrameSnapshot,
    tile: &TileFrameState,
) {
    if tile.opacity <= 0.0 || tile.scale <= 0.0 {
        return;
    }

    let (w, h) = (tile.size.width, tile.size.height);
    let center = (w * 0.5, h * 0.5);
    // Position places the tile's top-left corner; scale and rotation act
    // about the tile center.
    let affine = Affine::translate((tile.position.x, tile.position.y))
        * Affine::translate(center)
        * Affine::rotate(tile.rotation_deg.to_radians())
        * Affine::scale(tile.scale)
        * Affine::translate((-center.0, -center.1));
    let inverse = affine.inverse();

    // Device-space bounds of the transformed tile, clamped to the frame.
    let corners = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)]
        .map(|(x, y)| affine * kurbo::Point::new(x, y));
    let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    let x0 = min_x.floor().max(0.0) as u32;
    let y0 = min_y.floor().max(0.0) as u32;
    let x1 = (max_x.ceil().max(0.0) as u32).min(width);
    let y1 = (max_y.ceil().max(0.0) as u32).min(height);

    for y in y0..y1 {
        for x in x0..x1 {
            let device = kurbo::Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let local = inverse * device;
            if local.x < 0.0 || local.x >= w || local.y < 0.0 || local.y >= h {
                continue;
            }
            let c = snapshot.background.sample(
                local.x - tile.slice_offset.x,
                local.y - tile.slice_offset.y,
                snapshot.surface,
            );
            let i = (y as usize * width as usize + x as usize) * 4;
            let blended = over(
                [data[i], data[i + 1], data[i + 2], data[i + 3]],
                [c.r, c.g, c.b, c.a],
                tile.opacity,
            );
            data[i..i + 4].copy_from_slice(&blended);
        }
    }
}

fn over(dst: [u8; 4], src: [u8; 4], opacity: f64) -> [u8; 4] {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}
