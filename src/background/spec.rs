use crate::foundation::core::{Rgba8Premul, Surface};
use crate::foundation::error::{TessellaError, TessellaResult};

/// Descriptor used when the configured background is missing or unreadable.
///
/// Matches the assembled-surface fallback the engine has always shipped with.
pub const DEFAULT_BACKGROUND: &str = "linear-gradient(135deg,#131212,#302e2e6c,#180000)";

/// One gradient color stop. Stops are evenly spaced along the gradient line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    /// Stop color, premultiplied.
    pub color: Rgba8Premul,
}

/// A linear gradient in CSS angle convention: `0deg` points up, angles grow
/// clockwise, and the gradient line passes through the surface center.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LinearGradient {
    /// Gradient angle in degrees.
    pub angle_deg: f64,
    /// Two or more evenly spaced stops.
    pub stops: Vec<GradientStop>,
}

/// Resolved background shared by the assembled surface and every tile slice.
///
/// Sharing one value (behind an `Arc`) is what guarantees that a tile's slice
/// and the assembled surface agree pixel-for-pixel at the tile's final
/// position: both sample this spec at the same surface coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BackgroundSpec {
    /// A single flat color.
    Solid(Rgba8Premul),
    /// A linear gradient across the full surface.
    Gradient(LinearGradient),
}

/// The constant gradient substituted when a descriptor cannot be resolved.
pub fn default_background() -> BackgroundSpec {
    BackgroundSpec::parse(DEFAULT_BACKGROUND)
        .unwrap_or(BackgroundSpec::Solid(Rgba8Premul::transparent()))
}

impl BackgroundSpec {
    /// Resolve a descriptor, substituting the default gradient when the
    /// descriptor is empty or unparsable. Never fails; runs at construction
    /// time so reveal never has to deal with a missing background.
    pub fn resolve(descriptor: &str) -> Self {
        match Self::parse(descriptor) {
            Ok(spec) => spec,
            Err(err) => {
                tracing::debug!(%err, "background descriptor unresolvable, using default");
                default_background()
            }
        }
    }

    /// Strict parse of a background descriptor.
    ///
    /// Accepted forms: `#RRGGBB` / `#RRGGBBAA` (solid) and
    /// `linear-gradient(<angle>deg, <stop>, <stop>, ...)` with hex stops.
    pub fn parse(descriptor: &str) -> TessellaResult<Self> {
        let s = descriptor.trim();
        if s.is_empty() {
            return Err(TessellaError::validation("background descriptor is empty"));
        }
        if s.starts_with('#') {
            return Ok(Self::Solid(parse_hex(s)?));
        }

        let body = s
            .strip_prefix("linear-gradient(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| {
                TessellaError::validation(format!("unknown background descriptor '{s}'"))
            })?;

        let mut parts = body.split(',').map(str::trim);
        let first = parts
            .next()
            .ok_or_else(|| TessellaError::validation("gradient descriptor has no arguments"))?;

        let mut stops = Vec::new();
        let angle_deg = match first.strip_suffix("deg") {
            Some(a) => a
                .trim()
                .parse::<f64>()
                .map_err(|_| TessellaError::validation(format!("invalid gradient angle '{first}'")))?,
            None => {
                stops.push(GradientStop {
                    color: parse_hex(first)?,
                });
                // CSS default direction is "to bottom".
                180.0
            }
        };
        if !angle_deg.is_finite() {
            return Err(TessellaError::validation("gradient angle must be finite"));
        }

        for part in parts {
            stops.push(GradientStop {
                color: parse_hex(part)?,
            });
        }
        if stops.len() < 2 {
            return Err(TessellaError::validation(
                "gradient needs at least two color stops",
            ));
        }

        Ok(Self::Gradient(LinearGradient { angle_deg, stops }))
    }

    /// Sample the background at surface coordinates `(x, y)`.
    ///
    /// The surface supplies the gradient box; tiles pass
    /// `final_position + local` here, which is what keeps the mosaic and the
    /// assembled surface indistinguishable at every final tile position.
    pub fn sample(&self, x: f64, y: f64, surface: Surface) -> Rgba8Premul {
        match self {
            Self::Solid(c) => *c,
            Self::Gradient(g) => sample_gradient(g, x, y, surface),
        }
    }
}

fn sample_gradient(g: &LinearGradient, x: f64, y: f64, surface: Surface) -> Rgba8Premul {
    let a = g.angle_deg.to_radians();
    // Screen coordinates grow downward, so "up" is -y.
    let (dx, dy) = (a.sin(), -a.cos());
    let line_len = (surface.width * dx).abs() + (surface.height * dy).abs();
    if line_len <= f64::EPSILON {
        return g.stops[0].color;
    }

    let cx = surface.width * 0.5;
    let cy = surface.height * 0.5;
    let proj = (x - cx) * dx + (y - cy) * dy;
    let t = ((proj + line_len * 0.5) / line_len).clamp(0.0, 1.0);

    let segments = g.stops.len() - 1;
    let scaled = t * segments as f64;
    let idx = (scaled.floor() as usize).min(segments - 1);
    let frac = scaled - idx as f64;
    lerp_premul(g.stops[idx].color, g.stops[idx + 1].color, frac)
}

fn lerp_premul(a: Rgba8Premul, b: Rgba8Premul, t: f64) -> Rgba8Premul {
    fn mix(a: u8, b: u8, t: f64) -> u8 {
        (f64::from(a) + (f64::from(b) - f64::from(a)) * t)
            .round()
            .clamp(0.0, 255.0) as u8
    }

    let t = t.clamp(0.0, 1.0);
    Rgba8Premul {
        r: mix(a.r, b.r, t),
        g: mix(a.g, b.g, t),
        b: mix(a.b, b.b, t),
        a: mix(a.a, b.a, t),
    }
}

fn parse_hex(s: &str) -> TessellaResult<Rgba8Premul> {
    let raw = s.trim();
    let hex = raw.strip_prefix('#').ok_or_else(|| {
        TessellaError::validation(format!("color '{raw}' must start with '#'"))
    })?;

    fn hex_byte(pair: &str) -> TessellaResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| TessellaError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    let (r, g, b, a) = match hex.len() {
        6 => (
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
            255,
        ),
        8 => (
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
            hex_byte(&hex[6..8])?,
        ),
        _ => {
            return Err(TessellaError::validation(
                "hex color must be #RRGGBB or #RRGGBBAA",
            ));
        }
    };

    Ok(Rgba8Premul::from_straight_rgba(r, g, b, a))
}
