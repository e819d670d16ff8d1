// Software rasterizer for strokes.
// Visual effects provided here:
// 1) A filled round dab at every sample (so a single tap leaves a dot).
// 2) A thick round-capped segment between consecutive samples of one stroke.
// Both can paint (source-over) or erase (destination-out, pixels go transparent).
//
// Coverage rule: a pixel is hit when its center (x + 0.5, y + 0.5) lies within
// the radius. No anti-aliasing, so replaying the same log is bit-exact.

use crate::types::{CompositeMode, PixelBuffer, Rgba, StrokePoint};

/// A pixel center is never further than sqrt(2)/2 from a point inside that pixel.
const MIN_RADIUS: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Combine one source color into one destination pixel.
#[inline]
pub fn composite(dst: Rgba, src: Rgba, mode: CompositeMode) -> Rgba {
    let sa = src.a as f32 / 255.0;
    let da = dst.a as f32 / 255.0;
    match mode {
        CompositeMode::Paint => {
            let out_a = sa + da * (1.0 - sa);
            if out_a <= f32::EPSILON {
                return Rgba::TRANSPARENT;
            }
            let blend = |s: u8, d: u8| -> u8 {
                ((s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a)
                    .round()
                    .clamp(0.0, 255.0) as u8
            };
            Rgba::rgba(
                blend(src.r, dst.r),
                blend(src.g, dst.g),
                blend(src.b, dst.b),
                (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
            )
        }
        CompositeMode::Erase => {
            let out_a = (da * (1.0 - sa) * 255.0).round().clamp(0.0, 255.0) as u8;
            if out_a == 0 {
                // Fully erased pixels are canonical transparent, whatever was painted before.
                return Rgba::TRANSPARENT;
            }
            Rgba { a: out_a, ..dst }
        }
    }
}

/// Inclusive pixel range whose centers can fall within [lo, hi].
#[inline]
fn pixel_span(lo: f32, hi: f32) -> (i32, i32) {
    ((lo - 0.5).floor() as i32, (hi - 0.5).ceil() as i32)
}

#[inline]
fn blend_at(buf: &mut PixelBuffer, x: i32, y: i32, color: Rgba, mode: CompositeMode) {
    if let Some(dst) = buf.get(x, y) {
        buf.set(x, y, composite(dst, color, mode));
    }
}

/// Fill a disc of `radius` around (cx, cy).
pub fn fill_circle(
    buf: &mut PixelBuffer,
    cx: f32,
    cy: f32,
    radius: f32,
    color: Rgba,
    mode: CompositeMode,
) {
    let r = radius.max(MIN_RADIUS);
    let r2 = r * r;

    // Only scan the bounding box, clipped to the buffer.
    let (x0, x1) = pixel_span(cx - r, cx + r);
    let (y0, y1) = pixel_span(cy - r, cy + r);
    let (x0, x1) = (x0.max(0), x1.min(buf.width as i32 - 1));
    let (y0, y1) = (y0.max(0), y1.min(buf.height as i32 - 1));

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                blend_at(buf, x, y, color, mode);
            }
        }
    }
}

/// Squared distance from (px, py) to the segment a-b.
fn point_segment_distance_sq(px: f32, py: f32, a: (f32, f32), b: (f32, f32)) -> f32 {
    let (vx, vy) = (b.0 - a.0, b.1 - a.1);
    let (wx, wy) = (px - a.0, py - a.1);
    let len_sq = vx * vx + vy * vy;
    if len_sq <= f32::EPSILON {
        return wx * wx + wy * wy;
    }
    let t = ((wx * vx + wy * vy) / len_sq).clamp(0.0, 1.0);
    let dx = px - (a.0 + vx * t);
    let dy = py - (a.1 + vy * t);
    dx * dx + dy * dy
}

/// Stroke a segment `width` pixels wide with round caps (a capsule).
/// Each pixel is composited once, so translucent colors don't double up along the line.
pub fn stroke_segment(
    buf: &mut PixelBuffer,
    from: (f32, f32),
    to: (f32, f32),
    width: f32,
    color: Rgba,
    mode: CompositeMode,
) {
    let r = (width / 2.0).max(MIN_RADIUS);
    let r2 = r * r;

    let (x0, x1) = pixel_span(from.0.min(to.0) - r, from.0.max(to.0) + r);
    let (y0, y1) = pixel_span(from.1.min(to.1) - r, from.1.max(to.1) + r);
    let (x0, x1) = (x0.max(0), x1.min(buf.width as i32 - 1));
    let (y0, y1) = (y0.max(0), y1.min(buf.height as i32 - 1));

    for y in y0..=y1 {
        for x in x0..=x1 {
            if point_segment_distance_sq(x as f32 + 0.5, y as f32 + 0.5, from, to) <= r2 {
                blend_at(buf, x, y, color, mode);
            }
        }
    }
}

/// Render one logged sample: the round dab, then the joint from its predecessor
/// in the same stroke (if any). Shared by incremental painting and replay.
pub fn render_point(buf: &mut PixelBuffer, prev: Option<&StrokePoint>, point: &StrokePoint) {
    fill_circle(buf, point.x, point.y, point.radius(), point.color, point.mode);
    if let Some(prev) = prev {
        stroke_segment(
            buf,
            (prev.x, prev.y),
            (point.x, point.y),
            point.diameter as f32,
            point.color,
            point.mode,
        );
    }
}
