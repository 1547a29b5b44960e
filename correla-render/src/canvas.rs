//! Pixel primitives and the value-to-pixel mapping shared by the charts.

use image::{Rgb, RgbImage};

/// Set one pixel, ignoring coordinates outside the image.
pub fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    let (Ok(px), Ok(py)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if px < img.width() && py < img.height() {
        img.put_pixel(px, py, color);
    }
}

/// Helper function to draw a filled rectangle
pub fn draw_filled_rect(
    img: &mut RgbImage,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    color: Rgb<u8>,
) {
    for dy in 0..height {
        for dx in 0..width {
            put(
                img,
                i64::from(x) + i64::from(dx),
                i64::from(y) + i64::from(dy),
                color,
            );
        }
    }
}

/// Bresenham line between two points, clipped to the image.
pub fn draw_line(img: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = (to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        put(img, x, y, color);
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

/// Filled disc centred on `c`.
pub fn draw_marker(img: &mut RgbImage, c: (i64, i64), radius: u32, color: Rgb<u8>) {
    let r = i64::from(radius);
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                put(img, c.0 + dx, c.1 + dy, color);
            }
        }
    }
}

/// Closed interval of data values mapped onto one plot axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    /// Padded range covering every finite value, or `None` if there are none.
    ///
    /// A degenerate (single-valued) range is widened so points land mid-axis.
    pub fn covering(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let (lo, hi) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;
        let span = hi - lo;
        let pad = if span > f64::EPSILON * hi.abs().max(1.0) {
            span * 0.05
        } else {
            (hi.abs() * 0.05).max(1.0)
        };
        Some(Self {
            min: lo - pad,
            max: hi + pad,
        })
    }

    /// Position of `v` inside the range, `0.0` at `min` and `1.0` at `max`.
    pub fn fraction(&self, v: f64) -> f64 {
        (v - self.min) / (self.max - self.min)
    }
}

/// Inner rectangle of the image reserved for data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotArea {
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
}

impl PlotArea {
    /// Area inset by `margin` on every side, or `None` if nothing is left.
    pub fn inset(width: u32, height: u32, margin: u32) -> Option<Self> {
        let (w, h, m) = (i64::from(width), i64::from(height), i64::from(margin));
        let area = Self {
            left: m,
            top: m,
            right: w - m - 1,
            bottom: h - m - 1,
        };
        (area.right > area.left && area.bottom > area.top).then_some(area)
    }

    /// Pixel for axis fractions; `fy = 0` is the bottom edge.
    pub fn point(&self, fx: f64, fy: f64) -> (i64, i64) {
        let x = (self.right - self.left) as f64 * fx;
        let y = (self.bottom - self.top) as f64 * fy;
        (self.left + x.round() as i64, self.bottom - y.round() as i64)
    }

    /// Left and bottom axis lines.
    pub fn draw_axes(&self, img: &mut RgbImage, color: Rgb<u8>) {
        draw_line(img, (self.left, self.top), (self.left, self.bottom), color);
        draw_line(img, (self.left, self.bottom), (self.right, self.bottom), color);
    }

    /// Short tick below the x axis at fraction `fx`.
    pub fn draw_x_tick(&self, img: &mut RgbImage, fx: f64, color: Rgb<u8>) {
        let (x, y) = self.point(fx, 0.0);
        draw_line(img, (x, y), (x, y + 4), color);
    }
}
