//! Palette constants and continuous colour ramps.

use image::Rgb;

/// Default background.
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
/// Fallback for an empty ramp.
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
/// Default axis colour.
pub const DARK_GRAY: Rgb<u8> = Rgb([60, 60, 60]);
/// Fill for matrix cells whose correlation is undefined.
pub const UNDEFINED: Rgb<u8> = Rgb([128, 128, 128]);

/// Line colours for trend series, cycled in drawing order.
pub const SERIES: [Rgb<u8>; 6] = [
    Rgb([31, 119, 180]),
    Rgb([255, 127, 14]),
    Rgb([44, 160, 44]),
    Rgb([214, 39, 40]),
    Rgb([148, 103, 189]),
    Rgb([140, 86, 75]),
];

const VIRIDIS: [Rgb<u8>; 5] = [
    Rgb([68, 1, 84]),
    Rgb([59, 82, 139]),
    Rgb([33, 145, 140]),
    Rgb([94, 201, 98]),
    Rgb([253, 231, 37]),
];

const COOLWARM: [Rgb<u8>; 3] = [Rgb([59, 76, 192]), Rgb([221, 221, 221]), Rgb([180, 4, 38])];

/// Interpolate between two colors
pub fn interpolate_color(c1: Rgb<u8>, c2: Rgb<u8>, t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| ((1.0 - t).mul_add(f64::from(a), t * f64::from(b))) as u8;
    Rgb([
        mix(c1.0[0], c2.0[0]),
        mix(c1.0[1], c2.0[1]),
        mix(c1.0[2], c2.0[2]),
    ])
}

/// Piecewise-linear ramp over evenly spaced stops.
fn ramp(stops: &[Rgb<u8>], t: f64) -> Rgb<u8> {
    match stops {
        [] => BLACK,
        [only] => *only,
        _ => {
            let scaled = t.clamp(0.0, 1.0) * (stops.len() - 1) as f64;
            let i = (scaled.floor() as usize).min(stops.len() - 2);
            interpolate_color(stops[i], stops[i + 1], scaled - i as f64)
        }
    }
}

/// Sequential ramp for `t` in `[0, 1]`, dark purple to yellow.
pub fn viridis(t: f64) -> Rgb<u8> {
    ramp(&VIRIDIS, t)
}

/// Diverging ramp for a correlation in `[-1, 1]`: blue, neutral at 0, red.
pub fn coolwarm(r: f64) -> Rgb<u8> {
    ramp(&COOLWARM, (r + 1.0) / 2.0)
}
