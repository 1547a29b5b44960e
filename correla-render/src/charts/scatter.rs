//! Scatter of one column against another, coloured by year.

use chrono::Datelike;
use correla_core::{AlignedTable, CorrelaError, SCATTER_FILE};
use image::RgbImage;

use super::{blank, lookup, plot_area};
use crate::ImageConfig;
use crate::canvas::{ValueRange, draw_marker};
use crate::colors;

/// Draw `y` against `x` for every row where both are present.
///
/// # Errors
/// Returns `Render` if a column is unknown or no row has both values.
pub fn draw(
    config: &ImageConfig,
    table: &AlignedTable,
    x: &str,
    y: &str,
) -> Result<RgbImage, CorrelaError> {
    let xs = lookup(table, x, SCATTER_FILE)?;
    let ys = lookup(table, y, SCATTER_FILE)?;
    let area = plot_area(config, SCATTER_FILE)?;

    let points: Vec<(i32, f64, f64)> = table
        .dates()
        .iter()
        .zip(xs.values.iter().zip(&ys.values))
        .filter_map(|(d, (a, b))| Some((d.year(), (*a)?, (*b)?)))
        .collect();
    if points.is_empty() {
        return Err(CorrelaError::render(
            SCATTER_FILE,
            format!("no rows with both '{x}' and '{y}'"),
        ));
    }

    let (Some(x_range), Some(y_range)) = (
        ValueRange::covering(points.iter().map(|p| p.1)),
        ValueRange::covering(points.iter().map(|p| p.2)),
    ) else {
        return Err(CorrelaError::render(SCATTER_FILE, "no finite values"));
    };

    let first_year = points.iter().map(|p| p.0).min().unwrap_or_default();
    let last_year = points.iter().map(|p| p.0).max().unwrap_or_default();
    let year_span = f64::from((last_year - first_year).max(1));

    let mut img = blank(config);
    area.draw_axes(&mut img, config.axis_color);
    for (year, a, b) in points {
        let shade = colors::viridis(f64::from(year - first_year) / year_span);
        let at = area.point(x_range.fraction(a), y_range.fraction(b));
        draw_marker(&mut img, at, config.marker_radius + 1, config.axis_color);
        draw_marker(&mut img, at, config.marker_radius, shade);
    }
    Ok(img)
}
