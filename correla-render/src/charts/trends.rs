//! Metric trends over time on a shared value axis.

use correla_core::{AlignedTable, CorrelaError, TRENDS_FILE};
use image::RgbImage;

use super::{blank, lookup, plot_area};
use crate::ImageConfig;
use crate::canvas::{ValueRange, draw_line, draw_marker};
use crate::colors;

/// Horizontal position of each row, proportional to elapsed days.
fn date_fractions(table: &AlignedTable) -> Vec<f64> {
    let dates = table.dates();
    let (Some(first), Some(last)) = (dates.iter().min(), dates.iter().max()) else {
        return Vec::new();
    };
    let span = (*last - *first).num_days();
    dates
        .iter()
        .map(|d| {
            if span == 0 {
                0.5
            } else {
                (*d - *first).num_days() as f64 / span as f64
            }
        })
        .collect()
}

/// Draw one marked polyline per column. A missing cell breaks its line.
///
/// # Errors
/// Returns `Render` if a column is unknown or none of them has a value.
pub fn draw(
    config: &ImageConfig,
    table: &AlignedTable,
    columns: &[String],
) -> Result<RgbImage, CorrelaError> {
    let plotted = columns
        .iter()
        .map(|label| lookup(table, label, TRENDS_FILE))
        .collect::<Result<Vec<_>, _>>()?;
    let area = plot_area(config, TRENDS_FILE)?;
    let range = ValueRange::covering(plotted.iter().flat_map(|c| c.values.iter().flatten().copied()))
        .ok_or_else(|| CorrelaError::render(TRENDS_FILE, "no values to plot"))?;

    let xs = date_fractions(table);
    let mut img = blank(config);
    area.draw_axes(&mut img, config.axis_color);
    for fx in &xs {
        area.draw_x_tick(&mut img, *fx, config.axis_color);
    }

    for (column, color) in plotted.iter().zip(colors::SERIES.iter().cycle()) {
        let mut prev = None;
        for (fx, cell) in xs.iter().zip(&column.values) {
            let Some(v) = *cell else {
                prev = None;
                continue;
            };
            let at = area.point(*fx, range.fraction(v));
            if let Some(from) = prev {
                draw_line(&mut img, from, at, *color);
            }
            draw_marker(&mut img, at, config.marker_radius, *color);
            prev = Some(at);
        }
    }
    Ok(img)
}
