//! Correlation matrix heatmap.

use correla_core::{CorrelaError, CorrelationMatrix, HEATMAP_FILE};
use image::RgbImage;

use super::blank;
use crate::ImageConfig;
use crate::canvas::draw_filled_rect;
use crate::colors;

/// Square cell layout centred in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    left: u32,
    top: u32,
    cell: u32,
}

impl Grid {
    fn fit(config: &ImageConfig, n: usize) -> Result<Self, CorrelaError> {
        let side = config
            .width
            .min(config.height)
            .saturating_sub(2 * config.margin);
        let cell = u32::try_from(n).map_or(0, |n| side / n.max(1));
        if n == 0 || cell < 2 {
            return Err(CorrelaError::render(
                HEATMAP_FILE,
                format!("cannot fit {n} columns into a {side}px square"),
            ));
        }
        let used = cell * u32::try_from(n).unwrap_or(u32::MAX);
        Ok(Self {
            left: (config.width - used) / 2,
            top: (config.height - used) / 2,
            cell,
        })
    }

    /// Top-left pixel of the cell at row `i`, column `j`.
    #[must_use]
    pub const fn origin(&self, i: u32, j: u32) -> (u32, u32) {
        (self.left + j * self.cell, self.top + i * self.cell)
    }

    /// Cell edge length in pixels.
    #[must_use]
    pub const fn cell(&self) -> u32 {
        self.cell
    }
}

/// Paint every matrix cell; undefined correlations get a neutral grey.
///
/// # Errors
/// Returns `Render` for an empty matrix or one too large for the image.
pub fn draw(config: &ImageConfig, matrix: &CorrelationMatrix) -> Result<RgbImage, CorrelaError> {
    let grid = Grid::fit(config, matrix.len())?;
    let mut img = blank(config);

    // one pixel of background between cells
    let fill = grid.cell - 1;
    for (i, row) in (0u32..).zip(matrix.rows()) {
        for (j, value) in (0u32..).zip(row) {
            let color = value.map_or(colors::UNDEFINED, colors::coolwarm);
            let (x, y) = grid.origin(i, j);
            draw_filled_rect(&mut img, x, y, fill, fill, color);
        }
    }
    Ok(img)
}

/// Layout `draw` uses for a matrix of `n` columns.
///
/// # Errors
/// Same conditions as [`draw`].
pub fn layout(config: &ImageConfig, n: usize) -> Result<Grid, CorrelaError> {
    Grid::fit(config, n)
}
