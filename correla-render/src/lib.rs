//! correla-render
//!
//! PNG implementation of [`ChartRenderer`] built on the `image` crate.
//!
//! Three charts are supported, each written under its fixed file name:
//! - scatter of one column against another, points coloured by year (viridis);
//! - correlation heatmap on a diverging ramp, undefined cells in grey;
//! - metric trends on a shared value axis, lines broken at missing cells.
//!
//! Charts carry no text; axis labels and values live in the console report.
#![warn(missing_docs)]

mod canvas;
pub mod charts;
pub mod colors;

use std::path::{Path, PathBuf};

use correla_core::{Chart, ChartRenderer, CorrelaError};
use image::{Rgb, RgbImage};

/// Image configuration
#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Background fill.
    pub background: Rgb<u8>,
    /// Axis and marker outline colour.
    pub axis_color: Rgb<u8>,
    /// Empty border around the plot area, in pixels.
    pub margin: u32,
    /// Radius of point markers, in pixels.
    pub marker_radius: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: colors::WHITE,
            axis_color: colors::DARK_GRAY,
            margin: 40,
            marker_radius: 5,
        }
    }
}

/// Renders charts to PNG files.
#[derive(Debug, Clone, Default)]
pub struct PngRenderer {
    config: ImageConfig,
}

impl PngRenderer {
    /// Renderer with the default 800x600 white canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer with a custom image configuration.
    #[must_use]
    pub const fn with_config(config: ImageConfig) -> Self {
        Self { config }
    }

    /// Active image configuration.
    #[must_use]
    pub const fn config(&self) -> &ImageConfig {
        &self.config
    }

    /// Draw `chart` in memory without touching the filesystem.
    ///
    /// # Errors
    /// Returns `Render` when the chart inputs cannot be drawn.
    pub fn draw(&self, chart: &Chart<'_>) -> Result<RgbImage, CorrelaError> {
        match *chart {
            Chart::Scatter { table, x, y } => charts::scatter::draw(&self.config, table, x, y),
            Chart::Heatmap { matrix } => charts::heatmap::draw(&self.config, matrix),
            Chart::Trends { table, columns } => charts::trends::draw(&self.config, table, columns),
        }
    }
}

impl ChartRenderer for PngRenderer {
    fn name(&self) -> &'static str {
        "png"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "correla_render::render",
            skip(self, chart),
            fields(file = chart.file_name()),
        )
    )]
    fn render(&self, chart: &Chart<'_>, out_dir: &Path) -> Result<PathBuf, CorrelaError> {
        let file = chart.file_name();
        let img = self.draw(chart)?;

        std::fs::create_dir_all(out_dir)
            .map_err(|e| CorrelaError::render(file, format!("{}: {e}", out_dir.display())))?;
        let path = out_dir.join(file);
        img.save(&path)
            .map_err(|e| CorrelaError::render(file, e.to_string()))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), "chart written");
        Ok(path)
    }
}
