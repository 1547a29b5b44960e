//! One module per chart kind. Each draws into a fresh image sized by [`ImageConfig`].

pub mod heatmap;
pub mod scatter;
pub mod trends;

use correla_core::{AlignedTable, Column, CorrelaError};
use image::RgbImage;

use crate::ImageConfig;
use crate::canvas::PlotArea;

fn blank(config: &ImageConfig) -> RgbImage {
    RgbImage::from_pixel(config.width, config.height, config.background)
}

fn plot_area(config: &ImageConfig, file: &str) -> Result<PlotArea, CorrelaError> {
    PlotArea::inset(config.width, config.height, config.margin).ok_or_else(|| {
        CorrelaError::render(
            file,
            format!(
                "{}x{} image leaves no room inside a {}px margin",
                config.width, config.height, config.margin
            ),
        )
    })
}

fn lookup<'t>(table: &'t AlignedTable, label: &str, file: &str) -> Result<&'t Column, CorrelaError> {
    table
        .column(label)
        .ok_or_else(|| CorrelaError::render(file, format!("unknown column '{label}'")))
}
