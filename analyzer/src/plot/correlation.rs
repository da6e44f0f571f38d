//! Correlation heatmap of price, volume and return columns

use std::path::PathBuf;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use shared::ArtifactStore;

use crate::data::PriceFrame;
use crate::error::Result;
use crate::features::DAILY_RETURN;
use crate::plot::{suffix, FONT};
use crate::stats::correlation_matrix;

pub const CORRELATION_COLUMNS: [&str; 6] = ["Open", "High", "Low", "Close", "Volume", DAILY_RETURN];

const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// Diverging blue-white-red color for a correlation in [-1, 1]
pub fn coolwarm(value: f64) -> RGBColor {
    if value.is_nan() {
        return RGBColor(255, 255, 255);
    }
    let v = value.clamp(-1.0, 1.0);
    let (from, to, t) = if v < 0.0 { (NEUTRAL, COOL, -v) } else { (NEUTRAL, WARM, v) };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

pub fn plot_correlation_heatmap(frame: &PriceFrame, stock: &str, store: &ArtifactStore) -> Result<Option<PathBuf>> {
    let (names, matrix) = correlation_matrix(frame, &CORRELATION_COLUMNS);
    if names.is_empty() {
        return Ok(None);
    }
    let n = names.len() as i32;

    let path = store.plot_path(stock, suffix::CORRELATION);
    {
        let root = BitMapBackend::new(&path, (800, 600)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(format!("{} Correlation", stock), (FONT, 18))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(100)
            .build_cartesian_2d(0i32..n, n..0i32)?;

        let (width, height) = chart.plotting_area().dim_in_pixel();
        let cell_w = (width / n as u32) as i32;
        let cell_h = (height / n as u32) as i32;

        let label = |v: &i32| names.get(*v as usize).cloned().unwrap_or_default();
        chart
            .configure_mesh()
            .x_labels(n as usize)
            .y_labels(n as usize)
            .x_label_offset(cell_w / 2)
            .y_label_offset(cell_h / 2)
            .x_label_formatter(&label)
            .y_label_formatter(&label)
            .disable_x_mesh()
            .disable_y_mesh()
            .draw()?;

        let cells: Vec<(i32, i32, f64)> = matrix
            .iter()
            .enumerate()
            .flat_map(|(row, values)| {
                values
                    .iter()
                    .enumerate()
                    .map(move |(col, v)| (col as i32, row as i32, *v))
            })
            .collect();

        chart.draw_series(
            cells
                .iter()
                .map(|&(x, y, v)| Rectangle::new([(x, y), (x + 1, y + 1)], coolwarm(v).filled())),
        )?;

        let text_style = (FONT, 14)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart.draw_series(cells.iter().map(|&(x, y, v)| {
            let annotation = if v.is_nan() { "nan".to_string() } else { format!("{:.2}", v) };
            EmptyElement::at((x, y)) + Text::new(annotation, (cell_w / 2, cell_h / 2), text_style.clone())
        }))?;

        root.present()?;
    }
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coolwarm_endpoints() {
        assert_eq!(coolwarm(0.0), RGBColor(221, 221, 221));
        assert_eq!(coolwarm(1.0), RGBColor(180, 4, 38));
        assert_eq!(coolwarm(-1.0), RGBColor(59, 76, 192));
        assert_eq!(coolwarm(5.0), coolwarm(1.0));
        assert_eq!(coolwarm(f64::NAN), RGBColor(255, 255, 255));
    }
}
