//! Four-panel seasonal decomposition chart

use std::path::PathBuf;

use chrono::NaiveDate;
use plotters::prelude::*;
use shared::ArtifactStore;
use tracing::{info, warn};

use crate::data::PriceFrame;
use crate::decompose::{decompose_with_fallback, Decomposition};
use crate::error::Result;
use crate::features::CLOSE;
use crate::plot::{date_label, padded_range, segments, suffix, FONT, PALETTE};
use crate::resample::daily_interpolated;

/// Decompose the daily-interpolated Close and draw observed, trend,
/// seasonal and residual panels.
///
/// A decomposition that fails under both models is logged and the chart is
/// skipped.
pub fn plot_seasonal_decompose(frame: &PriceFrame, stock: &str, store: &ArtifactStore) -> Result<Option<PathBuf>> {
    let close = match frame.values(CLOSE) {
        Some(close) => close,
        None => return Ok(None),
    };
    let daily = daily_interpolated(frame.index(), close);
    let series: Vec<f64> = daily.iter().map(|(_, v)| *v).collect();

    let decomposition = match decompose_with_fallback(&series) {
        Ok(d) => d,
        Err(err) => {
            warn!("Skipping seasonal decomposition for {}: {}", stock, err);
            return Ok(None);
        }
    };
    info!(
        "{}: {} decomposition with period {}",
        stock,
        decomposition.model.as_str(),
        decomposition.period
    );

    let dates: Vec<NaiveDate> = daily.iter().map(|(d, _)| *d).collect();
    let path = store.plot_path(stock, suffix::SEASONAL_DECOMPOSE);
    draw_decomposition(&path, stock, &dates, &decomposition)?;
    Ok(Some(path))
}

fn draw_decomposition(
    path: &std::path::Path,
    stock: &str,
    dates: &[NaiveDate],
    d: &Decomposition,
) -> Result<()> {
    let origin = match dates.first().and_then(|d| d.and_hms_opt(0, 0, 0)) {
        Some(origin) => origin,
        None => return Ok(()),
    };
    let xs: Vec<f64> = (0..dates.len()).map(|i| i as f64).collect();

    let root = BitMapBackend::new(path, (1000, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        &format!("{} Seasonal Decompose of Close (daily, interpolated)", stock),
        (FONT, 20),
    )?;

    let observed: Vec<Option<f64>> = d.observed.iter().map(|v| Some(*v)).collect();
    let seasonal: Vec<Option<f64>> = d.seasonal.iter().map(|v| Some(*v)).collect();
    let panels: [(&str, &[Option<f64>]); 4] = [
        ("Observed", &observed),
        ("Trend", &d.trend),
        ("Seasonal", &seasonal),
        ("Resid", &d.resid),
    ];

    let fmt = |x: &f64| date_label(origin, *x);
    for (area, (name, values)) in root.split_evenly((4, 1)).iter().zip(panels) {
        let mut chart = ChartBuilder::on(area)
            .margin(5)
            .x_label_area_size(25)
            .y_label_area_size(60)
            .build_cartesian_2d(
                padded_range(xs.iter().copied()),
                padded_range(values.iter().flatten().copied()),
            )?;
        chart
            .configure_mesh()
            .x_labels(6)
            .x_label_formatter(&fmt)
            .y_desc(name)
            .light_line_style(BLACK.mix(0.05))
            .draw()?;

        if name == "Resid" {
            chart.draw_series(
                xs.iter()
                    .zip(values.iter())
                    .filter_map(|(x, v)| v.map(|v| Circle::new((*x, v), 1, PALETTE[0].filled()))),
            )?;
        } else {
            for seg in segments(&xs, values) {
                chart.draw_series(LineSeries::new(seg, PALETTE[0].stroke_width(1)))?;
            }
        }
    }

    root.present()?;
    Ok(())
}
