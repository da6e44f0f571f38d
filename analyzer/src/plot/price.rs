//! Time-axis charts: price with moving averages, volume, monthly close and
//! the two-stock comparison

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use plotters::prelude::*;
use shared::ArtifactStore;

use crate::data::PriceFrame;
use crate::error::Result;
use crate::features::{ma_column, CLOSE, MA_PERIODS};
use crate::plot::{date_label, day_offset, padded_range, segments, suffix, FONT, PALETTE};
use crate::resample::monthly_last;

const VOLUME: &str = "Volume";

/// One labelled line on a time chart
pub struct Line<'a> {
    pub label: &'a str,
    pub xs: Vec<f64>,
    pub ys: Vec<Option<f64>>,
    pub color: RGBColor,
    pub markers: bool,
}

impl<'a> Line<'a> {
    pub fn new(label: &'a str, xs: Vec<f64>, ys: Vec<Option<f64>>, color: RGBColor) -> Self {
        Self {
            label,
            xs,
            ys,
            color,
            markers: false,
        }
    }

    pub fn with_markers(mut self) -> Self {
        self.markers = true;
        self
    }
}

/// Axis titles and legend switch for [`draw_time_chart`]
#[derive(Debug, Default, Clone, Copy)]
pub struct Axes<'a> {
    pub x_desc: Option<&'a str>,
    pub y_desc: Option<&'a str>,
    pub legend: bool,
}

/// Render lines against a date axis whose x values are day offsets from
/// `origin`.
pub fn draw_time_chart(
    path: &Path,
    size: (u32, u32),
    title: &str,
    origin: NaiveDateTime,
    lines: &[Line<'_>],
    axes: Axes<'_>,
) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let x_range = padded_range(lines.iter().flat_map(|l| l.xs.iter().copied()));
    let y_range = padded_range(lines.iter().flat_map(|l| l.ys.iter().flatten().copied()));

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    let fmt = |x: &f64| date_label(origin, *x);
    let mut mesh = chart.configure_mesh();
    mesh.x_labels(8)
        .x_label_formatter(&fmt)
        .light_line_style(BLACK.mix(0.05));
    if let Some(desc) = axes.x_desc {
        mesh.x_desc(desc);
    }
    if let Some(desc) = axes.y_desc {
        mesh.y_desc(desc);
    }
    mesh.draw()?;

    for line in lines {
        let color = line.color;
        for (i, seg) in segments(&line.xs, &line.ys).into_iter().enumerate() {
            if line.markers {
                chart.draw_series(seg.iter().map(|&p| Circle::new(p, 3, color.filled())))?;
            }
            let anno = chart.draw_series(LineSeries::new(seg, color.stroke_width(1)))?;
            if i == 0 {
                anno.label(line.label)
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            }
        }
    }

    if axes.legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn offsets(frame: &PriceFrame, origin: NaiveDateTime) -> Vec<f64> {
    frame.index().iter().map(|d| day_offset(origin, *d)).collect()
}

/// Close with MA_20, MA_50 and MA_200 overlaid
pub fn plot_price_and_ma(frame: &PriceFrame, stock: &str, store: &ArtifactStore) -> Result<Option<PathBuf>> {
    let (close, origin) = match (frame.values(CLOSE), frame.first_date()) {
        (Some(close), Some(origin)) => (close, origin),
        _ => return Ok(None),
    };
    let xs = offsets(frame, origin);

    let ma_names: Vec<String> = MA_PERIODS.iter().map(|p| ma_column(*p)).collect();
    let mut lines = vec![Line::new(CLOSE, xs.clone(), close.to_vec(), PALETTE[0])];
    for (i, name) in ma_names.iter().enumerate() {
        if let Some(values) = frame.values(name) {
            lines.push(Line::new(name, xs.clone(), values.to_vec(), PALETTE[i + 1]));
        }
    }

    let path = store.plot_path(stock, suffix::PRICE_MA);
    draw_time_chart(
        &path,
        (1200, 600),
        &format!("{} Close Price and Moving Averages", stock),
        origin,
        &lines,
        Axes {
            x_desc: Some("Date"),
            y_desc: Some("Price"),
            legend: true,
        },
    )?;
    Ok(Some(path))
}

/// Daily volume bars
pub fn plot_volume(frame: &PriceFrame, stock: &str, store: &ArtifactStore) -> Result<Option<PathBuf>> {
    let (volume, origin) = match (frame.values(VOLUME), frame.first_date()) {
        (Some(volume), Some(origin)) => (volume, origin),
        _ => return Ok(None),
    };
    let xs = offsets(frame, origin);
    let path = store.plot_path(stock, suffix::VOLUME);

    {
        let root = BitMapBackend::new(&path, (1200, 300)).into_drawing_area();
        root.fill(&WHITE)?;

        let top = volume.iter().flatten().copied().fold(0.0_f64, f64::max);
        let x_end = xs.last().copied().unwrap_or(0.0) + 1.0;
        let mut chart = ChartBuilder::on(&root)
            .caption(format!("{} Volume", stock), (FONT, 18))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(70)
            .build_cartesian_2d(0.0..x_end, 0.0..(top * 1.05).max(1.0))?;

        let fmt = |x: &f64| date_label(origin, *x);
        chart
            .configure_mesh()
            .x_labels(8)
            .x_label_formatter(&fmt)
            .x_desc("Date")
            .disable_x_mesh()
            .draw()?;

        chart.draw_series(xs.iter().zip(volume).filter_map(|(x, v)| {
            v.map(|v| Rectangle::new([(*x, 0.0), (*x + 1.0, v)], PALETTE[0].filled()))
        }))?;

        root.present()?;
    }
    Ok(Some(path))
}

/// Last close of each calendar month
pub fn plot_monthly_close(frame: &PriceFrame, stock: &str, store: &ArtifactStore) -> Result<Option<PathBuf>> {
    let close = match frame.values(CLOSE) {
        Some(close) => close,
        None => return Ok(None),
    };
    let monthly = monthly_last(frame.index(), close);
    let origin = match monthly.first().and_then(|(d, _)| d.and_hms_opt(0, 0, 0)) {
        Some(origin) => origin,
        None => return Ok(None),
    };

    let xs = monthly
        .iter()
        .filter_map(|(d, _)| d.and_hms_opt(0, 0, 0))
        .map(|d| day_offset(origin, d))
        .collect();
    let ys = monthly.iter().map(|(_, v)| *v).collect();
    let lines = [Line::new(CLOSE, xs, ys, PALETTE[0]).with_markers()];

    let path = store.plot_path(stock, suffix::MONTHLY_CLOSE);
    draw_time_chart(
        &path,
        (1200, 500),
        &format!("{} Monthly Close (last trading day of month)", stock),
        origin,
        &lines,
        Axes::default(),
    )?;
    Ok(Some(path))
}

/// Both stocks' Close on one date axis, written as `<a>_vs_<b>.png`
pub fn plot_comparison(
    a: &PriceFrame,
    b: &PriceFrame,
    label_a: &str,
    label_b: &str,
    store: &ArtifactStore,
) -> Result<Option<PathBuf>> {
    let (close_a, close_b) = match (a.values(CLOSE), b.values(CLOSE)) {
        (Some(ca), Some(cb)) => (ca, cb),
        _ => return Ok(None),
    };
    let origin = match (a.first_date(), b.first_date()) {
        (Some(da), Some(db)) => da.min(db),
        _ => return Ok(None),
    };

    let lines = [
        Line::new(label_a, offsets(a, origin), close_a.to_vec(), PALETTE[0]),
        Line::new(label_b, offsets(b, origin), close_b.to_vec(), PALETTE[1]),
    ];

    let path = store.plot_path(label_a, &format!("vs_{}", label_b));
    draw_time_chart(
        &path,
        (1200, 600),
        &format!("{} vs {} Close Price", label_a, label_b),
        origin,
        &lines,
        Axes {
            x_desc: Some("Date"),
            y_desc: Some("Price"),
            legend: true,
        },
    )?;
    Ok(Some(path))
}
