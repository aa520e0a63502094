use crate::error::{Error, Result};
use crate::signal::{Buffer, Signal};
use crate::sweep::Response;

use plotters::prelude::*;
use std::error::Error as StdError;
use std::ops::Range;
use std::path::Path;

pub const SIZE: (u32, u32) = (800, 600);

struct Axes<'a> {
    caption: &'a str,
    x: &'a str,
    y: &'a str,
    series: &'a str,
}

fn extent<I>(values: I) -> Range<f64> where I: Iterator<Item=f64> {
    let mut range = std::f64::INFINITY..std::f64::NEG_INFINITY;
    for v in values {
        if v < range.start {
            range.start = v;
        }
        if v > range.end {
            range.end = v;
        }
    }
    // flat data still needs some height
    if range.end - range.start < 1e-12 {
        range.start -= 0.5;
        range.end += 0.5;
    }
    range
}

fn marker_label(threshold: f64, frequency: f64) -> String {
    format!("{} dB at {:.4}", threshold, frequency)
}

/// Draw the response curve, in dB against frequency, to a bitmap file.
///
/// Silent points (negative infinity) are left out. A vertical marker goes
/// at the first frequency whose level falls to `threshold` dB, if any does.
pub fn response<P>(path: P, response: &Response, threshold: f64) -> Result<()>
where
    P: AsRef<Path>,
{
    let data: Vec<(f64, f64)> = response.points().iter()
        .filter(|p| p.db.is_finite())
        .map(|p| (p.frequency, p.db))
        .collect();
    if data.is_empty() {
        return Err(Error::Plot("no finite points to draw".to_owned()));
    }
    let marker = response.bandwidth(threshold)
        .map(|f| (f, marker_label(threshold, f)));
    let axes = Axes {
        caption: "Amplitude versus Frequency",
        x: "frequency",
        y: "dB",
        series: "response",
    };
    draw(path.as_ref(), &axes, &data, marker)
        .map_err(|e| Error::Plot(e.to_string()))
}

/// Draw a filtered signal against time in seconds. With `span` set, only
/// that many leading seconds are drawn.
pub fn trace<P>(path: P, signal: &Buffer<f64>, span: Option<f64>) -> Result<()>
where
    P: AsRef<Path>,
{
    let data: Vec<(f64, f64)> = match span {
        Some(seconds) => signal.signal().take(seconds).enumerate().collect(),
        None => signal.signal().enumerate().collect(),
    };
    if data.is_empty() {
        return Err(Error::Plot("no samples to draw".to_owned()));
    }
    let axes = Axes {
        caption: "Filtered Signal",
        x: "time",
        y: "amplitude",
        series: "filtered",
    };
    draw(path.as_ref(), &axes, &data, None)
        .map_err(|e| Error::Plot(e.to_string()))
}

fn draw(path: &Path, axes: &Axes, data: &[(f64, f64)],
        marker: Option<(f64, String)>)
        -> std::result::Result<(), Box<dyn StdError>>
{
    let x = extent(data.iter().map(|p| p.0));
    let y = extent(data.iter().map(|p| p.1));

    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(axes.caption, ("sans-serif", 30).into_font())
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(x, y.clone())?;

    chart.configure_mesh()
        .x_desc(axes.x)
        .y_desc(axes.y)
        .draw()?;

    chart.draw_series(LineSeries::new(data.iter().cloned(), &BLUE))?
        .label(axes.series)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    if let Some((f, label)) = marker {
        chart.draw_series(LineSeries::new(vec![(f, y.start), (f, y.end)], &RED))?
            .label(label)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
    }

    chart.configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
