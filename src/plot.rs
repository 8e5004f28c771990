//! SVG rendering of the East/North/Up displacement series as three
//! time-aligned scatter panels.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::enuplot_errors::EnuplotError;
use crate::series::EnuSeries;

const PANEL_SIZE: (u32, u32) = (1_000, 750);
const POINT_SIZE: i32 = 2;

/// Render a displacement series as one SVG with three stacked scatter panels
/// (East, North, Up against second of week).
///
/// Arguments
/// ---------
/// * `series`: the displacement series to draw
/// * `path`: output SVG path
/// * `title`: caption of the top panel, typically the station or file name
///
/// Return
/// ------
/// * `Ok(())` once the file is written, [`EnuplotError::Rendering`] if the
///   backend fails.
pub fn scatter_panels_svg(
    series: &EnuSeries,
    path: &Path,
    title: &str,
) -> Result<(), EnuplotError> {
    let root = SVGBackend::new(path, PANEL_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let panels = root.split_evenly((3, 1));
    let components = [
        ("East (m)", series.east_series()),
        ("North (m)", series.north_series()),
        ("Up (m)", series.up_series()),
    ];

    for (index, (panel, (label, points))) in panels.iter().zip(components.iter()).enumerate() {
        let caption = if index == 0 { Some(title) } else { None };
        let x_label = if index == components.len() - 1 {
            Some("Second of week (s)")
        } else {
            None
        };
        draw_panel(panel, caption, label, x_label, points)?;
    }

    root.present().map_err(render_error)?;
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<SVGBackend, Shift>,
    caption: Option<&str>,
    y_label: &str,
    x_label: Option<&str>,
    points: &[(f64, f64)],
) -> Result<(), EnuplotError> {
    let (x_range, y_range) = padded_ranges(points);

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60);
    if let Some(caption) = caption {
        builder.caption(caption, ("sans-serif", 20));
    }
    let mut chart = builder
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
        .map_err(render_error)?;

    let mut mesh = chart.configure_mesh();
    mesh.y_desc(y_label);
    if let Some(x_label) = x_label {
        mesh.x_desc(x_label);
    }
    mesh.draw().map_err(render_error)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), POINT_SIZE, BLUE.filled())),
        )
        .map_err(render_error)?;

    Ok(())
}

fn padded_ranges(points: &[(f64, f64)]) -> ((f64, f64), (f64, f64)) {
    if points.is_empty() {
        return ((-1.0, 1.0), (-1.0, 1.0));
    }
    let (mut x_min, mut x_max) = extent(points.iter().map(|p| p.0));
    let (mut y_min, mut y_max) = extent(points.iter().map(|p| p.1));
    let x_pad = (x_max - x_min).abs() * 0.05 + 1e-6;
    let y_pad = (y_max - y_min).abs() * 0.1 + 1e-6;
    x_min -= x_pad;
    x_max += x_pad;
    y_min -= y_pad;
    y_max += y_pad;
    ((x_min, x_max), (y_min, y_max))
}

fn extent(iter: impl Iterator<Item = f64>) -> (f64, f64) {
    iter.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

fn render_error<E: std::fmt::Display>(error: E) -> EnuplotError {
    EnuplotError::Rendering(error.to_string())
}
