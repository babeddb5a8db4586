//! Chart rendering over result tables: a performance line graph across
//! files, a log-log ciphertext size graph and a setup-time bar chart. All
//! charts are written as SVG files.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::drivers::SETUP_ROW;
use crate::error::BenchError;
use crate::results::Table;

/// Per-series colors of the line charts.
const SERIES_COLORS: [RGBColor; 5] = [
    RGBColor(0xe4, 0x1a, 0x1c),
    RGBColor(0x37, 0x7e, 0xb8),
    RGBColor(0x4d, 0xaf, 0x4a),
    RGBColor(0x98, 0x4e, 0xa3),
    RGBColor(0xff, 0x7f, 0x00),
];

fn series_color(position: usize) -> RGBColor {
    SERIES_COLORS[position % SERIES_COLORS.len()]
}

/// Per-library bar colors, one color per benchmarked library. Unknown
/// libraries fall back to gray.
fn library_color(label: &str) -> RGBColor {
    let library = label
        .split(|separator: char| separator == '_' || separator == ' ')
        .next()
        .unwrap_or("");
    match library {
        "charm" => RGBColor(0x00, 0x3a, 0x7d),
        "circl" => RGBColor(0x00, 0x8d, 0xff),
        "gofe" => RGBColor(0xd8, 0x30, 0x34),
        "openabe" => RGBColor(0xc7, 0x01, 0xff),
        "rabe" => RGBColor(0x4e, 0xcb, 0x8d),
        _ => RGBColor(0x88, 0x88, 0x88),
    }
}

fn file_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("?")
        .to_string()
}

fn draw_error<E: std::fmt::Display>(error: E) -> BenchError {
    BenchError::new(&format!("chart rendering failed: {}", error))
}

/// Plots the `column` operation over the attribute count for every result
/// table in `files` that carries the column; files without it are skipped,
/// as are rows whose key is not numeric (composite keys, setup rows).
pub fn performance_chart(
    files: &[PathBuf],
    column: &str,
    output: &Path,
) -> Result<(), BenchError> {
    let mut series: Vec<(String, Vec<(f64, f64)>)> = Vec::new();
    for file in files {
        let table = Table::load(file)?;
        let points = table.numeric_series(column);
        if points.is_empty() {
            continue;
        }
        series.push((file_label(file), points));
    }
    if series.is_empty() {
        return Err(BenchError::new(&format!(
            "none of the input files carries a {:?} column",
            column
        )));
    }

    let x_max = axis_max(series.iter().flat_map(|(_, points)| points).map(|point| point.0));
    let y_max = axis_max(series.iter().flat_map(|(_, points)| points).map(|point| point.1));

    let root = SVGBackend::new(output, (700, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(64)
        .build_cartesian_2d(0.0..x_max * 1.05, 0.0..y_max * 1.1)
        .map_err(draw_error)?;
    chart
        .configure_mesh()
        .x_desc("Number of Attributes")
        .y_desc("Time [s]")
        .draw()
        .map_err(draw_error)?;

    for (position, (label, points)) in series.iter().enumerate() {
        let color = series_color(position);
        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
            .map_err(draw_error)?
            .label(label.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
        chart
            .draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), 3, color.filled())))
            .map_err(draw_error)?;
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(draw_error)?;
    root.present().map_err(draw_error)?;
    Ok(())
}

/// Plots hybrid ciphertext size over plaintext size on log-log axes for the
/// row keyed `row` of every storage table in `files`, together with the
/// `y = x` plaintext size diagonal. Tables without hybrid columns fall back
/// to their `single` columns.
pub fn size_chart(files: &[PathBuf], row: &str, output: &Path) -> Result<(), BenchError> {
    let mut series: Vec<(String, Vec<(f64, f64)>)> = Vec::new();
    for file in files {
        let table = Table::load(file)?;
        let mut points = byte_columns(&table, row, "hybrid");
        if points.is_empty() {
            points = byte_columns(&table, row, "single");
        }
        if points.is_empty() {
            continue;
        }
        series.push((file_label(file), points));
    }
    if series.is_empty() {
        return Err(BenchError::new(&format!(
            "none of the input files carries size columns for row {:?}",
            row
        )));
    }

    let x_max = axis_max(series.iter().flat_map(|(_, points)| points).map(|point| point.0));
    let y_max = axis_max(series.iter().flat_map(|(_, points)| points).map(|point| point.1));

    let root = SVGBackend::new(output, (700, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(72)
        .build_cartesian_2d(
            (1.0..x_max * 2.0).log_scale(),
            (1.0..y_max * 2.0).log_scale(),
        )
        .map_err(draw_error)?;
    chart
        .configure_mesh()
        .x_desc("Plaintext Size [bytes]")
        .y_desc("Ciphertext Size [bytes]")
        .draw()
        .map_err(draw_error)?;

    // plaintext size reference diagonal
    chart
        .draw_series(LineSeries::new(vec![(1.0, 1.0), (x_max, x_max)], &RED))
        .map_err(draw_error)?
        .label("plaintext size")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], &RED));

    for (position, (label, points)) in series.iter().enumerate() {
        let color = series_color(position);
        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
            .map_err(draw_error)?
            .label(label.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
        chart
            .draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), 3, color.filled())))
            .map_err(draw_error)?;
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(draw_error)?;
    root.present().map_err(draw_error)?;
    Ok(())
}

/// One bar per result table showing its setup time in milliseconds, sorted
/// descending, value labels above the bars.
pub fn startup_chart(files: &[PathBuf], output: &Path) -> Result<(), BenchError> {
    let mut bars: Vec<(String, f64)> = Vec::new();
    for file in files {
        let table = Table::load(file)?;
        if let Some(cell) = table.get(SETUP_ROW, "setup") {
            if let Ok(seconds) = cell.parse::<f64>() {
                bars.push((file_label(file), seconds * 1_000.0));
            }
        }
    }
    if bars.is_empty() {
        return Err(BenchError::new("none of the input files carries a setup measurement"));
    }
    bars.sort_by(|left, right| right.1.partial_cmp(&left.1).unwrap());

    let y_max = axis_max(bars.iter().map(|bar| bar.1)) * 1.2;
    let count = bars.len();

    let root = SVGBackend::new(output, (700, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(12)
        .x_label_area_size(72)
        .y_label_area_size(64)
        .build_cartesian_2d(-0.5..count as f64 - 0.5, 0.0..y_max)
        .map_err(draw_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(count)
        .x_label_formatter(&|x| {
            let position = x.round();
            if position < 0.0 || (x - position).abs() > 0.01 {
                return String::new();
            }
            bars.get(position as usize)
                .map(|bar| bar.0.clone())
                .unwrap_or_default()
        })
        .y_desc("Time [ms]")
        .draw()
        .map_err(draw_error)?;

    chart
        .draw_series(bars.iter().enumerate().map(|(position, (label, value))| {
            Rectangle::new(
                [(position as f64 - 0.35, 0.0), (position as f64 + 0.35, *value)],
                library_color(label).filled(),
            )
        }))
        .map_err(draw_error)?;

    let value_style = TextStyle::from(("sans-serif", 12).into_font())
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart
        .draw_series(bars.iter().enumerate().map(|(position, (_, value))| {
            Text::new(
                format!("{:.2}", value),
                (position as f64, *value + y_max * 0.01),
                value_style.clone(),
            )
        }))
        .map_err(draw_error)?;

    root.present().map_err(draw_error)?;
    Ok(())
}

/// `(plaintext bytes, cell value)` pairs of the `prefix <bytes>` columns of
/// one row, ordered by plaintext size.
fn byte_columns(table: &Table, row: &str, prefix: &str) -> Vec<(f64, f64)> {
    let mut points: Vec<(f64, f64)> = table
        .row_cells(row)
        .iter()
        .filter_map(|(header, cell)| {
            let rest = header.strip_prefix(prefix)?;
            let x: f64 = rest.trim().parse().ok()?;
            let y: f64 = cell.parse().ok()?;
            Some((x, y))
        })
        .collect();
    points.sort_by(|left, right| left.0.partial_cmp(&right.0).unwrap());
    points
}

/// Largest finite value of the iterator, clamped to at least 1.0 so axis
/// ranges stay non-degenerate.
fn axis_max(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(1.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::update_csv;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("abe_bench_plot_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn svg_written(path: &Path) {
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("<svg"), "no svg content in {:?}", path);
    }

    #[test]
    fn renders_a_performance_chart() {
        let dir = temp_dir("performance");
        let first = dir.join("rabe_bsw07.csv");
        let second = dir.join("rabe_fame.csv");
        let _ = fs::remove_file(&first);
        let _ = fs::remove_file(&second);
        for (count, value) in &[("1", "0.01"), ("5", "0.05"), ("10", "0.11")] {
            update_csv(&first, count, "and encrypt", value).unwrap();
            update_csv(&second, count, "and encrypt", value).unwrap();
        }
        // a file without the column is skipped, not an error
        let third = dir.join("rabe_mke08.csv");
        let _ = fs::remove_file(&third);
        update_csv(&third, "1", "keygen", "0.2").unwrap();

        let output = dir.join("and_encrypt.svg");
        performance_chart(&[first, second, third], "and encrypt", &output).unwrap();
        svg_written(&output);
    }

    #[test]
    fn performance_chart_without_matching_columns_is_an_error() {
        let dir = temp_dir("performance_empty");
        let file = dir.join("rabe_bsw07.csv");
        let _ = fs::remove_file(&file);
        update_csv(&file, "1", "keygen", "0.2").unwrap();

        let output = dir.join("missing.svg");
        assert!(performance_chart(&[file], "and encrypt", &output).is_err());
    }

    #[test]
    fn renders_a_size_chart() {
        let dir = temp_dir("sizes");
        let file = dir.join("rabe_bsw07_ct.csv");
        let _ = fs::remove_file(&file);
        for step in 0..8u32 {
            let plaintext = 1u64 << step;
            update_csv(
                &file,
                "10",
                &format!("hybrid {}", plaintext),
                &(plaintext + 1400).to_string(),
            )
            .unwrap();
        }

        let output = dir.join("sizes.svg");
        size_chart(&[file], "10", &output).unwrap();
        svg_written(&output);
    }

    #[test]
    fn renders_a_startup_chart() {
        let dir = temp_dir("startup");
        let first = dir.join("rabe_bsw07.csv");
        let second = dir.join("gofe_fame.csv");
        let _ = fs::remove_file(&first);
        let _ = fs::remove_file(&second);
        update_csv(&first, SETUP_ROW, "setup", "0.012").unwrap();
        update_csv(&second, SETUP_ROW, "setup", "0.045").unwrap();

        let output = dir.join("startup.svg");
        startup_chart(&[first, second], &output).unwrap();
        svg_written(&output);
    }
}
