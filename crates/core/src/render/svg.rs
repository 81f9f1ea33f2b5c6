use std::f64::consts::PI;
use std::fmt;
use std::path::PathBuf;

use crate::errors::CoreError;
use crate::models::chart::{ChartKind, PieChart, PieSlice};
use super::ChartRenderer;

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 500.0;
const CENTER_X: f64 = 230.0;
const CENTER_Y: f64 = 250.0;
const RADIUS: f64 = 200.0;
const LEGEND_X: f64 = 460.0;

const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// Renders pie charts as SVG files in a directory.
///
/// Slices start at twelve o'clock and run clockwise. Zero-valued slices are
/// not drawn but keep their legend entry.
pub struct SvgChartRenderer {
    dir: PathBuf,
}

impl SvgChartRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path of the chart file for `kind`.
    pub fn path_for(&self, kind: ChartKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Build the SVG document for `chart`.
    pub fn to_svg(chart: &PieChart) -> String {
        SvgDocument(chart).to_string()
    }
}

/// A pie chart formatted as a standalone SVG document.
struct SvgDocument<'a>(&'a PieChart);

impl fmt::Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chart = self.0;
        let total = chart.total();
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
        )?;
        writeln!(f, "<title>{}</title>", escape(&chart.kind.to_string()))?;

        let drawn: Vec<(usize, &PieSlice)> = chart
            .slices
            .iter()
            .enumerate()
            .filter(|(_, s)| s.value > 0.0)
            .collect();

        if let [(idx, _)] = drawn.as_slice() {
            writeln!(
                f,
                r#"<circle cx="{CENTER_X}" cy="{CENTER_Y}" r="{RADIUS}" fill="{}"/>"#,
                color(*idx)
            )?;
        } else if total > 0.0 {
            let mut start = -PI / 2.0;
            for (idx, slice) in &drawn {
                let sweep = slice.value / total * 2.0 * PI;
                let end = start + sweep;
                let (x1, y1) = point_at(start);
                let (x2, y2) = point_at(end);
                let large_arc = u8::from(sweep > PI);
                writeln!(
                    f,
                    r##"<path d="M {CENTER_X} {CENTER_Y} L {x1:.3} {y1:.3} A {RADIUS} {RADIUS} 0 {large_arc} 1 {x2:.3} {y2:.3} Z" fill="{}" stroke="#ffffff" stroke-width="1"/>"##,
                    color(*idx)
                )?;
                start = end;
            }
        }

        for (idx, slice) in chart.slices.iter().enumerate() {
            let y = 40.0 + idx as f64 * 24.0;
            let pct = if total > 0.0 { slice.value / total * 100.0 } else { 0.0 };
            writeln!(
                f,
                r#"<rect x="{LEGEND_X}" y="{}" width="14" height="14" fill="{}"/>"#,
                y - 12.0,
                color(idx)
            )?;
            writeln!(
                f,
                r#"<text x="{}" y="{y}" font-family="sans-serif" font-size="14">{} ({pct:.1}%)</text>"#,
                LEGEND_X + 20.0,
                escape(&slice.label)
            )?;
        }

        writeln!(f, "</svg>")
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, kind: ChartKind, chart: Option<&PieChart>) -> Result<bool, CoreError> {
        let path = self.path_for(kind);
        match chart {
            Some(chart) => {
                std::fs::create_dir_all(&self.dir)?;
                std::fs::write(&path, Self::to_svg(chart))?;
                log::debug!("Rendered {kind} chart to {}", path.display());
                Ok(true)
            }
            None => {
                match std::fs::remove_file(&path) {
                    Ok(()) => log::debug!("Removed stale {kind} chart at {}", path.display()),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e.into()),
                }
                Ok(false)
            }
        }
    }
}

fn point_at(angle: f64) -> (f64, f64) {
    (CENTER_X + RADIUS * angle.cos(), CENTER_Y + RADIUS * angle.sin())
}

fn color(idx: usize) -> &'static str {
    PALETTE[idx % PALETTE.len()]
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
