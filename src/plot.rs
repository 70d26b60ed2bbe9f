// ============================================================================
// PLOT.RS - Figure Export
// ============================================================================
//
// Static figures for the two views, written as SVG:
//
//   Editor figure (3 rows):      x[n] / h[n] / y[n]
//   Walkthrough figure (2 x 2):  x[k]     | h[n-k]
//                                products | y[n] so far
//
// Axis ranges follow the on-screen views: inputs always show at least
// [-2, 3] in the editor, and the output panel leaves half a unit of headroom.
// ============================================================================

use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::animation::StepFrame;
use crate::editor::EditorSession;

// Color scheme
const X_COLOR: RGBColor = RGBColor(59, 130, 246);
const H_COLOR: RGBColor = RGBColor(30, 64, 175);
const Y_COLOR: RGBColor = RGBColor(30, 41, 59);
const PRODUCT_COLOR: RGBColor = RGBColor(5, 150, 105);
const HIGHLIGHT_COLOR: RGBColor = RGBColor(220, 38, 38);
const PENDING_COLOR: RGBColor = RGBColor(211, 211, 211);
const TITLE_COLOR: RGBColor = RGBColor(37, 99, 235);

#[derive(Debug, Clone, Copy, PartialEq)]
enum SeriesStyle {
    Stem,
    Line,
}

struct Series {
    points: Vec<(f64, f64)>,
    color: RGBColor,
    style: SeriesStyle,
}

struct Panel {
    title: String,
    x_desc: &'static str,
    y_desc: &'static str,
    x_range: Range<f64>,
    y_range: Range<f64>,
    grid: bool,
    series: Vec<Series>,
}

// ─── Editor figure ─────────────────────────────────────────────────────────────

/// Export x[n], h[n] and y[n] as three stacked panels.
pub fn export_editor_figure<P: AsRef<Path>>(
    session: &EditorSession,
    size: (u32, u32),
    path: P,
) -> Result<()> {
    let style = if session.stem_plot { SeriesStyle::Stem } else { SeriesStyle::Line };
    let y = session.y();

    let panels = [
        Panel {
            title: "Input Signal x[n]".to_string(),
            x_desc: "",
            y_desc: "Amplitude",
            x_range: index_range(session.x().len()),
            y_range: input_y_range(session.x()),
            grid: session.show_grid,
            series: vec![Series { points: indexed(session.x()), color: X_COLOR, style }],
        },
        Panel {
            title: "Impulse Response h[n]".to_string(),
            x_desc: "",
            y_desc: "Amplitude",
            x_range: index_range(session.h().len()),
            y_range: input_y_range(session.h()),
            grid: session.show_grid,
            series: vec![Series { points: indexed(session.h()), color: H_COLOR, style }],
        },
        Panel {
            title: format!("Convolution Output y[n] = x[n] * h[n] (Length: {})", y.len()),
            x_desc: "Sample Index (n)",
            y_desc: "Amplitude",
            x_range: index_range(y.len()),
            y_range: output_y_range(y),
            grid: session.show_grid,
            series: vec![Series { points: indexed(y), color: Y_COLOR, style }],
        },
    ];

    let path = path.as_ref();
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    for (area, panel) in root.split_evenly((3, 1)).iter().zip(panels.iter()) {
        draw_panel(area, panel)?;
    }

    root.present()
        .with_context(|| format!("Failed to write figure: {:?}", path))?;
    Ok(())
}

// ─── Walkthrough figure ────────────────────────────────────────────────────────

/// Export one walkthrough step as a 2 x 2 grid of panels.
pub fn export_step_figure<P: AsRef<Path>>(
    frame: &StepFrame,
    x: &[f64],
    h: &[f64],
    size: (u32, u32),
    path: P,
) -> Result<()> {
    let n = frame.n;
    let products = &frame.state.products;

    // Products outside the overlap are zero by construction; only draw the
    // overlap window so the panel shows where h[n-k] actually lands.
    let product_points: Vec<(f64, f64)> = frame
        .state
        .contributing()
        .into_iter()
        .map(|(k, p)| (k as f64, p))
        .collect();

    let kernel_points: Vec<(f64, f64)> = frame
        .kernel
        .iter()
        .map(|&(k, v)| (k as f64, v))
        .collect();

    let mut output_series = vec![];
    if n > 0 {
        output_series.push(Series {
            points: indexed(&frame.computed[..n]),
            color: Y_COLOR,
            style: SeriesStyle::Stem,
        });
    }
    output_series.push(Series {
        points: vec![(n as f64, frame.state.sum)],
        color: HIGHLIGHT_COLOR,
        style: SeriesStyle::Stem,
    });
    if n + 1 < frame.output_length {
        output_series.push(Series {
            points: ((n + 1)..frame.output_length).map(|i| (i as f64, 0.0)).collect(),
            color: PENDING_COLOR,
            style: SeriesStyle::Stem,
        });
    }

    let kernel_right = x.len().max(h.len()) as f64 + 1.0;

    let panels = [
        Panel {
            title: "Input Signal x[k]".to_string(),
            x_desc: "k",
            y_desc: "Amplitude",
            x_range: index_range(x.len()),
            y_range: padded_range(x, -0.5, 2.0, 0.5),
            grid: true,
            series: vec![Series { points: indexed(x), color: X_COLOR, style: SeriesStyle::Stem }],
        },
        Panel {
            title: format!("h[{}-k] (Flipped & Shifted)", n),
            x_desc: "k",
            y_desc: "Amplitude",
            x_range: -1.0..kernel_right,
            y_range: padded_range(h, -0.5, 2.0, 0.5),
            grid: true,
            series: vec![Series { points: kernel_points, color: H_COLOR, style: SeriesStyle::Stem }],
        },
        Panel {
            title: format!("x[k] × h[{}-k] -> Sum = {:.3}", n, frame.state.sum),
            x_desc: "k",
            y_desc: "Product",
            x_range: index_range(x.len()),
            y_range: padded_range(products, -0.5, 2.0, 0.2),
            grid: true,
            series: vec![Series { points: product_points, color: PRODUCT_COLOR, style: SeriesStyle::Stem }],
        },
        Panel {
            title: format!("Convolution Output y[n] | Step {}/{}", n + 1, frame.output_length),
            x_desc: "Sample Index (n)",
            y_desc: "Amplitude",
            x_range: index_range(frame.output_length),
            y_range: progress_y_range(&frame.computed),
            grid: true,
            series: output_series,
        },
    ];

    let path = path.as_ref();
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    for (area, panel) in root.split_evenly((2, 2)).iter().zip(panels.iter()) {
        draw_panel(area, panel)?;
    }

    root.present()
        .with_context(|| format!("Failed to write figure: {:?}", path))?;
    Ok(())
}

// ─── Drawing ───────────────────────────────────────────────────────────────────

fn draw_panel(area: &DrawingArea<SVGBackend<'_>, Shift>, panel: &Panel) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", 18).into_font().color(&TITLE_COLOR))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(45)
        .build_cartesian_2d(panel.x_range.clone(), panel.y_range.clone())?;

    {
        let mut mesh = chart.configure_mesh();
        if !panel.grid {
            mesh.disable_mesh();
        }
        mesh.x_desc(panel.x_desc).y_desc(panel.y_desc).draw()?;
    }

    for series in &panel.series {
        match series.style {
            SeriesStyle::Stem => {
                chart.draw_series(series.points.iter().map(|&(n, v)| {
                    PathElement::new(vec![(n, 0.0), (n, v)], series.color.stroke_width(2))
                }))?;
                chart.draw_series(
                    series
                        .points
                        .iter()
                        .map(|&p| Circle::new(p, 4, series.color.filled())),
                )?;
            }
            SeriesStyle::Line => {
                chart.draw_series(std::iter::once(PathElement::new(
                    series.points.clone(),
                    series.color.stroke_width(2),
                )))?;
                chart.draw_series(
                    series
                        .points
                        .iter()
                        .map(|&p| Circle::new(p, 3, series.color.filled())),
                )?;
            }
        }
    }

    Ok(())
}

// ─── Axis ranges ───────────────────────────────────────────────────────────────

fn indexed(values: &[f64]) -> Vec<(f64, f64)> {
    values.iter().enumerate().map(|(i, &v)| (i as f64, v)).collect()
}

/// Half a sample of padding on each side of the index axis
fn index_range(len: usize) -> Range<f64> {
    -0.5..(len.max(1) as f64 - 0.5)
}

fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0f64, |m, v| m.max(v.abs()))
}

/// Editor input panels: [-2, max(3, max|s| + 1)], extended down for large
/// negative samples
fn input_y_range(values: &[f64]) -> Range<f64> {
    let top = 3.0f64.max(max_abs(values) + 1.0);
    let bottom = (-2.0f64).min(values.iter().copied().fold(0.0, f64::min) - 1.0);
    bottom..top
}

/// Editor output panel: [min(-1, min y - 0.5), max(3, max y + 0.5)]
fn output_y_range(values: &[f64]) -> Range<f64> {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !lo.is_finite() || !hi.is_finite() {
        return -1.0..3.0;
    }
    (-1.0f64).min(lo - 0.5)..3.0f64.max(hi + 0.5)
}

/// Walkthrough panels: at least [floor, ceiling], with `pad` headroom past
/// the data on either side
fn padded_range(values: &[f64], floor: f64, ceiling: f64, pad: f64) -> Range<f64> {
    let lo = values.iter().copied().fold(0.0, f64::min);
    let hi = values.iter().copied().fold(0.0, f64::max);
    floor.min(lo - pad)..ceiling.max(hi + pad)
}

/// Walkthrough output panel: [-y_max/2, y_max] with y_max = max(2, max|y| + 0.5)
fn progress_y_range(computed: &[f64]) -> Range<f64> {
    let y_max = 2.0f64.max(max_abs(computed) + 0.5);
    let lo = computed.iter().copied().fold(0.0, f64::min);
    (-y_max / 2.0).min(lo - 0.5)..y_max
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationController;

    #[test]
    fn ranges_keep_minimum_extent() {
        assert_eq!(input_y_range(&[1.0, 2.0, 1.0]), -2.0..3.0);
        assert_eq!(input_y_range(&[0.0, 5.0]), -2.0..6.0);
        assert_eq!(input_y_range(&[-4.0, 1.0]), -5.0..5.0);
        assert_eq!(output_y_range(&[0.5, 1.3, 1.3, 0.7, 0.2]), -1.0..3.0);
        assert_eq!(output_y_range(&[]), -1.0..3.0);
        assert_eq!(progress_y_range(&[0.5, 3.5]), -2.0..4.0);
        assert_eq!(index_range(5), -0.5..4.5);
    }

    #[test]
    fn editor_figure_is_written_as_svg() {
        let session = EditorSession::default();
        let path = std::env::temp_dir().join("convolution_viewer_editor_figure.svg");

        export_editor_figure(&session, (900, 700), &path).expect("Export should succeed");

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Convolution Output"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn step_figure_is_written_for_first_and_last_steps() {
        let anim = AnimationController::new(&[1.0, 2.0, 1.0], &[0.5, 0.3, 0.2]);
        let path = std::env::temp_dir().join("convolution_viewer_step_figure.svg");

        for n in [0, anim.output_length() - 1] {
            let frame = anim.frame_at(n);
            export_step_figure(&frame, anim.x(), anim.h(), (1200, 800), &path)
                .expect("Export should succeed");
            let svg = std::fs::read_to_string(&path).unwrap();
            assert!(svg.contains(&format!("Step {}/5", n + 1)));
        }

        std::fs::remove_file(&path).ok();
    }
}
