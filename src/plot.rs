//! Correlation heatmap rendering.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;

use crate::corr::CorrelationMatrix;

/// Anchor colors of the YlGnBu sequential palette, low to high.
const YLGNBU: [(u8, u8, u8); 9] = [
    (255, 255, 217),
    (237, 248, 177),
    (199, 233, 180),
    (127, 205, 187),
    (65, 182, 196),
    (29, 145, 192),
    (34, 94, 168),
    (37, 52, 138),
    (8, 29, 88),
];

/// Heatmap styling, passed explicitly into the renderer rather than held as
/// process-global plot state.
#[derive(Clone, Debug)]
pub struct HeatmapStyle {
    /// Output image side length in pixels. 2250 = 15 in at 150 DPI.
    pub size_px: u32,
    /// Opaque background fill.
    pub background: RGBColor,
    /// Thin grid line color drawn between cells.
    pub grid: RGBColor,
    /// Label and tick text color.
    pub text: RGBColor,
    pub label_font_px: u32,
    pub tick_font_px: u32,
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            size_px: 2250,
            background: RGBColor(255, 255, 255),
            grid: RGBColor(255, 255, 255),
            text: RGBColor(0, 0, 0),
            label_font_px: 26,
            tick_font_px: 22,
        }
    }
}

/// Interpolate the YlGnBu palette at `t` in [0, 1].
fn colormap(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (YLGNBU.len() - 1) as f64;
    let idx = (scaled.floor() as usize).min(YLGNBU.len() - 2);
    let frac = scaled - idx as f64;
    let (r0, g0, b0) = YLGNBU[idx];
    let (r1, g1, b1) = YLGNBU[idx + 1];
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// Color scale limits: the finite data range, widened when degenerate so the
/// scale never has zero span.
fn value_range(corr: &CorrelationMatrix) -> (f64, f64) {
    let mut vmin = f64::INFINITY;
    let mut vmax = f64::NEG_INFINITY;
    for &v in corr.matrix.iter() {
        if v.is_finite() {
            vmin = vmin.min(v);
            vmax = vmax.max(v);
        }
    }
    if !vmin.is_finite() || !vmax.is_finite() {
        return (0.0, 1.0);
    }
    if vmax - vmin < f64::EPSILON {
        return (vmin - 0.5, vmax + 0.5);
    }
    (vmin, vmax)
}

/// Derive the output image name from the input file name: strip one trailing
/// `.gz` then one trailing `.vcf`, then append `.corrmap.png`.
pub fn output_basename(input: &Path) -> String {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(".gz").unwrap_or(&name);
    let stem = stem.strip_suffix(".vcf").unwrap_or(stem);
    format!("{}.corrmap.png", stem)
}

/// Render the correlation matrix as a square annotated heatmap PNG.
///
/// Cells are colored by coefficient on a shared YlGnBu scale spanning the
/// finite data range; NaN cells render as background. Sample names label both
/// axes and a colorbar half the heatmap height sits on the right.
pub fn render_heatmap(
    corr: &CorrelationMatrix,
    path: &Path,
    style: &HeatmapStyle,
) -> Result<()> {
    let n = corr.sample_ids.len();
    ensure!(n > 0, "correlation matrix has no samples");

    let size = style.size_px as i32;
    let margin = size / 50;
    let label_w = size / 9;
    let label_h = size / 9;
    let cbar_w = size / 14;

    // Heatmap side length: the largest square fitting next to the labels and
    // colorbar.
    let side = (size - 2 * margin - label_w - cbar_w).min(size - 2 * margin - label_h);
    let x0 = margin + label_w;
    let y0 = margin;
    let cell = side as f64 / n as f64;

    let root = BitMapBackend::new(path, (style.size_px, style.size_px)).into_drawing_area();
    root.fill(&style.background)?;

    let (vmin, vmax) = value_range(corr);

    for i in 0..n {
        for j in 0..n {
            let cx0 = x0 + (j as f64 * cell).round() as i32;
            let cy0 = y0 + (i as f64 * cell).round() as i32;
            let cx1 = x0 + ((j + 1) as f64 * cell).round() as i32;
            let cy1 = y0 + ((i + 1) as f64 * cell).round() as i32;

            let v = corr.matrix[(i, j)];
            let fill = if v.is_finite() {
                colormap((v - vmin) / (vmax - vmin))
            } else {
                style.background
            };
            root.draw(&Rectangle::new([(cx0, cy0), (cx1, cy1)], fill.filled()))?;
            root.draw(&Rectangle::new(
                [(cx0, cy0), (cx1, cy1)],
                style.grid.stroke_width(1),
            ))?;
        }
    }

    // Row labels to the left, right-aligned against the heatmap edge.
    let row_style = ("sans-serif", style.label_font_px)
        .into_font()
        .color(&style.text)
        .pos(Pos::new(HPos::Right, VPos::Center));
    for (i, name) in corr.sample_ids.iter().enumerate() {
        let y = y0 + ((i as f64 + 0.5) * cell).round() as i32;
        root.draw(&Text::new(name.clone(), (x0 - 10, y), row_style.clone()))?;
    }

    // Column labels below, rotated to run downward.
    let col_style = ("sans-serif", style.label_font_px)
        .into_font()
        .transform(FontTransform::Rotate90)
        .color(&style.text)
        .pos(Pos::new(HPos::Left, VPos::Center));
    for (j, name) in corr.sample_ids.iter().enumerate() {
        let x = x0 + ((j as f64 + 0.5) * cell).round() as i32;
        root.draw(&Text::new(name.clone(), (x, y0 + side + 10), col_style.clone()))?;
    }

    draw_colorbar(&root, style, (vmin, vmax), x0 + side + size / 45, y0, side)?;

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Vertical colorbar legend, half the heatmap height and vertically centered
/// against it, with min/mid/max tick labels.
fn draw_colorbar(
    root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    style: &HeatmapStyle,
    (vmin, vmax): (f64, f64),
    x: i32,
    plot_y0: i32,
    plot_side: i32,
) -> Result<()> {
    let bar_w = plot_side / 40;
    let bar_h = plot_side / 2;
    let y = plot_y0 + plot_side / 4;

    for k in 0..bar_h {
        let t = 1.0 - k as f64 / (bar_h - 1).max(1) as f64;
        root.draw(&Rectangle::new(
            [(x, y + k), (x + bar_w, y + k + 1)],
            colormap(t).filled(),
        ))?;
    }
    root.draw(&Rectangle::new(
        [(x, y), (x + bar_w, y + bar_h)],
        style.text.stroke_width(1),
    ))?;

    let tick_style = ("sans-serif", style.tick_font_px)
        .into_font()
        .color(&style.text)
        .pos(Pos::new(HPos::Left, VPos::Center));
    for t in [0.0, 0.5, 1.0] {
        let value = vmin + t * (vmax - vmin);
        let ty = y + ((1.0 - t) * bar_h as f64).round() as i32;
        root.draw(&Text::new(
            format!("{:.2}", value),
            (x + bar_w + 10, ty),
            tick_style.clone(),
        ))?;
    }

    Ok(())
}
