//! Geometry for the SVG charts. Everything is computed here so the templates
//! only stamp out paths and labels.

use chrono::{DateTime, Utc};
use std::f64::consts::PI;

/// Series colors, applied round-robin.
pub const PALETTE: [&'static str; 8] = [
    "#0d6efd", "#6610f2", "#d63384", "#dc3545", "#fd7e14", "#ffc107", "#198754", "#20c997",
];

pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[derive(Clone, Debug)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
    pub percent: f64,
    pub path: String,
    pub color: &'static str,
}

/// Slice a breakdown into pie wedges around (cx, cy). Zero totals produce no
/// slices, a single entry fills the whole disc.
pub fn pie_slices(breakdown: &[(String, u64)], cx: f64, cy: f64, r: f64) -> Vec<PieSlice> {
    let total: u64 = breakdown.iter().map(|(_, value)| value).sum();
    if total == 0 {
        return vec![];
    }

    let mut slices = Vec::with_capacity(breakdown.len());
    let mut angle = -PI / 2.0;
    for (index, (label, value)) in breakdown.iter().enumerate() {
        if *value == 0 {
            continue;
        }
        let fraction = *value as f64 / total as f64;
        let sweep = fraction * 2.0 * PI;

        let path = if fraction > 0.9999 {
            full_circle(cx, cy, r)
        } else {
            let (x0, y0) = point_on(cx, cy, r, angle);
            let (x1, y1) = point_on(cx, cy, r, angle + sweep);
            let large_arc = if sweep > PI { 1 } else { 0 };
            format!(
                "M {:.1} {:.1} L {:.1} {:.1} A {:.1} {:.1} 0 {} 1 {:.1} {:.1} Z",
                cx, cy, x0, y0, r, r, large_arc, x1, y1
            )
        };

        slices.push(PieSlice {
            label: label.clone(),
            value: *value,
            percent: fraction * 100.0,
            path,
            color: palette_color(index),
        });
        angle += sweep;
    }
    slices
}

fn full_circle(cx: f64, cy: f64, r: f64) -> String {
    format!(
        "M {:.1} {:.1} A {:.1} {:.1} 0 1 1 {:.1} {:.1} A {:.1} {:.1} 0 1 1 {:.1} {:.1} Z",
        cx,
        cy - r,
        r,
        r,
        cx,
        cy + r,
        r,
        r,
        cx,
        cy - r
    )
}

fn point_on(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.cos(), cy + r * angle.sin())
}

#[derive(Clone, Debug)]
pub struct AreaChart {
    pub width: u32,
    pub height: u32,
    pub line_path: String,
    pub area_path: String,
    pub x_labels: Vec<(f64, String)>,
    pub y_max: u64,
}

impl AreaChart {
    /// Scale a time series into an area path filling the viewBox. Single
    /// points render as a flat line across the full width.
    pub fn build(points: &[(DateTime<Utc>, u64)], width: u32, height: u32) -> AreaChart {
        let y_max = points.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1);
        let w = width as f64;
        let h = height as f64;

        let t0 = points.first().map(|(t, _)| t.timestamp_millis()).unwrap_or(0);
        let tn = points.last().map(|(t, _)| t.timestamp_millis()).unwrap_or(0);
        let span = (tn - t0).max(1) as f64;

        let coords: Vec<(f64, f64)> = points
            .iter()
            .enumerate()
            .map(|(i, (t, v))| {
                let x = if points.len() < 2 {
                    (i as f64) * w
                } else {
                    (t.timestamp_millis() - t0) as f64 / span * w
                };
                let y = h - (*v as f64 / y_max as f64) * h;
                (x, y)
            })
            .collect();

        let mut line_path = String::new();
        for (i, (x, y)) in coords.iter().enumerate() {
            let op = if i == 0 { 'M' } else { 'L' };
            line_path.push_str(&format!("{} {:.1} {:.1} ", op, x, y));
        }
        let line_path = line_path.trim_end().to_string();

        let area_path = if let (Some((x_first, _)), Some((x_last, _))) =
            (coords.first(), coords.last())
        {
            format!(
                "{} L {:.1} {:.1} L {:.1} {:.1} Z",
                line_path, x_last, h, x_first, h
            )
        } else {
            String::new()
        };

        let x_labels = match (points.first(), points.last()) {
            (Some((first, _)), Some((last, _))) if points.len() > 1 => vec![
                (0.0, crate::format::format_time(first)),
                (w, crate::format::format_time(last)),
            ],
            (Some((only, _)), _) => vec![(0.0, crate::format::format_time(only))],
            _ => vec![],
        };

        AreaChart {
            width,
            height,
            line_path,
            area_path,
            x_labels,
            y_max,
        }
    }
}

/// Deterministic node positions for the network diagram: everything on one
/// circle, clockwise from 12 o'clock.
pub fn circular_layout(count: usize, cx: f64, cy: f64, r: f64) -> Vec<(f64, f64)> {
    (0..count)
        .map(|i| {
            let angle = -PI / 2.0 + (i as f64) * 2.0 * PI / count.max(1) as f64;
            point_on(cx, cy, r, angle)
        })
        .collect()
}
