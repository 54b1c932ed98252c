// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scanline filling of polygons.
//!
//! Pixels are sampled at their centers: a pixel is covered when its center lies inside the
//! polygon set according to the fill rule. There is no partial coverage, so edges are aliased.

use imgshift_common::color::Rgba8;
use imgshift_common::flatten::Subpath;
use imgshift_common::kurbo::Point;
use imgshift_common::peniko::Fill;
use imgshift_common::pixmap::Pixmap;
use log::warn;

/// A polygon edge that crosses at least one row of pixel centers.
#[derive(Debug, Clone, Copy)]
struct Edge {
    /// The first row whose center the edge crosses.
    y_start: i64,
    /// One past the last row whose center the edge crosses.
    y_end: i64,
    /// The endpoint with the smaller y.
    top: Point,
    /// Change in x per unit of y.
    inv_slope: f64,
    /// The vertical direction of the edge, times the winding of its subpath.
    winding: i32,
}

impl Edge {
    /// Returns `None` for horizontal edges and edges between two rows of pixel centers.
    fn new(a: Point, b: Point, subpath_winding: i32) -> Option<Self> {
        if a.y == b.y {
            return None;
        }
        let (top, bottom, direction) = if a.y < b.y { (a, b, 1) } else { (b, a, -1) };
        let y_start = (top.y - 0.5).ceil() as i64;
        let y_end = (bottom.y - 0.5).ceil() as i64;
        if y_start >= y_end {
            return None;
        }
        Some(Self {
            y_start,
            y_end,
            top,
            inv_slope: (bottom.x - top.x) / (bottom.y - top.y),
            winding: direction * subpath_winding,
        })
    }

    /// The x coordinate where the edge crosses the center line of `row`.
    fn x_at(&self, row: i64) -> f64 {
        self.top.x + (row as f64 + 0.5 - self.top.y) * self.inv_slope
    }
}

/// An edge crossing the current row.
#[derive(Debug, Clone, Copy)]
struct Crossing {
    x: f64,
    inv_slope: f64,
    winding: i32,
}

/// Build the edge table of `subpaths`, sorted by first row.
///
/// Every subpath is implicitly closed. Subpaths with non-finite coordinates are skipped.
fn edge_table(subpaths: &[Subpath]) -> Vec<Edge> {
    let mut edges = Vec::new();
    for subpath in subpaths {
        let points = &subpath.points;
        let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
            continue;
        };
        if subpath.has_non_finite() {
            warn!("skipping a subpath with non-finite coordinates");
            continue;
        }
        let segments = points
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .chain(core::iter::once((last, first)));
        edges.extend(segments.filter_map(|(a, b)| Edge::new(a, b, subpath.winding)));
    }
    edges.sort_by_key(|edge| edge.y_start);
    edges
}

/// Fill `subpaths`, given in pixel coordinates, into `pixmap`.
///
/// All subpaths form one shape: the fill rule is evaluated over the edges of all of them
/// together. `shade` is called with the center of every covered pixel and returns the color
/// that is blended there.
pub fn fill_subpaths(
    pixmap: &mut Pixmap,
    subpaths: &[Subpath],
    fill_rule: Fill,
    mut shade: impl FnMut(Point) -> Rgba8,
) {
    let edges = edge_table(subpaths);
    let (Some(first), Some(y_end)) = (edges.first(), edges.iter().map(|e| e.y_end).max()) else {
        return;
    };
    let width = i64::from(pixmap.width());
    let rows = first.y_start.max(0)..y_end.min(i64::from(pixmap.height()));

    let mut next_edge = 0;
    let mut active: Vec<Edge> = Vec::new();
    let mut crossings: Vec<Crossing> = Vec::new();
    for row in rows {
        while let Some(edge) = edges.get(next_edge).filter(|e| e.y_start <= row) {
            active.push(*edge);
            next_edge += 1;
        }
        active.retain(|e| e.y_end > row);

        crossings.clear();
        crossings.extend(active.iter().map(|e| Crossing {
            x: e.x_at(row),
            inv_slope: e.inv_slope,
            winding: e.winding,
        }));
        crossings.sort_by(|a, b| {
            a.x.total_cmp(&b.x)
                .then_with(|| a.inv_slope.total_cmp(&b.inv_slope))
        });

        let mut winding = 0;
        let mut crossed = 0;
        for pair in crossings.windows(2) {
            winding += pair[0].winding;
            crossed += 1;
            let inside = match fill_rule {
                Fill::NonZero => winding != 0,
                Fill::EvenOdd => crossed % 2 != 0,
            };
            if !inside {
                continue;
            }
            let x0 = ((pair[0].x - 0.5).ceil() as i64).clamp(0, width);
            let x1 = ((pair[1].x - 0.5).ceil() as i64).clamp(0, width);
            for x in x0..x1 {
                let color = shade(Point::new(x as f64 + 0.5, row as f64 + 0.5));
                pixmap.blend_pixel(x, row, color);
            }
        }
    }
}
