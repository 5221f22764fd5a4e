// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Closing the diagram against the bounding rectangle.
//!
//! Every edge that is still open after the sweep is a ray or a full bisector
//! line; it gets intersected with the rectangle. All clip points plus the
//! four corners are then ordered by a single perimeter scalar and zipped
//! into border edges, each owned by the site whose cell touches it.

use iron_shapes::point::Point;
use iron_shapes::rect::Rect;
use iron_shapes::CoordinateType;
use itertools::Itertools;
use log::debug;
use num_traits::Float;

use crate::diagram::{Edge, EdgeEnd, SiteIdx, Vertex};
use crate::geometry::{
    clip_parametric, distance_sq, midpoint, on_border, perimeter_pos, point_at, point_in_rect,
    points_coincide,
};
use crate::VoronoiError;

/// Clip all edges against the rectangle and stitch the border.
///
/// Consumes the traced edges and returns the full closed edge set: clipped
/// internal edges first, then the border edges in counterclockwise walk
/// order. With no active site the result is exactly the four rectangle
/// edges.
pub(crate) fn close_border<T>(
    edges: Vec<Edge<T>>,
    sites: &[Point<T>],
    active: &[bool],
    rect: &Rect<T>,
) -> Result<Vec<Edge<T>>, VoronoiError>
where
    T: CoordinateType + Float,
{
    let mut closed: Vec<Edge<T>> = Vec::new();
    // Points where an internal bisector reaches the rectangle. Only these
    // subdivide the border.
    let mut splits: Vec<Vertex<T>> = Vec::new();

    for edge in edges {
        let edge = match clip_edge(edge, sites, rect) {
            Some(e) => e,
            // The edge misses the rectangle entirely.
            None => continue,
        };
        if edge.is_degenerate() {
            continue;
        }

        let (a, b) = edge
            .endpoints()
            .expect("clipping finalizes both ends of an edge");
        for p in [a, b] {
            if on_border(p, rect) {
                splits.push(p);
            }
        }
        closed.push(edge);
    }

    debug!(
        "border closing: {} internal edges, {} border split points",
        closed.len(),
        splits.len()
    );

    let ll = rect.lower_left;
    let ur = rect.upper_right;
    let corners = [
        ll,
        Point::new(ur.x, ll.y),
        ur,
        Point::new(ll.x, ur.y),
    ];

    // Walk the perimeter counterclockwise from the lower left corner:
    // ordering all boundary points by one scalar avoids any per-side special
    // casing.
    let mut boundary: Vec<(T, Vertex<T>)> = corners
        .iter()
        .chain(splits.iter())
        .map(|&p| (perimeter_pos(p, rect), p))
        .collect();
    boundary.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .expect("perimeter positions must not be NaN")
    });

    // Merge coincident boundary points so that a site exactly on the border
    // or a bisector hitting a corner cannot produce duplicate or zero-length
    // border edges.
    let mut walk: Vec<Vertex<T>> = Vec::new();
    for (_, p) in boundary {
        if walk.last().map_or(true, |&q| !points_coincide(p, q)) {
            walk.push(p);
        }
    }
    if walk.len() > 1 && points_coincide(walk[0], *walk.last().unwrap()) {
        walk.pop();
    }

    let any_active = active.iter().any(|&a| a);

    for (a, b) in walk.iter().copied().circular_tuple_windows() {
        if points_coincide(a, b) {
            continue;
        }
        let owner = nearest_site(midpoint(a, b), sites, active);
        if owner.is_none() && any_active {
            return Err(VoronoiError::Topology(
                "border edge without a site after border closing",
            ));
        }
        closed.push(Edge::border(owner, a, b));
    }

    Ok(closed)
}

/// Clip a single edge against the rectangle, finalizing its open ends.
/// Returns `None` if nothing of the edge lies inside.
fn clip_edge<T>(edge: Edge<T>, sites: &[Point<T>], rect: &Rect<T>) -> Option<Edge<T>>
where
    T: CoordinateType + Float,
{
    let inf = T::infinity();

    match edge.ends {
        [EdgeEnd::At(a), EdgeEnd::At(b)] => {
            if point_in_rect(a, rect) && point_in_rect(b, rect) {
                return Some(edge);
            }
            // A finalized edge can still stick out of the rectangle when its
            // circumcenter vertices lie outside.
            let dir = b - a;
            let (t0, t1) = clip_parametric(a, dir, T::zero(), T::one(), rect)?;
            Some(Edge {
                ends: [
                    EdgeEnd::At(point_at(a, dir, t0)),
                    EdgeEnd::At(point_at(a, dir, t1)),
                ],
                ..edge
            })
        }
        [EdgeEnd::At(a), EdgeEnd::Open(dir)] => {
            // A ray from inside the rectangle has exactly one forward
            // intersection with it; from outside it can enter and leave.
            let (t0, t1) = clip_parametric(a, dir, T::zero(), inf, rect)?;
            Some(Edge {
                ends: [
                    EdgeEnd::At(point_at(a, dir, t0)),
                    EdgeEnd::At(point_at(a, dir, t1)),
                ],
                ..edge
            })
        }
        [EdgeEnd::Open(dir), EdgeEnd::At(a)] => {
            let (t0, t1) = clip_parametric(a, dir, T::zero(), inf, rect)?;
            Some(Edge {
                ends: [
                    EdgeEnd::At(point_at(a, dir, t1)),
                    EdgeEnd::At(point_at(a, dir, t0)),
                ],
                ..edge
            })
        }
        [EdgeEnd::Open(_), EdgeEnd::Open(dir)] => {
            // Never pinned: the full bisector line. The midpoint of the two
            // sites always lies on it and anchors the parametrization.
            let left = edge.left.expect("an internal edge borders two sites");
            let right = edge.right.expect("an internal edge borders two sites");
            let anchor = midpoint(sites[left], sites[right]);

            let (t0, t1) = clip_parametric(anchor, dir, -inf, inf, rect)?;
            Some(Edge {
                ends: [
                    EdgeEnd::At(point_at(anchor, dir, t0)),
                    EdgeEnd::At(point_at(anchor, dir, t1)),
                ],
                ..edge
            })
        }
    }
}

/// The active site closest to `p`; ties resolve to the lowest site index.
fn nearest_site<T>(p: Point<T>, sites: &[Point<T>], active: &[bool]) -> Option<SiteIdx>
where
    T: CoordinateType + Float,
{
    let mut best: Option<(T, SiteIdx)> = None;
    for (i, &s) in sites.iter().enumerate() {
        if !active[i] {
            continue;
        }
        let d = distance_sq(p, s);
        match best {
            Some((bd, _)) if d >= bd => {}
            _ => best = Some((d, i)),
        }
    }
    best.map(|(_, i)| i)
}
