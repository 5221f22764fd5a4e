// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Creation and finalization of bisector edges while the sweep runs.
//!
//! Every breakpoint on the beachline traces exactly one end of one edge.
//! The tracer hands out `EdgeEndRef` handles for these ends; a circle event
//! pins the referenced end to the circumcenter, everything still open when
//! the sweep finishes is later closed against the bounding rectangle.

use iron_shapes::point::Point;
use iron_shapes::CoordinateType;
use num_traits::Float;

use crate::diagram::{Edge, EdgeEnd, EdgeIdx, SiteIdx, Vertex};
use crate::geometry::rotated_cw;

/// Reference to one end of an in-progress edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EdgeEndRef {
    pub edge: EdgeIdx,
    /// 0 or 1, selecting one of the two endpoint slots of the edge.
    pub slot: usize,
}

/// Accumulates the edges of the diagram during the sweep.
#[derive(Debug, Default)]
pub(crate) struct EdgeTracer<T> {
    edges: Vec<Edge<T>>,
}

impl<T> EdgeTracer<T>
where
    T: CoordinateType + Float,
{
    pub fn new() -> Self {
        EdgeTracer { edges: Vec::new() }
    }

    /// Start the bisector between `old` (the split arc's site) and `new`
    /// (the inserted site). Both ends are open: the first slot is traced by
    /// the left of the two new breakpoints, the second by the right one.
    ///
    /// Returns the end references in `(left, right)` order.
    pub fn start_split(
        &mut self,
        sites: &[Point<T>],
        old: SiteIdx,
        new: SiteIdx,
    ) -> (EdgeEndRef, EdgeEndRef) {
        // The breakpoint between a left arc of focus i and a right arc of
        // focus j moves along the bisector in direction (j - i) rotated
        // clockwise.
        let left_dir = rotated_cw(sites[new] - sites[old]);
        let right_dir = rotated_cw(sites[old] - sites[new]);

        let edge = self.push(Edge::open_pair(old, new, left_dir, right_dir));
        (EdgeEndRef { edge, slot: 0 }, EdgeEndRef { edge, slot: 1 })
    }

    /// Start the vertical bisector between two cohorizontal sites, `left`
    /// left of `right` on the sweep line. Only the lower end is traced by a
    /// breakpoint; the upper end stays open until the border clip.
    pub fn start_vertical(
        &mut self,
        sites: &[Point<T>],
        left: SiteIdx,
        right: SiteIdx,
    ) -> EdgeEndRef {
        let down = rotated_cw(sites[right] - sites[left]);
        let up = rotated_cw(sites[left] - sites[right]);

        let edge = self.push(Edge::open_pair(left, right, up, down));
        EdgeEndRef { edge, slot: 1 }
    }

    /// Start the bisector between the two neighbors of a squeezed arc. One
    /// end is pinned to the circumcenter right away, the other is traced by
    /// the breakpoint that replaces the squeezed arc.
    pub fn start_from_vertex(
        &mut self,
        sites: &[Point<T>],
        left: SiteIdx,
        right: SiteIdx,
        vertex: Vertex<T>,
    ) -> EdgeEndRef {
        let dir = rotated_cw(sites[right] - sites[left]);
        let edge = self.push(Edge::from_vertex(left, right, vertex, dir));
        EdgeEndRef { edge, slot: 1 }
    }

    /// Pin an open edge end to a vertex.
    pub fn pin(&mut self, end: EdgeEndRef, vertex: Vertex<T>) {
        let slot = &mut self.edges[end.edge].ends[end.slot];
        debug_assert!(
            matches!(slot, EdgeEnd::Open(_)),
            "an edge end can only be finalized once"
        );
        *slot = EdgeEnd::At(vertex);
    }

    /// The finished edge set of the sweep. Open ends remain open.
    pub fn into_edges(self) -> Vec<Edge<T>> {
        self.edges
    }

    fn push(&mut self, edge: Edge<T>) -> EdgeIdx {
        self.edges.push(edge);
        self.edges.len() - 1
    }
}
