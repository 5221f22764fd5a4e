// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

#![deny(missing_docs)]

//! Planar Voronoi tessellation for iron-shapes.
//!
//! The diagram is constructed with Fortune's sweep line algorithm: an event
//! driven sweep over the sites maintains the beachline of parabolic arcs and
//! traces every bisector edge, then a border closing stage clips the open
//! edges against a bounding rectangle and assembles one closed polygonal
//! cell per site.
//!
//! The whole computation is a single synchronous batch over an immutable
//! site list; the result is an immutable set of edges and cells.

mod beachline;
mod border;
mod connect_cells;
mod diagram;
mod edge_tracer;
mod geometry;
mod sweep;
mod sweep_event;
mod tessellation;

// API exports.
pub use diagram::{Cell, Diagram, Edge, EdgeIdx, SiteIdx, Vertex};
pub use tessellation::{tessellate, VoronoiBuilder};

/// How edges that never got a second vertex are treated.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BorderMode {
    /// Clip open edges against the bounding rectangle and stitch border
    /// edges along it, so that every cell is a closed polygon.
    GenerateBorder,
    /// Leave open edge ends open and create no border edges. Cells are not
    /// closed in this mode.
    LeaveOpen,
}

/// Errors reported by a tessellation. A tessellation either fully succeeds
/// or fails; there are no partial results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoronoiError {
    /// The bounding rectangle is degenerate or non-finite. Rejected before
    /// the sweep starts.
    #[error("invalid bounding box: the rectangle must have positive width and height")]
    InvalidBoundingBox,

    /// A site coordinate is NaN or infinite.
    #[error("site {index} has a non-finite coordinate")]
    InvalidSite {
        /// Index of the offending site in the input list.
        index: usize,
    },

    /// A cell failed to close or an edge ended up without a site during
    /// assembly. This indicates a bug in the construction, not bad input.
    #[error("topology inconsistency: {0}")]
    Topology(&'static str),
}
