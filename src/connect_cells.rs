// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Connect the edges of the diagram into per-site cells.
//!
//! With border generation every cell is arranged into one closed cycle by
//! shared-vertex adjacency. A cell that cannot be closed is a programming
//! error, not an input error, and fails loudly: downstream consumers rely on
//! well-formed polygons.

use iron_shapes::CoordinateType;
use num_traits::Float;

use crate::diagram::{Cell, Edge, EdgeIdx, SiteIdx, Vertex};
use crate::geometry::points_coincide;
use crate::{BorderMode, VoronoiError};

/// Build one cell per site from the closed edge set.
pub(crate) fn connect_cells<T>(
    edges: &[Edge<T>],
    num_sites: usize,
    mode: BorderMode,
) -> Result<Vec<Cell>, VoronoiError>
where
    T: CoordinateType + Float,
{
    let mut per_site: Vec<Vec<EdgeIdx>> = vec![Vec::new(); num_sites];
    for (i, edge) in edges.iter().enumerate() {
        for site in [edge.left, edge.right].into_iter().flatten() {
            per_site[site].push(i);
        }
    }

    per_site
        .into_iter()
        .enumerate()
        .map(|(site, ids)| {
            let edges = match mode {
                BorderMode::GenerateBorder => chain_cycle(edges, site, &ids)?,
                // Without a border, cells are not closed; keep collection
                // order.
                BorderMode::LeaveOpen => ids,
            };
            Ok(Cell { site, edges })
        })
        .collect()
}

/// Order a cell's edges into a closed cycle where consecutive edges,
/// including the wrap-around pair, share a vertex.
fn chain_cycle<T>(
    edges: &[Edge<T>],
    site: SiteIdx,
    ids: &[EdgeIdx],
) -> Result<Vec<EdgeIdx>, VoronoiError>
where
    T: CoordinateType + Float,
{
    // A site merged away as a duplicate, or lying outside the rectangle,
    // simply has no region.
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let endpoints = |id: EdgeIdx| -> Result<(Vertex<T>, Vertex<T>), VoronoiError> {
        edges[id]
            .endpoints()
            .ok_or(VoronoiError::Topology("open edge in a closed diagram"))
    };

    let mut used = vec![false; ids.len()];
    used[0] = true;
    let mut cycle = vec![ids[0]];
    let (start, mut cursor) = endpoints(ids[0])?;

    // Greedy walk: in a convex cell every vertex joins exactly two of the
    // cell's edges, so the next edge is unique.
    while cycle.len() < ids.len() {
        let mut advanced = false;
        for (k, &id) in ids.iter().enumerate() {
            if used[k] {
                continue;
            }
            let (a, b) = endpoints(id)?;
            if points_coincide(a, cursor) {
                cursor = b;
            } else if points_coincide(b, cursor) {
                cursor = a;
            } else {
                continue;
            }
            used[k] = true;
            cycle.push(id);
            advanced = true;
            break;
        }
        if !advanced {
            log::error!("cell of site {} does not chain into one cycle", site);
            return Err(VoronoiError::Topology(
                "cell does not form a single closed cycle",
            ));
        }
    }

    if !points_coincide(cursor, start) {
        log::error!("cell of site {} fails to close", site);
        return Err(VoronoiError::Topology("cell fails to close"));
    }

    Ok(cycle)
}
