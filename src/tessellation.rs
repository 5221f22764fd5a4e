// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Public entry points: one-shot tessellation and the accumulating builder.

use iron_shapes::point::Point;
use iron_shapes::rect::Rect;
use iron_shapes::CoordinateType;
use log::debug;
use num_traits::Float;

use crate::border::close_border;
use crate::connect_cells::connect_cells;
use crate::diagram::Diagram;
use crate::geometry::{points_coincide, tolerance};
use crate::sweep::run_sweep;
use crate::{BorderMode, VoronoiError};

/// Compute the Voronoi tessellation of `sites` inside `bounding_box`.
///
/// Duplicate sites are permitted; every repetition of an earlier site ends
/// up with an empty cell. Sites outside the rectangle take part in the
/// construction but their cells may be clipped away entirely.
///
/// # Example
/// ```
/// use iron_shapes::point::Point;
/// use iron_shapes::rect::Rect;
/// use iron_shapes_voronoi::{tessellate, BorderMode};
///
/// let sites = vec![Point::new(500.0, 700.0), Point::new(500.0, 300.0)];
/// let bbox = Rect::new(Point::new(0.0, 0.0), Point::new(1000.0, 1000.0));
///
/// let diagram = tessellate(&sites, bbox, BorderMode::GenerateBorder)?;
///
/// // One bisector chord plus six border pieces.
/// assert_eq!(diagram.edges().len(), 7);
/// assert_eq!(diagram.cell(0).len(), 4);
/// assert_eq!(diagram.cell(1).len(), 4);
/// # Ok::<(), iron_shapes_voronoi::VoronoiError>(())
/// ```
pub fn tessellate<T>(
    sites: &[Point<T>],
    bounding_box: Rect<T>,
    mode: BorderMode,
) -> Result<Diagram<T>, VoronoiError>
where
    T: CoordinateType + Float,
{
    validate_bounding_box(&bounding_box)?;
    validate_sites(sites)?;

    let active = dedupe_sites(sites);
    debug!(
        "tessellate {} sites ({} active), mode {:?}",
        sites.len(),
        active.iter().filter(|&&a| a).count(),
        mode
    );

    let mut edges = run_sweep(sites, &active);

    match mode {
        BorderMode::GenerateBorder => {
            edges = close_border(edges, sites, &active, &bounding_box)?;
        }
        BorderMode::LeaveOpen => {
            edges.retain(|e| !e.is_degenerate());
        }
    }

    let cells = connect_cells(&edges, sites.len(), mode)?;

    Ok(Diagram {
        sites: sites.to_vec(),
        edges,
        cells,
    })
}

/// Accumulates sites across calls and builds diagrams on demand.
///
/// Fortune's sweep has no cheap incremental insertion once the sweep line
/// has passed a site's coordinate, so every [`build`](Self::build) re-runs
/// the full sweep over the accumulated set.
#[derive(Debug, Clone)]
pub struct VoronoiBuilder<T> {
    sites: Vec<Point<T>>,
}

impl<T> Default for VoronoiBuilder<T> {
    fn default() -> Self {
        VoronoiBuilder { sites: Vec::new() }
    }
}

impl<T> VoronoiBuilder<T>
where
    T: CoordinateType + Float,
{
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one site.
    pub fn add_site(&mut self, site: Point<T>) -> &mut Self {
        self.sites.push(site);
        self
    }

    /// Append a batch of sites.
    pub fn add_sites<I>(&mut self, sites: I) -> &mut Self
    where
        I: IntoIterator<Item = Point<T>>,
    {
        self.sites.extend(sites);
        self
    }

    /// The accumulated sites, in insertion order.
    pub fn sites(&self) -> &[Point<T>] {
        &self.sites
    }

    /// Build the diagram of all accumulated sites.
    pub fn build(
        &self,
        bounding_box: Rect<T>,
        mode: BorderMode,
    ) -> Result<Diagram<T>, VoronoiError> {
        tessellate(&self.sites, bounding_box, mode)
    }
}

fn validate_bounding_box<T>(rect: &Rect<T>) -> Result<(), VoronoiError>
where
    T: CoordinateType + Float,
{
    let ll = rect.lower_left;
    let ur = rect.upper_right;

    let finite = ll.x.is_finite() && ll.y.is_finite() && ur.x.is_finite() && ur.y.is_finite();
    if !finite || ur.x - ll.x <= tolerance() || ur.y - ll.y <= tolerance() {
        return Err(VoronoiError::InvalidBoundingBox);
    }
    Ok(())
}

fn validate_sites<T>(sites: &[Point<T>]) -> Result<(), VoronoiError>
where
    T: CoordinateType + Float,
{
    for (index, p) in sites.iter().enumerate() {
        if !(p.x.is_finite() && p.y.is_finite()) {
            return Err(VoronoiError::InvalidSite { index });
        }
    }
    Ok(())
}

/// Mark the first occurrence of every distinct coordinate as active. Exact
/// duplicates would create zero-width arcs in the beachline; merging them up
/// front keeps the sweep free of that degeneracy.
fn dedupe_sites<T>(sites: &[Point<T>]) -> Vec<bool>
where
    T: CoordinateType + Float,
{
    let mut active = vec![true; sites.len()];
    for i in 1..sites.len() {
        if sites[..i]
            .iter()
            .zip(&active)
            .any(|(&p, &a)| a && points_coincide(p, sites[i]))
        {
            active[i] = false;
        }
    }
    active
}
