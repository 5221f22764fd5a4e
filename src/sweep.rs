// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The sweep controller: pops events and dispatches them to the beachline
//! until the queue runs dry.
//!
//! The sweep line moves from the highest site downwards. Site events split
//! an arc and start a new bisector pair, circle events squeeze an arc out,
//! pin the two adjacent bisectors at the circumcenter and start the bisector
//! of the former neighbors.

use iron_shapes::point::Point;
use iron_shapes::CoordinateType;
use log::{debug, trace};
use num_traits::Float;

use crate::beachline::{ArcIdx, Beachline};
use crate::diagram::{Edge, SiteIdx};
use crate::edge_tracer::EdgeTracer;
use crate::geometry::{circumcircle_bottom, cross, tolerance};
use crate::sweep_event::{CircleId, EventQueue, SweepEvent};

/// Run the sweep over all active sites and return the traced edges. Edges
/// whose breakpoints survive until the end keep their open ends; closing
/// them against the rectangle is the border closer's job.
pub(crate) fn run_sweep<T>(sites: &[Point<T>], active: &[bool]) -> Vec<Edge<T>>
where
    T: CoordinateType + Float,
{
    let mut sweep = Sweep {
        sites,
        queue: EventQueue::new(),
        beachline: Beachline::new(),
        tracer: EdgeTracer::new(),
    };

    for (site, at) in sites.iter().enumerate() {
        if active[site] {
            sweep.queue.push_site(site, *at);
        }
    }

    while let Some(event) = sweep.queue.pop() {
        match event {
            SweepEvent::Site { site, at } => sweep.handle_site(site, at),
            SweepEvent::Circle {
                id, arc, center, ..
            } => sweep.handle_circle(id, arc, center),
        }
    }

    sweep.tracer.into_edges()
}

struct Sweep<'a, T> {
    sites: &'a [Point<T>],
    queue: EventQueue<T>,
    beachline: Beachline,
    tracer: EdgeTracer<T>,
}

impl<T> Sweep<'_, T>
where
    T: CoordinateType + Float,
{
    fn handle_site(&mut self, site: SiteIdx, at: Point<T>) {
        debug!("site event {}", site);

        if self.beachline.is_empty() {
            self.beachline.init(site);
            return;
        }

        let hit = self.beachline.locate(self.sites, at.x, at.y);
        let hit_site = self.beachline.site_of(hit);

        if (self.sites[hit_site].y - at.y).abs() <= tolerance() {
            // The arc above the new site degenerates to a vertical ray: its
            // focus lies on the sweep line as well. The two parabolas do not
            // intersect, the new arc goes in side by side with a single
            // vertical split between them. This can only hit the rightmost
            // arc, because events on one sweep position arrive left to
            // right.
            debug_assert!(self.beachline.arc(hit).right_end.is_none());

            let end = self.tracer.start_vertical(self.sites, hit_site, site);
            let new = self.beachline.insert_after(hit, site);
            self.beachline.arc_mut(hit).right_end = Some(end);
            self.beachline.arc_mut(new).left_end = Some(end);

            self.reschedule(hit);
            self.reschedule(new);
            return;
        }

        // Regular insertion: split the arc above the site, put the new arc
        // in the middle and let two breakpoints trace the bisector of the
        // old and the new site, diverging from the split point.
        self.clear_circle(hit);

        let (left_ref, right_ref) = self.tracer.start_split(self.sites, hit_site, site);
        let (middle, right_copy) = self.beachline.split(hit, site);

        self.beachline.arc_mut(hit).right_end = Some(left_ref);
        self.beachline.arc_mut(middle).left_end = Some(left_ref);
        self.beachline.arc_mut(middle).right_end = Some(right_ref);
        self.beachline.arc_mut(right_copy).left_end = Some(right_ref);

        self.reschedule(hit);
        self.reschedule(right_copy);
    }

    fn handle_circle(&mut self, id: CircleId, arc: ArcIdx, center: Point<T>) {
        // The validity flag filters stale events; an event whose arc no
        // longer matches the beachline is discarded as well.
        if !self.beachline.arc(arc).live || self.beachline.arc(arc).circle != Some(id) {
            return;
        }

        debug!("circle event for arc {}", arc);

        let left_end = self
            .beachline
            .arc(arc)
            .left_end
            .expect("a squeezed arc has a breakpoint on both sides");
        let right_end = self
            .beachline
            .arc(arc)
            .right_end
            .expect("a squeezed arc has a breakpoint on both sides");

        // The two breakpoints bounding the arc meet in the circumcenter.
        self.tracer.pin(left_end, center);
        self.tracer.pin(right_end, center);

        let (left, right) = self.beachline.remove(arc);
        let left = left.expect("a squeezed arc has a left neighbor");
        let right = right.expect("a squeezed arc has a right neighbor");

        // The neighbors became adjacent; one new breakpoint traces their
        // bisector away from the new vertex.
        let end = self.tracer.start_from_vertex(
            self.sites,
            self.beachline.site_of(left),
            self.beachline.site_of(right),
            center,
        );
        self.beachline.arc_mut(left).right_end = Some(end);
        self.beachline.arc_mut(right).left_end = Some(end);

        self.reschedule(left);
        self.reschedule(right);
    }

    /// Drop the pending circle event of `arc` and schedule a fresh one if
    /// its current neighbor triple converges.
    fn reschedule(&mut self, arc: ArcIdx) {
        self.clear_circle(arc);

        let (left, right) = {
            let a = self.beachline.arc(arc);
            match (a.left, a.right) {
                (Some(l), Some(r)) => (l, r),
                _ => return,
            }
        };

        let sl = self.beachline.site_of(left);
        let sm = self.beachline.site_of(arc);
        let sr = self.beachline.site_of(right);

        // An arc flanked by the same site on both sides runs between two
        // parallel breakpoints and is never squeezed.
        if sl == sr {
            return;
        }

        let pl = self.sites[sl];
        let pm = self.sites[sm];
        let pr = self.sites[sr];

        // The two breakpoints converge only if the triple turns clockwise.
        // Collinear triples (within tolerance) never yield a circle event.
        let turn = cross(pm - pl, pr - pm);
        if turn >= -tolerance::<T>() {
            return;
        }

        let (center, bottom) = match circumcircle_bottom(pl, pm, pr) {
            Some(c) => c,
            None => return,
        };

        trace!(
            "schedule circle event for arc {} (sites {}, {}, {})",
            arc,
            sl,
            sm,
            sr
        );
        let id = self.queue.push_circle(arc, bottom, center);
        self.beachline.arc_mut(arc).circle = Some(id);
    }

    fn clear_circle(&mut self, arc: ArcIdx) {
        if let Some(id) = self.beachline.arc_mut(arc).circle.take() {
            self.queue.invalidate(id);
        }
    }
}
