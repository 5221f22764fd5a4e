// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Tests for the Voronoi tessellation.

#[cfg(test)]
mod test {
    extern crate rand;

    use iron_shapes::point::Point;
    use iron_shapes::rect::Rect;
    use iron_shapes_voronoi::*;

    use self::rand::distributions::{Distribution, Uniform};
    use self::rand::rngs::StdRng;
    use self::rand::SeedableRng;

    const TOL: f64 = 1e-6;

    fn bbox() -> Rect<f64> {
        Rect::new(Point::new(0.0, 0.0), Point::new(1000.0, 1000.0))
    }

    fn build(sites: &[(f64, f64)]) -> Diagram<f64> {
        let sites: Vec<_> = sites.iter().map(|&(x, y)| Point::new(x, y)).collect();
        tessellate(&sites, bbox(), BorderMode::GenerateBorder).expect("tessellation must succeed")
    }

    /// Canonical endpoint pair of an edge: the lexicographically smaller
    /// point first, so that orientation does not matter when comparing.
    fn segment(edge: &Edge<f64>) -> ((f64, f64), (f64, f64)) {
        let a = edge.start().expect("closed diagrams have no open edges");
        let b = edge.end().expect("closed diagrams have no open edges");
        let pa = (a.x, a.y);
        let pb = (b.x, b.y);
        if pa <= pb {
            (pa, pb)
        } else {
            (pb, pa)
        }
    }

    fn segments(diagram: &Diagram<f64>) -> Vec<((f64, f64), (f64, f64))> {
        diagram.edges().iter().map(segment).collect()
    }

    fn points_close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() <= TOL && (a.1 - b.1).abs() <= TOL
    }

    fn segments_close(a: ((f64, f64), (f64, f64)), b: ((f64, f64), (f64, f64))) -> bool {
        points_close(a.0, b.0) && points_close(a.1, b.1)
    }

    /// Compare two edge sets regardless of order.
    fn assert_same_segments(mut got: Vec<((f64, f64), (f64, f64))>, expected: &[((f64, f64), (f64, f64))]) {
        assert_eq!(got.len(), expected.len(), "edge counts differ");
        for &e in expected {
            let pos = got.iter().position(|&g| segments_close(g, e));
            match pos {
                Some(pos) => {
                    got.swap_remove(pos);
                }
                None => panic!("expected edge {:?} not found in {:?}", e, got),
            }
        }
    }

    fn has_edge(diagram: &Diagram<f64>, a: (f64, f64), b: (f64, f64)) -> bool {
        let want = if a <= b { (a, b) } else { (b, a) };
        diagram
            .edges()
            .iter()
            .any(|e| segments_close(segment(e), want))
    }

    /// The ordered polygon corners of a closed cell: one shared vertex per
    /// consecutive edge pair.
    fn cell_corners(diagram: &Diagram<f64>, site: SiteIdx) -> Vec<(f64, f64)> {
        let ids = diagram.cell(site).edge_ids();
        let mut corners = Vec::new();
        for i in 0..ids.len() {
            let e = &diagram.edges()[ids[i]];
            let f = &diagram.edges()[ids[(i + 1) % ids.len()]];
            let (ea, eb) = (e.start().unwrap(), e.end().unwrap());
            let (fa, fb) = (f.start().unwrap(), f.end().unwrap());

            let shared = [ea, eb]
                .into_iter()
                .find(|p| {
                    points_close((p.x, p.y), (fa.x, fa.y)) || points_close((p.x, p.y), (fb.x, fb.y))
                })
                .expect("consecutive cell edges share a vertex");
            corners.push((shared.x, shared.y));
        }
        corners
    }

    fn cell_area(diagram: &Diagram<f64>, site: SiteIdx) -> f64 {
        let corners = cell_corners(diagram, site);
        let mut twice_area = 0.0;
        for i in 0..corners.len() {
            let (x0, y0) = corners[i];
            let (x1, y1) = corners[(i + 1) % corners.len()];
            twice_area += x0 * y1 - x1 * y0;
        }
        twice_area.abs() / 2.0
    }

    #[test]
    fn test_no_sites_yields_the_bare_rectangle() {
        let diagram = build(&[]);

        assert_eq!(diagram.edges().len(), 4);
        assert!(diagram.cells().is_empty());
        assert!(diagram.edges().iter().all(|e| e.sites() == (None, None)));
    }

    #[test]
    fn test_single_site_owns_the_rectangle() {
        let diagram = build(&[(500.0, 500.0)]);

        assert_eq!(diagram.edges().len(), 4);
        assert_eq!(diagram.cell(0).len(), 4);
        assert!((cell_area(&diagram, 0) - 1e6).abs() < TOL);
    }

    #[test]
    fn test_site_on_the_border_does_not_subdivide_it() {
        // A site on the left border with no competitor: still just the four
        // rectangle edges.
        let diagram = build(&[(0.0, 500.0)]);

        assert_eq!(diagram.edges().len(), 4);
        assert_eq!(diagram.cell(0).len(), 4);
    }

    #[test]
    fn test_two_stacked_sites() {
        let diagram = build(&[(500.0, 700.0), (500.0, 300.0)]);

        // One bisector chord plus six border pieces split at (0,500) and
        // (1000,500).
        assert_eq!(diagram.edges().len(), 7);
        assert!(has_edge(&diagram, (0.0, 500.0), (1000.0, 500.0)));
        assert_eq!(diagram.cell(0).len(), 4);
        assert_eq!(diagram.cell(1).len(), 4);

        assert!((cell_area(&diagram, 0) - 5e5).abs() < TOL);
        assert!((cell_area(&diagram, 1) - 5e5).abs() < TOL);
    }

    #[test]
    fn test_two_diagonal_sites() {
        let diagram = build(&[(300.0, 700.0), (700.0, 300.0)]);

        // The bisector runs corner to corner, so no border is subdivided:
        // one diagonal plus the four rectangle edges.
        assert_eq!(diagram.edges().len(), 5);
        assert!(has_edge(&diagram, (0.0, 0.0), (1000.0, 1000.0)));
        assert_eq!(diagram.cell(0).len(), 3);
        assert_eq!(diagram.cell(1).len(), 3);

        assert!((cell_area(&diagram, 0) - 5e5).abs() < TOL);
        assert!((cell_area(&diagram, 1) - 5e5).abs() < TOL);
    }

    #[test]
    fn test_four_sites_in_a_square() {
        let diagram = build(&[
            (300.0, 700.0),
            (300.0, 300.0),
            (700.0, 300.0),
            (700.0, 700.0),
        ]);

        // Four bisectors radiating from the four-way vertex (500,500) to the
        // border midpoints, plus eight border pieces.
        assert_eq!(diagram.edges().len(), 12);
        assert!(has_edge(&diagram, (500.0, 500.0), (0.0, 500.0)));
        assert!(has_edge(&diagram, (500.0, 500.0), (1000.0, 500.0)));
        assert!(has_edge(&diagram, (500.0, 500.0), (500.0, 0.0)));
        assert!(has_edge(&diagram, (500.0, 500.0), (500.0, 1000.0)));

        // Exactly four edges meet at the central vertex.
        let meeting = diagram
            .edges()
            .iter()
            .filter(|e| {
                let (a, b) = (e.start().unwrap(), e.end().unwrap());
                points_close((a.x, a.y), (500.0, 500.0)) || points_close((b.x, b.y), (500.0, 500.0))
            })
            .count();
        assert_eq!(meeting, 4);

        for site in 0..4 {
            assert_eq!(diagram.cell(site).len(), 4);
            assert!((cell_area(&diagram, site) - 2.5e5).abs() < TOL);
        }
    }

    #[test]
    fn test_internal_edges_border_two_sites() {
        let diagram = build(&[
            (300.0, 700.0),
            (300.0, 300.0),
            (700.0, 300.0),
            (700.0, 700.0),
        ]);

        for edge in diagram.edges() {
            match edge.sites() {
                (Some(_), Some(_)) => assert!(!edge.is_border()),
                (Some(_), None) => assert!(edge.is_border()),
                other => panic!("edge with site assignment {:?}", other),
            }
        }
    }

    #[test]
    fn test_leave_open_keeps_rays_open() {
        let sites = vec![Point::new(500.0, 700.0), Point::new(500.0, 300.0)];
        let diagram = tessellate(&sites, bbox(), BorderMode::LeaveOpen).unwrap();

        // Just the bisector, never clipped: both ends stay open.
        assert_eq!(diagram.edges().len(), 1);
        assert!(diagram.edges()[0].is_open());
        assert!(diagram.edges()[0].start().is_none());
        assert!(diagram.edges()[0].end().is_none());
        assert_eq!(diagram.cell(0).len(), 1);
        assert_eq!(diagram.cell(1).len(), 1);
    }

    #[test]
    fn test_determinism() {
        let sites = [
            (312.0, 744.0),
            (640.0, 121.0),
            (887.0, 512.0),
            (143.0, 256.0),
            (500.0, 500.0),
        ];
        let a = segments(&build(&sites));
        let b = segments(&build(&sites));
        assert_eq!(a, b);
    }

    /// Rotations and mirrorings of the square bounding box. Tessellating the
    /// transformed sites must give the transformed diagram, edge for edge.
    fn symmetries() -> Vec<fn((f64, f64)) -> (f64, f64)> {
        vec![
            |(x, y)| (1000.0 - y, x),          // 90 degrees
            |(x, y)| (1000.0 - x, 1000.0 - y), // 180 degrees
            |(x, y)| (y, 1000.0 - x),          // 270 degrees
            |(x, y)| (1000.0 - x, y),          // mirrored horizontally
            |(x, y)| (x, 1000.0 - y),          // mirrored vertically
        ]
    }

    fn check_equivariance(sites: &[(f64, f64)]) {
        let base = build(sites);

        for transform in symmetries() {
            let transformed_sites: Vec<_> = sites.iter().map(|&p| transform(p)).collect();
            let transformed = build(&transformed_sites);

            let expected: Vec<_> = segments(&base)
                .into_iter()
                .map(|(a, b)| {
                    let (ta, tb) = (transform(a), transform(b));
                    if ta <= tb {
                        (ta, tb)
                    } else {
                        (tb, ta)
                    }
                })
                .collect();

            assert_same_segments(segments(&transformed), &expected);
        }
    }

    #[test]
    fn test_symmetry_equivariance_two_stacked_sites() {
        check_equivariance(&[(500.0, 700.0), (500.0, 300.0)]);
    }

    #[test]
    fn test_symmetry_equivariance_two_diagonal_sites() {
        check_equivariance(&[(300.0, 700.0), (700.0, 300.0)]);
    }

    #[test]
    fn test_symmetry_equivariance_square() {
        check_equivariance(&[
            (300.0, 700.0),
            (300.0, 300.0),
            (700.0, 300.0),
            (700.0, 700.0),
        ]);
    }

    #[test]
    fn test_symmetry_equivariance_asymmetric_layout() {
        check_equivariance(&[(150.0, 850.0), (400.0, 420.0), (730.0, 640.0), (620.0, 90.0)]);
    }

    #[test]
    fn test_collinear_sites() {
        // Three collinear sites never produce a circle event; the diagram is
        // two parallel chords.
        let diagram = build(&[(500.0, 200.0), (500.0, 500.0), (500.0, 800.0)]);

        assert!(has_edge(&diagram, (0.0, 350.0), (1000.0, 350.0)));
        assert!(has_edge(&diagram, (0.0, 650.0), (1000.0, 650.0)));
        assert_eq!(diagram.edges().len(), 10);

        let total: f64 = (0..3).map(|s| cell_area(&diagram, s)).sum();
        assert!((total - 1e6).abs() < TOL);
    }

    #[test]
    fn test_duplicate_sites_are_merged() {
        let diagram = build(&[(300.0, 700.0), (700.0, 300.0), (300.0, 700.0)]);

        // Same diagram as without the duplicate; the duplicate has no cell.
        assert_eq!(diagram.edges().len(), 5);
        assert_eq!(diagram.cell(0).len(), 3);
        assert_eq!(diagram.cell(1).len(), 3);
        assert!(diagram.cell(2).is_empty());
    }

    #[test]
    fn test_site_in_a_corner() {
        // A site exactly in a corner must not create duplicate or
        // zero-length border edges.
        let diagram = build(&[(0.0, 0.0), (600.0, 600.0)]);

        for edge in diagram.edges() {
            let (a, b) = (edge.start().unwrap(), edge.end().unwrap());
            assert!(
                !points_close((a.x, a.y), (b.x, b.y)),
                "zero length edge {:?}",
                (a, b)
            );
        }

        let total: f64 = (0..2).map(|s| cell_area(&diagram, s)).sum();
        assert!((total - 1e6).abs() < TOL);
    }

    /// Cells of random sites partition the rectangle: all cells close and
    /// their areas sum to the area of the rectangle.
    #[test]
    fn test_random_partition() {
        let seed = 42u8;

        for round in 0..3u8 {
            let mut rng = StdRng::from_seed([seed + round; 32]);
            let between = Uniform::from(50.0..950.0);

            let sites: Vec<(f64, f64)> = (0..12)
                .map(|_| (between.sample(&mut rng), between.sample(&mut rng)))
                .collect();

            let diagram = build(&sites);

            let mut total = 0.0;
            for site in 0..sites.len() {
                let cell = diagram.cell(site);
                assert!(cell.len() >= 3, "cell of site {} degenerated", site);
                total += cell_area(&diagram, site);
            }

            assert!(
                (total - 1e6).abs() < 1e-3,
                "cells must cover the rectangle, got area {}",
                total
            );
        }
    }

    #[test]
    fn test_random_determinism() {
        let mut rng = StdRng::from_seed([7u8; 32]);
        let between = Uniform::from(0.0..1000.0);
        let sites: Vec<(f64, f64)> = (0..20)
            .map(|_| (between.sample(&mut rng), between.sample(&mut rng)))
            .collect();

        assert_eq!(segments(&build(&sites)), segments(&build(&sites)));
    }
}
