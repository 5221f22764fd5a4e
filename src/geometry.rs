// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Numeric predicates of the sweep: parabola breakpoints, circumcircles,
//! collinearity and the parametric clipping of lines against the bounding
//! rectangle. All near-equality comparisons use one fixed tolerance to avoid
//! spurious circle events and duplicate vertices.

use iron_shapes::point::Point;
use iron_shapes::rect::Rect;
use iron_shapes::vector::Vector;
use iron_shapes::CoordinateType;
use num_traits::Float;

/// The fixed tolerance used by all near-equality comparisons.
pub(crate) fn tolerance<T: Float>() -> T {
    T::from(1e-8).unwrap()
}

/// Check whether two points coincide within the fixed tolerance.
pub(crate) fn points_coincide<T>(a: Point<T>, b: Point<T>) -> bool
where
    T: CoordinateType + Float,
{
    (a.x - b.x).abs() <= tolerance() && (a.y - b.y).abs() <= tolerance()
}

/// Cross product of two vectors.
pub(crate) fn cross<T>(a: Vector<T>, b: Vector<T>) -> T
where
    T: CoordinateType + Float,
{
    a.x * b.y - a.y * b.x
}

/// Rotate a vector by 90 degrees clockwise.
///
/// This maps the direction from site `i` to site `j` onto the growth
/// direction of the breakpoint between the arc of `i` (left) and the arc of
/// `j` (right) for a sweep line that moves downwards.
pub(crate) fn rotated_cw<T>(v: Vector<T>) -> Vector<T>
where
    T: CoordinateType + Float,
{
    Vector::new(v.y, -v.x)
}

/// Midpoint of two points. Always lies on their bisector.
pub(crate) fn midpoint<T>(a: Point<T>, b: Point<T>) -> Point<T>
where
    T: CoordinateType + Float,
{
    let two = T::one() + T::one();
    Point::new((a.x + b.x) / two, (a.y + b.y) / two)
}

/// Squared euclidean distance.
pub(crate) fn distance_sq<T>(a: Point<T>, b: Point<T>) -> T
where
    T: CoordinateType + Float,
{
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// The point `origin + t * dir`.
pub(crate) fn point_at<T>(origin: Point<T>, dir: Vector<T>, t: T) -> Point<T>
where
    T: CoordinateType + Float,
{
    Point::new(origin.x + dir.x * t, origin.y + dir.y * t)
}

/// Compute the x-coordinate of the breakpoint between the arc of `left` and
/// the arc of `right` for the sweep line at `directrix`. `left`/`right` refer
/// to the order of the two arcs on the beachline, not to the ordering of the
/// two focus points.
///
/// A focus lying on the sweep line degenerates its parabola into a vertical
/// ray at the focus, and two cohorizontal foci collapse to a vertical split
/// at their midpoint.
pub(crate) fn breakpoint_x<T>(left: Point<T>, right: Point<T>, directrix: T) -> T
where
    T: CoordinateType + Float,
{
    let two = T::one() + T::one();
    // Distances of the foci to the sweep line. Clamped to zero: a focus can
    // only end up marginally below the sweep line through rounding.
    let kl = (left.y - directrix).max(T::zero());
    let kr = (right.y - directrix).max(T::zero());

    if kl <= tolerance() && kr <= tolerance() {
        // Both foci on the sweep line: vertical split between them.
        return (left.x + right.x) / two;
    }
    if kl <= tolerance() {
        return left.x;
    }
    if kr <= tolerance() {
        return right.x;
    }
    if (kl - kr).abs() <= tolerance() {
        // Cohorizontal foci: the parabolas intersect once, at the midpoint.
        return (left.x + right.x) / two;
    }

    // Intersect the two parabolas
    //   y = (x - f.x)^2 / (2 k) + (f.y + directrix) / 2.
    let a = T::one() / kl - T::one() / kr;
    let b = -two * (left.x / kl - right.x / kr);
    let c = left.x * left.x / kl - right.x * right.x / kr + (left.y - right.y);

    let disc = (b * b - two * two * a * c).max(T::zero());
    // Of the two intersections, the (left arc | right arc) breakpoint is the
    // smaller root when the left parabola is the wider one (kl > kr) and the
    // larger root otherwise. Both cases reduce to the same closed form.
    (-b + disc.sqrt()) / (two * a)
}

/// Circumcenter of three sites together with the lowest point of their
/// circumcircle, which is where the corresponding circle event fires.
///
/// Returns `None` for collinear (or coincident) triples; such triples never
/// produce a circle event.
pub(crate) fn circumcircle_bottom<T>(
    a: Point<T>,
    b: Point<T>,
    c: Point<T>,
) -> Option<(Point<T>, Point<T>)>
where
    T: CoordinateType + Float,
{
    let two = T::one() + T::one();
    let d = two * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));

    if d.abs() <= tolerance() {
        return None;
    }

    let a2 = a.x * a.x + a.y * a.y;
    let b2 = b.x * b.x + b.y * b.y;
    let c2 = c.x * c.x + c.y * c.y;

    let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;

    let center = Point::new(ux, uy);
    let r = distance_sq(center, a).sqrt();
    let bottom = Point::new(ux, uy - r);

    if !(bottom.x.is_finite() && bottom.y.is_finite()) {
        return None;
    }

    Some((center, bottom))
}

/// Check whether a point lies inside the rectangle, borders included.
pub(crate) fn point_in_rect<T>(p: Point<T>, rect: &Rect<T>) -> bool
where
    T: CoordinateType + Float,
{
    let tol = tolerance();
    p.x >= rect.lower_left.x - tol
        && p.x <= rect.upper_right.x + tol
        && p.y >= rect.lower_left.y - tol
        && p.y <= rect.upper_right.y + tol
}

/// Check whether a point lies on the boundary of the rectangle.
pub(crate) fn on_border<T>(p: Point<T>, rect: &Rect<T>) -> bool
where
    T: CoordinateType + Float,
{
    let tol = tolerance();
    point_in_rect(p, rect)
        && ((p.x - rect.lower_left.x).abs() <= tol
            || (p.x - rect.upper_right.x).abs() <= tol
            || (p.y - rect.lower_left.y).abs() <= tol
            || (p.y - rect.upper_right.y).abs() <= tol)
}

/// Clip the parametric line `origin + t * dir`, `t` in `[t0, t1]`, against
/// the rectangle (Liang-Barsky). Returns the clipped parameter interval, or
/// `None` if the line misses the rectangle.
///
/// Pass infinite bounds to clip a full line or a ray.
pub(crate) fn clip_parametric<T>(
    origin: Point<T>,
    dir: Vector<T>,
    mut t0: T,
    mut t1: T,
    rect: &Rect<T>,
) -> Option<(T, T)>
where
    T: CoordinateType + Float,
{
    let checks = [
        (-dir.x, origin.x - rect.lower_left.x),
        (dir.x, rect.upper_right.x - origin.x),
        (-dir.y, origin.y - rect.lower_left.y),
        (dir.y, rect.upper_right.y - origin.y),
    ];

    for (p, q) in checks {
        if p.abs() <= tolerance() {
            // Line parallel to this side.
            if q < T::zero() {
                return None;
            }
        } else {
            let r = q / p;
            if p < T::zero() {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }

    if t0 > t1 {
        None
    } else {
        Some((t0, t1))
    }
}

/// Scalar position of a boundary point on the perimeter, walked
/// counterclockwise from the lower left corner: bottom, right, top, left.
///
/// Sorting clip points and corners by this single scalar yields the border
/// walk order without per-side special cases. The point is snapped to its
/// nearest side first, so values computed for corners are unambiguous.
pub(crate) fn perimeter_pos<T>(p: Point<T>, rect: &Rect<T>) -> T
where
    T: CoordinateType + Float,
{
    let w = rect.upper_right.x - rect.lower_left.x;
    let h = rect.upper_right.y - rect.lower_left.y;
    let two = T::one() + T::one();

    let d_bottom = (p.y - rect.lower_left.y).abs();
    let d_right = (p.x - rect.upper_right.x).abs();
    let d_top = (p.y - rect.upper_right.y).abs();
    let d_left = (p.x - rect.lower_left.x).abs();

    let min = d_bottom.min(d_right).min(d_top).min(d_left);

    if d_bottom <= min {
        (p.x - rect.lower_left.x).max(T::zero()).min(w)
    } else if d_right <= min {
        w + (p.y - rect.lower_left.y).max(T::zero()).min(h)
    } else if d_top <= min {
        w + h + (rect.upper_right.x - p.x).max(T::zero()).min(w)
    } else {
        two * w + h + (rect.upper_right.y - p.y).max(T::zero()).min(h)
    }
}
