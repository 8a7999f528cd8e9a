//! Planar geometry kit used by the sweep (pure functions, no state).
//!
//! - `GeomCfg`: centralizes the tolerances for curvature, collinearity, and
//!   sweep-position checks.
//! - Parabola helpers: arcs of the beach line are parabolas with a site as
//!   focus and the sweep line `y = directrix` as directrix.
//!
//! Code cross-refs: `sweep::beach::BeachLine::locate`, `sweep::schedule_circle`

use std::cmp::Ordering;

use nalgebra::Vector2;

/// A planar point (sites, circumcenters, Voronoi vertices).
pub type Point = Vector2<f64>;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Two parabolas whose leading coefficients differ by less than this are
    /// treated as equally curved; their breakpoint is a linear root.
    pub eps_curvature: f64,
    /// Triples with `|2·det| <= eps_det` have no circumcenter.
    pub eps_det: f64,
    /// Circle events whose key lies below the sweep by more than this are dropped.
    pub eps_sweep: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_curvature: 1e-11,
            eps_det: 0.0,
            eps_sweep: 1e-9,
        }
    }
}

/// Twice the signed area of the triangle `(o, a, b)`; positive for a CCW turn.
#[inline]
pub fn cross(o: Point, a: Point, b: Point) -> f64 {
    let oa = a - o;
    let ob = b - o;
    oa.x * ob.y - oa.y * ob.x
}

#[inline]
pub fn distance_sq(p1: Point, p2: Point) -> f64 {
    (p1 - p2).norm_squared()
}

#[inline]
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p1 - p2).norm()
}

/// Lexicographic order (x first, then y).
pub fn lex_cmp(a: &Point, b: &Point) -> Ordering {
    a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y))
}

/// Sweep order (y first, then x): the order in which site events fire.
pub fn sweep_cmp(a: &Point, b: &Point) -> Ordering {
    a.y.total_cmp(&b.y).then_with(|| a.x.total_cmp(&b.x))
}

/// Center of the circle through three points. `None` when they are collinear.
pub fn circumcenter(a: Point, b: Point, c: Point, cfg: GeomCfg) -> Option<Point> {
    // translate `a` to the origin
    let b = b - a;
    let c = c - a;
    let d = 2.0 * (b.x * c.y - b.y * c.x);
    if !d.is_finite() || d.abs() <= cfg.eps_det {
        return None;
    }
    let bb = b.norm_squared();
    let cc = c.norm_squared();
    let ux = (c.y * bb - b.y * cc) / d;
    let uy = (b.x * cc - c.x * bb) / d;
    Some(Point::new(ux, uy) + a)
}

/// Coefficients `(a, b, c)` of `y = a·x² + b·x + c`, the set of points
/// equidistant from `focus` and the line `y = directrix`.
///
/// Pre: `focus.y != directrix`.
pub fn parabola_equation(focus: Point, directrix: f64) -> (f64, f64, f64) {
    let coeff = 1.0 / (2.0 * (focus.y - directrix));
    (
        coeff,
        -coeff * 2.0 * focus.x,
        coeff * focus.x * focus.x + (focus.y + directrix) / 2.0,
    )
}

/// x-coordinate of the breakpoint between the arc of `left` (on the left) and
/// the arc of `right` (on the right) for the sweep at `directrix`.
///
/// A focus lying on the directrix degenerates to a vertical ray at its x.
/// Equal curvature leaves a linear equation. Otherwise the root
/// `(-b - sqrt(b² - 4ac)) / 2a` is the one with `left` on its left; swapping
/// the arguments flips the sign of `a` and selects the other root.
pub fn parabola_intersection(left: Point, right: Point, directrix: f64, cfg: GeomCfg) -> f64 {
    if left.y == directrix {
        return left.x;
    }
    if right.y == directrix {
        return right.x;
    }
    let (a1, b1, c1) = parabola_equation(left, directrix);
    let (a2, b2, c2) = parabola_equation(right, directrix);
    let (a, b, c) = (a1 - a2, b1 - b2, c1 - c2);
    if a.abs() < cfg.eps_curvature {
        -c / b
    } else {
        let disc = (b * b - 4.0 * a * c).max(0.0);
        (-b - disc.sqrt()) / (2.0 * a)
    }
}

/// Whether `p` lies on the focus side of the parabola (already decided).
pub fn below_parabola(focus: Point, directrix: f64, p: Point) -> bool {
    let (a, b, c) = parabola_equation(focus, directrix);
    p.y <= a * p.x * p.x + b * p.x + c
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn circumcenter_right_triangle() {
        let cfg = GeomCfg::default();
        let c = circumcenter(
            vector![0.0, 0.0],
            vector![4.0, 0.0],
            vector![0.0, 2.0],
            cfg,
        )
        .unwrap();
        assert!((c - vector![2.0, 1.0]).norm() < 1e-12);
    }

    #[test]
    fn circumcenter_collinear_is_none() {
        let cfg = GeomCfg::default();
        assert!(circumcenter(
            vector![0.0, 0.0],
            vector![1.0, 1.0],
            vector![3.0, 3.0],
            cfg
        )
        .is_none());
    }

    #[test]
    fn parabola_points_are_equidistant() {
        let focus = vector![3.0, -1.0];
        let directrix = 2.5;
        let (a, b, c) = parabola_equation(focus, directrix);
        for x in [-4.0, 0.0, 3.0, 7.5] {
            let p = vector![x, a * x * x + b * x + c];
            let to_line = (p.y - directrix).abs();
            assert!((distance(p, focus) - to_line).abs() < 1e-9);
        }
    }

    #[test]
    fn intersection_equal_heights_is_midpoint() {
        let cfg = GeomCfg::default();
        let x = parabola_intersection(vector![0.0, 0.0], vector![10.0, 0.0], 5.0, cfg);
        assert!((x - 5.0).abs() < 1e-12);
    }

    #[test]
    fn intersection_branch_follows_argument_order() {
        let cfg = GeomCfg::default();
        let lo = vector![0.0, 0.0];
        let hi = vector![10.0, 2.0];
        let d = 5.0;
        let x_lr = parabola_intersection(lo, hi, d, cfg);
        let x_rl = parabola_intersection(hi, lo, d, cfg);
        assert!(x_lr < x_rl);
        // both are genuine intersections
        for x in [x_lr, x_rl] {
            let (a1, b1, c1) = parabola_equation(lo, d);
            let (a2, b2, c2) = parabola_equation(hi, d);
            let y1 = a1 * x * x + b1 * x + c1;
            let y2 = a2 * x * x + b2 * x + c2;
            assert!((y1 - y2).abs() < 1e-8);
        }
        // the higher site's arc is the upper envelope between the two roots
        let mid = 0.5 * (x_lr + x_rl);
        assert!(!below_parabola(lo, d, vector![mid, {
            let (a, b, c) = parabola_equation(hi, d);
            a * mid * mid + b * mid + c
        }]));
    }

    #[test]
    fn intersection_focus_on_directrix() {
        let cfg = GeomCfg::default();
        let x = parabola_intersection(vector![1.0, 0.0], vector![7.0, 3.0], 3.0, cfg);
        assert_eq!(x, 7.0);
    }

    #[test]
    fn sweep_order_is_y_major() {
        let mut pts = vec![vector![5.0, 1.0], vector![0.0, 2.0], vector![-3.0, 1.0]];
        pts.sort_by(sweep_cmp);
        assert_eq!(pts[0], vector![-3.0, 1.0]);
        assert_eq!(pts[2], vector![0.0, 2.0]);
        pts.sort_by(lex_cmp);
        assert_eq!(pts[0], vector![-3.0, 1.0]);
        assert_eq!(pts[2], vector![5.0, 1.0]);
        assert!(cross(pts[0], pts[1], pts[2]) < 0.0);
    }
}
