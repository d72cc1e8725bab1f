//! Monotone cubic interpolation in x.
//!
//! Produces the same path as a `monotoneX` curve: tangents follow
//! Steffen's method, so the curve never overshoots between two points and
//! stays monotone wherever the data is.

use std::fmt::Write as _;

use crate::svg::num;

/// Builds an SVG path through `points`, which must be sorted by x.
///
/// No points yields an empty string, one point a bare move, two points a
/// straight segment.
#[must_use]
pub fn monotone_x_path(points: &[(f64, f64)]) -> String {
    let mut path = String::new();
    let Some(&(x0, y0)) = points.first() else {
        return path;
    };
    let _ = write!(path, "M{},{}", num(x0), num(y0));

    match points.len() {
        1 => {}
        2 => {
            let (x1, y1) = points[1];
            let _ = write!(path, "L{},{}", num(x1), num(y1));
        }
        _ => {
            let tangents = tangents(points);
            for (p, t) in points.windows(2).zip(tangents.windows(2)) {
                segment(&mut path, p[0], p[1], t[0], t[1]);
            }
        }
    }

    path
}

fn tangents(points: &[(f64, f64)]) -> Vec<f64> {
    let n = points.len();
    let mut t = vec![0.0; n];
    for (i, w) in points.windows(3).enumerate() {
        t[i + 1] = interior_slope(w[0], w[1], w[2]);
    }
    t[0] = end_slope(points[0], points[1], t[1]);
    t[n - 1] = end_slope(points[n - 2], points[n - 1], t[n - 2]);
    t
}

fn sign(x: f64) -> f64 {
    if x < 0.0 { -1.0 } else { 1.0 }
}

/// Tangent at `p1` from its two neighbours.
fn interior_slope(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let h0 = p1.0 - p0.0;
    let h1 = p2.0 - p1.0;
    if h0 == 0.0 || h1 == 0.0 || h0 + h1 == 0.0 {
        return 0.0;
    }
    let s0 = (p1.1 - p0.1) / h0;
    let s1 = (p2.1 - p1.1) / h1;
    let p = s0.mul_add(h1, s1 * h0) / (h0 + h1);
    let slope = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if slope.is_finite() { slope } else { 0.0 }
}

/// Tangent at an end point, from the secant and the neighbouring tangent.
fn end_slope(p0: (f64, f64), p1: (f64, f64), t: f64) -> f64 {
    let h = p1.0 - p0.0;
    if h == 0.0 {
        t
    } else {
        (3.0 * (p1.1 - p0.1) / h - t) / 2.0
    }
}

fn segment(path: &mut String, p0: (f64, f64), p1: (f64, f64), t0: f64, t1: f64) {
    let dx = (p1.0 - p0.0) / 3.0;
    let _ = write!(
        path,
        "C{},{},{},{},{},{}",
        num(p0.0 + dx),
        num(dx.mul_add(t0, p0.1)),
        num(p1.0 - dx),
        num((-dx).mul_add(t1, p1.1)),
        num(p1.0),
        num(p1.1)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_single_point() {
        assert_eq!(monotone_x_path(&[]), "");
        assert_eq!(monotone_x_path(&[(1.0, 2.0)]), "M1,2");
    }

    #[test]
    fn two_points_are_a_line() {
        assert_eq!(monotone_x_path(&[(0.0, 0.0), (10.0, 5.0)]), "M0,0L10,5");
    }

    #[test]
    fn collinear_points_stay_straight() {
        let path = monotone_x_path(&[(0.0, 0.0), (3.0, 3.0), (6.0, 6.0)]);
        assert_eq!(path, "M0,0C1,1,2,2,3,3C4,4,5,5,6,6");
    }

    #[test]
    fn local_extremum_has_flat_tangent() {
        let pts = [(0.0, 0.0), (1.0, 10.0), (2.0, 0.0)];
        let t = tangents(&pts);
        assert!(t[1].abs() < f64::EPSILON);
    }

    #[test]
    fn control_points_do_not_overshoot_monotone_data() {
        let pts = [(0.0, 0.0), (1.0, 1.0), (2.0, 10.0), (3.0, 11.0)];
        let t = tangents(&pts);
        for i in 0..pts.len() - 1 {
            let dx = (pts[i + 1].0 - pts[i].0) / 3.0;
            let c0 = dx.mul_add(t[i], pts[i].1);
            let c1 = (-dx).mul_add(t[i + 1], pts[i + 1].1);
            assert!(c0 >= pts[i].1 && c0 <= pts[i + 1].1, "c0 overshoots on {i}");
            assert!(c1 >= pts[i].1 && c1 <= pts[i + 1].1, "c1 overshoots on {i}");
        }
    }
}
