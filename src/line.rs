//! Path generator turning a sequence of points into the `d` attribute of an SVG path.
//!
//! # Monotone interpolation
//!
//! Points are joined by cubic Hermite segments whose tangents are limited (Fritsch-Carlson) so that the curve
//! never overshoots between two samples: a monotone run of samples stays monotone once drawn.
use crate::utils::fmt_num;

/// Slopes below this value are considered flat.
const FLAT_SLOPE: f64 = 1e-6;

/// A point in plot coordinates.
pub type Point = (f64, f64);

/// How consecutive points are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// Straight segments.
    Linear,
    /// Smooth cubic segments preserving monotonicity.
    Monotone,
}

/// Returns the path data joining the points, or None if there is no point at all.
pub fn path_data(points: &[Point], interpolation: Interpolation) -> Option<String> {
    if points.is_empty() {
        return None;
    }

    let body = match interpolation {
        Interpolation::Linear => linear(points),
        Interpolation::Monotone => monotone(points),
    };
    Some(format!("M{}", body))
}

fn fmt_point(point: &Point) -> String {
    format!("{},{}", fmt_num(point.0), fmt_num(point.1))
}

fn linear(points: &[Point]) -> String {
    if points.len() == 1 {
        return format!("{}Z", fmt_point(&points[0]));
    }
    points.iter().map(fmt_point).collect::<Vec<_>>().join("L")
}

fn monotone(points: &[Point]) -> String {
    if points.len() < 3 {
        return linear(points);
    }
    format!("{}{}", fmt_point(&points[0]), hermite(points, &monotone_tangents(points)))
}

fn slope(p0: &Point, p1: &Point) -> f64 {
    (p1.1 - p0.1) / (p1.0 - p0.0)
}

/// Average of the slopes on both sides of every point (one-sided at the ends).
fn finite_differences(points: &[Point]) -> Vec<f64> {
    let n = points.len();
    let slopes: Vec<f64> = points.windows(2).map(|w| slope(&w[0], &w[1])).collect();

    let mut m = Vec::with_capacity(n);
    m.push(slopes[0]);
    for i in 1..n - 1 {
        m.push((slopes[i - 1] + slopes[i]) / 2.0);
    }
    m.push(slopes[n - 2]);
    m
}

fn monotone_tangents(points: &[Point]) -> Vec<Point> {
    let mut m = finite_differences(points);
    let j = points.len() - 1;

    for i in 0..j {
        let d = slope(&points[i], &points[i + 1]);
        if d.abs() < FLAT_SLOPE {
            m[i] = 0.0;
            m[i + 1] = 0.0;
        } else {
            let a = m[i] / d;
            let b = m[i + 1] / d;
            let s = a * a + b * b;
            if s > 9.0 {
                let s = d * 3.0 / s.sqrt();
                m[i] = s * a;
                m[i + 1] = s * b;
            }
        }
    }

    (0..=j)
        .map(|i| {
            let s = (points[j.min(i + 1)].0 - points[i.saturating_sub(1)].0) / (6.0 * (1.0 + m[i] * m[i]));
            (or_zero(s), or_zero(m[i] * s))
        })
        .collect()
}

/// Non-finite tangent components are dropped.
fn or_zero(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

fn hermite(points: &[Point], tangents: &[Point]) -> String {
    let mut path = String::new();
    if tangents.len() < 2 {
        return path;
    }

    let (p0, t0) = (points[0], tangents[0]);
    let (p1, t1) = (points[1], tangents[1]);
    path.push_str(&format!(
        "C{},{},{},{},{},{}",
        fmt_num(p0.0 + t0.0),
        fmt_num(p0.1 + t0.1),
        fmt_num(p1.0 - t1.0),
        fmt_num(p1.1 - t1.1),
        fmt_num(p1.0),
        fmt_num(p1.1)
    ));

    for (p, t) in points.iter().zip(tangents.iter()).skip(2) {
        path.push_str(&format!(
            "S{},{},{},{}",
            fmt_num(p.0 - t.0),
            fmt_num(p.1 - t.1),
            fmt_num(p.0),
            fmt_num(p.1)
        ));
    }
    path
}

/// Returns the anchor points of a path, i.e., the points it passes through (control points excluded).
pub fn anchors(d: &str) -> Vec<Point> {
    let mut anchors = vec![];
    for segment in d.split(|c| matches!(c, 'M' | 'L' | 'C' | 'S')) {
        let numbers: Vec<f64> = segment
            .trim_end_matches('Z')
            .split(',')
            .filter_map(|n| n.trim().parse().ok())
            .collect();
        if numbers.len() >= 2 {
            anchors.push((numbers[numbers.len() - 2], numbers[numbers.len() - 1]));
        }
    }
    anchors
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_no_point() {
        assert_eq!(path_data(&[], Interpolation::Linear), None);
        assert_eq!(path_data(&[], Interpolation::Monotone), None);
    }

    #[test]
    fn test_linear() {
        assert_eq!(
            path_data(&[(0.0, 1.0)], Interpolation::Linear),
            Some("M0,1Z".to_string())
        );
        assert_eq!(
            path_data(&[(0.0, 1.0), (2.5, -3.0), (5.0, 0.0)], Interpolation::Linear),
            Some("M0,1L2.5,-3L5,0".to_string())
        );
    }

    #[test]
    fn test_monotone_falls_back_to_linear() {
        assert_eq!(
            path_data(&[(0.0, 1.0), (2.0, 3.0)], Interpolation::Monotone),
            Some("M0,1L2,3".to_string())
        );
    }

    #[test]
    fn test_monotone_on_a_straight_line() {
        // Equally spaced points on a line: every tangent follows the line.
        let points = vec![(0.0, 0.0), (3.0, 3.0), (6.0, 6.0)];
        let tangents = monotone_tangents(&points);
        assert_relative_eq!(tangents[0].0, 0.25);
        assert_relative_eq!(tangents[0].1, 0.25);
        assert_relative_eq!(tangents[1].0, 0.5);
        assert_relative_eq!(tangents[2].0, 0.25);

        assert_eq!(
            path_data(&points, Interpolation::Monotone),
            Some("M0,0C0.25,0.25,2.5,2.5,3,3S5.75,5.75,6,6".to_string())
        );
    }

    #[test]
    fn test_monotone_flat_segments() {
        let points = vec![(0.0, 1.0), (1.0, 1.0), (2.0, 5.0), (3.0, 5.0)];
        let tangents = monotone_tangents(&points);
        // flat segments have horizontal tangents at both ends
        assert_eq!(tangents[0].1, 0.0);
        assert_eq!(tangents[1].1, 0.0);
        assert_eq!(tangents[2].1, 0.0);
        assert_eq!(tangents[3].1, 0.0);

        // the curve never leaves [1, 5]
        let d = path_data(&points, Interpolation::Monotone).unwrap();
        for (_, y) in anchors(&d) {
            assert!((1.0..=5.0).contains(&y));
        }
    }

    #[test]
    fn test_monotone_limits_overshoot() {
        let points = vec![(0.0, 0.0), (1.0, 0.1), (2.0, 10.0), (3.0, 10.1)];
        let m = finite_differences(&points);
        assert_relative_eq!(m[1], 5.0);
        let tangents = monotone_tangents(&points);
        // the tangent at the second point is rescaled so that a^2 + b^2 <= 9 on the first segment
        let d = 0.1;
        let a = (tangents[0].1 / tangents[0].0) / d;
        let b = (tangents[1].1 / tangents[1].0) / d;
        assert!(a * a + b * b <= 9.0 + 1e-9);
    }

    #[test]
    fn test_anchors() {
        let d = "M0,0C0.25,0.25,2.5,2.5,3,3S5.75,5.75,6,6";
        assert_eq!(anchors(d), vec![(0.0, 0.0), (3.0, 3.0), (6.0, 6.0)]);
        assert_eq!(anchors("M1,2Z"), vec![(1.0, 2.0)]);
        assert_eq!(anchors("M1,2L-3,4.5"), vec![(1.0, 2.0), (-3.0, 4.5)]);
    }
}
