//! Input checks and sweep ordering for site sets.

use crate::error::VoronoiError;
use crate::geom::{sweep_cmp, Point};

/// Reject non-finite coordinates and coincident sites.
///
/// Empty and single-site inputs are valid.
pub fn validate(points: &[Point]) -> Result<(), VoronoiError> {
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(VoronoiError::NonFiniteSite { index });
    }
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&i, &j| sweep_cmp(&points[i], &points[j]).then(i.cmp(&j)));
    for w in order.windows(2) {
        if points[w[0]] == points[w[1]] {
            return Err(VoronoiError::DuplicateSite {
                index: w[1],
                other: w[0],
            });
        }
    }
    Ok(())
}

/// Sort into sweep order (y, then x), drop exact duplicates and non-finite points.
pub fn prepare(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = points
        .iter()
        .copied()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .collect();
    out.sort_by(sweep_cmp);
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn empty_and_single_are_valid() {
        assert!(validate(&[]).is_ok());
        assert!(validate(&[vector![0.0, 0.0]]).is_ok());
    }

    #[test]
    fn rejects_nan_and_infinity() {
        let pts = [vector![0.0, 0.0], vector![f64::NAN, 1.0]];
        assert_eq!(
            validate(&pts),
            Err(VoronoiError::NonFiniteSite { index: 1 })
        );
        let pts = [vector![f64::INFINITY, 0.0]];
        assert_eq!(
            validate(&pts),
            Err(VoronoiError::NonFiniteSite { index: 0 })
        );
    }

    #[test]
    fn reports_duplicate_pair() {
        let pts = [vector![1.0, 1.0], vector![0.0, 0.0], vector![1.0, 1.0]];
        assert_eq!(
            validate(&pts),
            Err(VoronoiError::DuplicateSite { index: 2, other: 0 })
        );
    }

    #[test]
    fn prepare_sorts_and_dedups() {
        let pts = [
            vector![2.0, 1.0],
            vector![0.0, 3.0],
            vector![2.0, 1.0],
            vector![-1.0, 1.0],
            vector![f64::NAN, 0.0],
        ];
        let out = prepare(&pts);
        assert_eq!(
            out,
            vec![vector![-1.0, 1.0], vector![2.0, 1.0], vector![0.0, 3.0]]
        );
        assert!(validate(&out).is_ok());
    }
}
