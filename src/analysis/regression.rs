//! Ordinary least-squares line fit over a masked subset of points.

use crate::error::FitError;

/// `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Number of points the fit used.
    pub points: usize,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// `true` where `lo <= value <= hi`. Missing values are never selected.
pub fn range_mask(values: &[Option<f64>], (lo, hi): (f64, f64)) -> Vec<bool> {
    values
        .iter()
        .map(|v| v.is_some_and(|v| v >= lo && v <= hi))
        .collect()
}

/// Fit a line through exactly the points selected by `mask` that have both
/// coordinates present.
pub fn linear_fit(
    x: &[Option<f64>],
    y: &[Option<f64>],
    mask: &[bool],
) -> Result<LinearFit, FitError> {
    let selected: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .zip(mask)
        .filter(|(_, keep)| **keep)
        .filter_map(|((xi, yi), _)| Some(((*xi)?, (*yi)?)))
        .collect();

    let n = selected.len();
    if n < 2 {
        return Err(FitError::InsufficientPoints(n));
    }

    let nf = n as f64;
    let mean_x = selected.iter().map(|p| p.0).sum::<f64>() / nf;
    let mean_y = selected.iter().map(|p| p.1).sum::<f64>() / nf;

    let (sxx, sxy) = selected.iter().fold((0.0, 0.0), |(sxx, sxy), &(xi, yi)| {
        let dx = xi - mean_x;
        (sxx + dx * dx, sxy + dx * (yi - mean_y))
    });
    if sxx == 0.0 {
        return Err(FitError::DegenerateX);
    }

    let slope = sxy / sxx;
    Ok(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
        points: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_fit_identity_line() {
        let x = some(&[0.0, 1.0, 2.0]);
        let fit = linear_fit(&x, &x, &[true, true, true]).unwrap();
        assert!((fit.slope - 1.0).abs() < 1e-12);
        assert!(fit.intercept.abs() < 1e-12);
        assert_eq!(fit.points, 3);
    }

    #[test]
    fn test_fit_uses_only_masked_points() {
        let x = some(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let y = some(&[100.0, 3.0, 5.0, 7.0, -50.0]);
        let fit = linear_fit(&x, &y, &[false, true, true, true, false]).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.predict(10.0) - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_insufficient_points() {
        let x = some(&[0.0, 1.0]);
        assert_eq!(
            linear_fit(&x, &x, &[true, false]),
            Err(FitError::InsufficientPoints(1))
        );
        let with_gap = vec![Some(0.0), None];
        assert_eq!(
            linear_fit(&with_gap, &x, &[true, true]),
            Err(FitError::InsufficientPoints(1))
        );
    }

    #[test]
    fn test_fit_degenerate_x() {
        let x = some(&[2.0, 2.0, 2.0]);
        let y = some(&[1.0, 2.0, 3.0]);
        assert_eq!(linear_fit(&x, &y, &[true; 3]), Err(FitError::DegenerateX));
    }

    #[test]
    fn test_range_mask_inclusive() {
        let v = vec![Some(0.0005), Some(0.001), Some(0.002), None, Some(0.003), Some(0.004)];
        assert_eq!(
            range_mask(&v, (0.001, 0.003)),
            vec![false, true, true, false, true, false]
        );
    }
}
