//! Peak, trough and inflection detection on sampled curves.

use std::cmp::Ordering;

/// Indices of strict local maxima. The first and last samples are never
/// peaks, and a missing value in the neighbourhood rules the index out.
pub fn find_peaks(values: &[Option<f64>]) -> Vec<usize> {
    local_extrema(values, Ordering::Greater)
}

/// Indices of strict local minima (peaks of the negated series).
pub fn find_troughs(values: &[Option<f64>]) -> Vec<usize> {
    local_extrema(values, Ordering::Less)
}

fn local_extrema(values: &[Option<f64>], want: Ordering) -> Vec<usize> {
    values
        .windows(3)
        .enumerate()
        .filter_map(|(i, w)| match (w[0], w[1], w[2]) {
            (Some(prev), Some(cur), Some(next))
                if cur.partial_cmp(&prev) == Some(want) && cur.partial_cmp(&next) == Some(want) =>
            {
                Some(i + 1)
            }
            _ => None,
        })
        .collect()
}

/// Numeric derivative `dy/dx` with the same length as the inputs.
///
/// Interior points use the second-order central difference for unevenly
/// spaced samples; the end points use one-sided differences. Missing inputs
/// or zero spacing give `None`.
pub fn gradient(y: &[Option<f64>], x: &[Option<f64>]) -> Vec<Option<f64>> {
    let n = y.len().min(x.len());
    if n < 2 {
        return vec![None; n];
    }

    let one_sided = |a: usize, b: usize| -> Option<f64> {
        let dx = x[b]? - x[a]?;
        if dx == 0.0 {
            return None;
        }
        Some((y[b]? - y[a]?) / dx)
    };

    let mut out = Vec::with_capacity(n);
    out.push(one_sided(0, 1));
    for i in 1..n - 1 {
        out.push(central(y[i - 1], y[i], y[i + 1], x[i - 1], x[i], x[i + 1]));
    }
    out.push(one_sided(n - 2, n - 1));
    out
}

fn central(
    y0: Option<f64>,
    y1: Option<f64>,
    y2: Option<f64>,
    x0: Option<f64>,
    x1: Option<f64>,
    x2: Option<f64>,
) -> Option<f64> {
    let (y0, y1, y2) = (y0?, y1?, y2?);
    let hd = x1? - x0?;
    let hs = x2? - x1?;
    let denom = hd * hs * (hd + hs);
    if denom == 0.0 {
        return None;
    }
    Some((hd * hd * y2 - hs * hs * y0 + (hs * hs - hd * hd) * y1) / denom)
}

/// `None` for NaN, which has no sign.
fn sign(v: f64) -> Option<i8> {
    if v > 0.0 {
        Some(1)
    } else if v < 0.0 {
        Some(-1)
    } else if v == 0.0 {
        Some(0)
    } else {
        None
    }
}

/// Indices `i` where the sign of `derivative[i]` differs from that of
/// `derivative[i + 1]`. Zero counts as its own sign; missing or NaN values
/// never take part in a change.
pub fn sign_changes(derivative: &[Option<f64>]) -> Vec<usize> {
    let signs: Vec<Option<i8>> = derivative.iter().map(|d| d.and_then(sign)).collect();
    signs
        .windows(2)
        .enumerate()
        .filter_map(|(i, w)| match (w[0], w[1]) {
            (Some(a), Some(b)) if a != b => Some(i),
            _ => None,
        })
        .collect()
}

/// Inflection indices of `y(x)`: where the slope changes sign.
pub fn find_inflections(y: &[Option<f64>], x: &[Option<f64>]) -> Vec<usize> {
    sign_changes(&gradient(y, x))
}

/// Map detected indices to x positions, dropping indices whose x is missing.
pub fn positions(indices: &[usize], x: &[Option<f64>]) -> Vec<f64> {
    indices
        .iter()
        .filter_map(|&i| x.get(i).copied().flatten())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_peaks_and_negated_troughs_agree() {
        let v = some(&[0.0, 1.0, 3.0, 1.0, 0.0, 2.0, 0.0]);
        assert_eq!(find_peaks(&v), vec![2, 5]);
        let negated = some(&[0.0, -1.0, -3.0, -1.0, 0.0, -2.0, 0.0]);
        assert_eq!(find_troughs(&negated), vec![2, 5]);
    }

    #[test]
    fn test_isolated_peak() {
        let v = some(&[0.0, 1.0, 3.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(find_peaks(&v), vec![2]);
    }

    #[test]
    fn test_troughs() {
        let v = some(&[0.0, 1.0, 3.0, 1.0, 0.0, 2.0, 0.0]);
        assert_eq!(find_troughs(&v), vec![4]);
    }

    #[test]
    fn test_monotonic_has_no_extrema() {
        let v = some(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(find_peaks(&v).is_empty());
        assert!(find_troughs(&v).is_empty());
    }

    #[test]
    fn test_boundaries_are_never_peaks() {
        let v = some(&[5.0, 1.0, 5.0]);
        assert!(find_peaks(&v).is_empty());
        assert_eq!(find_troughs(&v), vec![1]);
    }

    #[test]
    fn test_plateau_is_not_a_peak() {
        let v = some(&[0.0, 2.0, 2.0, 0.0]);
        assert!(find_peaks(&v).is_empty());
    }

    #[test]
    fn test_missing_neighbour_blocks_peak() {
        let v = vec![Some(0.0), Some(3.0), None, Some(4.0), Some(5.0), Some(1.0)];
        assert_eq!(find_peaks(&v), vec![4]);
    }

    #[test]
    fn test_gradient_uniform_spacing() {
        let x = some(&[0.0, 1.0, 2.0, 3.0]);
        let y = some(&[0.0, 1.0, 4.0, 9.0]);
        assert_eq!(gradient(&y, &x), some(&[1.0, 2.0, 4.0, 5.0]));
    }

    #[test]
    fn test_gradient_uneven_spacing_is_exact_for_quadratics() {
        let x = some(&[0.0, 1.0, 3.0]);
        let y = some(&[0.0, 1.0, 9.0]);
        let d = gradient(&y, &x);
        assert!((d[1].unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_gradient_zero_spacing_is_missing() {
        let x = some(&[1.0, 1.0, 2.0]);
        let y = some(&[0.0, 1.0, 2.0]);
        let d = gradient(&y, &x);
        assert_eq!(d[0], None);
        assert_eq!(d[1], None);
        assert_eq!(d[2], Some(1.0));
    }

    #[test]
    fn test_gradient_short_series() {
        assert_eq!(gradient(&some(&[1.0]), &some(&[1.0])), vec![None]);
        assert!(gradient(&[], &[]).is_empty());
    }

    #[test]
    fn test_sign_changes() {
        let d = some(&[1.0, 2.0, -1.0, -0.5, 3.0]);
        assert_eq!(sign_changes(&d), vec![1, 3]);
    }

    #[test]
    fn test_sign_changes_zero_and_missing() {
        let d = vec![Some(1.0), Some(0.0), None, Some(-1.0), Some(-2.0)];
        assert_eq!(sign_changes(&d), vec![0]);
    }

    #[test]
    fn test_sign_changes_ignore_nan() {
        let d = vec![Some(-1.0), Some(f64::NAN), Some(-1.0), Some(-2.0)];
        assert!(sign_changes(&d).is_empty());
    }

    #[test]
    fn test_inflections_and_positions() {
        let x = some(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let y = some(&[0.0, 1.0, 2.0, 1.0, 0.0]);
        let idx = find_inflections(&y, &x);
        assert_eq!(idx, vec![1, 2]);
        assert_eq!(positions(&idx, &x), vec![20.0, 30.0]);
    }
}
