//! Point-density reduction and denoising of measurement series.

/// Keep every `stride`-th element, starting with the first.
///
/// The result has `ceil(len / stride)` elements. A stride of zero is treated
/// as one.
pub fn downsample<T: Clone>(series: &[T], stride: usize) -> Vec<T> {
    series.iter().step_by(stride.max(1)).cloned().collect()
}

/// Trailing moving average over `window` samples.
///
/// The output has the same length as the input. Position `i` holds the mean
/// of `series[i + 1 - window..=i]`; it is `None` for the first `window - 1`
/// positions and wherever the window contains a missing value.
pub fn moving_average(series: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    let mut out = vec![None; series.len()];
    if series.len() < window {
        return out;
    }

    for (i, slot) in out.iter_mut().enumerate().skip(window - 1) {
        let cells = &series[i + 1 - window..=i];
        *slot = cells
            .iter()
            .try_fold(0.0, |acc, v| v.map(|v| acc + v))
            .map(|sum| sum / window as f64);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_downsample_default_stride() {
        let series: Vec<i32> = (0..25).collect();
        assert_eq!(downsample(&series, 10), vec![0, 10, 20]);
    }

    #[test]
    fn test_downsample_empty() {
        let series: Vec<f64> = Vec::new();
        assert!(downsample(&series, 3).is_empty());
    }

    #[test]
    fn test_moving_average_window_three() {
        let series = [Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(8.0)];
        let out = moving_average(&series, 3);
        assert_eq!(out, vec![None, None, Some(2.0), Some(3.0), Some(5.0)]);
    }

    #[test]
    fn test_moving_average_missing_cell_poisons_window() {
        let series = [Some(1.0), None, Some(3.0), Some(5.0), Some(7.0)];
        let out = moving_average(&series, 2);
        assert_eq!(out, vec![None, None, None, Some(4.0), Some(6.0)]);
    }

    #[test]
    fn test_moving_average_shorter_than_window() {
        let series = [Some(1.0), Some(2.0)];
        assert_eq!(moving_average(&series, 5), vec![None, None]);
    }

    proptest! {
        #[test]
        fn prop_downsample_length_and_content(
            series in proptest::collection::vec(any::<i64>(), 0..200),
            stride in 1usize..20,
        ) {
            let out = downsample(&series, stride);
            prop_assert_eq!(out.len(), series.len().div_ceil(stride));
            for (k, v) in out.iter().enumerate() {
                prop_assert_eq!(*v, series[k * stride]);
            }
        }

        #[test]
        fn prop_moving_average_matches_window_mean(
            series in proptest::collection::vec(-1.0e6f64..1.0e6, 0..100),
            window in 1usize..10,
        ) {
            let cells: Vec<Option<f64>> = series.iter().copied().map(Some).collect();
            let out = moving_average(&cells, window);
            prop_assert_eq!(out.len(), series.len());
            for (i, v) in out.iter().enumerate() {
                if i + 1 < window {
                    prop_assert!(v.is_none());
                } else {
                    let expected: f64 =
                        series[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
                    let got = v.expect("window is complete");
                    prop_assert!((got - expected).abs() <= 1e-9 * expected.abs().max(1.0));
                }
            }
        }
    }
}
