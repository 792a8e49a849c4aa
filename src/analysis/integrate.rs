/// Trapezoidal integral of `y` over `x`.
///
/// Pairs where either coordinate is missing are dropped and the remaining
/// points are integrated in order. Fewer than two usable points give `0.0`.
pub fn trapezoid(y: &[Option<f64>], x: &[Option<f64>]) -> f64 {
    let points: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(xi, yi)| Some(((*xi)?, (*yi)?)))
        .collect();

    points
        .windows(2)
        .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) / 2.0)
        .sum()
}
