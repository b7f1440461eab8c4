/// Sample standard deviation (n - 1) of the most recent `window` returns.
///
/// Uses `min(returns.len(), window)` values and returns `None` when fewer
/// than two are available.
pub fn trailing_volatility(returns: &[f64], window: usize) -> Option<f64> {
    let start = returns.len().saturating_sub(window);
    sample_std_dev(&returns[start..])
}

fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);

    Some(variance.sqrt())
}
