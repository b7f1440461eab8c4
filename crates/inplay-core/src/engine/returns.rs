/// Simple period-over-period returns, oldest first.
///
/// `returns[k] = closes[i + 1] / closes[i] - 1` for each adjacent pair. A pair
/// is skipped when its base close is missing or zero, or when its later close
/// is missing, so the output can be shorter than `closes.len() - 1`.
pub fn simple_returns(closes: &[Option<f64>]) -> Vec<f64> {
    closes
        .windows(2)
        .filter_map(|pair| match (pair[0], pair[1]) {
            (Some(base), Some(next)) if base != 0.0 => Some(next / base - 1.0),
            _ => None,
        })
        .collect()
}
