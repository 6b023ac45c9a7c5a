use super::config::WeightVector;
use super::normalize::NormalizedVector;

/// Weighted sum of normalized scores, rounded to two decimals.
///
/// Kinds missing from `weights` contribute nothing. Summation follows the
/// weight map's key order so repeated calls are bit-identical.
pub fn weighted_score(normalized: &NormalizedVector, weights: &WeightVector) -> f64 {
    let total: f64 = weights
        .iter()
        .map(|(kind, weight)| normalized.get(*kind) * weight)
        .sum();
    round_hundredths(total)
}

/// Round to two decimals, ties to even
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
