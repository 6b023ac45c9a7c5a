use super::config::{NormalizationRange, NormalizationTables};
use super::measurement::{Gender, MeasurementKind, MeasurementSet};

/// Upper end of the common scale every measurement is mapped onto
pub const SCALE_MAX: f64 = 100.0;

/// Normalized 0-100 score for every measurement kind.
///
/// Always dense: kinds that were not measured hold 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalizedVector([f64; 5]);

impl NormalizedVector {
    pub fn get(&self, kind: MeasurementKind) -> f64 {
        self.0[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeasurementKind, f64)> + '_ {
        MeasurementKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }
}

/// Clamp a raw value into `range` and rescale it linearly onto 0-100.
///
/// Absent (and NaN) values score 0. Out-of-range values saturate.
/// `range.min < range.max` must hold; tables are validated before use.
pub fn scale(value: Option<f64>, range: NormalizationRange) -> f64 {
    match value {
        Some(v) if !v.is_nan() => {
            let clamped = v.clamp(range.min, range.max);
            (clamped - range.min) / (range.max - range.min) * SCALE_MAX
        }
        _ => 0.0,
    }
}

/// Normalize one measurement using the range for its gender bucket.
/// Unrecognized gender (None) uses the unspecified bucket.
pub fn normalize(
    tables: &NormalizationTables,
    value: Option<f64>,
    kind: MeasurementKind,
    gender: Option<Gender>,
) -> f64 {
    scale(value, tables.for_gender(gender).get(kind))
}

/// Normalize every measurement kind of a set in one pass
pub fn normalize_all(tables: &NormalizationTables, measurements: &MeasurementSet) -> NormalizedVector {
    let ranges = tables.for_gender(measurements.gender);
    let mut scores = [0.0; 5];
    for (kind, range) in ranges.iter() {
        scores[kind.index()] = scale(measurements.value(kind), range);
    }
    NormalizedVector(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringTables;

    fn tables() -> NormalizationTables {
        ScoringTables::default().normalization
    }

    #[test]
    fn test_absent_value_scores_zero() {
        let range = NormalizationRange::new(10.0, 45.0);
        assert_eq!(scale(None, range), 0.0);
    }

    #[test]
    fn test_nan_scores_zero() {
        let range = NormalizationRange::new(10.0, 45.0);
        assert_eq!(scale(Some(f64::NAN), range), 0.0);
    }

    #[test]
    fn test_linear_rescale() {
        let range = NormalizationRange::new(10.0, 60.0);
        assert_eq!(scale(Some(10.0), range), 0.0);
        assert_eq!(scale(Some(35.0), range), 50.0);
        assert_eq!(scale(Some(60.0), range), 100.0);
    }

    #[test]
    fn test_saturates_outside_range() {
        let range = NormalizationRange::new(-5.0, 30.0);
        assert_eq!(scale(Some(-40.0), range), 0.0);
        assert_eq!(scale(Some(99.0), range), 100.0);
        assert_eq!(scale(Some(f64::INFINITY), range), 100.0);
        assert_eq!(scale(Some(f64::NEG_INFINITY), range), 0.0);
    }

    #[test]
    fn test_negative_bounds() {
        // Sit-and-reach range straddles zero
        let range = NormalizationRange::new(-10.0, 25.0);
        assert!((scale(Some(0.0), range) - 28.571428571428573).abs() < 1e-9);
    }

    #[test]
    fn test_gender_specific_range() {
        let t = tables();
        assert_eq!(
            normalize(&t, Some(50.0), MeasurementKind::GripStrength, Some(Gender::Male)),
            100.0
        );
        assert_eq!(
            normalize(&t, Some(35.0), MeasurementKind::GripStrength, Some(Gender::Female)),
            100.0
        );
        // Unspecified: (35 - 10) / (45 - 10)
        let fallback = normalize(&t, Some(35.0), MeasurementKind::GripStrength, None);
        assert!((fallback - 71.42857142857143).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_all_is_dense() {
        let t = tables();
        let set = MeasurementSet {
            grip_strength: Some(50.0),
            gender: Some(Gender::Male),
            ..Default::default()
        };
        let vector = normalize_all(&t, &set);
        assert_eq!(vector.iter().count(), 5);
        assert_eq!(vector.get(MeasurementKind::GripStrength), 100.0);
        assert_eq!(vector.get(MeasurementKind::SitUps), 0.0);
        assert_eq!(vector.get(MeasurementKind::SitAndReach), 0.0);
    }

    #[test]
    fn test_normalize_all_matches_single_normalize() {
        let t = tables();
        let set = MeasurementSet {
            grip_strength: Some(28.0),
            sit_ups: Some(40),
            standing_long_jump: Some(190.0),
            shuttle_run_20m: Some(47),
            sit_and_reach: Some(8.5),
            gender: Some(Gender::Female),
            disability: None,
        };
        let vector = normalize_all(&t, &set);
        for kind in MeasurementKind::ALL {
            assert_eq!(vector.get(kind), normalize(&t, set.value(kind), kind, set.gender));
        }
    }

    #[test]
    fn test_bounds_hold_for_sweep() {
        let t = tables();
        for gender in [Some(Gender::Male), Some(Gender::Female), None] {
            for kind in MeasurementKind::ALL {
                for raw in -100..=400 {
                    let score = normalize(&t, Some(raw as f64), kind, gender);
                    assert!((0.0..=100.0).contains(&score), "{} -> {}", raw, score);
                }
            }
        }
    }
}
