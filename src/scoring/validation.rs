use std::collections::HashSet;

use super::config::{ScoringTables, SportProfile};
use super::measurement::DisabilityCategory;

/// Allowed drift of a weight vector's sum from 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Validate scoring tables at load time.
/// Returns all validation errors at once (not just the first).
pub fn validate_tables(tables: &ScoringTables) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Normalization ranges: finite and min < max, so rescaling never divides by zero
    for (bucket, ranges) in tables.normalization.buckets() {
        for (kind, range) in ranges.iter() {
            if !range.min.is_finite() || !range.max.is_finite() {
                errors.push(format!(
                    "scoring.normalization.{}.{}: bounds must be finite",
                    bucket, kind
                ));
            } else if range.min >= range.max {
                errors.push(format!(
                    "scoring.normalization.{}.{}: min ({}) must be less than max ({})",
                    bucket, kind, range.min, range.max
                ));
            }
        }
    }

    validate_catalog("scoring.sports", &tables.sports, &mut errors);
    for category in DisabilityCategory::ALL {
        validate_catalog(
            &format!("scoring.adapted.{}", category),
            tables.adapted.for_category(category),
            &mut errors,
        );
    }

    validate_grades(tables, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_catalog(path: &str, catalog: &[SportProfile], errors: &mut Vec<String>) {
    if catalog.is_empty() {
        errors.push(format!("{}: must list at least one sport", path));
        return;
    }

    let mut seen = HashSet::new();
    for (i, profile) in catalog.iter().enumerate() {
        if profile.id.trim().is_empty() {
            errors.push(format!("{}[{}].id: must not be empty", path, i));
        } else if !seen.insert(profile.id.as_str()) {
            errors.push(format!("{}[{}].id: duplicate sport '{}'", path, i, profile.id));
        }

        let mut weights_ok = true;
        for (kind, weight) in &profile.weights {
            if !weight.is_finite() || *weight < 0.0 || *weight > 1.0 {
                errors.push(format!(
                    "{}[{}].weights.{}: must be between 0 and 1, got {}",
                    path, i, kind, weight
                ));
                weights_ok = false;
            }
        }

        // Only meaningful once every entry is in range
        if weights_ok {
            let sum = profile.weight_sum();
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                errors.push(format!(
                    "{}[{}].weights: must sum to 1.0 for '{}', got {}",
                    path, i, profile.id, sum
                ));
            }
        }
    }
}

fn validate_grades(tables: &ScoringTables, errors: &mut Vec<String>) {
    let grades = &tables.grades;
    if grades.is_empty() {
        errors.push("scoring.grades: must list at least one band".to_string());
        return;
    }

    let last = grades.len() - 1;
    let mut bands = HashSet::new();
    let mut previous_min: Option<f64> = None;
    let mut previous_percentile: Option<f64> = None;

    for (i, row) in grades.iter().enumerate() {
        if !bands.insert(row.band) {
            errors.push(format!("scoring.grades[{}].band: duplicate band '{}'", i, row.band));
        }

        match (row.min_score, i == last) {
            (None, false) => errors.push(format!(
                "scoring.grades[{}].min_score: required on every row but the last",
                i
            )),
            (Some(_), true) => errors.push(format!(
                "scoring.grades[{}].min_score: the last row catches all lower scores and takes no bound",
                i
            )),
            (Some(min), false) => {
                if !min.is_finite() {
                    errors.push(format!("scoring.grades[{}].min_score: must be finite", i));
                } else if let Some(prev) = previous_min {
                    if min >= prev {
                        errors.push(format!(
                            "scoring.grades[{}].min_score: must be lower than the row above ({} >= {})",
                            i, min, prev
                        ));
                    }
                }
                previous_min = Some(min);
            }
            (None, true) => {}
        }

        if !(0.0..=100.0).contains(&row.percentile) {
            errors.push(format!(
                "scoring.grades[{}].percentile: must be between 0 and 100, got {}",
                i, row.percentile
            ));
        } else if let Some(prev) = previous_percentile {
            if row.percentile > prev {
                errors.push(format!(
                    "scoring.grades[{}].percentile: must not exceed the row above ({} > {})",
                    i, row.percentile, prev
                ));
            }
        }
        previous_percentile = Some(row.percentile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{GradeBand, GradeThreshold, MeasurementKind, NormalizationRange};

    #[test]
    fn test_default_tables_valid() {
        assert!(validate_tables(&ScoringTables::default()).is_ok());
    }

    #[test]
    fn test_degenerate_range() {
        let mut tables = ScoringTables::default();
        tables.normalization.female.sit_ups = NormalizationRange::new(30.0, 30.0);
        let errors = validate_tables(&tables).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.normalization.female.sit_ups"));
    }

    #[test]
    fn test_inverted_range() {
        let mut tables = ScoringTables::default();
        tables.normalization.unspecified.sit_and_reach = NormalizationRange::new(30.0, -5.0);
        let errors = validate_tables(&tables).unwrap_err();
        assert!(errors[0].contains("min (30) must be less than max (-5)"));
    }

    #[test]
    fn test_weights_not_summing_to_one() {
        let mut tables = ScoringTables::default();
        tables.sports[2] = SportProfile::from_weights("volleyball", [0.2, 0.2, 0.2, 0.2, 0.1]);
        let errors = validate_tables(&tables).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.sports[2].weights"));
        assert!(errors[0].contains("volleyball"));
    }

    #[test]
    fn test_negative_weight() {
        let mut tables = ScoringTables::default();
        tables.adapted.visual[0]
            .weights
            .insert(MeasurementKind::GripStrength, -0.2);
        let errors = validate_tables(&tables).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.adapted.visual[0].weights.grip_strength"));
    }

    #[test]
    fn test_empty_adapted_catalog() {
        let mut tables = ScoringTables::default();
        tables.adapted.hearing.clear();
        let errors = validate_tables(&tables).unwrap_err();
        assert_eq!(errors, vec!["scoring.adapted.hearing: must list at least one sport"]);
    }

    #[test]
    fn test_duplicate_sport() {
        let mut tables = ScoringTables::default();
        let judo = tables.sports[4].clone();
        tables.sports.push(judo);
        let errors = validate_tables(&tables).unwrap_err();
        assert!(errors[0].contains("duplicate sport 'judo'"));
    }

    #[test]
    fn test_grades_out_of_order() {
        let mut tables = ScoringTables::default();
        tables.grades.swap(1, 2);
        let errors = validate_tables(&tables).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("scoring.grades[2].min_score")));
    }

    #[test]
    fn test_grade_rows_need_unbounded_floor() {
        let mut tables = ScoringTables::default();
        tables.grades.pop();
        let errors = validate_tables(&tables).unwrap_err();
        assert!(errors[0].contains("scoring.grades[3].min_score"));
    }

    #[test]
    fn test_grade_percentile_range() {
        let mut tables = ScoringTables::default();
        tables.grades[0] = GradeThreshold {
            band: GradeBand::Excellent,
            min_score: Some(85.0),
            percentile: 120.0,
        };
        let errors = validate_tables(&tables).unwrap_err();
        assert!(errors[0].contains("scoring.grades[0].percentile"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut tables = ScoringTables::default();
        tables.normalization.male.grip_strength = NormalizationRange::new(50.0, 10.0); // Error 1
        tables.sports.clear(); // Error 2
        tables.grades.clear(); // Error 3
        let errors = validate_tables(&tables).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
