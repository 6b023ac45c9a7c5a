use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse ordinal grade assigned to a sport score.
///
/// Variants are declared from lowest to highest so the derived `Ord`
/// ranks bands the way scores do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeBand {
    BelowAverage,
    Average,
    AboveAverage,
    High,
    Excellent,
}

impl GradeBand {
    pub fn key(self) -> &'static str {
        match self {
            GradeBand::Excellent => "excellent",
            GradeBand::High => "high",
            GradeBand::AboveAverage => "above_average",
            GradeBand::Average => "average",
            GradeBand::BelowAverage => "below_average",
        }
    }

    /// Korean display label
    pub fn label(self) -> &'static str {
        match self {
            GradeBand::Excellent => "최우수",
            GradeBand::High => "우수",
            GradeBand::AboveAverage => "평균 이상",
            GradeBand::Average => "평균",
            GradeBand::BelowAverage => "평균 이하",
        }
    }
}

impl fmt::Display for GradeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One row of the grade table.
///
/// `min_score` is an inclusive lower bound. The final row of a table has no
/// bound and catches every score below the rows above it.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GradeThreshold {
    pub band: GradeBand,
    #[serde(default)]
    pub min_score: Option<f64>,
    /// Representative percentile reported for every score in this band
    pub percentile: f64,
}

/// Percentile reported when a table has no rows at all
const FLOOR_PERCENTILE: f64 = 25.0;

/// Map a score to its representative percentile and band.
///
/// Rows are checked top-down; the first bound the score reaches wins.
/// Percentiles are fixed constants per band, not ranks against a population.
pub fn grade(score: f64, thresholds: &[GradeThreshold]) -> (f64, GradeBand) {
    for threshold in thresholds {
        match threshold.min_score {
            Some(min) if score >= min => return (threshold.percentile, threshold.band),
            Some(_) => continue,
            None => return (threshold.percentile, threshold.band),
        }
    }

    thresholds
        .last()
        .map(|t| (t.percentile, t.band))
        .unwrap_or((FLOOR_PERCENTILE, GradeBand::BelowAverage))
}

pub fn default_grade_table() -> Vec<GradeThreshold> {
    vec![
        GradeThreshold {
            band: GradeBand::Excellent,
            min_score: Some(85.0),
            percentile: 95.0,
        },
        GradeThreshold {
            band: GradeBand::High,
            min_score: Some(70.0),
            percentile: 85.0,
        },
        GradeThreshold {
            band: GradeBand::AboveAverage,
            min_score: Some(55.0),
            percentile: 65.0,
        },
        GradeThreshold {
            band: GradeBand::Average,
            min_score: Some(40.0),
            percentile: 45.0,
        },
        GradeThreshold {
            band: GradeBand::BelowAverage,
            min_score: None,
            percentile: FLOOR_PERCENTILE,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries_are_inclusive() {
        let table = default_grade_table();
        assert_eq!(grade(85.0, &table), (95.0, GradeBand::Excellent));
        assert_eq!(grade(84.99, &table), (85.0, GradeBand::High));
        assert_eq!(grade(70.0, &table), (85.0, GradeBand::High));
        assert_eq!(grade(55.0, &table), (65.0, GradeBand::AboveAverage));
        assert_eq!(grade(40.0, &table), (45.0, GradeBand::Average));
        assert_eq!(grade(39.99, &table), (25.0, GradeBand::BelowAverage));
    }

    #[test]
    fn test_extremes() {
        let table = default_grade_table();
        assert_eq!(grade(100.0, &table).1, GradeBand::Excellent);
        assert_eq!(grade(0.0, &table).1, GradeBand::BelowAverage);
        assert_eq!(grade(-5.0, &table).1, GradeBand::BelowAverage);
        assert_eq!(grade(250.0, &table).1, GradeBand::Excellent);
    }

    #[test]
    fn test_grade_is_monotonic() {
        let table = default_grade_table();
        let mut previous = grade(0.0, &table);
        for step in 1..=10_000 {
            let score = step as f64 / 100.0;
            let current = grade(score, &table);
            assert!(current.1 >= previous.1, "band dropped at {}", score);
            assert!(current.0 >= previous.0, "percentile dropped at {}", score);
            previous = current;
        }
    }

    #[test]
    fn test_empty_table_falls_back_to_floor() {
        assert_eq!(grade(99.0, &[]), (25.0, GradeBand::BelowAverage));
    }

    #[test]
    fn test_bounded_last_row_still_catches_low_scores() {
        let table = vec![
            GradeThreshold {
                band: GradeBand::High,
                min_score: Some(50.0),
                percentile: 80.0,
            },
            GradeThreshold {
                band: GradeBand::Average,
                min_score: Some(10.0),
                percentile: 40.0,
            },
        ];
        assert_eq!(grade(5.0, &table), (40.0, GradeBand::Average));
    }

    #[test]
    fn test_band_labels() {
        assert_eq!(GradeBand::AboveAverage.key(), "above_average");
        assert_eq!(GradeBand::Excellent.label(), "최우수");
        assert_eq!(
            serde_json::to_string(&GradeBand::BelowAverage).unwrap(),
            "\"below_average\""
        );
    }
}
