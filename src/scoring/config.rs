use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::grade::{default_grade_table, GradeThreshold};
use super::measurement::{DisabilityCategory, Gender, MeasurementKind};

/// Scoring tables driving the engine.
///
/// The `Default` impl carries the built-in tables. A config file may replace
/// them wholesale under the `scoring` key.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   normalization:
///     male:
///       grip_strength: { min: 10, max: 50 }
///       # ... all five measurements
///     female: { ... }
///     unspecified: { ... }
///   sports:
///     - id: soccer
///       weights: { grip_strength: 0.1, sit_ups: 0.2, standing_long_jump: 0.25,
///                  shuttle_run_20m: 0.3, sit_and_reach: 0.15 }
///   adapted:
///     physical: [ ... ]
///     visual: [ ... ]
///     hearing: [ ... ]
///     intellectual: [ ... ]
///   grades:
///     - { band: excellent, min_score: 85, percentile: 95 }
///     - { band: below_average, percentile: 25 }
///   sport_names:
///     soccer: 축구
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringTables {
    /// Clamped linear ranges per gender bucket
    pub normalization: NormalizationTables,

    /// General sport catalog, in output tie-break order
    pub sports: Vec<SportProfile>,

    /// Adapted discipline catalogs, one per disability category
    pub adapted: AdaptedCatalogs,

    /// Grade rows, highest band first
    #[serde(default = "default_grade_table")]
    pub grades: Vec<GradeThreshold>,

    /// Sport id -> display name. Ids without an entry display as the id.
    #[serde(default = "default_sport_names")]
    pub sport_names: BTreeMap<String, String>,
}

/// Inclusive (min, max) bounds for one measurement.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NormalizationRange {
    pub min: f64,
    pub max: f64,
}

impl NormalizationRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// A complete set of five ranges for one gender bucket.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RangeSet {
    pub grip_strength: NormalizationRange,
    pub sit_ups: NormalizationRange,
    pub standing_long_jump: NormalizationRange,
    pub shuttle_run_20m: NormalizationRange,
    pub sit_and_reach: NormalizationRange,
}

impl RangeSet {
    pub fn get(&self, kind: MeasurementKind) -> NormalizationRange {
        match kind {
            MeasurementKind::GripStrength => self.grip_strength,
            MeasurementKind::SitUps => self.sit_ups,
            MeasurementKind::StandingLongJump => self.standing_long_jump,
            MeasurementKind::ShuttleRun20m => self.shuttle_run_20m,
            MeasurementKind::SitAndReach => self.sit_and_reach,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeasurementKind, NormalizationRange)> + '_ {
        MeasurementKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NormalizationTables {
    pub male: RangeSet,
    pub female: RangeSet,
    /// Used when gender is absent or unrecognized
    pub unspecified: RangeSet,
}

impl NormalizationTables {
    pub fn for_gender(&self, gender: Option<Gender>) -> &RangeSet {
        match gender {
            Some(Gender::Male) => &self.male,
            Some(Gender::Female) => &self.female,
            None => &self.unspecified,
        }
    }

    /// All buckets with their config names, for validation and display
    pub fn buckets(&self) -> [(&'static str, &RangeSet); 3] {
        [
            ("male", &self.male),
            ("female", &self.female),
            ("unspecified", &self.unspecified),
        ]
    }
}

/// Per-measurement weights. Kinds without an entry contribute nothing.
pub type WeightVector = BTreeMap<MeasurementKind, f64>;

/// A sport or discipline with its weight vector.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SportProfile {
    pub id: String,
    pub weights: WeightVector,
}

impl SportProfile {
    /// Build a profile from weights in `MeasurementKind::ALL` order
    pub fn from_weights(id: &str, weights: [f64; 5]) -> Self {
        Self {
            id: id.to_string(),
            weights: MeasurementKind::ALL.into_iter().zip(weights).collect(),
        }
    }

    pub fn weight_sum(&self) -> f64 {
        self.weights.values().sum()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AdaptedCatalogs {
    pub physical: Vec<SportProfile>,
    pub visual: Vec<SportProfile>,
    pub hearing: Vec<SportProfile>,
    pub intellectual: Vec<SportProfile>,
}

impl AdaptedCatalogs {
    pub fn for_category(&self, category: DisabilityCategory) -> &[SportProfile] {
        match category {
            DisabilityCategory::Physical => &self.physical,
            DisabilityCategory::Visual => &self.visual,
            DisabilityCategory::Hearing => &self.hearing,
            DisabilityCategory::Intellectual => &self.intellectual,
        }
    }
}

impl ScoringTables {
    /// Display name for a sport id, falling back to the id itself
    pub fn sport_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.sport_names.get(id).map(String::as_str).unwrap_or(id)
    }
}

impl Default for ScoringTables {
    fn default() -> Self {
        Self {
            normalization: default_normalization(),
            sports: default_sports(),
            adapted: default_adapted(),
            grades: default_grade_table(),
            sport_names: default_sport_names(),
        }
    }
}

fn range_set(ranges: [(f64, f64); 5]) -> RangeSet {
    let [grip, sit_ups, jump, shuttle, reach] = ranges.map(|(min, max)| NormalizationRange::new(min, max));
    RangeSet {
        grip_strength: grip,
        sit_ups,
        standing_long_jump: jump,
        shuttle_run_20m: shuttle,
        sit_and_reach: reach,
    }
}

// Middle-school reference ranges. Order: grip (kg), sit-ups (/min),
// long jump (cm), shuttle run (reps), sit-and-reach (cm).
fn default_normalization() -> NormalizationTables {
    NormalizationTables {
        male: range_set([
            (10.0, 50.0),
            (15.0, 65.0),
            (120.0, 280.0),
            (10.0, 110.0),
            (-10.0, 25.0),
        ]),
        female: range_set([
            (5.0, 35.0),
            (10.0, 55.0),
            (90.0, 220.0),
            (5.0, 80.0),
            (-3.0, 32.0),
        ]),
        unspecified: range_set([
            (10.0, 45.0),
            (10.0, 60.0),
            (100.0, 260.0),
            (5.0, 100.0),
            (-5.0, 30.0),
        ]),
    }
}

fn default_sports() -> Vec<SportProfile> {
    vec![
        SportProfile::from_weights("soccer", [0.1, 0.2, 0.25, 0.3, 0.15]),
        SportProfile::from_weights("basketball", [0.15, 0.15, 0.3, 0.25, 0.15]),
        SportProfile::from_weights("volleyball", [0.15, 0.15, 0.35, 0.2, 0.15]),
        SportProfile::from_weights("sprint", [0.1, 0.1, 0.3, 0.4, 0.1]),
        SportProfile::from_weights("judo", [0.35, 0.2, 0.15, 0.15, 0.15]),
        SportProfile::from_weights("swimming", [0.15, 0.2, 0.2, 0.3, 0.15]),
        SportProfile::from_weights("baseball", [0.25, 0.15, 0.25, 0.2, 0.15]),
        SportProfile::from_weights("taekwondo", [0.1, 0.2, 0.25, 0.2, 0.25]),
    ]
}

fn default_adapted() -> AdaptedCatalogs {
    AdaptedCatalogs {
        physical: vec![
            SportProfile::from_weights("para_swimming", [0.2, 0.25, 0.15, 0.25, 0.15]),
            SportProfile::from_weights("wheelchair_basketball", [0.3, 0.25, 0.15, 0.15, 0.15]),
            SportProfile::from_weights("wheelchair_tennis", [0.3, 0.2, 0.15, 0.2, 0.15]),
            SportProfile::from_weights("boccia", [0.35, 0.15, 0.1, 0.1, 0.3]),
            SportProfile::from_weights("para_table_tennis", [0.25, 0.2, 0.15, 0.2, 0.2]),
        ],
        visual: vec![
            SportProfile::from_weights("goalball", [0.2, 0.2, 0.2, 0.2, 0.2]),
            SportProfile::from_weights("para_swimming", [0.15, 0.2, 0.2, 0.3, 0.15]),
            SportProfile::from_weights("para_athletics", [0.1, 0.15, 0.3, 0.35, 0.1]),
            SportProfile::from_weights("judo", [0.35, 0.2, 0.15, 0.15, 0.15]),
        ],
        hearing: vec![
            SportProfile::from_weights("soccer", [0.1, 0.2, 0.25, 0.3, 0.15]),
            SportProfile::from_weights("basketball", [0.15, 0.15, 0.3, 0.25, 0.15]),
            SportProfile::from_weights("volleyball", [0.15, 0.15, 0.35, 0.2, 0.15]),
            SportProfile::from_weights("swimming", [0.15, 0.2, 0.2, 0.3, 0.15]),
            SportProfile::from_weights("para_table_tennis", [0.25, 0.2, 0.2, 0.2, 0.15]),
        ],
        intellectual: vec![
            SportProfile::from_weights("para_swimming", [0.15, 0.2, 0.2, 0.3, 0.15]),
            SportProfile::from_weights("para_athletics", [0.1, 0.15, 0.3, 0.35, 0.1]),
            SportProfile::from_weights("para_table_tennis", [0.2, 0.2, 0.2, 0.2, 0.2]),
            SportProfile::from_weights("boccia", [0.3, 0.15, 0.15, 0.1, 0.3]),
        ],
    }
}

fn default_sport_names() -> BTreeMap<String, String> {
    [
        ("soccer", "축구"),
        ("basketball", "농구"),
        ("volleyball", "배구"),
        ("sprint", "단거리 육상"),
        ("judo", "유도"),
        ("swimming", "수영"),
        ("baseball", "야구"),
        ("taekwondo", "태권도"),
        ("para_swimming", "패럴림픽 수영"),
        ("para_athletics", "패럴림픽 육상"),
        ("boccia", "보치아"),
        ("goalball", "골볼"),
        ("sitting_volleyball", "좌식배구"),
        ("wheelchair_basketball", "휠체어 농구"),
        ("wheelchair_tennis", "휠체어 테니스"),
        ("para_table_tennis", "패럴림픽 탁구"),
    ]
    .into_iter()
    .map(|(id, name)| (id.to_string(), name.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_sizes() {
        let tables = ScoringTables::default();
        assert_eq!(tables.sports.len(), 8);
        for category in DisabilityCategory::ALL {
            let len = tables.adapted.for_category(category).len();
            assert!((4..=5).contains(&len), "{} has {} disciplines", category, len);
        }
        assert_eq!(tables.grades.len(), 5);
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let tables = ScoringTables::default();
        let adapted = DisabilityCategory::ALL
            .iter()
            .flat_map(|c| tables.adapted.for_category(*c).iter());
        for profile in tables.sports.iter().chain(adapted) {
            assert!(
                (profile.weight_sum() - 1.0).abs() < 1e-9,
                "{} sums to {}",
                profile.id,
                profile.weight_sum()
            );
        }
    }

    #[test]
    fn test_gender_bucket_selection() {
        let tables = default_normalization();
        assert_eq!(tables.for_gender(Some(Gender::Male)).grip_strength.max, 50.0);
        assert_eq!(tables.for_gender(Some(Gender::Female)).grip_strength.max, 35.0);
        assert_eq!(tables.for_gender(None).grip_strength.max, 45.0);
    }

    #[test]
    fn test_sit_and_reach_is_asymmetric_between_genders() {
        let tables = default_normalization();
        let male = tables.male.sit_and_reach;
        let female = tables.female.sit_and_reach;
        assert!(male.min < female.min);
        assert!(male.max < female.max);
    }

    #[test]
    fn test_sport_name_fallback() {
        let tables = ScoringTables::default();
        assert_eq!(tables.sport_name("judo"), "유도");
        assert_eq!(tables.sport_name("curling"), "curling");
    }

    #[test]
    fn test_scoring_tables_serde_roundtrip() {
        let tables = ScoringTables::default();
        let yaml = serde_saphyr::to_string(&tables).unwrap();
        let parsed: ScoringTables = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(tables, parsed);
    }

    #[test]
    fn test_grades_and_names_optional_in_yaml() {
        let yaml = r#"
normalization:
  male:
    grip_strength: { min: 10, max: 50 }
    sit_ups: { min: 15, max: 65 }
    standing_long_jump: { min: 120, max: 280 }
    shuttle_run_20m: { min: 10, max: 110 }
    sit_and_reach: { min: -10, max: 25 }
  female:
    grip_strength: { min: 10, max: 50 }
    sit_ups: { min: 15, max: 65 }
    standing_long_jump: { min: 120, max: 280 }
    shuttle_run_20m: { min: 10, max: 110 }
    sit_and_reach: { min: -10, max: 25 }
  unspecified:
    grip_strength: { min: 10, max: 50 }
    sit_ups: { min: 15, max: 65 }
    standing_long_jump: { min: 120, max: 280 }
    shuttle_run_20m: { min: 10, max: 110 }
    sit_and_reach: { min: -10, max: 25 }
sports:
  - id: judo
    weights: { grip_strength: 1.0 }
adapted:
  physical: [{ id: boccia, weights: { grip_strength: 1.0 } }]
  visual: [{ id: goalball, weights: { sit_ups: 1.0 } }]
  hearing: [{ id: soccer, weights: { shuttle_run_20m: 1.0 } }]
  intellectual: [{ id: boccia, weights: { sit_and_reach: 1.0 } }]
"#;
        let tables: ScoringTables = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(tables.sports.len(), 1);
        assert_eq!(tables.sports[0].weights.len(), 1);
        assert_eq!(tables.grades, default_grade_table());
        assert_eq!(tables.sport_names, default_sport_names());
        assert_eq!(tables.sport_name("judo"), "유도");
        assert_eq!(tables.normalization.female.sit_and_reach.min, -10.0);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "min: 1\nmax: 2\nstep: 3\n";
        let parsed: Result<NormalizationRange, _> = serde_saphyr::from_str(yaml);
        assert!(parsed.is_err());
    }
}
