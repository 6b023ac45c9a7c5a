use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::config::{ScoringTables, SportProfile};
use super::grade::{grade, GradeBand};
use super::measurement::{DisabilityCategory, Gender, MeasurementKind, MeasurementSet};
use super::normalize::{self, NormalizedVector};
use super::validation::validate_tables;
use super::weights::weighted_score;

/// Score for one sport in one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub sport: String,
    pub sport_name: String,
    /// 0-100, two decimals
    pub score: f64,
    pub percentile: f64,
    pub grade_level: GradeBand,
}

/// Which catalog a run drew its sports from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    General,
    Adapted(DisabilityCategory),
}

/// Stateless scorer over a validated, read-only set of tables.
#[derive(Debug, Clone)]
pub struct TalentEngine {
    tables: ScoringTables,
}

static BUILTIN: Lazy<TalentEngine> = Lazy::new(|| {
    TalentEngine::new(ScoringTables::default()).unwrap_or_else(|errors| {
        panic!("built-in scoring tables are invalid: {}", errors.join("; "))
    })
});

impl TalentEngine {
    /// Validate `tables` once and build an engine over them
    pub fn new(tables: ScoringTables) -> Result<Self, Vec<String>> {
        validate_tables(&tables)?;
        Ok(Self { tables })
    }

    /// Shared engine over the built-in tables, built on first use
    pub fn builtin() -> &'static TalentEngine {
        &BUILTIN
    }

    pub fn tables(&self) -> &ScoringTables {
        &self.tables
    }

    pub fn normalize(&self, value: Option<f64>, kind: MeasurementKind, gender: Option<Gender>) -> f64 {
        normalize::normalize(&self.tables.normalization, value, kind, gender)
    }

    pub fn normalize_all(&self, measurements: &MeasurementSet) -> NormalizedVector {
        normalize::normalize_all(&self.tables.normalization, measurements)
    }

    /// Score a general-catalog sport by id. Unknown ids score 0.
    pub fn sport_score(&self, normalized: &NormalizedVector, sport: &str) -> f64 {
        self.tables
            .sports
            .iter()
            .find(|profile| profile.id == sport)
            .map(|profile| weighted_score(normalized, &profile.weights))
            .unwrap_or(0.0)
    }

    /// Catalog selected for a disability category: adapted if present,
    /// general otherwise. The two are never combined.
    pub fn catalog(&self, disability: Option<DisabilityCategory>) -> (Track, &[SportProfile]) {
        match disability {
            Some(category) => (
                Track::Adapted(category),
                self.tables.adapted.for_category(category),
            ),
            None => (Track::General, &self.tables.sports),
        }
    }

    /// Score every sport of the selected catalog, best first.
    ///
    /// Measurements are normalized once and shared across sports. Equal
    /// scores keep catalog order.
    pub fn run(
        &self,
        measurements: &MeasurementSet,
        disability: Option<DisabilityCategory>,
    ) -> Vec<ScoreRecord> {
        let normalized = self.normalize_all(measurements);
        let (_, catalog) = self.catalog(disability);

        let mut records: Vec<ScoreRecord> = catalog
            .iter()
            .map(|profile| {
                let score = weighted_score(&normalized, &profile.weights);
                let (percentile, grade_level) = grade(score, &self.tables.grades);
                ScoreRecord {
                    sport: profile.id.clone(),
                    sport_name: self.tables.sport_name(&profile.id).to_string(),
                    score,
                    percentile,
                    grade_level,
                }
            })
            .collect();

        // Stable sort: ties stay in catalog order
        records.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        records
    }
}

/// Score a measurement set against the built-in tables, using its own
/// disability category to pick the catalog.
pub fn calculate_all_sport_scores(measurements: &MeasurementSet) -> Vec<ScoreRecord> {
    TalentEngine::builtin().run(measurements, measurements.disability)
}
