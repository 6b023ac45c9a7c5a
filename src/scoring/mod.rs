pub mod config;
pub mod engine;
pub mod grade;
pub mod measurement;
pub mod normalize;
pub mod validation;
pub mod weights;

pub use config::*;
pub use engine::{calculate_all_sport_scores, ScoreRecord, TalentEngine, Track};
pub use grade::{grade, GradeBand, GradeThreshold};
pub use measurement::{DisabilityCategory, Gender, MeasurementKind, MeasurementSet};
pub use normalize::{normalize, normalize_all, NormalizedVector};
pub use validation::validate_tables;
pub use weights::{round_hundredths, weighted_score};
