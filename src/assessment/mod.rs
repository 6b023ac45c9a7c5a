pub mod batch;
pub mod request;

pub use batch::{read_batch, BatchRow};
pub use request::TalentTestRequest;

use serde::Serialize;

use crate::scoring::{DisabilityCategory, Gender, ScoreRecord, TalentEngine};

/// Number of leading sports summarized per assessment
pub const DEFAULT_TOP: usize = 3;

/// Result of scoring one validated talent test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TalentAssessment {
    pub age: u32,
    pub gender: Option<Gender>,
    pub disability: Option<DisabilityCategory>,
    pub bmi: Option<f64>,
    /// Best first
    pub scores: Vec<ScoreRecord>,
}

impl TalentAssessment {
    /// The `n` best sports (fewer if the catalog is smaller)
    pub fn top(&self, n: usize) -> &[ScoreRecord] {
        &self.scores[..n.min(self.scores.len())]
    }
}

/// Validate a request and score it.
///
/// Range errors are all returned together. Unknown gender or disability
/// codes are not errors: they select the fallback tables.
pub fn assess(
    engine: &TalentEngine,
    request: &TalentTestRequest,
) -> Result<TalentAssessment, Vec<String>> {
    request.validate()?;

    if request.gender.is_some() && request.gender().is_none() {
        tracing::warn!(code = ?request.gender, "unrecognized gender code, using unspecified ranges");
    }
    if request.disability_type.is_some() && request.disability().is_none() {
        tracing::warn!(code = ?request.disability_type, "unrecognized disability code, using general catalog");
    }

    let measurements = request.measurements();
    let scores = engine.run(&measurements, measurements.disability);
    tracing::debug!(
        recorded = measurements.recorded(),
        sports = scores.len(),
        "scored talent test"
    );

    Ok(TalentAssessment {
        age: request.age,
        gender: measurements.gender,
        disability: measurements.disability,
        bmi: request.bmi(),
        scores,
    })
}
