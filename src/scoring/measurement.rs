use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One of the five fitness-test items every assessment records.
///
/// Declaration order is the canonical order used for dense vectors,
/// table iteration and weighted sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    /// Grip strength (kg)
    GripStrength,
    /// Sit-ups per minute
    SitUps,
    /// Standing long jump (cm)
    StandingLongJump,
    /// 20m shuttle run (repetitions)
    #[serde(rename = "shuttle_run_20m")]
    ShuttleRun20m,
    /// Sit-and-reach (cm, may be negative)
    SitAndReach,
}

impl MeasurementKind {
    pub const ALL: [MeasurementKind; 5] = [
        MeasurementKind::GripStrength,
        MeasurementKind::SitUps,
        MeasurementKind::StandingLongJump,
        MeasurementKind::ShuttleRun20m,
        MeasurementKind::SitAndReach,
    ];

    /// Position of this kind in [`MeasurementKind::ALL`]
    pub fn index(self) -> usize {
        match self {
            MeasurementKind::GripStrength => 0,
            MeasurementKind::SitUps => 1,
            MeasurementKind::StandingLongJump => 2,
            MeasurementKind::ShuttleRun20m => 3,
            MeasurementKind::SitAndReach => 4,
        }
    }

    /// Config key, identical to the serde name
    pub fn key(self) -> &'static str {
        match self {
            MeasurementKind::GripStrength => "grip_strength",
            MeasurementKind::SitUps => "sit_ups",
            MeasurementKind::StandingLongJump => "standing_long_jump",
            MeasurementKind::ShuttleRun20m => "shuttle_run_20m",
            MeasurementKind::SitAndReach => "sit_and_reach",
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Gender {
    #[serde(rename = "M", alias = "male")]
    Male,
    #[serde(rename = "F", alias = "female")]
    Female,
}

impl Gender {
    /// Lenient code parsing: "M"/"male" and "F"/"female", case-insensitive.
    /// Anything else is unrecognized and yields None.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Some(Gender::Male),
            "f" | "female" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

/// Disability category selecting an adapted discipline catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisabilityCategory {
    Physical,
    Visual,
    Hearing,
    Intellectual,
}

impl DisabilityCategory {
    pub const ALL: [DisabilityCategory; 4] = [
        DisabilityCategory::Physical,
        DisabilityCategory::Visual,
        DisabilityCategory::Hearing,
        DisabilityCategory::Intellectual,
    ];

    /// Case-insensitive parse; unknown codes yield None (no adaptation)
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "physical" => Some(DisabilityCategory::Physical),
            "visual" => Some(DisabilityCategory::Visual),
            "hearing" => Some(DisabilityCategory::Hearing),
            "intellectual" => Some(DisabilityCategory::Intellectual),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            DisabilityCategory::Physical => "physical",
            DisabilityCategory::Visual => "visual",
            DisabilityCategory::Hearing => "hearing",
            DisabilityCategory::Intellectual => "intellectual",
        }
    }
}

impl fmt::Display for DisabilityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw fitness-test input for one person.
///
/// Every measurement is optional. A missing value is "not measured" and
/// contributes a normalized score of 0 rather than failing the assessment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MeasurementSet {
    #[serde(default)]
    pub grip_strength: Option<f64>,
    #[serde(default)]
    pub sit_ups: Option<u32>,
    #[serde(default)]
    pub standing_long_jump: Option<f64>,
    #[serde(default)]
    pub shuttle_run_20m: Option<u32>,
    #[serde(default)]
    pub sit_and_reach: Option<f64>,
    #[serde(default, deserialize_with = "lenient_gender")]
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "lenient_disability")]
    pub disability: Option<DisabilityCategory>,
}

/// Unrecognized gender codes deserialize as None, same as `Gender::parse`
fn lenient_gender<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Gender>, D::Error> {
    let code = Option::<String>::deserialize(deserializer)?;
    Ok(code.as_deref().and_then(Gender::parse))
}

fn lenient_disability<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DisabilityCategory>, D::Error> {
    let code = Option::<String>::deserialize(deserializer)?;
    Ok(code.as_deref().and_then(DisabilityCategory::parse))
}

impl MeasurementSet {
    /// Raw value for a measurement kind, widened to f64
    pub fn value(&self, kind: MeasurementKind) -> Option<f64> {
        match kind {
            MeasurementKind::GripStrength => self.grip_strength,
            MeasurementKind::SitUps => self.sit_ups.map(f64::from),
            MeasurementKind::StandingLongJump => self.standing_long_jump,
            MeasurementKind::ShuttleRun20m => self.shuttle_run_20m.map(f64::from),
            MeasurementKind::SitAndReach => self.sit_and_reach,
        }
    }

    /// Number of measurements actually recorded
    pub fn recorded(&self) -> usize {
        MeasurementKind::ALL
            .iter()
            .filter(|kind| self.value(**kind).is_some())
            .count()
    }
}
