use serde::{Deserialize, Serialize};

use crate::scoring::{round_hundredths, DisabilityCategory, Gender, MeasurementSet};

/// One talent test as submitted by a caller (form, CSV row, JSON body).
///
/// Codes are kept as raw strings; `gender()` and `disability()` parse them
/// leniently so an unknown code degrades to the fallback tables instead of
/// rejecting the whole test.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TalentTestRequest {
    pub age: u32,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub region_sido: Option<String>,
    #[serde(default)]
    pub region_sigungu: Option<String>,
    #[serde(default)]
    pub disability_type: Option<String>,

    /// cm; only used for BMI
    #[serde(default)]
    pub height: Option<f64>,
    /// kg; only used for BMI
    #[serde(default)]
    pub weight: Option<f64>,

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
}

const AGE_RANGE: (u32, u32) = (5, 100);
const GRADE_MAX_CHARS: usize = 20;
const REGION_MAX_CHARS: usize = 50;

fn check_range(errors: &mut Vec<String>, field: &str, value: Option<f64>, min: f64, max: f64) {
    if let Some(v) = value {
        if v.is_nan() || v < min || v > max {
            errors.push(format!("{}: must be between {} and {}, got {}", field, min, max, v));
        }
    }
}

fn check_len(errors: &mut Vec<String>, field: &str, value: &Option<String>, max: usize) {
    if let Some(s) = value {
        let len = s.chars().count();
        if len > max {
            errors.push(format!("{}: at most {} characters, got {}", field, max, len));
        }
    }
}

impl TalentTestRequest {
    /// Check physiological input ranges.
    /// Returns all validation errors at once (not just the first).
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let (age_min, age_max) = AGE_RANGE;
        if self.age < age_min || self.age > age_max {
            errors.push(format!(
                "age: must be between {} and {}, got {}",
                age_min, age_max, self.age
            ));
        }

        check_len(&mut errors, "grade", &self.grade, GRADE_MAX_CHARS);
        check_len(&mut errors, "region_sido", &self.region_sido, REGION_MAX_CHARS);
        check_len(&mut errors, "region_sigungu", &self.region_sigungu, REGION_MAX_CHARS);

        check_range(&mut errors, "height", self.height, 50.0, 250.0);
        check_range(&mut errors, "weight", self.weight, 10.0, 200.0);
        check_range(&mut errors, "grip_strength", self.grip_strength, 0.0, 100.0);
        check_range(&mut errors, "sit_ups", self.sit_ups.map(f64::from), 0.0, 200.0);
        check_range(&mut errors, "standing_long_jump", self.standing_long_jump, 0.0, 400.0);
        check_range(&mut errors, "shuttle_run_20m", self.shuttle_run_20m.map(f64::from), 0.0, 200.0);
        check_range(&mut errors, "sit_and_reach", self.sit_and_reach, -50.0, 100.0);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(Gender::parse)
    }

    pub fn disability(&self) -> Option<DisabilityCategory> {
        self.disability_type
            .as_deref()
            .and_then(DisabilityCategory::parse)
    }

    /// Body mass index, rounded to two decimals. Needs both height and weight.
    pub fn bmi(&self) -> Option<f64> {
        match (self.height, self.weight) {
            (Some(height), Some(weight)) if height > 0.0 => {
                let height_m = height / 100.0;
                Some(round_hundredths(weight / (height_m * height_m)))
            }
            _ => None,
        }
    }

    /// Engine input for this test
    pub fn measurements(&self) -> MeasurementSet {
        MeasurementSet {
            grip_strength: self.grip_strength,
            sit_ups: self.sit_ups,
            standing_long_jump: self.standing_long_jump,
            shuttle_run_20m: self.shuttle_run_20m,
            sit_and_reach: self.sit_and_reach,
            gender: self.gender(),
            disability: self.disability(),
        }
    }
}
