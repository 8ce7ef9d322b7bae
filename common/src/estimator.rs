use std::path::Path;
use derive_more::{Display, Error};
use phf::{phf_map, Map};
use serde::{Deserialize, Serialize};

pub const RATE_FEATURE_COUNT: usize = 14;

/// Feature order expected by the rate model.
pub const RATE_FEATURE_NAMES: [&str; RATE_FEATURE_COUNT] = [
    "years_of_experience_playing",
    "years_of_tournament_experience",
    "win_pct_tournaments",
    "bu_drill_1",
    "bu_drill_2",
    "bu_drill_3",
    "bu_drill_4",
    "bu_drill_5",
    "bu_drill_6",
    "bu_drill_7",
    "bu_drill_8",
    "bu_total",
    "table_difficulty_total",
    "mental_drills",
];

pub static RATE_FEATURE_INDEX: Map<&'static str, usize> = phf_map! {
    "years_of_experience_playing" => 0,
    "years_of_tournament_experience" => 1,
    "win_pct_tournaments" => 2,
    "bu_drill_1" => 3,
    "bu_drill_2" => 4,
    "bu_drill_3" => 5,
    "bu_drill_4" => 6,
    "bu_drill_5" => 7,
    "bu_drill_6" => 8,
    "bu_drill_7" => 9,
    "bu_drill_8" => 10,
    "bu_total" => 11,
    "table_difficulty_total" => 12,
    "mental_drills" => 13,
};

/// Only `mental_drills` is integral, every other feature is real.
pub fn is_integral_feature(feature_name: &str) -> bool {
    feature_name == "mental_drills"
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RateFeatures {
    pub years_of_experience_playing: f64,
    pub years_of_tournament_experience: f64,
    pub win_pct_tournaments: f64,
    pub bu_drill_1: f64,
    pub bu_drill_2: f64,
    pub bu_drill_3: f64,
    pub bu_drill_4: f64,
    pub bu_drill_5: f64,
    pub bu_drill_6: f64,
    pub bu_drill_7: f64,
    pub bu_drill_8: f64,
    pub bu_total: f64,
    pub table_difficulty_total: f64,
    pub mental_drills: i64,
}

impl RateFeatures {
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.years_of_experience_playing,
            self.years_of_tournament_experience,
            self.win_pct_tournaments,
            self.bu_drill_1,
            self.bu_drill_2,
            self.bu_drill_3,
            self.bu_drill_4,
            self.bu_drill_5,
            self.bu_drill_6,
            self.bu_drill_7,
            self.bu_drill_8,
            self.bu_total,
            self.table_difficulty_total,
            self.mental_drills as f64,
        ]
    }
}

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorError {
    #[display("Expected {expected} features, but got {actual}. Please provide all required inputs.")]
    FeatureCount { expected: usize, actual: usize },
}

#[derive(Debug, Display, Error)]
pub enum ModelLoadError {
    #[display("cannot read model artifact: {_0}")]
    Io(std::io::Error),
    #[display("cannot parse model artifact: {_0}")]
    Parse(serde_json::Error),
    #[display("model artifact lists {actual} features, expected {expected}")]
    FeatureCount { expected: usize, actual: usize },
    #[display("model artifact has {actual} coefficients, expected {expected}")]
    CoefficientCount { expected: usize, actual: usize },
    #[display("model feature #{index} is `{found}`, expected `{expected}`")]
    FeatureName {
        index: usize,
        expected: &'static str,
        found: String,
    },
}

/// Trained linear rate model, immutable once loaded.
///
/// Only built through `new`, `from_json_slice` or `load`, all of which validate the shape.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RateModel {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl RateModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, ModelLoadError> {
        let model = RateModel {
            feature_names: RATE_FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
            coefficients,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn from_json_slice(content: &[u8]) -> Result<Self, ModelLoadError> {
        let model: RateModel = serde_json::from_slice(content).map_err(ModelLoadError::Parse)?;
        model.validate()?;
        Ok(model)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let content = std::fs::read(path.as_ref()).map_err(ModelLoadError::Io)?;
        Self::from_json_slice(&content)
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    fn validate(&self) -> Result<(), ModelLoadError> {
        if self.feature_names.len() != RATE_FEATURE_COUNT {
            return Err(ModelLoadError::FeatureCount {
                expected: RATE_FEATURE_COUNT,
                actual: self.feature_names.len(),
            });
        }

        if self.coefficients.len() != RATE_FEATURE_COUNT {
            return Err(ModelLoadError::CoefficientCount {
                expected: RATE_FEATURE_COUNT,
                actual: self.coefficients.len(),
            });
        }

        for (index, (found, expected)) in self.feature_names.iter().zip(RATE_FEATURE_NAMES).enumerate() {
            if found != expected {
                return Err(ModelLoadError::FeatureName {
                    index,
                    expected,
                    found: found.clone(),
                });
            }
        }

        Ok(())
    }

    /// Estimated rating for `features` in `RATE_FEATURE_NAMES` order, rounded to a whole number.
    pub fn predict(&self, features: &[f64]) -> Result<f64, EstimatorError> {
        if features.len() != self.coefficients.len() {
            return Err(EstimatorError::FeatureCount {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }

        let estimate = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(coefficient, value)| coefficient * value)
                .sum::<f64>();

        Ok(estimate.round_ties_even())
    }
}
