use serde::{Deserialize, Serialize};

use crate::scoring::ScoringTables;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Replaces the built-in scoring tables when present
    #[serde(default)]
    pub scoring: Option<ScoringTables>,

    /// Number of sports shown per assessment when `--top` is not given
    #[serde(default)]
    pub top: Option<usize>,
}

impl Config {
    /// Tables the engine should run on: configured ones, else built-in
    pub fn effective_tables(&self) -> ScoringTables {
        self.scoring.clone().unwrap_or_default()
    }
}
