//! Serializable settings for the downsampling builder
//! and the cross validator.
//! 
//! Both structs read from JSON, and every omitted field
//! falls back to its default value.
//! ```
//! use minibalance::config::CrossValidationConfig;
//! 
//! let config = CrossValidationConfig::from_json(r#"{ "folds": 5 }"#)
//!     .unwrap();
//! assert_eq!(config.folds, 5);
//! assert_eq!(config.seed, 1234);
//! ```
use serde::{Serialize, Deserialize};

use crate::common::checker;
use crate::error::{Result, MiniBalanceError};


/// Default number of folds.
pub const DEFAULT_FOLDS: usize = 4;
/// Default seed of the cross validator.
pub const DEFAULT_SEED: u64 = 1234;
/// Default target proportion of the minority label.
pub const DEFAULT_TARGET_MINORITY_PROPORTION: f64 = 0.5;


/// Settings of `DownsamplingClassifierBuilder`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownsamplingConfig {
    /// Desired proportion of the minority label after downsampling.
    pub target_minority_proportion: f64,
}


impl Default for DownsamplingConfig {
    fn default() -> Self {
        Self {
            target_minority_proportion: DEFAULT_TARGET_MINORITY_PROPORTION,
        }
    }
}


impl DownsamplingConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = parse(json)?;
        config.validate()?;
        Ok(config)
    }


    /// Check that every value is in range.
    pub fn validate(&self) -> Result<()> {
        checker::check_open_unit_interval(
            "target_minority_proportion", self.target_minority_proportion
        )
    }
}


/// Settings of `CrossValidator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossValidationConfig {
    /// Number of folds.
    pub folds: usize,
    /// Seed of the per-fold random sources (and of shuffling).
    pub seed: u64,
    /// Shuffle the rows before splitting.
    pub shuffle: bool,
    /// Print a line per fold.
    pub verbose: bool,
}


impl Default for CrossValidationConfig {
    fn default() -> Self {
        Self {
            folds: DEFAULT_FOLDS,
            seed: DEFAULT_SEED,
            shuffle: false,
            verbose: false,
        }
    }
}


impl CrossValidationConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = parse(json)?;
        config.validate()?;
        Ok(config)
    }


    /// Check that every value is in range.
    pub fn validate(&self) -> Result<()> {
        checker::check_n_folds(self.folds)
    }
}


fn parse<'de, T: Deserialize<'de>>(json: &'de str) -> Result<T> {
    serde_json::from_str(json)
        .map_err(|e| MiniBalanceError::InvalidConfiguration(e.to_string()))
}
