//! Immutable scoring profile: decision thresholds, trend tiers, per-tier
//! points and component weights.
//!
//! Defaults reproduce the tuned production profile. A YAML file may override
//! any subset of fields; omitted fields keep their default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Decision cut-offs on the `[0, 100]` final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    pub build_now: f64,
    pub watch: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            build_now: 65.0,
            watch: 45.0,
        }
    }
}

/// Popularity ratio cut-offs against the benchmark term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatioTiers {
    pub baseline: f64,
    pub good: f64,
    pub great: f64,
    /// Growth a good-ratio candidate must exceed to reach the good tier.
    pub good_growth: f64,
}

impl Default for RatioTiers {
    fn default() -> Self {
        Self {
            baseline: 0.03,
            good: 0.10,
            great: 0.20,
            good_growth: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrendPoints {
    pub great: f64,
    pub good: f64,
    pub baseline: f64,
    pub below: f64,
}

impl Default for TrendPoints {
    fn default() -> Self {
        Self {
            great: 100.0,
            good: 85.0,
            baseline: 70.0,
            below: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompetitionPoints {
    /// Awarded when the structural low-competition flag is set, whatever the tier.
    pub structural_low: f64,
    pub low: f64,
    pub medium: f64,
    pub unknown: f64,
    pub high: f64,
}

impl Default for CompetitionPoints {
    fn default() -> Self {
        Self {
            structural_low: 100.0,
            low: 90.0,
            medium: 60.0,
            unknown: 30.0,
            high: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildabilityPoints {
    pub tool_noun: f64,
    pub generic_modifier: f64,
    pub default: f64,
}

impl Default for BuildabilityPoints {
    fn default() -> Self {
        Self {
            tool_noun: 100.0,
            generic_modifier: 85.0,
            default: 70.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Weights {
    pub trend: f64,
    pub intent: f64,
    pub competition: f64,
    pub buildability: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            trend: 0.25,
            intent: 0.35,
            competition: 0.25,
            buildability: 0.15,
        }
    }
}

/// Complete scoring profile handed to the scoring engine at construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub thresholds: Thresholds,
    pub ratio_tiers: RatioTiers,
    pub trend_points: TrendPoints,
    pub competition_points: CompetitionPoints,
    pub buildability_points: BuildabilityPoints,
    pub weights: Weights,
}

impl ScoringConfig {
    /// Checks the orderings the scoring engine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        if !(0.0..=100.0).contains(&t.watch) || !(0.0..=100.0).contains(&t.build_now) {
            return Err(invalid("thresholds must lie within [0, 100]"));
        }
        if t.watch >= t.build_now {
            return Err(invalid(format!(
                "watch threshold {} must be below build_now threshold {}",
                t.watch, t.build_now
            )));
        }

        let r = &self.ratio_tiers;
        if r.baseline < 0.0 || !(r.baseline < r.good && r.good < r.great) {
            return Err(invalid(
                "ratio tiers must satisfy 0 <= baseline < good < great",
            ));
        }

        let points = [
            self.trend_points.great,
            self.trend_points.good,
            self.trend_points.baseline,
            self.trend_points.below,
            self.competition_points.structural_low,
            self.competition_points.low,
            self.competition_points.medium,
            self.competition_points.unknown,
            self.competition_points.high,
            self.buildability_points.tool_noun,
            self.buildability_points.generic_modifier,
            self.buildability_points.default,
        ];
        if points.iter().any(|p| !(0.0..=100.0).contains(p)) {
            return Err(invalid("every point value must lie within [0, 100]"));
        }

        let c = &self.competition_points;
        if !(c.structural_low >= c.low && c.low >= c.medium && c.high <= c.unknown.min(c.medium))
        {
            return Err(invalid(
                "competition points must rank structural_low >= low >= medium and high lowest",
            ));
        }
        if c.unknown <= 0.0 {
            return Err(invalid("unknown competition must score above zero"));
        }

        let w = &self.weights;
        let weights = [w.trend, w.intent, w.competition, w.buildability];
        if weights.iter().any(|v| *v < 0.0) {
            return Err(invalid("weights must be non-negative"));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(invalid(format!("weights must sum to 1.0, got {sum}")));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation(message.into())
}

/// Load and validate a scoring profile from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_scoring_profile(path: &Path) -> Result<ScoringConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_scoring_profile(&content)
}

/// Parse and validate a scoring profile from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_scoring_profile(yaml: &str) -> Result<ScoringConfig, ConfigError> {
    let profile: ScoringConfig = serde_yaml::from_str(yaml).map_err(ConfigError::ProfileParse)?;
    profile.validate()?;
    Ok(profile)
}
