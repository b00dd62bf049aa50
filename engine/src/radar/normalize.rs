use log::warn;

use super::attribute::{Attribute, AttributeScore};
use super::round_to;
use super::stats::TrainedStats;
use crate::error::{RadarError, Result};

// Constants
const DEFAULT_MIN_Z: f64 = -3.0;
const DEFAULT_MAX_Z: f64 = 3.0;
const DEFAULT_LOWER_BOUND: f64 = 0.0;
const DEFAULT_UPPER_BOUND: f64 = 10.0;
const DEFAULT_PRECISION: i32 = 4;

/// How raw scores are mapped onto the radar scale.
///
/// A z-score in `[min_z, max_z]` maps linearly onto `[lower_bound, upper_bound]`.
/// Results are capped at `upper_bound`; nothing is clamped from below, so
/// scores far under the mean go negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizerConfig {
    pub enabled: bool,
    pub min_z: f64,
    pub max_z: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub precision: i32,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_z: DEFAULT_MIN_Z,
            max_z: DEFAULT_MAX_Z,
            lower_bound: DEFAULT_LOWER_BOUND,
            upper_bound: DEFAULT_UPPER_BOUND,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl NormalizerConfig {
    /// Pass-through: raw scores are returned untouched.
    pub fn raw() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Rescales raw attribute scores against trained statistics.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stats: TrainedStats,
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(stats: TrainedStats, config: NormalizerConfig) -> Self {
        if !config.enabled {
            warn!("Score normalization disabled, radar scores will be raw");
        }
        Self { stats, config }
    }

    /// Normalizer with default scaling.
    pub fn with_stats(stats: TrainedStats) -> Self {
        Self::new(stats, NormalizerConfig::default())
    }

    /// Pass-through normalizer that needs no statistics.
    pub fn raw() -> Self {
        Self::new(TrainedStats::new(), NormalizerConfig::raw())
    }

    pub fn stats(&self) -> &TrainedStats {
        &self.stats
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn normalize(&self, raw: AttributeScore) -> Result<AttributeScore> {
        if !self.config.enabled {
            return Ok(raw);
        }
        let (mean, std_dev) = self.reference(raw.attribute)?;
        Ok(AttributeScore::new(
            raw.attribute,
            self.scale(raw.white_score, mean, std_dev),
            self.scale(raw.black_score, mean, std_dev),
        ))
    }

    /// Mean and standard deviation for `attribute`. A zero value is treated
    /// the same as a missing one.
    fn reference(&self, attribute: Attribute) -> Result<(f64, f64)> {
        let stats = self.stats.get(attribute).ok_or_else(|| {
            RadarError::Configuration(format!("no trained statistics for '{}'", attribute))
        })?;
        match (stats.mean, stats.std_dev) {
            (Some(mean), Some(std_dev)) if is_usable(mean) && is_usable(std_dev) => Ok((mean, std_dev)),
            _ => Err(RadarError::Configuration(format!(
                "standard deviation and mean are required for '{}' (mean: {:?}, std_dev: {:?})",
                attribute, stats.mean, stats.std_dev
            ))),
        }
    }

    fn scale(&self, value: f64, mean: f64, std_dev: f64) -> f64 {
        let config = &self.config;
        let z_score = (value - mean) / std_dev;
        let rescaled = (z_score - config.min_z) * (config.upper_bound - config.lower_bound)
            / (config.max_z - config.min_z)
            + config.lower_bound;
        round_to(rescaled.min(config.upper_bound), config.precision)
    }
}

fn is_usable(value: f64) -> bool {
    value != 0.0 && value.is_finite()
}
