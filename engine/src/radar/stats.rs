use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::attribute::Attribute;
use crate::error::Result;

/// Distribution summary of one attribute over a training corpus.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct AttributeStats {
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub std_dev: Option<f64>,
    #[serde(default)]
    pub mode: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
}

impl AttributeStats {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self {
            mean: Some(mean),
            std_dev: Some(std_dev),
            ..Default::default()
        }
    }
}

/// Training output as written to disk: who the corpus came from plus the
/// per-attribute statistics.
#[derive(Serialize, Deserialize, Clone, Debug)]
struct StatsFile {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    game_count: Option<u64>,
    trained_stats: BTreeMap<String, AttributeStats>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StatsDocument {
    File(StatsFile),
    Bare(BTreeMap<String, AttributeStats>),
}

/// Read-only reference statistics keyed by attribute name.
///
/// Loaded once and never mutated afterwards, so a single instance can be
/// shared across threads by reference.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrainedStats {
    username: Option<String>,
    game_count: Option<u64>,
    attributes: BTreeMap<String, AttributeStats>,
}

impl TrainedStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses either the full training envelope
    /// (`{"username", "game_count", "trained_stats": {...}}`) or a bare
    /// attribute map.
    pub fn from_json(json: &str) -> Result<Self> {
        let stats = match serde_json::from_str::<StatsDocument>(json)? {
            StatsDocument::File(file) => Self {
                username: file.username,
                game_count: file.game_count,
                attributes: file.trained_stats,
            },
            StatsDocument::Bare(attributes) => Self {
                attributes,
                ..Default::default()
            },
        };
        Ok(stats)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let stats = Self::from_json(&json)?;
        info!(
            "Loaded trained statistics for {} attributes from {} (player: {}, games: {})",
            stats.attributes.len(),
            path.display(),
            stats.username.as_deref().unwrap_or("unknown"),
            stats
                .game_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        );
        Ok(stats)
    }

    pub fn insert(&mut self, attribute: Attribute, stats: AttributeStats) {
        self.attributes.insert(attribute.as_str().to_string(), stats);
    }

    pub fn with(mut self, attribute: Attribute, stats: AttributeStats) -> Self {
        self.insert(attribute, stats);
        self
    }

    pub fn get(&self, attribute: Attribute) -> Option<&AttributeStats> {
        self.attributes.get(attribute.as_str())
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn game_count(&self) -> Option<u64> {
        self.game_count
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TRAINING_OUTPUT: &str = r#"{
        "username": "MagnusCarlsen",
        "game_count": 1000,
        "trained_stats": {
            "space": {"std_dev": 4.2, "mean": 40.5, "mode": 41, "max": 58, "min": 22},
            "forks": {"std_dev": 1.1, "mean": 0.6, "mode": 0, "max": 9, "min": 0},
            "checks": {"std_dev": 0.1, "mean": 0.2}
        }
    }"#;

    #[test]
    fn test_parse_training_envelope() {
        let stats = TrainedStats::from_json(TRAINING_OUTPUT).unwrap();
        assert_eq!(stats.username(), Some("MagnusCarlsen"));
        assert_eq!(stats.game_count(), Some(1000));
        assert_eq!(stats.len(), 3);
        assert_eq!(
            stats.get(Attribute::Space),
            Some(&AttributeStats {
                mean: Some(40.5),
                std_dev: Some(4.2),
                mode: Some(41.0),
                max: Some(58.0),
                min: Some(22.0),
            })
        );
        assert_eq!(stats.get(Attribute::KingSafety), None);
    }

    #[test]
    fn test_parse_bare_map() {
        let stats = TrainedStats::from_json(r#"{"material_balance": {"mean": 30.0, "std_dev": 8.0}}"#).unwrap();
        assert_eq!(stats.username(), None);
        assert_eq!(
            stats.get(Attribute::MaterialBalance),
            Some(&AttributeStats::new(30.0, 8.0))
        );
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(TrainedStats::from_json("not json").is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        match TrainedStats::load("/nonexistent/trained_stats.json") {
            Err(crate::error::RadarError::Io(_)) => {}
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_builder() {
        let stats = TrainedStats::new().with(Attribute::Forks, AttributeStats::new(1.0, 2.0));
        assert_eq!(stats.get(Attribute::Forks).and_then(|s| s.mean), Some(1.0));
        assert!(!stats.is_empty());
    }
}
