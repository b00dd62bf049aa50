use chess::Color;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::RadarError;

/// The thirteen radar axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Space,
    PieceMobility,
    PawnStructureHealth,
    KingSafety,
    AttackedPieces,
    TacticalOpps,
    MaterialBalance,
    CentralControl,
    KingsideAttack,
    QueensideAttack,
    StrongThreats,
    Forks,
    ChecksCapturesThreats,
}

impl Attribute {
    /// Extraction order of a feature vector.
    pub const ALL: [Attribute; 13] = [
        Attribute::Space,
        Attribute::PieceMobility,
        Attribute::PawnStructureHealth,
        Attribute::KingSafety,
        Attribute::AttackedPieces,
        Attribute::TacticalOpps,
        Attribute::MaterialBalance,
        Attribute::CentralControl,
        Attribute::KingsideAttack,
        Attribute::QueensideAttack,
        Attribute::StrongThreats,
        Attribute::Forks,
        Attribute::ChecksCapturesThreats,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Space => "space",
            Attribute::PieceMobility => "piece_mobility",
            Attribute::PawnStructureHealth => "pawn_structure_health",
            Attribute::KingSafety => "king_safety",
            Attribute::AttackedPieces => "attacked_pieces",
            Attribute::TacticalOpps => "tactical_opps",
            Attribute::MaterialBalance => "material_balance",
            Attribute::CentralControl => "central_control",
            Attribute::KingsideAttack => "kingside_attack",
            Attribute::QueensideAttack => "queenside_attack",
            Attribute::StrongThreats => "strong_threats",
            Attribute::Forks => "forks",
            Attribute::ChecksCapturesThreats => "checks_captures_threats",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = RadarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .iter()
            .copied()
            .find(|attribute| attribute.as_str() == s)
            .ok_or_else(|| RadarError::Configuration(format!("unknown attribute '{}'", s)))
    }
}

/// Two-sided score for one attribute. Raw or normalized depending on where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeScore {
    pub attribute: Attribute,
    pub white_score: f64,
    pub black_score: f64,
}

impl AttributeScore {
    pub fn new(attribute: Attribute, white_score: f64, black_score: f64) -> Self {
        Self {
            attribute,
            white_score,
            black_score,
        }
    }

    /// Builds a score from a per-color accumulator indexed by `Color::to_index`.
    pub(crate) fn from_sides(attribute: Attribute, sides: [f64; 2]) -> Self {
        Self::new(
            attribute,
            sides[Color::White.to_index()],
            sides[Color::Black.to_index()],
        )
    }

    pub fn score(&self, color: Color) -> f64 {
        match color {
            Color::White => self.white_score,
            Color::Black => self.black_score,
        }
    }
}

/// One score per attribute, in `Attribute::ALL` order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    scores: Vec<AttributeScore>,
}

impl FeatureVector {
    pub(crate) fn from_scores(scores: Vec<AttributeScore>) -> Self {
        debug_assert_eq!(scores.len(), Attribute::ALL.len());
        Self { scores }
    }

    pub fn get(&self, attribute: Attribute) -> Option<&AttributeScore> {
        self.scores.iter().find(|score| score.attribute == attribute)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeScore> {
        self.scores.iter()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.scores.len()))?;
        for score in &self.scores {
            map.serialize_entry(score.attribute.as_str(), score)?;
        }
        map.end()
    }
}
