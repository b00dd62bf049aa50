use log::{debug, trace};

use super::attribute::{Attribute, AttributeScore, FeatureVector};
use super::normalize::Normalizer;
use super::{control, structure, tactics};
use crate::board::Board;
use crate::error::Result;

impl Attribute {
    /// Runs this attribute's extractor on `board` and returns the raw score.
    pub fn extract(self, board: &Board) -> Result<AttributeScore> {
        let score = match self {
            Attribute::Space => control::space(board),
            Attribute::PieceMobility => structure::piece_mobility(board),
            Attribute::PawnStructureHealth => structure::pawn_structure_health(board),
            Attribute::KingSafety => control::king_safety(board)?,
            Attribute::AttackedPieces => tactics::attacked_pieces(board),
            Attribute::TacticalOpps => tactics::tactical_opps(board),
            Attribute::MaterialBalance => structure::material_balance(board),
            Attribute::CentralControl => control::central_control(board),
            Attribute::KingsideAttack => control::kingside_attack(board),
            Attribute::QueensideAttack => control::queenside_attack(board),
            Attribute::StrongThreats => tactics::strong_threats(board),
            Attribute::Forks => tactics::forks(board),
            Attribute::ChecksCapturesThreats => tactics::checks_captures_threats(board),
        };
        Ok(score)
    }
}

/// Raw (unnormalized) scores for every attribute, in `Attribute::ALL` order.
pub fn extract_raw(board: &Board) -> Result<FeatureVector> {
    let scores = Attribute::ALL
        .iter()
        .map(|attribute| attribute.extract(board))
        .collect::<Result<Vec<_>>>()?;
    Ok(FeatureVector::from_scores(scores))
}

/// Runs every extractor on a position and normalizes the results.
///
/// Holds no per-position state: one extractor can serve any number of
/// positions, including from several threads at once.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    normalizer: Normalizer,
}

impl FeatureExtractor {
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Normalized score of a single attribute.
    pub fn extract(&self, attribute: Attribute, board: &Board) -> Result<AttributeScore> {
        let raw = attribute.extract(board)?;
        let score = self.normalizer.normalize(raw)?;
        trace!(
            "{}: raw ({}, {}) -> ({}, {})",
            attribute,
            raw.white_score,
            raw.black_score,
            score.white_score,
            score.black_score
        );
        Ok(score)
    }

    /// Full feature vector for `board`. Fails as a whole if any attribute
    /// cannot be normalized.
    pub fn extract_all(&self, board: &Board) -> Result<FeatureVector> {
        debug!("Extracting radar features for {}", board);
        let scores = Attribute::ALL
            .iter()
            .map(|&attribute| self.extract(attribute, board))
            .collect::<Result<Vec<_>>>()?;
        Ok(FeatureVector::from_scores(scores))
    }

    /// Parses `fen` into a fresh board and extracts its feature vector.
    pub fn extract_fen(&self, fen: &str) -> Result<FeatureVector> {
        let board = Board::from_fen(fen)?;
        self.extract_all(&board)
    }
}
