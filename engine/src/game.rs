use chess::{ChessMove, Piece, Square};
use log::debug;
use rayon::prelude::*;

use crate::board::{square_at, Board};
use crate::error::{RadarError, Result};
use crate::radar::{FeatureExtractor, FeatureVector};

/// A start position and the positions reached after each move of a game.
#[derive(Debug, Clone)]
pub struct GameTimeline {
    start: Board,
    moves: Vec<String>,
    positions: Vec<Board>,
}

impl GameTimeline {
    /// Replays `moves` (long algebraic, e.g. `e2e4` or `e7e8q`) from `fen`.
    pub fn from_moves<S: AsRef<str>>(fen: &str, moves: &[S]) -> Result<Self> {
        let start = Board::from_fen(fen)?;
        let mut board = start;
        let mut positions = Vec::with_capacity(moves.len());
        for move_str in moves {
            let move_str = move_str.as_ref();
            let chess_move = parse_move(move_str)
                .filter(|mv| board.legal(*mv))
                .ok_or_else(|| RadarError::IllegalMove {
                    mv: move_str.to_string(),
                    fen: board.to_fen(),
                })?;
            board = board.make_move(chess_move);
            positions.push(board);
        }
        Ok(Self {
            start,
            moves: moves.iter().map(|m| m.as_ref().to_string()).collect(),
            positions,
        })
    }

    pub fn start(&self) -> &Board {
        &self.start
    }

    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    /// Positions after each move, in move order.
    pub fn positions(&self) -> &[Board] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Feature vector of every position after each move, in move order.
    ///
    /// Each position is an independent snapshot, so they are extracted in parallel.
    pub fn features(&self, extractor: &FeatureExtractor) -> Result<Vec<FeatureVector>> {
        debug!("Extracting radar features for {} positions", self.positions.len());
        self.positions
            .par_iter()
            .map(|board| extractor.extract_all(board))
            .collect()
    }
}

fn parse_move(move_str: &str) -> Option<ChessMove> {
    let bytes = move_str.as_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return None;
    }

    let from = parse_square(bytes[0], bytes[1])?;
    let to = parse_square(bytes[2], bytes[3])?;

    let promotion = match bytes.get(4).map(|c| c.to_ascii_lowercase()) {
        None => None,
        Some(b'q') => Some(Piece::Queen),
        Some(b'r') => Some(Piece::Rook),
        Some(b'b') => Some(Piece::Bishop),
        Some(b'n') => Some(Piece::Knight),
        Some(_) => return None,
    };

    Some(ChessMove::new(from, to, promotion))
}

fn parse_square(file: u8, rank: u8) -> Option<Square> {
    let file = file.checked_sub(b'a')? as usize;
    let rank = rank.checked_sub(b'1')? as usize;
    if file > 7 || rank > 7 {
        return None;
    }
    Some(square_at(file, rank))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radar::{extract_raw, Attribute, Normalizer};

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_replay_moves() {
        let timeline = GameTimeline::from_moves(START_FEN, &["e2e4", "e7e5", "g1f3"]).unwrap();
        assert_eq!(timeline.len(), 3);
        let first = timeline.positions()[0];
        assert_eq!(first.piece_at(Square::E4), Some((Piece::Pawn, chess::Color::White)));
        assert_eq!(first.piece_at(Square::E2), None);
        assert_eq!(first.side_to_move(), chess::Color::Black);
        assert_eq!(timeline.moves(), &["e2e4", "e7e5", "g1f3"]);
        assert_eq!(timeline.start(), &Board::new());
    }

    #[test]
    fn test_promotion_move() {
        let timeline = GameTimeline::from_moves("8/P6k/8/8/8/8/8/K7 w - - 0 1", &["a7a8q"]).unwrap();
        let after = timeline.positions()[0];
        assert_eq!(after.piece_at(Square::A8), Some((Piece::Queen, chess::Color::White)));
    }

    #[test]
    fn test_illegal_move_is_rejected() {
        for bad in ["e2e5", "e7e5", "z9z9", "e2", "e7e8x"] {
            match GameTimeline::from_moves(START_FEN, &[bad]) {
                Err(RadarError::IllegalMove { mv, .. }) => assert_eq!(mv, bad),
                other => panic!("expected IllegalMove for {}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_features_follow_move_order() {
        let moves = ["d2d4", "d7d5", "c2c4", "e7e6", "b1c3", "g8f6"];
        let timeline = GameTimeline::from_moves(START_FEN, &moves).unwrap();
        let extractor = FeatureExtractor::new(Normalizer::raw());
        let vectors = timeline.features(&extractor).unwrap();
        assert_eq!(vectors.len(), moves.len());
        for (vector, board) in vectors.iter().zip(timeline.positions()) {
            assert_eq!(vector, &extract_raw(board).unwrap());
        }
        let material = vectors[5].get(Attribute::MaterialBalance).unwrap();
        assert_eq!(material.white_score, 39.0);
    }

    #[test]
    fn test_empty_move_list() {
        let timeline = GameTimeline::from_moves::<&str>(START_FEN, &[]).unwrap();
        assert!(timeline.is_empty());
        let extractor = FeatureExtractor::new(Normalizer::raw());
        assert!(timeline.features(&extractor).unwrap().is_empty());
    }
}
