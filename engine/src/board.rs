use chess::{
    BitBoard, Board as ChessBoard, BoardBuilder, ChessMove, Color, File, Piece, Rank, Square,
    ALL_COLORS, ALL_SQUARES, EMPTY,
};
use std::fmt;
use std::str::FromStr;

use crate::error::{RadarError, Result};

/// Trailing FEN fields used when a position string stops after piece placement.
const DEFAULT_FEN_FIELDS: [&str; 5] = ["w", "-", "-", "0", "1"];

/// Read-only position snapshot used by every extractor.
///
/// Attack queries are computed from the immutable inner board, so nothing
/// carries over from one extraction call to the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    inner: ChessBoard,
}

impl Board {
    pub fn new() -> Self {
        Self {
            inner: ChessBoard::default(),
        }
    }

    /// Parses a FEN string. Missing trailing fields (side to move, castling,
    /// en passant, clocks) are filled with `w - - 0 1`.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.is_empty() || fields.len() > 6 {
            return Err(RadarError::InvalidPosition {
                fen: fen.to_string(),
                reason: format!("expected 1 to 6 fields, found {}", fields.len()),
            });
        }

        let mut padded = fields.clone();
        padded.extend_from_slice(&DEFAULT_FEN_FIELDS[fields.len() - 1..]);

        let invalid = |reason: String| RadarError::InvalidPosition {
            fen: fen.to_string(),
            reason,
        };

        // `chess` resolves pins before its sanity check, which reads out of
        // bounds when the side to move has no king. Count kings up front.
        let builder = BoardBuilder::from_str(&padded.join(" ")).map_err(|e| invalid(e.to_string()))?;
        for color in ALL_COLORS {
            let kings = ALL_SQUARES
                .iter()
                .filter(|&&square| builder[square] == Some((Piece::King, color)))
                .count();
            if kings != 1 {
                return Err(invalid(format!("expected one {:?} king, found {}", color, kings)));
            }
        }

        ChessBoard::try_from(builder)
            .map(|board| Self { inner: board })
            .map_err(|e| invalid(e.to_string()))
    }

    /// Kind and color of the piece on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<(Piece, Color)> {
        let piece = self.inner.piece_on(square)?;
        let color = self.inner.color_on(square)?;
        Some((piece, color))
    }

    /// Squares attacked by the piece on `square` (pseudo-legal, blockers
    /// included). Pawns attack their two diagonals whether or not those are occupied.
    pub fn attacks(&self, square: Square) -> BitBoard {
        let Some((piece, color)) = self.piece_at(square) else {
            return EMPTY;
        };
        let occupied = *self.inner.combined();
        match piece {
            Piece::Pawn => chess::get_pawn_attacks(square, color, !EMPTY),
            Piece::Knight => chess::get_knight_moves(square),
            Piece::Bishop => chess::get_bishop_moves(square, occupied),
            Piece::Rook => chess::get_rook_moves(square, occupied),
            Piece::Queen => {
                chess::get_bishop_moves(square, occupied) | chess::get_rook_moves(square, occupied)
            }
            Piece::King => chess::get_king_moves(square),
        }
    }

    /// Squares holding a piece of `color` that attacks `square`.
    pub fn attackers(&self, color: Color, square: Square) -> BitBoard {
        let occupied = *self.inner.combined();
        let ours = *self.inner.color_combined(color);
        let queens = *self.inner.pieces(Piece::Queen);
        let rook_like = (*self.inner.pieces(Piece::Rook) | queens) & ours;
        let bishop_like = (*self.inner.pieces(Piece::Bishop) | queens) & ours;

        // A pawn of `color` attacks `square` exactly when a pawn of the other
        // color standing on `square` would attack it back.
        let pawns = chess::get_pawn_attacks(square, !color, *self.inner.pieces(Piece::Pawn) & ours);

        (chess::get_rook_moves(square, occupied) & rook_like)
            | (chess::get_bishop_moves(square, occupied) & bishop_like)
            | (chess::get_knight_moves(square) & *self.inner.pieces(Piece::Knight) & ours)
            | (chess::get_king_moves(square) & *self.inner.pieces(Piece::King) & ours)
            | pawns
    }

    pub fn is_attacked_by(&self, color: Color, square: Square) -> bool {
        self.attackers(color, square) != EMPTY
    }

    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.inner.checkers().popcnt() > 0
    }

    pub fn king_square(&self, color: Color) -> Result<Square> {
        let kings = *self.inner.pieces(Piece::King) & *self.inner.color_combined(color);
        kings.into_iter().next().ok_or_else(|| {
            RadarError::Computation(format!("no {:?} king on board {}", color, self.inner))
        })
    }

    pub fn color_combined(&self, color: Color) -> BitBoard {
        *self.inner.color_combined(color)
    }

    pub fn side_to_move(&self) -> Color {
        self.inner.side_to_move()
    }

    pub fn legal(&self, mv: ChessMove) -> bool {
        self.inner.legal(mv)
    }

    pub fn make_move(&self, mv: ChessMove) -> Self {
        Self {
            inner: self.inner.make_move_new(mv),
        }
    }

    pub fn to_fen(&self) -> String {
        self.inner.to_string()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// Builds a square from zero-based file and rank indices.
pub fn square_at(file: usize, rank: usize) -> Square {
    Square::make_square(Rank::from_index(rank), File::from_index(file))
}
