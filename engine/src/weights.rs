use chess::{Piece, NUM_PIECES};

const PAWN_VALUE: f64 = 1.0;
const KNIGHT_VALUE: f64 = 3.0;
const BISHOP_VALUE: f64 = 3.0;
const ROOK_VALUE: f64 = 5.0;
const QUEEN_VALUE: f64 = 9.0;
const KING_VALUE: f64 = 0.0; // King's value isn't used in material counting

/// Material weight per piece kind, indexed by `Piece::to_index`.
const PIECE_WEIGHTS: [f64; NUM_PIECES] = [
    PAWN_VALUE,
    KNIGHT_VALUE,
    BISHOP_VALUE,
    ROOK_VALUE,
    QUEEN_VALUE,
    KING_VALUE,
];

/// Most squares a piece of each kind can attack on an empty board.
/// Zero for the king, which takes no part in mobility.
const MAX_ATTACK_POTENTIAL: [f64; NUM_PIECES] = [3.0, 8.0, 13.0, 14.0, 27.0, 0.0];

pub fn piece_weight(piece: Piece) -> f64 {
    PIECE_WEIGHTS[piece.to_index()]
}

pub fn max_attack_potential(piece: Piece) -> f64 {
    MAX_ATTACK_POTENTIAL[piece.to_index()]
}
