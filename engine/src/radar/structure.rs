//! Static features: how much material each side has, how freely it moves,
//! and how healthy its pawns are.

use chess::{Color, Piece, ALL_SQUARES};

use super::attribute::{Attribute, AttributeScore};
use super::round_to;
use crate::board::{square_at, Board};
use crate::weights::{max_attack_potential, piece_weight};

const PAWN_BASE_SCORE: f64 = 10.0;
const ISOLATED_PENALTY: f64 = 2.0;
const BACKWARD_PENALTY: f64 = 1.0;
const DOUBLED_PENALTY: f64 = 1.0;

/// Attacked squares per piece, weighted by material and scaled by the
/// kind's maximum attack count. Kings contribute nothing.
pub fn piece_mobility(board: &Board) -> AttributeScore {
    let mut mobility = [0.0; 2];
    for square in ALL_SQUARES {
        let Some((piece, color)) = board.piece_at(square) else {
            continue;
        };
        let potential = max_attack_potential(piece);
        if potential <= 0.0 {
            continue;
        }
        let attacked = board.attacks(square).popcnt() as f64;
        mobility[color.to_index()] += attacked * piece_weight(piece) / potential;
    }
    AttributeScore::new(
        Attribute::PieceMobility,
        round_to(mobility[Color::White.to_index()], 6),
        round_to(mobility[Color::Black.to_index()], 6),
    )
}

/// Ten points per pawn, less penalties for isolated, backward and doubled pawns.
///
/// "Isolated" means no friendly pawn elsewhere on the pawn's own file, so a
/// pawn is never both isolated and doubled. "Backward" means no friendly pawn
/// one rank ahead on the pawn's file or either neighbouring file.
pub fn pawn_structure_health(board: &Board) -> AttributeScore {
    let mut health = [0.0; 2];
    for square in ALL_SQUARES {
        let Some((Piece::Pawn, color)) = board.piece_at(square) else {
            continue;
        };
        let file = square.get_file().to_index();
        let rank = square.get_rank().to_index();

        let mut score = PAWN_BASE_SCORE;
        let file_mates = (0..8)
            .filter(|&r| r != rank)
            .filter(|&r| is_pawn_of(board, file, r, color))
            .count();
        if file_mates == 0 {
            score -= ISOLATED_PENALTY;
        }
        if let Some(ahead) = rank_ahead(rank, color) {
            let supported = neighbour_files(file).any(|f| is_pawn_of(board, f, ahead, color));
            if !supported {
                score -= BACKWARD_PENALTY;
            }
        }
        if file_mates > 0 {
            score -= DOUBLED_PENALTY;
        }
        health[color.to_index()] += score;
    }
    AttributeScore::new(
        Attribute::PawnStructureHealth,
        round_to(health[Color::White.to_index()], 4),
        round_to(health[Color::Black.to_index()], 4),
    )
}

/// Plain material count per side.
pub fn material_balance(board: &Board) -> AttributeScore {
    let mut material = [0.0; 2];
    for square in ALL_SQUARES {
        if let Some((piece, color)) = board.piece_at(square) {
            material[color.to_index()] += piece_weight(piece);
        }
    }
    AttributeScore::from_sides(Attribute::MaterialBalance, material)
}

fn is_pawn_of(board: &Board, file: usize, rank: usize, color: Color) -> bool {
    board.piece_at(square_at(file, rank)) == Some((Piece::Pawn, color))
}

fn rank_ahead(rank: usize, color: Color) -> Option<usize> {
    match color {
        Color::White if rank < 7 => Some(rank + 1),
        Color::Black if rank > 0 => Some(rank - 1),
        _ => None,
    }
}

fn neighbour_files(file: usize) -> impl Iterator<Item = usize> {
    file.saturating_sub(1)..=(file + 1).min(7)
}
