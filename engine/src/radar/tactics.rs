//! Tactical features built from who attacks what.

use chess::{Color, Piece, Square, ALL_SQUARES, EMPTY};

use super::attribute::{Attribute, AttributeScore};
use crate::board::Board;
use crate::weights::piece_weight;

/// An enemy piece attacked by the piece on some square.
#[derive(Debug, Clone, Copy)]
struct Target {
    square: Square,
    piece: Piece,
    color: Color,
}

/// Enemy pieces attacked from `square`, in ascending square order.
fn enemy_targets(board: &Board, square: Square, color: Color) -> impl Iterator<Item = Target> + '_ {
    board.attacks(square).filter_map(move |target| match board.piece_at(target) {
        Some((piece, target_color)) if target_color != color => Some(Target {
            square: target,
            piece,
            color: target_color,
        }),
        _ => None,
    })
}

fn is_defended(board: &Board, target: &Target) -> bool {
    board.is_attacked_by(target.color, target.square)
}

/// Credit for hitting `target`: its full weight, or half if it is defended.
fn threat_value(board: &Board, target: &Target) -> f64 {
    let weight = piece_weight(target.piece);
    if is_defended(board, target) {
        weight / 2.0
    } else {
        weight
    }
}

/// Weight of every enemy piece attacked favourably: the target is worth at
/// least as much as the attacker, or none of its defender squares holds a piece.
pub fn attacked_pieces(board: &Board) -> AttributeScore {
    let mut attacked = [0.0; 2];
    for square in ALL_SQUARES {
        let Some((attacker, color)) = board.piece_at(square) else {
            continue;
        };
        let attacker_weight = piece_weight(attacker);
        for target in enemy_targets(board, square, color) {
            let target_weight = piece_weight(target.piece);
            let good_attack = target_weight >= attacker_weight
                || board
                    .attackers(target.color, target.square)
                    .all(|defender| board.piece_at(defender).is_none());
            if good_attack {
                attacked[color.to_index()] += target_weight;
            }
        }
    }
    AttributeScore::from_sides(Attribute::AttackedPieces, attacked)
}

/// Heavier pieces attacking lighter ones.
pub fn strong_threats(board: &Board) -> AttributeScore {
    let mut threats = [0.0; 2];
    for square in ALL_SQUARES {
        let Some((attacker, color)) = board.piece_at(square) else {
            continue;
        };
        if attacker == Piece::King {
            continue;
        }
        let attacker_weight = piece_weight(attacker);
        for target in enemy_targets(board, square, color) {
            if attacker_weight > piece_weight(target.piece) {
                threats[color.to_index()] += threat_value(board, &target);
            }
        }
    }
    AttributeScore::from_sides(Attribute::StrongThreats, threats)
}

/// A piece hitting two or more enemy pieces is credited with the second
/// target only.
pub fn forks(board: &Board) -> AttributeScore {
    let mut forks = [0.0; 2];
    for square in ALL_SQUARES {
        let Some((piece, color)) = board.piece_at(square) else {
            continue;
        };
        if piece == Piece::King {
            continue;
        }
        if let Some(second) = enemy_targets(board, square, color).nth(1) {
            forks[color.to_index()] += threat_value(board, &second);
        }
    }
    AttributeScore::from_sides(Attribute::Forks, forks)
}

/// Sum of each side's share of checks, captures and threats.
///
/// A check on the board is credited to every non-king piece of both sides,
/// not only to the checking piece.
pub fn checks_captures_threats(board: &Board) -> AttributeScore {
    let in_check = board.is_check();
    let mut checks = [0.0; 2];
    let mut captures = [0.0; 2];
    let mut threats = [0.0; 2];
    for square in ALL_SQUARES {
        let Some((piece, color)) = board.piece_at(square) else {
            continue;
        };
        let side = color.to_index();
        let weight = piece_weight(piece);
        let attacks = board.attacks(square);
        if in_check && piece != Piece::King {
            checks[side] += weight;
        }
        if attacks & board.color_combined(!color) != EMPTY {
            captures[side] += weight;
        }
        if attacks != EMPTY {
            threats[side] += weight;
        }
    }

    let mut total = [0.0; 2];
    for counter in [checks, captures, threats] {
        let sum = counter[0] + counter[1];
        if sum > 0.0 {
            total[0] += counter[0] / sum;
            total[1] += counter[1] / sum;
        }
    }
    AttributeScore::from_sides(Attribute::ChecksCapturesThreats, total)
}

/// Mean of the raw strong-threat, fork and check/capture/threat scores.
pub fn tactical_opps(board: &Board) -> AttributeScore {
    let parts = [
        strong_threats(board),
        forks(board),
        checks_captures_threats(board),
    ];
    let white = parts.iter().map(|p| p.white_score).sum::<f64>() / 3.0;
    let black = parts.iter().map(|p| p.black_score).sum::<f64>() / 3.0;
    AttributeScore::new(Attribute::TacticalOpps, white, black)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn test_start_position_has_no_contact() {
        let start = Board::new();
        for score in [attacked_pieces(&start), strong_threats(&start), forks(&start)] {
            assert_eq!(score.white_score, 0.0, "{}", score.attribute);
            assert_eq!(score.black_score, 0.0, "{}", score.attribute);
        }
    }

    #[test]
    fn test_knight_fork_credits_second_target() {
        // Knight on d6 hits the rook on b5 and the queen on f7; f7 comes second.
        let score = forks(&board("7k/5q2/3N4/1r6/8/8/8/4K3 w - - 0 1"));
        assert_eq!(score.white_score, 9.0);
        assert_eq!(score.black_score, 0.0);
    }

    #[test]
    fn test_fork_only_counts_second_target() {
        // Knight on c7 hits a8 before e8, so the king (weight 0) is the credited target.
        let score = forks(&board("r3k3/2N5/8/8/8/8/8/4K3 b - - 0 1"));
        assert_eq!(score.white_score, 0.0);
    }

    #[test]
    fn test_fork_of_defended_piece_is_halved() {
        // Knight on d5 hits the c7 bishop, then the e7 pawn guarded by the king.
        let score = forks(&board("1n2k3/2b1p3/8/3N4/8/8/8/4K3 w - - 0 1"));
        assert_eq!(score.white_score, 0.5);
    }

    #[test]
    fn test_single_target_is_not_a_fork() {
        let score = forks(&board("4k3/8/8/3r4/8/8/8/3RK3 w - - 0 1"));
        assert_eq!(score.white_score, 0.0);
        assert_eq!(score.black_score, 0.0);
    }

    #[test]
    fn test_strong_threat_requires_heavier_attacker() {
        // White rook hits an undefended black knight; the knight hits nothing.
        let score = strong_threats(&board("4k3/8/8/8/8/8/8/R3n1K1 w - - 0 1"));
        assert_eq!(score.white_score, 3.0);
        assert_eq!(score.black_score, 0.0);
    }

    #[test]
    fn test_attacked_pieces_lighter_attacker_always_counts() {
        // Pawn on d4 hits the knight on e5: a lighter attacker always counts.
        let score = attacked_pieces(&board("4k3/3p4/8/4n3/3P4/8/8/4K3 w - - 0 1"));
        assert_eq!(score.white_score, 3.0);
    }

    #[test]
    fn test_attacked_pieces_skips_defended_lighter_target() {
        // Queen on d1 hits the d7 pawn, which the king on e8 defends.
        let score = attacked_pieces(&board("4k3/3p4/8/8/8/8/8/3QK3 w - - 0 1"));
        assert_eq!(score.white_score, 0.0);
        // Undefended, the same pawn counts.
        let score = attacked_pieces(&board("6k1/3p4/8/8/8/8/8/3QK3 w - - 0 1"));
        assert_eq!(score.white_score, 1.0);
    }

    #[test]
    fn test_checks_captures_threats_fractions() {
        // White is in check from the black rook; every non-king piece shares the check credit.
        let score = checks_captures_threats(&board("4k3/8/8/8/8/8/4r3/R3K3 w - - 0 1"));
        // checks: 5 vs 5, captures: rook e2 hits king e1 (weight 5) and king e1 hits e2 (0),
        // threats: 5 vs 5.
        assert!((score.white_score - (0.5 + 0.0 + 0.5)).abs() < 1e-12);
        assert!((score.black_score - (0.5 + 1.0 + 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_checks_captures_threats_without_check() {
        let score = checks_captures_threats(&Board::new());
        // No checks, no captures, equal threats.
        assert_eq!(score.white_score, 0.5);
        assert_eq!(score.black_score, 0.5);
    }

    #[test]
    fn test_tactical_opps_is_mean_of_parts() {
        let b = board("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3");
        let opps = tactical_opps(&b);
        let expected = (strong_threats(&b).white_score
            + forks(&b).white_score
            + checks_captures_threats(&b).white_score)
            / 3.0;
        assert_eq!(opps.white_score, expected);
    }
}
