//! Square-control features: the center, both flanks, king safety and space.

use chess::{Color, Square, ALL_COLORS, ALL_SQUARES};
use log::trace;

use super::attribute::{Attribute, AttributeScore};
use crate::board::{square_at, Board};
use crate::error::Result;
use crate::weights::piece_weight;

const CENTER_SQUARES: [Square; 4] = [Square::E4, Square::D4, Square::E5, Square::D5];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flank {
    Kingside,
    Queenside,
}

impl Flank {
    fn files(self) -> std::ops::Range<usize> {
        match self {
            Flank::Kingside => 4..8,
            Flank::Queenside => 0..4,
        }
    }

    /// The eight flank squares on `color`'s two home ranks.
    pub fn squares(self, color: Color) -> impl Iterator<Item = Square> {
        let ranks = home_ranks(color);
        self.files()
            .flat_map(move |file| ranks.map(|rank| square_at(file, rank)))
    }

    /// Flank holding `square`, if it lies on `color`'s home ranks.
    pub fn of(square: Square, color: Color) -> Option<Flank> {
        if !home_ranks(color).contains(&square.get_rank().to_index()) {
            return None;
        }
        if square.get_file().to_index() >= 4 {
            Some(Flank::Kingside)
        } else {
            Some(Flank::Queenside)
        }
    }
}

fn home_ranks(color: Color) -> [usize; 2] {
    match color {
        Color::White => [0, 1],
        Color::Black => [6, 7],
    }
}

/// Weight of every attacker of `square` belonging to `color`, halved when
/// the opponent covers the square too.
fn contested_weight(board: &Board, color: Color, square: Square) -> (f64, f64) {
    let contested = board.is_attacked_by(!color, square);
    let mut control = 0.0;
    let mut potential = 0.0;
    for attacker in board.attackers(color, square) {
        let weight = board
            .piece_at(attacker)
            .map(|(piece, _)| piece_weight(piece))
            .unwrap_or(0.0);
        control += if contested { weight / 2.0 } else { weight };
        potential += weight;
    }
    (control, potential)
}

pub fn central_control(board: &Board) -> AttributeScore {
    let mut control = [0.0; 2];
    let mut max_control = 0.0;
    for square in CENTER_SQUARES {
        for color in ALL_COLORS {
            let (weight, potential) = contested_weight(board, color, square);
            control[color.to_index()] += weight;
            max_control += potential;
        }
    }
    trace!("central control potential {}", max_control);
    AttributeScore::from_sides(Attribute::CentralControl, control)
}

/// Pressure each side puts on the opponent's flank squares.
pub fn flank_attack(board: &Board, flank: Flank) -> AttributeScore {
    let attribute = match flank {
        Flank::Kingside => Attribute::KingsideAttack,
        Flank::Queenside => Attribute::QueensideAttack,
    };
    let mut attack = [0.0; 2];
    let mut max_attack = 0.0;
    for defender in ALL_COLORS {
        let attacker = !defender;
        for square in flank.squares(defender) {
            let (weight, potential) = contested_weight(board, attacker, square);
            attack[attacker.to_index()] += weight;
            max_attack += potential;
        }
    }
    trace!("{} potential {}", attribute, max_attack);
    AttributeScore::from_sides(attribute, attack)
}

pub fn kingside_attack(board: &Board) -> AttributeScore {
    flank_attack(board, Flank::Kingside)
}

pub fn queenside_attack(board: &Board) -> AttributeScore {
    flank_attack(board, Flank::Queenside)
}

/// Each side's score is the opponent's attack on the flank its own king
/// sits on. A king off its home ranks scores zero.
pub fn king_safety(board: &Board) -> Result<AttributeScore> {
    let kingside = kingside_attack(board);
    let queenside = queenside_attack(board);
    let mut exposure = [0.0; 2];
    for color in ALL_COLORS {
        let king = board.king_square(color)?;
        let pressure = match Flank::of(king, color) {
            Some(Flank::Kingside) => kingside.score(!color),
            Some(Flank::Queenside) => queenside.score(!color),
            None => 0.0,
        };
        exposure[color.to_index()] += pressure;
    }
    Ok(AttributeScore::from_sides(Attribute::KingSafety, exposure))
}

/// A square counts for a side unless only the opponent attacks it.
/// Squares attacked by both sides, or by neither, count for both.
pub fn space(board: &Board) -> AttributeScore {
    let mut squares = [0.0; 2];
    for square in ALL_SQUARES {
        let white = board.is_attacked_by(Color::White, square);
        let black = board.is_attacked_by(Color::Black, square);
        if white || !black {
            squares[Color::White.to_index()] += 1.0;
        }
        if black || !white {
            squares[Color::Black.to_index()] += 1.0;
        }
    }
    AttributeScore::from_sides(Attribute::Space, squares)
}
