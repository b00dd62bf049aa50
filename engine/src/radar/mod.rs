pub mod attribute;
pub mod control;
pub mod extractor;
pub mod normalize;
pub mod stats;
pub mod structure;
pub mod tactics;

pub use attribute::{Attribute, AttributeScore, FeatureVector};
pub use control::{
    central_control, flank_attack, king_safety, kingside_attack, queenside_attack, space, Flank,
};
pub use extractor::{extract_raw, FeatureExtractor};
pub use normalize::{Normalizer, NormalizerConfig};
pub use stats::{AttributeStats, TrainedStats};
pub use structure::{material_balance, pawn_structure_health, piece_mobility};
pub use tactics::{attacked_pieces, checks_captures_threats, forks, strong_threats, tactical_opps};

/// Rounds half away from zero to `places` decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234_56, 4), 1.2346);
        assert_eq!(round_to(-0.333_333_3, 4), -0.3333);
        assert_eq!(round_to(10.0, 4), 10.0);
    }
}
