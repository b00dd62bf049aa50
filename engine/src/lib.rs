pub mod board;
pub mod error;
pub mod game;
pub mod radar;
pub mod weights;

pub use board::Board;
pub use error::{RadarError, Result};
pub use game::GameTimeline;
pub use radar::{
    extract_raw, Attribute, AttributeScore, AttributeStats, FeatureExtractor, FeatureVector,
    Normalizer, NormalizerConfig, TrainedStats,
};
