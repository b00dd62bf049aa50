use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chess_radar::{Attribute, FeatureExtractor, GameTimeline, Normalizer, TrainedStats};
use clap::Parser;
use log::info;
use serde::Serialize;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Style radar features for chess positions", long_about = None)]
struct Args {
    /// Trained statistics JSON used to normalize scores
    #[arg(short, long)]
    stats: Option<PathBuf>,

    /// Position to analyse (missing trailing FEN fields are filled in)
    #[arg(short, long, default_value = START_FEN)]
    fen: String,

    /// Comma-separated UCI moves played from --fen; one vector per move
    #[arg(short, long, value_delimiter = ',')]
    moves: Vec<String>,

    /// Emit raw scores without normalization
    #[arg(long)]
    raw: bool,

    /// Only compute this attribute (e.g. king_safety)
    #[arg(short, long)]
    attribute: Option<Attribute>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct TimelineOutput<'a, T: Serialize> {
    moves: &'a [String],
    radar_features: Vec<T>,
}

fn build_normalizer(args: &Args) -> Result<Normalizer> {
    if args.raw {
        return Ok(Normalizer::raw());
    }
    let Some(path) = &args.stats else {
        bail!("--stats is required unless --raw is given");
    };
    let stats = TrainedStats::load(path)
        .with_context(|| format!("failed to load trained statistics from {}", path.display()))?;
    Ok(Normalizer::with_stats(stats))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let extractor = FeatureExtractor::new(build_normalizer(&args)?);

    if !args.moves.is_empty() {
        let timeline = GameTimeline::from_moves(&args.fen, &args.moves)?;
        info!("Replayed {} moves", timeline.len());
        let moves = timeline.moves();
        match args.attribute {
            Some(attribute) => {
                let radar_features = timeline
                    .positions()
                    .iter()
                    .map(|board| extractor.extract(attribute, board))
                    .collect::<chess_radar::Result<Vec<_>>>()?;
                print_json(&TimelineOutput { moves, radar_features }, args.pretty)
            }
            None => {
                let radar_features = timeline.features(&extractor)?;
                print_json(&TimelineOutput { moves, radar_features }, args.pretty)
            }
        }
    } else {
        let board = chess_radar::Board::from_fen(&args.fen)?;
        match args.attribute {
            Some(attribute) => print_json(&extractor.extract(attribute, &board)?, args.pretty),
            None => print_json(&extractor.extract_all(&board)?, args.pretty),
        }
    }
}
