use chess_radar::{Attribute, Board, FeatureExtractor, GameTimeline, Normalizer};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const MIDDLEGAME: &str = "r1bq1rk1/pp2bppp/2n1pn2/3p4/2PP4/2N1PN2/PP3PPP/R2QKB1R w KQ - 0 8";

fn bench_extract_all(c: &mut Criterion) {
    let board = Board::from_fen(MIDDLEGAME).unwrap();
    let extractor = FeatureExtractor::new(Normalizer::raw());
    c.bench_function("extract_all_middlegame", |b| {
        b.iter(|| extractor.extract_all(black_box(&board)).unwrap())
    });
}

fn bench_tactics(c: &mut Criterion) {
    let board = Board::from_fen(MIDDLEGAME).unwrap();
    let mut group = c.benchmark_group("tactics");
    for attribute in [Attribute::Forks, Attribute::TacticalOpps, Attribute::AttackedPieces] {
        group.bench_function(attribute.as_str(), |b| {
            b.iter(|| attribute.extract(black_box(&board)).unwrap())
        });
    }
    group.finish();
}

fn bench_timeline(c: &mut Criterion) {
    let moves = ["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "b5a4", "g8f6"];
    let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    let timeline = GameTimeline::from_moves(start, &moves).unwrap();
    let extractor = FeatureExtractor::new(Normalizer::raw());
    c.bench_function("timeline_ruy_lopez", |b| {
        b.iter(|| timeline.features(black_box(&extractor)).unwrap())
    });
}

criterion_group!(benches, bench_extract_all, bench_tactics, bench_timeline);
criterion_main!(benches);
