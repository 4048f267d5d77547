//! End-to-end behaviour of the searcher and the engine adapter

use std::time::Duration;

use gambit_core::{parse_move, Engine, Move, Position, SearchLimits, MATE_LOWER};
use gambit_engine::{GambitEngine, SearchConfig, Searcher};
use rayon::prelude::*;

fn fen(text: &str) -> Position {
    Position::from_fen(text).unwrap()
}

#[test]
fn test_depth_one_from_start() {
    let pos = Position::startpos();
    let legal: Vec<Move> = pos.gen_moves().collect();
    let mut searcher = Searcher::new();
    let first = searcher.search(&pos, &[pos.clone()]).next().unwrap();

    assert_eq!(first.depth, 1);
    let best = first.best_move.unwrap();
    assert!(legal.contains(&best), "{best:?}");
    assert!(first.score.abs() < MATE_LOWER);
}

#[test]
fn test_repeated_depth_one_search_is_stable() {
    let pos = Position::startpos();
    let mut searcher = Searcher::new();
    let a = searcher.search(&pos, &[pos.clone()]).next().unwrap();
    let b = searcher.search(&pos, &[pos.clone()]).next().unwrap();
    assert_eq!((a.best_move, a.score), (b.best_move, b.score));
}

#[test]
fn test_fresh_searchers_agree() {
    let pos = fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let run = || {
        let mut searcher = Searcher::new();
        searcher.search(&pos, &[pos.clone()]).take(3).last().unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_takes_the_king() {
    let pos = fen("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1");
    let mut searcher = Searcher::new();
    let it = searcher.search(&pos, &[pos.clone()]).next().unwrap();
    assert_eq!(it.best_move, Some(parse_move(&pos, "e1e8", true).unwrap()));
    assert!(it.score >= MATE_LOWER);
}

#[test]
fn test_wins_hanging_queen() {
    // Black queen on d5 is attacked by the knight on c3 and defended by nothing
    let pos = fen("4k3/8/8/3q4/8/2N5/8/4K3 w - - 0 1");
    let mut searcher = Searcher::new();
    let it = searcher.search(&pos, &[pos.clone()]).take(3).last().unwrap();
    assert_eq!(it.best_move, Some(parse_move(&pos, "c3d5", true).unwrap()));
}

#[test]
fn test_engine_respects_depth_limit() {
    let mut engine = GambitEngine::new();
    let pos = Position::startpos();
    let result = engine.search(&pos, &[pos.clone()], SearchLimits::depth(2));
    assert_eq!(result.depth, 2);
    assert!(result.best_move.is_some());
    assert!(result.nodes > 0);
    assert!(!result.stopped);
}

#[test]
fn test_engine_always_finishes_depth_one() {
    let mut engine = GambitEngine::new();
    let pos = Position::startpos();
    let result = engine.search(&pos, &[pos.clone()], SearchLimits::time(Duration::ZERO));
    assert_eq!(result.depth, 1);
    assert!(result.best_move.is_some());
    assert!(result.stopped);
}

#[test]
fn test_engine_new_game_clears_tables() {
    let mut engine = GambitEngine::new();
    let pos = Position::startpos();
    engine.search(&pos, &[pos.clone()], SearchLimits::depth(1));
    assert!(engine.searcher().killer(&pos).is_some());
    engine.new_game();
    assert_eq!(engine.searcher().killer(&pos), None);
}

#[test]
fn test_config_from_toml() {
    let config: SearchConfig = toml::from_str("qs_limit = 150\ndraw_test = false").unwrap();
    assert_eq!(config.qs_limit, 150);
    assert!(!config.draw_test);
    assert_eq!(config.eval_roughness, SearchConfig::default().eval_roughness);

    assert!(toml::from_str::<SearchConfig>("depth = 4").is_err());
}

#[test]
fn test_independent_searchers_in_parallel() {
    let openings = ["e2e4", "d2d4", "c2c4", "g1f3"];
    let results: Vec<_> = openings
        .par_iter()
        .map(|text| {
            let start = Position::startpos();
            let m = parse_move(&start, text, true).unwrap();
            let pos = start.make_move(m);
            let mut searcher = Searcher::new();
            let it = searcher.search(&pos, &[start, pos.clone()]).take(2).last().unwrap();
            (pos, it)
        })
        .collect();

    for (pos, it) in results {
        let best = it.best_move.unwrap();
        assert!(pos.gen_moves().any(|m| m == best));
        // Same answer as a searcher that ran alone
        let mut alone = Searcher::new();
        let start = Position::startpos();
        let solo = alone.search(&pos, &[start, pos.clone()]).take(2).last().unwrap();
        assert_eq!(solo, it);
    }
}
