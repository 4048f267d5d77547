use super::*;

fn fen(text: &str) -> Position {
    Position::from_fen(text).unwrap()
}

#[test]
fn test_lost_king_scores_as_mated() {
    let pos = fen("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1");
    let after = pos.make_move(Move::new(95, 25));
    let mut searcher = Searcher::new();
    assert_eq!(searcher.bound(&after, 0, 3, false), -MATE_UPPER);
    assert_eq!(searcher.nodes(), 1);
}

#[test]
fn test_negative_depth_clamped() {
    let pos = Position::startpos();
    let shallow = Searcher::new().bound(&pos, 1, 0, false);
    let negative = Searcher::new().bound(&pos, 1, -5, false);
    assert_eq!(shallow, negative);
}

#[test]
fn test_stand_pat_at_depth_zero() {
    let pos = Position::startpos();
    let mut searcher = Searcher::new();
    // No captures from the start, so the static score is all there is
    assert_eq!(searcher.bound(&pos, 0, 0, false), 0);
    assert_eq!(searcher.bound(&pos, 1, 0, false), 0);
}

#[test]
fn test_stand_pat_replaces_killer() {
    let pos = Position::startpos();
    let mut searcher = Searcher::new();
    searcher.bound(&pos, -100, 1, true);
    assert!(searcher.killer(&pos).is_some());

    searcher.bound(&pos, -100, 0, false);
    assert_eq!(searcher.killer(&pos), None);
}

#[test]
fn test_repetition_is_draw() {
    let pos = Position::startpos().make_move(Move::new(85, 65));
    let mut searcher = Searcher::new();
    searcher.set_history(&[Position::startpos(), pos.clone()]);
    for gamma in [-500, 0, 1, 500] {
        for depth in 0..3 {
            assert_eq!(searcher.bound(&pos, gamma, depth, false), 0);
        }
    }
}

#[test]
fn test_repetition_ignored_without_draw_test() {
    let pos = fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
    let config = SearchConfig {
        draw_test: false,
        ..SearchConfig::default()
    };
    let mut searcher = Searcher::with_config(config);
    searcher.set_history(&[pos.clone()]);
    // A queen up: the stand-pat score fails high instead of a draw
    assert!(searcher.bound(&pos, 1, 0, false) > 800);
}

#[test]
fn test_fail_high_widens_lower_bound() {
    let pos = Position::startpos();
    let mut searcher = Searcher::new();
    let score = searcher.bound(&pos, -50, 1, true);
    assert!(score >= -50);
    let entry = searcher.entry(&pos, 1, true).unwrap();
    assert_eq!(entry.lower, score);
    assert_eq!(entry.upper, MATE_UPPER);
}

#[test]
fn test_fail_low_narrows_upper_bound() {
    let pos = Position::startpos();
    let mut searcher = Searcher::new();
    let score = searcher.bound(&pos, MATE_LOWER, 1, true);
    assert!(score < MATE_LOWER);
    let entry = searcher.entry(&pos, 1, true).unwrap();
    assert_eq!(entry.lower, -MATE_UPPER);
    assert_eq!(entry.upper, score);
}

#[test]
fn test_stalemate_scores_zero() {
    // Every king move walks into the queen, but the king is not attacked
    let pos = fen("k7/8/1Q6/8/8/8/8/2K5 b - - 0 1");
    let mut searcher = Searcher::new();
    assert_eq!(searcher.bound(&pos, 1, 1, false), 0);
}

#[test]
fn test_checkmate_scores_mated() {
    let pos = fen("k6R/8/1K6/8/8/8/8/8 b - - 0 1");
    let mut searcher = Searcher::new();
    assert_eq!(searcher.bound(&pos, 1, 1, false), -MATE_UPPER);
}

#[test]
fn test_fail_high_monotone_in_gamma() {
    let pos = Position::startpos();
    let mut seen_low = false;
    for gamma in (-400..=400).step_by(25) {
        let score = Searcher::new().bound(&pos, gamma, 1, true);
        let high = score >= gamma;
        // Once a gamma fails low, every larger one must too
        assert!(!(seen_low && high), "gamma {gamma} failed high after a lower gamma failed low");
        seen_low |= !high;
    }
    assert!(seen_low);
}

#[test]
fn test_search_yields_increasing_depths() {
    let pos = Position::startpos();
    let mut searcher = Searcher::new();
    let depths: Vec<u32> = searcher.search(&pos, &[pos.clone()]).take(3).map(|it| it.depth).collect();
    assert_eq!(depths, vec![1, 2, 3]);
    assert!(searcher.nodes() > 0);
}

#[test]
fn test_search_stops_at_max_depth() {
    let pos = Position::startpos();
    let config = SearchConfig {
        max_depth: 2,
        ..SearchConfig::default()
    };
    let mut searcher = Searcher::with_config(config);
    assert_eq!(searcher.search(&pos, &[]).count(), 2);
}

#[test]
fn test_search_resets_nodes() {
    let pos = Position::startpos();
    let mut searcher = Searcher::new();
    searcher.search(&pos, &[]).take(2).for_each(drop);
    let first = searcher.nodes();
    assert!(first > 0);

    let deepening = searcher.search(&pos, &[]);
    assert_eq!(deepening.nodes(), 0);
}

#[test]
fn test_clear_forgets_killers() {
    let pos = Position::startpos();
    let mut searcher = Searcher::new();
    searcher.search(&pos, &[]).next();
    assert!(searcher.killer(&pos).is_some());
    searcher.clear();
    assert_eq!(searcher.killer(&pos), None);
    assert_eq!(searcher.entry(&pos, 1, true), None);
}

#[test]
fn test_search_survives_table_overflow() {
    let pos = Position::startpos();
    let mut searcher = Searcher::with_config(SearchConfig {
        table_size: 16,
        ..SearchConfig::default()
    });
    assert_eq!(searcher.config().table_size, 16);

    let legal: Vec<Move> = pos.gen_moves().collect();
    let iterations: Vec<Iteration> = searcher.search(&pos, &[]).take(3).collect();
    assert_eq!(iterations.len(), 3);
    for it in &iterations {
        let best = it.best_move.expect("root move evicted");
        assert!(legal.contains(&best), "depth {}: {best:?}", it.depth);
    }
}
