use super::*;
use gambit_core::{NotationError, SearchLimits};
use gambit_engine::GambitEngine;

use crate::opening::book_moves;

/// Plays the first generated move, instantly.
struct FirstMove;

impl Engine for FirstMove {
    fn search(&mut self, pos: &Position, _history: &[Position], _limits: SearchLimits) -> SearchResult {
        SearchResult {
            best_move: pos.gen_moves().next(),
            score: 0,
            depth: 1,
            nodes: 1,
            stopped: false,
        }
    }

    fn name(&self) -> &str {
        "first move"
    }
}

fn no_book() -> PlayConfig {
    PlayConfig {
        use_opening_book: false,
        thinking_time_ms: 10,
        ..PlayConfig::default()
    }
}

fn pvp() -> GameSession {
    GameSession::new(GameMode::PlayerVsPlayer, no_book(), Box::new(FirstMove))
}

#[test]
fn test_players_alternate() {
    let mut game = pvp();
    assert_eq!(game.side_to_move(), Side::White);
    game.play("e2e4").unwrap();
    assert_eq!(game.side_to_move(), Side::Black);
    game.play("e7e5").unwrap();
    game.play("Nf3").unwrap();
    assert_eq!(game.ply(), 3);
    assert_eq!(game.log_text(), "1. e2e4 e7e5 2. Ng1f3");
    assert_eq!(game.moves()[1].side, Side::Black);
}

#[test]
fn test_illegal_move_leaves_game_unchanged() {
    let mut game = pvp();
    let err = game.play("e2e5").unwrap_err();
    assert!(matches!(err, PlayError::Notation(NotationError::IllegalMove(_))));
    assert_eq!(game.ply(), 0);
}

#[test]
fn test_king_capture_ends_game() {
    let mut game = pvp();
    for text in ["e2e4", "f7f6", "d1h5", "a7a6", "h5e8"] {
        game.play(text).unwrap();
    }
    assert_eq!(game.winner(), Some(Side::White));
    assert!(matches!(game.play("a6a5"), Err(PlayError::GameOver)));
    assert_eq!(game.moves().last().unwrap().record, "Qh5e8");
}

#[test]
fn test_takeback_between_players() {
    let mut game = pvp();
    assert!(matches!(game.takeback(), Err(PlayError::NothingToTakeBack)));
    game.play("e2e4").unwrap();
    game.play("e7e5").unwrap();
    assert_eq!(game.takeback().unwrap(), 1);
    assert_eq!(game.ply(), 1);
    assert_eq!(game.side_to_move(), Side::Black);
}

#[test]
fn test_takeback_reopens_finished_game() {
    let mut game = pvp();
    for text in ["e2e4", "f7f6", "d1h5", "a7a6", "h5e8"] {
        game.play(text).unwrap();
    }
    game.takeback().unwrap();
    assert!(!game.is_over());
    game.play("h5g6").unwrap();
}

#[test]
fn test_turn_checks() {
    let mut game = GameSession::new(GameMode::PlayerBlack, no_book(), Box::new(FirstMove));
    assert!(game.is_engine_turn());
    assert!(matches!(game.play("e2e4"), Err(PlayError::NotYourTurn)));

    let reply = game.engine_move().unwrap();
    assert_eq!(reply.played.side, Side::White);
    assert!(reply.search.is_some());
    assert!(matches!(game.engine_move(), Err(PlayError::NotEngineTurn)));

    let mut game = pvp();
    assert!(matches!(game.engine_move(), Err(PlayError::NotEngineTurn)));
}

#[test]
fn test_takeback_against_engine_undoes_both_moves() {
    let mut game = GameSession::new(GameMode::PlayerWhite, no_book(), Box::new(FirstMove));
    game.play("d2d4").unwrap();
    // Engine has not answered yet: only the player's move goes
    assert_eq!(game.takeback().unwrap(), 1);

    game.play("d2d4").unwrap();
    game.engine_move().unwrap();
    assert_eq!(game.takeback().unwrap(), 2);
    assert_eq!(game.ply(), 0);
}

#[test]
fn test_engine_opens_from_book() {
    let config = PlayConfig {
        use_opening_book: true,
        ..no_book()
    };
    let mut game = GameSession::new(GameMode::PlayerBlack, config, Box::new(FirstMove));
    let reply = game.engine_move().unwrap();
    assert!(reply.search.is_none());
    assert!(book_moves().any(|(m, _)| m == reply.played.mv));
}

#[test]
fn test_engine_reply_is_generated() {
    let mut game = GameSession::new(GameMode::PlayerWhite, no_book(), Box::new(GambitEngine::new()));
    game.play("e2e4").unwrap();
    let before = game.position().clone();
    let reply = game.engine_move().unwrap();
    assert!(before.gen_moves().any(|m| m == reply.played.mv));
    assert!(reply.search.unwrap().depth >= 1);
    assert_eq!(game.side_to_move(), Side::White);
}

#[test]
fn test_white_score_and_render() {
    let config = PlayConfig {
        show_eval: true,
        ..no_book()
    };
    let mut game = GameSession::new(GameMode::PlayerVsPlayer, config, Box::new(FirstMove));
    game.play("e2e4").unwrap();
    assert_eq!(game.white_score(), -game.position().score);
    assert!(game.white_score() > 0);

    let text = game.render(false);
    assert!(text.contains('['));
    assert!(text.contains(&format!("{:+}", game.white_score())));
}
