use super::*;

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves: Vec<Move> = pos.gen_moves().collect();
    // 16 pawn pushes plus 4 knight jumps
    assert_eq!(moves.len(), 20);
    assert!(moves.iter().all(|m| m.from.abs_diff(m.to) != 2));

    let pawn_moves = moves
        .iter()
        .filter(|m| pos.piece_at(m.from) == Square::Own(PieceKind::Pawn))
        .count();
    assert_eq!(pawn_moves, 16);
}

#[test]
fn test_generation_is_restartable() {
    let pos = Position::startpos();
    let first: Vec<Move> = pos.gen_moves().collect();
    let second: Vec<Move> = pos.gen_moves().collect();
    assert_eq!(first, second);
}

#[test]
fn test_castling_found_along_rook_ray() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let moves: Vec<Move> = pos.gen_moves().collect();
    assert!(moves.contains(&Move::new(95, 97)), "kingside castle");
    assert!(moves.contains(&Move::new(95, 93)), "queenside castle");

    // The castle is yielded straight after the rook step that discovered it
    let idx = moves.iter().position(|m| *m == Move::new(98, 96)).unwrap();
    assert_eq!(moves[idx + 1], Move::new(95, 97));
}

#[test]
fn test_no_castling_without_rights() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1").unwrap();
    assert!(pos.gen_moves().all(|m| m.from.abs_diff(m.to) != 2 || pos.piece_at(m.from) != Square::Own(PieceKind::King)));
}

#[test]
fn test_no_castling_when_blocked() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3KB1R w KQkq - 0 1").unwrap();
    let moves: Vec<Move> = pos.gen_moves().collect();
    assert!(!moves.contains(&Move::new(95, 97)));
    assert!(moves.contains(&Move::new(95, 93)));
}

#[test]
fn test_pawn_pushes_blocked() {
    // White pawn on e2 with a piece on e3: no single or double push
    let pos = Position::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
    let pawn_moves: Vec<Move> = pos.gen_moves().filter(|m| m.from == 85).collect();
    assert!(pawn_moves.is_empty(), "{pawn_moves:?}");

    // Blocker on e4 only stops the double push
    let pos = Position::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
    let pawn_moves: Vec<Move> = pos.gen_moves().filter(|m| m.from == 85).collect();
    assert_eq!(pawn_moves, vec![Move::new(85, 75)]);
}

#[test]
fn test_pawn_captures_diagonally_only_onto_foes() {
    let pos = Position::from_fen("4k3/8/8/8/8/3p1P2/4P3/4K3 w - - 0 1").unwrap();
    let pawn_moves: Vec<Move> = pos.gen_moves().filter(|m| m.from == 85).collect();
    // e3, e4 and the capture on d3; f3 is a friendly pawn
    assert_eq!(pawn_moves.len(), 3);
    assert!(pawn_moves.contains(&Move::new(85, 74)));
    assert!(!pawn_moves.contains(&Move::new(85, 76)));
}

#[test]
fn test_sliders_stop_at_first_capture() {
    let pos = Position::from_fen("4k3/8/8/8/r7/8/8/R3K3 w - - 0 1").unwrap();
    let rook_north: Vec<Move> = pos.gen_moves().filter(|m| m.from == 91 && m.to % 10 == 1).collect();
    // a2, a3, then the capture on a4
    assert_eq!(rook_north.len(), 3);
    assert_eq!(rook_north.last(), Some(&Move::new(91, 61)));
}
