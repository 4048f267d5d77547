//! Weighted opening book for the engine's first move as White

use gambit_core::{Cell, Move};
use rand::seq::SliceRandom;
use rand::Rng;

/// First moves as (from, to, weight), White's orientation.
const BOOK: &[(Cell, Cell, u32)] = &[
    (84, 64, 18), // d2d4
    (85, 65, 18), // e2e4
    (83, 63, 15), // c2c4
    (97, 76, 10), // g1f3
    (92, 73, 8),  // b1c3
    (82, 72, 1),  // b2b3
    (81, 61, 1),  // a2a4
    (88, 68, 1),  // h2h4
    (87, 77, 1),  // g2g3
    (81, 71, 1),  // a2a3
    (88, 78, 1),  // h2h3
    (84, 74, 1),  // d2d3
    (85, 75, 1),  // e2e3
];

/// Every book move with its weight.
pub fn book_moves() -> impl Iterator<Item = (Move, u32)> {
    BOOK.iter().map(|&(from, to, weight)| (Move::new(from, to), weight))
}

/// Picks a first move for White with probability proportional to its weight.
pub fn pick_opening<R: Rng + ?Sized>(rng: &mut R) -> Option<Move> {
    BOOK.choose_weighted(rng, |entry| entry.2)
        .ok()
        .map(|&(from, to, _)| Move::new(from, to))
}
