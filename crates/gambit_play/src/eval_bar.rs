/// Cells in a rendered bar.
pub const BAR_CELLS: usize = 8;

/// Expected share of the game for White, from a White-relative score in
/// centipawns.
pub fn white_share(score: i32) -> f64 {
    1.0 / (1.0 + (-f64::from(score) / 100.0).exp())
}

/// Horizontal bar, White's share filled from the left, followed by the score.
pub fn eval_bar(score: i32) -> String {
    let filled = (white_share(score) * BAR_CELLS as f64).round() as usize;
    let mut bar = String::with_capacity(BAR_CELLS * 3 + 12);
    bar.push('[');
    for i in 0..BAR_CELLS {
        bar.push(if i < filled { '#' } else { '.' });
    }
    bar.push_str(&format!("] {score:+}"));
    bar
}
