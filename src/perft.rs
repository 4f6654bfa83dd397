//! Count legal move paths.
//!
//! # Examples
//!
//! ```
//! use skazka::{perft, Board};
//!
//! let board = Board::new();
//! assert_eq!(perft(&board, 1), 20);
//! assert_eq!(perft(&board, 2), 400);
//! assert_eq!(perft(&board, 3), 8902);
//! ```

use crate::board::Board;

/// Counts legal move paths of a given length.
///
/// Paths that run into mate or stalemate early are not counted. Useful for
/// comparing, testing and debugging move generation correctness.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth < 1 {
        1
    } else {
        let moves = board.legal_moves();
        if depth == 1 {
            moves.len() as u64
        } else {
            moves
                .iter()
                .map(|m| perft(&board.after(m), depth - 1))
                .sum()
        }
    }
}
