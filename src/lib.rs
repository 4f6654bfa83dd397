//! A library for fairy chess vocabulary and move generation.
//!
//! Pieces are not hard-coded. Each one carries a list of movement pattern
//! generators, built from combinators like [`MoveGen::slide`],
//! [`MoveGen::hop`] or [`MoveGen::compose`], and the board runs every piece
//! through the same engine. Classical chess is just the default [`Army`];
//! seventeen fairy armies ship alongside it.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use skazka::Board;
//!
//! let board = Board::new();
//! assert_eq!(board.legal_moves().len(), 20);
//! ```
//!
//! Play moves:
//!
//! ```
//! use skazka::Board;
//!
//! let mut board = Board::new();
//! board.make_move("e2".parse()?, "e4".parse()?);
//! board.make_move("e7".parse()?, "e5".parse()?);
//! assert_eq!(
//!     board.fen(),
//!     "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 2 2",
//! );
//! # Ok::<_, skazka::ParseSquareError>(())
//! ```
//!
//! Pit fairy armies against each other, or against a random pick:
//!
//! ```
//! use skazka::{Army, Board};
//!
//! let board = Board::from_armies(Some(Army::NuttyKnights), None);
//! assert_eq!(board.armies().white, Army::NuttyKnights);
//! assert_eq!(board.fen(), skazka::STARTING_FEN);
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! use skazka::Board;
//!
//! let board = Board::new();
//! assert_eq!(board.outcome(), None); // no winner yet
//! ```

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

mod army;
mod board;
mod color;
mod fen;
mod movegen;
mod moves;
mod perft;
mod piece;
mod square;

pub use army::{Army, Roster};
pub use board::{Board, CastlingRights, Outcome, STARTING_FEN};
pub use color::{ByColor, Color, ParseColorError};
pub use fen::{Fen, ParseFenError};
pub use movegen::{Modality, MoveGen};
pub use moves::{Move, MoveList};
pub use perft::perft;
pub use piece::{Effect, Piece};
pub use square::{mirror_files, mirror_ranks, symmetric, Offset, ParseSquareError, Square};
