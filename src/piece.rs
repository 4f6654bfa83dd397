use std::fmt;

use crate::{
    board::Board,
    color::Color,
    movegen::MoveGen,
    moves::{Move, MoveList},
    square::Square,
};

/// The off-board sentinel, returned when indexing outside the grid.
pub(crate) static WALL: Piece = Piece {
    color: Color::Wall,
    letter: '-',
    generators: Vec::new(),
    effects: Vec::new(),
    is_king: false,
    times_moved: 0,
};

/// A piece: its side, display letter, movement patterns, post-move effects
/// and how often it has moved.
///
/// Squares own their piece values outright. Vacant squares hold the empty
/// sentinel and off-board probes resolve to the wall sentinel, so board
/// reads never need an occupancy check. Piece identity is positional: two
/// equally shaped pieces are told apart only by where they stand.
#[derive(Clone, Debug)]
pub struct Piece {
    pub color: Color,
    pub letter: char,
    pub generators: Vec<MoveGen>,
    pub effects: Vec<Effect>,
    pub is_king: bool,
    pub times_moved: u32,
}

impl Piece {
    pub fn new(color: Color, letter: char, generators: Vec<MoveGen>) -> Piece {
        Piece {
            color,
            letter,
            generators,
            effects: Vec::new(),
            is_king: false,
            times_moved: 0,
        }
    }

    /// The vacant-square sentinel.
    pub fn empty() -> Piece {
        Piece::new(Color::Empty, ' ', Vec::new())
    }

    /// The off-board sentinel.
    pub fn wall() -> Piece {
        Piece::new(Color::Wall, '-', Vec::new())
    }

    /// Attaches post-move effects.
    #[must_use]
    pub fn with_effects(mut self, effects: Vec<Effect>) -> Piece {
        self.effects = effects;
        self
    }

    /// Marks the piece as royal. Check, mate and stalemate are defined by
    /// the safety of royal pieces.
    #[must_use]
    pub fn royal(mut self) -> Piece {
        self.is_king = true;
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.color == Color::Empty
    }

    /// The placement letter: uppercase for White, lowercase otherwise.
    pub fn fen_char(&self) -> char {
        if self.color == Color::White {
            self.letter.to_ascii_uppercase()
        } else {
            self.letter.to_ascii_lowercase()
        }
    }

    /// Runs every movement pattern of this piece from `from`, pushing the
    /// raw candidates without legality filtering.
    pub fn pseudo_legal_moves(
        &self,
        from: Square,
        board: &Board,
        depth: u32,
        moves: &mut MoveList,
    ) {
        for generator in &self.generators {
            generator.generate(self, from, board, depth, moves);
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

/// A post-move hook, fired after its piece lands.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Effect {
    /// Marks the square behind the destination as an en passant target
    /// after any move spanning at least two squares.
    EnPassant,
    /// Swaps the piece for its side's queen template on the far rank.
    Promote,
    /// On a capture, returns the piece to its origin and clears the
    /// destination, leaving only the capture itself visible.
    Rifle,
}

impl Effect {
    pub(crate) fn apply(self, color: Color, m: &Move, board: &mut Board) {
        match self {
            Effect::EnPassant => {
                if m.from.distance(m.to) >= 2 {
                    board.set_ep_square(Some(m.to + color.backward()));
                }
            }
            Effect::Promote => {
                if m.to.rank() == color.relative_rank(8) {
                    let queen = board.roster(color).get('Q').cloned();
                    if let Some(queen) = queen {
                        board.put(m.to, queen);
                    }
                }
            }
            Effect::Rifle => {
                if m.is_capture() {
                    let piece = board.take(m.to);
                    board.put(m.from, piece);
                }
            }
        }
    }
}
