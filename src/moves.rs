use std::fmt;

use crate::square::Square;

/// A single board transformation.
///
/// Everything execution needs is spelled out on the move itself: the squares
/// cleared by a capture, the squares a castling transit must keep safe, and
/// nested moves applied atomically alongside this one (a castle's rook
/// relocation, a swap's counterpart). Free moves ride along inside another
/// move and do not end the turn.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Squares cleared when the move executes, besides whatever the piece
    /// lands on.
    pub captures: Vec<Square>,
    /// Squares that must stay safe from attack for the move to be legal,
    /// checked one at a time by the legality filter.
    pub path: Vec<Square>,
    /// Nested free moves executed before the piece lands.
    pub side_effects: Vec<Move>,
    /// Free moves do not flip the turn, advance the clocks or push history.
    pub is_free: bool,
}

impl Move {
    /// A plain relocation.
    pub fn quiet(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            captures: Vec::new(),
            path: Vec::new(),
            side_effects: Vec::new(),
            is_free: false,
        }
    }

    /// A capture of whatever stands on `to`.
    pub fn capture(from: Square, to: Square) -> Move {
        Move {
            captures: vec![to],
            ..Move::quiet(from, to)
        }
    }

    /// A free relocation, for side effects.
    pub fn free(from: Square, to: Square) -> Move {
        Move {
            is_free: true,
            ..Move::quiet(from, to)
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }

    /// The squares this move takes: the destination plus the listed capture
    /// squares. Empty for non-capturing moves.
    pub fn captured_squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.is_capture()
            .then_some(self.to)
            .into_iter()
            .chain(self.captures.iter().copied())
    }

    /// Fuses this move, acting as a second leg, onto `first`: the result
    /// runs from `first.from` to `self.to` with captures, paths and side
    /// effects of both legs, and is free only if both legs are.
    #[must_use]
    pub fn fuse(self, first: Move) -> Move {
        let mut captures = self.captures;
        captures.extend(first.captures);
        let mut path = self.path;
        path.extend(first.path);
        let mut side_effects = self.side_effects;
        side_effects.extend(first.side_effects);
        Move {
            from: first.from,
            to: self.to,
            captures,
            path,
            side_effects,
            is_free: self.is_free && first.is_free,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.from,
            if self.is_capture() { 'x' } else { '-' },
            self.to
        )
    }
}

/// Accumulator for generated moves.
///
/// Compound patterns (composed legs, delegation) have no small fixed bound,
/// so this is a plain growable list.
pub type MoveList = Vec<Move>;
