use std::{error::Error, fmt, ops, str::FromStr};

use crate::square::Offset;

/// The owner of a square.
///
/// Beyond the two sides there are two sentinel colors: [`Color::Empty`] for
/// vacant squares and [`Color::Wall`] for coordinates off the board. Probing
/// any square yields a piece with one of the four colors, so movement
/// patterns can follow arbitrary offsets without bounds checks.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Color {
    White,
    Black,
    Empty,
    Wall,
}

impl Color {
    /// Gets the side from `w` or `b`.
    pub fn from_char(ch: char) -> Option<Color> {
        match ch {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    #[inline]
    pub fn from_white(white: bool) -> Color {
        if white {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    pub fn from_black(black: bool) -> Color {
        if black {
            Color::Black
        } else {
            Color::White
        }
    }

    #[inline]
    pub fn is_white(self) -> bool {
        self == Color::White
    }

    #[inline]
    pub fn is_black(self) -> bool {
        self == Color::Black
    }

    /// Whether this is one of the two playing sides rather than a sentinel.
    #[inline]
    pub fn is_side(self) -> bool {
        matches!(self, Color::White | Color::Black)
    }

    /// Reorients an offset authored from White's point of view. Black flips
    /// the rank component; the sentinels leave it unchanged.
    #[inline]
    pub fn orient(self, offset: Offset) -> Offset {
        if self == Color::Black {
            Offset::new(offset.df, -offset.dr)
        } else {
            offset
        }
    }

    /// The 0-based rank index of this side's `n`-th rank, counted from its
    /// own back rank. `relative_rank(1)` is the back rank, `relative_rank(8)`
    /// the promotion rank.
    #[inline]
    pub fn relative_rank(self, n: i16) -> i16 {
        if self == Color::White {
            n - 1
        } else {
            8 - n
        }
    }

    /// Unit offset pointing backward from this side's point of view, the
    /// direction in which an en passant target sits relative to the pawn
    /// that just passed it.
    #[inline]
    pub fn backward(self) -> Offset {
        if self == Color::White {
            Offset::new(0, -1)
        } else {
            Offset::new(0, 1)
        }
    }

    pub fn char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
            Color::Empty => ' ',
            Color::Wall => '-',
        }
    }

    pub const ALL: [Color; 2] = [Color::White, Color::Black];
}

/// The opposing side. The sentinels are their own opposites.
impl ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
            sentinel => sentinel,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "white",
            Color::Black => "black",
            Color::Empty => "empty",
            Color::Wall => "wall",
        })
    }
}

/// Error when parsing an invalid color name.
#[derive(Clone, Debug)]
pub struct ParseColorError;

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid color")
    }
}

impl Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Color, ParseColorError> {
        Ok(match s {
            "white" => Color::White,
            "black" => Color::Black,
            "empty" => Color::Empty,
            "wall" => Color::Wall,
            _ => return Err(ParseColorError),
        })
    }
}

/// Container with a value for each side.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, Debug)]
pub struct ByColor<T> {
    pub white: T,
    pub black: T,
}

impl<T> ByColor<T> {
    #[inline]
    pub fn new_with<F>(mut init: F) -> ByColor<T>
    where
        F: FnMut(Color) -> T,
    {
        ByColor {
            white: init(Color::White),
            black: init(Color::Black),
        }
    }

    /// # Panics
    ///
    /// Panics when `color` is a sentinel.
    #[inline]
    pub fn by_color(&self, color: Color) -> &T {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
            sentinel => panic!("no {sentinel} entry"),
        }
    }

    /// # Panics
    ///
    /// Panics when `color` is a sentinel.
    #[inline]
    pub fn by_color_mut(&mut self, color: Color) -> &mut T {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
            sentinel => panic!("no {sentinel} entry"),
        }
    }

    /// # Panics
    ///
    /// Panics when `color` is a sentinel.
    #[inline]
    pub fn into_color(self, color: Color) -> T {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
            sentinel => panic!("no {sentinel} entry"),
        }
    }

    #[inline]
    pub fn as_ref(&self) -> ByColor<&T> {
        ByColor {
            white: &self.white,
            black: &self.black,
        }
    }

    pub fn map<U, F>(self, mut f: F) -> ByColor<U>
    where
        F: FnMut(T) -> U,
    {
        ByColor {
            white: f(self.white),
            black: f(self.black),
        }
    }
}
