use std::{error::Error, fmt, ops, str::FromStr};

/// A displacement between squares, authored from White's point of view.
///
/// `df` counts files toward the h-file, `dr` counts ranks away from White's
/// back rank. Black pieces apply offsets through [`Color::orient`], which
/// flips `dr`.
///
/// [`Color::orient`]: crate::Color::orient
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Offset {
    pub df: i16,
    pub dr: i16,
}

impl Offset {
    #[inline]
    pub const fn new(df: i16, dr: i16) -> Offset {
        Offset { df, dr }
    }

    /// The shortest offset along the same line, found by dividing out the
    /// greatest common divisor. The zero offset is returned unchanged.
    pub fn unit(self) -> Offset {
        let g = gcd(self.df.unsigned_abs(), self.dr.unsigned_abs()) as i16;
        if g == 0 {
            self
        } else {
            Offset::new(self.df / g, self.dr / g)
        }
    }
}

impl ops::Mul<i16> for Offset {
    type Output = Offset;

    #[inline]
    fn mul(self, n: i16) -> Offset {
        Offset::new(self.df * n, self.dr * n)
    }
}

fn gcd(a: u16, b: u16) -> u16 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// A board coordinate: 0-based file and rank.
///
/// Coordinates outside `0..8` are legal values. Looking one up on a board
/// yields the wall sentinel, which is how rays and leaps notice the edge
/// without bounds arithmetic.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Square {
    file: i16,
    rank: i16,
}

impl Square {
    #[inline]
    pub const fn new(file: i16, rank: i16) -> Square {
        Square { file, rank }
    }

    /// Only accepts coordinates on the board.
    #[inline]
    pub fn from_coords(file: i16, rank: i16) -> Option<Square> {
        let sq = Square::new(file, rank);
        sq.in_bounds().then_some(sq)
    }

    #[inline]
    pub const fn file(self) -> i16 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> i16 {
        self.rank
    }

    #[inline]
    pub const fn in_bounds(self) -> bool {
        0 <= self.file && self.file < 8 && 0 <= self.rank && self.rank < 8
    }

    /// Wraps the file back onto the board, for cylindrical movement. The
    /// rank is left alone.
    #[inline]
    pub fn wrap_file(self) -> Square {
        Square::new(self.file.rem_euclid(8), self.rank)
    }

    /// Chebyshev distance: the number of king steps between two squares.
    #[inline]
    pub fn distance(self, other: Square) -> i16 {
        (self.file - other.file)
            .abs()
            .max((self.rank - other.rank).abs())
    }
}

impl ops::Add<Offset> for Square {
    type Output = Square;

    #[inline]
    fn add(self, offset: Offset) -> Square {
        Square::new(self.file + offset.df, self.rank + offset.dr)
    }
}

impl ops::Sub for Square {
    type Output = Offset;

    #[inline]
    fn sub(self, other: Square) -> Offset {
        Offset::new(self.file - other.file, self.rank - other.rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.in_bounds() {
            write!(
                f,
                "{}{}",
                (b'a' + self.file as u8) as char,
                (b'1' + self.rank as u8) as char
            )
        } else {
            write!(f, "({},{})", self.file, self.rank)
        }
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self})")
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        match *s.as_bytes() {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => Ok(Square::new(
                i16::from(file - b'a'),
                i16::from(rank - b'1'),
            )),
            _ => Err(ParseSquareError),
        }
    }
}

fn push_unique(offsets: &mut Vec<Offset>, offset: Offset) {
    if !offsets.contains(&offset) {
        offsets.push(offset);
    }
}

/// All reflections and transpositions of `(df, dr)`: up to eight offsets,
/// deduplicated, in first-occurrence order.
pub fn symmetric(df: i16, dr: i16) -> Vec<Offset> {
    let mut offsets = Vec::new();
    for (a, b) in [(df, dr), (dr, df)] {
        for file_sign in [1, -1] {
            for rank_sign in [1, -1] {
                push_unique(&mut offsets, Offset::new(a * file_sign, b * rank_sign));
            }
        }
    }
    offsets
}

/// The given offsets followed by their file mirrors, deduplicated.
pub fn mirror_files(offsets: &[Offset]) -> Vec<Offset> {
    let mut out = Vec::new();
    for &offset in offsets {
        push_unique(&mut out, offset);
    }
    for &offset in offsets {
        push_unique(&mut out, Offset::new(-offset.df, offset.dr));
    }
    out
}

/// The given offsets followed by their rank mirrors, deduplicated.
pub fn mirror_ranks(offsets: &[Offset]) -> Vec<Offset> {
    let mut out = Vec::new();
    for &offset in offsets {
        push_unique(&mut out, offset);
    }
    for &offset in offsets {
        push_unique(&mut out, Offset::new(offset.df, -offset.dr));
    }
    out
}
