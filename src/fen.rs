//! Parse and write Forsyth-Edwards notation.

use std::{error::Error, fmt, str::FromStr};

use crate::{board::CastlingRights, color::Color, square::Square};

/// A parsed FEN record.
///
/// `Fen` carries the textual game state only: piece placement as display
/// letters, the side to move, castling availability, the en passant target
/// and the move counters. Turning letters into pieces is the board's job,
/// since that requires the armies' rosters.
///
/// # Examples
///
/// ```
/// use skazka::{Color, Fen};
///
/// let fen: Fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".parse()?;
/// assert_eq!(fen.turn, Color::White);
/// assert_eq!(fen.letter_at("e1".parse()?), Some('K'));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Fen {
    pub turn: Color,
    pub castling: CastlingRights,
    pub ep_square: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmoves: u32,
    placement: [[Option<char>; 8]; 8],
}

impl Fen {
    /// An empty board with White to move and no castling rights.
    pub fn empty() -> Fen {
        Fen {
            turn: Color::White,
            castling: CastlingRights::empty(),
            ep_square: None,
            halfmove_clock: 0,
            fullmoves: 1,
            placement: [[None; 8]; 8],
        }
    }

    /// The letter on `square`, if the square is on the board and occupied.
    pub fn letter_at(&self, square: Square) -> Option<char> {
        if square.in_bounds() {
            self.placement[square.rank() as usize][square.file() as usize]
        } else {
            None
        }
    }

    /// Places `letter` on `square`. Off-board squares are ignored.
    pub fn set_letter(&mut self, square: Square, letter: char) {
        if square.in_bounds() {
            self.placement[square.rank() as usize][square.file() as usize] = Some(letter);
        }
    }

    /// All occupied squares with their letters, a1 through h8.
    pub fn letters(&self) -> impl Iterator<Item = (Square, char)> + '_ {
        (0..8).flat_map(move |rank| {
            (0..8).filter_map(move |file| {
                self.placement[rank as usize][file as usize]
                    .map(|letter| (Square::new(file, rank), letter))
            })
        })
    }
}

/// Errors that can occur when parsing a FEN.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ParseFenError {
    MissingField,
    InvalidBoard,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidHalfmoveClock,
    InvalidFullmoves,
    ExtraField,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ParseFenError::MissingField => "missing fen field",
            ParseFenError::InvalidBoard => "invalid fen board",
            ParseFenError::InvalidTurn => "invalid fen turn",
            ParseFenError::InvalidCastling => "invalid fen castling rights",
            ParseFenError::InvalidEpSquare => "invalid fen en passant square",
            ParseFenError::InvalidHalfmoveClock => "invalid fen halfmove clock",
            ParseFenError::InvalidFullmoves => "invalid fen fullmove number",
            ParseFenError::ExtraField => "too many fen fields",
        })
    }
}

impl Error for ParseFenError {}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Fen, ParseFenError> {
        let mut fen = Fen::empty();
        let mut parts = s.split_ascii_whitespace();

        let board_part = parts.next().ok_or(ParseFenError::MissingField)?;
        let mut rows = board_part.split('/');
        for rank in (0..8).rev() {
            let row = rows.next().ok_or(ParseFenError::InvalidBoard)?;
            let mut file: i16 = 0;
            for ch in row.chars() {
                match ch {
                    '1'..='8' => file += ch as i16 - '0' as i16,
                    'A'..='Z' | 'a'..='z' => {
                        if file > 7 {
                            return Err(ParseFenError::InvalidBoard);
                        }
                        fen.set_letter(Square::new(file, rank), ch);
                        file += 1;
                    }
                    _ => return Err(ParseFenError::InvalidBoard),
                }
            }
            if file != 8 {
                return Err(ParseFenError::InvalidBoard);
            }
        }
        if rows.next().is_some() {
            return Err(ParseFenError::InvalidBoard);
        }

        fen.turn = match parts.next() {
            Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(_) => return Err(ParseFenError::InvalidTurn),
            None => return Err(ParseFenError::MissingField),
        };

        let castling_part = parts.next().ok_or(ParseFenError::MissingField)?;
        if castling_part != "-" {
            for ch in castling_part.chars() {
                fen.castling |= match ch {
                    'K' => CastlingRights::WHITE_KING,
                    'Q' => CastlingRights::WHITE_QUEEN,
                    'k' => CastlingRights::BLACK_KING,
                    'q' => CastlingRights::BLACK_QUEEN,
                    _ => return Err(ParseFenError::InvalidCastling),
                };
            }
        }

        fen.ep_square = match parts.next().ok_or(ParseFenError::MissingField)? {
            "-" => None,
            part => Some(part.parse().map_err(|_| ParseFenError::InvalidEpSquare)?),
        };

        let clock_part = parts.next().ok_or(ParseFenError::MissingField)?;
        fen.halfmove_clock =
            btoi::btou(clock_part.as_bytes()).map_err(|_| ParseFenError::InvalidHalfmoveClock)?;

        let moves_part = parts.next().ok_or(ParseFenError::MissingField)?;
        fen.fullmoves =
            btoi::btou(moves_part.as_bytes()).map_err(|_| ParseFenError::InvalidFullmoves)?;

        if parts.next().is_some() {
            return Err(ParseFenError::ExtraField);
        }
        Ok(fen)
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            let mut run = 0;
            for file in 0..8 {
                match self.placement[rank as usize][file as usize] {
                    Some(letter) => {
                        if run > 0 {
                            write!(f, "{run}")?;
                            run = 0;
                        }
                        write!(f, "{letter}")?;
                    }
                    None => run += 1,
                }
            }
            if run > 0 {
                write!(f, "{run}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }

        write!(f, " {} ", self.turn.char())?;

        if self.castling.is_empty() {
            write!(f, "-")?;
        } else {
            for (flag, ch) in [
                (CastlingRights::WHITE_KING, 'K'),
                (CastlingRights::WHITE_QUEEN, 'Q'),
                (CastlingRights::BLACK_KING, 'k'),
                (CastlingRights::BLACK_QUEEN, 'q'),
            ] {
                if self.castling.contains(flag) {
                    write!(f, "{ch}")?;
                }
            }
        }

        match self.ep_square {
            Some(square) => write!(f, " {square}")?,
            None => write!(f, " -")?,
        }

        write!(f, " {} {}", self.halfmove_clock, self.fullmoves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STARTING: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_parse_starting_fen() {
        let fen: Fen = STARTING.parse().expect("valid fen");
        assert_eq!(fen.turn, Color::White);
        assert_eq!(fen.castling, CastlingRights::all());
        assert_eq!(fen.ep_square, None);
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmoves, 1);
        assert_eq!(fen.letter_at("e1".parse().expect("square")), Some('K'));
        assert_eq!(fen.letter_at("a8".parse().expect("square")), Some('r'));
        assert_eq!(fen.letter_at("e4".parse().expect("square")), None);
        assert_eq!(fen.letters().count(), 32);
    }

    #[test]
    fn test_roundtrip() {
        for fen in [
            STARTING,
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 1 1",
            "8/8/8/8/8/8/8/4K3 b - - 12 34",
            "4k3/8/8/8/8/8/8/4K3 w Kq - 3 9",
        ] {
            let parsed: Fen = fen.parse().expect("valid fen");
            assert_eq!(parsed.to_string(), fen);
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "8/8/8/8/8/8/8/8".parse::<Fen>(),
            Err(ParseFenError::MissingField)
        );
        assert_eq!(
            "8/8/8/8/8/8/8 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidBoard)
        );
        assert_eq!(
            "9/8/8/8/8/8/8/8 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidBoard)
        );
        assert_eq!(
            "8/8/8/8/8/8/8/8 x - - 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidTurn)
        );
        assert_eq!(
            "8/8/8/8/8/8/8/8 w X - 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidCastling)
        );
        assert_eq!(
            "8/8/8/8/8/8/8/8 w - e9 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidEpSquare)
        );
        assert_eq!(
            "8/8/8/8/8/8/8/8 w - - x 1".parse::<Fen>(),
            Err(ParseFenError::InvalidHalfmoveClock)
        );
        assert_eq!(
            "8/8/8/8/8/8/8/8 w - - 0 x".parse::<Fen>(),
            Err(ParseFenError::InvalidFullmoves)
        );
        assert_eq!(
            "8/8/8/8/8/8/8/8 w - - 0 1 extra".parse::<Fen>(),
            Err(ParseFenError::ExtraField)
        );
    }

    #[test]
    fn test_empty_castling_displays_dash() {
        let mut fen = Fen::empty();
        fen.set_letter("h4".parse().expect("square"), 'K');
        assert_eq!(fen.to_string(), "8/8/8/8/7K/8/8/8 w - - 0 1");
    }
}
