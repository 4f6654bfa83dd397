use std::{collections::BTreeMap, fmt, ops};

use bitflags::bitflags;
use rand::Rng;

use crate::{
    army::{Army, Roster},
    color::{ByColor, Color},
    fen::{Fen, ParseFenError},
    moves::{Move, MoveList},
    piece::{Piece, WALL},
    square::Square,
};

/// The classical starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

bitflags! {
    /// The four availability flags of the third FEN field.
    ///
    /// These are carried and round-tripped through FEN. Whether a castle is
    /// actually playable is decided by the castle pattern itself, which
    /// checks that neither partner has moved.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct CastlingRights: u8 {
        const WHITE_KING = 1;
        const WHITE_QUEEN = 2;
        const BLACK_KING = 4;
        const BLACK_QUEEN = 8;
    }
}

/// The result of a finished game.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Outcome {
    Decisive { winner: Color },
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Decisive { winner } => Some(winner),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Outcome::Decisive {
                winner: Color::White,
            } => "1-0",
            Outcome::Decisive { winner: _ } => "0-1",
            Outcome::Draw => "½-½",
        })
    }
}

/// An 8×8 board with its full game state.
///
/// The grid holds owned [`Piece`] values; vacant squares hold the empty
/// sentinel and indexing off the board yields the wall sentinel, never an
/// error. A board also carries the side to move, castling flags, the
/// en passant target, both move counters, the two army rosters that map
/// placement letters to piece templates, and the FEN history that backs
/// undo and redo.
///
/// # Examples
///
/// ```
/// use skazka::Board;
///
/// let mut board = Board::new();
/// assert_eq!(board.legal_moves().len(), 20);
///
/// let m = board.make_move("e2".parse()?, "e4".parse()?);
/// assert_eq!(m.to_string(), "e2-e4");
/// assert_eq!(
///     board.fen(),
///     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 1 1",
/// );
/// # Ok::<_, skazka::ParseSquareError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Board {
    grid: Vec<Piece>,
    turn: Color,
    castling: CastlingRights,
    ep_square: Option<Square>,
    halfmove_clock: u32,
    fullmoves: u32,
    rosters: ByColor<Roster>,
    armies: ByColor<Army>,
    history: Vec<String>,
    cursor: usize,
}

impl Board {
    /// The starting position with the classical pieces on both sides.
    pub fn new() -> Board {
        Board::from_armies(Some(Army::default()), Some(Army::default()))
    }

    /// The starting position with the given armies, picking randomly for
    /// each side left unspecified.
    pub fn from_armies(white: Option<Army>, black: Option<Army>) -> Board {
        let mut rng = rand::rng();
        let white = white.unwrap_or_else(|| Army::ALL[rng.random_range(0..Army::ALL.len())]);
        let black = black.unwrap_or_else(|| Army::ALL[rng.random_range(0..Army::ALL.len())]);
        let mut board = Board {
            grid: (0..64).map(|_| Piece::empty()).collect(),
            turn: Color::White,
            castling: CastlingRights::all(),
            ep_square: None,
            halfmove_clock: 0,
            fullmoves: 1,
            rosters: ByColor {
                white: white.roster(Color::White),
                black: black.roster(Color::Black),
            },
            armies: ByColor { white, black },
            history: Vec::new(),
            cursor: 0,
        };
        let fen: Fen = STARTING_FEN.parse().expect("starting position parses");
        board
            .apply_fen(&fen)
            .expect("every roster has the classical letters");
        board.history.push(board.fen());
        board
    }

    /// A board in the given position, with the classical pieces.
    ///
    /// For a custom position with fairy armies, build the board with
    /// [`Board::from_armies`] and reposition it with [`Board::set_fen`].
    ///
    /// # Errors
    ///
    /// Errors when the FEN is malformed or places a letter neither roster
    /// defines.
    pub fn from_fen(fen: &str) -> Result<Board, ParseFenError> {
        let mut board = Board::new();
        board.set_fen(fen)?;
        Ok(board)
    }

    /// Replaces the position and starts a fresh history at it. The rosters
    /// and armies are kept.
    ///
    /// # Errors
    ///
    /// Errors when the FEN is malformed or places a letter neither roster
    /// defines. The board is left unchanged on error.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), ParseFenError> {
        let parsed: Fen = fen.parse()?;
        self.apply_fen(&parsed)?;
        self.history = vec![self.fen()];
        self.cursor = 0;
        Ok(())
    }

    /// Loads `fen` into the grid and counters, leaving history alone.
    fn apply_fen(&mut self, fen: &Fen) -> Result<(), ParseFenError> {
        let mut grid: Vec<Piece> = (0..64).map(|_| Piece::empty()).collect();
        for (square, letter) in fen.letters() {
            let color = Color::from_white(letter.is_ascii_uppercase());
            let template = self
                .rosters
                .by_color(color)
                .get(letter)
                .ok_or(ParseFenError::InvalidBoard)?;
            grid[Board::index(square)] = template.clone();
        }
        self.grid = grid;
        self.turn = fen.turn;
        self.castling = fen.castling;
        self.ep_square = fen.ep_square;
        self.halfmove_clock = fen.halfmove_clock;
        self.fullmoves = fen.fullmoves;
        Ok(())
    }

    fn index(square: Square) -> usize {
        (square.rank() * 8 + square.file()) as usize
    }

    /// Every square, file-major from a1: a1, a2, ... a8, b1, ...
    pub fn squares() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|file| (0..8).map(move |rank| Square::new(file, rank)))
    }

    /// The occupied squares and their pieces, in [`Board::squares`] order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        Board::squares()
            .map(move |square| (square, &self[square]))
            .filter(|(_, piece)| !piece.is_empty())
    }

    /// Places `piece` on `square`. Off-board squares are ignored.
    pub fn put(&mut self, square: Square, piece: Piece) {
        if square.in_bounds() {
            self.grid[Board::index(square)] = piece;
        }
    }

    /// Removes and returns the piece on `square`, leaving the square empty.
    /// Off the board this returns the wall sentinel.
    pub fn take(&mut self, square: Square) -> Piece {
        if square.in_bounds() {
            std::mem::replace(&mut self.grid[Board::index(square)], Piece::empty())
        } else {
            Piece::wall()
        }
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    pub fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    pub(crate) fn set_ep_square(&mut self, square: Option<Square>) {
        self.ep_square = square;
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmoves(&self) -> u32 {
        self.fullmoves
    }

    /// The armies the two sides were built from.
    pub fn armies(&self) -> ByColor<Army> {
        self.armies
    }

    /// The piece templates of one side.
    ///
    /// # Panics
    ///
    /// Panics when `color` is a sentinel.
    pub fn roster(&self, color: Color) -> &Roster {
        self.rosters.by_color(color)
    }

    /// The FEN snapshots recorded so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The index of the current position within [`Board::history`].
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The raw movement candidates of every `color` piece, without any
    /// legality filtering.
    pub fn pseudo_legal_moves(&self, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        for square in Board::squares() {
            let piece = &self[square];
            if piece.color == color {
                piece.pseudo_legal_moves(square, self, 0, &mut moves);
            }
        }
        moves
    }

    /// The legal moves of the side to move.
    pub fn legal_moves(&self) -> MoveList {
        self.legal_moves_for(self.turn)
    }

    /// The legal moves of `color`: pseudo-legal candidates that keep every
    /// path square safe and do not leave their own side in check.
    pub fn legal_moves_for(&self, color: Color) -> MoveList {
        let mut legal = MoveList::new();
        'candidates: for m in self.pseudo_legal_moves(color) {
            for &square in &m.path {
                let mut transit = self.clone();
                let mover = transit[m.from].clone();
                transit.put(square, mover);
                if square != m.from {
                    transit.put(m.from, Piece::empty());
                }
                if transit.is_check(!color) {
                    continue 'candidates;
                }
            }
            if !self.after(&m).is_check(!color) {
                legal.push(m);
            }
        }
        legal
    }

    /// The legal destinations of the side to move, keyed by origin square.
    pub fn move_map(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for m in self.legal_moves() {
            map.entry(m.from.to_string())
                .or_default()
                .push(m.to.to_string());
        }
        map
    }

    /// Whether any pseudo-legal move of `color` captures on `square`.
    pub fn is_attacked(&self, square: Square, color: Color) -> bool {
        self.pseudo_legal_moves(color)
            .iter()
            .any(|m| m.captured_squares().any(|taken| taken == square))
    }

    /// Whether `color` is giving check, that is, whether any royal piece of
    /// the other side stands attacked. Boards without a royal piece are
    /// never in check.
    pub fn is_check(&self, color: Color) -> bool {
        for square in Board::squares() {
            let piece = &self[square];
            if piece.color == !color && piece.is_king && self.is_attacked(square, color) {
                return true;
            }
        }
        false
    }

    /// The hypothetical board after `m`, leaving this one untouched.
    pub fn after(&self, m: &Move) -> Board {
        let mut next = self.clone();
        next.execute(m);
        next
    }

    /// Plays the legal move from `from` to `to`.
    ///
    /// When several legal moves share the endpoints, the one with the most
    /// side effects is preferred, then a capturing one: a castle beats the
    /// king's plain step onto the same square, a capturing reading of a
    /// compound move beats a quiet one. When nothing matches, a bare
    /// relocation is executed as a fallback; validating input against
    /// [`Board::move_map`] is the caller's job.
    pub fn make_move(&mut self, from: Square, to: Square) -> Move {
        let mut best = Move::quiet(from, to);
        for m in self.legal_moves() {
            if m.from == from
                && m.to == to
                && m.side_effects.len() >= best.side_effects.len()
                && (m.is_capture() || !best.is_capture())
            {
                best = m;
            }
        }
        self.execute(&best);
        best
    }

    /// Applies `m` to the board: the origin is vacated, nested side effects
    /// run first, captured squares are cleared, the piece lands and its
    /// post-move effects fire. Unless the move is free, the en passant
    /// target is cleared before the effects run, the clocks advance, the
    /// turn passes and a snapshot is pushed onto the history.
    pub fn execute(&mut self, m: &Move) {
        let mut piece = self.take(m.from);
        for effect in &m.side_effects {
            self.execute(effect);
        }
        for &square in &m.captures {
            self.put(square, Piece::empty());
        }
        piece.times_moved += 1;
        let color = piece.color;
        let effects = piece.effects.clone();
        self.put(m.to, piece);
        if !m.is_free {
            self.ep_square = None;
        }
        for effect in effects {
            effect.apply(color, m, self);
        }
        if !m.is_free {
            self.halfmove_clock += 1;
            if self.turn == Color::Black {
                self.fullmoves += 1;
            }
            self.turn = !self.turn;
            self.push_history();
        }
    }

    fn push_history(&mut self) {
        self.history.truncate(self.cursor + 1);
        self.history.push(self.fen());
        self.cursor += 1;
    }

    /// Steps `n` positions back in the history. Clamped to the oldest
    /// recorded position.
    pub fn undo(&mut self, n: usize) {
        self.seek(self.cursor.saturating_sub(n));
    }

    /// Steps `n` positions forward again. Clamped to the newest recorded
    /// position.
    pub fn redo(&mut self, n: usize) {
        self.seek(self.cursor.saturating_add(n));
    }

    /// Jumps to position `index` of the history, clamped to its bounds.
    /// Playing a move from an earlier position discards the notional
    /// future.
    pub fn seek(&mut self, index: usize) {
        self.cursor = index.min(self.history.len() - 1);
        let fen: Fen = self.history[self.cursor]
            .parse()
            .expect("history holds engine generated fens");
        self.apply_fen(&fen)
            .expect("history holds engine generated fens");
    }

    /// Puts the classical starting position back and forgets the history.
    pub fn reset(&mut self) {
        self.set_fen(STARTING_FEN)
            .expect("every roster has the classical letters");
    }

    /// `None` while the game is still open.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.legal_moves().is_empty() {
            return None;
        }
        Some(if self.is_check(!self.turn) {
            Outcome::Decisive { winner: !self.turn }
        } else {
            Outcome::Draw
        })
    }

    /// The position as a FEN string.
    pub fn fen(&self) -> String {
        self.to_fen(None).to_string()
    }

    /// The position as `color` sees it under fog of war: only `color`'s own
    /// pieces and pieces standing on squares `color` attacks are written,
    /// everything else reads as empty.
    pub fn kriegspiel_fen(&self, color: Color) -> String {
        self.to_fen(Some(color)).to_string()
    }

    fn to_fen(&self, viewer: Option<Color>) -> Fen {
        let mut fen = Fen::empty();
        for (square, piece) in self.pieces() {
            let visible = match viewer {
                None => true,
                Some(color) => piece.color == color || self.is_attacked(square, color),
            };
            if visible {
                fen.set_letter(square, piece.fen_char());
            }
        }
        fen.turn = self.turn;
        fen.castling = self.castling;
        fen.ep_square = self.ep_square;
        fen.halfmove_clock = self.halfmove_clock;
        fen.fullmoves = self.fullmoves;
        fen
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl ops::Index<Square> for Board {
    type Output = Piece;

    fn index(&self, square: Square) -> &Piece {
        if square.in_bounds() {
            &self.grid[Board::index(square)]
        } else {
            &WALL
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                write!(f, "{}", self[Square::new(file, rank)])?;
            }
            if rank > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
