use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::{
    board::Board,
    color::Color,
    moves::{Move, MoveList},
    piece::Piece,
    square::{Offset, Square},
};

bitflags! {
    /// What a pattern may do on arrival: move to an empty square, capture,
    /// or capture through the board's en passant target.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct Modality: u8 {
        const QUIET = 1;
        const CAPTURE = 2;
        const EN_PASSANT = 4;
    }
}

impl Default for Modality {
    fn default() -> Modality {
        Modality::QUIET | Modality::CAPTURE
    }
}

/// Ray length that cannot be exhausted on an 8×8 board, even when leaping
/// blockers.
const UNLIMITED: u32 = 100;

/// A movement pattern.
///
/// Patterns are the combinators armies are built from: a piece carries an
/// ordered list of them, and its raw move set is the concatenation of what
/// each produces. A pattern never mutates the board it reads. The `depth`
/// argument guards delegation: patterns that replay other pieces' patterns
/// act only at depth 0 and probe at depth 1, which is what makes mutual
/// delegation terminate.
#[derive(Clone, Debug)]
pub enum MoveGen {
    /// Leaps to a fixed set of offsets.
    Jump {
        offsets: Vec<Offset>,
        modality: Modality,
        cylindrical: bool,
    },
    /// Repeats an offset until blocked, capturing on the blocker.
    Slide {
        offsets: Vec<Offset>,
        modality: Modality,
        range: u32,
        step_mod: u32,
        step_rem: u32,
        cylindrical: bool,
        spacious: bool,
        leaps: u32,
    },
    /// Leaps over a screen piece, landing anywhere beyond it.
    Hop {
        offsets: Vec<Offset>,
        modality: Modality,
        chain: bool,
        short: bool,
    },
    /// Two-square advance through empty squares from the own second rank.
    BigPawn { offsets: Vec<Offset> },
    /// Classical castling, generalized to any partner letter and distance.
    Castle { partners: String },
    /// Castling without the royal, unmoved or top-level restrictions.
    PowerCastle { partners: String },
    /// Leaps to the square just beyond any piece on the board.
    PowerHop { modality: Modality },
    /// Trades places with a same-colored piece of the given letter.
    Swap { partners: String },
    /// Runs `inner` as a first leg and continues non-capturing legs with
    /// `outer` from the landing square, fused into single moves.
    Compose {
        outer: Vec<MoveGen>,
        inner: Vec<MoveGen>,
    },
    /// Replays `pattern` for nearby friendly pieces matching `partners`;
    /// the produced moves keep the partner's square as their origin.
    Support {
        distance: i16,
        pattern: Box<MoveGen>,
        partners: String,
    },
    /// Borrows the patterns of differently lettered pieces nearby.
    Student { distance: i16, enemies: bool },
    /// Captures only what threatens to capture back; quiet moves come from
    /// the wrapped patterns.
    InverseCapture { patterns: Vec<MoveGen> },
    /// Clips the wrapped patterns to at most half the distance toward each
    /// board edge.
    Halfling { patterns: Vec<MoveGen> },
}

impl MoveGen {
    pub fn jump(offsets: Vec<Offset>) -> MoveGen {
        MoveGen::Jump {
            offsets,
            modality: Modality::default(),
            cylindrical: false,
        }
    }

    pub fn slide(offsets: Vec<Offset>) -> MoveGen {
        MoveGen::Slide {
            offsets,
            modality: Modality::default(),
            range: UNLIMITED,
            step_mod: 1,
            step_rem: 0,
            cylindrical: false,
            spacious: false,
            leaps: 0,
        }
    }

    pub fn hop(offsets: Vec<Offset>) -> MoveGen {
        MoveGen::Hop {
            offsets,
            modality: Modality::default(),
            chain: true,
            short: false,
        }
    }

    pub fn big_pawn(offsets: Vec<Offset>) -> MoveGen {
        MoveGen::BigPawn { offsets }
    }

    pub fn castle(partners: &str) -> MoveGen {
        MoveGen::Castle {
            partners: partners.to_owned(),
        }
    }

    pub fn power_castle(partners: &str) -> MoveGen {
        MoveGen::PowerCastle {
            partners: partners.to_owned(),
        }
    }

    pub fn power_hop() -> MoveGen {
        MoveGen::PowerHop {
            modality: Modality::default(),
        }
    }

    pub fn swap(partners: &str) -> MoveGen {
        MoveGen::Swap {
            partners: partners.to_owned(),
        }
    }

    pub fn compose(outer: Vec<MoveGen>, inner: Vec<MoveGen>) -> MoveGen {
        MoveGen::Compose { outer, inner }
    }

    pub fn support(distance: i16, pattern: MoveGen, partners: &str) -> MoveGen {
        MoveGen::Support {
            distance,
            pattern: Box::new(pattern),
            partners: partners.to_owned(),
        }
    }

    pub fn student(distance: i16, enemies: bool) -> MoveGen {
        MoveGen::Student { distance, enemies }
    }

    pub fn inverse_capture(patterns: Vec<MoveGen>) -> MoveGen {
        MoveGen::InverseCapture { patterns }
    }

    pub fn halfling(patterns: Vec<MoveGen>) -> MoveGen {
        MoveGen::Halfling { patterns }
    }

    /// Drops the capture modality. No effect on patterns without one.
    #[must_use]
    pub fn quiet_only(mut self) -> MoveGen {
        if let Some(modality) = self.modality_mut() {
            modality.remove(Modality::CAPTURE);
        }
        self
    }

    /// Drops the quiet modality. No effect on patterns without one.
    #[must_use]
    pub fn captures_only(mut self) -> MoveGen {
        if let Some(modality) = self.modality_mut() {
            modality.remove(Modality::QUIET);
        }
        self
    }

    /// Allows capturing through the board's en passant target.
    #[must_use]
    pub fn en_passant(mut self) -> MoveGen {
        if let Some(modality) = self.modality_mut() {
            modality.insert(Modality::EN_PASSANT);
        }
        self
    }

    fn modality_mut(&mut self) -> Option<&mut Modality> {
        match self {
            MoveGen::Jump { modality, .. }
            | MoveGen::Slide { modality, .. }
            | MoveGen::Hop { modality, .. }
            | MoveGen::PowerHop { modality } => Some(modality),
            _ => None,
        }
    }

    /// Wraps files around the board edge. Jumps and slides only.
    #[must_use]
    pub fn cylindrical(mut self) -> MoveGen {
        match &mut self {
            MoveGen::Jump { cylindrical, .. } | MoveGen::Slide { cylindrical, .. } => {
                *cylindrical = true;
            }
            _ => {}
        }
        self
    }

    /// Caps the slide length.
    #[must_use]
    pub fn range(mut self, steps: u32) -> MoveGen {
        if let MoveGen::Slide { range, .. } = &mut self {
            *range = steps;
        }
        self
    }

    /// Offers only the slide steps `i` with `i % m == r`.
    #[must_use]
    pub fn modulo(mut self, m: u32, r: u32) -> MoveGen {
        if let MoveGen::Slide {
            step_mod, step_rem, ..
        } = &mut self
        {
            *step_mod = m.max(1);
            *step_rem = r;
        }
        self
    }

    /// Requires the square beyond each slide destination to be free of
    /// pieces.
    #[must_use]
    pub fn spacious(mut self) -> MoveGen {
        if let MoveGen::Slide { spacious, .. } = &mut self {
            *spacious = true;
        }
        self
    }

    /// Lets a slide pass over up to `n` blocking pieces before the ray
    /// stops.
    #[must_use]
    pub fn leaping(mut self, n: u32) -> MoveGen {
        if let MoveGen::Slide { leaps, .. } = &mut self {
            *leaps = n;
        }
        self
    }

    /// Stops a hop after its first screen instead of chaining onward.
    #[must_use]
    pub fn single(mut self) -> MoveGen {
        if let MoveGen::Hop { chain, .. } = &mut self {
            *chain = false;
        }
        self
    }

    /// Steps past hop screens by the minimal direction instead of the full
    /// offset, the grasshopper convention.
    #[must_use]
    pub fn short(mut self) -> MoveGen {
        if let MoveGen::Hop { short, .. } = &mut self {
            *short = true;
        }
        self
    }

    /// Pushes the raw candidate moves of this pattern for `piece` standing
    /// on `from`.
    pub fn generate(
        &self,
        piece: &Piece,
        from: Square,
        board: &Board,
        depth: u32,
        moves: &mut MoveList,
    ) {
        match self {
            MoveGen::Jump {
                offsets,
                modality,
                cylindrical,
            } => jump(piece, from, board, offsets, *modality, *cylindrical, moves),
            MoveGen::Slide {
                offsets,
                modality,
                range,
                step_mod,
                step_rem,
                cylindrical,
                spacious,
                leaps,
            } => slide(
                piece,
                from,
                board,
                offsets,
                *modality,
                *range,
                *step_mod,
                *step_rem,
                *cylindrical,
                *spacious,
                *leaps,
                moves,
            ),
            MoveGen::Hop {
                offsets,
                modality,
                chain,
                short,
            } => hop(
                piece, from, board, offsets, *modality, *chain, *short, moves,
            ),
            MoveGen::BigPawn { offsets } => big_pawn(piece, from, board, offsets, moves),
            MoveGen::Castle { partners } => castle(piece, from, board, partners, depth, moves),
            MoveGen::PowerCastle { partners } => power_castle(piece, from, board, partners, moves),
            MoveGen::PowerHop { modality } => power_hop(piece, from, board, *modality, moves),
            MoveGen::Swap { partners } => swap(piece, from, board, partners, moves),
            MoveGen::Compose { outer, inner } => {
                compose(piece, from, board, outer, inner, depth, moves)
            }
            MoveGen::Support {
                distance,
                pattern,
                partners,
            } => support(piece, from, board, *distance, pattern, partners, depth, moves),
            MoveGen::Student { distance, enemies } => {
                student(piece, from, board, *distance, *enemies, depth, moves)
            }
            MoveGen::InverseCapture { patterns } => {
                inverse_capture(piece, from, board, patterns, depth, moves)
            }
            MoveGen::Halfling { patterns } => {
                halfling(piece, from, board, patterns, depth, moves)
            }
        }
    }
}

/// Classifies a single destination. Every simple pattern funnels through
/// here: an enemy target becomes a capture, an empty square matching the
/// board's en passant target becomes an en passant capture, any other empty
/// square a quiet move. Own pieces and the wall yield nothing.
fn base(
    piece: &Piece,
    from: Square,
    board: &Board,
    to: Square,
    modality: Modality,
    moves: &mut MoveList,
) {
    let target = &board[to];
    if target.color == !piece.color {
        if modality.contains(Modality::CAPTURE) {
            moves.push(Move::capture(from, to));
        }
    } else if target.is_empty() {
        if modality.contains(Modality::EN_PASSANT | Modality::CAPTURE)
            && board.ep_square() == Some(to)
        {
            let mut m = Move::quiet(from, to);
            m.captures.push(to + piece.color.backward());
            moves.push(m);
        } else if modality.contains(Modality::QUIET) {
            moves.push(Move::quiet(from, to));
        }
    }
}

fn jump(
    piece: &Piece,
    from: Square,
    board: &Board,
    offsets: &[Offset],
    modality: Modality,
    cylindrical: bool,
    moves: &mut MoveList,
) {
    for &offset in offsets {
        let mut to = from + piece.color.orient(offset);
        if cylindrical {
            to = to.wrap_file();
        }
        base(piece, from, board, to, modality, moves);
    }
}

#[allow(clippy::too_many_arguments)]
fn slide(
    piece: &Piece,
    from: Square,
    board: &Board,
    offsets: &[Offset],
    modality: Modality,
    range: u32,
    step_mod: u32,
    step_rem: u32,
    cylindrical: bool,
    spacious: bool,
    leaps: u32,
    moves: &mut MoveList,
) {
    for &offset in offsets {
        let off = piece.color.orient(offset);
        let mut leaps_left = leaps;
        let mut to = from;
        for i in 1..=range {
            to = to + off;
            if cylindrical {
                to = to.wrap_file();
            }
            let roomy = !spacious || !board[to + off].color.is_side();
            if i % step_mod == step_rem && roomy {
                base(piece, from, board, to, modality, moves);
            }
            if !board[to].is_empty() {
                if leaps_left == 0 {
                    break;
                }
                leaps_left -= 1;
            }
        }
    }
}

fn hop(
    piece: &Piece,
    from: Square,
    board: &Board,
    offsets: &[Offset],
    modality: Modality,
    chain: bool,
    short: bool,
    moves: &mut MoveList,
) {
    for &offset in offsets {
        let off = piece.color.orient(offset);
        let step = if short { off.unit() } else { off };
        let mut screen = from + off;
        let mut to = screen + step;
        // At most three screens fit along one direction, each yielding at
        // most two moves.
        let mut taken: ArrayVec<Square, 8> = ArrayVec::new();
        while to.in_bounds() {
            if !board[to].is_empty() || board[screen].is_empty() {
                if modality.contains(Modality::EN_PASSANT) && board.ep_square() == Some(screen) {
                    taken.push(screen + piece.color.backward());
                    moves.push(hop_move(from, to, &taken));
                } else {
                    break;
                }
            }
            if modality.contains(Modality::QUIET) && board[screen].color == piece.color {
                moves.push(hop_move(from, to, &taken));
            }
            if modality.contains(Modality::CAPTURE) && board[screen].color == !piece.color {
                taken.push(screen);
                moves.push(hop_move(from, to, &taken));
            }
            screen = to + off;
            to = screen + step;
            if !chain {
                break;
            }
        }
    }
}

fn hop_move(from: Square, to: Square, taken: &[Square]) -> Move {
    let mut m = Move::quiet(from, to);
    m.captures.extend_from_slice(taken);
    m
}

fn big_pawn(piece: &Piece, from: Square, board: &Board, offsets: &[Offset], moves: &mut MoveList) {
    if from.rank() != piece.color.relative_rank(2) {
        return;
    }
    for &offset in offsets {
        let off = piece.color.orient(offset);
        let mid = from + off;
        if board[mid].is_empty() {
            let to = mid + off;
            if board[to].is_empty() {
                moves.push(Move::quiet(from, to));
            }
        }
    }
}

fn partner_match(target: &Piece, color: Color, partners: &str) -> bool {
    target.color == color
        && partners
            .to_ascii_uppercase()
            .contains(target.letter.to_ascii_uppercase())
}

/// The two-step approach toward `partner`: one move from `from` to the
/// square two units along the line, relocating the partner to the square
/// one unit along. Both squares must be empty or be the partner itself.
fn approach(from: Square, partner: Square, board: &Board, with_path: bool) -> Option<Move> {
    let unit = (partner - from).unit();
    let through = from + unit;
    if board[through].is_empty() || through == partner {
        let to = from + unit * 2;
        if board[to].is_empty() || to == partner {
            let mut m = Move::quiet(from, to);
            m.side_effects.push(Move::free(partner, through));
            if with_path {
                m.path = vec![from, through];
            }
            return Some(m);
        }
    }
    None
}

fn castle(
    piece: &Piece,
    from: Square,
    board: &Board,
    partners: &str,
    depth: u32,
    moves: &mut MoveList,
) {
    if depth > 0 || piece.times_moved != 0 {
        return;
    }
    for square in Board::squares() {
        if square == from {
            continue;
        }
        let target = &board[square];
        if partner_match(target, piece.color, partners) && target.times_moved == 0 {
            if let Some(m) = approach(from, square, board, true) {
                moves.push(m);
            }
        }
    }
}

fn power_castle(
    piece: &Piece,
    from: Square,
    board: &Board,
    partners: &str,
    moves: &mut MoveList,
) {
    for square in Board::squares() {
        if square == from {
            continue;
        }
        if partner_match(&board[square], piece.color, partners) {
            if let Some(m) = approach(from, square, board, false) {
                moves.push(m);
            }
        }
    }
}

fn power_hop(piece: &Piece, from: Square, board: &Board, modality: Modality, moves: &mut MoveList) {
    for square in Board::squares() {
        if square != from && !board[square].is_empty() {
            let offset = square - from;
            let to = from + offset + offset.unit();
            base(piece, from, board, to, modality, moves);
        }
    }
}

fn swap(piece: &Piece, from: Square, board: &Board, partners: &str, moves: &mut MoveList) {
    for to in Board::squares() {
        let target = &board[to];
        if target.color == piece.color
            && letter_eq(partners, target.letter)
            && target.letter != piece.letter
        {
            let mut m = Move::quiet(from, to);
            m.side_effects.push(Move::free(to, from));
            moves.push(m);
        }
    }
}

fn letter_eq(partners: &str, letter: char) -> bool {
    let mut chars = partners.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => ch.eq_ignore_ascii_case(&letter),
        _ => false,
    }
}

fn compose(
    piece: &Piece,
    from: Square,
    board: &Board,
    outer: &[MoveGen],
    inner: &[MoveGen],
    depth: u32,
    moves: &mut MoveList,
) {
    for second in outer {
        for first in inner {
            let mut starts = MoveList::new();
            first.generate(piece, from, board, depth, &mut starts);
            for start in starts {
                moves.push(start.clone());
                if start.is_capture() {
                    continue;
                }
                let mut continuations = MoveList::new();
                second.generate(piece, start.to, board, depth, &mut continuations);
                for continuation in continuations {
                    moves.push(continuation.fuse(start.clone()));
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn support(
    piece: &Piece,
    from: Square,
    board: &Board,
    distance: i16,
    pattern: &MoveGen,
    partners: &str,
    depth: u32,
    moves: &mut MoveList,
) {
    for square in Board::squares() {
        let supporter = &board[square];
        if supporter.color == piece.color
            && square.distance(from) <= distance
            && square != from
            && partners.contains(supporter.letter.to_ascii_uppercase())
        {
            pattern.generate(supporter, square, board, depth, moves);
        }
    }
}

fn student(
    piece: &Piece,
    from: Square,
    board: &Board,
    distance: i16,
    enemies: bool,
    depth: u32,
    moves: &mut MoveList,
) {
    if depth > 0 {
        return;
    }
    for square in Board::squares() {
        let mentor = &board[square];
        if square.distance(from) <= distance
            && mentor.letter != piece.letter
            && (mentor.color == piece.color || enemies)
        {
            for pattern in &mentor.generators {
                pattern.generate(piece, from, board, depth + 1, moves);
            }
        }
    }
}

fn inverse_capture(
    piece: &Piece,
    from: Square,
    board: &Board,
    patterns: &[MoveGen],
    depth: u32,
    moves: &mut MoveList,
) {
    if depth == 0 {
        'targets: for square in Board::squares() {
            if board[square].color != !piece.color {
                continue;
            }
            for pattern in &board[square].generators {
                let mut probes = MoveList::new();
                pattern.generate(piece, from, board, depth + 1, &mut probes);
                if let Some(probe) = probes.into_iter().find(|m| m.to == square) {
                    moves.push(probe);
                    continue 'targets;
                }
            }
        }
    }
    for pattern in patterns {
        let mut produced = MoveList::new();
        pattern.generate(piece, from, board, depth, &mut produced);
        for m in produced {
            if !m.is_capture() || depth > 0 {
                moves.push(m);
            }
        }
    }
}

fn halfling(
    piece: &Piece,
    from: Square,
    board: &Board,
    patterns: &[MoveGen],
    depth: u32,
    moves: &mut MoveList,
) {
    for pattern in patterns {
        let mut produced = MoveList::new();
        pattern.generate(piece, from, board, depth, &mut produced);
        for m in produced {
            if in_half_range(m.from, m.to) {
                moves.push(m);
            }
        }
    }
}

/// Whether `to` stays within half the remaining distance toward every board
/// edge, seen from `from`. Doubled to avoid fractional halves.
fn in_half_range(from: Square, to: Square) -> bool {
    2 * to.rank() >= from.rank() - 1
        && 2 * to.file() >= from.file() - 1
        && 2 * to.rank() <= from.rank() + 8
        && 2 * to.file() <= from.file() + 8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    fn moves_on(fen: &str, gens: Vec<MoveGen>, at: &str) -> Vec<String> {
        let board = Board::from_fen(fen).expect("valid fen");
        let from = sq(at);
        let piece = Piece {
            generators: gens,
            ..board[from].clone()
        };
        let mut moves = MoveList::new();
        piece.pseudo_legal_moves(from, &board, 0, &mut moves);
        moves.iter().map(Move::to_string).collect()
    }

    #[test]
    fn test_jump_stays_on_board() {
        let dests = moves_on(
            "8/8/8/8/8/8/8/N6K w - - 0 1",
            vec![MoveGen::jump(crate::square::symmetric(2, 1))],
            "a1",
        );
        assert_eq!(dests, vec!["a1-c2", "a1-b3"]);
    }

    #[test]
    fn test_jump_cylindrical_wraps() {
        let dests = moves_on(
            "8/8/8/8/8/8/8/N6K w - - 0 1",
            vec![MoveGen::jump(crate::square::symmetric(2, 1)).cylindrical()],
            "a1",
        );
        assert!(dests.contains(&"a1-g2".to_owned()));
        assert!(dests.contains(&"a1-b3".to_owned()));
        assert!(dests.contains(&"a1-h3".to_owned()));
        assert!(!dests.contains(&"a1-h1".to_owned()));
    }

    #[test]
    fn test_slide_blocks_and_captures() {
        let dests = moves_on(
            "8/8/8/3p4/8/3P4/8/3R3K w - - 0 1",
            vec![MoveGen::slide(crate::square::symmetric(1, 0))],
            "d1",
        );
        assert!(dests.contains(&"d1-d2".to_owned()));
        assert!(!dests.contains(&"d1-d3".to_owned()));
        assert!(dests.contains(&"d1-a1".to_owned()));
        assert!(dests.contains(&"d1-g1".to_owned()));
    }

    #[test]
    fn test_slide_leaping_passes_one_blocker() {
        let dests = moves_on(
            "8/8/8/3p4/8/3P4/8/3R3K w - - 0 1",
            vec![MoveGen::slide(vec![Offset::new(0, 1)]).leaping(1)],
            "d1",
        );
        assert!(!dests.contains(&"d1-d3".to_owned()));
        assert!(dests.contains(&"d1-d4".to_owned()));
        assert!(dests.contains(&"d1xd5".to_owned()));
        assert!(!dests.contains(&"d1-d6".to_owned()));
    }

    #[test]
    fn test_slide_spacious_needs_room_beyond() {
        let dests = moves_on(
            "8/8/8/3p4/8/8/8/3R3K w - - 0 1",
            vec![MoveGen::slide(vec![Offset::new(0, 1)]).spacious()],
            "d1",
        );
        assert!(dests.contains(&"d1-d2".to_owned()));
        assert!(dests.contains(&"d1-d3".to_owned()));
        // d5 holds a pawn, so d4 lacks room beyond it. Capturing the pawn
        // itself is fine: the square beyond d5 is empty.
        assert!(!dests.contains(&"d1-d4".to_owned()));
        assert!(dests.contains(&"d1xd5".to_owned()));
        assert!(!dests.contains(&"d1-d6".to_owned()));
    }

    #[test]
    fn test_slide_modulo_skips_steps() {
        let dests = moves_on(
            "8/8/8/8/8/8/8/R6K w - - 0 1",
            vec![MoveGen::slide(vec![Offset::new(0, 1)]).modulo(2, 0)],
            "a1",
        );
        assert_eq!(dests, vec!["a1-a3", "a1-a5", "a1-a7"]);
    }

    #[test]
    fn test_hop_needs_screen() {
        // The screen sits exactly one offset away; short lands one unit
        // step beyond it instead of a full further offset.
        let gens = vec![MoveGen::hop(vec![Offset::new(0, 4)]).short()];
        let empty = moves_on("8/8/8/8/8/8/8/Q6K w - - 0 1", gens.clone(), "a1");
        assert!(empty.is_empty());

        let screened = moves_on("8/8/8/p7/8/8/8/Q6K w - - 0 1", gens, "a1");
        assert_eq!(screened, vec!["a1xa6"]);
    }

    #[test]
    fn test_hop_chains_and_accumulates_captures() {
        let fen = "8/8/8/8/3p4/8/3p4/3R3K w - - 0 1";
        let gens = vec![MoveGen::hop(vec![Offset::new(0, 1)])];
        let dests = moves_on(fen, gens, "d1");
        // Land on d3 taking the d2 screen, then chain over the d4 screen
        // onto d5 taking both.
        assert_eq!(dests, vec!["d1xd3", "d1xd5"]);

        let board = Board::from_fen(fen).expect("valid fen");
        let piece = Piece {
            generators: vec![MoveGen::hop(vec![Offset::new(0, 1)])],
            ..board[sq("d1")].clone()
        };
        let mut moves = MoveList::new();
        piece.pseudo_legal_moves(sq("d1"), &board, 0, &mut moves);
        assert_eq!(moves[0].captures, vec![sq("d2")]);
        assert_eq!(moves[1].captures, vec![sq("d2"), sq("d4")]);
    }

    #[test]
    fn test_hop_single_stops_after_first_screen() {
        let gens = vec![MoveGen::hop(vec![Offset::new(0, 1)]).single()];
        let dests = moves_on("8/8/8/8/3p4/8/3p4/3R3K w - - 0 1", gens, "d1");
        assert_eq!(dests, vec!["d1xd3"]);
    }

    #[test]
    fn test_big_pawn_rank_and_blockers() {
        let gens = vec![MoveGen::big_pawn(vec![Offset::new(0, 1)])];
        let from_second = moves_on("8/8/8/8/8/8/4P3/7K w - - 0 1", gens.clone(), "e2");
        assert_eq!(from_second, vec!["e2-e4"]);

        let from_third = moves_on("8/8/8/8/8/4P3/8/7K w - - 0 1", gens.clone(), "e3");
        assert!(from_third.is_empty());

        let blocked = moves_on("8/8/8/8/4p3/8/4P3/7K w - - 0 1", gens, "e2");
        assert!(blocked.is_empty());
    }

    #[test]
    fn test_power_hop() {
        let dests = moves_on(
            "8/8/8/8/8/8/8/QP5K w - - 0 1",
            vec![MoveGen::power_hop()],
            "a1",
        );
        // Over b1 to c1, over h1 beyond the board (nothing).
        assert_eq!(dests, vec!["a1-c1"]);
    }

    #[test]
    fn test_swap_trades_places() {
        let board = Board::from_fen("8/8/8/8/8/8/1P6/Q6K w - - 0 1").expect("valid fen");
        let piece = Piece {
            generators: vec![MoveGen::swap("P")],
            ..board[sq("a1")].clone()
        };
        let mut moves = MoveList::new();
        piece.pseudo_legal_moves(sq("a1"), &board, 0, &mut moves);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, sq("b2"));
        assert_eq!(moves[0].side_effects, vec![Move::free(sq("b2"), sq("a1"))]);
    }

    #[test]
    fn test_halfling_clips_long_rays() {
        let gens = vec![MoveGen::halfling(vec![MoveGen::slide(vec![Offset::new(
            0, 1,
        )])])];
        let dests = moves_on("8/8/8/8/8/8/8/R6K w - - 0 1", gens, "a1");
        // From rank 0 the ray may reach at most rank 4.
        assert_eq!(dests, vec!["a1-a2", "a1-a3", "a1-a4", "a1-a5"]);
    }

    #[test]
    fn test_knobs_ignore_other_variants() {
        let castle = MoveGen::castle("R").cylindrical().range(3).single();
        assert!(matches!(castle, MoveGen::Castle { .. }));
        let jump = MoveGen::jump(vec![Offset::new(0, 1)]).spacious().modulo(2, 1);
        match jump {
            MoveGen::Jump { modality, .. } => assert_eq!(modality, Modality::default()),
            _ => panic!("jump changed variant"),
        }
    }
}
