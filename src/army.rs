use crate::{
    color::Color,
    movegen::MoveGen,
    piece::{Effect, Piece},
    square::{mirror_files, mirror_ranks, symmetric, Offset},
};

/// Piece templates for one side, keyed by letter.
///
/// Boards instantiate squares and promotions by cloning out of their two
/// rosters. Keys are case-insensitive; the stored pieces carry the roster's
/// color and the letter case that color writes in FEN.
#[derive(Clone, Debug)]
pub struct Roster {
    color: Color,
    pieces: Vec<(char, Piece)>,
}

impl Roster {
    /// An empty roster for `color`.
    pub fn new(color: Color) -> Roster {
        Roster {
            color,
            pieces: Vec::new(),
        }
    }

    /// The classical template set: R, N, B, Q, K and P.
    pub fn standard(color: Color) -> Roster {
        let mut roster = Roster::new(color);
        roster.set('R', Piece::new(color, 'R', rook()));
        roster.set('N', Piece::new(color, 'N', knight()));
        roster.set('B', Piece::new(color, 'B', bishop()));
        roster.set(
            'Q',
            Piece::new(color, 'Q', vec![MoveGen::slide(royal_offsets())]),
        );
        roster.set(
            'K',
            Piece::new(
                color,
                'K',
                vec![MoveGen::jump(royal_offsets()), MoveGen::castle("R")],
            )
            .royal(),
        );
        roster.set(
            'P',
            Piece::new(
                color,
                'P',
                vec![
                    MoveGen::jump(offs(&[(0, 1)])).quiet_only(),
                    MoveGen::jump(offs(&[(1, 1), (-1, 1)]))
                        .captures_only()
                        .en_passant(),
                    MoveGen::big_pawn(offs(&[(0, 1)])),
                ],
            )
            .with_effects(vec![Effect::EnPassant, Effect::Promote]),
        );
        roster
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Installs a template under `letter`, replacing any previous one. The
    /// stored color and letter case are fixed up to match the roster's side.
    pub fn set(&mut self, letter: char, mut piece: Piece) {
        let key = letter.to_ascii_uppercase();
        piece.color = self.color;
        piece.letter = if self.color == Color::Black {
            key.to_ascii_lowercase()
        } else {
            key
        };
        match self.pieces.iter_mut().find(|(l, _)| *l == key) {
            Some((_, slot)) => *slot = piece,
            None => self.pieces.push((key, piece)),
        }
    }

    /// Replaces only the movement patterns of `letter`, keeping its effects
    /// and royal flag. Installs a plain piece if the letter is new.
    pub fn set_patterns(&mut self, letter: char, generators: Vec<MoveGen>) {
        let key = letter.to_ascii_uppercase();
        match self.pieces.iter_mut().find(|(l, _)| *l == key) {
            Some((_, slot)) => slot.generators = generators,
            None => self.set(key, Piece::new(self.color, key, generators)),
        }
    }

    pub fn get(&self, letter: char) -> Option<&Piece> {
        let key = letter.to_ascii_uppercase();
        self.pieces.iter().find(|(l, _)| *l == key).map(|(_, p)| p)
    }

    /// The templates, in insertion order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().map(|(_, p)| p)
    }
}

fn offs(pairs: &[(i16, i16)]) -> Vec<Offset> {
    pairs.iter().map(|&(df, dr)| Offset::new(df, dr)).collect()
}

fn concat<const N: usize>(parts: [Vec<MoveGen>; N]) -> Vec<MoveGen> {
    parts.into_iter().flatten().collect()
}

/// Queen and king directions: diagonals first, then orthogonals.
fn royal_offsets() -> Vec<Offset> {
    let mut offsets = symmetric(1, 1);
    offsets.extend(symmetric(1, 0));
    offsets
}

fn ferz() -> Vec<MoveGen> {
    vec![MoveGen::jump(symmetric(1, 1))]
}

fn alfil() -> Vec<MoveGen> {
    vec![MoveGen::jump(symmetric(2, 2))]
}

fn alfil_rider() -> Vec<MoveGen> {
    vec![MoveGen::slide(symmetric(2, 2))]
}

fn wazir() -> Vec<MoveGen> {
    vec![MoveGen::jump(symmetric(1, 0))]
}

fn dabbaba() -> Vec<MoveGen> {
    vec![MoveGen::jump(symmetric(2, 0))]
}

fn dabbaba_rider() -> Vec<MoveGen> {
    vec![MoveGen::slide(symmetric(2, 0))]
}

fn king_steps() -> Vec<MoveGen> {
    vec![MoveGen::jump(royal_offsets())]
}

fn bishop() -> Vec<MoveGen> {
    vec![MoveGen::slide(symmetric(1, 1))]
}

fn rook() -> Vec<MoveGen> {
    vec![MoveGen::slide(symmetric(1, 0))]
}

fn short_rook() -> Vec<MoveGen> {
    vec![MoveGen::slide(symmetric(1, 0)).range(4)]
}

fn knight() -> Vec<MoveGen> {
    vec![MoveGen::jump(symmetric(2, 1))]
}

fn knight_rider() -> Vec<MoveGen> {
    vec![MoveGen::slide(symmetric(2, 1))]
}

fn trebuchet() -> Vec<MoveGen> {
    vec![MoveGen::jump(symmetric(3, 0))]
}

/// One step sideways or diagonally, then a double-length slide onward.
fn switcher(offset: Offset) -> MoveGen {
    MoveGen::compose(
        vec![MoveGen::slide(vec![offset * 2])],
        vec![MoveGen::jump(vec![offset])],
    )
}

/// The army catalogue.
///
/// An army replaces some of the classical letters with new movement
/// definitions; whatever it does not mention keeps the standard piece. Kings
/// and pawns are untouched except where an army says otherwise.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Army {
    FabulousFides,
    ColorboundClobberers,
    NuttyKnights,
    RemarkableRookies,
    AmazonArmy,
    ForwardFides,
    AvianAirforce,
    PizzaKings,
    MeticulousMashers,
    SeepingSwitchers,
    CylindricalCinders,
    SpaciousCannoneers,
    Halflings,
    DemiRifle,
    DoubleMoves,
    Berolina,
    Support,
    InverseCapture,
}

impl Army {
    pub const ALL: [Army; 18] = [
        Army::FabulousFides,
        Army::ColorboundClobberers,
        Army::NuttyKnights,
        Army::RemarkableRookies,
        Army::AmazonArmy,
        Army::ForwardFides,
        Army::AvianAirforce,
        Army::PizzaKings,
        Army::MeticulousMashers,
        Army::SeepingSwitchers,
        Army::CylindricalCinders,
        Army::SpaciousCannoneers,
        Army::Halflings,
        Army::DemiRifle,
        Army::DoubleMoves,
        Army::Berolina,
        Army::Support,
        Army::InverseCapture,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Army::FabulousFides => "Fabulous Fides",
            Army::ColorboundClobberers => "Colorbound Clobberers",
            Army::NuttyKnights => "Nutty Knights",
            Army::RemarkableRookies => "Remarkable Rookies",
            Army::AmazonArmy => "Amazon Army",
            Army::ForwardFides => "Forward Fides",
            Army::AvianAirforce => "Avian Airforce",
            Army::PizzaKings => "Pizza Kings",
            Army::MeticulousMashers => "Meticulous Mashers",
            Army::SeepingSwitchers => "Seeping Switchers",
            Army::CylindricalCinders => "Cylindrical Cinders",
            Army::SpaciousCannoneers => "Spacious Cannoneers",
            Army::Halflings => "Halflings",
            Army::DemiRifle => "DemiRifle",
            Army::DoubleMoves => "Double Moves",
            Army::Berolina => "Berolina",
            Army::Support => "Support",
            Army::InverseCapture => "Inverse Capture",
        }
    }

    pub fn from_name(name: &str) -> Option<Army> {
        Army::ALL.into_iter().find(|army| army.name() == name)
    }

    /// Builds the piece templates this army gives `color`.
    pub fn roster(self, color: Color) -> Roster {
        let mut roster = Roster::standard(color);
        match self {
            Army::FabulousFides => {
                roster.set_patterns('R', rook());
                roster.set_patterns('N', knight());
                roster.set_patterns('B', bishop());
                roster.set_patterns('Q', concat([bishop(), rook()]));
            }
            Army::ColorboundClobberers => {
                roster.set_patterns('R', concat([bishop(), dabbaba()]));
                roster.set_patterns('N', concat([wazir(), alfil()]));
                roster.set_patterns('B', concat([ferz(), alfil(), dabbaba()]));
                roster.set_patterns('Q', concat([bishop(), knight()]));
            }
            Army::NuttyKnights => {
                roster.set_patterns(
                    'R',
                    vec![
                        MoveGen::slide(offs(&[(1, 0), (0, 1), (-1, 0)])),
                        MoveGen::jump(offs(&[(-1, -1), (0, -1), (1, -1)])),
                    ],
                );
                roster.set_patterns(
                    'N',
                    vec![MoveGen::jump(mirror_files(&mirror_ranks(&offs(&[
                        (1, 2),
                        (1, 1),
                    ]))))],
                );
                roster.set_patterns(
                    'B',
                    vec![MoveGen::jump(mirror_files(&offs(&[
                        (2, 1),
                        (1, 2),
                        (1, 0),
                        (1, -1),
                        (0, -1),
                    ])))],
                );
                roster.set_patterns(
                    'Q',
                    vec![
                        MoveGen::slide(offs(&[(1, 0), (0, 1), (-1, 0)])),
                        MoveGen::jump(mirror_files(&offs(&[
                            (2, 1),
                            (1, 1),
                            (1, 2),
                            (1, -1),
                            (0, -1),
                        ]))),
                    ],
                );
            }
            Army::RemarkableRookies => {
                roster.set_patterns('R', short_rook());
                roster.set_patterns('N', concat([wazir(), dabbaba()]));
                roster.set_patterns('B', concat([ferz(), dabbaba(), trebuchet()]));
                roster.set_patterns('Q', concat([rook(), knight()]));
            }
            Army::AmazonArmy => {
                roster.set_patterns('R', short_rook());
                roster.set_patterns('Q', concat([knight(), rook(), bishop()]));
            }
            Army::ForwardFides => {
                roster.set_patterns(
                    'R',
                    vec![
                        MoveGen::slide(offs(&[(1, 0), (0, 1), (-1, 0)])),
                        MoveGen::jump(offs(&[(-1, -1), (0, -1), (1, -1)])),
                    ],
                );
                roster.set_patterns(
                    'N',
                    vec![
                        MoveGen::jump(mirror_files(&offs(&[(2, 1), (1, 2)]))),
                        MoveGen::slide(offs(&[(-1, -1), (1, -1)])),
                    ],
                );
                roster.set_patterns(
                    'B',
                    vec![
                        MoveGen::jump(mirror_files(&offs(&[(2, -1), (1, -2)]))),
                        MoveGen::slide(offs(&[(-1, 1), (1, 1)])),
                    ],
                );
                roster.set_patterns(
                    'Q',
                    vec![
                        MoveGen::jump(mirror_files(&offs(&[
                            (2, -1),
                            (1, -2),
                            (1, -1),
                            (0, -1),
                        ]))),
                        MoveGen::slide(mirror_files(&offs(&[(1, 0), (1, 1), (0, 1)]))),
                    ],
                );
            }
            Army::AvianAirforce => {
                roster.set_patterns('R', concat([wazir(), dabbaba_rider()]));
                roster.set_patterns(
                    'N',
                    vec![
                        MoveGen::jump(mirror_files(&offs(&[
                            (1, 2),
                            (1, 0),
                            (0, 1),
                            (0, -1),
                        ]))),
                        MoveGen::slide(offs(&[(-2, -2), (2, -2)])),
                    ],
                );
                roster.set_patterns('B', concat([ferz(), alfil_rider()]));
                roster.set_patterns(
                    'Q',
                    concat([wazir(), dabbaba_rider(), ferz(), alfil_rider()]),
                );
            }
            Army::PizzaKings => {
                roster.set_patterns(
                    'R',
                    vec![MoveGen::jump(mirror_files(&offs(&[
                        (2, 2),
                        (2, 0),
                        (1, 1),
                        (1, -1),
                        (0, 1),
                        (0, -1),
                    ])))],
                );
                roster.set_patterns(
                    'N',
                    vec![MoveGen::jump(mirror_files(&offs(&[
                        (1, 2),
                        (3, 1),
                        (1, -1),
                        (1, -2),
                    ])))],
                );
                roster.set_patterns(
                    'B',
                    vec![MoveGen::jump(mirror_ranks(&mirror_files(&offs(&[
                        (0, 3),
                        (1, 2),
                        (1, 1),
                        (1, 0),
                    ]))))],
                );
                roster.set_patterns(
                    'Q',
                    concat([
                        king_steps(),
                        alfil(),
                        dabbaba(),
                        vec![MoveGen::jump(offs(&[(1, 2), (-1, 2)]))],
                    ]),
                );
            }
            Army::MeticulousMashers => {
                roster.set_patterns('R', concat([short_rook(), ferz()]));
                roster.set_patterns(
                    'N',
                    vec![MoveGen::jump(mirror_files(&mirror_ranks(&offs(&[
                        (1, 2),
                        (1, 1),
                    ]))))],
                );
                roster.set_patterns(
                    'B',
                    concat([
                        bishop(),
                        vec![MoveGen::slide(symmetric(1, 0)).range(2).modulo(2, 0)],
                    ]),
                );
                roster.set_patterns(
                    'Q',
                    concat([rook(), vec![MoveGen::slide(symmetric(2, 1)).range(2)]]),
                );
            }
            Army::SeepingSwitchers => {
                roster.set_patterns('R', symmetric(1, 0).into_iter().map(switcher).collect());
                roster.set_patterns('N', concat([wazir(), knight()]));
                let mut diagonal = Vec::new();
                for x in [-1, 1] {
                    for y in [-1, 1] {
                        diagonal.push(MoveGen::compose(
                            vec![MoveGen::slide(vec![Offset::new(x, y)])],
                            vec![MoveGen::jump(offs(&[(2 * x, y), (x, 2 * y)]))],
                        ));
                    }
                }
                roster.set_patterns('B', diagonal);
                roster.set_patterns(
                    'Q',
                    royal_offsets().into_iter().map(switcher).collect(),
                );
            }
            Army::CylindricalCinders => {
                let mut wazir_alfil = symmetric(1, 0);
                wazir_alfil.extend(symmetric(2, 2));
                roster.set_patterns('R', vec![MoveGen::jump(wazir_alfil).cylindrical()]);
                roster.set_patterns('N', vec![MoveGen::jump(symmetric(2, 1)).cylindrical()]);
                roster.set_patterns('B', vec![MoveGen::slide(symmetric(1, 1)).cylindrical()]);
                roster.set_patterns(
                    'Q',
                    vec![
                        MoveGen::jump(symmetric(2, 1)).cylindrical(),
                        MoveGen::slide(symmetric(1, 0)).cylindrical(),
                    ],
                );
            }
            Army::SpaciousCannoneers => {
                roster.set_patterns(
                    'R',
                    vec![MoveGen::slide(symmetric(1, 0)).spacious().leaping(1)],
                );
                roster.set_patterns(
                    'N',
                    concat([
                        wazir(),
                        vec![MoveGen::jump(mirror_files(&mirror_ranks(&offs(&[(1, 2)]))))],
                    ]),
                );
                roster.set_patterns(
                    'B',
                    vec![MoveGen::slide(symmetric(1, 1)).spacious().leaping(1)],
                );
                let mut everywhere = symmetric(1, 0);
                everywhere.extend(symmetric(1, 1));
                roster.set_patterns(
                    'Q',
                    vec![MoveGen::slide(everywhere).spacious().leaping(1)],
                );
            }
            Army::Halflings => {
                roster.set_patterns(
                    'R',
                    vec![MoveGen::halfling(concat([rook(), knight_rider()]))],
                );
                roster.set_patterns('N', vec![MoveGen::halfling(knight_rider())]);
                roster.set_patterns(
                    'B',
                    concat([dabbaba(), vec![MoveGen::halfling(bishop())]]),
                );
                roster.set_patterns(
                    'Q',
                    vec![MoveGen::halfling(concat([
                        rook(),
                        bishop(),
                        knight_rider(),
                    ]))],
                );
            }
            Army::DemiRifle => {
                let straight = concat([wazir(), vec![MoveGen::jump(offs(&[(0, 2)]))]]);
                let zigzag = vec![MoveGen::jump(mirror_files(&offs(&[(1, -1), (2, 2)])))];
                roster.set(
                    'R',
                    Piece::new(color, 'R', straight.clone())
                        .with_effects(vec![Effect::Rifle]),
                );
                roster.set(
                    'N',
                    Piece::new(
                        color,
                        'N',
                        vec![MoveGen::jump(mirror_files(&offs(&[(1, 2), (2, -1)])))],
                    )
                    .with_effects(vec![Effect::Rifle]),
                );
                roster.set(
                    'B',
                    Piece::new(color, 'B', zigzag.clone()).with_effects(vec![Effect::Rifle]),
                );
                roster.set(
                    'Q',
                    Piece::new(color, 'Q', concat([straight, zigzag]))
                        .with_effects(vec![Effect::Rifle]),
                );
            }
            Army::DoubleMoves => {
                roster.set_patterns('R', vec![MoveGen::compose(rook(), rook())]);
                roster.set_patterns('N', vec![MoveGen::compose(knight(), knight())]);
                roster.set_patterns('B', vec![MoveGen::compose(bishop(), bishop())]);
                roster.set_patterns(
                    'Q',
                    vec![MoveGen::compose(
                        concat([rook(), bishop()]),
                        concat([rook(), bishop()]),
                    )],
                );
            }
            Army::Berolina => {
                roster.set_patterns(
                    'P',
                    vec![
                        MoveGen::jump(offs(&[(1, 1), (-1, 1)])).quiet_only(),
                        MoveGen::jump(offs(&[(0, 1)])).captures_only().en_passant(),
                        MoveGen::big_pawn(offs(&[(1, 1), (-1, 1)])),
                    ],
                );
            }
            Army::Support => {
                roster.set_patterns(
                    'R',
                    concat([
                        king_steps(),
                        vec![MoveGen::support(1, MoveGen::slide(symmetric(1, 0)), "P")],
                    ]),
                );
                roster.set_patterns(
                    'N',
                    concat([
                        king_steps(),
                        vec![MoveGen::support(1, MoveGen::jump(symmetric(2, 1)), "P")],
                    ]),
                );
                roster.set_patterns(
                    'B',
                    concat([
                        king_steps(),
                        vec![MoveGen::support(1, MoveGen::slide(symmetric(1, 1)), "P")],
                    ]),
                );
                let mut everywhere = symmetric(1, 0);
                everywhere.extend(symmetric(1, 1));
                roster.set_patterns(
                    'Q',
                    concat([
                        king_steps(),
                        vec![MoveGen::support(1, MoveGen::slide(everywhere), "P")],
                    ]),
                );
            }
            Army::InverseCapture => {
                roster.set_patterns('R', vec![MoveGen::inverse_capture(rook())]);
                roster.set_patterns('N', vec![MoveGen::inverse_capture(knight())]);
                roster.set_patterns('B', vec![MoveGen::inverse_capture(bishop())]);
                roster.set_patterns(
                    'Q',
                    vec![MoveGen::inverse_capture(concat([bishop(), rook()]))],
                );
                roster.set(
                    'K',
                    Piece::new(
                        color,
                        'K',
                        vec![
                            MoveGen::inverse_capture(vec![MoveGen::jump(royal_offsets())]),
                            MoveGen::castle("R"),
                        ],
                    )
                    .royal(),
                );
            }
        }
        roster
    }
}

impl Default for Army {
    fn default() -> Army {
        Army::FabulousFides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for army in Army::ALL {
            assert_eq!(Army::from_name(army.name()), Some(army));
        }
        assert_eq!(Army::from_name("Fabulous Fides"), Some(Army::FabulousFides));
        assert_eq!(Army::from_name("fabulous fides"), None);
    }

    #[test]
    fn test_rosters_keep_a_royal_king() {
        for army in Army::ALL {
            for color in Color::ALL {
                let roster = army.roster(color);
                let king = roster.get('K').expect("king template");
                assert!(king.is_king, "{} king is royal", army.name());
                assert!(roster.get('P').is_some());
                assert_eq!(roster.color(), color);
            }
        }
    }

    #[test]
    fn test_roster_cases_letters() {
        let black = Army::FabulousFides.roster(Color::Black);
        assert_eq!(black.get('q').expect("queen").letter, 'q');
        assert_eq!(black.get('Q').expect("queen").fen_char(), 'q');
        let white = Army::FabulousFides.roster(Color::White);
        assert_eq!(white.get('q').expect("queen").letter, 'Q');
    }

    #[test]
    fn test_overrides_keep_default_hooks() {
        let berolina = Army::Berolina.roster(Color::White);
        let pawn = berolina.get('P').expect("pawn");
        assert_eq!(pawn.effects, vec![Effect::EnPassant, Effect::Promote]);

        let rifles = Army::DemiRifle.roster(Color::White);
        assert_eq!(rifles.get('R').expect("rifle rook").effects, vec![Effect::Rifle]);
        // King and pawn stay classical.
        assert!(rifles.get('K').expect("king").is_king);
        assert_eq!(
            rifles.get('P').expect("pawn").effects,
            vec![Effect::EnPassant, Effect::Promote]
        );
    }

    #[test]
    fn test_switcher_shapes() {
        let switchers = Army::SeepingSwitchers.roster(Color::White);
        assert_eq!(switchers.get('R').expect("rook").generators.len(), 4);
        assert_eq!(switchers.get('B').expect("bishop").generators.len(), 4);
        assert_eq!(switchers.get('Q').expect("queen").generators.len(), 8);
    }

    #[test]
    fn test_standard_roster_patterns() {
        let roster = Roster::standard(Color::White);
        assert_eq!(roster.get('P').expect("pawn").generators.len(), 3);
        assert_eq!(roster.get('K').expect("king").generators.len(), 2);
        assert_eq!(roster.pieces().count(), 6);
    }
}
