use skazka::{Board, Color, Outcome, Square, STARTING_FEN};

fn sq(name: &str) -> Square {
    name.parse().expect("valid square")
}

fn board(fen: &str) -> Board {
    Board::from_fen(fen).expect("valid fen")
}

#[test]
fn test_fen_roundtrip_through_board() {
    for fen in [
        STARTING_FEN,
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 1 1",
        "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        "8/P6k/8/8/8/8/8/7K w - - 12 34",
        "4k3/8/8/8/8/8/8/4K3 b - - 0 1",
    ] {
        assert_eq!(board(fen).fen(), fen);
    }
}

#[test]
fn test_kingside_castle() {
    let mut pos = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let map = pos.move_map();
    assert!(map["e1"].contains(&"g1".to_string()));
    assert!(map["e1"].contains(&"c1".to_string()));

    let m = pos.make_move(sq("e1"), sq("g1"));
    assert_eq!(m.side_effects.len(), 1);
    assert_eq!(pos[sq("g1")].letter, 'K');
    assert_eq!(pos[sq("f1")].letter, 'R');
    assert_eq!(pos.fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b KQkq - 1 1");
}

#[test]
fn test_queenside_castle_ignores_the_b_file() {
    let mut pos = board("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1");
    assert!(pos.move_map()["e1"].contains(&"c1".to_string()));

    pos.make_move(sq("e1"), sq("c1"));
    assert_eq!(pos[sq("c1")].letter, 'K');
    assert_eq!(pos[sq("d1")].letter, 'R');
    assert_eq!(pos[sq("b1")].letter, 'N');
    assert_eq!(pos.fen(), "r3k2r/8/8/8/8/8/8/1NKR3R b KQkq - 1 1");
}

#[test]
fn test_castle_needs_unmoved_partners() {
    let mut pos = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    pos.make_move(sq("e1"), sq("e2"));
    pos.make_move(sq("a8"), sq("a7"));
    pos.make_move(sq("e2"), sq("e1"));
    pos.make_move(sq("a7"), sq("a8"));
    assert_eq!(pos.fen(), "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 4 3");

    let map = pos.move_map();
    assert!(!map["e1"].contains(&"g1".to_string()));
    assert!(!map["e1"].contains(&"c1".to_string()));
}

#[test]
fn test_castle_transit_must_be_safe() {
    let pos = board("r3k2r/8/8/8/8/5r2/8/R3K2R w KQkq - 0 1");
    let map = pos.move_map();
    assert!(!map["e1"].contains(&"g1".to_string()));
    assert!(map["e1"].contains(&"c1".to_string()));
}

#[test]
fn test_seeking_backwards_forgets_move_counts() {
    let mut pos = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    pos.make_move(sq("e1"), sq("e2"));
    pos.make_move(sq("a8"), sq("a7"));
    assert!(!pos.move_map().contains_key("e1"));

    pos.undo(2);
    assert!(pos.move_map()["e1"].contains(&"g1".to_string()));
}

#[test]
fn test_en_passant_capture() {
    let mut pos = board("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3");
    assert_eq!(pos.ep_square(), Some(sq("d6")));
    assert!(pos.move_map()["e5"].contains(&"d6".to_string()));

    let m = pos.make_move(sq("e5"), sq("d6"));
    assert_eq!(m.to_string(), "e5xd6");
    assert_eq!(m.captures, vec![sq("d5")]);
    assert_eq!(pos[sq("d6")].letter, 'P');
    assert!(pos[sq("d5")].is_empty());
}

#[test]
fn test_en_passant_window_closes() {
    let mut pos = board("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3");
    pos.make_move(sq("g1"), sq("f3"));
    assert_eq!(pos.ep_square(), None);

    pos.make_move(sq("a7"), sq("a6"));
    assert_eq!(pos.move_map()["e5"], vec!["e6"]);
}

#[test]
fn test_promotion_to_roster_queen() {
    let mut pos = board("8/P6k/8/8/8/8/8/7K w - - 0 1");
    let m = pos.make_move(sq("a7"), sq("a8"));
    assert_eq!(m.to_string(), "a7-a8");
    assert_eq!(pos[sq("a8")].letter, 'Q');
    assert_eq!(pos[sq("a8")].color, Color::White);
    assert_eq!(pos.fen(), "Q7/7k/8/8/8/8/8/7K b - - 1 1");
}

#[test]
fn test_capturing_promotion() {
    let mut pos = board("1n5k/P7/8/8/8/8/8/7K w - - 0 1");
    let map = pos.move_map();
    assert!(map["a7"].contains(&"a8".to_string()));
    assert!(map["a7"].contains(&"b8".to_string()));

    let m = pos.make_move(sq("a7"), sq("b8"));
    assert!(m.is_capture());
    assert_eq!(pos[sq("b8")].letter, 'Q');
}

#[test]
fn test_pinned_pawn_cannot_move() {
    let pos = board("4k3/8/8/8/7b/8/5P2/4K3 w - - 0 1");
    let map = pos.move_map();
    assert!(!map.contains_key("f2"));
    assert_eq!(pos.legal_moves().len(), 4);
}

#[test]
fn test_check_limits_replies() {
    let pos = board("4k3/8/8/8/4r3/8/8/4K3 w - - 0 1");
    assert!(pos.is_check(Color::Black));
    let legal = pos.legal_moves();
    assert_eq!(legal.len(), 4);
    assert!(legal.iter().all(|m| m.from == sq("e1")));
    assert!(legal.iter().all(|m| m.to != sq("e2")));
}

#[test]
fn test_no_legal_move_leaves_self_check() {
    for fen in [
        STARTING_FEN,
        "4k3/8/8/8/4r3/8/8/4K3 w - - 0 1",
        "4k3/8/8/8/7b/8/5P2/4K3 w - - 0 1",
        "r3k2r/8/8/8/8/5r2/8/R3K2R w KQkq - 0 1",
    ] {
        let pos = board(fen);
        let color = pos.turn();
        for m in pos.legal_moves() {
            assert!(!pos.after(&m).is_check(!color), "{fen}: {m}");
        }
    }
}

#[test]
fn test_replaying_after_undo_reproduces_the_game() {
    let mut pos = Board::new();
    pos.make_move(sq("e2"), sq("e4"));
    pos.make_move(sq("e7"), sq("e5"));
    let latest = pos.fen();

    pos.undo(2);
    pos.make_move(sq("e2"), sq("e4"));
    pos.make_move(sq("e7"), sq("e5"));
    assert_eq!(pos.fen(), latest);
}

#[test]
fn test_fools_mate() {
    let mut pos = Board::new();
    pos.make_move(sq("f2"), sq("f3"));
    pos.make_move(sq("e7"), sq("e5"));
    pos.make_move(sq("g2"), sq("g4"));
    pos.make_move(sq("d8"), sq("h4"));

    assert!(pos.legal_moves().is_empty());
    assert!(pos.is_check(Color::Black));
    let outcome = pos.outcome().expect("game over");
    assert_eq!(outcome.winner(), Some(Color::Black));
    assert_eq!(outcome.to_string(), "0-1");
}

#[test]
fn test_stalemate() {
    let pos = board("k7/8/1Q6/8/8/8/8/7K b - - 0 1");
    assert!(pos.legal_moves().is_empty());
    assert!(!pos.is_check(Color::White));
    assert_eq!(pos.outcome(), Some(Outcome::Draw));
}

#[test]
fn test_halfmove_clock_counts_every_move() {
    let mut pos = Board::new();
    pos.make_move(sq("e2"), sq("e4"));
    pos.make_move(sq("e7"), sq("e5"));
    pos.make_move(sq("g1"), sq("f3"));
    pos.make_move(sq("b8"), sq("c6"));
    assert_eq!(pos.halfmove_clock(), 4);
    assert_eq!(pos.fullmoves(), 3);
}

#[test]
fn test_kriegspiel_start_views() {
    let pos = Board::new();
    assert_eq!(
        pos.kriegspiel_fen(Color::White),
        "8/8/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    );
    assert_eq!(
        pos.kriegspiel_fen(Color::Black),
        "rnbqkbnr/pppppppp/8/8/8/8/8/8 w KQkq - 0 1"
    );
}

#[test]
fn test_kriegspiel_reveals_attacked_pieces() {
    let mut pos = Board::new();
    pos.make_move(sq("e2"), sq("e4"));
    pos.make_move(sq("d7"), sq("d5"));
    assert_eq!(
        pos.kriegspiel_fen(Color::White),
        "8/8/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 2 2"
    );
    assert_eq!(
        pos.kriegspiel_fen(Color::Black),
        "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/8/8 w KQkq d6 2 2"
    );
}
