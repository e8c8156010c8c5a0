use super::*;
use crate::movegen::find_move;

fn at(name: &str) -> u8 {
    coord_to_sq(name).unwrap()
}

/// Look up and apply a legal move given as coordinates, panicking if absent.
fn play(pos: &mut Position, from: &str, to: &str) {
    let mv = find_move(pos, at(from), at(to), None)
        .unwrap_or_else(|| panic!("{from}{to} should be legal"));
    pos.make_move(mv);
}

#[test]
fn test_startpos_layout() {
    let pos = Position::startpos();
    assert_eq!(
        pos.piece_at(at("e1")),
        Some(Piece {
            color: Color::White,
            kind: PieceKind::King
        })
    );
    assert_eq!(
        pos.piece_at(at("d8")),
        Some(Piece {
            color: Color::Black,
            kind: PieceKind::Queen
        })
    );
    assert_eq!(pos.piece_at(at("e4")), None);
    assert_eq!(pos.side_to_move(), Color::White);
    assert_eq!(pos.castling(), CastlingRights::ALL);
    assert_eq!(pos.en_passant(), None);
    assert_eq!(pos.halfmove_clock(), 0);
    assert_eq!(pos.fullmove_number(), 1);
    assert_eq!(pos.king_sq(Color::White), at("e1"));
    assert_eq!(pos.king_sq(Color::Black), at("e8"));
}

#[test]
fn test_make_unmake_restores_everything() {
    let mut pos = Position::startpos();
    let fen0 = pos.to_fen();
    let hash0 = pos.position_hash();

    play(&mut pos, "e2", "e4");
    assert_eq!(pos.en_passant(), Some(at("e3")));
    assert_eq!(pos.side_to_move(), Color::Black);
    assert_eq!(pos.halfmove_clock(), 0);
    assert_eq!(pos.applied_plies(), 1);
    assert_ne!(pos.position_hash(), hash0);

    let mv = pos.unmake_move();
    assert_eq!(mv.to_string(), "e2e4");
    assert_eq!(pos.to_fen(), fen0);
    assert_eq!(pos.position_hash(), hash0);
    assert_eq!(pos.applied_plies(), 0);
}

#[test]
fn test_capture_and_unmake() {
    let mut pos =
        Position::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2")
            .unwrap();
    let fen0 = pos.to_fen();

    let mv = find_move(&pos, at("e4"), at("d5"), None).unwrap();
    assert!(mv.flags.is_capture());
    pos.make_move(mv);
    assert_eq!(
        pos.piece_at(at("d5")),
        Some(Piece {
            color: Color::White,
            kind: PieceKind::Pawn
        })
    );
    assert_eq!(pos.piece_at(at("e4")), None);

    pos.unmake_move();
    assert_eq!(pos.to_fen(), fen0);
}

#[test]
fn test_en_passant_capture_removes_passed_pawn() {
    // White pawn on e5, black just pushed d7d5; the capture lands on d6 but
    // removes the pawn on d5.
    let mut pos =
        Position::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
            .unwrap();
    let fen0 = pos.to_fen();

    let mv = find_move(&pos, at("e5"), at("d6"), None).expect("en passant should be legal");
    assert!(mv.flags.is_en_passant());
    assert!(mv.flags.is_capture());

    pos.make_move(mv);
    assert_eq!(
        pos.piece_at(at("d6")),
        Some(Piece {
            color: Color::White,
            kind: PieceKind::Pawn
        })
    );
    assert_eq!(pos.piece_at(at("d5")), None);
    assert_eq!(pos.piece_at(at("e5")), None);

    pos.unmake_move();
    assert_eq!(pos.to_fen(), fen0);
    assert_eq!(
        pos.piece_at(at("d5")),
        Some(Piece {
            color: Color::Black,
            kind: PieceKind::Pawn
        })
    );
}

#[test]
fn test_castling_moves_rook_and_clears_rights() {
    let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
    let mut pos = Position::from_fen(fen).unwrap();

    let mv = find_move(&pos, at("e1"), at("g1"), None).expect("kingside castle should be legal");
    assert!(mv.flags.is_kingside_castle());
    pos.make_move(mv);
    assert_eq!(pos.king_sq(Color::White), at("g1"));
    assert_eq!(
        pos.piece_at(at("f1")).map(|p| p.kind),
        Some(PieceKind::Rook)
    );
    assert_eq!(pos.piece_at(at("h1")), None);
    assert!(!pos.castling().can_castle_kingside(Color::White));
    assert!(!pos.castling().can_castle_queenside(Color::White));
    assert!(pos.castling().can_castle_kingside(Color::Black));

    pos.unmake_move();
    assert_eq!(pos.to_fen(), fen);
    assert_eq!(pos.king_sq(Color::White), at("e1"));

    let mv = find_move(&pos, at("e1"), at("c1"), None).expect("queenside castle should be legal");
    assert!(mv.flags.is_queenside_castle());
    pos.make_move(mv);
    assert_eq!(pos.king_sq(Color::White), at("c1"));
    assert_eq!(
        pos.piece_at(at("d1")).map(|p| p.kind),
        Some(PieceKind::Rook)
    );
    assert_eq!(pos.piece_at(at("a1")), None);

    pos.unmake_move();
    assert_eq!(pos.to_fen(), fen);
}

#[test]
fn test_rook_moves_and_captures_clear_rights() {
    let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
    let mut pos = Position::from_fen(fen).unwrap();

    // Moving the a1 rook loses only white queenside.
    play(&mut pos, "a1", "b1");
    assert!(!pos.castling().can_castle_queenside(Color::White));
    assert!(pos.castling().can_castle_kingside(Color::White));
    pos.unmake_move();
    assert_eq!(pos.castling(), CastlingRights::ALL);

    // Rook takes rook on h8: both kingside rights go at once.
    play(&mut pos, "h1", "h8");
    assert!(!pos.castling().can_castle_kingside(Color::White));
    assert!(!pos.castling().can_castle_kingside(Color::Black));
    assert!(pos.castling().can_castle_queenside(Color::White));
    assert!(pos.castling().can_castle_queenside(Color::Black));
    pos.unmake_move();
    assert_eq!(pos.to_fen(), fen);
}

#[test]
fn test_promotion_and_unmake() {
    let fen = "7k/P7/8/8/8/8/8/7K w - - 3 1";
    let mut pos = Position::from_fen(fen).unwrap();

    let mv = find_move(&pos, at("a7"), at("a8"), Some(PieceKind::Queen)).unwrap();
    assert!(mv.flags.is_promotion());
    pos.make_move(mv);
    assert_eq!(
        pos.piece_at(at("a8")),
        Some(Piece {
            color: Color::White,
            kind: PieceKind::Queen
        })
    );
    assert_eq!(pos.halfmove_clock(), 0);

    pos.unmake_move();
    assert_eq!(pos.to_fen(), fen);
    assert_eq!(
        pos.piece_at(at("a7")),
        Some(Piece {
            color: Color::White,
            kind: PieceKind::Pawn
        })
    );

    // Underpromotion works the same way.
    let mv = find_move(&pos, at("a7"), at("a8"), Some(PieceKind::Knight)).unwrap();
    pos.make_move(mv);
    assert_eq!(
        pos.piece_at(at("a8")).map(|p| p.kind),
        Some(PieceKind::Knight)
    );
    pos.unmake_move();
    assert_eq!(pos.to_fen(), fen);
}

#[test]
fn test_clock_bookkeeping() {
    let mut pos = Position::startpos();
    play(&mut pos, "g1", "f3");
    assert_eq!(pos.halfmove_clock(), 1);
    assert_eq!(pos.fullmove_number(), 1);
    play(&mut pos, "g8", "f6");
    assert_eq!(pos.halfmove_clock(), 2);
    assert_eq!(pos.fullmove_number(), 2);
    play(&mut pos, "e2", "e4");
    assert_eq!(pos.halfmove_clock(), 0);
}

#[test]
fn test_clone_is_independent_exploration_root() {
    let mut pos = Position::startpos();
    play(&mut pos, "e2", "e4");
    play(&mut pos, "e7", "e5");

    let mut copy = pos.clone();
    assert_eq!(copy.to_fen(), pos.to_fen());
    assert_eq!(copy.position_hash(), pos.position_hash());
    assert_eq!(pos.applied_plies(), 2);
    assert_eq!(copy.applied_plies(), 0);
    assert_eq!(copy.repetition_count(), 1);

    // Mutating the copy leaves the original alone.
    let before = pos.to_fen();
    play(&mut copy, "g1", "f3");
    assert_eq!(pos.to_fen(), before);
    assert_ne!(copy.to_fen(), before);
}

#[test]
#[should_panic(expected = "no move to undo")]
fn test_unmake_underflow_panics() {
    let mut pos = Position::startpos();
    pos.unmake_move();
}

#[test]
fn test_apply_if_legal() {
    let mut pos = Position::startpos();
    let fen0 = pos.to_fen();

    // A bare-coordinates move without its flags is not a legal move value.
    assert!(!pos.apply_if_legal(Move::quiet(at("e2"), at("e4"))));
    assert_eq!(pos.to_fen(), fen0);

    // Nonsense coordinates are rejected without touching the position.
    assert!(!pos.apply_if_legal(Move::quiet(at("e2"), at("e5"))));
    assert_eq!(pos.to_fen(), fen0);

    let mv = find_move(&pos, at("e2"), at("e4"), None).unwrap();
    assert!(pos.apply_if_legal(mv));
    assert_eq!(pos.side_to_move(), Color::Black);
}

#[test]
fn test_display_grid() {
    let text = Position::startpos().to_string();
    assert!(text.contains("8  r n b q k b n r"));
    assert!(text.contains("1  R N B Q K B N R"));
    assert!(text.contains("a b c d e f g h"));
}
