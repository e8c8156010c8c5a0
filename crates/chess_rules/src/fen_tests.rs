use super::*;

const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[test]
fn test_startpos_serializes_to_standard_fen() {
    assert_eq!(Position::startpos().to_fen(), STARTPOS_FEN);
}

#[test]
fn test_round_trip_well_formed_positions() {
    let fens = [
        STARTPOS_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
        "8/8/8/4k3/8/4K3/8/8 b - - 73 101",
        "7k/P7/8/8/8/8/8/7K w - - 0 1",
        "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 12 30",
    ];
    for fen in fens {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen, "round trip failed for {fen}");
    }
}

#[test]
fn test_optional_trailing_fields_default() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -").unwrap();
    assert_eq!(pos.halfmove_clock(), 0);
    assert_eq!(pos.fullmove_number(), 1);
    assert_eq!(pos.to_fen(), "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");

    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 42").unwrap();
    assert_eq!(pos.halfmove_clock(), 42);
    assert_eq!(pos.fullmove_number(), 1);
}

#[test]
fn test_parsed_metadata() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b Kq - 12 30").unwrap();
    assert_eq!(pos.side_to_move(), Color::Black);
    assert!(pos.castling().can_castle_kingside(Color::White));
    assert!(!pos.castling().can_castle_queenside(Color::White));
    assert!(!pos.castling().can_castle_kingside(Color::Black));
    assert!(pos.castling().can_castle_queenside(Color::Black));
    assert_eq!(pos.halfmove_clock(), 12);
    assert_eq!(pos.fullmove_number(), 30);
}

#[test]
fn test_field_count_errors() {
    assert_eq!(Position::from_fen("").unwrap_err(), FenError::FieldCount(0));
    assert_eq!(
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq").unwrap_err(),
        FenError::FieldCount(3)
    );
}

#[test]
fn test_board_section_errors() {
    assert_eq!(
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/RNBQKBNR w KQkq - 0 1").unwrap_err(),
        FenError::RankCount(7)
    );
    assert_eq!(
        Position::from_fen("rnbqkbnr/ppppppppp/8/8/8/8/8/RNBQKBNR w KQkq - 0 1").unwrap_err(),
        FenError::RankOverflow("ppppppppp".to_string())
    );
    assert_eq!(
        Position::from_fen("rnbqkbnr/pppppppp/9/8/8/8/8/RNBQKBNR w KQkq - 0 1").unwrap_err(),
        FenError::RankOverflow("9".to_string())
    );
    assert_eq!(
        Position::from_fen("rnbqkbnr/ppppppp/8/8/8/8/8/RNBQKBNR w KQkq - 0 1").unwrap_err(),
        FenError::RankUnderflow("ppppppp".to_string())
    );
    assert_eq!(
        Position::from_fen("rnbqkbnr/ppppppxp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .unwrap_err(),
        FenError::PieceChar('x')
    );
}

#[test]
fn test_metadata_field_errors() {
    let board = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";
    assert_eq!(
        Position::from_fen(&format!("{board} x KQkq - 0 1")).unwrap_err(),
        FenError::SideToMove("x".to_string())
    );
    assert_eq!(
        Position::from_fen(&format!("{board} w KXkq - 0 1")).unwrap_err(),
        FenError::Castling("KXkq".to_string())
    );
    assert_eq!(
        Position::from_fen(&format!("{board} w KQkq e9 0 1")).unwrap_err(),
        FenError::EnPassant("e9".to_string())
    );
    // An en-passant target can only sit on rank 3 or 6.
    assert_eq!(
        Position::from_fen(&format!("{board} w KQkq e4 0 1")).unwrap_err(),
        FenError::EnPassant("e4".to_string())
    );
    assert_eq!(
        Position::from_fen(&format!("{board} w KQkq - abc 1")).unwrap_err(),
        FenError::HalfmoveClock("abc".to_string())
    );
    assert_eq!(
        Position::from_fen(&format!("{board} w KQkq - 0 xyz")).unwrap_err(),
        FenError::FullmoveNumber("xyz".to_string())
    );
    assert_eq!(
        Position::from_fen(&format!("{board} w KQkq - 0 0")).unwrap_err(),
        FenError::FullmoveNumber("0".to_string())
    );
}

#[test]
fn test_king_count_errors() {
    assert_eq!(
        Position::from_fen("8/8/8/4k3/8/8/8/8 w - - 0 1").unwrap_err(),
        FenError::KingCount(Color::White, 0)
    );
    assert_eq!(
        Position::from_fen("4k2k/8/8/8/8/8/8/4K3 w - - 0 1").unwrap_err(),
        FenError::KingCount(Color::Black, 2)
    );
}

#[test]
fn test_error_messages_name_the_problem() {
    assert_eq!(
        FenError::FieldCount(2).to_string(),
        "expected at least 4 fields, got 2"
    );
    assert_eq!(
        FenError::PieceChar('x').to_string(),
        "unknown piece character 'x'"
    );
    assert_eq!(
        FenError::KingCount(Color::White, 0).to_string(),
        "White must have exactly one king, found 0"
    );
}
