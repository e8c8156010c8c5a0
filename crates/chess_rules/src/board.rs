use std::fmt;

use crate::movegen::legal_moves;
use crate::types::*;
use crate::zobrist::{self, ZOBRIST};

/// A chess position plus everything needed to walk a game forward and back:
/// the mailbox board, game metadata, cached king squares, the incrementally
/// maintained Zobrist fingerprint, the undo stack and the fingerprint history
/// used for repetition counting.
#[derive(Debug)]
pub struct Position {
    board: [Option<Piece>; 64],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<u8>, // square behind a pawn that just advanced 2
    halfmove_clock: u32,
    fullmove_number: u32,
    kings: [u8; 2], // cached king squares, indexed by Color::idx()
    hash: u64,
    undo_stack: Vec<UndoRecord>,
    history: Vec<u64>, // one fingerprint per reached position, current included
}

/// Everything `unmake_move` needs to restore the previous ply. Held on a LIFO
/// stack inside `Position`; only the most recent move can be taken back.
#[derive(Debug)]
struct UndoRecord {
    mv: Move,
    moved: Piece,                  // pre-promotion piece
    captured: Option<(Piece, u8)>, // the square differs from `to` only for en passant
    castling: CastlingRights,
    en_passant: Option<u8>,
    halfmove_clock: u32,
    fullmove_number: u32,
    hash: u64,
}

/// A clone is an independent exploration root: same board state, fresh undo
/// stack, history reseeded with just the current fingerprint.
impl Clone for Position {
    fn clone(&self) -> Self {
        Position {
            board: self.board,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            kings: self.kings,
            hash: self.hash,
            undo_stack: Vec::new(),
            history: vec![self.hash],
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        let mut board = [None; 64];

        // Pawns
        for f in 0..8 {
            board[8 + f] = Some(Piece {
                color: Color::White,
                kind: PieceKind::Pawn,
            });
            board[48 + f] = Some(Piece {
                color: Color::Black,
                kind: PieceKind::Pawn,
            });
        }
        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            board[f] = Some(Piece {
                color: Color::White,
                kind,
            });
            board[56 + f] = Some(Piece {
                color: Color::Black,
                kind,
            });
        }

        Position::from_parts(board, Color::White, CastlingRights::ALL, None, 0, 1)
    }

    /// Assemble a position from validated parts: locate the kings, compute the
    /// fingerprint, seed the history. Callers must have ensured exactly one
    /// king per color is on the board.
    pub(crate) fn from_parts(
        board: [Option<Piece>; 64],
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<u8>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Position {
        let mut kings = [64u8; 2];
        for (i, slot) in board.iter().enumerate() {
            if let Some(pc) = slot
                && pc.kind == PieceKind::King
            {
                kings[pc.color.idx()] = i as u8;
            }
        }
        debug_assert!(
            kings[0] < 64 && kings[1] < 64,
            "both kings must be on the board"
        );

        let mut pos = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            kings,
            hash: 0,
            undo_stack: Vec::new(),
            history: Vec::new(),
        };
        pos.hash = zobrist::full_hash(&pos);
        pos.history.push(pos.hash);
        pos
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }
    pub fn en_passant(&self) -> Option<u8> {
        self.en_passant
    }
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }
    /// Cached king square for `c`; kept in sync by make/unmake.
    pub fn king_sq(&self, c: Color) -> u8 {
        self.kings[c.idx()]
    }
    /// The current Zobrist fingerprint (board, side to move, castling rights,
    /// en-passant file). Clocks are deliberately excluded.
    pub fn position_hash(&self) -> u64 {
        self.hash
    }
    /// Number of moves applied and not yet taken back.
    pub fn applied_plies(&self) -> usize {
        self.undo_stack.len()
    }
    pub(crate) fn history(&self) -> &[u64] {
        &self.history
    }

    fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    /// Apply a move produced by the generator. The flags are trusted; feeding
    /// arbitrary coordinates through here breaks the position. External input
    /// goes through `apply_if_legal` or `find_move` instead.
    pub fn make_move(&mut self, mv: Move) {
        let from = mv.from;
        let to = mv.to;
        let moved = self.piece_at(from).expect("no piece on from-square");

        // En passant captures one rank behind the destination square.
        let captured = if mv.flags.is_en_passant() {
            let dir: i8 = match moved.color {
                Color::White => -1,
                Color::Black => 1,
            };
            let cap_sq = sq(file_of(to), rank_of(to) + dir)
                .expect("en-passant capture square off the board");
            self.piece_at(cap_sq).map(|pc| (pc, cap_sq))
        } else {
            self.piece_at(to).map(|pc| (pc, to))
        };

        self.undo_stack.push(UndoRecord {
            mv,
            moved,
            captured,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            hash: self.hash,
        });

        if let Some((pc, cap_sq)) = captured {
            self.set_piece(cap_sq, None);
            self.hash ^= ZOBRIST.piece_key(pc, cap_sq);
        }

        self.set_piece(from, None);
        self.hash ^= ZOBRIST.piece_key(moved, from);
        let placed = match mv.promo {
            Some(kind) => Piece {
                color: moved.color,
                kind,
            },
            None => moved,
        };
        self.set_piece(to, Some(placed));
        self.hash ^= ZOBRIST.piece_key(placed, to);

        if mv.flags.is_castle() {
            let (rook_from, rook_to) = castling_rook_squares(to);
            let rook = self
                .piece_at(rook_from)
                .expect("castling without a rook on its home square");
            self.set_piece(rook_from, None);
            self.set_piece(rook_to, Some(rook));
            self.hash ^= ZOBRIST.piece_key(rook, rook_from);
            self.hash ^= ZOBRIST.piece_key(rook, rook_to);
        }

        if moved.kind == PieceKind::King {
            self.kings[moved.color.idx()] = to;
        }

        // Rights shrink whenever a move touches a king or rook home square,
        // covering king moves, rook moves and rook captures in one step.
        let old_rights = self.castling;
        self.castling.0 &= CASTLING_MASK[from as usize];
        self.castling.0 &= CASTLING_MASK[to as usize];
        if self.castling != old_rights {
            self.hash ^= zobrist::castling_hash(old_rights) ^ zobrist::castling_hash(self.castling);
        }

        // Stale en-passant target dies with this move; a double push sets a
        // fresh one on the square passed over.
        if let Some(ep) = self.en_passant {
            self.hash ^= ZOBRIST.ep_key(file_of(ep) as u8);
        }
        self.en_passant = None;
        if mv.flags.is_double_push() {
            let ep_rank = (rank_of(from) + rank_of(to)) / 2;
            self.en_passant = sq(file_of(from), ep_rank);
            if let Some(ep) = self.en_passant {
                self.hash ^= ZOBRIST.ep_key(file_of(ep) as u8);
            }
        }

        let reset = moved.kind == PieceKind::Pawn || captured.is_some();
        self.halfmove_clock = if reset { 0 } else { self.halfmove_clock + 1 };
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();
        self.hash ^= ZOBRIST.side_to_move;

        self.history.push(self.hash);
    }

    /// Take back the most recently applied move and return it. Calling this
    /// with nothing to undo is a programming error and panics.
    pub fn unmake_move(&mut self) -> Move {
        let undo = self
            .undo_stack
            .pop()
            .expect("unmake_move with no move to undo");
        let mv = undo.mv;
        let from = mv.from;
        let to = mv.to;

        // Walk the board changes back; metadata and hash are restored
        // wholesale from the record below.
        self.set_piece(to, None);
        self.set_piece(from, Some(undo.moved));
        if let Some((pc, cap_sq)) = undo.captured {
            self.set_piece(cap_sq, Some(pc));
        }
        if mv.flags.is_castle() {
            let (rook_from, rook_to) = castling_rook_squares(to);
            let rook = self
                .piece_at(rook_to)
                .expect("castling rook missing during unmake");
            self.set_piece(rook_to, None);
            self.set_piece(rook_from, Some(rook));
        }
        if undo.moved.kind == PieceKind::King {
            self.kings[undo.moved.color.idx()] = from;
        }

        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        self.hash = undo.hash;
        self.history.pop();

        mv
    }

    /// Apply `mv` only if it is one of the current legal moves. Returns
    /// whether the move was applied. Compare full moves, not just coordinates:
    /// use `find_move` to look up the flagged form of external input first.
    pub fn apply_if_legal(&mut self, mv: Move) -> bool {
        if legal_moves(self).contains(&mv) {
            self.make_move(mv);
            true
        } else {
            false
        }
    }
}

/// For a castling king destination, the matching (rook_from, rook_to).
fn castling_rook_squares(king_to: u8) -> (u8, u8) {
    match king_to {
        6 => (7, 5),    // white kingside: e1g1, rook h1f1
        2 => (0, 3),    // white queenside: e1c1, rook a1d1
        62 => (63, 61), // black kingside: e8g8, rook h8f8
        58 => (56, 59), // black queenside: e8c8, rook a8d8
        _ => panic!("invalid castling destination: {king_to}"),
    }
}

/// Per-square masks ANDed onto the rights when a move touches the square.
/// Only king and rook home squares clear anything.
const CASTLING_MASK: [u8; 64] = {
    let mut mask = [0b1111u8; 64];
    mask[0] = 0b1111 & !CastlingRights::WHITE_QUEENSIDE; // a1
    mask[4] = 0b1111 & !(CastlingRights::WHITE_KINGSIDE | CastlingRights::WHITE_QUEENSIDE); // e1
    mask[7] = 0b1111 & !CastlingRights::WHITE_KINGSIDE; // h1
    mask[56] = 0b1111 & !CastlingRights::BLACK_QUEENSIDE; // a8
    mask[60] = 0b1111 & !(CastlingRights::BLACK_KINGSIDE | CastlingRights::BLACK_QUEENSIDE); // e8
    mask[63] = 0b1111 & !CastlingRights::BLACK_KINGSIDE; // h8
    mask
};

/// Text grid with rank 8 on top, dots for empty squares.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                match self.piece_at((rank * 8 + file) as u8) {
                    Some(pc) => write!(f, " {}", pc.to_char())?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
