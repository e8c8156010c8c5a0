//! Forsyth-Edwards Notation import and export.
//!
//! `from_fen` validates every field and returns a [`FenError`] on the first
//! malformation; nothing is half-built on failure. The halfmove clock and
//! fullmove number may be omitted and default to 0 and 1. `to_fen` always
//! emits all six fields, so a parsed position serializes back to its input.

use thiserror::Error;

use crate::board::Position;
use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 4 fields, got {0}")]
    FieldCount(usize),
    #[error("board section must have 8 ranks, got {0}")]
    RankCount(usize),
    #[error("too many files in rank {0:?}")]
    RankOverflow(String),
    #[error("rank {0:?} does not fill 8 files")]
    RankUnderflow(String),
    #[error("unknown piece character {0:?}")]
    PieceChar(char),
    #[error("invalid side to move {0:?}")]
    SideToMove(String),
    #[error("invalid castling field {0:?}")]
    Castling(String),
    #[error("invalid en passant square {0:?}")]
    EnPassant(String),
    #[error("invalid halfmove clock {0:?}")]
    HalfmoveClock(String),
    #[error("invalid fullmove number {0:?}")]
    FullmoveNumber(String),
    #[error("{0:?} must have exactly one king, found {1}")]
    KingCount(Color, usize),
}

impl Position {
    /// Parse a FEN string. Fails fast with the first malformation found; the
    /// returned error never leaves a partially constructed position behind.
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::FieldCount(parts.len()));
        }

        let board_part = parts[0];
        let stm_part = parts[1];
        let castle_part = parts[2];
        let ep_part = parts[3];
        let halfmove_part = parts.get(4).copied().unwrap_or("0");
        let fullmove_part = parts.get(5).copied().unwrap_or("1");

        let mut board = [None; 64];
        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut kings = [0usize; 2];
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file: i8 = 0;
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 first
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    if d == 0 {
                        return Err(FenError::PieceChar(ch));
                    }
                    file += d as i8;
                } else {
                    let kind = PieceKind::from_char(ch.to_ascii_lowercase())
                        .ok_or(FenError::PieceChar(ch))?;
                    let color = if ch.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let Some(square) = sq(file, rank) else {
                        return Err(FenError::RankOverflow((*rank_str).to_string()));
                    };
                    board[square as usize] = Some(Piece { color, kind });
                    if kind == PieceKind::King {
                        kings[color.idx()] += 1;
                    }
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankOverflow((*rank_str).to_string()));
                }
            }
            if file != 8 {
                return Err(FenError::RankUnderflow((*rank_str).to_string()));
            }
        }
        for color in [Color::White, Color::Black] {
            if kings[color.idx()] != 1 {
                return Err(FenError::KingCount(color, kings[color.idx()]));
            }
        }

        let side_to_move = match stm_part {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError::SideToMove(stm_part.to_string())),
        };

        let mut castling = CastlingRights::NONE;
        if castle_part != "-" {
            for ch in castle_part.chars() {
                let bit = match ch {
                    'K' => CastlingRights::WHITE_KINGSIDE,
                    'Q' => CastlingRights::WHITE_QUEENSIDE,
                    'k' => CastlingRights::BLACK_KINGSIDE,
                    'q' => CastlingRights::BLACK_QUEENSIDE,
                    _ => return Err(FenError::Castling(castle_part.to_string())),
                };
                castling.0 |= bit;
            }
        }

        let en_passant = match ep_part {
            "-" => None,
            _ => {
                let square = coord_to_sq(ep_part)
                    .ok_or_else(|| FenError::EnPassant(ep_part.to_string()))?;
                // The target sits behind a double-pushed pawn, so only ranks
                // 3 and 6 are possible.
                if rank_of(square) != 2 && rank_of(square) != 5 {
                    return Err(FenError::EnPassant(ep_part.to_string()));
                }
                Some(square)
            }
        };

        let halfmove_clock: u32 = halfmove_part
            .parse()
            .map_err(|_| FenError::HalfmoveClock(halfmove_part.to_string()))?;
        let fullmove_number: u32 = fullmove_part
            .parse()
            .map_err(|_| FenError::FullmoveNumber(fullmove_part.to_string()))?;
        if fullmove_number == 0 {
            return Err(FenError::FullmoveNumber(fullmove_part.to_string()));
        }

        Ok(Position::from_parts(
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        ))
    }

    /// Serialize the position as a six-field FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(80);

        for rank in (0..8).rev() {
            let mut empties = 0u8;
            for file in 0..8 {
                match self.piece_at((rank * 8 + file) as u8) {
                    Some(pc) => {
                        if empties > 0 {
                            fen.push((b'0' + empties) as char);
                            empties = 0;
                        }
                        fen.push(pc.to_char());
                    }
                    None => empties += 1,
                }
            }
            if empties > 0 {
                fen.push((b'0' + empties) as char);
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move() {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        let rights = self.castling();
        if rights.is_empty() {
            fen.push('-');
        } else {
            if rights.contains(CastlingRights::WHITE_KINGSIDE) {
                fen.push('K');
            }
            if rights.contains(CastlingRights::WHITE_QUEENSIDE) {
                fen.push('Q');
            }
            if rights.contains(CastlingRights::BLACK_KINGSIDE) {
                fen.push('k');
            }
            if rights.contains(CastlingRights::BLACK_QUEENSIDE) {
                fen.push('q');
            }
        }

        fen.push(' ');
        match self.en_passant() {
            Some(square) => fen.push_str(&sq_to_coord(square)),
            None => fen.push('-'),
        }

        fen.push(' ');
        fen.push_str(&self.halfmove_clock().to_string());
        fen.push(' ');
        fen.push_str(&self.fullmove_number().to_string());

        fen
    }
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
