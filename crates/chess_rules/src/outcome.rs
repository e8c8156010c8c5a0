//! Terminal-state classification: checkmate, stalemate and the draw rules.

use crate::board::Position;
use crate::movegen::legal_moves;
use crate::types::{Color, PieceKind, file_of, rank_of};

/// How a game stands. Wins only ever arise from checkmate here; resignation
/// and clocks belong to whatever hosts the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameResult {
    InProgress,
    WhiteWin,
    BlackWin,
    Stalemate,
    DrawRepetition,
    DrawFiftyMove,
    DrawInsufficientMaterial,
}

impl GameResult {
    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameResult::Stalemate
                | GameResult::DrawRepetition
                | GameResult::DrawFiftyMove
                | GameResult::DrawInsufficientMaterial
        )
    }
    pub fn is_over(self) -> bool {
        self != GameResult::InProgress
    }
}

impl Position {
    /// Fifty moves by both sides without a pawn move or capture.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock() >= 100
    }

    /// How many times the current position has occurred in this game,
    /// the present occurrence included.
    pub fn repetition_count(&self) -> usize {
        let current = self.position_hash();
        self.history().iter().filter(|&&h| h == current).count()
    }

    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    /// Neither side retains enough material to deliver mate: no pawns, rooks
    /// or queens, and at most one minor piece in total, or bishops only with
    /// all of them on one square shade. Deliberately conservative; e.g.
    /// knight plus bishop against a bare king is treated as sufficient.
    pub fn is_insufficient_material(&self) -> bool {
        let mut knights = 0usize;
        let mut bishops = 0usize;
        let mut shades = [false; 2];
        for square in 0..64u8 {
            let Some(pc) = self.piece_at(square) else {
                continue;
            };
            match pc.kind {
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::Knight => knights += 1,
                PieceKind::Bishop => {
                    bishops += 1;
                    shades[((file_of(square) + rank_of(square)) & 1) as usize] = true;
                }
                PieceKind::King => {}
            }
        }
        if knights + bishops <= 1 {
            return true;
        }
        knights == 0 && !(shades[0] && shades[1])
    }

    /// Classify the position. Mate and stalemate are checked before the draw
    /// rules, so a mating move on the hundredth halfmove still counts as mate.
    pub fn game_result(&self) -> GameResult {
        if legal_moves(self).is_empty() {
            return if self.in_check(self.side_to_move()) {
                match self.side_to_move() {
                    Color::White => GameResult::BlackWin,
                    Color::Black => GameResult::WhiteWin,
                }
            } else {
                GameResult::Stalemate
            };
        }
        if self.is_fifty_move_draw() {
            GameResult::DrawFiftyMove
        } else if self.is_threefold_repetition() {
            GameResult::DrawRepetition
        } else if self.is_insufficient_material() {
            GameResult::DrawInsufficientMaterial
        } else {
            GameResult::InProgress
        }
    }
}
