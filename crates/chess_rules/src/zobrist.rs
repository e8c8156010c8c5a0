//! Zobrist fingerprints for repetition detection.
//!
//! Every position maps to a 64-bit key built by XOR-ing fixed random values
//! for each (color, piece, square) occupant, the side to move, each castling
//! right still held, and the en-passant file. XOR makes the update involutive,
//! so make/unmake maintain the key in O(1) instead of rehashing 64 squares.
//! Halfmove and fullmove counters are excluded on purpose: repetition ignores
//! them.
//!
//! The key table is generated at compile time from a fixed seed, so
//! fingerprints are stable across runs and builds.

use crate::board::Position;
use crate::types::{CastlingRights, Color, Piece, file_of};

/// Fixed random values for every hashable position feature.
pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square].
    pub pieces: [[[u64; 64]; 6]; 2],
    /// XORed in when Black is to move.
    pub side_to_move: u64,
    /// One key per right: [WK, WQ, BK, BQ], matching the `CastlingRights` bits.
    pub castling: [u64; 4],
    /// One key per en-passant file.
    pub en_passant: [u64; 8],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    /// Generate the table with splitmix64: the state advances by the golden
    /// ratio increment and each output is a bit-mixed copy of the state.
    pub const fn new() -> Self {
        const fn mix(mut z: u64) -> u64 {
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^ (z >> 31)
        }
        const INCREMENT: u64 = 0x9E37_79B9_7F4A_7C15;

        let mut state = 0xB5AD_4ECE_DA1C_E2A9u64; // fixed seed

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut color = 0;
        while color < 2 {
            let mut kind = 0;
            while kind < 6 {
                let mut square = 0;
                while square < 64 {
                    state = state.wrapping_add(INCREMENT);
                    pieces[color][kind][square] = mix(state);
                    square += 1;
                }
                kind += 1;
            }
            color += 1;
        }

        state = state.wrapping_add(INCREMENT);
        let side_to_move = mix(state);

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            state = state.wrapping_add(INCREMENT);
            castling[i] = mix(state);
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            state = state.wrapping_add(INCREMENT);
            en_passant[i] = mix(state);
            i += 1;
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }

    #[inline(always)]
    pub fn ep_key(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }
}

/// Global key table, computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

/// XOR of the keys for every right still held.
pub fn castling_hash(rights: CastlingRights) -> u64 {
    let mut h = 0u64;
    for (i, key) in ZOBRIST.castling.iter().enumerate() {
        if rights.0 & (1 << i) != 0 {
            h ^= key;
        }
    }
    h
}

/// Recompute a position's fingerprint from scratch. Make/unmake maintain the
/// same value incrementally; this is the reference definition, used at
/// construction and by the consistency tests.
pub fn full_hash(pos: &Position) -> u64 {
    let mut h = 0u64;
    for square in 0..64u8 {
        if let Some(pc) = pos.piece_at(square) {
            h ^= ZOBRIST.piece_key(pc, square);
        }
    }
    if pos.side_to_move() == Color::Black {
        h ^= ZOBRIST.side_to_move;
    }
    h ^= castling_hash(pos.castling());
    if let Some(ep) = pos.en_passant() {
        h ^= ZOBRIST.ep_key(file_of(ep) as u8);
    }
    h
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
