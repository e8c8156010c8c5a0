//! Chess rules engine: position state, legal move generation, make/unmake
//! with full undo, draw and mate detection, and FEN import/export.
//!
//! The crate deliberately stops at the rules. Move *selection* (search,
//! evaluation), clocks and any UI live in whatever hosts it; callers drive a
//! [`Position`] through [`legal_moves`], [`Position::make_move`] /
//! [`Position::unmake_move`] and [`Position::game_result`], and exchange
//! positions with the outside world as FEN text.

mod attacks;
pub mod board;
pub mod fen;
pub mod movegen;
pub mod outcome;
pub mod perft;
pub mod types;
pub mod zobrist;

pub use board::Position;
pub use fen::FenError;
pub use movegen::{find_move, legal_moves, legal_moves_into};
pub use outcome::GameResult;
pub use perft::perft;
pub use types::*;
pub use zobrist::ZOBRIST;
