use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn idx(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lowercase piece letter as used in FEN and coordinate move text.
    pub fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_char(ch: char) -> Option<PieceKind> {
        match ch {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// Promotion choices in the order they are emitted by the generator.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn to_char(self) -> char {
        match self.color {
            Color::White => self.kind.to_char().to_ascii_uppercase(),
            Color::Black => self.kind.to_char(),
        }
    }
}

/// Bitset of per-move properties. Set by the generator; `make_move` trusts
/// them rather than re-deriving the move's character from the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveFlags(pub u8);

impl MoveFlags {
    pub const NONE: MoveFlags = MoveFlags(0);
    pub const CAPTURE: MoveFlags = MoveFlags(1);
    pub const EN_PASSANT: MoveFlags = MoveFlags(2);
    pub const CASTLE_KINGSIDE: MoveFlags = MoveFlags(4);
    pub const CASTLE_QUEENSIDE: MoveFlags = MoveFlags(8);
    pub const PROMOTION: MoveFlags = MoveFlags(16);
    pub const DOUBLE_PUSH: MoveFlags = MoveFlags(32);

    pub fn contains(self, other: MoveFlags) -> bool {
        self.0 & other.0 == other.0
    }
    pub fn is_capture(self) -> bool {
        self.contains(Self::CAPTURE)
    }
    pub fn is_en_passant(self) -> bool {
        self.contains(Self::EN_PASSANT)
    }
    pub fn is_castle(self) -> bool {
        self.0 & (Self::CASTLE_KINGSIDE.0 | Self::CASTLE_QUEENSIDE.0) != 0
    }
    pub fn is_kingside_castle(self) -> bool {
        self.contains(Self::CASTLE_KINGSIDE)
    }
    pub fn is_queenside_castle(self) -> bool {
        self.contains(Self::CASTLE_QUEENSIDE)
    }
    pub fn is_promotion(self) -> bool {
        self.contains(Self::PROMOTION)
    }
    pub fn is_double_push(self) -> bool {
        self.contains(Self::DOUBLE_PUSH)
    }
}

impl std::ops::BitOr for MoveFlags {
    type Output = MoveFlags;
    fn bitor(self, rhs: MoveFlags) -> MoveFlags {
        MoveFlags(self.0 | rhs.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub from: u8, // 0..63
    pub to: u8,   // 0..63
    pub flags: MoveFlags,
    pub promo: Option<PieceKind>,
}

impl Move {
    pub fn quiet(from: u8, to: u8) -> Self {
        Move {
            from,
            to,
            flags: MoveFlags::NONE,
            promo: None,
        }
    }
    pub fn with_flags(from: u8, to: u8, flags: MoveFlags) -> Self {
        Move {
            from,
            to,
            flags,
            promo: None,
        }
    }
    pub fn promotion(from: u8, to: u8, kind: PieceKind, extra: MoveFlags) -> Self {
        Move {
            from,
            to,
            flags: extra | MoveFlags::PROMOTION,
            promo: Some(kind),
        }
    }
}

/// Coordinate notation: `e2e4`, promotions suffixed as in `a7a8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", sq_to_coord(self.from), sq_to_coord(self.to))?;
        if let Some(kind) = self.promo {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

/// The four castling rights as a 4-bit set. Rights only ever shrink over the
/// course of a game; nothing restores a cleared bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastlingRights(pub u8);

impl CastlingRights {
    pub const WHITE_KINGSIDE: u8 = 1;
    pub const WHITE_QUEENSIDE: u8 = 2;
    pub const BLACK_KINGSIDE: u8 = 4;
    pub const BLACK_QUEENSIDE: u8 = 8;

    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    pub fn contains(self, bits: u8) -> bool {
        self.0 & bits == bits
    }
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
    pub fn can_castle_kingside(self, c: Color) -> bool {
        match c {
            Color::White => self.contains(Self::WHITE_KINGSIDE),
            Color::Black => self.contains(Self::BLACK_KINGSIDE),
        }
    }
    pub fn can_castle_queenside(self, c: Color) -> bool {
        match c {
            Color::White => self.contains(Self::WHITE_QUEENSIDE),
            Color::Black => self.contains(Self::BLACK_QUEENSIDE),
        }
    }
}

// Helpers
pub fn file_of(sq: u8) -> i8 {
    (sq % 8) as i8
}
pub fn rank_of(sq: u8) -> i8 {
    (sq / 8) as i8
}
pub fn sq(file: i8, rank: i8) -> Option<u8> {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some((rank as u8) * 8 + (file as u8))
    } else {
        None
    }
}

pub fn sq_to_coord(sq: u8) -> String {
    let f = (b'a' + (sq % 8)) as char;
    let r = (b'1' + (sq / 8)) as char;
    format!("{f}{r}")
}

pub fn coord_to_sq(c: &str) -> Option<u8> {
    let b = c.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let f = b[0];
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return None;
    }
    let file = f - b'a';
    let rank = r - b'1';
    Some(rank * 8 + file)
}
