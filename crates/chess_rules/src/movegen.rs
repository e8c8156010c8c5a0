use crate::attacks::{DIAG_DIRS, KING_DELTAS, KNIGHT_DELTAS, ORTHO_DIRS};
use crate::board::Position;
use crate::types::*;

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position only once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
/// The position is only borrowed mutably for make/unmake round trips; it is
/// back in its original state when this returns.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move();
    // Filter in place: play each candidate, keep it only if the mover's own
    // king is not left attacked.
    out.retain(|&mv| {
        pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move();
        !illegal
    });
}

/// Look up the fully flagged legal move matching a bare coordinate pair, the
/// form hosting layers get from user input. `promo` must name the promotion
/// piece exactly when the move promotes and be `None` otherwise.
pub fn find_move(pos: &Position, from: u8, to: u8, promo: Option<PieceKind>) -> Option<Move> {
    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promo == promo)
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    for from in 0..64u8 {
        let pc = match pos.piece_at(from) {
            Some(p) => p,
            None => continue,
        };
        if pc.color != pos.side_to_move() {
            continue;
        }
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, from, pc.color, out),
            PieceKind::Knight => gen_leaper(pos, from, pc.color, out, &KNIGHT_DELTAS),
            PieceKind::Bishop => gen_slider(pos, from, pc.color, out, &DIAG_DIRS),
            PieceKind::Rook => gen_slider(pos, from, pc.color, out, &ORTHO_DIRS),
            PieceKind::Queen => {
                gen_slider(pos, from, pc.color, out, &DIAG_DIRS);
                gen_slider(pos, from, pc.color, out, &ORTHO_DIRS);
            }
            PieceKind::King => {
                gen_leaper(pos, from, pc.color, out, &KING_DELTAS);
                gen_castle(pos, from, pc.color, out);
            }
        }
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);

    let dir: i8 = match c {
        Color::White => 1,
        Color::Black => -1,
    };
    let start_rank: i8 = match c {
        Color::White => 1,
        Color::Black => 6,
    };
    let promo_rank: i8 = match c {
        Color::White => 7,
        Color::Black => 0,
    };

    // Forward pushes. A push onto the last rank becomes four promotions.
    if let Some(to) = sq(f, r + dir)
        && pos.piece_at(to).is_none()
    {
        if rank_of(to) == promo_rank {
            for pk in PROMOTION_KINDS {
                out.push(Move::promotion(from, to, pk, MoveFlags::NONE));
            }
        } else {
            out.push(Move::quiet(from, to));
        }

        if r == start_rank
            && let Some(to2) = sq(f, r + 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(Move::with_flags(from, to2, MoveFlags::DOUBLE_PUSH));
        }
    }

    // Diagonal captures, including en passant onto the recorded target square.
    for df in [-1, 1] {
        if let Some(to) = sq(f + df, r + dir) {
            if let Some(tpc) = pos.piece_at(to) {
                if tpc.color != c {
                    if rank_of(to) == promo_rank {
                        for pk in PROMOTION_KINDS {
                            out.push(Move::promotion(from, to, pk, MoveFlags::CAPTURE));
                        }
                    } else {
                        out.push(Move::with_flags(from, to, MoveFlags::CAPTURE));
                    }
                }
            } else if pos.en_passant() == Some(to) {
                out.push(Move::with_flags(
                    from,
                    to,
                    MoveFlags::CAPTURE | MoveFlags::EN_PASSANT,
                ));
            }
        }
    }
}

/// Knight and king share the shape: fixed deltas, land on empty or enemy.
fn gen_leaper(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>, deltas: &[(i8, i8)]) {
    let f = file_of(from);
    let r = rank_of(from);
    for (df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                None => out.push(Move::quiet(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::with_flags(from, to, MoveFlags::CAPTURE))
                }
                _ => {}
            }
        }
    }
}

fn gen_slider(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>, dirs: &[(i8, i8)]) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for (df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::quiet(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::with_flags(from, to, MoveFlags::CAPTURE));
                    break;
                }
                _ => break,
            }
            f += df;
            r += dr;
        }
    }
}

fn gen_castle(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let home: u8 = match c {
        Color::White => 4,  // e1
        Color::Black => 60, // e8
    };
    if from != home {
        return;
    }
    // No castling out of check; transit and destination are vetted per wing
    // below, so the full start/transit/destination path must be safe.
    if pos.in_check(c) {
        return;
    }

    let enemy = c.other();
    let rights = pos.castling();

    // Kingside: f- and g-file squares empty and unattacked.
    if rights.can_castle_kingside(c)
        && pos.piece_at(home + 1).is_none()
        && pos.piece_at(home + 2).is_none()
        && !pos.is_square_attacked(home + 1, enemy)
        && !pos.is_square_attacked(home + 2, enemy)
    {
        out.push(Move::with_flags(home, home + 2, MoveFlags::CASTLE_KINGSIDE));
    }

    // Queenside: d-, c- and b-file squares empty; the king only crosses d and
    // c, so b may be attacked.
    if rights.can_castle_queenside(c)
        && pos.piece_at(home - 1).is_none()
        && pos.piece_at(home - 2).is_none()
        && pos.piece_at(home - 3).is_none()
        && !pos.is_square_attacked(home - 1, enemy)
        && !pos.is_square_attacked(home - 2, enemy)
    {
        out.push(Move::with_flags(home, home - 2, MoveFlags::CASTLE_QUEENSIDE));
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
