// This file is part of the fianchetto library.
// Copyright (C) 2026 The fianchetto developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Pseudo-legal move generation.
//!
//! Moves generated here obey the movement and capture geometry of the
//! piece but may leave the own king in check. [`Position`] filters them.

use crate::{
    attacks,
    board::Board,
    m::{MoveKind, MoveList},
    setup, CastlingSide, Move, Piece, Position, Role, Square,
};

/// Appends the pseudo-legal moves of `piece` to `moves`.
///
/// En passant is only generated for the side to move, because the
/// position only remembers the double step of the last half-move.
pub(crate) fn gen_pseudo_legal(
    pos: &Position,
    board: &Board<'_>,
    piece: &Piece,
    moves: &mut MoveList,
) {
    match piece.role {
        Role::Pawn => {
            gen_pawn_moves(board, piece, moves);
            if piece.color == pos.turn() {
                gen_en_passant(pos, board, piece, moves);
            }
        }
        Role::Knight => gen_stepper_moves(board, piece, &attacks::KNIGHT_DELTAS, moves),
        Role::King => {
            gen_stepper_moves(board, piece, &attacks::KING_DELTAS, moves);
            gen_castling_moves(board, piece, moves);
        }
        Role::Bishop | Role::Rook | Role::Queen => gen_slider_moves(board, piece, moves),
    }
}

/// Quiet move or capture onto `to`, or nothing if a friendly piece
/// stands there.
fn target_kind(board: &Board<'_>, piece: &Piece, to: Square) -> Option<MoveKind> {
    match board.piece_at(to) {
        None => Some(MoveKind::Normal),
        Some(other) if other.is_enemy(piece.color) => Some(MoveKind::Capture { captured: *other }),
        Some(_) => None,
    }
}

fn gen_stepper_moves(
    board: &Board<'_>,
    piece: &Piece,
    deltas: &[(i32, i32)],
    moves: &mut MoveList,
) {
    for &(df, dr) in deltas {
        let Some(to) = piece.square.offset(df, dr) else {
            continue;
        };
        if let Some(kind) = target_kind(board, piece, to) {
            moves.push(Move::new(*piece, to, kind));
        }
    }
}

fn gen_slider_moves(board: &Board<'_>, piece: &Piece, moves: &mut MoveList) {
    for &(df, dr) in attacks::directions(piece.role) {
        let mut current = piece.square;
        while let Some(to) = current.offset(df, dr) {
            match target_kind(board, piece, to) {
                Some(MoveKind::Normal) => moves.push(Move::new(*piece, to, MoveKind::Normal)),
                Some(kind) => {
                    moves.push(Move::new(*piece, to, kind));
                    break;
                }
                None => break,
            }
            current = to;
        }
    }
}

fn push_pawn_moves(piece: &Piece, to: Square, captured: Option<Piece>, moves: &mut MoveList) {
    if to.rank() == piece.color.promotion_rank() {
        for role in Role::PROMOTIONS {
            moves.push(Move::new(*piece, to, MoveKind::Promotion { role, captured }));
        }
    } else {
        let kind = match captured {
            Some(captured) => MoveKind::Capture { captured },
            None => MoveKind::Normal,
        };
        moves.push(Move::new(*piece, to, kind));
    }
}

fn gen_pawn_moves(board: &Board<'_>, piece: &Piece, moves: &mut MoveList) {
    let forward = piece.color.forward();

    for df in [-1, 1] {
        if let Some(to) = piece.square.offset(df, forward) {
            if let Some(captured) = board.piece_at(to).filter(|p| p.is_enemy(piece.color)) {
                push_pawn_moves(piece, to, Some(*captured), moves);
            }
        }
    }

    let Some(single) = piece.square.offset(0, forward).filter(|sq| board.is_empty(*sq)) else {
        return;
    };
    push_pawn_moves(piece, single, None, moves);

    if !piece.has_moved {
        if let Some(double) = single.offset(0, forward).filter(|sq| board.is_empty(*sq)) {
            moves.push(Move::new(*piece, double, MoveKind::Normal));
        }
    }
}

fn gen_en_passant(pos: &Position, board: &Board<'_>, piece: &Piece, moves: &mut MoveList) {
    let Some(to) = pos.ep_square() else {
        return;
    };

    let forward = piece.color.forward();
    let adjacent = [-1, 1]
        .into_iter()
        .any(|df| piece.square.offset(df, forward) == Some(to));
    if !adjacent || !board.is_empty(to) {
        return;
    }

    let victim = to
        .offset(0, -forward)
        .and_then(|sq| board.piece_at(sq))
        .filter(|p| p.role == Role::Pawn && p.is_enemy(piece.color));
    if let Some(captured) = victim {
        moves.push(Move::new(*piece, to, MoveKind::EnPassant { captured: *captured }));
    }
}

/// Castles with an unmoved king and rook and nothing in between. Whether
/// the king starts in, passes through or lands in check is left to the
/// legal filter.
fn gen_castling_moves(board: &Board<'_>, king: &Piece, moves: &mut MoveList) {
    let color = king.color;
    if king.has_moved {
        return;
    }

    'next_side: for side in CastlingSide::ALL {
        if !setup::castling_right(board.pieces(), color, side) {
            continue;
        }
        let rook_from = side.rook_from(color);
        let Some(rook) = board.piece_at(rook_from) else {
            continue;
        };

        let mut square = king.square;
        while let Some(next) = square.offset(side.step(), 0) {
            if next == rook_from {
                break;
            }
            if !board.is_empty(next) {
                continue 'next_side;
            }
            square = next;
        }

        moves.push(Move::new(
            *king,
            side.king_to(color),
            MoveKind::Castle {
                side,
                rook: *rook,
                rook_to: side.rook_to(color),
            },
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fen::Fen, Color};

    fn position(fen: &str) -> Position {
        fen.parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("legal position")
    }

    fn pseudo_legal_from(pos: &Position, from: Square) -> MoveList {
        let board = pos.board();
        let mut moves = MoveList::new();
        if let Some(piece) = board.piece_at(from) {
            gen_pseudo_legal(pos, &board, piece, &mut moves);
        }
        moves
    }

    #[test]
    fn test_pawn_pushes() {
        let pos = Position::default();
        let moves = pseudo_legal_from(&pos, Square::E2);
        let targets: Vec<Square> = moves.iter().map(|m| m.to()).collect();
        assert_eq!(targets, [Square::E3, Square::E4]);

        let blocked = position("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert!(pseudo_legal_from(&blocked, Square::E2).is_empty());

        let half_blocked = position("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1");
        assert_eq!(pseudo_legal_from(&half_blocked, Square::E2).len(), 1);
    }

    #[test]
    fn test_promotion_completeness() {
        let pos = position("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        let moves = pseudo_legal_from(&pos, Square::B7);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.is_promotion() && m.to() == Square::B8));
        let roles: Vec<Role> = moves.iter().filter_map(|m| m.promotion()).collect();
        assert_eq!(roles, Role::PROMOTIONS);
    }

    #[test]
    fn test_promotion_with_capture() {
        let pos = position("r3k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        let moves = pseudo_legal_from(&pos, Square::B7);
        assert_eq!(moves.len(), 8);
        assert_eq!(moves.iter().filter(|m| m.is_capture()).count(), 4);
        assert!(moves
            .iter()
            .filter(|m| m.is_capture())
            .all(|m| m.captured().map(|p| p.role) == Some(Role::Rook)));
    }

    #[test]
    fn test_slider_rays() {
        let pos = position("4k3/8/8/8/1p1R2P1/8/8/4K3 w - - 0 1");
        let moves = pseudo_legal_from(&pos, Square::D4);
        assert_eq!(moves.len(), 11);
        assert_eq!(moves.iter().filter(|m| m.is_capture()).count(), 1);
        assert!(!moves.iter().any(|m| m.to() == Square::G4 || m.to() == Square::A4));
    }

    #[test]
    fn test_knight_in_corner() {
        let pos = position("4k3/8/8/8/8/8/2P5/N3K3 w - - 0 1");
        let moves = pseudo_legal_from(&pos, Square::A1);
        let targets: Vec<Square> = moves.iter().map(|m| m.to()).collect();
        assert_eq!(targets, [Square::B3]);
    }

    #[test]
    fn test_en_passant() {
        let pos = position("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let moves = pseudo_legal_from(&pos, Square::E5);
        let ep: Vec<&Move> = moves.iter().filter(|m| m.is_en_passant()).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to(), Square::D6);
        assert_eq!(ep[0].captured().map(|p| p.square), Some(Square::D5));

        let stale = position("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 2");
        assert!(!pseudo_legal_from(&stale, Square::E5)
            .iter()
            .any(|m| m.is_en_passant()));
    }

    #[test]
    fn test_castling() {
        let pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let castles: Vec<CastlingSide> = pseudo_legal_from(&pos, Square::E1)
            .iter()
            .filter_map(|m| m.castling_side())
            .collect();
        assert_eq!(castles, CastlingSide::ALL);

        let no_rights = position("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1");
        let castles: Vec<CastlingSide> = pseudo_legal_from(&no_rights, Square::E1)
            .iter()
            .filter_map(|m| m.castling_side())
            .collect();
        assert_eq!(castles, [CastlingSide::QueenSide]);
    }

    #[test]
    fn test_castling_ignores_attacks() {
        // The bishop on a6 covers f1, but safety is checked later.
        let pos = position("4k3/8/b7/8/8/8/8/R3K2R w KQ - 0 1");
        let castles: Vec<CastlingSide> = pseudo_legal_from(&pos, Square::E1)
            .iter()
            .filter_map(|m| m.castling_side())
            .collect();
        assert_eq!(castles, CastlingSide::ALL);

        let pos = position("4k3/8/8/8/8/8/8/R3K2r w Q - 0 1");
        assert!(pos.is_king_in_check(Color::White));
        assert!(pseudo_legal_from(&pos, Square::E1)
            .iter()
            .any(|m| m.castling_side() == Some(CastlingSide::QueenSide)));
    }

    #[test]
    fn test_castling_path_blocked() {
        // b1 only needs to be empty on the queen side.
        let pos = position("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1");
        let castles: Vec<CastlingSide> = pseudo_legal_from(&pos, Square::E1)
            .iter()
            .filter_map(|m| m.castling_side())
            .collect();
        assert_eq!(castles, [CastlingSide::KingSide]);
    }
}
