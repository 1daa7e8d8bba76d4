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

use std::fmt;

use arrayvec::ArrayVec;

use crate::{san::San, CastlingSide, Color, Piece, PieceId, Role, Square};

/// What a move does besides relocating the moving piece.
///
/// Each variant carries exactly the data it needs: a castle always knows
/// its rook, and only a promotion has a promotion role.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MoveKind {
    /// A quiet move onto an empty square, e.g., `Nf3`.
    Normal,
    /// A capture on the destination square, e.g., `Bxh7`.
    Capture { captured: Piece },
    /// `O-O` or `O-O-O`. The king moves two squares, the rook jumps over it.
    Castle {
        side: CastlingSide,
        rook: Piece,
        rook_to: Square,
    },
    /// A pawn capture onto the square a double-stepping pawn passed over,
    /// e.g., `exd6`.
    EnPassant { captured: Piece },
    /// A pawn reaching the last rank, possibly by capturing, e.g., `exd8=N`.
    Promotion {
        role: Role,
        captured: Option<Piece>,
    },
}

/// Information about a move.
///
/// A `Move` is an immutable value computed from the position before it was
/// played. The moving piece and any captured piece are snapshots, so
/// playing the move changes the board but never the `Move`.
///
/// # Display
///
/// `Move` implements [`Display`](fmt::Display) using its algebraic label,
/// see [`San`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    piece: Piece,
    to: Square,
    kind: MoveKind,
    san: San,
}

impl Move {
    pub(crate) fn new(piece: Piece, to: Square, kind: MoveKind) -> Move {
        Move {
            piece,
            to,
            kind,
            san: San::undisambiguated(&piece, to, kind),
        }
    }

    pub(crate) fn with_san(self, san: San) -> Move {
        Move { san, ..self }
    }

    /// Snapshot of the moving piece before the move.
    pub const fn piece(self) -> Piece {
        self.piece
    }

    pub const fn id(self) -> PieceId {
        self.piece.id
    }

    pub const fn color(self) -> Color {
        self.piece.color
    }

    /// Gets the role of the moved piece (a pawn for promotions).
    pub const fn role(self) -> Role {
        self.piece.role
    }

    pub const fn from(self) -> Square {
        self.piece.square
    }

    /// Gets the target square. For castling moves this is the square the
    /// king lands on.
    pub const fn to(self) -> Square {
        self.to
    }

    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// Gets the captured piece, if any.
    pub const fn captured(self) -> Option<Piece> {
        match self.kind {
            MoveKind::Capture { captured } | MoveKind::EnPassant { captured } => Some(captured),
            MoveKind::Promotion { captured, .. } => captured,
            MoveKind::Normal | MoveKind::Castle { .. } => None,
        }
    }

    pub const fn is_capture(self) -> bool {
        self.captured().is_some()
    }

    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind, MoveKind::EnPassant { .. })
    }

    pub const fn castling_side(self) -> Option<CastlingSide> {
        match self.kind {
            MoveKind::Castle { side, .. } => Some(side),
            _ => None,
        }
    }

    pub const fn is_castle(self) -> bool {
        matches!(self.kind, MoveKind::Castle { .. })
    }

    pub const fn promotion(self) -> Option<Role> {
        match self.kind {
            MoveKind::Promotion { role, .. } => Some(role),
            _ => None,
        }
    }

    pub const fn is_promotion(self) -> bool {
        matches!(self.kind, MoveKind::Promotion { .. })
    }

    /// Checks if the move resets the half-move clock.
    pub const fn is_zeroing(self) -> bool {
        matches!(self.piece.role, Role::Pawn) || self.is_capture()
    }

    /// The display label, e.g., `Nbd2`, `exd6`, `e8=Q` or `O-O`.
    pub const fn san(self) -> San {
        self.san
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.san.fmt(f)
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is enough for the moves of any position with at most
/// 16 pieces per side.
pub type MoveList = ArrayVec<Move, 512>;
