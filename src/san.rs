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

//! Algebraic move labels.
//!
//! Every [`Move`] handed out by the engine carries its label, already
//! disambiguated against the other legal moves of the position.
//!
//! # Examples
//!
//! ```
//! use fianchetto::{Position, Square};
//!
//! let pos = Position::default();
//! let knight = pos.piece_at(Square::G1).expect("knight").id;
//! let labels: Vec<String> = pos
//!     .legal_moves_for_piece(knight)
//!     .iter()
//!     .map(|m| m.to_string())
//!     .collect();
//!
//! assert_eq!(labels, ["Nh3", "Nf3"]);
//! ```
//!
//! Check and checkmate suffixes depend on the position after the move and
//! are added on top by [`SanPlus`]:
//!
//! ```
//! use fianchetto::{fen::Fen, san::SanPlus, Square};
//!
//! let pos = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1".parse::<Fen>()?.into_position()?;
//! let m = pos
//!     .legal_moves()
//!     .into_iter()
//!     .find(|m| m.to() == Square::A8)
//!     .expect("Ra8 is legal");
//!
//! assert_eq!(SanPlus::from_move(&pos, m).to_string(), "Ra8#");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::fmt::{self, Write as _};

use crate::{m::MoveKind, CastlingSide, Move, Piece, Position, Role, Square};

/// A move label in Standard Algebraic Notation, without check suffix.
#[derive(Copy, Debug, PartialEq, Eq, Clone, Hash)]
pub enum San {
    Normal {
        role: Role,
        file: Option<u8>,
        rank: Option<u8>,
        capture: bool,
        to: Square,
        promotion: Option<Role>,
    },
    Castle(CastlingSide),
}

impl San {
    /// The label a move gets when no other piece could make it. Pawn
    /// captures always name the origin file.
    pub(crate) fn undisambiguated(piece: &Piece, to: Square, kind: MoveKind) -> San {
        let (capture, promotion) = match kind {
            MoveKind::Normal => (false, None),
            MoveKind::Capture { .. } | MoveKind::EnPassant { .. } => (true, None),
            MoveKind::Promotion { role, captured } => (captured.is_some(), Some(role)),
            MoveKind::Castle { side, .. } => return San::Castle(side),
        };
        San::Normal {
            role: piece.role,
            file: (piece.role == Role::Pawn && capture).then(|| piece.square.file()),
            rank: None,
            capture,
            to,
            promotion,
        }
    }

    /// Labels `m`, naming its origin file, rank or both if another move in
    /// `moves` takes a piece of the same kind to the same square.
    pub fn disambiguate(m: Move, moves: &[Move]) -> San {
        let plain = San::undisambiguated(&m.piece(), m.to(), m.kind());

        let San::Normal {
            role,
            capture,
            to,
            promotion,
            ..
        } = plain
        else {
            return plain;
        };

        if role == Role::Pawn {
            return plain;
        }

        let from = m.from();
        let mut ambiguous = false;
        let mut ambiguous_file = false;
        let mut ambiguous_rank = false;
        for candidate in moves {
            if candidate.from() != from
                && candidate.role() == role
                && candidate.color() == m.color()
                && candidate.to() == to
                && !candidate.is_castle()
                && candidate.promotion() == promotion
            {
                ambiguous = true;
                if from.rank() == candidate.from().rank() {
                    ambiguous_rank = true;
                }
                if from.file() == candidate.from().file() {
                    ambiguous_file = true;
                }
            }
        }

        San::Normal {
            role,
            file: (ambiguous && (!ambiguous_file || ambiguous_rank)).then(|| from.file()),
            rank: ambiguous_file.then(|| from.rank()),
            capture,
            to,
            promotion,
        }
    }
}

impl fmt::Display for San {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            San::Normal {
                role,
                file,
                rank,
                capture,
                to,
                promotion,
            } => {
                if role != Role::Pawn {
                    f.write_char(role.upper_char())?;
                }
                if let Some(file) = file {
                    f.write_char((b'a' + file) as char)?;
                }
                if let Some(rank) = rank {
                    f.write_char((b'1' + rank) as char)?;
                }
                if capture {
                    f.write_char('x')?;
                }
                write!(f, "{to}")?;
                if let Some(promotion) = promotion {
                    write!(f, "={}", promotion.upper_char())?;
                }
                Ok(())
            }
            San::Castle(CastlingSide::KingSide) => f.write_str("O-O"),
            San::Castle(CastlingSide::QueenSide) => f.write_str("O-O-O"),
        }
    }
}

/// Check (`+`) or checkmate (`#`) suffix.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Suffix {
    Check,
    Checkmate,
}

impl Suffix {
    pub const fn char(self) -> char {
        match self {
            Suffix::Check => '+',
            Suffix::Checkmate => '#',
        }
    }

    /// The suffix earned by the move that led to `pos`.
    pub fn from_position(pos: &Position) -> Option<Suffix> {
        if !pos.is_check() {
            None
        } else if pos.legal_moves().is_empty() {
            Some(Suffix::Checkmate)
        } else {
            Some(Suffix::Check)
        }
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.char())
    }
}

/// A [`San`] and possible check and checkmate suffixes.
#[derive(Copy, Debug, PartialEq, Eq, Clone, Hash)]
pub struct SanPlus {
    pub san: San,
    pub suffix: Option<Suffix>,
}

impl SanPlus {
    /// Labels a legal move of `pos`, including the suffix for the position
    /// it leads to.
    pub fn from_move(pos: &Position, m: Move) -> SanPlus {
        let mut after = pos.clone();
        after.play_unchecked(&m);
        SanPlus {
            san: m.san(),
            suffix: Suffix::from_position(&after),
        }
    }
}

impl fmt::Display for SanPlus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.san)?;
        if let Some(suffix) = self.suffix {
            write!(f, "{suffix}")?;
        }
        Ok(())
    }
}
