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

//! Parse and write moves in Universal Chess Interface representation.
//!
//! # Examples
//!
//! Parsing UCIs:
//!
//! ```
//! use fianchetto::{uci::UciMove, Square};
//!
//! let uci: UciMove = "g1f3".parse()?;
//!
//! assert_eq!(uci, UciMove {
//!     from: Square::G1,
//!     to: Square::F3,
//!     promotion: None,
//! });
//! # Ok::<_, fianchetto::uci::ParseUciMoveError>(())
//! ```
//!
//! Converting to a legal move in the context of a position:
//!
//! ```
//! use fianchetto::{uci::UciMove, Position};
//!
//! let pos = Position::default();
//! let uci: UciMove = "g1f3".parse()?;
//! let m = uci.to_move(&pos)?;
//!
//! assert_eq!(m.to_string(), "Nf3");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Castling is written as the king's two-square step, e.g. `e1g1`.

use std::{error::Error, fmt, str::FromStr};

use crate::{Move, Position, Role, Square};

/// Error when parsing an invalid UCI move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseUciMoveError;

impl fmt::Display for ParseUciMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid uci move")
    }
}

impl Error for ParseUciMoveError {}

/// Error when a UCI move is not legal in a position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IllegalUciMoveError;

impl fmt::Display for IllegalUciMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal uci move")
    }
}

impl Error for IllegalUciMoveError {}

/// A move as origin, destination and optional promotion role, e.g.
/// `e7e8q`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl UciMove {
    /// Parses a move from ASCII bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ParseUciMoveError`] if `uci` is not 4 or 5 bytes of the
    /// form `e2e4` or `e7e8q`, or if the promotion role is a pawn or king.
    pub fn from_ascii(uci: &[u8]) -> Result<UciMove, ParseUciMoveError> {
        if uci.len() != 4 && uci.len() != 5 {
            return Err(ParseUciMoveError);
        }

        let from = Square::from_ascii(&uci[0..2]).map_err(|_| ParseUciMoveError)?;
        let to = Square::from_ascii(&uci[2..4]).map_err(|_| ParseUciMoveError)?;

        let promotion = match uci.get(4) {
            Some(&ch) => match Role::from_char(char::from(ch)) {
                Some(role) if Role::PROMOTIONS.contains(&role) => Some(role),
                _ => return Err(ParseUciMoveError),
            },
            None => None,
        };

        if from == to {
            return Err(ParseUciMoveError);
        }

        Ok(UciMove {
            from,
            to,
            promotion,
        })
    }

    pub fn from_move(m: &Move) -> UciMove {
        UciMove {
            from: m.from(),
            to: m.to(),
            promotion: m.promotion(),
        }
    }

    /// Finds the matching legal move in `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalUciMoveError`] if no legal move of the side to
    /// move matches.
    pub fn to_move(&self, pos: &Position) -> Result<Move, IllegalUciMoveError> {
        let mover = pos
            .piece_at(self.from)
            .filter(|p| p.color == pos.turn())
            .ok_or(IllegalUciMoveError)?;
        pos.legal_moves_for_piece(mover.id)
            .into_iter()
            .find(|m| m.to() == self.to && m.promotion() == self.promotion)
            .ok_or(IllegalUciMoveError)
    }
}

impl From<&Move> for UciMove {
    fn from(m: &Move) -> UciMove {
        UciMove::from_move(m)
    }
}

impl FromStr for UciMove {
    type Err = ParseUciMoveError;

    fn from_str(uci: &str) -> Result<UciMove, ParseUciMoveError> {
        UciMove::from_ascii(uci.as_bytes())
    }
}

impl fmt::Display for UciMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role.char())?;
        }
        Ok(())
    }
}
