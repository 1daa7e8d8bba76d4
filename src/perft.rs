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

//! Count legal move paths.
//!
//! # Examples
//!
//! ```
//! use fianchetto::{perft::perft, Position};
//!
//! let pos = Position::default();
//! assert_eq!(perft(&pos, 1), 20);
//! assert_eq!(perft(&pos, 2), 400);
//! ```

use tracing::debug;

use crate::{uci::UciMove, Position};

/// Counts legal move paths of a given length.
///
/// Paths with mate or stalemate are not counted unless it occurs in the final
/// position. Useful for comparing, testing and debugging move generation
/// correctness and performance.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth < 1 {
        1
    } else {
        let moves = pos.legal_moves();

        if depth == 1 {
            moves.len() as u64
        } else {
            moves
                .iter()
                .map(|m| {
                    let mut child = pos.clone();
                    child.play_unchecked(m);
                    perft(&child, depth - 1)
                })
                .sum()
        }
    }
}

/// Like [`perft()`], but also logs the perft of each child for debugging.
pub fn debug_perft(pos: &Position, depth: u32) -> u64 {
    if depth < 1 {
        1
    } else {
        pos.legal_moves()
            .iter()
            .map(|m| {
                let mut child = pos.clone();
                child.play_unchecked(m);
                let nodes = perft(&child, depth - 1);
                debug!(uci = %UciMove::from_move(m), san = %m, depth = depth - 1, nodes, "perft");
                nodes
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    #[test]
    fn test_promotion_paths() {
        let pos = "4k3/1P6/8/8/8/8/8/4K3 w - - 0 1"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("legal");
        // 4 promotions plus 5 king moves.
        assert_eq!(perft(&pos, 1), 9);
        assert_eq!(debug_perft(&pos, 2), perft(&pos, 2));
    }
}
