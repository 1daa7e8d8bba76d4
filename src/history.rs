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

//! Played moves with undo and redo.

use crate::{
    san::{SanPlus, Suffix},
    Move, Position,
};

/// Moves and the positions they led to, plus a cursor selecting the
/// current position.
///
/// There is always one more position than moves: `positions()[0]` is the
/// starting position and `positions()[i + 1]` is the result of
/// `moves()[i]`. Recording a move while the cursor is not at the end first
/// discards everything after the cursor.
///
/// # Examples
///
/// ```
/// use fianchetto::{history::History, Position};
///
/// let start = Position::default();
/// let mut history = History::new(start.clone());
///
/// let m = start.legal_moves()[0];
/// let mut after = start.clone();
/// after.play_unchecked(&m);
/// history.record(m, after.clone());
///
/// assert_eq!(history.undo(), Some(&start));
/// assert_eq!(history.undo(), None);
/// assert_eq!(history.redo(), Some(&after));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct History {
    moves: Vec<Move>,
    positions: Vec<Position>,
    cursor: usize,
}

impl History {
    pub fn new(start: Position) -> History {
        History {
            moves: Vec::new(),
            positions: vec![start],
            cursor: 0,
        }
    }

    /// Appends a move and its resulting position and moves the cursor to
    /// it. Moves after the cursor are discarded first.
    pub fn record(&mut self, m: Move, position: Position) {
        self.moves.truncate(self.cursor);
        self.positions.truncate(self.cursor + 1);
        self.moves.push(m);
        self.positions.push(position);
        self.cursor += 1;
    }

    /// Steps back one move. Returns `None` at the starting position.
    pub fn undo(&mut self) -> Option<&Position> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Steps forward one move. Returns `None` at the last recorded
    /// position.
    pub fn redo(&mut self) -> Option<&Position> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Moves the cursor to the position after `index` moves. Returns `None`
    /// and leaves the cursor if there is no such position.
    pub fn go_to(&mut self, index: usize) -> Option<&Position> {
        if index >= self.positions.len() {
            return None;
        }
        self.cursor = index;
        Some(self.current())
    }

    pub fn current(&self) -> &Position {
        &self.positions[self.cursor]
    }

    pub fn start(&self) -> &Position {
        &self.positions[0]
    }

    /// Number of moves played up to the current position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.positions.len()
    }

    /// All recorded moves, including those after the cursor.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Moves leading to the current position.
    pub fn played(&self) -> &[Move] {
        &self.moves[..self.cursor]
    }

    /// Last move leading to the current position.
    pub fn last_move(&self) -> Option<&Move> {
        self.played().last()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Label of move `index` with check or checkmate suffix, computed from
    /// the recorded position it led to.
    pub fn san_plus(&self, index: usize) -> Option<SanPlus> {
        let m = self.moves.get(index)?;
        let after = self.positions.get(index + 1)?;
        Some(SanPlus {
            san: m.san(),
            suffix: Suffix::from_position(after),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square;

    fn play(pos: &Position, from: Square, to: Square) -> (Move, Position) {
        let m = pos
            .legal_moves()
            .into_iter()
            .find(|m| m.from() == from && m.to() == to)
            .expect("legal move");
        let mut after = pos.clone();
        after.play_unchecked(&m);
        (m, after)
    }

    #[test]
    fn test_round_trip() {
        let start = Position::default();
        let mut history = History::new(start.clone());

        let mut pos = start.clone();
        for (from, to) in [
            (Square::E2, Square::E4),
            (Square::E7, Square::E5),
            (Square::G1, Square::F3),
        ] {
            let (m, after) = play(&pos, from, to);
            history.record(m, after.clone());
            pos = after;
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.positions().len(), 4);

        while history.undo().is_some() {}
        assert_eq!(history.current(), &start);
        assert!(!history.can_undo());

        while history.redo().is_some() {}
        assert_eq!(history.current(), &pos);
        assert!(!history.can_redo());
        assert_eq!(history.played().len(), 3);
    }

    #[test]
    fn test_branch_on_write() {
        let start = Position::default();
        let mut history = History::new(start.clone());

        let (e4, after_e4) = play(&start, Square::E2, Square::E4);
        history.record(e4, after_e4);
        history.undo();

        let (d4, after_d4) = play(&start, Square::D2, Square::D4);
        history.record(d4, after_d4.clone());

        assert_eq!(history.redo(), None);
        assert_eq!(history.moves(), [d4]);
        assert_eq!(history.current(), &after_d4);
        assert_eq!(history.positions().len(), history.moves().len() + 1);
    }

    #[test]
    fn test_go_to() {
        let start = Position::default();
        let mut history = History::new(start.clone());
        let (m, after) = play(&start, Square::B1, Square::C3);
        history.record(m, after.clone());

        assert_eq!(history.go_to(0), Some(&start));
        assert_eq!(history.go_to(2), None);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.go_to(1), Some(&after));
        assert_eq!(history.last_move(), Some(&m));
    }

    #[test]
    fn test_san_plus() {
        let start = Position::default();
        let mut history = History::new(start.clone());
        let mut pos = start;
        for (from, to) in [
            (Square::F2, Square::F3),
            (Square::E7, Square::E5),
            (Square::G2, Square::G4),
            (Square::D8, Square::H4),
        ] {
            let (m, after) = play(&pos, from, to);
            history.record(m, after.clone());
            pos = after;
        }

        let labels: Vec<String> = (0..history.len())
            .filter_map(|i| history.san_plus(i))
            .map(|san| san.to_string())
            .collect();
        assert_eq!(labels, ["f3", "e5", "g4", "Qh4#"]);
        assert_eq!(history.san_plus(4), None);
    }
}
