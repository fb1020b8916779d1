// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use std::fmt;

use crate::board::{NUM_COLS, NUM_ROWS};

/// The location of a cell in either of a player's grids.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Location {
    /// Vertical position of the cell, counted from the top.
    pub row: usize,
    /// Horizontal position of the cell, counted from the left.
    pub col: usize,
}

impl Location {
    /// Construct a [`Location`] from the given `row` and `col`.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether this location falls inside a 10x10 grid.
    pub fn in_bounds(&self) -> bool {
        self.row < NUM_ROWS && self.col < NUM_COLS
    }

    /// Iterate every location of the grid in row-major order.
    pub fn all() -> impl Iterator<Item = Location> {
        (0..NUM_ROWS).flat_map(|row| (0..NUM_COLS).map(move |col| Location::new(row, col)))
    }
}

impl From<(usize, usize)> for Location {
    /// Construct a [`Location`] from a `(row, col)` pair.
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl From<Location> for (usize, usize) {
    /// Convert the [`Location`] into a `(row, col)` pair.
    fn from(loc: Location) -> Self {
        (loc.row, loc.col)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_row_major() {
        let all: Vec<_> = Location::all().collect();
        assert_eq!(all.len(), NUM_ROWS * NUM_COLS);
        assert_eq!(all[0], Location::new(0, 0));
        assert_eq!(all[1], Location::new(0, 1));
        assert_eq!(all[NUM_COLS], Location::new(1, 0));
        assert_eq!(all[all.len() - 1], Location::new(9, 9));
    }

    #[test]
    fn bounds() {
        assert!(Location::new(9, 9).in_bounds());
        assert!(!Location::new(10, 0).in_bounds());
        assert!(!Location::new(0, 10).in_bounds());
    }
}
