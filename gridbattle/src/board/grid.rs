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

//! Fixed-size cell storage shared by the setup board, the play board and the
//! screen.

use std::ops::{Index, IndexMut};

use crate::board::{Location, NUM_COLS, NUM_ROWS};

/// A 10x10 grid of cells, stored row-major.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    cells: Box<[T]>,
}

impl<T> Grid<T> {
    /// Build a grid, computing each cell from its location.
    pub fn from_fn(mut init: impl FnMut(Location) -> T) -> Self {
        Self {
            cells: Location::all().map(|loc| init(loc)).collect(),
        }
    }

    /// Convert a location to an index into `cells`. Returns `None` if the location
    /// is out of bounds.
    fn linearize(loc: &Location) -> Option<usize> {
        if loc.in_bounds() {
            Some(loc.row * NUM_COLS + loc.col)
        } else {
            None
        }
    }

    /// Get a reference to the cell at the given [`Location`].
    pub fn get(&self, loc: Location) -> Option<&T> {
        Self::linearize(&loc).and_then(|i| self.cells.get(i))
    }

    /// Get a mutable reference to the cell at the given [`Location`].
    pub fn get_mut(&mut self, loc: Location) -> Option<&mut T> {
        Self::linearize(&loc).and_then(move |i| self.cells.get_mut(i))
    }

    /// Iterate over the rows of the grid. Each row is an iterator over its cells
    /// from left to right.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = &T>> {
        self.cells.chunks(NUM_COLS).map(|row| row.iter())
    }

    /// Iterate over every cell along with its location.
    pub fn iter(&self) -> impl Iterator<Item = (Location, &T)> {
        Location::all().zip(self.cells.iter())
    }
}

impl<T: Default> Default for Grid<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> Index<Location> for Grid<T> {
    type Output = T;

    fn index(&self, loc: Location) -> &Self::Output {
        match self.get(loc) {
            Some(cell) => cell,
            None => panic!("{} is out of bounds for a {}x{} grid", loc, NUM_ROWS, NUM_COLS),
        }
    }
}

impl<T> IndexMut<Location> for Grid<T> {
    fn index_mut(&mut self, loc: Location) -> &mut Self::Output {
        match self.get_mut(loc) {
            Some(cell) => cell,
            None => panic!("{} is out of bounds for a {}x{} grid", loc, NUM_ROWS, NUM_COLS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_follow_their_location() {
        let grid = Grid::from_fn(|loc| (loc.row, loc.col));
        assert_eq!(grid[Location::new(3, 7)], (3, 7));
        assert_eq!(grid.get(Location::new(10, 0)), None);

        let rows: Vec<Vec<_>> = grid.rows().map(|row| row.copied().collect()).collect();
        assert_eq!(rows.len(), NUM_ROWS);
        assert_eq!(rows[4][2], (4, 2));
    }

    #[test]
    fn writes_land_in_place() {
        let mut grid: Grid<bool> = Grid::default();
        grid[Location::new(5, 5)] = true;
        assert_eq!(grid.iter().filter(|(_, hit)| **hit).count(), 1);
        assert!(grid.get_mut(Location::new(0, 10)).is_none());
    }
}
