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

//! Types that make up the game board.

use std::sync::Arc;

use crate::ships::{Ship, ShipModel};

pub use self::{
    errors::{CannotPlaceReason, CannotShootReason, ShotError},
    grid::Grid,
    location::Location,
    setup::BoardSetup,
};

mod errors;
mod grid;
mod location;
pub mod setup;

/// Number of rows in each player's grids.
pub const NUM_ROWS: usize = 10;
/// Number of columns in each player's grids.
pub const NUM_COLS: usize = 10;

/// A single cell in the player's grid.
#[derive(Debug, Default, Copy, Clone)]
pub(crate) struct Cell {
    /// Slot of the occupying ship in `Board::ships` and the cell's index within that
    /// ship, if any.
    pub(crate) ship: Option<(usize, usize)>,

    /// Whether this cell has been shot previously or not.
    pub(crate) shot: bool,
}

/// Result of a shot on a single player's board.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShotOutcome {
    /// The shot did not hit anything.
    Miss,
    /// The shot hit the given ship, but did not sink it.
    Hit(Ship),
    /// The shot sank the given ship, but the player has more ships left.
    Sunk(Ship),
    /// The shot sank the given ship, and all of the player's ships are now sunk.
    Defeated(Ship),
}

impl ShotOutcome {
    /// Whether the shot struck a ship.
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotOutcome::Miss)
    }
}

/// Represents a single player's board, including their ships and their side of the ocean.
#[derive(Debug)]
pub struct Board {
    /// Grid of cells occupied by ships.
    grid: Grid<Cell>,

    /// The placed ships, in fleet order.
    ships: Vec<Arc<ShipModel>>,
}

impl Board {
    /// Returns true if all of this player's ships have been sunk.
    pub fn defeated(&self) -> bool {
        self.ships.iter().all(|ship| ship.sunk())
    }

    /// Get all ships on this board.
    pub fn ships(&self) -> &[Arc<ShipModel>] {
        &self.ships
    }

    /// Whether the given location has been shot. Out of bounds locations never are.
    pub fn is_shot(&self, loc: Location) -> bool {
        self.grid.get(loc).map_or(false, |cell| cell.shot)
    }

    /// Iterate over the locations that have not been shot yet.
    pub fn unshot(&self) -> impl '_ + Iterator<Item = Location> {
        self.grid
            .iter()
            .filter(|(_, cell)| !cell.shot)
            .map(|(loc, _)| loc)
    }

    /// Fire a shot at this player, returning a result indicating why the shot was aborted
    /// or the result of the shot on this player. A hit is reported to the struck ship,
    /// which notifies its observers.
    pub fn shoot(&mut self, loc: Location) -> Result<ShotOutcome, ShotError> {
        if self.defeated() {
            return Err(ShotError::new(CannotShootReason::AlreadyDefeated, loc));
        }
        let hit = match self.grid.get_mut(loc) {
            None => return Err(ShotError::new(CannotShootReason::OutOfBounds, loc)),
            Some(cell) if cell.shot => {
                return Err(ShotError::new(CannotShootReason::AlreadyShot, loc))
            }
            Some(cell) => {
                cell.shot = true;
                cell.ship
            }
        };
        Ok(match hit {
            None => ShotOutcome::Miss,
            Some((slot, index)) => {
                let ship = &self.ships[slot];
                let sunk = ship.strike(index);
                match ship.id() {
                    id if self.defeated() => ShotOutcome::Defeated(id),
                    id if sunk => ShotOutcome::Sunk(id),
                    id => ShotOutcome::Hit(id),
                }
            }
        })
    }
}
