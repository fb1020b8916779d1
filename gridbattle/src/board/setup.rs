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

//! Implements the setup phase of the board.
use std::{collections::BTreeMap, sync::Arc};

use rand::{distributions::Uniform, Rng};
use tracing::debug;

use crate::{
    board::{Board, CannotPlaceReason, Cell, Grid, Location, NUM_COLS, NUM_ROWS},
    ships::{Orientation, Placement, Ship, ShipModel},
};

/// Setup phase for a [`Board`]. Allows placing ships and does not allow shooting.
#[derive(Debug, Clone)]
pub struct BoardSetup {
    /// Grid of the ships occupying each cell.
    grid: Grid<Option<Ship>>,

    /// Placements of every ship placed so far.
    placements: BTreeMap<Ship, Placement>,
}

impl BoardSetup {
    /// Begin setup with an empty board.
    pub fn new() -> Self {
        Self {
            grid: Grid::default(),
            placements: BTreeMap::new(),
        }
    }

    /// Checks if this board is ready to start: every ship in the fleet is placed.
    pub fn ready(&self) -> bool {
        Ship::ALL.iter().all(|ship| self.placements.contains_key(ship))
    }

    /// Get an iterator over the ships which still need to be placed.
    pub fn pending_ships(&self) -> impl '_ + Iterator<Item = Ship> {
        Ship::ALL
            .iter()
            .copied()
            .filter(move |ship| !self.placements.contains_key(ship))
    }

    /// Get the placement of the given ship, if it has been placed.
    pub fn get_placement(&self, ship: Ship) -> Option<&Placement> {
        self.placements.get(&ship)
    }

    /// Get the ship occupying the given cell, if any.
    pub fn get(&self, loc: Location) -> Option<Ship> {
        self.grid.get(loc).copied().flatten()
    }

    /// Check if the given placement would be valid, without attempting to actually
    /// place the ship.
    pub fn check_placement(
        &self,
        ship: Ship,
        bow: Location,
        orientation: Orientation,
    ) -> Result<Placement, CannotPlaceReason> {
        if self.placements.contains_key(&ship) {
            return Err(CannotPlaceReason::AlreadyPlaced);
        }
        let placement = Placement::new(bow, orientation, ship.len());
        if !placement.fits() {
            return Err(CannotPlaceReason::InsufficientSpace);
        }
        if placement.cells().any(|cell| self.grid[cell].is_some()) {
            return Err(CannotPlaceReason::AlreadyOccupied);
        }
        Ok(placement)
    }

    /// Try to place the specified ship at the specified position, returning an
    /// error if placement is not possible.
    pub fn place_ship(
        &mut self,
        ship: Ship,
        bow: Location,
        orientation: Orientation,
    ) -> Result<(), CannotPlaceReason> {
        let placement = self.check_placement(ship, bow, orientation)?;
        // Already ensured that every position is valid and not occupied.
        for cell in placement.cells() {
            self.grid[cell] = Some(ship);
        }
        self.placements.insert(ship, placement);
        Ok(())
    }

    /// Clear the placement of the specified ship. Returns the previous placement of the
    /// ship if any.
    pub fn unplace_ship(&mut self, ship: Ship) -> Option<Placement> {
        self.placements.remove(&ship).map(|placement| {
            for cell in placement.cells() {
                self.grid[cell] = None;
            }
            placement
        })
    }

    /// Place every ship that hasn't been placed yet at a random position.
    pub fn place_remaining_randomly(&mut self, rng: &mut impl Rng) {
        let rows = Uniform::new(0, NUM_ROWS);
        let cols = Uniform::new(0, NUM_COLS);
        for ship in Ship::ALL {
            loop {
                let bow = Location::new(rng.sample(&rows), rng.sample(&cols));
                let orientation = rng.gen();
                match self.place_ship(*ship, bow, orientation) {
                    Ok(()) | Err(CannotPlaceReason::AlreadyPlaced) => break,
                    Err(_) => {}
                }
            }
        }
    }

    /// Tries to finish setup. If all ships are placed, returns a [`Board`] with the
    /// current placements, otherwise returns self.
    pub fn start(self) -> Result<Board, Self> {
        if !self.ready() {
            return Err(self);
        }
        let ships: Vec<Arc<ShipModel>> = self
            .placements
            .iter()
            .map(|(&id, &placement)| Arc::new(ShipModel::new(id, placement)))
            .collect();
        let mut grid: Grid<Cell> = Grid::default();
        for (slot, ship) in ships.iter().enumerate() {
            for (index, loc) in ship.placement().cells().enumerate() {
                grid[loc].ship = Some((slot, index));
            }
        }
        debug!(ships = ships.len(), "board setup complete");
        Ok(Board { grid, ships })
    }
}

impl Default for BoardSetup {
    fn default() -> Self {
        Self::new()
    }
}
