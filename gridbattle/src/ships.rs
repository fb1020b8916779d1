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

//! Types used for defining ships and where they sit on the board.
use std::fmt;

use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

use crate::board::Location;

pub use self::model::ShipModel;

mod model;

/// Ship ID for the standard game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Ship {
    /// Carrier: length 5.
    Carrier,
    /// Battleship: length 4.
    Battleship,
    /// Cruiser: length 3.
    Cruiser,
    /// Submarine: length 3.
    Submarine,
    /// Destroyer: length 2.
    Destroyer,
}

impl Ship {
    /// Every ship in the fleet, largest first.
    pub const ALL: &'static [Ship] = &[
        Ship::Carrier,
        Ship::Battleship,
        Ship::Cruiser,
        Ship::Submarine,
        Ship::Destroyer,
    ];

    /// Get the length of this ship type.
    pub fn len(self) -> usize {
        match self {
            Ship::Carrier => 5,
            Ship::Battleship => 4,
            Ship::Cruiser => 3,
            Ship::Submarine => 3,
            Ship::Destroyer => 2,
        }
    }

    /// Full lowercase name of the ship.
    pub fn name(self) -> &'static str {
        match self {
            Ship::Carrier => "carrier",
            Ship::Battleship => "battleship",
            Ship::Cruiser => "cruiser",
            Ship::Submarine => "submarine",
            Ship::Destroyer => "destroyer",
        }
    }

    /// Two letter hull classification.
    pub fn abbrev(self) -> &'static str {
        match self {
            Ship::Carrier => "cv",
            Ship::Battleship => "bb",
            Ship::Cruiser => "cl",
            Ship::Submarine => "ss",
            Ship::Destroyer => "dd",
        }
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Placement orientation of a ship.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Orientation {
    /// The ship runs left to right from its bow.
    Horizontal,
    /// The ship runs top to bottom from its bow.
    Vertical,
}

impl Distribution<Orientation> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Orientation {
        if rng.gen() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// Where a ship sits: its bow, the direction it runs in, and how long it is.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Placement {
    bow: Location,
    orientation: Orientation,
    len: usize,
}

impl Placement {
    /// Construct a placement. Does not check that the ship fits on the board, use
    /// [`Placement::fits`] for that.
    pub fn new(bow: Location, orientation: Orientation, len: usize) -> Self {
        Self {
            bow,
            orientation,
            len,
        }
    }

    /// Location of the first cell of the ship.
    pub fn bow(&self) -> Location {
        self.bow
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Get an iterator over the cells covered by this placement, bow first: left to
    /// right for horizontal ships, top to bottom for vertical ships.
    pub fn cells(&self) -> impl Iterator<Item = Location> {
        let Placement {
            bow,
            orientation,
            len,
        } = *self;
        (0..len).map(move |step| match orientation {
            Orientation::Horizontal => Location::new(bow.row, bow.col + step),
            Orientation::Vertical => Location::new(bow.row + step, bow.col),
        })
    }

    /// Position of the given location within this placement, if covered.
    pub fn index_of(&self, loc: Location) -> Option<usize> {
        self.cells().position(|cell| cell == loc)
    }

    /// Returns true if every covered cell is on the board.
    pub fn fits(&self) -> bool {
        self.len > 0 && self.cells().all(|cell| cell.in_bounds())
    }
}
