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

//! Errors used by the `Board` and `BoardSetup`.

use thiserror::Error;

use crate::board::Location;

/// Reason why a ship could not be placed at a given position.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// The ship did not fit in the given direction.
    #[error("insufficient space for the ship at the specified position")]
    InsufficientSpace,
    /// The ship was already placed.
    #[error("specified ship was already placed")]
    AlreadyPlaced,
    /// The space selected overlaps a ship that was already placed.
    #[error("the specified position was already occupied")]
    AlreadyOccupied,
}

/// Reason why a particular cell could not be shot.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotShootReason {
    /// The player being attacked was already defeated.
    #[error("the target player was already defeated")]
    AlreadyDefeated,

    /// The cell selected was out of bounds on the board.
    #[error("the target location is out of bounds")]
    OutOfBounds,

    /// A shot has already been fired at that cell.
    #[error("the target cell was already shot")]
    AlreadyShot,
}

/// Error returned when trying to shoot a cell.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("could not shoot cell {loc}: {reason}")]
pub struct ShotError {
    /// Reason why the cell could not be shot.
    #[source]
    reason: CannotShootReason,

    /// The location of the cell.
    loc: Location,
}

impl ShotError {
    /// Construct a shot error with the given reason for the specified cell.
    pub(super) fn new(reason: CannotShootReason, loc: Location) -> Self {
        Self { reason, loc }
    }

    /// Get the reason the shot failed.
    pub fn reason(&self) -> CannotShootReason {
        self.reason
    }
}
