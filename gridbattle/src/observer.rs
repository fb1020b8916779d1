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

//! Notification contracts between the controller and whatever displays the game.
//!
//! Each contract is its own trait rather than one observer generic over the
//! payload. Sinks stored by the controller may be invoked from its worker
//! thread, hence the `Send + Sync` bounds.

use std::sync::Arc;

use thiserror::Error;

use crate::ships::ShipModel;

/// Receives each of the player's ship placements once, during setup.
pub trait PlacementSink {
    fn placement_announced(&self, ship: &Arc<ShipModel>);
}

/// Receives the outcome of the single attack fired at the cell it was registered
/// for.
pub trait AttackOutcomeSink: Send + Sync {
    fn attack_resolved(&self, hit: bool);
}

/// Receives the index, within the ship, of each cell of a ship that gets hit.
pub trait CellStruckSink: Send + Sync {
    fn cell_struck(&self, index: usize) -> Result<(), StruckIndexError>;
}

/// Displays status messages from the controller.
pub trait ConsoleWriter: Send + Sync {
    /// Replace the current message with `text`.
    fn write(&self, text: &str);
}

/// Error returned by a [`CellStruckSink`] given an index past the end of its ship.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("cell index {index} is out of range for a ship of length {len}")]
pub struct StruckIndexError {
    pub index: usize,
    pub len: usize,
}
