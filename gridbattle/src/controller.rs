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

//! The controller boundary: what the display layer may ask of a game session.
//!
//! [`GameController`] is the implementation used by the game, pitting the human
//! player against the computer.

use thiserror::Error;

use crate::{
    board::Location,
    observer::{AttackOutcomeSink, PlacementSink},
};

pub use self::local::{GameController, Player, Worker};

mod local;

/// Operations the display layer invokes on a running game.
pub trait Controller: Send + Sync {
    /// Bind the observer told about the outcome of the attack on `location`. Each cell
    /// may be bound once.
    fn register_target(
        &self,
        location: Location,
        observer: Box<dyn AttackOutcomeSink>,
    ) -> Result<(), RegisterError>;

    /// Whether the local player may attack right now.
    fn is_my_turn(&self) -> bool;

    /// Submit an attack. The outcome is delivered later through the observer
    /// registered for `location`.
    fn attack(&self, location: Location);

    /// Signal that the local player's turn has concluded.
    fn done(&self);

    /// Signal that the session is being abandoned.
    fn end_early(&self);

    /// Announce every ship of the local player's fleet to `sink`.
    fn add_ships(&self, sink: &dyn PlacementSink);
}

/// Error returned when binding an outcome observer fails.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum RegisterError {
    #[error("an observer is already registered for {0}")]
    AlreadyRegistered(Location),
    #[error("{0} is not on the board")]
    OutOfBounds(Location),
}
