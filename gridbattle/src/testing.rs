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

//! Recording doubles for the controller boundary and the notification contracts.
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use crate::{
    board::Location,
    controller::{Controller, RegisterError},
    lock,
    observer::{AttackOutcomeSink, CellStruckSink, ConsoleWriter, PlacementSink, StruckIndexError},
    ships::{Ship, ShipModel},
};

/// Keeps every console message.
#[derive(Default)]
pub(crate) struct ConsoleLog {
    messages: Mutex<Vec<String>>,
}

impl ConsoleLog {
    pub(crate) fn last(&self) -> Option<String> {
        lock(&self.messages).last().cloned()
    }
}

impl ConsoleWriter for Arc<ConsoleLog> {
    fn write(&self, text: &str) {
        lock(&self.messages).push(text.to_owned());
    }
}

/// Keeps the location of every reported attack outcome.
#[derive(Default)]
pub(crate) struct OutcomeLog {
    outcomes: Mutex<Vec<(Location, bool)>>,
}

impl OutcomeLog {
    pub(crate) fn sink(self: &Arc<Self>, loc: Location) -> OutcomeRecorder {
        OutcomeRecorder {
            loc,
            log: self.clone(),
        }
    }

    pub(crate) fn locations(&self) -> Vec<Location> {
        lock(&self.outcomes).iter().map(|(loc, _)| *loc).collect()
    }
}

pub(crate) struct OutcomeRecorder {
    loc: Location,
    log: Arc<OutcomeLog>,
}

impl AttackOutcomeSink for OutcomeRecorder {
    fn attack_resolved(&self, hit: bool) {
        lock(&self.log.outcomes).push((self.loc, hit));
    }
}

/// Keeps every struck index reported to its sinks.
#[derive(Default)]
pub(crate) struct StruckLog {
    indices: Mutex<Vec<usize>>,
}

impl StruckLog {
    pub(crate) fn sink(self: &Arc<Self>, len: usize) -> StruckRecorder {
        StruckRecorder {
            len,
            log: self.clone(),
        }
    }

    pub(crate) fn indices(&self) -> Vec<usize> {
        lock(&self.indices).clone()
    }
}

pub(crate) struct StruckRecorder {
    len: usize,
    log: Arc<StruckLog>,
}

impl CellStruckSink for StruckRecorder {
    fn cell_struck(&self, index: usize) -> Result<(), StruckIndexError> {
        if index >= self.len {
            return Err(StruckIndexError {
                index,
                len: self.len,
            });
        }
        lock(&self.log.indices).push(index);
        Ok(())
    }
}

/// Keeps the ID of every announced ship.
#[derive(Default)]
pub(crate) struct PlacementLog {
    ships: Mutex<Vec<Ship>>,
}

impl PlacementLog {
    pub(crate) fn ships(&self) -> Vec<Ship> {
        lock(&self.ships).clone()
    }
}

impl PlacementSink for PlacementLog {
    fn placement_announced(&self, ship: &Arc<ShipModel>) {
        lock(&self.ships).push(ship.id());
    }
}

/// Controller that records every call made on it instead of playing a game.
#[derive(Default)]
pub(crate) struct RecordingController {
    pub(crate) targets: Mutex<HashMap<Location, Box<dyn AttackOutcomeSink>>>,
    pub(crate) registrations: AtomicUsize,
    pub(crate) attacks: Mutex<Vec<Location>>,
    pub(crate) my_turn: AtomicBool,
    pub(crate) done_calls: AtomicUsize,
    pub(crate) end_early_calls: AtomicUsize,
    pub(crate) ships: Vec<Arc<ShipModel>>,
}

impl RecordingController {
    pub(crate) fn with_ships(ships: Vec<Arc<ShipModel>>) -> Self {
        Self {
            ships,
            ..Self::default()
        }
    }

    pub(crate) fn set_my_turn(&self, my_turn: bool) {
        self.my_turn.store(my_turn, Ordering::SeqCst);
    }

    pub(crate) fn attacks(&self) -> Vec<Location> {
        lock(&self.attacks).clone()
    }

    pub(crate) fn done_calls(&self) -> usize {
        self.done_calls.load(Ordering::SeqCst)
    }

    /// Report an outcome through the observer registered for `loc`.
    pub(crate) fn resolve(&self, loc: Location, hit: bool) {
        if let Some(observer) = lock(&self.targets).get(&loc) {
            observer.attack_resolved(hit);
        }
    }
}

impl Controller for RecordingController {
    fn register_target(
        &self,
        location: Location,
        observer: Box<dyn AttackOutcomeSink>,
    ) -> Result<(), RegisterError> {
        self.registrations.fetch_add(1, Ordering::SeqCst);
        lock(&self.targets).insert(location, observer);
        Ok(())
    }

    fn is_my_turn(&self) -> bool {
        self.my_turn.load(Ordering::SeqCst)
    }

    fn attack(&self, location: Location) {
        lock(&self.attacks).push(location);
    }

    fn done(&self) {
        self.done_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn end_early(&self) {
        self.end_early_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn add_ships(&self, sink: &dyn PlacementSink) {
        for ship in &self.ships {
            sink.placement_announced(ship);
        }
    }
}
