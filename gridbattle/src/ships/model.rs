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
use std::{fmt, sync::Mutex};

use tracing::error;

use crate::{
    lock,
    observer::CellStruckSink,
    ships::{Orientation, Placement, Ship},
};

/// A placed ship in a running game. Tracks which of its cells were hit and tells
/// its registered observers about every new hit.
pub struct ShipModel {
    /// ID of the ship.
    id: Ship,

    /// Where the ship sits.
    placement: Placement,

    /// One flag per covered cell, in placement order.
    hits: Mutex<Vec<bool>>,

    /// Observers notified with the index of each struck cell.
    observers: Mutex<Vec<Box<dyn CellStruckSink>>>,
}

impl ShipModel {
    pub fn new(id: Ship, placement: Placement) -> Self {
        Self {
            id,
            placement,
            hits: Mutex::new(vec![false; placement.len()]),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Get the ID of the ship.
    pub fn id(&self) -> Ship {
        self.id
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn orientation(&self) -> Orientation {
        self.placement.orientation()
    }

    /// Check if this ship has been sunk.
    pub fn sunk(&self) -> bool {
        lock(&self.hits).iter().all(|&hit| hit)
    }

    /// Get whether each covered cell has been hit, in placement order.
    pub fn hits(&self) -> Vec<bool> {
        lock(&self.hits).clone()
    }

    /// Attach an observer that is told about every hit from now on.
    pub fn register(&self, observer: Box<dyn CellStruckSink>) {
        lock(&self.observers).push(observer);
    }

    pub fn observer_count(&self) -> usize {
        lock(&self.observers).len()
    }

    /// Record a hit on the cell at `index` and notify observers. Returns true if the
    /// ship is sunk afterwards. Hitting the same cell twice notifies again.
    pub(crate) fn strike(&self, index: usize) -> bool {
        let sunk = {
            let mut hits = lock(&self.hits);
            if let Some(hit) = hits.get_mut(index) {
                *hit = true;
            }
            hits.iter().all(|&hit| hit)
        };
        for observer in lock(&self.observers).iter() {
            if let Err(err) = observer.cell_struck(index) {
                error!(ship = %self.id, %err, "cell-struck observer rejected a hit");
            }
        }
        sunk
    }
}

impl fmt::Debug for ShipModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ShipModel")
            .field("id", &self.id)
            .field("placement", &self.placement)
            .field("hits", &self.hits())
            .field("observers", &self.observer_count())
            .finish()
    }
}
