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

//! Observers the renderer hands to the controller.
use std::sync::{Arc, Weak};

use tracing::debug;

use crate::{
    board::Location,
    controller::Controller,
    observer::{AttackOutcomeSink, CellStruckSink, StruckIndexError},
    view::{CellMark, TargetStyle, UiHandle},
};

/// Recolors one attack cell once the outcome of the attack on it is known, then
/// hands the turn back to the controller.
pub struct AttackResultObserver {
    location: Location,
    /// The controller stores this observer, so only hold it weakly.
    controller: Weak<dyn Controller>,
    ui: UiHandle,
}

impl AttackResultObserver {
    pub fn new(location: Location, controller: &Arc<dyn Controller>, ui: UiHandle) -> Self {
        Self {
            location,
            controller: Arc::downgrade(controller),
            ui,
        }
    }
}

impl AttackOutcomeSink for AttackResultObserver {
    fn attack_resolved(&self, hit: bool) {
        let location = self.location;
        let controller = self.controller.clone();
        self.ui.submit(move |screen| {
            let style = if hit { TargetStyle::Hit } else { TargetStyle::Miss };
            screen.set_target(location, style);
            match controller.upgrade() {
                Some(controller) => controller.done(),
                None => debug!(%location, "controller is gone, turn not handed back"),
            }
        });
    }
}

/// Marks the cells of one ship as they get hit. Cells are in placement order, so
/// index `i` of a hit is the `i`th cell from the bow.
pub struct HitObserver {
    cells: Vec<Location>,
    ui: UiHandle,
}

impl HitObserver {
    pub fn new(cells: Vec<Location>, ui: UiHandle) -> Self {
        Self { cells, ui }
    }
}

impl CellStruckSink for HitObserver {
    fn cell_struck(&self, index: usize) -> Result<(), StruckIndexError> {
        let loc = *self.cells.get(index).ok_or(StruckIndexError {
            index,
            len: self.cells.len(),
        })?;
        self.ui.submit(move |screen| {
            if let Some(cell) = screen.fleet_cell_mut(loc) {
                cell.remove(CellMark::Intact);
                cell.insert(CellMark::Struck);
            }
        });
        Ok(())
    }
}
