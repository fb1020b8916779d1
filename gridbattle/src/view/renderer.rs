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

//! Builds both grids, wires the attack grid to the controller and paints the fleet.
use std::sync::Arc;

use enumflags2::BitFlags;
use tracing::debug;

use crate::{
    board::{Grid, Location},
    controller::{Controller, RegisterError},
    observer::PlacementSink,
    ships::{Orientation, ShipModel},
    view::{AttackResultObserver, CellMark, HitObserver, UiHandle},
};

/// Which attack cells the player has already fired at this session. Owned by the
/// UI thread alongside the [`Screen`](crate::view::Screen).
#[derive(Debug, Default)]
pub struct TargetGuard {
    attacked: Grid<bool>,
}

impl TargetGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `loc` was already attacked. Out of bounds locations count as attacked.
    pub fn attacked(&self, loc: Location) -> bool {
        self.attacked.get(loc).copied().unwrap_or(true)
    }

    fn record(&mut self, loc: Location) {
        if let Some(attacked) = self.attacked.get_mut(loc) {
            *attacked = true;
        }
    }
}

/// What happened to a click on an attack cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ClickOutcome {
    /// The attack was sent to the controller.
    Submitted,
    /// Not the player's turn; nothing was sent.
    OutOfTurn,
    /// The cell was attacked before; nothing was sent.
    AlreadyAttacked,
}

/// Connects the two grids of the game window to a controller.
pub struct BoardRenderer {
    controller: Arc<dyn Controller>,
    ui: UiHandle,
}

impl BoardRenderer {
    pub fn new(controller: Arc<dyn Controller>, ui: UiHandle) -> Self {
        Self { controller, ui }
    }

    /// Register an outcome observer for every attack cell, then have the controller
    /// announce the fleet. Returns the guard to pass to [`BoardRenderer::click`].
    pub fn setup(&self) -> Result<TargetGuard, RegisterError> {
        for loc in Location::all() {
            let observer = AttackResultObserver::new(loc, &self.controller, self.ui.clone());
            self.controller.register_target(loc, Box::new(observer))?;
        }
        self.controller.add_ships(self);
        Ok(TargetGuard::new())
    }

    /// Handle activation of an attack cell. Attacks only go out on the player's turn
    /// and at most once per cell; the cell is repainted when the outcome arrives.
    pub fn click(&self, guard: &mut TargetGuard, loc: Location) -> ClickOutcome {
        if !self.controller.is_my_turn() {
            return ClickOutcome::OutOfTurn;
        }
        if guard.attacked(loc) {
            return ClickOutcome::AlreadyAttacked;
        }
        self.controller.attack(loc);
        guard.record(loc);
        ClickOutcome::Submitted
    }

    /// Tell the controller the window is closing.
    pub fn stop(&self) {
        self.controller.end_early();
    }
}

impl PlacementSink for BoardRenderer {
    fn placement_announced(&self, ship: &Arc<ShipModel>) {
        let cells: Vec<Location> = ship.placement().cells().collect();
        let orientation = ship.orientation();
        paint_hull(&self.ui, cells.clone(), orientation);

        let marker = if ship.sunk() {
            debug!(ship = %ship.id(), "announced ship is already sunk");
            CellMark::Destroyed
        } else {
            ship.register(Box::new(HitObserver::new(cells.clone(), self.ui.clone())));
            CellMark::Intact
        };
        self.ui.submit(move |screen| {
            for loc in cells {
                if let Some(cell) = screen.fleet_cell_mut(loc) {
                    cell.insert(marker);
                }
            }
        });
    }
}

/// Give a run of cells the ship background, capping both ends.
fn paint_hull(ui: &UiHandle, cells: Vec<Location>, orientation: Orientation) {
    ui.submit(move |screen| {
        let last = cells.len().saturating_sub(1);
        for (i, loc) in cells.into_iter().enumerate() {
            let mut marks = BitFlags::from(CellMark::Ship);
            if orientation == Orientation::Vertical {
                marks.insert(CellMark::Vertical);
            }
            if i == 0 {
                marks.insert(CellMark::BowCap);
            }
            if i == last {
                marks.insert(CellMark::SternCap);
            }
            if let Some(cell) = screen.fleet_cell_mut(loc) {
                cell.insert(marks);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::atomic::Ordering};

    use super::*;
    use crate::{
        ships::{Placement, Ship},
        testing::RecordingController,
        view::{Screen, TargetStyle, UiQueue},
    };

    fn ship(id: Ship, bow: Location, orientation: Orientation) -> Arc<ShipModel> {
        Arc::new(ShipModel::new(id, Placement::new(bow, orientation, id.len())))
    }

    fn rendered(controller: RecordingController) -> (Arc<RecordingController>, BoardRenderer, UiQueue) {
        let controller = Arc::new(controller);
        let queue = UiQueue::new();
        let renderer = BoardRenderer::new(controller.clone(), queue.handle());
        (controller, renderer, queue)
    }

    #[test]
    fn every_attack_cell_gets_one_observer() {
        let (controller, renderer, _queue) = rendered(RecordingController::default());
        renderer.setup().unwrap();
        assert_eq!(controller.registrations.load(Ordering::SeqCst), 100);
        let registered: HashSet<Location> =
            controller.targets.lock().unwrap().keys().copied().collect();
        assert_eq!(registered, Location::all().collect::<HashSet<_>>());
    }

    #[test]
    fn clicks_out_of_turn_send_nothing() {
        let (controller, renderer, _queue) = rendered(RecordingController::default());
        let mut guard = renderer.setup().unwrap();
        controller.set_my_turn(false);
        assert_eq!(
            renderer.click(&mut guard, Location::new(4, 4)),
            ClickOutcome::OutOfTurn
        );
        assert!(controller.attacks().is_empty());
        assert!(!guard.attacked(Location::new(4, 4)));
    }

    #[test]
    fn each_cell_is_attacked_at_most_once() {
        let (controller, renderer, _queue) = rendered(RecordingController::default());
        let mut guard = renderer.setup().unwrap();
        let loc = Location::new(4, 4);

        controller.set_my_turn(true);
        assert_eq!(renderer.click(&mut guard, loc), ClickOutcome::Submitted);
        controller.set_my_turn(false);
        assert_eq!(renderer.click(&mut guard, loc), ClickOutcome::OutOfTurn);
        controller.set_my_turn(true);
        assert_eq!(renderer.click(&mut guard, loc), ClickOutcome::AlreadyAttacked);
        assert_eq!(controller.attacks(), vec![loc]);
    }

    #[test]
    fn clicks_leave_the_cell_alone_until_the_outcome_arrives() {
        let (controller, renderer, queue) = rendered(RecordingController::default());
        let mut guard = renderer.setup().unwrap();
        let mut screen = Screen::new();
        let loc = Location::new(9, 0);

        controller.set_my_turn(true);
        renderer.click(&mut guard, loc);
        queue.run_pending(&mut screen);
        assert_eq!(screen.target()[loc], TargetStyle::Untouched);

        controller.resolve(loc, false);
        queue.run_pending(&mut screen);
        assert_eq!(screen.target()[loc], TargetStyle::Miss);
        assert_eq!(controller.done_calls(), 1);
    }

    #[test]
    fn live_ship_gets_a_hit_observer_over_its_cells() {
        let cruiser = ship(Ship::Cruiser, Location::new(2, 3), Orientation::Horizontal);
        let (_controller, renderer, queue) =
            rendered(RecordingController::with_ships(vec![cruiser.clone()]));
        renderer.setup().unwrap();
        assert_eq!(cruiser.observer_count(), 1);

        let mut screen = Screen::new();
        queue.run_pending(&mut screen);
        let fleet = screen.fleet();
        for loc in cruiser.placement().cells() {
            assert!(fleet[loc].has(CellMark::Ship));
            assert!(fleet[loc].has(CellMark::Intact));
            assert!(!fleet[loc].has(CellMark::Vertical));
        }
        assert!(fleet[Location::new(2, 3)].has(CellMark::BowCap));
        assert!(!fleet[Location::new(2, 4)].has(CellMark::BowCap));
        assert!(!fleet[Location::new(2, 4)].has(CellMark::SternCap));
        assert!(fleet[Location::new(2, 5)].has(CellMark::SternCap));
        assert!(!fleet[Location::new(2, 6)].has(CellMark::Ship));

        // Index 1 is the middle of the run.
        cruiser.strike(1);
        queue.run_pending(&mut screen);
        let fleet = screen.fleet();
        assert!(fleet[Location::new(2, 4)].has(CellMark::Struck));
        assert!(!fleet[Location::new(2, 4)].has(CellMark::Intact));
        assert!(fleet[Location::new(2, 3)].has(CellMark::Intact));
    }

    #[test]
    fn sunk_ship_is_painted_destroyed_without_an_observer() {
        let destroyer = ship(Ship::Destroyer, Location::new(5, 0), Orientation::Vertical);
        destroyer.strike(0);
        destroyer.strike(1);
        assert!(destroyer.sunk());

        let (_controller, renderer, queue) =
            rendered(RecordingController::with_ships(vec![destroyer.clone()]));
        renderer.setup().unwrap();
        assert_eq!(destroyer.observer_count(), 0);

        let mut screen = Screen::new();
        queue.run_pending(&mut screen);
        for loc in destroyer.placement().cells() {
            let cell = screen.fleet()[loc];
            assert!(cell.has(CellMark::Destroyed));
            assert!(cell.has(CellMark::Vertical));
            assert!(!cell.has(CellMark::Intact));
        }
    }

    #[test]
    fn stop_always_ends_the_session() {
        let (controller, renderer, _queue) = rendered(RecordingController::default());
        renderer.stop();
        renderer.stop();
        assert_eq!(controller.end_early_calls.load(Ordering::SeqCst), 2);
    }
}
