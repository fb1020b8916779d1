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

//! Plays whole sessions through the real controller, UI queue and renderer, running
//! the controller's worker on the test thread.
use std::sync::Arc;

use gridbattle::{
    board::Location,
    config::{FirstPlayer, SessionConfig},
    controller::{Controller, GameController, Player, Worker},
    ships::Ship,
    view::{
        BoardRenderer, CellMark, ClickOutcome, ConsoleMessenger, FleetCell, Screen, TargetGuard,
        TargetStyle, UiQueue,
    },
};

struct Harness {
    queue: UiQueue,
    screen: Screen,
    controller: Arc<GameController>,
    worker: Worker,
    renderer: BoardRenderer,
    guard: TargetGuard,
}

impl Harness {
    fn start(first: FirstPlayer, seed: u64) -> Self {
        let queue = UiQueue::new();
        let (controller, worker) = GameController::new(
            SessionConfig {
                first,
                seed: Some(seed),
            },
            Box::new(ConsoleMessenger::new(queue.handle())),
        );
        let renderer = BoardRenderer::new(controller.clone(), queue.handle());
        let guard = renderer.setup().unwrap();
        let mut harness = Self {
            queue,
            screen: Screen::new(),
            controller,
            worker,
            renderer,
            guard,
        };
        harness.pump();
        harness
    }

    /// Alternate between the worker and the UI thread until both are idle.
    fn pump(&mut self) {
        loop {
            let handled = self.worker.run_pending();
            let ran = self.queue.run_pending(&mut self.screen);
            if handled + ran == 0 {
                break;
            }
        }
    }

    fn fleet_cells(&self) -> Vec<FleetCell> {
        self.screen.fleet().iter().map(|(_, cell)| *cell).collect()
    }
}

fn fleet_size() -> usize {
    Ship::ALL.iter().map(|ship| ship.len()).sum()
}

#[test]
fn seeded_game_plays_to_a_winner() {
    let mut game = Harness::start(FirstPlayer::Human, 99);
    let mut fired = Vec::new();
    for loc in Location::all() {
        if game.controller.is_over() {
            break;
        }
        assert!(game.controller.is_my_turn());
        assert_eq!(
            game.renderer.click(&mut game.guard, loc),
            ClickOutcome::Submitted
        );
        fired.push(loc);
        game.pump();
    }

    assert!(game.controller.is_over());
    let target = game.screen.target();
    for loc in &fired {
        assert_ne!(target[*loc], TargetStyle::Untouched);
    }
    let hits = fired
        .iter()
        .filter(|loc| target[**loc] == TargetStyle::Hit)
        .count();

    let cells = game.fleet_cells();
    let struck = cells.iter().filter(|cell| cell.has(CellMark::Struck)).count();
    match game.controller.winner() {
        Some(Player::Human) => {
            assert_eq!(hits, fleet_size());
            assert_eq!(game.screen.status(), "You sank the whole fleet. You win!");
        }
        Some(Player::Computer) => {
            assert_eq!(struck, fleet_size());
            assert_eq!(game.screen.status(), "The computer sank your fleet. You lose.");
        }
        None => panic!("game ended without a winner"),
    }
}

#[test]
fn fleet_grid_tracks_the_computer_shots() {
    let mut game = Harness::start(FirstPlayer::Computer, 5);
    assert!(game.controller.is_my_turn());
    assert!(game.screen.status().starts_with("The computer"));

    for loc in Location::all().take(30) {
        if game.controller.is_over() {
            break;
        }
        game.renderer.click(&mut game.guard, loc);
        game.pump();
    }

    let cells = game.fleet_cells();
    let hull = cells.iter().filter(|cell| cell.has(CellMark::Ship)).count();
    assert_eq!(hull, fleet_size());
    for cell in &cells {
        assert!(!(cell.has(CellMark::Intact) && cell.has(CellMark::Struck)));
        if cell.has(CellMark::Ship) {
            assert!(cell.has(CellMark::Intact) || cell.has(CellMark::Struck));
        } else {
            assert!(cell.marks().is_empty());
        }
    }
    assert_eq!(
        cells.iter().filter(|cell| cell.has(CellMark::BowCap)).count(),
        Ship::ALL.len()
    );
}

#[test]
fn ending_early_drops_the_pending_attack() {
    let mut game = Harness::start(FirstPlayer::Human, 3);
    let loc = Location::new(4, 4);
    assert_eq!(
        game.renderer.click(&mut game.guard, loc),
        ClickOutcome::Submitted
    );
    game.renderer.stop();
    game.pump();

    assert!(game.controller.is_over());
    assert_eq!(game.controller.winner(), None);
    assert_eq!(game.screen.target()[loc], TargetStyle::Untouched);
    assert_eq!(game.screen.status(), "Game ended early.");
}

#[test]
fn same_seed_same_fleet() {
    let first = Harness::start(FirstPlayer::Human, 42);
    let second = Harness::start(FirstPlayer::Human, 42);
    assert_eq!(first.fleet_cells(), second.fleet_cells());
}
