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

//! A session between the local player and a computer opponent that fires at random.
use std::{
    collections::{hash_map::Entry, HashMap},
    io,
    sync::{
        mpsc::{self, Receiver, Sender},
        Arc, Mutex,
    },
    thread::{self, JoinHandle},
};

use rand::{
    distributions::{Distribution, Standard},
    rngs::StdRng,
    seq::IteratorRandom,
    Rng, SeedableRng,
};
use tracing::{debug, error, info, warn};

use crate::{
    board::{Board, BoardSetup, Location, ShotOutcome},
    config::{FirstPlayer, SessionConfig},
    controller::{Controller, RegisterError},
    lock,
    observer::{AttackOutcomeSink, ConsoleWriter, PlacementSink},
    ships::ShipModel,
};

/// Player ID. The local player is always `Human`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Player {
    Human,
    Computer,
}

impl Distribution<Player> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Player {
        if rng.gen() {
            Player::Human
        } else {
            Player::Computer
        }
    }
}

/// Where the session is in the turn cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Turn {
    /// The human may attack.
    Human,
    /// The human's attack is queued for the worker.
    Resolving,
    /// The outcome was reported, waiting for the display to call `done`.
    AwaitingDone,
    /// The computer's shot is queued for the worker.
    Computer,
    /// The given player won.
    Over(Player),
    /// Abandoned before anyone won.
    Ended,
}

/// State guarded by the controller's session lock.
struct Session {
    human: Board,
    computer: Board,
    turn: Turn,
    rng: StdRng,
}

/// Work handed from the controller to its worker.
#[derive(Debug)]
enum Request {
    Attack(Location),
    ComputerTurn,
    EndEarly,
}

/// Controller for a game between the local player and the computer.
///
/// Requests that need game logic are queued and resolved by a [`Worker`], which
/// reports back through the registered observers and the console.
pub struct GameController {
    session: Mutex<Session>,

    /// Outcome observers for the computer's grid, one per cell.
    targets: Mutex<HashMap<Location, Box<dyn AttackOutcomeSink>>>,

    console: Box<dyn ConsoleWriter>,

    requests: Sender<Request>,

    first: Player,
}

impl GameController {
    /// Set up a session: both fleets are placed at random from the session's RNG.
    /// Returns the controller and the worker that must be run for requests to make
    /// progress.
    pub fn new(config: SessionConfig, console: Box<dyn ConsoleWriter>) -> (Arc<Self>, Worker) {
        Self::with_fleet(config, BoardSetup::new(), console)
    }

    /// Set up a session using the human's own placements. Ships still pending in
    /// `fleet` are placed at random from the session's RNG, as is the computer's
    /// whole fleet.
    pub fn with_fleet(
        config: SessionConfig,
        fleet: BoardSetup,
        console: Box<dyn ConsoleWriter>,
    ) -> (Arc<Self>, Worker) {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let first = match config.first {
            FirstPlayer::Human => Player::Human,
            FirstPlayer::Computer => Player::Computer,
            FirstPlayer::Random => rng.gen(),
        };
        let human = complete_board(fleet, &mut rng);
        let computer = complete_board(BoardSetup::new(), &mut rng);

        let (requests, receiver) = mpsc::channel();
        let turn = match first {
            Player::Human => Turn::Human,
            Player::Computer => Turn::Computer,
        };
        info!(?first, seed = ?config.seed, "starting session");

        let controller = Arc::new(Self {
            session: Mutex::new(Session {
                human,
                computer,
                turn,
                rng,
            }),
            targets: Mutex::new(HashMap::new()),
            console,
            requests,
            first,
        });
        match first {
            Player::Human => controller.console.write("Your turn. Pick a target."),
            Player::Computer => {
                controller.console.write("The computer fires first.");
                controller.send(Request::ComputerTurn);
            }
        }
        let worker = Worker {
            controller: controller.clone(),
            requests: receiver,
        };
        (controller, worker)
    }

    /// Which player fired first.
    pub fn first_player(&self) -> Player {
        self.first
    }

    /// Get the status of the game. Returns `None` if nobody has won, otherwise returns
    /// the winner.
    pub fn winner(&self) -> Option<Player> {
        match lock(&self.session).turn {
            Turn::Over(winner) => Some(winner),
            _ => None,
        }
    }

    /// Whether the session has ended, either with a winner or abandoned.
    pub fn is_over(&self) -> bool {
        matches!(lock(&self.session).turn, Turn::Over(_) | Turn::Ended)
    }

    fn send(&self, request: Request) {
        if let Err(mpsc::SendError(request)) = self.requests.send(request) {
            debug!(?request, "controller worker has stopped, dropping request");
        }
    }

    /// Handle one request from the queue. Returns false once the worker should stop.
    fn handle(&self, request: Request) -> bool {
        debug!(?request, "handling request");
        match request {
            Request::Attack(loc) => self.resolve_attack(loc),
            Request::ComputerTurn => self.computer_turn(),
            Request::EndEarly => return false,
        }
        true
    }

    /// Fire the human's shot at the computer's board.
    fn resolve_attack(&self, loc: Location) {
        let outcome = {
            let mut session = lock(&self.session);
            if session.turn != Turn::Resolving {
                warn!(%loc, turn = ?session.turn, "dropping attack that is no longer pending");
                return;
            }
            match session.computer.shoot(loc) {
                Ok(outcome) => {
                    session.turn = match outcome {
                        ShotOutcome::Defeated(_) => Turn::Over(Player::Human),
                        _ => Turn::AwaitingDone,
                    };
                    outcome
                }
                Err(err) => {
                    warn!(%err, "attack rejected");
                    session.turn = Turn::Human;
                    drop(session);
                    self.console.write(&format!("Can't fire at {}: {}.", loc, err.reason()));
                    return;
                }
            }
        };

        let message = match outcome {
            ShotOutcome::Miss => format!("Miss at {}.", loc),
            ShotOutcome::Hit(_) => format!("Hit at {}!", loc),
            ShotOutcome::Sunk(ship) => format!("You sank the computer's {}!", ship),
            ShotOutcome::Defeated(_) => "You sank the whole fleet. You win!".to_owned(),
        };
        self.console.write(&message);

        match lock(&self.targets).get(&loc) {
            Some(observer) => observer.attack_resolved(outcome.is_hit()),
            None => warn!(%loc, "no outcome observer registered"),
        }
    }

    /// Fire the computer's shot at a random unshot cell of the human's board.
    fn computer_turn(&self) {
        let shot = {
            let mut guard = lock(&self.session);
            let session = &mut *guard;
            if session.turn != Turn::Computer {
                debug!(turn = ?session.turn, "skipping computer turn");
                return;
            }
            let target = session.human.unshot().choose(&mut session.rng);
            match target {
                Some(loc) => session.human.shoot(loc).map(|outcome| (loc, outcome)),
                None => {
                    session.turn = Turn::Human;
                    return;
                }
            }
        };

        let next = match shot {
            Ok((loc, outcome)) => {
                let message = match outcome {
                    ShotOutcome::Miss => format!("The computer missed at {}. Your turn.", loc),
                    ShotOutcome::Hit(ship) => {
                        format!("The computer hit your {} at {}. Your turn.", ship, loc)
                    }
                    ShotOutcome::Sunk(ship) => format!("The computer sank your {}! Your turn.", ship),
                    ShotOutcome::Defeated(_) => "The computer sank your fleet. You lose.".to_owned(),
                };
                self.console.write(&message);
                match outcome {
                    ShotOutcome::Defeated(_) => Turn::Over(Player::Computer),
                    _ => Turn::Human,
                }
            }
            Err(err) => {
                error!(%err, "computer shot rejected");
                Turn::Human
            }
        };

        let mut session = lock(&self.session);
        if session.turn == Turn::Computer {
            session.turn = next;
        }
    }
}

impl Controller for GameController {
    fn register_target(
        &self,
        location: Location,
        observer: Box<dyn AttackOutcomeSink>,
    ) -> Result<(), RegisterError> {
        if !location.in_bounds() {
            return Err(RegisterError::OutOfBounds(location));
        }
        match lock(&self.targets).entry(location) {
            Entry::Occupied(_) => Err(RegisterError::AlreadyRegistered(location)),
            Entry::Vacant(entry) => {
                entry.insert(observer);
                Ok(())
            }
        }
    }

    fn is_my_turn(&self) -> bool {
        lock(&self.session).turn == Turn::Human
    }

    fn attack(&self, location: Location) {
        {
            let mut session = lock(&self.session);
            if session.turn != Turn::Human {
                warn!(%location, turn = ?session.turn, "attack out of turn ignored");
                return;
            }
            session.turn = Turn::Resolving;
        }
        self.send(Request::Attack(location));
    }

    fn done(&self) {
        {
            let mut session = lock(&self.session);
            if session.turn != Turn::AwaitingDone {
                debug!(turn = ?session.turn, "done outside of a pending turn ignored");
                return;
            }
            session.turn = Turn::Computer;
        }
        self.send(Request::ComputerTurn);
    }

    fn end_early(&self) {
        let abandoned = {
            let mut session = lock(&self.session);
            match session.turn {
                Turn::Over(_) | Turn::Ended => false,
                _ => {
                    session.turn = Turn::Ended;
                    true
                }
            }
        };
        if abandoned {
            info!("session ended early");
            self.console.write("Game ended early.");
        }
        self.send(Request::EndEarly);
    }

    fn add_ships(&self, sink: &dyn PlacementSink) {
        let ships: Vec<Arc<ShipModel>> = lock(&self.session).human.ships().to_vec();
        for ship in &ships {
            sink.placement_announced(ship);
        }
    }
}

/// Place whatever is left of a fleet at random and start the board.
fn complete_board(mut setup: BoardSetup, rng: &mut StdRng) -> Board {
    setup.place_remaining_randomly(rng);
    match setup.start() {
        Ok(board) => board,
        // place_remaining_randomly only returns once every ship is placed.
        Err(_) => unreachable!(),
    }
}

/// Resolves the requests queued by a [`GameController`].
pub struct Worker {
    controller: Arc<GameController>,
    requests: Receiver<Request>,
}

impl Worker {
    /// Handle requests until the session is ended with `end_early`.
    pub fn run(self) {
        for request in self.requests.iter() {
            if !self.controller.handle(request) {
                break;
            }
        }
        debug!("controller worker stopped");
    }

    /// Run the worker on its own thread.
    pub fn spawn(self) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("game-controller".to_owned())
            .spawn(move || self.run())
    }

    /// Handle every request queued so far on the calling thread, including any queued
    /// while handling. Returns the number handled.
    pub fn run_pending(&self) -> usize {
        let mut handled = 0;
        while let Ok(request) = self.requests.try_recv() {
            handled += 1;
            if !self.controller.handle(request) {
                break;
            }
        }
        handled
    }
}
