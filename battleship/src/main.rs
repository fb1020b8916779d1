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
use std::{
    fmt,
    io::{self, BufRead, Write},
    process,
    sync::Arc,
    time::Duration,
};

use anyhow::{anyhow, Context};
use clap::{App, Arg};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use gridbattle::{
    board::{BoardSetup, Location, NUM_COLS, NUM_ROWS},
    config::SessionConfig,
    controller::{Controller, GameController, Player},
    ships::{Orientation, Ship},
    view::{
        BoardRenderer, CellMark, ClickOutcome, ConsoleMessenger, FleetCell, Screen, TargetGuard,
        TargetStyle, UiQueue,
    },
};

/// How long the UI loop waits for controller updates before checking the turn again.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> anyhow::Result<()> {
    let matches = App::new("Battleship")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Command line battleship against the computer.")
        .arg(
            Arg::with_name("ARGS")
                .help("[SEED] or [FIRST_PLAYER SEED]; FIRST_PLAYER is human, computer or random")
                .multiple(true),
        )
        .get_matches();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<&str> = matches
        .values_of("ARGS")
        .map(|values| values.collect())
        .unwrap_or_default();
    let config = match SessionConfig::from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid input! {}", err);
            process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut input = InputReader::new(stdin.lock());
    let fleet = match choose_placements(&mut input).context("reading ship placements")? {
        Some(fleet) => fleet,
        None => return Ok(()),
    };

    let queue = UiQueue::new();
    let mut screen = Screen::new();
    let (controller, worker) = GameController::with_fleet(
        config,
        fleet,
        Box::new(ConsoleMessenger::new(queue.handle())),
    );
    let renderer = BoardRenderer::new(controller.clone(), queue.handle());
    let mut guard = renderer.setup().context("wiring the attack grid")?;
    let worker = worker.spawn().context("starting the controller thread")?;

    let result = play(&renderer, &controller, &queue, &mut screen, &mut guard, &mut input);

    renderer.stop();
    worker
        .join()
        .map_err(|_| anyhow!("controller thread panicked"))?;
    queue.run_pending(&mut screen);
    if controller.is_over() {
        show_screen(&screen);
        match controller.winner() {
            Some(Player::Human) => info!("human won"),
            Some(Player::Computer) => info!("computer won"),
            None => info!("game abandoned"),
        }
    }
    result
}

/// A command typed by the player while placing ships.
enum SetupCommand {
    Place(Ship, Location, Orientation),
    Unplace(Ship),
    Clear,
    Done,
    Help,
    Quit,
}

/// Let the player place their fleet. Returns `None` if they quit. Ships left unplaced
/// are placed at random when the game starts.
fn choose_placements(input: &mut InputReader<impl BufRead>) -> io::Result<Option<BoardSetup>> {
    let mut setup = BoardSetup::new();
    println!("Place your ships. Type help or ? for commands.");
    loop {
        println!();
        if setup.ready() {
            println!("All ships placed, type done to start the game.");
        } else {
            let pending: Vec<&str> = setup.pending_ships().map(Ship::name).collect();
            println!("Remaining ships to place: {}", pending.join(", "));
            println!("Type done to place them at random and start the game.");
        }
        println!("Your current board setup:");
        show_setup_board(&setup);
        println!();

        let command = match input.read_input_lower("> ", parse_setup_command)? {
            Some(command) => command,
            None => return Ok(None),
        };
        match command {
            SetupCommand::Place(ship, bow, orientation) => {
                if setup.get_placement(ship).is_some() {
                    setup.unplace_ship(ship);
                }
                if let Err(reason) = setup.place_ship(ship, bow, orientation) {
                    println!("Invalid placement: {}.", reason);
                }
            }
            SetupCommand::Unplace(ship) => {
                if setup.unplace_ship(ship).is_none() {
                    println!("The {} isn't placed.", ship);
                }
            }
            SetupCommand::Clear => {
                for ship in Ship::ALL {
                    setup.unplace_ship(*ship);
                }
            }
            SetupCommand::Done => return Ok(Some(setup)),
            SetupCommand::Help => print_setup_help(),
            SetupCommand::Quit => return Ok(None),
        }
    }
}

/// Parse one line of setup input. Prints the problem and returns `None` if it's not a
/// valid command.
fn parse_setup_command(input: &str) -> Option<SetupCommand> {
    static PLACE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?x)(?:place|put)\s+
        (?P<ship>\w+)\s+
        (?:(?:at|on)\s+)?
        (?P<row>[0-9]+)(?:\s*,\s*|\s+)(?P<col>[0-9]+)\s+
        (?P<dir>\w+)$",
        )
        .unwrap()
    });
    static UNPLACE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?x)(?:un-?place|remove)\s+
        (?P<ship>\w+)$",
        )
        .unwrap()
    });

    match input {
        "?" | "help" | "h" => Some(SetupCommand::Help),
        "quit" | "exit" | "q" => Some(SetupCommand::Quit),
        "done" | "start" => Some(SetupCommand::Done),
        "clear" => Some(SetupCommand::Clear),
        other => {
            if let Some(captures) = PLACE.captures(other) {
                let ship = parse_ship(&captures["ship"])?;
                let row = parse_index(&captures["row"], "row", NUM_ROWS)?;
                let col = parse_index(&captures["col"], "col", NUM_COLS)?;
                let orientation = match &captures["dir"] {
                    "h" | "horizontal" | "across" | "right" => Orientation::Horizontal,
                    "v" | "vertical" | "down" => Orientation::Vertical,
                    dir => {
                        println!("invalid direction: {}, choose \"across\" or \"down\"", dir);
                        return None;
                    }
                };
                Some(SetupCommand::Place(ship, Location::new(row, col), orientation))
            } else if let Some(captures) = UNPLACE.captures(other) {
                parse_ship(&captures["ship"]).map(SetupCommand::Unplace)
            } else {
                println!("Invalid command \"{}\". Use '?' for help", other);
                None
            }
        }
    }
}

/// Look a ship up by name or hull classification.
fn parse_ship(text: &str) -> Option<Ship> {
    let ship = Ship::ALL
        .iter()
        .copied()
        .find(|ship| ship.name() == text || ship.abbrev() == text);
    if ship.is_none() {
        let names: Vec<&str> = Ship::ALL.iter().copied().map(Ship::name).collect();
        println!("invalid ship: {}, choose one of {}", text, names.join(", "));
    }
    ship
}

fn print_setup_help() {
    println!(
        "Available Commands:
    place <ship> <row>,<col> <dir>  place the ship with its bow at the given cell.
        Directions are \"across\" (or \"h\") and \"down\" (or \"v\").
    unplace <ship>                  clear the placement of the ship.
    clear                           clear all placements.
    done                            start the game, placing any remaining ships at random.
    quit                            leave the game.

Available Ships:"
    );
    for ship in Ship::ALL {
        println!("    {:<12} ({}, length {})", ship.name(), ship.abbrev(), ship.len());
    }
}

/// A command typed by the player.
enum Command {
    Fire(Location),
    Help,
    Quit,
}

/// Run the UI loop until the game is over or the player quits.
fn play(
    renderer: &BoardRenderer,
    controller: &Arc<GameController>,
    queue: &UiQueue,
    screen: &mut Screen,
    guard: &mut TargetGuard,
    input: &mut InputReader<impl BufRead>,
) -> anyhow::Result<()> {
    println!("Type help or ? for commands.");
    loop {
        queue.run_pending(screen);
        if controller.is_over() {
            return Ok(());
        }
        if !sync_turn(controller, queue, screen) {
            queue.run_next_timeout(screen, POLL_INTERVAL);
            continue;
        }

        println!();
        show_screen(screen);
        let command = match input.read_input_lower("> ", parse_command)? {
            Some(command) => command,
            None => return Ok(()),
        };
        match command {
            Command::Fire(loc) => match renderer.click(guard, loc) {
                ClickOutcome::Submitted => debug!(%loc, "attack submitted"),
                outcome => debug!(%loc, ?outcome, "click suppressed"),
            },
            Command::Help => print_help(),
            Command::Quit => return Ok(()),
        }
    }
}

/// Returns true if it's the player's turn, after running every UI task queued so
/// far. The controller queues its updates for a turn before handing the turn over, so
/// the screen is current for the turn once this returns true.
fn sync_turn(controller: &GameController, queue: &UiQueue, screen: &mut Screen) -> bool {
    if !controller.is_my_turn() {
        return false;
    }
    queue.run_pending(screen);
    true
}

/// Parse one line of input. Prints the problem and returns `None` if it's not a valid
/// command.
fn parse_command(input: &str) -> Option<Command> {
    static FIRE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?x)(?:fire|f|shoot|attack)\s+
        (?P<row>[0-9]+)(?:\s*,\s*|\s+)(?P<col>[0-9]+)$",
        )
        .unwrap()
    });

    match input {
        "?" | "help" | "h" => Some(Command::Help),
        "quit" | "exit" | "q" => Some(Command::Quit),
        other => {
            let captures = match FIRE.captures(other) {
                Some(captures) => captures,
                None => {
                    println!("Invalid command \"{}\". Use '?' for help", other);
                    return None;
                }
            };
            let row = parse_index(&captures["row"], "row", NUM_ROWS)?;
            let col = parse_index(&captures["col"], "col", NUM_COLS)?;
            Some(Command::Fire(Location::new(row, col)))
        }
    }
}

fn parse_index(text: &str, name: &str, limit: usize) -> Option<usize> {
    match text.parse() {
        Ok(value) if value < limit => Some(value),
        _ => {
            println!("{} must be in range [0,{}], got {}", name, limit - 1, text);
            None
        }
    }
}

fn print_help() {
    println!(
        "Available Commands:
    fire <row>,<col>    fire at the given cell of the computer's grid.
    help                show this message.
    quit                leave the game."
    );
}

/// Print the attack grid, the status line and the fleet grid.
fn show_screen(screen: &Screen) {
    println!("Computer's waters:");
    show_board(screen.target().rows().map(|row| row.map(|style| TargetGlyph(*style))));
    println!();
    println!("{}", screen.status());
    println!();
    println!("Your fleet:");
    show_board(screen.fleet().rows().map(|row| row.map(|cell| FleetGlyph(*cell))));
}

/// Show the board by printing the grid. Takes an iterator over the rows of iterators over
/// the items
fn show_board(rows: impl Iterator<Item = impl Iterator<Item = impl fmt::Display>>) {
    print!("   ");
    for i in 0..NUM_COLS {
        print!("{:^4}", i);
    }
    println!();
    for (i, row) in rows.enumerate() {
        print!("{:>2} ", i);
        for cell in row {
            print!("{:^4}", cell);
        }
        println!();
    }
}

/// Print the board as placed so far, showing each ship's hull classification.
fn show_setup_board(setup: &BoardSetup) {
    show_board((0..NUM_ROWS).map(move |row| {
        (0..NUM_COLS).map(move |col| SetupGlyph(setup.get(Location::new(row, col))))
    }));
}

/// Display helper for a cell of the setup board.
struct SetupGlyph(Option<Ship>);

impl fmt::Display for SetupGlyph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(ship) => f.pad(ship.abbrev()),
            None => f.pad("~~"),
        }
    }
}

/// Display helper for a cell of the attack grid.
struct TargetGlyph(TargetStyle);

impl fmt::Display for TargetGlyph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self.0 {
            TargetStyle::Untouched => "~~",
            TargetStyle::Hit => "X",
            TargetStyle::Miss => "o",
        })
    }
}

/// Display helper for a cell of the fleet grid. Caps show the ends of each hull.
struct FleetGlyph(FleetCell);

impl fmt::Display for FleetGlyph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cell = &self.0;
        if !cell.has(CellMark::Ship) {
            return f.pad("~~");
        }
        let vertical = cell.has(CellMark::Vertical);
        let open = match (cell.has(CellMark::BowCap), vertical) {
            (true, false) => "<",
            (true, true) => "^",
            (false, _) => "=",
        };
        let close = match (cell.has(CellMark::SternCap), vertical) {
            (true, false) => ">",
            (true, true) => "v",
            (false, _) => "=",
        };
        let marker = if cell.has(CellMark::Destroyed) {
            "#"
        } else if cell.has(CellMark::Struck) {
            "x"
        } else if cell.has(CellMark::Intact) {
            "o"
        } else {
            " "
        };
        f.pad(&format!("{}{}{}", open, marker, close))
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker. Returns `None` at end of input.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<Option<T>>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            if !self.read_input_inner(prompt)? {
                return Ok(None);
            }
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(Some(val));
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line. Returns
    /// false at end of input.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<bool> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            return Ok(false);
        }
        Ok(true)
    }
}
