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

//! Startup configuration of a game session.
use std::str::FromStr;

use thiserror::Error;

/// Which side fires the first shot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FirstPlayer {
    Human,
    Computer,
    /// Decided by a coin flip from the session RNG.
    Random,
}

impl FromStr for FirstPlayer {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" | "me" => Ok(FirstPlayer::Human),
            "computer" | "bot" => Ok(FirstPlayer::Computer),
            "random" | "rand" => Ok(FirstPlayer::Random),
            _ => Err(ConfigError::InvalidFirstPlayer(s.to_owned())),
        }
    }
}

/// Error produced when the startup arguments can't be turned into a session.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ConfigError {
    #[error("expected at most 2 arguments, got {0}")]
    ArgCount(usize),
    #[error("invalid seed {0:?}, must be a non-negative integer")]
    InvalidSeed(String),
    #[error("invalid first player {0:?}, choose human, computer or random")]
    InvalidFirstPlayer(String),
}

/// How the controller sets up a session.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SessionConfig {
    /// Who fires first.
    pub first: FirstPlayer,
    /// Seed for ship placement and the computer's shots. `None` draws one from the
    /// OS.
    pub seed: Option<u64>,
}

impl SessionConfig {
    /// Interpret the positional startup arguments:
    ///
    /// - no arguments: the human goes first with an unseeded session.
    /// - `SEED`: the human goes first with the given seed.
    /// - `FIRST SEED`: the given player goes first with the given seed.
    ///
    /// Any other number of arguments is an error.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, ConfigError> {
        match args {
            [] => Ok(Self::default()),
            [seed] => Ok(Self {
                first: FirstPlayer::Human,
                seed: Some(parse_seed(seed.as_ref())?),
            }),
            [first, seed] => Ok(Self {
                first: first.as_ref().parse()?,
                seed: Some(parse_seed(seed.as_ref())?),
            }),
            _ => Err(ConfigError::ArgCount(args.len())),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            first: FirstPlayer::Human,
            seed: None,
        }
    }
}

fn parse_seed(seed: &str) -> Result<u64, ConfigError> {
    seed.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidSeed(seed.to_owned()))
}
