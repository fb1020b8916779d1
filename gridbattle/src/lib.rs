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

//! Two-player Battleship on a pair of 10x10 grids.
//!
//! The crate is split into the rules engine ([`board`] and [`ships`]), the
//! [`controller`] that runs a session between a human and the computer, and the
//! [`view`] layer that turns controller notifications into cell repaints on a UI
//! thread. The three notification contracts the controller talks to live in
//! [`observer`].

use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod board;
pub mod config;
pub mod controller;
pub mod observer;
pub mod ships;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

/// Lock a mutex, ignoring poisoning. Every guarded value in this crate is left
/// consistent between statements, so a panic elsewhere doesn't invalidate it.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
