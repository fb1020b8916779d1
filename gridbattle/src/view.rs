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

//! Display layer for a game session.
//!
//! The [`Screen`] is owned by a single UI thread. Everything else in this module
//! may be called from any thread and only ever changes the screen by submitting a
//! task through a [`UiHandle`], which the UI thread runs when it drains its
//! [`UiQueue`].

pub use self::{
    console::ConsoleMessenger,
    observers::{AttackResultObserver, HitObserver},
    queue::{UiHandle, UiQueue, UiTask},
    renderer::{BoardRenderer, ClickOutcome, TargetGuard},
    screen::{CellMark, FleetCell, Screen, TargetStyle},
};

mod console;
mod observers;
mod queue;
mod renderer;
mod screen;
