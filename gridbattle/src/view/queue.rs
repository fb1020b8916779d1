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
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    time::Duration,
};

use tracing::debug;

use crate::view::Screen;

/// A change to the screen, run on the UI thread.
pub type UiTask = Box<dyn FnOnce(&mut Screen) + Send>;

/// Queue of tasks waiting to run on the UI thread. Tasks submitted through the same
/// handle from the same thread run in submission order. There is no ordering between
/// tasks submitted from different threads.
pub struct UiQueue {
    sender: Sender<UiTask>,
    receiver: Receiver<UiTask>,
}

impl UiQueue {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// Get a handle for submitting tasks from any thread.
    pub fn handle(&self) -> UiHandle {
        UiHandle {
            sender: self.sender.clone(),
        }
    }

    /// Run every task queued so far against `screen`. Returns the number run.
    pub fn run_pending(&self, screen: &mut Screen) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.receiver.try_recv() {
            task(screen);
            ran += 1;
        }
        ran
    }

    /// Wait up to `timeout` for one task and run it. Returns false if none arrived.
    pub fn run_next_timeout(&self, screen: &mut Screen, timeout: Duration) -> bool {
        match self.receiver.recv_timeout(timeout) {
            Ok(task) => {
                task(screen);
                true
            }
            // The queue holds its own sender, so it never disconnects.
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }
}

impl Default for UiQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UiQueue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("UiQueue").finish()
    }
}

/// Submits tasks to a [`UiQueue`].
#[derive(Clone)]
pub struct UiHandle {
    sender: Sender<UiTask>,
}

impl UiHandle {
    /// Queue `task` to run on the UI thread. Tasks submitted after the queue is gone
    /// are dropped.
    pub fn submit(&self, task: impl FnOnce(&mut Screen) + Send + 'static) {
        if self.sender.send(Box::new(task)).is_err() {
            debug!("ui queue is gone, dropping task");
        }
    }
}

impl fmt::Debug for UiHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("UiHandle").finish()
    }
}
