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
use crate::{observer::ConsoleWriter, view::UiHandle};

/// Shows the controller's latest message on the screen's status line.
#[derive(Debug, Clone)]
pub struct ConsoleMessenger {
    ui: UiHandle,
}

impl ConsoleMessenger {
    pub fn new(ui: UiHandle) -> Self {
        Self { ui }
    }
}

impl ConsoleWriter for ConsoleMessenger {
    fn write(&self, text: &str) {
        let text = text.to_owned();
        self.ui.submit(move |screen| screen.set_status(text));
    }
}
