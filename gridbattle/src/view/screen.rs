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

//! Widget state of the game window: the status line, the attack grid and the fleet
//! grid.
use enumflags2::BitFlags;

use crate::board::{Grid, Location};

/// Style of a cell in the attack grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TargetStyle {
    /// Not yet attacked, or attacked with the result still pending.
    Untouched,
    Hit,
    Miss,
}

impl Default for TargetStyle {
    fn default() -> Self {
        TargetStyle::Untouched
    }
}

/// Visual treatments that can be layered on a fleet cell.
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum CellMark {
    /// Part of a ship.
    Ship = 0b000_0001,
    /// Rounded cap on the bow end of the run.
    BowCap = 0b000_0010,
    /// Rounded cap on the stern end of the run.
    SternCap = 0b000_0100,
    /// The run goes top to bottom rather than left to right.
    Vertical = 0b000_1000,
    /// Marker for a ship cell that hasn't been hit.
    Intact = 0b001_0000,
    /// Marker for a ship cell that has been hit.
    Struck = 0b010_0000,
    /// Treatment for a ship that was already sunk when it was announced.
    Destroyed = 0b100_0000,
}

/// A cell in the fleet grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FleetCell {
    marks: BitFlags<CellMark>,
}

impl FleetCell {
    /// All marks applied to this cell.
    pub fn marks(&self) -> BitFlags<CellMark> {
        self.marks
    }

    pub fn has(&self, mark: CellMark) -> bool {
        self.marks.contains(mark)
    }

    pub fn insert<B: Into<BitFlags<CellMark>>>(&mut self, marks: B) {
        self.marks.insert(marks);
    }

    pub fn remove<B: Into<BitFlags<CellMark>>>(&mut self, marks: B) {
        self.marks.remove(marks);
    }
}

impl Default for FleetCell {
    fn default() -> Self {
        Self {
            marks: BitFlags::empty(),
        }
    }
}

/// Everything shown in the game window. Owned and mutated by the UI thread only.
#[derive(Debug, Default)]
pub struct Screen {
    status: String,
    target: Grid<TargetStyle>,
    fleet: Grid<FleetCell>,
}

impl Screen {
    /// An empty window: blank status, untouched attack grid and an empty fleet grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// The message currently shown on the status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = text.into();
    }

    pub fn target(&self) -> &Grid<TargetStyle> {
        &self.target
    }

    /// Set the style of an attack cell. Out of bounds locations are ignored.
    pub fn set_target(&mut self, loc: Location, style: TargetStyle) {
        if let Some(cell) = self.target.get_mut(loc) {
            *cell = style;
        }
    }

    pub fn fleet(&self) -> &Grid<FleetCell> {
        &self.fleet
    }

    /// Get a fleet cell for modification. Returns `None` if out of bounds.
    pub fn fleet_cell_mut(&mut self, loc: Location) -> Option<&mut FleetCell> {
        self.fleet.get_mut(loc)
    }
}
