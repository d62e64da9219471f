//! The four seats and their fixed rotation.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    East,
    South,
    West,
    North,
}

impl Seat {
    /// Rotation order.
    pub const ALL: [Seat; 4] = [Seat::East, Seat::South, Seat::West, Seat::North];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Seat {
        Seat::ALL[(self.index() + 1) % 4]
    }

    /// Seats in turn order, starting from `self`.
    pub fn rotation(self) -> impl Iterator<Item = Seat> {
        (0..4).map(move |offset| Seat::ALL[(self.index() + offset) % 4])
    }

    /// Display name relative to the human seat: "Player", "CPU1".."CPU3".
    pub fn label(self, human: Seat) -> String {
        let offset = (self.index() + 4 - human.index()) % 4;
        match offset {
            0 => "Player".to_string(),
            n => format!("CPU{}", n),
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Seat::East => "east",
            Seat::South => "south",
            Seat::West => "west",
            Seat::North => "north",
        };
        f.write_str(name)
    }
}
