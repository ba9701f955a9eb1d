//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D position in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Offset this position, or `None` if either coordinate would overflow.
    pub fn checked_add(&self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// Step one cell in the given direction. The result may lie outside any world.
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.to_delta();
        self.add(dx, dy)
    }

    /// The surrounding positions, in no particular order.
    ///
    /// Yields eight positions except at the limits of `i32`, where offsets
    /// that would overflow are left out.
    pub fn neighbours(&self) -> impl Iterator<Item = Position> + '_ {
        Direction::all().into_iter().filter_map(move |d| {
            let (dx, dy) = d.to_delta();
            self.checked_add(dx, dy)
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Compass directions of the Moore neighbourhood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    pub fn all() -> [Direction; 8] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::NorthEast,
            Direction::NorthWest,
            Direction::SouthEast,
            Direction::SouthWest,
        ]
    }
}

/// Birth/survival rule applied by every generation step.
///
/// Survival is the same for both variants: a live cell stays alive with two
/// or three live neighbours. They differ only in the birth threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Dead cells with more than two live neighbours are born.
    #[default]
    Extended,
    /// Canonical B3/S23: dead cells with exactly three live neighbours are born.
    Conway,
}

impl Rule {
    /// Compute a cell's next state from its current state and live neighbour count.
    pub fn next_state(&self, alive: bool, neighbours: usize) -> bool {
        match (alive, neighbours) {
            // Death, due to loneliness or overcrowding
            (true, n) if n < 2 || n > 3 => false,
            (true, _) => true,
            (false, n) => match self {
                Rule::Extended => n > 2,
                Rule::Conway => n == 3,
            },
        }
    }
}
