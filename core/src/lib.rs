#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the labot navigation engine.
//!
//! This crate defines the vocabulary that connects the maze world, the
//! wall-follower system and adapters. The world owns an immutable grid of
//! [`Cell`] values, the wall follower advances a [`RobotState`] one probe or
//! move at a time, and the navigation session reports each transition as an
//! [`Event`] that adapters render or sonify without feeding anything back.

mod direction;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use direction::{Direction, Turn, HEADING_COUNT};

/// Heading assigned to the robot when a session starts.
pub const INITIAL_HEADING: Direction = Direction::East;

/// Classification of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Impassable cell.
    Wall,
    /// Free corridor cell.
    Open,
    /// Cell where the robot begins navigating.
    Start,
    /// Cell the robot attempts to reach.
    Goal,
}

impl Cell {
    /// Reports whether the robot may occupy the cell.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Coordinate one step away in the provided direction.
    ///
    /// Returns `None` when the step would produce a negative index. Upper
    /// bounds are the grid's responsibility.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (row_delta, column_delta) = direction.delta();
        Some(Self {
            row: self.row.checked_add_signed(row_delta)?,
            column: self.column.checked_add_signed(column_delta)?,
        })
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Fixed sequence of relative turns probed on every scan.
///
/// Every turn appears exactly once, so a scan that has probed all four
/// entries has tried every neighbour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ScanOrder([Turn; 4]);

impl ScanOrder {
    /// Creates a scan order from explicit turns.
    ///
    /// # Errors
    ///
    /// Returns [`ScanOrderError::RepeatedTurn`] unless `turns` names each of
    /// the four turns once.
    pub fn new(turns: [Turn; 4]) -> Result<Self, ScanOrderError> {
        for (index, turn) in turns.iter().enumerate() {
            if turns[..index].contains(turn) {
                return Err(ScanOrderError::RepeatedTurn(*turn));
            }
        }
        Ok(Self(turns))
    }

    const fn from_distinct(turns: [Turn; 4]) -> Self {
        Self(turns)
    }

    /// Relative turns in probing order.
    #[must_use]
    pub const fn turns(&self) -> [Turn; 4] {
        self.0
    }

    /// Absolute headings probed when facing `heading`, in probing order.
    #[must_use]
    pub fn absolute(&self, heading: Direction) -> [Direction; 4] {
        self.0.map(|turn| heading.turn(turn))
    }

    /// Position of `direction` within the absolute scan for `heading`.
    #[must_use]
    pub fn position(&self, heading: Direction, direction: Direction) -> Option<usize> {
        self.absolute(heading)
            .iter()
            .position(|candidate| *candidate == direction)
    }
}

/// Wall-following strategy selected for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Keep the left hand on the wall: left, forward, right, behind.
    LeftHand,
    /// Keep the right hand on the wall: right, forward, left, behind.
    RightHand,
}

impl Algorithm {
    /// Scan order encoding the strategy's turn priority.
    #[must_use]
    pub const fn scan_order(self) -> ScanOrder {
        match self {
            Self::LeftHand => {
                ScanOrder::from_distinct([Turn::Left, Turn::Forward, Turn::Right, Turn::Behind])
            }
            Self::RightHand => {
                ScanOrder::from_distinct([Turn::Right, Turn::Forward, Turn::Left, Turn::Behind])
            }
        }
    }

    /// Label presented to players.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LeftHand => "left hand",
            Self::RightHand => "right hand",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when an algorithm name is not recognised.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown algorithm `{0}`; expected `left` or `right`")]
pub struct ParseAlgorithmError(String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "left-hand" | "left_hand" | "lefthand" => Ok(Self::LeftHand),
            "right" | "right-hand" | "right_hand" | "righthand" => Ok(Self::RightHand),
            _ => Err(ParseAlgorithmError(value.to_owned())),
        }
    }
}

/// Mutable record describing the robot while it navigates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RobotState {
    /// Cell currently occupied by the robot.
    pub position: CellCoord,
    /// Heading the robot faces; changes only when it moves.
    pub heading: Direction,
    /// Direction under test, `None` while idle.
    pub probing: Option<Direction>,
}

impl RobotState {
    /// Places an idle robot on `start` facing [`INITIAL_HEADING`].
    #[must_use]
    pub const fn at_start(start: CellCoord) -> Self {
        Self {
            position: start,
            heading: INITIAL_HEADING,
            probing: None,
        }
    }
}

/// Presentation-agnostic notifications produced while navigating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// The robot tested the neighbour in `direction`.
    Probing {
        /// Absolute direction that was tested.
        direction: Direction,
        /// Whether the neighbour turned out to be impassable.
        blocked: bool,
    },
    /// The robot stepped into a new cell.
    Moved {
        /// Cell occupied after the move.
        cell: CellCoord,
        /// Heading after the move.
        heading: Direction,
    },
    /// The robot occupies a goal cell; navigation succeeded.
    Arrived {
        /// Goal cell that was reached.
        cell: CellCoord,
    },
    /// Every neighbour is blocked; navigation cannot continue.
    Stuck {
        /// Cell the robot is trapped in.
        cell: CellCoord,
    },
}

impl Event {
    /// Reports whether the event ends the session.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Arrived { .. } | Self::Stuck { .. })
    }
}

impl<'de> Deserialize<'de> for ScanOrder {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let turns = <[Turn; 4]>::deserialize(deserializer)?;
        Self::new(turns).map_err(serde::de::Error::custom)
    }
}

/// Rejected scan order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ScanOrderError {
    /// The turn appears more than once.
    #[error("scan order repeats the {0:?} turn")]
    RepeatedTurn(Turn),
}

/// Failures raised by grid queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The coordinate lies outside the grid.
    #[error("cell {cell} lies outside the {rows}x{columns} grid")]
    OutOfBounds {
        /// Coordinate that was requested.
        cell: CellCoord,
        /// Number of rows in the grid.
        rows: u32,
        /// Number of columns in the grid.
        columns: u32,
    },
    /// The grid contains no cell of the requested kind.
    #[error("grid contains no {0:?} cell")]
    NotFound(Cell),
}
