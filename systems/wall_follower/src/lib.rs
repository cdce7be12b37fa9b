#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wall-following system that advances a robot one probe or move at a time.
//!
//! The system holds nothing but the scan order chosen for the session. Each
//! call to [`WallFollower::advance`] inspects the robot, performs exactly one
//! transition and reports it. Which turn to probe next is recovered from the
//! robot's `probing` field, so the robot state alone describes where a scan
//! stands between calls.
//!
//! The first walkable neighbour in scan order wins. Mazes whose walls form
//! islands can keep the robot circling forever; the system does not detect
//! this.

use labot_core::{Algorithm, Cell, CellCoord, Direction, RobotState, ScanOrder, Turn};
use labot_world::Grid;

/// Single step taken by the wall follower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// A neighbour was tested.
    Probed {
        /// Relative turn that produced the tested direction.
        turn: Turn,
        /// Absolute direction that was tested.
        direction: Direction,
        /// Whether the neighbour is a wall or lies outside the grid.
        blocked: bool,
    },
    /// The robot stepped into the previously probed neighbour.
    Moved {
        /// Cell occupied before the move.
        from: CellCoord,
        /// Cell occupied after the move.
        to: CellCoord,
        /// Heading after the move.
        heading: Direction,
    },
    /// The robot occupies a goal cell.
    Arrived {
        /// Goal cell occupied by the robot.
        cell: CellCoord,
    },
    /// Every turn in the scan order is blocked.
    Stuck {
        /// Cell the robot cannot leave.
        cell: CellCoord,
    },
}

impl Transition {
    /// Reports whether no further progress is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Arrived { .. } | Self::Stuck { .. })
    }
}

/// Pure stepping function parameterised by a fixed scan order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallFollower {
    scan_order: ScanOrder,
}

impl WallFollower {
    /// Creates a wall follower that probes turns in `scan_order`.
    #[must_use]
    pub const fn new(scan_order: ScanOrder) -> Self {
        Self { scan_order }
    }

    /// Creates a wall follower for the provided strategy.
    #[must_use]
    pub const fn for_algorithm(algorithm: Algorithm) -> Self {
        Self::new(algorithm.scan_order())
    }

    /// Scan order used by the follower.
    #[must_use]
    pub const fn scan_order(&self) -> ScanOrder {
        self.scan_order
    }

    /// Performs the next probe or move for `robot`.
    ///
    /// An idle robot probes the first turn of the scan order. A robot whose
    /// last probe found a walkable neighbour moves there, clears `probing`
    /// and adopts the probed direction as its heading. Otherwise the next
    /// turn is probed, and once all four are exhausted the robot is stuck.
    /// A robot standing on a goal cell reports arrival without changing.
    pub fn advance(&self, grid: &Grid, robot: &mut RobotState) -> Transition {
        let position = robot.position;
        if grid.cell_at(position) == Ok(Cell::Goal) {
            return Transition::Arrived { cell: position };
        }

        let next_turn = match robot.probing {
            None => 0,
            Some(direction) => {
                if let Some(target) = walkable_neighbor(grid, position, direction) {
                    robot.position = target;
                    robot.heading = direction;
                    robot.probing = None;
                    return Transition::Moved {
                        from: position,
                        to: target,
                        heading: direction,
                    };
                }

                self.scan_order
                    .position(robot.heading, direction)
                    .map_or(0, |index| index + 1)
            }
        };

        let Some(turn) = self.scan_order.turns().get(next_turn).copied() else {
            return Transition::Stuck { cell: position };
        };

        let direction = robot.heading.turn(turn);
        robot.probing = Some(direction);
        Transition::Probed {
            turn,
            direction,
            blocked: walkable_neighbor(grid, position, direction).is_none(),
        }
    }
}

impl From<Algorithm> for WallFollower {
    fn from(algorithm: Algorithm) -> Self {
        Self::for_algorithm(algorithm)
    }
}

fn walkable_neighbor(grid: &Grid, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
    grid.neighbor(cell, direction)
        .filter(|neighbor| grid.is_walkable(*neighbor))
}
