#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Navigation session that drives the wall follower to completion.
//!
//! A [`Session`] owns the grid, the selected [`Algorithm`] and the single
//! mutable [`RobotState`]. Every call to [`Session::step`] advances the
//! wall follower by one transition and reports it as a presentation-agnostic
//! [`Event`]. Pacing belongs to the caller; nothing here blocks.

use labot_core::{Algorithm, Cell, Event, GridError, RobotState};
use labot_system_wall_follower::{Transition, WallFollower};
use labot_world::Grid;
use thiserror::Error;
use tracing::{debug, info};

/// Reasons a session cannot be started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The grid lacks a start or goal cell.
    #[error("cannot start navigation: {0}")]
    Grid(#[from] GridError),
}

/// How a bounded run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// The robot reached a goal cell.
    Arrived,
    /// The robot is walled in.
    Stuck,
    /// The step budget ran out before a terminal event.
    Exhausted,
}

/// Result of [`Session::run`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Outcome {
    /// Terminal status of the run.
    pub status: Status,
    /// Every event emitted during the run, in order.
    pub events: Vec<Event>,
}

impl Outcome {
    /// Number of moves contained in the event log.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::Moved { .. }))
            .count()
    }
}

/// Single navigation attempt through a maze.
#[derive(Clone, Debug)]
pub struct Session {
    grid: Grid,
    algorithm: Algorithm,
    follower: WallFollower,
    robot: RobotState,
    terminal: Option<Event>,
    steps: u64,
    moves: u64,
}

impl Session {
    /// Places the robot on the grid's start cell facing east.
    ///
    /// Fails when the grid has no start cell or no goal cell.
    pub fn start(grid: Grid, algorithm: Algorithm) -> Result<Self, SessionError> {
        let start = grid.find(Cell::Start)?;
        let goal = grid.find(Cell::Goal)?;
        info!(
            %algorithm,
            %start,
            %goal,
            rows = grid.rows(),
            columns = grid.columns(),
            "navigation session started"
        );

        Ok(Self {
            follower: WallFollower::for_algorithm(algorithm),
            robot: RobotState::at_start(start),
            grid,
            algorithm,
            terminal: None,
            steps: 0,
            moves: 0,
        })
    }

    /// Advances the robot by one probe or move.
    ///
    /// Once a terminal event has been produced it is returned again on every
    /// subsequent call and the robot no longer changes.
    pub fn step(&mut self) -> Event {
        if let Some(terminal) = self.terminal {
            return terminal;
        }

        let transition = self.follower.advance(&self.grid, &mut self.robot);
        self.steps += 1;

        let event = match transition {
            Transition::Probed {
                turn,
                direction,
                blocked,
            } => {
                debug!(?turn, %direction, blocked, at = %self.robot.position, "probe");
                Event::Probing { direction, blocked }
            }
            Transition::Moved { from, to, heading } => {
                self.moves += 1;
                debug!(%from, %to, %heading, "move");
                Event::Moved { cell: to, heading }
            }
            Transition::Arrived { cell } => {
                info!(algorithm = %self.algorithm, %cell, moves = self.moves, "goal reached");
                Event::Arrived { cell }
            }
            Transition::Stuck { cell } => {
                info!(algorithm = %self.algorithm, %cell, moves = self.moves, "robot is walled in");
                Event::Stuck { cell }
            }
        };

        if event.is_terminal() {
            self.terminal = Some(event);
        }
        event
    }

    /// Reports whether the session produced `Arrived` or `Stuck`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    /// Steps until a terminal event or until `max_steps` transitions ran.
    pub fn run(&mut self, max_steps: usize) -> Outcome {
        let mut events = Vec::new();
        for _ in 0..max_steps {
            let event = self.step();
            events.push(event);
            match event {
                Event::Arrived { .. } => {
                    return Outcome {
                        status: Status::Arrived,
                        events,
                    }
                }
                Event::Stuck { .. } => {
                    return Outcome {
                        status: Status::Stuck,
                        events,
                    }
                }
                Event::Probing { .. } | Event::Moved { .. } => {}
            }
        }

        debug!(max_steps, "step budget exhausted");
        Outcome {
            status: Status::Exhausted,
            events,
        }
    }

    /// Current robot state.
    #[must_use]
    pub fn robot(&self) -> &RobotState {
        &self.robot
    }

    /// Grid being navigated.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Strategy selected for the session.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Transitions taken so far, excluding repeated terminal reports.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Moves taken so far.
    #[must_use]
    pub fn moves(&self) -> u64 {
        self.moves
    }
}
