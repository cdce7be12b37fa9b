#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for labot adapters.
//!
//! Adapters keep a [`Scene`] up to date by feeding it the navigation
//! events, then hand it to a [`RenderingBackend`] for drawing. Audio cues
//! surface from [`Scene::apply`] so backends can play them without knowing
//! anything about the navigation rules.

use anyhow::Result as AnyResult;
use labot_core::{Algorithm, Cell, CellCoord, Direction, Event, RobotState};
use labot_world::Grid;

/// Opaque RGB color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel intensity.
    pub red: u8,
    /// Green channel intensity.
    pub green: u8,
    /// Blue channel intensity.
    pub blue: u8,
}

impl Color {
    /// Creates a color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Palette shared by every backend.
pub mod palette {
    use super::Color;
    use labot_core::Cell;

    /// Walls.
    pub const WALL: Color = Color::from_rgb_u8(0, 0, 0);
    /// Open corridor cells.
    pub const OPEN: Color = Color::from_rgb_u8(255, 255, 255);
    /// Start cell.
    pub const START: Color = Color::from_rgb_u8(255, 255, 0);
    /// Goal cell.
    pub const GOAL: Color = Color::from_rgb_u8(128, 0, 128);
    /// Robot body.
    pub const ROBOT: Color = Color::from_rgb_u8(0, 0, 255);
    /// Sensing arm touching a walkable neighbour.
    pub const ARM_CLEAR: Color = Color::from_rgb_u8(0, 255, 0);
    /// Sensing arm touching a wall.
    pub const ARM_BLOCKED: Color = Color::from_rgb_u8(255, 0, 0);
    /// Status text after reaching the goal.
    pub const SUCCESS: Color = Color::from_rgb_u8(0, 255, 0);

    /// Fill color for a maze cell.
    #[must_use]
    pub const fn cell(cell: Cell) -> Color {
        match cell {
            Cell::Wall => WALL,
            Cell::Open => OPEN,
            Cell::Start => START,
            Cell::Goal => GOAL,
        }
    }
}

/// Robot body as drawn in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RobotPresentation {
    /// Cell the robot is drawn in.
    pub cell: CellCoord,
    /// Heading used to orient the robot glyph.
    pub heading: Direction,
}

/// Sensing arm reaching toward the neighbour under test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArmPresentation {
    /// Direction the arm points.
    pub direction: Direction,
    /// Whether the arm touched a wall.
    pub blocked: bool,
}

impl ArmPresentation {
    /// Color of the arm.
    #[must_use]
    pub const fn color(&self) -> Color {
        if self.blocked {
            palette::ARM_BLOCKED
        } else {
            palette::ARM_CLEAR
        }
    }
}

/// Progress shown in the status panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneStatus {
    /// The robot is still exploring.
    Running,
    /// The robot reached the goal.
    Completed,
    /// The robot cannot move.
    Stuck,
    /// The adapter stopped stepping before a terminal event.
    Abandoned,
}

/// Audio cues raised while applying events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    /// The robot took a step.
    Step,
}

/// Scene description combining the maze, the robot and the status panel.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Maze being displayed.
    pub grid: Grid,
    /// Strategy named in the status panel.
    pub algorithm: Algorithm,
    /// Robot body.
    pub robot: RobotPresentation,
    /// Arm shown while a probe is in progress.
    pub arm: Option<ArmPresentation>,
    /// Progress shown in the status panel.
    pub status: SceneStatus,
}

impl Scene {
    /// Creates a scene showing `robot` idle inside `grid`.
    #[must_use]
    pub fn new(grid: Grid, algorithm: Algorithm, robot: &RobotState) -> Self {
        Self {
            grid,
            algorithm,
            robot: RobotPresentation {
                cell: robot.position,
                heading: robot.heading,
            },
            arm: None,
            status: SceneStatus::Running,
        }
    }

    /// Updates the scene for `event`, returning a cue to play if any.
    pub fn apply(&mut self, event: &Event) -> Option<Cue> {
        match *event {
            Event::Probing { direction, blocked } => {
                self.arm = Some(ArmPresentation { direction, blocked });
                None
            }
            Event::Moved { cell, heading } => {
                self.robot = RobotPresentation { cell, heading };
                self.arm = None;
                Some(Cue::Step)
            }
            Event::Arrived { .. } => {
                self.arm = None;
                self.status = SceneStatus::Completed;
                None
            }
            Event::Stuck { .. } => {
                self.status = SceneStatus::Stuck;
                None
            }
        }
    }

    /// Marks the scene as abandoned unless it already finished.
    pub fn abandon(&mut self) {
        if self.status == SceneStatus::Running {
            self.status = SceneStatus::Abandoned;
        }
    }

    /// Cell touched by the arm, if it lies inside the maze.
    #[must_use]
    pub fn arm_cell(&self) -> Option<CellCoord> {
        let arm = self.arm?;
        self.grid.neighbor(self.robot.cell, arm.direction)
    }

    /// Cell classification at `cell`, treating the outside as wall.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Cell {
        self.grid.cell_at(cell).unwrap_or(Cell::Wall)
    }

    /// Text shown in the status panel.
    #[must_use]
    pub fn status_line(&self) -> String {
        let side = match self.algorithm {
            Algorithm::LeftHand => "left",
            Algorithm::RightHand => "right",
        };
        match self.status {
            SceneStatus::Running => format!("Following the {side} wall..."),
            SceneStatus::Completed => "Found the way to the goal!".to_owned(),
            SceneStatus::Stuck => "Walled in: no way forward.".to_owned(),
            SceneStatus::Abandoned => format!("Gave up following the {side} wall."),
        }
    }

    /// Title naming the selected strategy.
    #[must_use]
    pub fn title(&self) -> String {
        format!("Labyrinth robot - {} algorithm", self.algorithm)
    }
}

/// Rendering backend capable of presenting labot scenes.
pub trait RenderingBackend {
    /// Draws the current scene.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;

    /// Plays an audio cue.
    ///
    /// Backends without audio ignore cues. Callers treat failures as
    /// non-fatal.
    fn play(&mut self, cue: Cue) -> AnyResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        let grid: Grid = "1 1 1\n1 S Z\n1 1 1\n".parse().expect("maze parses");
        let robot = RobotState::at_start(CellCoord::new(1, 1));
        Scene::new(grid, Algorithm::LeftHand, &robot)
    }

    #[test]
    fn probe_shows_arm_and_move_clears_it() {
        let mut scene = scene();

        let cue = scene.apply(&Event::Probing {
            direction: Direction::North,
            blocked: true,
        });
        assert_eq!(cue, None);
        assert_eq!(scene.arm_cell(), Some(CellCoord::new(0, 1)));
        assert_eq!(scene.arm.map(|arm| arm.color()), Some(palette::ARM_BLOCKED));

        let cue = scene.apply(&Event::Moved {
            cell: CellCoord::new(1, 2),
            heading: Direction::East,
        });
        assert_eq!(cue, Some(Cue::Step));
        assert_eq!(scene.arm, None);
        assert_eq!(scene.robot.cell, CellCoord::new(1, 2));
    }

    #[test]
    fn arm_pointing_outside_has_no_cell() {
        let mut scene = scene();
        scene.robot.cell = CellCoord::new(1, 2);
        let _ = scene.apply(&Event::Probing {
            direction: Direction::East,
            blocked: true,
        });
        assert_eq!(scene.arm_cell(), None);
        assert_eq!(scene.cell(CellCoord::new(1, 3)), Cell::Wall);
    }

    #[test]
    fn status_line_tracks_progress() {
        let mut scene = scene();
        assert_eq!(scene.status_line(), "Following the left wall...");

        let _ = scene.apply(&Event::Arrived {
            cell: CellCoord::new(1, 2),
        });
        assert_eq!(scene.status, SceneStatus::Completed);
        assert_eq!(scene.status_line(), "Found the way to the goal!");

        scene.abandon();
        assert_eq!(scene.status, SceneStatus::Completed);
    }
}
