//! Terminal backend that draws scenes as text frames.

use std::io::Write;

use anyhow::Result;
use labot_core::{Cell, CellCoord, Direction, Event};
use labot_rendering::{palette, Color, Cue, RenderingBackend, Scene, SceneStatus};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const RESET: &str = "\x1b[0m";
const BELL: &[u8] = b"\x07";

/// Writes frames to any byte sink.
#[derive(Debug)]
pub(crate) struct TextBackend<W> {
    out: W,
    color: bool,
    bell: bool,
    clear: bool,
}

impl<W: Write> TextBackend<W> {
    pub(crate) fn new(out: W, color: bool, bell: bool, clear: bool) -> Self {
        Self {
            out,
            color,
            bell,
            clear,
        }
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, scene: &Scene) -> Result<()> {
        if self.clear {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        self.out
            .write_all(render_frame(scene, self.color).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn play(&mut self, cue: Cue) -> Result<()> {
        match cue {
            Cue::Step if self.bell => {
                self.out.write_all(BELL)?;
                self.out.flush()?;
            }
            Cue::Step => {}
        }
        Ok(())
    }
}

/// Draws the maze, robot, arm and status panel.
pub(crate) fn render_frame(scene: &Scene, color: bool) -> String {
    let mut frame = String::new();
    frame.push_str(&scene.title());
    frame.push('\n');

    let arm_cell = scene.arm_cell();
    for row in 0..scene.grid.rows() {
        let mut glyphs = Vec::new();
        for column in 0..scene.grid.columns() {
            let coord = CellCoord::new(row, column);
            let cell = scene.cell(coord);
            let background = palette::cell(cell);
            let (glyph, foreground) = if coord == scene.robot.cell {
                (heading_glyph(scene.robot.heading), palette::ROBOT)
            } else if let Some(arm) = scene.arm.filter(|_| arm_cell == Some(coord)) {
                (if arm.blocked { 'x' } else { '+' }, arm.color())
            } else {
                (cell_glyph(cell), background)
            };

            if color {
                glyphs.push(paint(&format!("{glyph} "), foreground, background));
            } else {
                glyphs.push(glyph.to_string());
            }
        }

        if color {
            frame.push_str(&glyphs.concat());
        } else {
            frame.push_str(&glyphs.join(" "));
        }
        frame.push('\n');
    }

    let status = scene.status_line();
    if color && scene.status == SceneStatus::Completed {
        frame.push_str(&paint(&status, palette::SUCCESS, palette::WALL));
    } else {
        frame.push_str(&status);
    }
    frame.push('\n');
    frame
}

/// One-line description of an event.
pub(crate) fn describe(event: &Event) -> String {
    match event {
        Event::Probing {
            direction,
            blocked: true,
        } => format!("probe {direction}: blocked"),
        Event::Probing {
            direction,
            blocked: false,
        } => format!("probe {direction}: clear"),
        Event::Moved { cell, heading } => format!("move to {cell} facing {heading}"),
        Event::Arrived { cell } => format!("arrived at {cell}"),
        Event::Stuck { cell } => format!("stuck at {cell}"),
    }
}

const fn cell_glyph(cell: Cell) -> char {
    match cell {
        Cell::Wall => '#',
        Cell::Open => '.',
        Cell::Start => 'S',
        Cell::Goal => 'Z',
    }
}

const fn heading_glyph(heading: Direction) -> char {
    match heading {
        Direction::North => '^',
        Direction::East => '>',
        Direction::South => 'v',
        Direction::West => '<',
    }
}

fn paint(text: &str, foreground: Color, background: Color) -> String {
    format!(
        "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{text}{RESET}",
        foreground.red,
        foreground.green,
        foreground.blue,
        background.red,
        background.green,
        background.blue,
    )
}
