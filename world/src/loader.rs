//! Text format for maze sources.
//!
//! Each non-blank line describes one row as whitespace separated tokens:
//! `0` for an open corridor, `1` for a wall, `S` for the start and `Z` for
//! the goal. Blank lines are ignored.

use labot_core::{Cell, CellCoord};
use thiserror::Error;

use crate::Grid;

const OPEN_TOKEN: &str = "0";
const WALL_TOKEN: &str = "1";
const START_TOKEN: &str = "S";
const GOAL_TOKEN: &str = "Z";

/// Reasons a maze source is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MazeError {
    /// The source contained no cells.
    #[error("maze contains no cells")]
    Empty,
    /// A row had a different number of cells than the first row.
    #[error("row on line {line} has {found} cells, expected {expected}")]
    RaggedRow {
        /// One-based line of the offending row.
        line: usize,
        /// Cell count of the first row.
        expected: usize,
        /// Cell count of the offending row.
        found: usize,
    },
    /// A token was neither an integer nor a known marker.
    #[error("unknown token `{token}` on line {line}, column {column}")]
    UnknownToken {
        /// One-based line containing the token.
        line: usize,
        /// One-based token position within the line.
        column: usize,
        /// Token as it appeared in the source.
        token: String,
    },
    /// An integer token other than `0` or `1`.
    #[error("unsupported cell value {value} on line {line}, column {column}")]
    UnsupportedValue {
        /// One-based line containing the value.
        line: usize,
        /// One-based token position within the line.
        column: usize,
        /// Parsed integer value.
        value: u64,
    },
    /// No `S` token was present.
    #[error("maze has no start cell `S`")]
    MissingStart,
    /// More than one `S` token was present.
    #[error("maze has a second start cell at {second}; the first is at {first}")]
    DuplicateStart {
        /// Start cell encountered first in row-major order.
        first: CellCoord,
        /// Start cell encountered afterwards.
        second: CellCoord,
    },
    /// The maze dimensions do not fit the coordinate space.
    #[error("maze dimensions exceed the supported coordinate range")]
    TooLarge,
}

/// Parses a maze source into a validated grid.
///
/// The grid must be rectangular and contain exactly one start cell. Goal
/// cells are not required here; a session refuses to start without one.
pub fn parse(source: &str) -> Result<Grid, MazeError> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut start: Option<CellCoord> = None;

    for (line_index, line) in source.lines().enumerate() {
        let line_number = line_index + 1;
        let mut row = Vec::new();

        for (token_index, raw) in line.split_whitespace().enumerate() {
            let cell = parse_token(raw, line_number, token_index + 1)?;
            if cell == Cell::Start {
                let coord = coordinate(rows.len(), row.len())?;
                if let Some(first) = start {
                    return Err(MazeError::DuplicateStart {
                        first,
                        second: coord,
                    });
                }
                start = Some(coord);
            }
            row.push(cell);
        }

        if row.is_empty() {
            continue;
        }

        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(MazeError::RaggedRow {
                    line: line_number,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(MazeError::Empty);
    }
    if start.is_none() {
        return Err(MazeError::MissingStart);
    }

    Grid::from_rows(rows)
}

/// Token written for `cell` in the text format.
pub(crate) const fn token(cell: Cell) -> &'static str {
    match cell {
        Cell::Wall => WALL_TOKEN,
        Cell::Open => OPEN_TOKEN,
        Cell::Start => START_TOKEN,
        Cell::Goal => GOAL_TOKEN,
    }
}

fn parse_token(raw: &str, line: usize, column: usize) -> Result<Cell, MazeError> {
    match raw {
        START_TOKEN => return Ok(Cell::Start),
        GOAL_TOKEN => return Ok(Cell::Goal),
        _ => {}
    }

    let unknown = || MazeError::UnknownToken {
        line,
        column,
        token: raw.to_owned(),
    };
    if !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(unknown());
    }

    match raw.parse::<u64>() {
        Ok(0) => Ok(Cell::Open),
        Ok(1) => Ok(Cell::Wall),
        Ok(value) => Err(MazeError::UnsupportedValue {
            line,
            column,
            value,
        }),
        Err(_) => Err(unknown()),
    }
}

fn coordinate(row: usize, column: usize) -> Result<CellCoord, MazeError> {
    let row = u32::try_from(row).map_err(|_| MazeError::TooLarge)?;
    let column = u32::try_from(column).map_err(|_| MazeError::TooLarge)?;
    Ok(CellCoord::new(row, column))
}
