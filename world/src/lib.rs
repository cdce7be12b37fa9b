#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Immutable maze grid used by the labot navigation engine.
//!
//! A [`Grid`] is built once, either from the text format handled by the
//! [`loader`] module or from the built-in default layout, and is never
//! mutated afterwards. Sessions borrow it to answer bounds and walkability
//! questions while the robot explores.

pub mod loader;

use std::{fmt, str::FromStr};

use labot_core::{Cell, CellCoord, Direction, GridError};

pub use loader::MazeError;

const DEFAULT_COLUMNS: usize = 10;
const DEFAULT_ROWS: usize = 7;

const W: Cell = Cell::Wall;
const O: Cell = Cell::Open;
const S: Cell = Cell::Start;
const Z: Cell = Cell::Goal;

/// Layout used when no maze source is available.
const DEFAULT_LAYOUT: [[Cell; DEFAULT_COLUMNS]; DEFAULT_ROWS] = [
    [W, W, W, W, W, W, W, W, W, W],
    [W, S, O, O, W, O, O, O, O, W],
    [W, W, W, O, W, O, W, W, O, W],
    [W, O, O, O, O, O, O, W, O, W],
    [W, O, W, W, W, W, O, W, O, W],
    [W, O, O, O, O, O, O, O, Z, W],
    [W, W, W, W, W, W, W, W, W, W],
];

/// Rectangular maze stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: u32,
    columns: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid from explicit rows of cells.
    ///
    /// Every row must contain the same number of cells and the grid must not
    /// be empty. Start and goal cells are not validated here; the text loader
    /// and session construction check those.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, MazeError> {
        let Some(first) = rows.first() else {
            return Err(MazeError::Empty);
        };
        let width = first.len();
        if width == 0 {
            return Err(MazeError::Empty);
        }

        for (index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(MazeError::RaggedRow {
                    line: index + 1,
                    expected: width,
                    found: row.len(),
                });
            }
        }

        let row_count = u32::try_from(rows.len()).map_err(|_| MazeError::TooLarge)?;
        let columns = u32::try_from(width).map_err(|_| MazeError::TooLarge)?;
        Ok(Self {
            rows: row_count,
            columns,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// The seven by ten maze bundled with the application.
    #[must_use]
    pub fn default_maze() -> Self {
        Self {
            rows: DEFAULT_ROWS as u32,
            columns: DEFAULT_COLUMNS as u32,
            cells: DEFAULT_LAYOUT.iter().flatten().copied().collect(),
        }
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Classification of the provided cell.
    pub fn cell_at(&self, cell: CellCoord) -> Result<Cell, GridError> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
            .ok_or(GridError::OutOfBounds {
                cell,
                rows: self.rows,
                columns: self.columns,
            })
    }

    /// Reports whether the cell lies inside the grid and is not a wall.
    #[must_use]
    pub fn is_walkable(&self, cell: CellCoord) -> bool {
        self.cell_at(cell).is_ok_and(Cell::is_walkable)
    }

    /// Neighbouring coordinate in `direction`, if it lies inside the grid.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        cell.step(direction)
            .filter(|neighbor| self.index(*neighbor).is_some())
    }

    /// First cell of the requested kind in row-major order.
    pub fn find(&self, kind: Cell) -> Result<CellCoord, GridError> {
        self.iter()
            .find_map(|(coord, cell)| (cell == kind).then_some(coord))
            .ok_or(GridError::NotFound(kind))
    }

    /// Iterator over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Cell)> + '_ {
        let columns = usize::try_from(self.columns).unwrap_or(usize::MAX);
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (coordinate_of(index, columns), *cell))
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.row() >= self.rows || cell.column() >= self.columns {
            return None;
        }

        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

/// Row-major coordinate of the cell stored at `index`.
///
/// Division happens in `usize`; the quotient and remainder are bounded by the
/// grid's `u32` dimensions.
fn coordinate_of(index: usize, columns: usize) -> CellCoord {
    let columns = columns.max(1);
    let row = u32::try_from(index / columns).unwrap_or(u32::MAX);
    let column = u32::try_from(index % columns).unwrap_or(u32::MAX);
    CellCoord::new(row, column)
}

impl FromStr for Grid {
    type Err = MazeError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        loader::parse(source)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (coord, cell) in self.iter() {
            if coord.column() > 0 {
                f.write_str(" ")?;
            }
            f.write_str(loader::token(cell))?;
            if coord.column() + 1 == self.columns {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
