use serde::{Deserialize, Serialize};

/// Number of compass headings the robot can face.
pub const HEADING_COUNT: u8 = 4;

/// Compass headings ordered clockwise starting from north.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every heading in clockwise order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Numeric representation in the range `0..4`, clockwise from north.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Builds a heading from any index, wrapping modulo four.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        match index % HEADING_COUNT {
            0 => Self::North,
            1 => Self::East,
            2 => Self::South,
            _ => Self::West,
        }
    }

    /// Row and column delta of a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }

    /// Rotates the heading by `offset` quarter turns clockwise.
    ///
    /// Negative offsets rotate counter-clockwise. The result is always the
    /// floor modulo of `heading + offset`, so `North.rotate(-1)` is `West`
    /// rather than an out-of-range value.
    #[must_use]
    pub fn rotate(self, offset: i8) -> Self {
        let turned = (i16::from(self.index()) + i16::from(offset)).rem_euclid(4);
        Self::from_index(turned as u8)
    }

    /// Rotates the heading by the provided relative turn.
    #[must_use]
    pub fn turn(self, turn: Turn) -> Self {
        self.rotate(turn.offset())
    }

    /// Human readable name of the heading.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Turn relative to the robot's current heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    /// Quarter turn counter-clockwise.
    Left,
    /// Keep the current heading.
    Forward,
    /// Quarter turn clockwise.
    Right,
    /// Half turn.
    Behind,
}

impl Turn {
    /// Offset in quarter turns applied to a heading.
    #[must_use]
    pub const fn offset(self) -> i8 {
        match self {
            Self::Left => -1,
            Self::Forward => 0,
            Self::Right => 1,
            Self::Behind => 2,
        }
    }
}
