//! Players, grid coordinates, and deployment zones.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two sides in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Red,
    Blue,
}

/// Both players in turn order.
pub const ALL_PLAYERS: [Player; 2] = [Player::Red, Player::Blue];

impl Player {
    /// Returns the player's index (Red = 0, Blue = 1).
    pub const fn index(self) -> usize {
        match self {
            Player::Red => 0,
            Player::Blue => 1,
        }
    }

    /// Returns the other player.
    pub const fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// Returns the lowercase name used in logs and match summaries.
    pub const fn name(self) -> &'static str {
        match self {
            Player::Red => "red",
            Player::Blue => "blue",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A cell on the board, addressed by row then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: u16,
    pub col: u16,
}

impl Coord {
    pub const fn new(row: u16, col: u16) -> Self {
        Coord { row, col }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(self, other: Coord) -> u32 {
        u32::from(self.row.abs_diff(other.row)) + u32::from(self.col.abs_diff(other.col))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dims {
    pub rows: u16,
    pub cols: u16,
}

impl Dims {
    pub const fn new(rows: u16, cols: u16) -> Self {
        Dims { rows, cols }
    }

    /// Total number of cells.
    pub const fn cell_count(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub const fn contains(self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Row-major index of an on-board coordinate.
    pub const fn index_of(self, coord: Coord) -> usize {
        coord.row as usize * self.cols as usize + coord.col as usize
    }

    /// Every on-board cell within `radius` of `center`, in row-major order.
    ///
    /// The center itself is included.
    pub fn ball(self, center: Coord, radius: u32) -> Vec<Coord> {
        let radius = radius.min(u32::from(u16::MAX));
        let r = radius as u16;
        let row_lo = center.row.saturating_sub(r);
        let row_hi = center.row.saturating_add(r).min(self.rows.saturating_sub(1));
        let col_lo = center.col.saturating_sub(r);
        let col_hi = center.col.saturating_add(r).min(self.cols.saturating_sub(1));

        let mut cells = Vec::new();
        if self.rows == 0 || self.cols == 0 {
            return cells;
        }
        for row in row_lo..=row_hi {
            for col in col_lo..=col_hi {
                let coord = Coord::new(row, col);
                if coord.manhattan(center) <= radius {
                    cells.push(coord);
                }
            }
        }
        cells
    }

    /// The half of the board a player deploys into: Red takes the left
    /// columns, Blue the right.
    pub const fn zone(self, player: Player) -> Zone {
        let half = self.cols / 2;
        match player {
            Player::Red => Zone { rows: self.rows, col_start: 0, width: half },
            Player::Blue => Zone { rows: self.rows, col_start: half, width: self.cols - half },
        }
    }
}

/// A player's deployment zone: every row, a contiguous band of columns.
///
/// Cells are numbered in row-major order over zone-local coordinates, so
/// local cell `(r, c)` has index `r * width + c` and board column
/// `col_start + c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Zone {
    pub rows: u16,
    pub col_start: u16,
    pub width: u16,
}

impl Zone {
    pub const fn cell_count(self) -> usize {
        self.rows as usize * self.width as usize
    }

    pub const fn contains(self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col >= self.col_start && coord.col < self.col_start + self.width
    }

    /// Board coordinate of the zone cell with the given index.
    pub fn cell(self, index: usize) -> Option<Coord> {
        if index >= self.cell_count() {
            return None;
        }
        let width = self.width as usize;
        Some(Coord::new((index / width) as u16, self.col_start + (index % width) as u16))
    }

    /// Zone-local index of a board coordinate.
    pub fn index_of(self, coord: Coord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        Some(coord.row as usize * self.width as usize + (coord.col - self.col_start) as usize)
    }
}
