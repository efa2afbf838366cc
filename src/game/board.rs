//! Board geometry and occupancy.

use serde::{Deserialize, Serialize};

/// Unique identifier for a player.
pub type PlayerId = u8;

/// Number of players in a game.
pub const NUM_PLAYERS: usize = 2;

/// Side length of the (square) board.
pub const BOARD_SIZE: u8 = 7;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// The four orthogonal compass directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards higher rows (rank 1 -> rank 7).
    North,
    /// Towards higher columns (file a -> file g).
    East,
    /// Towards lower rows.
    South,
    /// Towards lower columns.
    West,
}

impl Direction {
    /// All four directions, in N/E/S/W order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Single-letter bearing used in the textual move encoding.
    #[must_use]
    pub const fn bearing(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    /// Parse a bearing letter (case-insensitive).
    #[must_use]
    pub const fn from_bearing(c: char) -> Option<Self> {
        match c {
            'N' | 'n' => Some(Direction::North),
            'E' | 'e' => Some(Direction::East),
            'S' | 's' => Some(Direction::South),
            'W' | 'w' => Some(Direction::West),
            _ => None,
        }
    }
}

/// A cell on the board, addressed by column (file) and row (rank).
///
/// Column 0 is file `a`, row 0 is rank `1` (the bottom of the board), so
/// `a1` is the bottom-left corner and `g7` the top-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Column (file), 0-based.
    pub col: u8,
    /// Row (rank), 0-based.
    pub row: u8,
}

impl Cell {
    /// Create a new cell.
    ///
    /// Coordinates are not range-checked here; out-of-range cells are
    /// rejected by [`Cell::step`] and never produced by parsing.
    #[must_use]
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Index into a row-major `[_; CELL_COUNT]` array.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.row as usize) * (BOARD_SIZE as usize) + (self.col as usize)
    }

    /// Inverse of [`Cell::index`].
    #[must_use]
    pub const fn from_index(idx: usize) -> Self {
        Self {
            col: (idx % (BOARD_SIZE as usize)) as u8,
            row: (idx / (BOARD_SIZE as usize)) as u8,
        }
    }

    /// The neighbouring cell in the given direction, if it is on the board.
    #[must_use]
    pub const fn step(self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::North => {
                if self.row + 1 < BOARD_SIZE {
                    Some(Self::new(self.col, self.row + 1))
                } else {
                    None
                }
            }
            Direction::East => {
                if self.col + 1 < BOARD_SIZE {
                    Some(Self::new(self.col + 1, self.row))
                } else {
                    None
                }
            }
            Direction::South => {
                if self.row > 0 {
                    Some(Self::new(self.col, self.row - 1))
                } else {
                    None
                }
            }
            Direction::West => {
                if self.col > 0 {
                    Some(Self::new(self.col - 1, self.row))
                } else {
                    None
                }
            }
        }
    }

    /// Cast a ray from this cell (exclusive) to the board edge.
    #[must_use]
    pub fn ray(self, dir: Direction) -> Vec<Self> {
        let mut cells = Vec::new();
        let mut cur = self;
        while let Some(next) = cur.step(dir) {
            cells.push(next);
            cur = next;
        }
        cells
    }

    /// Orthogonally adjacent cells on the board.
    ///
    /// Returns a fixed-size array and count to avoid heap allocation.
    /// The array contains valid cells in indices `0..count`.
    #[must_use]
    pub const fn adjacent(self) -> ([Cell; 4], u8) {
        let mut result = [Cell::new(0, 0); 4];
        let mut count = 0u8;
        let mut i = 0;
        while i < 4 {
            if let Some(n) = self.step(Direction::ALL[i]) {
                result[count as usize] = n;
                count += 1;
            }
            i += 1;
        }
        (result, count)
    }

    /// The direction from this cell to an orthogonally adjacent cell.
    #[must_use]
    pub fn bearing_to(self, other: Self) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&dir| self.step(dir) == Some(other))
    }

    /// Parse algebraic notation (`a1`..`g7`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let col = bytes[0].checked_sub(b'a')?;
        let row = bytes[1].checked_sub(b'1')?;
        if col < BOARD_SIZE && row < BOARD_SIZE {
            Some(Self::new(col, row))
        } else {
            None
        }
    }

    /// All cells of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..CELL_COUNT).map(Self::from_index)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.col),
            char::from(b'1' + self.row)
        )
    }
}

/// Piece occupancy for the whole board.
///
/// Stored as a fixed row-major array; cheap to copy for speculative trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// Occupant per cell, row-major.
    squares: [Option<PlayerId>; CELL_COUNT],
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            squares: [None; CELL_COUNT],
        }
    }

    /// The occupant of a cell, if any.
    #[must_use]
    pub const fn get(&self, cell: Cell) -> Option<PlayerId> {
        self.squares[cell.index()]
    }

    /// Whether a cell is unoccupied.
    #[must_use]
    pub const fn is_empty(&self, cell: Cell) -> bool {
        self.squares[cell.index()].is_none()
    }

    /// Place a piece for `player` on `cell`, replacing any occupant.
    pub fn set(&mut self, cell: Cell, player: PlayerId) {
        self.squares[cell.index()] = Some(player);
    }

    /// Remove the piece on `cell`, if any.
    pub fn clear(&mut self, cell: Cell) {
        self.squares[cell.index()] = None;
    }

    /// Iterate over all occupied cells and their occupants.
    pub fn pieces(&self) -> impl Iterator<Item = (Cell, PlayerId)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(idx, occ)| occ.map(|p| (Cell::from_index(idx), p)))
    }

    /// Iterate over the cells holding pieces of one player.
    pub fn pieces_of(&self, player: PlayerId) -> impl Iterator<Item = Cell> + '_ {
        self.pieces()
            .filter_map(move |(cell, p)| (p == player).then_some(cell))
    }

    /// Total number of pieces on the board.
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|occ| occ.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
