//! Common types for the engine: coordinates, cell states, shot outcomes and errors.

use crate::config::BOARD_SIZE;
use crate::ship::Orientation;

/// Grid coordinate, `x` is the column and `y` the row, both zero based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Whether the coordinate lies on a `BOARD_SIZE` grid.
    pub fn in_bounds(&self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// Coordinate `k` cells further along `orientation`. Saturates instead of
    /// overflowing, so a huge step always lands out of bounds.
    pub fn step(&self, orientation: Orientation, k: usize) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(self.x.saturating_add(k), self.y),
            Orientation::Vertical => Self::new(self.x, self.y.saturating_add(k)),
        }
    }

    /// Next coordinate in row-major order, wrapping past the last cell back to (0, 0).
    pub fn next_row_major(&self) -> Self {
        if self.x + 1 < BOARD_SIZE {
            Self::new(self.x + 1, self.y)
        } else if self.y + 1 < BOARD_SIZE {
            Self::new(0, self.y + 1)
        } else {
            Self::new(0, 0)
        }
    }
}

impl core::fmt::Display for Coord {
    /// Column letter followed by the 1-based row, e.g. `C7`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let col = (b'A' + (self.x % 26) as u8) as char;
        write!(f, "{}{}", col, self.y + 1)
    }
}

/// Internal state of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Empty,
    /// Undamaged ship segment.
    ShipIntact,
    /// Buffer ring around a ship. Shootable, never placeable.
    ShipAdjacent,
    Miss,
    Hit,
}

impl CellState {
    /// `true` once a shot has resolved on this cell.
    pub fn is_shot(self) -> bool {
        matches!(self, CellState::Miss | CellState::Hit)
    }
}

/// Result of resolving a shot against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// The cell was shot before; nothing changed.
    AlreadyShot,
    Miss,
    Hit,
    /// The shot hit the last intact segment of a ship.
    HitAndDestroyed,
}

impl ShotOutcome {
    /// `true` for outcomes that changed the board.
    pub fn is_resolved(self) -> bool {
        !matches!(self, ShotOutcome::AlreadyShot)
    }

    pub fn is_hit(self) -> bool {
        matches!(self, ShotOutcome::Hit | ShotOutcome::HitAndDestroyed)
    }
}

/// Semantic appearance of a cell for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellView {
    /// Open water, or an intact ship concealed on the opponent board.
    Water,
    /// Intact ship segment, only shown on the player's own board.
    Ship,
    Hit,
    Miss,
    /// Segment of a ship that has been sunk.
    Destroyed,
}

/// Whose board this is, which decides whether intact ships are revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    Own,
    Opponent,
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate or ship extent falls outside the grid.
    OutOfBounds,
    /// Candidate position overlaps or touches another ship.
    InvalidPlacement,
    /// No valid position exists for the requested ship.
    PlacementExhausted,
    /// Every cell of the board has already been shot.
    NoTargetsLeft,
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::OutOfBounds => write!(f, "Coordinate is out of bounds"),
            BoardError::InvalidPlacement => write!(f, "Ship would overlap or touch another ship"),
            BoardError::PlacementExhausted => write!(f, "No room left to place ship"),
            BoardError::NoTargetsLeft => write!(f, "Every cell has already been shot"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

/// Errors returned by the match controller. None of them change match state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// Shot submitted by the side that is not on turn.
    NotYourTurn,
    /// The match has a winner; restart to play again.
    MatchFinished,
    Board(BoardError),
}

impl From<BoardError> for MatchError {
    fn from(err: BoardError) -> Self {
        MatchError::Board(err)
    }
}

impl core::fmt::Display for MatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatchError::NotYourTurn => write!(f, "It is not your turn"),
            MatchError::MatchFinished => write!(f, "The match is already finished"),
            MatchError::Board(e) => write!(f, "Board error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatchError {}
