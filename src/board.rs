//! Game board: the cell grid plus the fleet placed on it.

use alloc::vec::Vec;
use core::fmt;
use log::trace;
use rand::Rng;

use crate::common::{BoardError, CellState, CellView, Coord, ShotOutcome, Visibility};
use crate::config::{BOARD_SIZE, FLEET, FLEET_SIZE, RANDOM_ATTEMPTS};
use crate::ship::{Orientation, Ship};

type Grid = [[CellState; BOARD_SIZE]; BOARD_SIZE];

/// Square grid indexed `grid[y][x]` together with the ships placed on it.
#[derive(Clone)]
pub struct Board {
    visibility: Visibility,
    auto_fill: bool,
    grid: Grid,
    ships: Vec<Ship>,
}

impl Board {
    /// Create an empty board with no ships. `reset` leaves it empty.
    pub fn new(visibility: Visibility) -> Self {
        Board {
            visibility,
            auto_fill: false,
            grid: [[CellState::Empty; BOARD_SIZE]; BOARD_SIZE],
            ships: Vec::with_capacity(FLEET_SIZE),
        }
    }

    /// Create a board carrying the standard fleet at random positions.
    /// `reset` re-deals the fleet.
    pub fn with_fleet<R: Rng + ?Sized>(
        visibility: Visibility,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let mut board = Board::new(visibility);
        board.auto_fill = true;
        board.fill_fleet(rng)?;
        Ok(board)
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Clear every cell and ship, then re-deal the fleet if this board auto fills.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        self.clear();
        if self.auto_fill {
            self.fill_fleet(rng)?;
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.grid = [[CellState::Empty; BOARD_SIZE]; BOARD_SIZE];
        self.ships.clear();
    }

    /// Place every ship of the standard fleet at random.
    pub fn fill_fleet<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        for size in FLEET {
            self.place_ship(rng, size)?;
        }
        Ok(())
    }

    /// Place a ship of `size` at a random valid position.
    ///
    /// Tries `RANDOM_ATTEMPTS` random anchors and orientations first. After that
    /// it sweeps every cell in row-major order from the last attempted anchor,
    /// trying both orientations, so it always terminates.
    pub fn place_ship<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        size: usize,
    ) -> Result<&Ship, BoardError> {
        if size > BOARD_SIZE {
            return Err(BoardError::PlacementExhausted);
        }
        let mut ship = Ship::new(size);
        let mut anchor = Coord::default();
        let mut orientation = Orientation::Horizontal;

        for _ in 0..RANDOM_ATTEMPTS {
            anchor = Coord::new(
                rng.random_range(0..BOARD_SIZE),
                rng.random_range(0..BOARD_SIZE),
            );
            orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            ship.position(anchor, orientation);
            if self.check_location(&ship).is_ok() {
                return Ok(self.commit(ship));
            }
        }

        trace!(
            "random placement of size {} failed {} times, sweeping from {}",
            ship.size(),
            RANDOM_ATTEMPTS,
            anchor
        );
        for _ in 0..BOARD_SIZE * BOARD_SIZE {
            anchor = self.next_sweep_cell(anchor);
            orientation = orientation.flipped();
            for o in [orientation, orientation.flipped()] {
                ship.position(anchor, o);
                if self.check_location(&ship).is_ok() {
                    return Ok(self.commit(ship));
                }
            }
        }
        Err(BoardError::PlacementExhausted)
    }

    /// Place a ship of `size` exactly at `anchor`, under the same rules as
    /// random placement.
    pub fn place_ship_at(
        &mut self,
        size: usize,
        anchor: Coord,
        orientation: Orientation,
    ) -> Result<&Ship, BoardError> {
        if !anchor.in_bounds() {
            return Err(BoardError::OutOfBounds);
        }
        let mut ship = Ship::new(size);
        ship.position(anchor, orientation);
        self.check_location(&ship)?;
        Ok(self.commit(ship))
    }

    /// Validate a positioned ship: inside the grid, only on empty cells, and
    /// not touching any other ship, diagonals included.
    fn check_location(&self, ship: &Ship) -> Result<(), BoardError> {
        match ship.end() {
            Some(end) if end.in_bounds() => {}
            _ => return Err(BoardError::OutOfBounds),
        }
        if ship.cells().any(|c| self.state(c) != CellState::Empty) {
            return Err(BoardError::InvalidPlacement);
        }
        if ship
            .neighbourhood()
            .any(|c| self.state(c) == CellState::ShipIntact)
        {
            return Err(BoardError::InvalidPlacement);
        }
        Ok(())
    }

    fn commit(&mut self, ship: Ship) -> &Ship {
        for c in ship.neighbourhood() {
            if self.grid[c.y][c.x] == CellState::Empty {
                self.grid[c.y][c.x] = CellState::ShipAdjacent;
            }
        }
        for c in ship.cells() {
            self.grid[c.y][c.x] = CellState::ShipIntact;
        }
        self.ships.push(ship);
        &self.ships[self.ships.len() - 1]
    }

    fn state(&self, coord: Coord) -> CellState {
        self.grid[coord.y][coord.x]
    }

    /// Resolve a shot at `coord`.
    ///
    /// A cell that was already shot yields `AlreadyShot` and nothing changes.
    /// Sinking a ship turns the buffer ring around it into misses.
    pub fn fire_at(&mut self, coord: Coord) -> Result<ShotOutcome, BoardError> {
        if !coord.in_bounds() {
            return Err(BoardError::OutOfBounds);
        }
        if self.state(coord).is_shot() {
            return Ok(ShotOutcome::AlreadyShot);
        }

        let struck = self.ships.iter_mut().position(|ship| ship.apply_shot(coord));
        match struck {
            Some(i) => {
                self.grid[coord.y][coord.x] = CellState::Hit;
                if self.ships[i].is_destroyed() {
                    for c in self.ships[i].neighbourhood() {
                        if self.grid[c.y][c.x] == CellState::ShipAdjacent {
                            self.grid[c.y][c.x] = CellState::Miss;
                        }
                    }
                    Ok(ShotOutcome::HitAndDestroyed)
                } else {
                    Ok(ShotOutcome::Hit)
                }
            }
            None => {
                self.grid[coord.y][coord.x] = CellState::Miss;
                Ok(ShotOutcome::Miss)
            }
        }
    }

    /// `true` while at least one ship is afloat.
    pub fn has_surviving_ships(&self) -> bool {
        self.ships.iter().any(|ship| !ship.is_destroyed())
    }

    pub fn surviving_ships(&self) -> usize {
        self.ships.iter().filter(|ship| !ship.is_destroyed()).count()
    }

    /// Next cell of the row-major sweep, wrapping back to (0, 0).
    pub fn next_sweep_cell(&self, coord: Coord) -> Coord {
        coord.next_row_major()
    }

    /// Ships in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship_at(&self, coord: Coord) -> Option<&Ship> {
        self.ships.iter().find(|ship| ship.contains(coord))
    }

    /// Raw cell state, including the internal ship and buffer markers.
    pub fn cell_state(&self, coord: Coord) -> Result<CellState, BoardError> {
        if !coord.in_bounds() {
            return Err(BoardError::OutOfBounds);
        }
        Ok(self.state(coord))
    }

    /// Whether a shot has already resolved at `coord`.
    pub fn is_shot(&self, coord: Coord) -> bool {
        coord.in_bounds() && self.state(coord).is_shot()
    }

    /// Cells not shot yet, in row-major order.
    pub fn unshot_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..BOARD_SIZE)
            .flat_map(|y| (0..BOARD_SIZE).map(move |x| Coord::new(x, y)))
            .filter(move |&c| !self.state(c).is_shot())
    }

    /// How the cell at `coord` should be drawn for this board's owner.
    pub fn cell_view(&self, coord: Coord) -> Result<CellView, BoardError> {
        let view = match self.cell_state(coord)? {
            CellState::Miss => CellView::Miss,
            CellState::Hit => self
                .ship_at(coord)
                .map_or(CellView::Hit, |ship| ship.render_hint(coord, self.visibility)),
            CellState::ShipIntact => self
                .ship_at(coord)
                .map_or(CellView::Water, |ship| ship.render_hint(coord, self.visibility)),
            CellState::Empty | CellState::ShipAdjacent => CellView::Water,
        };
        Ok(view)
    }

    /// Every cell's view, indexed `[y][x]`.
    pub fn view_grid(&self) -> [[CellView; BOARD_SIZE]; BOARD_SIZE] {
        core::array::from_fn(|y| {
            core::array::from_fn(|x| {
                self.cell_view(Coord::new(x, y)).unwrap_or(CellView::Water)
            })
        })
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ visibility: {:?}, ships: {:?}", self.visibility, self.ships)?;
        for row in self.grid.iter() {
            for cell in row.iter() {
                let ch = match cell {
                    CellState::Empty => '.',
                    CellState::ShipIntact => 'S',
                    CellState::ShipAdjacent => '-',
                    CellState::Miss => 'o',
                    CellState::Hit => 'X',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, RngCore, SeedableRng};

    /// Generator that always yields the same bits, so every random sample
    /// lands on the same candidate.
    struct StuckRng;

    impl RngCore for StuckRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[test]
    fn placement_marks_ship_and_buffer() {
        let mut board = Board::new(Visibility::Own);
        board
            .place_ship_at(2, Coord::new(3, 3), Orientation::Horizontal)
            .unwrap();
        assert_eq!(board.state(Coord::new(3, 3)), CellState::ShipIntact);
        assert_eq!(board.state(Coord::new(4, 3)), CellState::ShipIntact);
        assert_eq!(board.state(Coord::new(2, 2)), CellState::ShipAdjacent);
        assert_eq!(board.state(Coord::new(5, 4)), CellState::ShipAdjacent);
        assert_eq!(board.state(Coord::new(6, 3)), CellState::Empty);
    }

    #[test]
    fn touching_placement_is_rejected() {
        let mut board = Board::new(Visibility::Own);
        board
            .place_ship_at(1, Coord::new(5, 5), Orientation::Horizontal)
            .unwrap();
        assert_eq!(
            board
                .place_ship_at(1, Coord::new(6, 6), Orientation::Vertical)
                .unwrap_err(),
            BoardError::InvalidPlacement
        );
        assert_eq!(
            board
                .place_ship_at(3, Coord::new(8, 0), Orientation::Horizontal)
                .unwrap_err(),
            BoardError::OutOfBounds
        );
        assert_eq!(board.ships().len(), 1);
    }

    #[test]
    fn stuck_rng_falls_back_to_sweep() {
        let mut rng = StuckRng;
        let mut board = Board::new(Visibility::Own);
        board.fill_fleet(&mut rng).unwrap();
        assert_eq!(board.ships().len(), FLEET_SIZE);
    }

    #[test]
    fn oversized_ship_exhausts_placement() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut board = Board::new(Visibility::Own);
        assert_eq!(
            board.place_ship(&mut rng, BOARD_SIZE + 1).unwrap_err(),
            BoardError::PlacementExhausted
        );
        assert!(board.ships().is_empty());
    }

    #[test]
    fn huge_sizes_are_rejected_without_panicking() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut board = Board::new(Visibility::Own);
        assert_eq!(
            board.place_ship(&mut rng, usize::MAX).unwrap_err(),
            BoardError::PlacementExhausted
        );
        assert_eq!(
            board
                .place_ship_at(1 << 60, Coord::new(5, 5), Orientation::Horizontal)
                .unwrap_err(),
            BoardError::OutOfBounds
        );
        assert_eq!(
            board
                .place_ship_at(usize::MAX, Coord::new(0, 9), Orientation::Vertical)
                .unwrap_err(),
            BoardError::OutOfBounds
        );
        assert!(board.ships().is_empty());
        assert_eq!(board.unshot_cells().count(), BOARD_SIZE * BOARD_SIZE);
    }

    #[test]
    fn sweep_wraps_rows_and_board() {
        let board = Board::new(Visibility::Own);
        assert_eq!(board.next_sweep_cell(Coord::new(3, 4)), Coord::new(4, 4));
        assert_eq!(board.next_sweep_cell(Coord::new(9, 4)), Coord::new(0, 5));
        assert_eq!(board.next_sweep_cell(Coord::new(9, 9)), Coord::new(0, 0));
    }

    #[test]
    fn reset_redeals_auto_filled_board() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut board = Board::with_fleet(Visibility::Opponent, &mut rng).unwrap();
        board.fire_at(Coord::new(0, 0)).unwrap();
        board.reset(&mut rng).unwrap();
        assert_eq!(board.ships().len(), FLEET_SIZE);
        assert_eq!(board.unshot_cells().count(), BOARD_SIZE * BOARD_SIZE);

        let mut empty = Board::new(Visibility::Own);
        empty
            .place_ship_at(1, Coord::new(0, 0), Orientation::Horizontal)
            .unwrap();
        empty.reset(&mut rng).unwrap();
        assert!(empty.ships().is_empty());
    }
}
