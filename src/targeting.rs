//! Bot shot selection: random guessing that degrades into a row-major sweep.

use log::trace;
use rand::Rng;

use crate::board::Board;
use crate::common::{BoardError, Coord, ShotOutcome};
use crate::config::{BOARD_SIZE, RANDOM_ATTEMPTS};

/// Interface implemented by automated shooters.
pub trait Targeting {
    /// Pick a coordinate not shot yet, fire at it, and return it with the outcome.
    fn choose_shot<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        board: &mut Board,
    ) -> Result<(Coord, ShotOutcome), BoardError>;

    /// Forget any state carried between matches.
    fn reset(&mut self) {}
}

/// Samples random cells; after `RANDOM_ATTEMPTS` repeats it walks the board in
/// row-major order from the last sampled cell until it finds an unshot one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepBot {
    last: Option<Coord>,
}

impl SweepBot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last coordinate this bot fired at.
    pub fn last_coordinate(&self) -> Option<Coord> {
        self.last
    }

    /// Choose an unshot coordinate on `board` without firing at it.
    pub fn pick_target<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        board: &Board,
    ) -> Result<Coord, BoardError> {
        let mut coord = self.last.unwrap_or_default();
        for _ in 0..RANDOM_ATTEMPTS {
            coord = Coord::new(
                rng.random_range(0..BOARD_SIZE),
                rng.random_range(0..BOARD_SIZE),
            );
            if !board.is_shot(coord) {
                return Ok(coord);
            }
        }
        trace!("random targeting missed {} times, sweeping from {}", RANDOM_ATTEMPTS, coord);
        for _ in 0..BOARD_SIZE * BOARD_SIZE {
            coord = board.next_sweep_cell(coord);
            if !board.is_shot(coord) {
                return Ok(coord);
            }
        }
        Err(BoardError::NoTargetsLeft)
    }
}

impl Targeting for SweepBot {
    fn choose_shot<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        board: &mut Board,
    ) -> Result<(Coord, ShotOutcome), BoardError> {
        let coord = self.pick_target(rng, board)?;
        let outcome = board.fire_at(coord)?;
        self.last = Some(coord);
        Ok((coord, outcome))
    }

    fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Visibility;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn full_board_reports_no_targets() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut board = Board::new(Visibility::Own);
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                board.fire_at(Coord::new(x, y)).unwrap();
            }
        }
        let mut bot = SweepBot::new();
        assert_eq!(
            bot.choose_shot(&mut rng, &mut board).unwrap_err(),
            BoardError::NoTargetsLeft
        );
        assert_eq!(bot.last_coordinate(), None);
    }

    #[test]
    fn remembers_last_coordinate() {
        let mut rng = SmallRng::seed_from_u64(6);
        let mut board = Board::new(Visibility::Own);
        let mut bot = SweepBot::new();
        let (coord, outcome) = bot.choose_shot(&mut rng, &mut board).unwrap();
        assert_eq!(outcome, ShotOutcome::Miss);
        assert_eq!(bot.last_coordinate(), Some(coord));
        bot.reset();
        assert_eq!(bot.last_coordinate(), None);
    }
}
