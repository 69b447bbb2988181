use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use seabattle::{Board, CellState, Coord, ShotOutcome, Visibility, BOARD_SIZE};

fn random_board(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    Board::with_fleet(Visibility::Opponent, &mut rng).unwrap()
}

fn touching(a: Coord, b: Coord) -> bool {
    a.x.abs_diff(b.x) <= 1 && a.y.abs_diff(b.y) <= 1
}

fn snapshot(board: &Board) -> Vec<CellState> {
    (0..BOARD_SIZE)
        .flat_map(|y| (0..BOARD_SIZE).map(move |x| Coord::new(x, y)))
        .map(|c| board.cell_state(c).unwrap())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fleet_ships_never_touch(seed in any::<u64>()) {
        let board = random_board(seed);
        let ships = board.ships();
        for (i, a) in ships.iter().enumerate() {
            prop_assert!(a.cells().all(|c| c.in_bounds()));
            for b in ships.iter().skip(i + 1) {
                for ca in a.cells() {
                    for cb in b.cells() {
                        prop_assert!(!touching(ca, cb), "{:?} touches {:?}", a, b);
                    }
                }
            }
        }
    }

    #[test]
    fn fire_is_idempotent(seed in any::<u64>(), x in 0..BOARD_SIZE, y in 0..BOARD_SIZE) {
        let mut board = random_board(seed);
        let coord = Coord::new(x, y);
        let first = board.fire_at(coord).unwrap();
        prop_assert!(first.is_resolved());
        let after_first = snapshot(&board);
        for _ in 0..3 {
            prop_assert_eq!(board.fire_at(coord).unwrap(), ShotOutcome::AlreadyShot);
        }
        prop_assert_eq!(snapshot(&board), after_first);
    }

    #[test]
    fn hit_points_equal_size_minus_hits(seed in any::<u64>(), shots in 0..60usize) {
        let mut board = random_board(seed);
        let mut rng = SmallRng::seed_from_u64(seed ^ 0x5eab);
        let mut destroyed_reports = 0;
        for _ in 0..shots {
            let c = Coord::new(rng.random_range(0..BOARD_SIZE), rng.random_range(0..BOARD_SIZE));
            if board.fire_at(c).unwrap() == ShotOutcome::HitAndDestroyed {
                destroyed_reports += 1;
            }
        }
        for ship in board.ships() {
            prop_assert_eq!(ship.hit_points(), ship.size() - ship.hits().len());
            prop_assert_eq!(ship.is_destroyed(), ship.hit_points() == 0);
        }
        let destroyed = board.ships().iter().filter(|s| s.is_destroyed()).count();
        prop_assert_eq!(destroyed, destroyed_reports);
    }
}
