use rand::rngs::SmallRng;
use rand::SeedableRng;
use seabattle::{Board, Coord, ShotOutcome, SweepBot, Targeting, Visibility, BOARD_SIZE};

fn board_with_one_gap(gap: Coord) -> Board {
    let mut board = Board::new(Visibility::Own);
    for y in 0..BOARD_SIZE {
        for x in 0..BOARD_SIZE {
            let c = Coord::new(x, y);
            if c != gap {
                board.fire_at(c).unwrap();
            }
        }
    }
    board
}

#[test]
fn test_last_unshot_cell_is_found() {
    for seed in 0..16 {
        let gap = Coord::new((seed as usize * 7) % BOARD_SIZE, (seed as usize * 3) % BOARD_SIZE);
        let mut board = board_with_one_gap(gap);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut bot = SweepBot::new();
        let (coord, outcome) = bot.choose_shot(&mut rng, &mut board).unwrap();
        assert_eq!(coord, gap);
        assert_eq!(outcome, ShotOutcome::Miss);
        assert_eq!(board.unshot_cells().count(), 0);
    }
}

#[test]
fn test_bot_exhausts_board_without_repeats() {
    let mut rng = SmallRng::seed_from_u64(2024);
    let mut board = Board::with_fleet(Visibility::Own, &mut rng).unwrap();
    let mut bot = SweepBot::new();
    let mut fired = Vec::new();
    while board.unshot_cells().next().is_some() {
        let (coord, outcome) = bot.choose_shot(&mut rng, &mut board).unwrap();
        assert_ne!(outcome, ShotOutcome::AlreadyShot);
        assert!(!fired.contains(&coord));
        fired.push(coord);
    }
    assert!(!board.has_surviving_ships());
    assert!(fired.len() <= BOARD_SIZE * BOARD_SIZE);
}
