/// Side length of the square grid.
pub const BOARD_SIZE: usize = 10;

/// Ship sizes placed on every board, in placement order.
pub const FLEET: [usize; FLEET_SIZE] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];
pub const FLEET_SIZE: usize = 10;

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 4 + 3 + 3 + 2 + 2 + 2 + 1 + 1 + 1 + 1;

/// Random samples tried before placement or targeting falls back to the sweep.
pub const RANDOM_ATTEMPTS: usize = 50;

/// Pacing interval between the player's shot and the bot's reply.
pub const BOT_MOVE_DELAY_MS: u64 = 2000;
