use anyhow::anyhow;
use clap::Parser;
use rand::{rngs::SmallRng, SeedableRng};
use seabattle::{Match, Side, SweepBot, Turn};
use serde_json::json;

/// Play a full match with the player's side driven by a second bot.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for dealing both boards.
    seed: u64,
    /// Seed for the autopilot standing in for the player; defaults to `seed + 1`.
    #[arg(long)]
    autopilot_seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    seabattle::init_logging();
    let args = Args::parse();

    let mut game = Match::new("autopilot", args.seed).map_err(|e| anyhow!(e))?;
    let mut rng = SmallRng::seed_from_u64(
        args.autopilot_seed
            .unwrap_or_else(|| args.seed.wrapping_add(1)),
    );
    let autopilot = SweepBot::new();

    let mut player_shots = 0usize;
    let mut bot_shots = 0usize;
    while game.turn() != Turn::Finished {
        match game.turn() {
            Turn::PlayerTurn => {
                let coord = autopilot
                    .pick_target(&mut rng, game.opponent_board())
                    .map_err(|e| anyhow!(e))?;
                game.submit_player_shot(coord).map_err(|e| anyhow!(e))?;
                player_shots += 1;
            }
            Turn::BotTurn => {
                game.bot_move().map_err(|e| anyhow!(e))?;
                bot_shots += 1;
            }
            Turn::Finished => {}
        }
    }

    let winner = match game.winner() {
        Some(Side::Player) => "player",
        Some(Side::Bot) => "bot",
        None => return Err(anyhow!("match finished without a winner")),
    };
    let result = json!({
        "seed": args.seed,
        "winner": winner,
        "player": {"shots": player_shots, "ships_left": game.player_board().surviving_ships()},
        "bot": {"shots": bot_shots, "ships_left": game.opponent_board().surviving_ships()},
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
