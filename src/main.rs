#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use anyhow::anyhow;
#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use seabattle::{
    parse_coord, render_match, Match, Session, SessionEvent, ShotOutcome, Side, Turn,
    TurnReport, BOT_MOVE_DELAY_MS,
};
#[cfg(feature = "std")]
use tokio::io::{AsyncBufReadExt, BufReader};
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the bot in the terminal.
    Play {
        #[arg(long, default_value = "Player")]
        name: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(
            long,
            default_value_t = BOT_MOVE_DELAY_MS,
            help = "Pause before the bot replies, in milliseconds"
        )]
        delay_ms: u64,
    },
}

#[cfg(feature = "std")]
fn describe(report: &TurnReport, game: &Match) -> String {
    let who = match report.side {
        Side::Player => game.player_name().to_string(),
        Side::Bot => "Bot".to_string(),
    };
    let what = match report.outcome {
        ShotOutcome::AlreadyShot => "already shot there, try again".to_string(),
        ShotOutcome::Miss => "miss".to_string(),
        ShotOutcome::Hit => "hit!".to_string(),
        ShotOutcome::HitAndDestroyed => {
            let board = match report.side {
                Side::Player => game.opponent_board(),
                Side::Bot => game.player_board(),
            };
            let sunk = board
                .ship_at(report.coord)
                .map_or("ship", |ship| ship.name());
            format!("hit and sank a {}!", sunk)
        }
    };
    format!("{} fires at {}: {}", who, report.coord, what)
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    seabattle::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { name, seed, delay_ms } => {
            let game = match seed {
                Some(s) => {
                    println!("Using fixed seed: {} (game will be reproducible)", s);
                    Match::new(name, s)
                }
                None => Match::from_entropy(name),
            }
            .map_err(|e| anyhow!(e))?;
            let delay = Duration::from_millis(delay_ms);
            let (mut session, mut events) = Session::new(game);

            println!("Enter a target like A5, 'restart' for a new game or 'quit' to leave.\n");
            println!("{}", session.view(render_match).await);
            let mut lines = BufReader::new(tokio::io::stdin()).lines();

            loop {
                tokio::select! {
                    line = lines.next_line() => {
                        let Some(line) = line? else { break };
                        match line.trim() {
                            "" => continue,
                            "quit" | "exit" => break,
                            "restart" => {
                                session.restart().await.map_err(|e| anyhow!(e))?;
                                println!("New game, fleets re-dealt.");
                            }
                            input => match parse_coord(input) {
                                Err(msg) => println!("{}", msg),
                                Ok(coord) => match session.submit_player_shot(coord).await {
                                    Ok(report) => {
                                        let line = session.view(|g| describe(&report, g)).await;
                                        println!("{}", line);
                                        if report.turn == Turn::BotTurn {
                                            session.schedule_bot_move(delay).await;
                                        }
                                    }
                                    Err(e) => println!("{}", e),
                                },
                            },
                        }
                        println!("{}", session.view(render_match).await);
                    }
                    Some(event) = events.recv() => {
                        if session.is_stale(&event).await {
                            continue;
                        }
                        let SessionEvent::BotMoved { report, .. } = event;
                        println!("{}", session.view(|g| describe(&report, g)).await);
                        println!("{}", session.view(render_match).await);
                    }
                }
            }
        }
    }
    Ok(())
}
