//! Match controller: strict turn alternation between the player and the bot.

use alloc::format;
use alloc::string::String;
use log::{debug, info};
use rand::{rngs::SmallRng, SeedableRng};

use crate::board::Board;
use crate::common::{BoardError, Coord, MatchError, ShotOutcome, Visibility};
#[cfg(feature = "std")]
use crate::common::CellView;
#[cfg(feature = "std")]
use crate::config::BOARD_SIZE;
use crate::targeting::{SweepBot, Targeting};

/// Whose move it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Turn {
    PlayerTurn,
    BotTurn,
    /// Terminal until `restart`.
    Finished,
}

/// One of the two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Bot,
}

/// A resolved shot and the turn state that followed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub side: Side,
    pub coord: Coord,
    pub outcome: ShotOutcome,
    pub turn: Turn,
}

/// Serializable view of a match for the presentation layer. Intact ships on
/// the opponent board are concealed.
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchSnapshot {
    pub player_name: String,
    pub turn: Turn,
    pub winner: Option<Side>,
    pub status: String,
    pub player_board: [[CellView; BOARD_SIZE]; BOARD_SIZE],
    pub opponent_board: [[CellView; BOARD_SIZE]; BOARD_SIZE],
    pub player_ships_left: usize,
    pub opponent_ships_left: usize,
}

/// Human versus bot match over two freshly dealt boards.
pub struct Match {
    player_name: String,
    player_board: Board,
    opponent_board: Board,
    turn: Turn,
    winner: Option<Side>,
    bot: SweepBot,
    rng: SmallRng,
    epoch: u64,
}

impl Match {
    /// Start a match with both fleets dealt from `seed`. The player moves first.
    pub fn new(player_name: impl Into<String>, seed: u64) -> Result<Self, BoardError> {
        Self::with_rng(player_name.into(), SmallRng::seed_from_u64(seed))
    }

    /// Start a match seeded from the thread-local generator.
    #[cfg(feature = "std")]
    pub fn from_entropy(player_name: impl Into<String>) -> Result<Self, BoardError> {
        let mut seed_rng = rand::rng();
        Self::with_rng(player_name.into(), SmallRng::from_rng(&mut seed_rng))
    }

    fn with_rng(player_name: String, mut rng: SmallRng) -> Result<Self, BoardError> {
        let player_board = Board::with_fleet(Visibility::Own, &mut rng)?;
        let opponent_board = Board::with_fleet(Visibility::Opponent, &mut rng)?;
        info!("new match for {}", player_name);
        Ok(Self {
            player_name,
            player_board,
            opponent_board,
            turn: Turn::PlayerTurn,
            winner: None,
            bot: SweepBot::new(),
            rng,
            epoch: 0,
        })
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Set once the match is `Finished`.
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn player_board(&self) -> &Board {
        &self.player_board
    }

    pub fn opponent_board(&self) -> &Board {
        &self.opponent_board
    }

    /// Bumped on every restart.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Fire the player's shot at the opponent board.
    ///
    /// A repeat shot reports `AlreadyShot` and the player keeps the turn.
    pub fn submit_player_shot(&mut self, coord: Coord) -> Result<TurnReport, MatchError> {
        match self.turn {
            Turn::Finished => return Err(MatchError::MatchFinished),
            Turn::BotTurn => return Err(MatchError::NotYourTurn),
            Turn::PlayerTurn => {}
        }
        let outcome = self.opponent_board.fire_at(coord)?;
        if outcome.is_resolved() {
            if self.opponent_board.has_surviving_ships() {
                self.turn = Turn::BotTurn;
            } else {
                self.finish(Side::Player);
            }
        }
        debug!("{} fires at {}: {:?}", self.player_name, coord, outcome);
        Ok(self.report(Side::Player, coord, outcome))
    }

    /// Let the bot fire at the player's board.
    pub fn bot_move(&mut self) -> Result<TurnReport, MatchError> {
        match self.turn {
            Turn::Finished => return Err(MatchError::MatchFinished),
            Turn::PlayerTurn => return Err(MatchError::NotYourTurn),
            Turn::BotTurn => {}
        }
        let (coord, outcome) = self.bot.choose_shot(&mut self.rng, &mut self.player_board)?;
        if self.player_board.has_surviving_ships() {
            self.turn = Turn::PlayerTurn;
        } else {
            self.finish(Side::Bot);
        }
        debug!("bot fires at {}: {:?}", coord, outcome);
        Ok(self.report(Side::Bot, coord, outcome))
    }

    /// Re-deal both boards and hand the first move back to the player.
    pub fn restart(&mut self) -> Result<(), BoardError> {
        self.player_board.reset(&mut self.rng)?;
        self.opponent_board.reset(&mut self.rng)?;
        self.bot.reset();
        self.turn = Turn::PlayerTurn;
        self.winner = None;
        self.epoch += 1;
        info!("match restarted (epoch {})", self.epoch);
        Ok(())
    }

    /// Turn or result text for the status area.
    pub fn status_line(&self) -> String {
        match (self.turn, self.winner) {
            (Turn::PlayerTurn, _) => format!("{}, your move", self.player_name),
            (Turn::BotTurn, _) => String::from("Opponent is moving..."),
            (Turn::Finished, Some(Side::Player)) => format!("{}, you won!", self.player_name),
            (Turn::Finished, _) => format!("{}, you lost!", self.player_name),
        }
    }

    #[cfg(feature = "std")]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            player_name: self.player_name.clone(),
            turn: self.turn,
            winner: self.winner,
            status: self.status_line(),
            player_board: self.player_board.view_grid(),
            opponent_board: self.opponent_board.view_grid(),
            player_ships_left: self.player_board.surviving_ships(),
            opponent_ships_left: self.opponent_board.surviving_ships(),
        }
    }

    fn finish(&mut self, winner: Side) {
        self.turn = Turn::Finished;
        self.winner = Some(winner);
        info!("match finished, winner: {:?}", winner);
    }

    fn report(&self, side: Side, coord: Coord, outcome: ShotOutcome) -> TurnReport {
        TurnReport {
            side,
            coord,
            outcome,
            turn: self.turn,
        }
    }
}

impl core::fmt::Debug for Match {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Match")
            .field("player_name", &self.player_name)
            .field("turn", &self.turn)
            .field("winner", &self.winner)
            .field("epoch", &self.epoch)
            .finish()
    }
}
