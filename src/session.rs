#![cfg(feature = "std")]

//! Async wrapper around a [`Match`] that paces the bot's reply behind a
//! cancellable timer.

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Duration;

use crate::common::{BoardError, Coord, MatchError};
use crate::config::BOT_MOVE_DELAY_MS;
use crate::game::{Match, MatchSnapshot, Turn, TurnReport};

/// Notifications pushed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A scheduled bot move fired and resolved during match `epoch`.
    BotMoved { epoch: u64, report: TurnReport },
}

/// Shared match plus at most one pending bot move.
pub struct Session {
    game: Arc<Mutex<Match>>,
    events: mpsc::UnboundedSender<SessionEvent>,
    pending: Option<JoinHandle<()>>,
}

impl Session {
    /// Wrap `game`. Bot moves are reported on the returned receiver.
    pub fn new(game: Match) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            game: Arc::new(Mutex::new(game)),
            events: tx,
            pending: None,
        };
        (session, rx)
    }

    /// Default pacing between the player's shot and the bot's reply.
    pub fn default_delay() -> Duration {
        Duration::from_millis(BOT_MOVE_DELAY_MS)
    }

    pub async fn submit_player_shot(&self, coord: Coord) -> Result<TurnReport, MatchError> {
        self.game.lock().await.submit_player_shot(coord)
    }

    /// Run the bot's move after `delay`, replacing any move already pending.
    ///
    /// The move is dropped if the match was restarted in the meantime or it is
    /// no longer the bot's turn.
    pub async fn schedule_bot_move(&mut self, delay: Duration) {
        self.cancel_scheduled_bot_move();
        let epoch = self.game.lock().await.epoch();
        let game = Arc::clone(&self.game);
        let events = self.events.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut game = game.lock().await;
            if game.epoch() != epoch || game.turn() != Turn::BotTurn {
                debug!("dropping stale bot move (epoch {})", epoch);
                return;
            }
            match game.bot_move() {
                Ok(report) => {
                    if events.send(SessionEvent::BotMoved { epoch, report }).is_err() {
                        debug!("bot move resolved with no listener");
                    }
                }
                Err(e) => warn!("bot move failed: {}", e),
            }
        }));
    }

    /// Abort the pending bot move. Returns `true` if one was still waiting.
    pub fn cancel_scheduled_bot_move(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    pub fn has_pending_bot_move(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel any pending bot move, then re-deal both boards.
    pub async fn restart(&mut self) -> Result<(), BoardError> {
        if self.cancel_scheduled_bot_move() {
            debug!("cancelled pending bot move on restart");
        }
        self.game.lock().await.restart()
    }

    /// Run `f` against the current match state.
    pub async fn view<T>(&self, f: impl FnOnce(&Match) -> T) -> T {
        let game = self.game.lock().await;
        f(&*game)
    }

    /// `true` if `event` belongs to a match that has since been restarted.
    pub async fn is_stale(&self, event: &SessionEvent) -> bool {
        let current = self.game.lock().await.epoch();
        match event {
            SessionEvent::BotMoved { epoch, .. } => *epoch != current,
        }
    }

    pub async fn turn(&self) -> Turn {
        self.game.lock().await.turn()
    }

    pub async fn snapshot(&self) -> MatchSnapshot {
        self.game.lock().await.snapshot()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancel_scheduled_bot_move();
    }
}
