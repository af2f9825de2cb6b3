//! The cooperative turn loop between the UI and the remote engine.
//!
//! One tokio task; HTTP calls are the only suspension points; at most one
//! execution request is outstanding. The loop yields to the human by
//! fetching the legal template list and waiting on the command channel,
//! and a `pending` flag checked at those yield points is the sole
//! cancellation mechanism. A start command received at any yield point
//! abandons the current game and is serviced as a fresh one.

use crate::client::EngineApi;
use crate::game::{ActionTemplate, Board, CapturePools, Color, Placement, Square, Winner};
use anyhow::{bail, Result};
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration, Instant};
use tracing::{debug, info, instrument, warn};

use super::players::PlayerSlot;

/// Messages from the turn loop to the UI.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A game started; the turn loop is live.
    Started,
    /// The human must act; these are the legal templates for the turn.
    LegalActions(Vec<ActionTemplate>),
    /// An engine-side agent is choosing a move.
    EngineThinking {
        /// Display name of the strategy at work.
        player: String,
    },
    /// A move was committed by the engine.
    MoveApplied {
        /// The new board.
        board: Board,
        /// The new capture pools.
        captured: CapturePools,
        /// Human-readable move record.
        record: String,
    },
    /// An undo succeeded; this is the engine-confirmed previous state.
    UndoApplied {
        /// The restored board.
        board: Board,
        /// The restored capture pools.
        captured: CapturePools,
    },
    /// A saved position was loaded; it becomes the free-placement layout.
    Loaded {
        /// The loaded board.
        board: Board,
        /// The loaded capture pools.
        captured: CapturePools,
    },
    /// The turn loop paused on a failure; a new user action is required.
    Paused {
        /// What went wrong.
        message: String,
        /// Whether a refresh retries the failed turn. When false only a
        /// restart recovers.
        retriable: bool,
    },
    /// A transient status-line message (save results and the like).
    Status(String),
    /// The game ended.
    GameOver(Winner),
}

/// Commands from the UI to the turn loop.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    /// Start a game from a free-placement layout. Mid-game this abandons
    /// the current game and starts over.
    Start {
        /// The layout to play from.
        placements: Vec<Placement>,
    },
    /// Submit the committed selection as a move.
    Move {
        /// Chosen source squares.
        sources: Vec<Square>,
        /// Chosen target squares.
        targets: Vec<Square>,
    },
    /// Undo the last committed move.
    Undo,
    /// Retry after a pause (re-fetch legality for the current turn).
    Refresh,
    /// Load a saved position into the placement editor (outside a game).
    Load {
        /// The saved position's id.
        id: i64,
    },
    /// Save the current position under a name.
    Save {
        /// Name to save under.
        name: String,
    },
    /// Abandon the current game and return to free placement.
    Reset,
    /// Shut the loop down.
    Quit,
}

/// Orchestrates turns between the two player slots and the engine.
pub struct Orchestrator<C: EngineApi> {
    client: C,
    white: PlayerSlot,
    black: PlayerSlot,
    /// Minimum visible duration of an automated turn.
    pace: Duration,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    cmd_rx: mpsc::UnboundedReceiver<UiCommand>,
    to_move: Color,
    pending: bool,
    /// A start command received mid-game, serviced once the loop unwinds.
    restart: Option<Vec<Placement>>,
}

impl<C: EngineApi> Orchestrator<C> {
    /// Creates an orchestrator over the given channels.
    pub fn new(
        client: C,
        white: PlayerSlot,
        black: PlayerSlot,
        pace: Duration,
        event_tx: mpsc::UnboundedSender<GameEvent>,
        cmd_rx: mpsc::UnboundedReceiver<UiCommand>,
    ) -> Self {
        Self {
            client,
            white,
            black,
            pace,
            event_tx,
            cmd_rx,
            to_move: Color::White,
            pending: false,
            restart: None,
        }
    }

    /// Runs until the UI sends [`UiCommand::Quit`] or drops the channel.
    /// Outside a game the loop idles waiting for a start or load command.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<()> {
        info!("orchestrator ready");
        let mut next = self.cmd_rx.recv().await;
        while let Some(cmd) = next.take() {
            match cmd {
                UiCommand::Start { placements } => {
                    match self.start(placements).await {
                        Ok(()) => self.play().await,
                        Err(e) => {
                            warn!(error = %e, "game setup failed");
                            self.send(GameEvent::Paused {
                                message: format!("setup failed: {e}"),
                                retriable: false,
                            });
                        }
                    }
                    // A restart requested mid-game is serviced before any
                    // further commands.
                    if let Some(placements) = self.restart.take() {
                        next = Some(UiCommand::Start { placements });
                        continue;
                    }
                }
                UiCommand::Load { id } => self.load(id).await,
                UiCommand::Quit => break,
                other => debug!(?other, "ignoring command outside a game"),
            }
            next = self.cmd_rx.recv().await;
        }
        info!("orchestrator stopped");
        Ok(())
    }

    /// Initializes the board and both player slots.
    async fn start(&mut self, placements: Vec<Placement>) -> Result<()> {
        // Clear any previous engine-side game before placing pieces.
        self.client.end().await.ok();
        let catalogue = self.client.agents().await?;
        for slot in [&self.white, &self.black] {
            let model = slot.strategy.model_name();
            if !catalogue.iter().any(|name| name == model) {
                bail!("engine does not offer the {model} strategy");
            }
        }
        self.client.init_board(&placements).await?;
        self.white.initialize(&self.client).await?;
        self.black.initialize(&self.client).await?;
        self.to_move = Color::White;
        self.pending = false;
        self.send(GameEvent::Started);
        info!(white = %self.white.strategy, black = %self.black.strategy, "game started");
        Ok(())
    }

    /// The turn loop proper. Returns when the game ends, a failure pauses
    /// it, or the pending flag is raised.
    async fn play(&mut self) {
        loop {
            self.drain_commands();
            if self.pending {
                return;
            }

            let strategy = self.slot(self.to_move).strategy;
            let over = if strategy.is_human() {
                self.human_turn().await
            } else {
                self.engine_turn().await
            };
            if over || self.pending {
                return;
            }
        }
    }

    /// One human turn: fetch legality, hand it to the UI, wait for a
    /// command. Returns true when the game is over.
    async fn human_turn(&mut self) -> bool {
        let templates = match self.client.actions().await {
            Ok(t) => t,
            Err(e) => {
                // Legality-fetch failure: no state change, wait for the
                // user before trying again.
                warn!(error = %e, "failed to fetch legal actions");
                self.send(GameEvent::Paused {
                    message: format!("could not fetch moves: {e}"),
                    retriable: true,
                });
                return self.wait_before_retry().await;
            }
        };
        self.send(GameEvent::LegalActions(templates));

        loop {
            let Some(cmd) = self.cmd_rx.recv().await else {
                self.pending = true;
                return false;
            };
            match cmd {
                UiCommand::Move { sources, targets } => {
                    return self.execute(Some((sources, targets))).await;
                }
                UiCommand::Undo => {
                    self.undo().await;
                    return false;
                }
                UiCommand::Refresh => return false,
                UiCommand::Save { name } => {
                    self.save(&name).await;
                }
                UiCommand::Start { placements } => {
                    self.restart = Some(placements);
                    self.pending = true;
                    return false;
                }
                UiCommand::Reset | UiCommand::Quit => {
                    self.pending = true;
                    return false;
                }
                UiCommand::Load { .. } => {
                    debug!("ignoring load command mid-game");
                }
            }
        }
    }

    /// One automated turn, padded to the pacing delay so it stays visible.
    async fn engine_turn(&mut self) -> bool {
        self.send(GameEvent::EngineThinking {
            player: self.slot(self.to_move).strategy.to_string(),
        });
        let started = Instant::now();
        let over = self.execute(None).await;
        if let Some(remaining) = self.pace.checked_sub(started.elapsed()) {
            sleep(remaining).await;
        }
        over
    }

    /// Submits a move (or delegates to the engine-side agent) and applies
    /// the outcome. Returns true when the game is over.
    async fn execute(&mut self, action: Option<(Vec<Square>, Vec<Square>)>) -> bool {
        let borrowed = action.as_ref().map(|(s, t)| (s.as_slice(), t.as_slice()));
        match self.client.run(borrowed).await {
            Ok(outcome) => {
                self.to_move = self.to_move.opponent();
                let winner = outcome.winner;
                self.send(GameEvent::MoveApplied {
                    board: outcome.board,
                    captured: outcome.captured,
                    record: outcome.record,
                });
                if winner.is_over() {
                    info!(?winner, "game over");
                    self.send(GameEvent::GameOver(winner));
                    self.pending = true;
                    return true;
                }
                false
            }
            Err(e) => {
                // Execution failure: selection is discarded, loop pauses
                // until a restart.
                warn!(error = %e, "move execution failed");
                self.send(GameEvent::Paused {
                    message: format!("move failed: {e}"),
                    retriable: false,
                });
                self.pending = true;
                false
            }
        }
    }

    /// Requests an undo; local state is only touched on success.
    async fn undo(&mut self) {
        match self.client.undo().await {
            Ok((board, captured)) => {
                self.to_move = self.to_move.opponent();
                self.send(GameEvent::UndoApplied { board, captured });
            }
            Err(e) => {
                warn!(error = %e, "undo failed");
                self.send(GameEvent::Paused {
                    message: format!("undo failed: {e}"),
                    retriable: false,
                });
            }
        }
    }

    /// Loads a saved position; the result becomes the placement layout.
    async fn load(&mut self, id: i64) {
        match self.client.load(id).await {
            Ok((board, captured)) => {
                info!(id, "loaded saved position");
                self.send(GameEvent::Loaded { board, captured });
            }
            Err(e) => {
                warn!(error = %e, id, "load failed");
                self.send(GameEvent::Status(format!("load failed: {e}")));
            }
        }
    }

    /// Saves the current position; the game continues either way.
    async fn save(&mut self, name: &str) {
        match self.client.save(name).await {
            Ok(()) => self.send(GameEvent::Status(format!("saved as {name}"))),
            Err(e) => {
                warn!(error = %e, "save failed");
                self.send(GameEvent::Status(format!("save failed: {e}")));
            }
        }
    }

    /// After a pause, waits for one command before the turn is retried.
    /// Returns true when the loop should stop.
    async fn wait_before_retry(&mut self) -> bool {
        let Some(cmd) = self.cmd_rx.recv().await else {
            self.pending = true;
            return false;
        };
        match cmd {
            UiCommand::Start { placements } => {
                self.restart = Some(placements);
                self.pending = true;
            }
            UiCommand::Reset | UiCommand::Quit => self.pending = true,
            _ => {}
        }
        false
    }

    /// Handles commands that arrived between turns without suspending.
    fn drain_commands(&mut self) {
        while let Ok(cmd) = self.cmd_rx.try_recv() {
            match cmd {
                UiCommand::Start { placements } => {
                    self.restart = Some(placements);
                    self.pending = true;
                }
                UiCommand::Reset | UiCommand::Quit => self.pending = true,
                other => debug!(?other, "dropping stale command"),
            }
        }
    }

    fn slot(&self, color: Color) -> &PlayerSlot {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn send(&self, event: GameEvent) {
        // The UI dropping its receiver means shutdown; the next yield
        // point will observe the closed command channel.
        let _ = self.event_tx.send(event);
    }
}
