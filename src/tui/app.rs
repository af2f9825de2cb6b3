//! Retained UI state: board renderer, selection machine, placement editor
//! and the status line, updated by turn-loop events and pointer input.

use crate::game::{
    placements_from_board, standard_board, ActionTemplate, Board, BoardRenderer, CapturePools,
    ClickOutcome, Color, DragOrigin, PieceName, PlacementEditor, PlacementError, Selection,
    Snapshot, Square, Winner,
};
use tracing::debug;

use super::orchestrator::{GameEvent, UiCommand};

/// What the client is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Free placement: pieces may be dragged, no game is active.
    Setup,
    /// A game is running.
    Playing,
    /// The turn loop paused on a failure; user action required.
    Paused,
    /// The game ended.
    Over(Winner),
}

/// Retained application state.
pub struct App {
    mode: Mode,
    renderer: BoardRenderer,
    selection: Selection,
    templates: Vec<ActionTemplate>,
    editor: PlacementEditor,
    setup_board: Board,
    setup_pools: CapturePools,
    records: Vec<String>,
    status: String,
}

impl App {
    /// Creates the app in free-placement mode on the standard position.
    pub fn new() -> Self {
        let setup_board = standard_board();
        let mut renderer = BoardRenderer::new();
        renderer.reset_to(Snapshot::new(setup_board.clone(), CapturePools::default()));
        Self {
            mode: Mode::Setup,
            renderer,
            selection: Selection::default(),
            templates: Vec::new(),
            editor: PlacementEditor::new(),
            setup_board,
            setup_pools: CapturePools::default(),
            records: Vec::new(),
            status: "Free placement: drag pieces, press 's' to start".to_string(),
        }
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Render state for the UI layer.
    pub fn renderer(&self) -> &BoardRenderer {
        &self.renderer
    }

    /// The in-flight drag, for painting the piece at the pointer.
    pub fn editor(&self) -> &PlacementEditor {
        &self.editor
    }

    /// Move records so far.
    pub fn records(&self) -> &[String] {
        &self.records
    }

    /// Status line text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether clicks currently feed the selection machine.
    pub fn accepting_clicks(&self) -> bool {
        self.mode == Mode::Playing && !self.templates.is_empty()
    }

    /// Applies a turn-loop event.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "handling game event");
        match event {
            GameEvent::Started => {
                self.mode = Mode::Playing;
                self.records.clear();
                self.templates.clear();
                // The setup layout becomes the first committed snapshot.
                self.renderer.reset_to(Snapshot::new(
                    self.setup_board.clone(),
                    self.setup_pools.clone(),
                ));
                self.status = "Game started".to_string();
            }
            GameEvent::LegalActions(templates) => {
                if self.mode == Mode::Paused {
                    self.mode = Mode::Playing;
                }
                self.templates = templates;
                self.selection.reset(&self.templates);
                self.renderer.reload();
                self.status = "Your move: click a source square".to_string();
            }
            GameEvent::EngineThinking { player } => {
                if self.mode == Mode::Paused {
                    self.mode = Mode::Playing;
                }
                self.status = format!("{player} is thinking...");
            }
            GameEvent::MoveApplied {
                board,
                captured,
                record,
            } => {
                if self.mode == Mode::Paused {
                    self.mode = Mode::Playing;
                }
                self.renderer.draw(Snapshot::new(board, captured));
                self.records.push(record);
                self.templates.clear();
                self.selection.reset(&self.templates);
            }
            GameEvent::UndoApplied { board, captured } => {
                // Render the engine-confirmed state, never the local pop.
                self.renderer.back(Snapshot::new(board, captured));
                self.records.pop();
                self.templates.clear();
                self.status = "Undid last move".to_string();
            }
            GameEvent::Loaded { board, captured } => {
                self.mode = Mode::Setup;
                self.setup_board = board;
                self.setup_pools = captured;
                self.records.clear();
                self.templates.clear();
                self.selection.reset(&self.templates);
                self.sync_setup();
                self.status = "Loaded saved position: edit or press 's' to start".to_string();
            }
            GameEvent::Paused { message, retriable } => {
                self.mode = Mode::Paused;
                self.templates.clear();
                self.selection.reset(&self.templates);
                self.renderer.reload();
                // Only a waiting turn can be retried in place; otherwise
                // a restart is the way out.
                self.status = if retriable {
                    format!("{message} (enter to retry, s to restart)")
                } else {
                    format!("{message} (s to restart)")
                };
            }
            GameEvent::Status(message) => {
                self.status = message;
            }
            GameEvent::GameOver(winner) => {
                self.mode = Mode::Over(winner);
                self.status = match winner {
                    Winner::White => "Game over: white wins".to_string(),
                    Winner::Black => "Game over: black wins".to_string(),
                    Winner::Draw => "Game over: draw".to_string(),
                    Winner::Ongoing => "Game over".to_string(),
                };
            }
        }
    }

    /// Feeds a board click to the selection machine. Returns the command
    /// to send when the selection committed a move.
    pub fn on_board_click(&mut self, square: Square, allow_second: bool) -> Option<UiCommand> {
        if !self.accepting_clicks() {
            return None;
        }
        match self
            .selection
            .on_square_clicked(square, allow_second, &self.templates)
        {
            ClickOutcome::Unchanged => None,
            ClickOutcome::Updated => {
                self.renderer.checked(self.selection.highlights());
                None
            }
            ClickOutcome::Cancelled => {
                self.renderer.reload();
                None
            }
            ClickOutcome::Commit { sources, targets } => {
                self.renderer.reload();
                self.templates.clear();
                self.status = "Submitting move...".to_string();
                Some(UiCommand::Move { sources, targets })
            }
        }
    }

    /// Starts a drag gesture in free-placement mode.
    pub fn on_drag_start(&mut self, origin: DragOrigin, at: (u16, u16)) {
        let mode = self.mode;
        let result = self.editor.begin(
            origin,
            at,
            &mut self.setup_board,
            &mut self.setup_pools,
            || mode == Mode::Setup,
        );
        match result {
            Ok(()) => self.sync_setup(),
            Err(PlacementError::GameActive) => {
                self.status = "Placement is only available before a game".to_string();
            }
            Err(e) => debug!(error = %e, "drag did not start"),
        }
    }

    /// Updates the pointer position of an in-progress drag.
    pub fn on_drag_move(&mut self, at: (u16, u16)) {
        self.editor.drag_to(at);
    }

    /// Ends a drag gesture over `drop_square` (or off-board).
    pub fn on_drag_end(&mut self, drop_square: Option<Square>) {
        if !self.editor.is_dragging() {
            return;
        }
        self.editor
            .finish(drop_square, &mut self.setup_board, &mut self.setup_pools);
        self.sync_setup();
    }

    /// The start command for the current free-placement layout, when the
    /// app is in a state a game may start from.
    pub fn start_command(&mut self) -> Option<UiCommand> {
        match self.mode {
            Mode::Setup | Mode::Paused | Mode::Over(_) => {
                self.status = "Starting game...".to_string();
                Some(UiCommand::Start {
                    placements: placements_from_board(&self.setup_board),
                })
            }
            Mode::Playing => None,
        }
    }

    /// The save command for the current position, when a game is running.
    /// Names count the moves played so saves stay distinguishable.
    pub fn save_command(&mut self) -> Option<UiCommand> {
        if self.mode == Mode::Playing {
            let name = format!("endgame-{}", self.records.len());
            self.status = format!("Saving {name}...");
            Some(UiCommand::Save { name })
        } else {
            None
        }
    }

    /// The undo command, when a game is running.
    pub fn undo_command(&mut self) -> Option<UiCommand> {
        if self.mode == Mode::Playing {
            self.status = "Undoing...".to_string();
            Some(UiCommand::Undo)
        } else {
            None
        }
    }

    /// Returns to free placement on the standard position.
    pub fn reset(&mut self) {
        self.mode = Mode::Setup;
        self.setup_board = standard_board();
        self.setup_pools = CapturePools::default();
        self.templates.clear();
        self.selection.reset(&self.templates);
        self.records.clear();
        self.editor = PlacementEditor::new();
        self.renderer.init();
        self.sync_setup();
        self.status = "Free placement: drag pieces, press 's' to start".to_string();
    }

    /// Whether `square` currently holds a piece that a drag could pick up.
    pub fn piece_at(&self, square: Square) -> bool {
        !self.setup_board.is_empty(square)
    }

    /// Number of captured pieces of `color` available to drag gestures.
    pub fn pool_len(&self, color: Color) -> usize {
        self.setup_pools.of(color).len()
    }

    /// The free-placement pool contents of `color`, in capture order.
    pub fn pool_names(&self, color: Color) -> Vec<PieceName> {
        self.setup_pools.of(color).clone()
    }

    /// History stack keeps a single entry while placement editing goes on.
    fn sync_setup(&mut self) {
        self.renderer.reset_to(Snapshot::new(
            self.setup_board.clone(),
            self.setup_pools.clone(),
        ));
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
