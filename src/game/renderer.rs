//! Board render state: snapshot history and highlight overlays.
//!
//! The renderer owns what is shown, not how it is painted: the TUI layer
//! reads [`BoardRenderer::current`] and [`BoardRenderer::overlays`] each
//! frame. Snapshots enter the history only through [`BoardRenderer::draw`],
//! so the stack holds exactly the committed states, one per move.

use super::types::{Board, CapturePools};
use super::types::Square;

/// An RGB color triple for a highlight overlay.
pub type Rgb = (u8, u8, u8);

/// An immutable committed board plus the capture pools at that point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// The committed board.
    pub board: Board,
    /// Pieces off the board, per color.
    pub captured: CapturePools,
}

impl Snapshot {
    /// Creates a snapshot.
    pub fn new(board: Board, captured: CapturePools) -> Self {
        Self { board, captured }
    }
}

/// Render state: the snapshot stack and the active highlight overlays.
///
/// The stack is never empty; the last element is current.
#[derive(Debug, Clone)]
pub struct BoardRenderer {
    history: Vec<Snapshot>,
    overlays: Vec<(Square, Rgb)>,
}

impl Default for BoardRenderer {
    fn default() -> Self {
        Self {
            history: vec![Snapshot::default()],
            overlays: Vec::new(),
        }
    }
}

impl BoardRenderer {
    /// Creates a renderer showing a single empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `snapshot` and pushes it as the new current history entry.
    /// Selection overlays do not survive a committed state change.
    pub fn draw(&mut self, snapshot: Snapshot) {
        self.history.push(snapshot);
        self.overlays.clear();
    }

    /// Re-renders the current snapshot without touching history, dropping
    /// any overlays. Used after selection changes that must not create
    /// history entries.
    pub fn reload(&mut self) {
        self.overlays.clear();
    }

    /// Re-renders the current snapshot, then applies highlight overlays in
    /// the order given (later entries drawn on top).
    pub fn checked(&mut self, overlays: Vec<(Square, Rgb)>) {
        self.overlays = overlays;
    }

    /// Applies an undo: pops the current snapshot (when more than one
    /// remains) and renders the server-confirmed previous state. The popped
    /// local snapshot is discarded rather than shown, so the display can
    /// never diverge from the engine.
    pub fn back(&mut self, confirmed: Snapshot) {
        if self.history.len() > 1 {
            self.history.pop();
        }
        if let Some(current) = self.history.last_mut() {
            *current = confirmed;
        }
        self.overlays.clear();
    }

    /// Resets the history to a single snapshot. `init()` with an empty
    /// snapshot is the full game reset; free-placement edits reset to the
    /// edited board so the stack stays at one entry until play starts.
    pub fn reset_to(&mut self, snapshot: Snapshot) {
        self.history = vec![snapshot];
        self.overlays.clear();
    }

    /// Clears history to a single empty snapshot.
    pub fn init(&mut self) {
        self.reset_to(Snapshot::default());
    }

    /// The snapshot currently rendered.
    pub fn current(&self) -> &Snapshot {
        self.history.last().expect("history is never empty")
    }

    /// Active highlight overlays, in draw order.
    pub fn overlays(&self) -> &[(Square, Rgb)] {
        &self.overlays
    }

    /// The topmost overlay color for `square`, if any.
    pub fn overlay_at(&self, square: Square) -> Option<Rgb> {
        self.overlays
            .iter()
            .rev()
            .find(|(sq, _)| *sq == square)
            .map(|(_, color)| *color)
    }

    /// Number of snapshots on the stack.
    pub fn depth(&self) -> usize {
        self.history.len()
    }
}
