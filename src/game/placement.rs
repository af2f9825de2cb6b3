//! Free-placement drag editing, used only before a game starts.
//!
//! The gesture machine is decoupled from the input API: the TUI layer maps
//! mouse events to [`PlacementEditor::begin`] / [`PlacementEditor::drag_to`]
//! / [`PlacementEditor::finish`] and owns the board and pools being edited.

use super::types::{Board, CapturePools, Color, Piece, Square};
use derive_more::{Display, Error};

/// Why a drag gesture was rejected or failed to start.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum PlacementError {
    /// The guard predicate reported an active game; editing is only
    /// available in a fresh free-placement context.
    #[display("free placement is disabled while a game is active")]
    GameActive,
    /// A gesture is already in progress.
    #[display("a drag gesture is already in progress")]
    GestureInProgress,
    /// Nothing to pick up at the gesture origin.
    #[display("no piece at drag origin")]
    EmptyOrigin,
}

/// Where a drag gesture picked its piece up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOrigin {
    /// A slot in the capture pool of the given color.
    Pool(Color, usize),
    /// An occupied board square.
    Board(Square),
}

/// How a finished gesture resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// The piece landed on a square; any previous occupant moved to its
    /// color's capture pool.
    Committed {
        /// The square the piece landed on.
        square: Square,
        /// The occupant displaced into its pool, if any.
        displaced: Option<Piece>,
    },
    /// The gesture ended off the board; the piece returned to its color's
    /// capture pool (for a pool origin this is a plain cancel).
    Cancelled,
}

/// In-flight gesture state.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Dragging {
        origin: DragOrigin,
        piece: Piece,
        at: (u16, u16),
    },
}

/// The drag editor. Holds only gesture state; the board and pools being
/// edited are passed in by the owner.
#[derive(Debug, Clone)]
pub struct PlacementEditor {
    gesture: Gesture,
}

impl Default for PlacementEditor {
    fn default() -> Self {
        Self {
            gesture: Gesture::Idle,
        }
    }
}

impl PlacementEditor {
    /// Creates an idle editor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    /// The piece in flight and its pointer position, if dragging.
    pub fn in_flight(&self) -> Option<(Piece, (u16, u16))> {
        match self.gesture {
            Gesture::Dragging { piece, at, .. } => Some((piece, at)),
            Gesture::Idle => None,
        }
    }

    /// Starts a gesture. The guard predicate is queried first; when it
    /// reports an active game the gesture never starts and nothing is
    /// mutated. On success the piece is lifted out of its origin so the
    /// base board renders without it.
    pub fn begin(
        &mut self,
        origin: DragOrigin,
        at: (u16, u16),
        board: &mut Board,
        pools: &mut CapturePools,
        guard: impl Fn() -> bool,
    ) -> Result<(), PlacementError> {
        if !guard() {
            return Err(PlacementError::GameActive);
        }
        if self.is_dragging() {
            return Err(PlacementError::GestureInProgress);
        }

        let piece = match origin {
            DragOrigin::Pool(color, index) => {
                let pool = pools.of_mut(color);
                if index >= pool.len() {
                    return Err(PlacementError::EmptyOrigin);
                }
                let name = pool.remove(index);
                Piece::classical(color, name)
            }
            DragOrigin::Board(square) => {
                board.remove(square).ok_or(PlacementError::EmptyOrigin)?
            }
        };

        self.gesture = Gesture::Dragging { origin, piece, at };
        Ok(())
    }

    /// Updates the pointer position of an in-progress drag.
    pub fn drag_to(&mut self, at: (u16, u16)) {
        if let Gesture::Dragging { at: pos, .. } = &mut self.gesture {
            *pos = at;
        }
    }

    /// Ends the gesture. `drop_square` is the board square under the
    /// pointer, or `None` when the pointer is outside the board bounds.
    /// Returns [`DragOutcome::Cancelled`] when the editor was idle.
    pub fn finish(
        &mut self,
        drop_square: Option<Square>,
        board: &mut Board,
        pools: &mut CapturePools,
    ) -> DragOutcome {
        let (piece, _origin) = match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Dragging { piece, origin, .. } => (piece, origin),
            Gesture::Idle => return DragOutcome::Cancelled,
        };

        match drop_square.filter(|sq| sq.in_bounds()) {
            Some(square) => {
                let displaced = board.place(square, piece);
                if let Some(occupant) = displaced {
                    pools.of_mut(occupant.color).push(occupant.name);
                }
                DragOutcome::Committed { square, displaced }
            }
            None => {
                pools.of_mut(piece.color).push(piece.name);
                DragOutcome::Cancelled
            }
        }
    }
}
