//! Domain core: board types, legal-move templates, the selection state
//! machine, render history and the free-placement editor.

pub mod action;
pub mod placement;
pub mod renderer;
pub mod selection;
pub mod types;

pub use action::{ActionTemplate, SquareSet};
pub use placement::{DragOrigin, DragOutcome, PlacementEditor, PlacementError};
pub use renderer::{BoardRenderer, Rgb, Snapshot};
pub use selection::{ClickOutcome, Phase, Selection};
pub use types::{
    placements_from_board, standard_board, standard_placement, Board, CapturePools, Color, Piece,
    PieceName, Placement, Square, Winner,
};
