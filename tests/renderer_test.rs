//! Tests for the snapshot history and highlight overlays.

use qchess_tui::game::{
    Board, BoardRenderer, CapturePools, Color, Piece, PieceName, Snapshot, Square,
};

fn snapshot_with(file: u8, rank: u8, name: PieceName) -> Snapshot {
    let mut board = Board::new();
    board.place(Square::new(file, rank), Piece::classical(Color::White, name));
    Snapshot::new(board, CapturePools::default())
}

#[test]
fn test_starts_with_single_empty_snapshot() {
    let renderer = BoardRenderer::new();
    assert_eq!(renderer.depth(), 1);
    assert!(renderer.current().board.is_empty_board());
    assert!(renderer.overlays().is_empty());
}

#[test]
fn test_draw_pushes_history_and_clears_overlays() {
    let mut renderer = BoardRenderer::new();
    renderer.checked(vec![(Square::new(1, 1), (10, 20, 30))]);
    renderer.draw(snapshot_with(5, 1, PieceName::King));
    assert_eq!(renderer.depth(), 2);
    assert!(renderer.overlays().is_empty());
    assert!(!renderer.current().board.is_empty(Square::new(5, 1)));
}

#[test]
fn test_reload_drops_overlays_keeps_history() {
    let mut renderer = BoardRenderer::new();
    renderer.draw(snapshot_with(5, 1, PieceName::King));
    renderer.checked(vec![(Square::new(5, 1), (1, 2, 3))]);
    renderer.reload();
    assert_eq!(renderer.depth(), 2);
    assert!(renderer.overlays().is_empty());
}

#[test]
fn test_topmost_overlay_wins() {
    let mut renderer = BoardRenderer::new();
    let square = Square::new(4, 4);
    renderer.checked(vec![(square, (1, 1, 1)), (square, (2, 2, 2))]);
    assert_eq!(renderer.overlay_at(square), Some((2, 2, 2)));
    assert_eq!(renderer.overlay_at(Square::new(1, 1)), None);
}

#[test]
fn test_back_renders_confirmed_state_not_local_pop() {
    let mut renderer = BoardRenderer::new();
    renderer.reset_to(snapshot_with(5, 1, PieceName::King));
    renderer.draw(snapshot_with(5, 2, PieceName::King));

    // The confirmed previous state differs from the locally recorded one.
    let confirmed = snapshot_with(6, 1, PieceName::King);
    renderer.back(confirmed.clone());
    assert_eq!(renderer.depth(), 1);
    assert_eq!(renderer.current(), &confirmed);
}

#[test]
fn test_back_on_single_snapshot_replaces_it() {
    let mut renderer = BoardRenderer::new();
    let confirmed = snapshot_with(1, 1, PieceName::Rook);
    renderer.back(confirmed.clone());
    assert_eq!(renderer.depth(), 1);
    assert_eq!(renderer.current(), &confirmed);
}

#[test]
fn test_reset_to_collapses_history() {
    let mut renderer = BoardRenderer::new();
    renderer.draw(snapshot_with(5, 1, PieceName::King));
    renderer.draw(snapshot_with(5, 2, PieceName::King));
    renderer.reset_to(snapshot_with(1, 1, PieceName::Pawn));
    assert_eq!(renderer.depth(), 1);

    renderer.init();
    assert!(renderer.current().board.is_empty_board());
}
