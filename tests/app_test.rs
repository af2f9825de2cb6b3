//! Tests for the retained UI state across game events and pointer input.

use qchess_tui::game::{
    ActionTemplate, Board, CapturePools, Color, DragOrigin, Piece, PieceName, Square, Winner,
};
use qchess_tui::tui::{App, GameEvent, Mode, UiCommand};

fn sq(file: u8, rank: u8) -> Square {
    Square::new(file, rank)
}

fn move_applied(file: u8, rank: u8, record: &str) -> GameEvent {
    let mut board = Board::new();
    board.place(
        sq(file, rank),
        Piece::classical(Color::White, PieceName::King),
    );
    GameEvent::MoveApplied {
        board,
        captured: CapturePools::default(),
        record: record.to_string(),
    }
}

#[test]
fn test_starts_in_setup_with_standard_board() {
    let app = App::new();
    assert_eq!(app.mode(), Mode::Setup);
    assert_eq!(app.renderer().current().board.len(), 32);
    assert!(!app.accepting_clicks());
}

#[test]
fn test_started_event_seeds_history_from_setup_layout() {
    let mut app = App::new();
    app.handle_event(GameEvent::Started);
    assert_eq!(app.mode(), Mode::Playing);
    assert_eq!(app.renderer().depth(), 1);
    assert_eq!(app.renderer().current().board.len(), 32);
}

#[test]
fn test_move_events_grow_history_and_records() {
    let mut app = App::new();
    app.handle_event(GameEvent::Started);
    app.handle_event(move_applied(5, 2, "e1e2"));
    app.handle_event(move_applied(5, 3, "e2e3"));
    assert_eq!(app.renderer().depth(), 3);
    assert_eq!(app.records(), &["e1e2".to_string(), "e2e3".to_string()]);
}

#[test]
fn test_undo_event_shows_confirmed_state() {
    let mut app = App::new();
    app.handle_event(GameEvent::Started);
    app.handle_event(move_applied(5, 2, "e1e2"));

    let mut confirmed = Board::new();
    confirmed.place(sq(6, 6), Piece::classical(Color::Black, PieceName::Queen));
    app.handle_event(GameEvent::UndoApplied {
        board: confirmed.clone(),
        captured: CapturePools::default(),
    });
    assert_eq!(app.renderer().depth(), 1);
    assert_eq!(&app.renderer().current().board, &confirmed);
    assert!(app.records().is_empty());
}

#[test]
fn test_click_commit_yields_move_command() {
    let mut app = App::new();
    app.handle_event(GameEvent::Started);
    app.handle_event(GameEvent::LegalActions(vec![ActionTemplate::new(
        vec![sq(5, 2)],
        vec![sq(5, 3)],
    )]));
    assert!(app.accepting_clicks());

    assert_eq!(app.on_board_click(sq(5, 2), false), None);
    assert!(!app.renderer().overlays().is_empty());

    let command = app.on_board_click(sq(5, 3), false);
    match command {
        Some(UiCommand::Move { sources, targets }) => {
            assert_eq!(sources, vec![sq(5, 2)]);
            assert_eq!(targets, vec![sq(5, 3)]);
        }
        other => panic!("expected a move command, got {other:?}"),
    }
    // The committed selection stops accepting clicks until the next list.
    assert!(!app.accepting_clicks());
}

#[test]
fn test_clicks_ignored_outside_play() {
    let mut app = App::new();
    assert_eq!(app.on_board_click(sq(5, 2), false), None);
}

#[test]
fn test_drag_rejected_during_play() {
    let mut app = App::new();
    app.handle_event(GameEvent::Started);
    app.on_drag_start(DragOrigin::Board(sq(5, 2)), (0, 0));
    assert!(!app.editor().is_dragging());
}

#[test]
fn test_setup_drag_moves_piece() {
    let mut app = App::new();
    assert!(app.piece_at(sq(5, 2)));
    app.on_drag_start(DragOrigin::Board(sq(5, 2)), (0, 0));
    assert!(app.editor().is_dragging());
    // The lifted piece leaves the rendered board immediately.
    assert!(app.renderer().current().board.is_empty(sq(5, 2)));

    app.on_drag_move((10, 5));
    app.on_drag_end(Some(sq(5, 4)));
    assert!(!app.editor().is_dragging());
    assert!(app.piece_at(sq(5, 4)));
    assert!(!app.piece_at(sq(5, 2)));
}

#[test]
fn test_setup_drag_off_board_pools_piece() {
    let mut app = App::new();
    app.on_drag_start(DragOrigin::Board(sq(5, 2)), (0, 0));
    app.on_drag_end(None);
    assert_eq!(app.pool_len(Color::White), 1);
    assert_eq!(app.pool_names(Color::White), vec![PieceName::Pawn]);
}

#[test]
fn test_game_over_blocks_input_allows_restart() {
    let mut app = App::new();
    app.handle_event(GameEvent::Started);
    app.handle_event(GameEvent::GameOver(Winner::White));
    assert_eq!(app.mode(), Mode::Over(Winner::White));
    assert!(!app.accepting_clicks());
    assert!(matches!(app.start_command(), Some(UiCommand::Start { .. })));
}

#[test]
fn test_pause_and_resume() {
    let mut app = App::new();
    app.handle_event(GameEvent::Started);
    app.handle_event(GameEvent::Paused {
        message: "could not fetch moves".to_string(),
        retriable: true,
    });
    assert_eq!(app.mode(), Mode::Paused);
    assert!(app.undo_command().is_none());
    assert!(app.status().contains("enter to retry"));

    app.handle_event(GameEvent::LegalActions(vec![]));
    assert_eq!(app.mode(), Mode::Playing);
}

#[test]
fn test_pause_hint_matches_recovery() {
    let mut app = App::new();
    app.handle_event(GameEvent::Started);
    // An execution failure cannot be retried in place.
    app.handle_event(GameEvent::Paused {
        message: "move failed".to_string(),
        retriable: false,
    });
    assert!(app.status().contains("s to restart"));
    assert!(!app.status().contains("enter to retry"));
}

#[test]
fn test_loaded_event_becomes_setup_layout() {
    let mut app = App::new();
    let mut board = Board::new();
    board.place(sq(4, 4), Piece::classical(Color::White, PieceName::Queen));
    app.handle_event(GameEvent::Loaded {
        board: board.clone(),
        captured: CapturePools {
            white: vec![],
            black: vec![PieceName::Pawn],
        },
    });
    assert_eq!(app.mode(), Mode::Setup);
    assert_eq!(&app.renderer().current().board, &board);
    assert_eq!(app.pool_len(Color::Black), 1);
    // The loaded layout is what a subsequent start exports.
    match app.start_command() {
        Some(UiCommand::Start { placements }) => assert_eq!(placements.len(), 1),
        other => panic!("expected a start command, got {other:?}"),
    }
}

#[test]
fn test_save_command_names_by_move_count() {
    let mut app = App::new();
    assert_eq!(app.save_command(), None);

    app.handle_event(GameEvent::Started);
    assert_eq!(
        app.save_command(),
        Some(UiCommand::Save {
            name: "endgame-0".to_string()
        })
    );
    app.handle_event(move_applied(5, 2, "e1e2"));
    assert_eq!(
        app.save_command(),
        Some(UiCommand::Save {
            name: "endgame-1".to_string()
        })
    );
}

#[test]
fn test_status_event_updates_status_line() {
    let mut app = App::new();
    app.handle_event(GameEvent::Started);
    app.handle_event(GameEvent::Status("saved as endgame-0".to_string()));
    assert_eq!(app.status(), "saved as endgame-0");
    assert_eq!(app.mode(), Mode::Playing);
}

#[test]
fn test_reset_returns_to_setup() {
    let mut app = App::new();
    app.handle_event(GameEvent::Started);
    app.handle_event(move_applied(5, 2, "e1e2"));
    app.reset();
    assert_eq!(app.mode(), Mode::Setup);
    assert_eq!(app.renderer().depth(), 1);
    assert!(app.records().is_empty());
    assert_eq!(app.renderer().current().board.len(), 32);
}

#[test]
fn test_start_command_exports_edited_layout() {
    let mut app = App::new();
    app.on_drag_start(DragOrigin::Board(sq(5, 2)), (0, 0));
    app.on_drag_end(None); // 31 pieces remain
    match app.start_command() {
        Some(UiCommand::Start { placements }) => assert_eq!(placements.len(), 31),
        other => panic!("expected a start command, got {other:?}"),
    }
}
