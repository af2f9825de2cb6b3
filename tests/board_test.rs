//! Tests for board construction and the free-placement layout export.

use qchess_tui::game::{
    placements_from_board, standard_board, standard_placement, Board, Color, Piece, PieceName,
    Square,
};

#[test]
fn test_standard_placement_has_thirty_two_pieces() {
    let placements = standard_placement();
    assert_eq!(placements.len(), 32);
    let kings = placements
        .iter()
        .filter(|p| p.name == PieceName::King)
        .count();
    assert_eq!(kings, 2);
    // Every placement is a single classical square.
    assert!(placements
        .iter()
        .all(|p| p.places.len() == 1 && p.places[0].2 == 1.0));
}

#[test]
fn test_standard_board_layout() {
    let board = standard_board();
    assert_eq!(board.len(), 32);
    let king = board.get(Square::new(5, 1)).unwrap();
    assert_eq!(king.name, PieceName::King);
    assert_eq!(king.color, Color::White);
    let queen = board.get(Square::new(4, 8)).unwrap();
    assert_eq!(queen.name, PieceName::Queen);
    assert_eq!(queen.color, Color::Black);
    assert!(board.is_empty(Square::new(5, 5)));
}

#[test]
fn test_placements_from_board_are_sorted() {
    let mut board = Board::new();
    board.place(
        Square::new(7, 3),
        Piece::classical(Color::Black, PieceName::Knight),
    );
    board.place(
        Square::new(2, 5),
        Piece::classical(Color::White, PieceName::Rook),
    );
    board.place(
        Square::new(2, 1),
        Piece::classical(Color::White, PieceName::King),
    );

    let placements = placements_from_board(&board);
    let coords: Vec<(u8, u8)> = placements
        .iter()
        .map(|p| (p.places[0].0, p.places[0].1))
        .collect();
    assert_eq!(coords, vec![(2, 1), (2, 5), (7, 3)]);
}

#[test]
fn test_placements_round_trip_through_board() {
    let board = standard_board();
    let placements = placements_from_board(&board);
    assert_eq!(placements.len(), 32);
    // Superposed occupancy survives the export.
    let mut superposed = Board::new();
    superposed.place(
        Square::new(4, 4),
        Piece {
            color: Color::White,
            name: PieceName::Bishop,
            occupancy: 0.25,
        },
    );
    let exported = placements_from_board(&superposed);
    assert_eq!(exported[0].places, vec![(4, 4, 0.25)]);
}

#[test]
fn test_color_opponent() {
    assert_eq!(Color::White.opponent(), Color::Black);
    assert_eq!(Color::Black.opponent(), Color::White);
    assert_eq!(Color::White.to_string(), "white");
}
