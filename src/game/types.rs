//! Core domain types shared by the board, the selection machine and the
//! wire layer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Side of a piece or player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// White moves first.
    White,
    /// Black moves second.
    Black,
}

impl Color {
    /// Returns the opposing color.
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Standard piece names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceName {
    /// King.
    King,
    /// Queen.
    Queen,
    /// Rook.
    Rook,
    /// Bishop.
    Bishop,
    /// Knight.
    Knight,
    /// Pawn.
    Pawn,
}

impl PieceName {
    /// Single-letter abbreviation used in move records and ascii rendering.
    pub fn abbreviation(self) -> char {
        match self {
            PieceName::King => 'K',
            PieceName::Queen => 'Q',
            PieceName::Rook => 'R',
            PieceName::Bishop => 'B',
            PieceName::Knight => 'N',
            PieceName::Pawn => 'P',
        }
    }
}

impl fmt::Display for PieceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceName::King => "king",
            PieceName::Queen => "queen",
            PieceName::Rook => "rook",
            PieceName::Bishop => "bishop",
            PieceName::Knight => "knight",
            PieceName::Pawn => "pawn",
        };
        write!(f, "{name}")
    }
}

/// A board coordinate: file (column) and rank (row), each in `1..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(u8, u8)", into = "(u8, u8)")]
pub struct Square {
    /// File (column), 1..=8, a..h.
    pub file: u8,
    /// Rank (row), 1..=8.
    pub rank: u8,
}

impl Square {
    /// Creates a square. Callers are expected to pass coordinates in range;
    /// squares decoded from the wire are validated by the client layer.
    pub fn new(file: u8, rank: u8) -> Self {
        Self { file, rank }
    }

    /// Whether both coordinates lie in `1..=8`.
    pub fn in_bounds(self) -> bool {
        (1..=8).contains(&self.file) && (1..=8).contains(&self.rank)
    }
}

impl From<(u8, u8)> for Square {
    fn from((file, rank): (u8, u8)) -> Self {
        Self { file, rank }
    }
}

impl From<Square> for (u8, u8) {
    fn from(sq: Square) -> Self {
        (sq.file, sq.rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file.saturating_sub(1)) as char;
        write!(f, "{}{}", file, self.rank)
    }
}

/// A piece on a square, possibly superposed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    /// The piece's color.
    pub color: Color,
    /// The piece's name.
    pub name: PieceName,
    /// Occupancy in (0, 1]. `1.0` denotes classical certainty.
    pub occupancy: f64,
}

impl Piece {
    /// Creates a classical (occupancy 1) piece.
    pub fn classical(color: Color, name: PieceName) -> Self {
        Self {
            color,
            name,
            occupancy: 1.0,
        }
    }

    /// Whether the piece occupies its square with certainty.
    pub fn is_classical(&self) -> bool {
        self.occupancy >= 1.0
    }
}

/// A committed board: a partial mapping from square to piece.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    squares: HashMap<Square, Piece>,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the piece on `square`, if any.
    pub fn get(&self, square: Square) -> Option<&Piece> {
        self.squares.get(&square)
    }

    /// Places a piece, returning the previous occupant if any.
    pub fn place(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.squares.insert(square, piece)
    }

    /// Removes and returns the piece on `square`.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares.remove(&square)
    }

    /// Whether `square` is empty.
    pub fn is_empty(&self, square: Square) -> bool {
        !self.squares.contains_key(&square)
    }

    /// Iterates over occupied squares.
    pub fn iter(&self) -> impl Iterator<Item = (&Square, &Piece)> {
        self.squares.iter()
    }

    /// Number of occupied squares.
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// Whether no square is occupied.
    pub fn is_empty_board(&self) -> bool {
        self.squares.is_empty()
    }
}

impl FromIterator<(Square, Piece)> for Board {
    fn from_iter<I: IntoIterator<Item = (Square, Piece)>>(iter: I) -> Self {
        Self {
            squares: iter.into_iter().collect(),
        }
    }
}

/// Pieces removed from play, per color, in capture order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapturePools {
    /// White pieces off the board.
    pub white: Vec<PieceName>,
    /// Black pieces off the board.
    pub black: Vec<PieceName>,
}

impl CapturePools {
    /// The pool holding pieces of `color`.
    pub fn of(&self, color: Color) -> &Vec<PieceName> {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Mutable access to the pool holding pieces of `color`.
    pub fn of_mut(&mut self, color: Color) -> &mut Vec<PieceName> {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

/// Outcome indicator returned by the engine after each move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    /// Game still in progress.
    Ongoing,
    /// White captured the black king.
    White,
    /// Black captured the white king.
    Black,
    /// Both kings are gone.
    Draw,
}

impl Winner {
    /// Decodes the engine's integer encoding: 0 ongoing, 1 white, 2 black,
    /// -1 draw.
    pub fn from_code(code: i8) -> Self {
        match code {
            1 => Winner::White,
            2 => Winner::Black,
            -1 => Winner::Draw,
            _ => Winner::Ongoing,
        }
    }

    /// Whether the game has ended.
    pub fn is_over(self) -> bool {
        self != Winner::Ongoing
    }
}

/// One piece of the free-placement layout sent to the engine when a game
/// starts: where the piece may be, with per-place occupancy.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// The piece's color.
    pub color: Color,
    /// The piece's name.
    pub name: PieceName,
    /// Places with occupancy, usually a single `(file, rank, 1.0)`.
    pub places: Vec<(u8, u8, f64)>,
}

/// The canonical starting placement.
pub fn standard_placement() -> Vec<Placement> {
    let back = [
        PieceName::Rook,
        PieceName::Knight,
        PieceName::Bishop,
        PieceName::Queen,
        PieceName::King,
        PieceName::Bishop,
        PieceName::Knight,
        PieceName::Rook,
    ];
    let mut placements = Vec::with_capacity(32);
    for (i, name) in back.iter().enumerate() {
        let file = i as u8 + 1;
        placements.push(Placement {
            color: Color::White,
            name: *name,
            places: vec![(file, 1, 1.0)],
        });
        placements.push(Placement {
            color: Color::Black,
            name: *name,
            places: vec![(file, 8, 1.0)],
        });
    }
    for file in 1..=8 {
        placements.push(Placement {
            color: Color::White,
            name: PieceName::Pawn,
            places: vec![(file, 2, 1.0)],
        });
        placements.push(Placement {
            color: Color::Black,
            name: PieceName::Pawn,
            places: vec![(file, 7, 1.0)],
        });
    }
    placements
}

/// Converts an edited board into the placement list the engine accepts,
/// one entry per occupied square.
pub fn placements_from_board(board: &Board) -> Vec<Placement> {
    let mut placements: Vec<Placement> = board
        .iter()
        .map(|(square, piece)| Placement {
            color: piece.color,
            name: piece.name,
            places: vec![(square.file, square.rank, piece.occupancy)],
        })
        .collect();
    // Deterministic order keeps engine-side records stable.
    placements.sort_by_key(|p| (p.places[0].0, p.places[0].1));
    placements
}

/// The standard starting board, for free-placement editing before a game.
pub fn standard_board() -> Board {
    standard_placement()
        .into_iter()
        .flat_map(|p| {
            let (color, name) = (p.color, p.name);
            p.places.into_iter().map(move |(file, rank, occupancy)| {
                (
                    Square::new(file, rank),
                    Piece {
                        color,
                        name,
                        occupancy,
                    },
                )
            })
        })
        .collect()
}
