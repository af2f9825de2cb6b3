//! Frame painting: the board grid, capture pools, move records and the
//! status bar. All state is read from [`App`]; nothing here mutates.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::game::{Color as Side, Piece, PieceName, Square};

use super::app::{App, Mode};
use super::input::{BoardGeometry, CELL_H, CELL_W, RANK_GUTTER};

const LIGHT_SQUARE: Color = Color::Rgb(181, 136, 99);
const DARK_SQUARE: Color = Color::Rgb(101, 67, 33);
const WHITE_PIECE: Color = Color::Rgb(248, 248, 242);
const BLACK_PIECE: Color = Color::Rgb(20, 20, 20);

/// Piece glyph table, resolved once at startup from the cli `--ascii` flag.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    ascii: bool,
}

impl Glyphs {
    /// Creates a glyph table; `ascii` falls back to letter abbreviations.
    pub fn new(ascii: bool) -> Self {
        Self { ascii }
    }

    /// The glyph for a piece of the given side and name.
    pub fn piece(&self, side: Side, name: PieceName) -> char {
        if self.ascii {
            let letter = name.abbreviation();
            return match side {
                Side::White => letter,
                Side::Black => letter.to_ascii_lowercase(),
            };
        }
        match (side, name) {
            (Side::White, PieceName::King) => '♔',
            (Side::White, PieceName::Queen) => '♕',
            (Side::White, PieceName::Rook) => '♖',
            (Side::White, PieceName::Bishop) => '♗',
            (Side::White, PieceName::Knight) => '♘',
            (Side::White, PieceName::Pawn) => '♙',
            (Side::Black, PieceName::King) => '♚',
            (Side::Black, PieceName::Queen) => '♛',
            (Side::Black, PieceName::Rook) => '♜',
            (Side::Black, PieceName::Bishop) => '♝',
            (Side::Black, PieceName::Knight) => '♞',
            (Side::Black, PieceName::Pawn) => '♟',
        }
    }
}

/// The screen regions shared by painting and pointer hit-testing.
#[derive(Debug, Clone, Copy)]
pub struct Panes {
    /// Title line.
    pub title: Rect,
    /// The board pane (labels included).
    pub board: Rect,
    /// Grid placement inside the board pane.
    pub geometry: BoardGeometry,
    /// Inner line of the black capture pool, one glyph per two columns.
    pub black_pool: Rect,
    /// Inner line of the white capture pool.
    pub white_pool: Rect,
    /// Move record list.
    pub records: Rect,
    /// Status bar.
    pub status: Rect,
}

/// Splits the terminal area into panes. The event loop calls this with the
/// same area as the draw pass, so hit-testing always matches the picture.
pub fn panes(area: Rect) -> Panes {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(17),
            Constraint::Length(2),
        ])
        .split(area);
    let board_width = RANK_GUTTER + 8 * CELL_W + 1;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(24)])
        .split(rows[1]);
    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
        ])
        .split(columns[1]);
    Panes {
        title: rows[0],
        board: columns[0],
        geometry: BoardGeometry::new(columns[0]),
        black_pool: inner_line(side[0]),
        white_pool: inner_line(side[1]),
        records: side[2],
        status: rows[2],
    }
}

fn inner_line(block: Rect) -> Rect {
    Rect {
        x: block.x + 1,
        y: block.y + 1,
        width: block.width.saturating_sub(2),
        height: 1,
    }
}

/// Paints one frame.
pub fn draw(frame: &mut Frame, app: &App, glyphs: &Glyphs) {
    let panes = panes(frame.area());

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("quantum chess", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(mode_label(app.mode()), Style::default().fg(Color::DarkGray)),
        ])),
        panes.title,
    );

    draw_board(frame, app, glyphs, &panes);
    draw_pool(frame, app, glyphs, Side::Black, "black captured", panes.black_pool);
    draw_pool(frame, app, glyphs, Side::White, "white captured", panes.white_pool);
    draw_records(frame, app, panes.records);
    draw_status(frame, app, panes.status);
    draw_in_flight(frame, app, glyphs);
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Setup => "setup",
        Mode::Playing => "playing",
        Mode::Paused => "paused",
        Mode::Over(_) => "game over",
    }
}

fn draw_board(frame: &mut Frame, app: &App, glyphs: &Glyphs, panes: &Panes) {
    let area = frame.area();
    let snapshot = app.renderer().current();
    for rank in 1..=8u8 {
        for file in 1..=8u8 {
            let square = Square::new(file, rank);
            let rect = panes.geometry.cell_rect(square);
            if !contains(area, rect) {
                continue;
            }
            let background = app
                .renderer()
                .overlay_at(square)
                .map(|(r, g, b)| Color::Rgb(r, g, b))
                .unwrap_or(if (file + rank) % 2 == 1 {
                    LIGHT_SQUARE
                } else {
                    DARK_SQUARE
                });
            let content = match snapshot.board.get(square) {
                Some(piece) => cell_text(glyphs, piece),
                None => Line::raw(""),
            };
            frame.render_widget(
                Paragraph::new(content)
                    .centered()
                    .style(Style::default().bg(background)),
                rect,
            );
        }
    }

    let (origin_x, origin_y) = panes.geometry.origin();
    for rank in 1..=8u8 {
        let rect = Rect {
            x: panes.board.x,
            y: origin_y + u16::from(8 - rank) * CELL_H,
            width: RANK_GUTTER,
            height: 1,
        };
        if contains(area, rect) {
            frame.render_widget(
                Paragraph::new(format!("{rank} ")).right_aligned(),
                rect,
            );
        }
    }
    let labels = Rect {
        x: origin_x,
        y: panes.geometry.label_row(),
        width: 8 * CELL_W,
        height: 1,
    };
    if contains(area, labels) {
        let files: String = (b'a'..=b'h')
            .map(|f| format!("{:^width$}", f as char, width = CELL_W as usize))
            .collect();
        frame.render_widget(Paragraph::new(files), labels);
    }
}

/// A piece glyph plus an eighth-block occupancy gauge for superposed
/// pieces; classical pieces render the glyph alone.
fn cell_text(glyphs: &Glyphs, piece: &Piece) -> Line<'static> {
    let fg = match piece.color {
        Side::White => WHITE_PIECE,
        Side::Black => BLACK_PIECE,
    };
    let glyph = glyphs.piece(piece.color, piece.name);
    let text = if piece.is_classical() {
        glyph.to_string()
    } else {
        format!("{glyph}{}", gauge(piece.occupancy))
    };
    Line::styled(text, Style::default().fg(fg).add_modifier(Modifier::BOLD))
}

fn gauge(occupancy: f64) -> char {
    const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    let index = (occupancy * 8.0).ceil().clamp(1.0, 8.0) as usize - 1;
    BLOCKS[index]
}

fn draw_pool(
    frame: &mut Frame,
    app: &App,
    glyphs: &Glyphs,
    side: Side,
    title: &str,
    inner: Rect,
) {
    let block_area = Rect {
        x: inner.x - 1,
        y: inner.y - 1,
        width: inner.width + 2,
        height: 3,
    };
    if !contains(frame.area(), block_area) {
        return;
    }
    frame.render_widget(Block::default().borders(Borders::ALL).title(title), block_area);

    // During setup the editable pools are shown; in play, the committed
    // capture pools from the current snapshot.
    let names: Vec<PieceName> = if app.mode() == Mode::Setup {
        app.pool_names(side)
    } else {
        app.renderer().current().captured.of(side).clone()
    };
    let line: String = names
        .iter()
        .map(|name| format!("{} ", glyphs.piece(side, *name)))
        .collect();
    frame.render_widget(Paragraph::new(line), inner);
}

fn draw_records(frame: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let total = app.records().len();
    let skip = total.saturating_sub(visible);
    let items: Vec<ListItem> = app
        .records()
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(i, record)| ListItem::new(format!("{:>3}. {record}", i + 1)))
        .collect();
    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title("moves")),
        area,
    );
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::raw(app.status().to_string()),
        Line::styled(
            "q quit  s start  u undo  w save  r reset  shift+click second source/target",
            Style::default().fg(Color::DarkGray),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Paints the dragged piece at the pointer cell, above everything else.
fn draw_in_flight(frame: &mut Frame, app: &App, glyphs: &Glyphs) {
    let Some((piece, (x, y))) = app.editor().in_flight() else {
        return;
    };
    let rect = Rect {
        x,
        y,
        width: 2,
        height: 1,
    };
    if contains(frame.area(), rect) {
        frame.render_widget(cell_paragraph(glyphs, &piece), rect);
    }
}

fn cell_paragraph(glyphs: &Glyphs, piece: &Piece) -> Paragraph<'static> {
    Paragraph::new(cell_text(glyphs, piece)).style(Style::default().bg(Color::Rgb(60, 60, 60)))
}

fn contains(area: Rect, rect: Rect) -> bool {
    rect.x >= area.x
        && rect.y >= area.y
        && rect.x + rect.width <= area.x + area.width
        && rect.y + rect.height <= area.y + area.height
}
