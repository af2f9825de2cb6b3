//! Terminal front end: raw-mode lifecycle, the frame/input loop, and the
//! channels wiring the loop to the turn orchestrator task.

pub mod app;
pub mod input;
pub mod orchestrator;
pub mod players;
pub mod ui;

pub use app::{App, Mode};
pub use orchestrator::{GameEvent, Orchestrator, UiCommand};
pub use players::{PlayerSlot, Strategy};

use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io;
use std::time::Duration as StdDuration;
use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::info;

use crate::client::EngineApi;
use crate::game::{Color, DragOrigin};
use ui::Glyphs;

/// Runs the client until the user quits. Owns the terminal for the whole
/// session and restores it on the way out, including on error.
pub async fn run<C: EngineApi + 'static>(
    client: C,
    white: PlayerSlot,
    black: PlayerSlot,
    pace: Duration,
    ascii: bool,
    load: Option<i64>,
) -> Result<()> {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(client, white, black, pace, event_tx, cmd_rx);
    let worker = tokio::spawn(async move { orchestrator.run().await });

    if let Some(id) = load {
        let _ = cmd_tx.send(UiCommand::Load { id });
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = App::new();
    let glyphs = Glyphs::new(ascii);
    let result = pump(&mut terminal, &mut app, &glyphs, &cmd_tx, event_rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    let _ = cmd_tx.send(UiCommand::Quit);
    // Closing the channel lets the worker drain and stop wherever it is.
    drop(cmd_tx);
    worker.await??;
    info!("session closed");
    result
}

/// The frame/input loop: apply queued events, paint, poll for input.
fn pump(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    glyphs: &Glyphs,
    cmd_tx: &mpsc::UnboundedSender<UiCommand>,
    mut event_rx: mpsc::UnboundedReceiver<GameEvent>,
) -> Result<()> {
    loop {
        while let Ok(game_event) = event_rx.try_recv() {
            app.handle_event(game_event);
        }
        terminal.draw(|frame| ui::draw(frame, app, glyphs))?;

        if !event::poll(StdDuration::from_millis(50))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('s') => {
                    if let Some(cmd) = app.start_command() {
                        let _ = cmd_tx.send(cmd);
                    }
                }
                KeyCode::Char('u') => {
                    if let Some(cmd) = app.undo_command() {
                        let _ = cmd_tx.send(cmd);
                    }
                }
                KeyCode::Char('w') => {
                    if let Some(cmd) = app.save_command() {
                        let _ = cmd_tx.send(cmd);
                    }
                }
                KeyCode::Char('r') => {
                    let _ = cmd_tx.send(UiCommand::Reset);
                    app.reset();
                }
                KeyCode::Enter => {
                    if app.mode() == Mode::Paused {
                        let _ = cmd_tx.send(UiCommand::Refresh);
                    }
                }
                _ => {}
            },
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                let area = Rect::new(0, 0, size.width, size.height);
                on_mouse(app, cmd_tx, area, mouse);
            }
            _ => {}
        }
    }
}

/// Routes pointer input: drags in setup, selection clicks in play.
fn on_mouse(
    app: &mut App,
    cmd_tx: &mpsc::UnboundedSender<UiCommand>,
    area: Rect,
    mouse: MouseEvent,
) {
    let panes = ui::panes(area);
    let at = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.mode() == Mode::Setup {
                if let Some(square) = panes.geometry.square_at(at.0, at.1) {
                    if app.piece_at(square) {
                        app.on_drag_start(DragOrigin::Board(square), at);
                    }
                } else if let Some(slot) =
                    input::pool_slot_at(panes.white_pool, app.pool_len(Color::White), at.0, at.1)
                {
                    app.on_drag_start(DragOrigin::Pool(Color::White, slot), at);
                } else if let Some(slot) =
                    input::pool_slot_at(panes.black_pool, app.pool_len(Color::Black), at.0, at.1)
                {
                    app.on_drag_start(DragOrigin::Pool(Color::Black, slot), at);
                }
            } else if let Some(square) = panes.geometry.square_at(at.0, at.1) {
                let allow_second = mouse.modifiers.contains(KeyModifiers::SHIFT);
                if let Some(cmd) = app.on_board_click(square, allow_second) {
                    let _ = cmd_tx.send(cmd);
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => app.on_drag_move(at),
        MouseEventKind::Up(MouseButton::Left) => {
            app.on_drag_end(panes.geometry.square_at(at.0, at.1));
        }
        _ => {}
    }
}
