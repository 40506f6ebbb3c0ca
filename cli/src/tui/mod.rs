pub mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::api::TaskApi;
use crate::view::{Page, TaskView};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run<A: TaskApi>(api: &A) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut view = TaskView::new();
    view.mount();
    let res = run_app(&mut terminal, &mut view, api);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend, A: TaskApi>(
    terminal: &mut Terminal<B>,
    view: &mut TaskView,
    api: &A,
) -> Result<()> {
    loop {
        view.prune_notifications(Instant::now());
        terminal
            .draw(|f| ui::draw(f, view))
            .map_err(|e| anyhow!(e.to_string()))?;

        // The loading state has been drawn; now do the fetch.
        if view.fetch_pending() {
            view.load(api);
            continue;
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(view, api, key) == Flow::Quit {
                    return Ok(());
                }
            }
        }
    }
}

fn handle_key<A: TaskApi>(view: &mut TaskView, api: &A, key: KeyEvent) -> Flow {
    if view.is_confirming() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => view.confirm_delete(api),
            KeyCode::Char('n') | KeyCode::Esc => view.cancel_delete(),
            _ => {}
        }
        return Flow::Continue;
    }

    if view.editing {
        match key.code {
            KeyCode::Enter => view.submit(api),
            KeyCode::Esc => view.stop_editing(),
            KeyCode::Tab => view.form.focus_next(),
            KeyCode::BackTab => view.form.focus_previous(),
            KeyCode::Char(c) => view.form.input_char(c),
            KeyCode::Backspace => view.form.delete_char(),
            KeyCode::Left => view.form.move_left(),
            KeyCode::Right => view.form.move_right(),
            _ => {}
        }
        return Flow::Continue;
    }

    match key.code {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Tab => view.navigate(view.page.next()),
        KeyCode::Char('1') => view.navigate(Page::Tasks),
        KeyCode::Char('2') => view.navigate(Page::About),
        KeyCode::Char('3') => view.navigate(Page::Login),
        KeyCode::Char('4') => view.navigate(Page::SignUp),
        _ if view.page != Page::Tasks => {}
        KeyCode::Down | KeyCode::Char('j') => view.next(),
        KeyCode::Up | KeyCode::Char('k') => view.previous(),
        KeyCode::Char('a') => view.start_editing(),
        KeyCode::Char('d') | KeyCode::Delete => view.request_delete(),
        KeyCode::Char('r') => view.begin_fetch(),
        _ => {}
    }
    Flow::Continue
}
