// TUI event loop and terminal management
use crate::{App, InputMode, Screen};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io;
use swapshop_core::MarketSource;
use tracing::debug;

/// What the loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Reload,
}

pub async fn run_tui(mut app: App, source: &dyn MarketSource) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, source).await;

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    source: &dyn MarketSource,
) -> anyhow::Result<()> {
    reload(terminal, app, source).await?;

    loop {
        terminal.draw(|f| crate::ui::render(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(app, key) == Action::Reload {
                reload(terminal, app, source).await?;
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Fetch market data, drawing the loading screen while it runs
async fn reload<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    source: &dyn MarketSource,
) -> anyhow::Result<()> {
    app.status_message = None;
    app.load_error = None;

    // Nothing redraws while the fetch is awaited
    terminal.draw(crate::ui::render_loading_frame)?;
    let outcome = app.context.load(source).await;
    app.finish_load(outcome);
    Ok(())
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> Action {
    match app.input_mode {
        InputMode::Searching => match key.code {
            KeyCode::Enter | KeyCode::Esc => app.enter_normal_mode(),
            KeyCode::Char(c) => app.push_search_char(c),
            KeyCode::Backspace => app.pop_search_char(),
            _ => {}
        },
        InputMode::FilterPicker => match key.code {
            KeyCode::Esc | KeyCode::Char('f') => app.close_filter_picker(),
            KeyCode::Down | KeyCode::Char('j') => app.next_filter(),
            KeyCode::Up | KeyCode::Char('k') => app.previous_filter(),
            KeyCode::Tab | KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                app.switch_filter_column()
            }
            KeyCode::Char(' ') | KeyCode::Enter => app.toggle_filter_tag(),
            KeyCode::Char('d') => app.reset_filter_tags(),
            _ => {}
        },
        InputMode::Normal => {
            app.status_message = None;
            match key.code {
                KeyCode::Char('q') => app.quit(),
                KeyCode::Char('/') => app.enter_search_mode(),
                KeyCode::Char('f') | KeyCode::Char('F') => app.open_filter_picker(),
                KeyCode::Char('j') | KeyCode::Down => app.next(),
                KeyCode::Char('k') | KeyCode::Up => app.previous(),
                KeyCode::Enter => app.open_detail(),
                KeyCode::Char('i') | KeyCode::Char(' ') => app.toggle_selected_interest(),
                KeyCode::Char('v') => app.show_screen(Screen::Interested),
                KeyCode::Char('m') => app.show_screen(Screen::MyItems),
                KeyCode::Tab => app.cycle_screen(),
                KeyCode::Esc | KeyCode::Backspace => app.back(),
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    debug!("Reload requested");
                    return Action::Reload;
                }
                _ => {}
            }
        }
    }

    Action::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use swapshop_core::{FilterCriteria, MarketContext, UserId};

    fn press(app: &mut App, code: KeyCode) -> Action {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app() -> App {
        App::new(MarketContext::new(UserId::new("2")), FilterCriteria::default())
    }

    #[test]
    fn test_typing_goes_to_search_box() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::Searching);

        // 'q' is text while searching, not quit
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.criteria.name_query, "q");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_reload_key() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Char('r')), Action::Reload);
        assert_eq!(press(&mut app, KeyCode::Char('j')), Action::Continue);
    }

    #[test]
    fn test_filter_picker_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.input_mode, InputMode::FilterPicker);

        // Cursor on "books" in trading-away; select it
        press(&mut app, KeyCode::Char(' '));
        assert!(app.criteria.trading_away.contains("books"));

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_screen_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.screen, Screen::Interested);
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.screen, Screen::MyItems);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Market);
    }
}
