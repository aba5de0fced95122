//! # study-termtrack
//!
//! Terminal study tracker: turn a PDF, Word or PowerPoint document into a
//! timed quiz, grade it, and keep a running score history per machine.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use study_termtrack::{App, FileStore, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), study_termtrack::AppError> {
//!     let settings = Settings::load(None)?;
//!     let store = Arc::new(FileStore::open(&settings.data_dir)?);
//!     let app = App::new(settings, store)?;
//!     study_termtrack::run(app).await
//! }
//! ```

mod app;
pub mod config;
pub mod content;
pub mod errors;
pub mod generator;
pub mod grading;
pub mod models;
pub mod quiz;
pub mod store;
pub mod terminal;
mod ui;

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;

pub use app::{App, AuthField, AuthTab, Screen, Upload};
pub use config::{NavigationMode, Settings, TimeLimits};
pub use content::{ContentSource, FilenameHeuristic, StudyContent, UploadedDocument};
pub use errors::{AppError, AppResult};
pub use quiz::{QuizDriver, QuizRunner, RunnerPolicy};
pub use store::{FileStore, KeyValueStore, MemoryStore};

const TICK: Duration = Duration::from_secs(1);

/// Take over the terminal and run until the user quits.
pub async fn run(mut app: App) -> AppResult<()> {
    let mut term = terminal::init()?;
    let result = run_event_loop(&mut term, &mut app).await;
    terminal::restore()?;
    result
}

async fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> AppResult<()> {
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            _ = ticker.tick() => app.on_tick()?,
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if handle_input(app, key)? {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyEvent) -> AppResult<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.screen {
        Screen::Auth => handle_auth_input(app, key.code),
        Screen::Dashboard => handle_dashboard_input(app, key.code),
        Screen::Quiz => handle_quiz_input(app, key),
        Screen::Result => Ok(handle_result_input(app, key.code)),
    }
}

fn handle_auth_input(app: &mut App, key: KeyCode) -> AppResult<bool> {
    match key {
        KeyCode::Esc => return Ok(true),
        KeyCode::Left | KeyCode::Right => app.switch_auth_tab(),
        KeyCode::Tab | KeyCode::Down => app.focus_next_field(),
        KeyCode::BackTab | KeyCode::Up => app.focus_previous_field(),
        KeyCode::Enter => app.submit_auth()?,
        KeyCode::Backspace => app.auth_input_pop(),
        KeyCode::Char(c) => app.auth_input_push(c),
        _ => {}
    }
    Ok(false)
}

fn handle_dashboard_input(app: &mut App, key: KeyCode) -> AppResult<bool> {
    match key {
        KeyCode::Esc => app.logout()?,
        KeyCode::Enter => app.load_document(),
        KeyCode::Tab => app.start_quiz()?,
        KeyCode::Backspace => app.path_input_pop(),
        KeyCode::Char(c) => app.path_input_push(c),
        _ => {}
    }
    Ok(false)
}

fn handle_quiz_input(app: &mut App, key: KeyEvent) -> AppResult<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('s') {
            app.submit_quiz()?;
        }
        return Ok(false);
    }

    let typing = app.current_kind().is_some_and(|kind| kind.is_free_text());
    match key.code {
        KeyCode::Esc => app.back_to_dashboard(),
        KeyCode::Enter if typing && key.modifiers.contains(KeyModifiers::ALT) => {
            app.text_input_push('\n')
        }
        KeyCode::Enter => app.submit_answer()?,
        KeyCode::Left => app.previous_question()?,
        KeyCode::Right => app.next_question()?,
        KeyCode::Backspace if typing => app.text_input_pop(),
        KeyCode::Char(c) if typing => app.text_input_push(c),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Char(' ') => app.submit_answer()?,
        _ => {}
    }
    Ok(false)
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Enter | KeyCode::Esc => app.back_to_dashboard(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_input(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn app() -> App {
        App::new(Settings::default(), Arc::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn test_alt_enter_types_newline_in_text_answers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpu.pdf");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();
        let mut app = app();
        app.select_document(&path);
        app.start_quiz().unwrap();

        while !app.current_kind().is_some_and(|kind| kind.is_free_text()) {
            press(&mut app, KeyCode::Right);
        }
        let index = app.quiz().and_then(|q| q.current()).map(|(i, _)| i);

        press(&mut app, KeyCode::Char('a'));
        handle_input(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT)).unwrap();
        press(&mut app, KeyCode::Char('b'));

        assert_eq!(app.text_input(), "a\nb");
        assert_eq!(app.quiz().and_then(|q| q.current()).map(|(i, _)| i), index);
    }

    #[test]
    fn test_ctrl_c_quits_from_any_screen() {
        let mut app = app();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_input(&mut app, ctrl_c).unwrap());
    }

    #[test]
    fn test_auth_keys_edit_focused_field() {
        let mut app = app();
        for c in "a@b".chars() {
            assert!(!press(&mut app, KeyCode::Char(c)));
        }
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.auth().form.email, "a@");

        press(&mut app, KeyCode::Right);
        assert_eq!(app.auth().tab, AuthTab::Register);
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn test_register_through_keys_reaches_dashboard() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        let fields = ["Ana Reyes", "ana@carsu.edu.ph", "hunter22", "hunter22"];
        for value in fields {
            for c in value.chars() {
                press(&mut app, KeyCode::Char(c));
            }
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Dashboard);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Auth);
    }
}
