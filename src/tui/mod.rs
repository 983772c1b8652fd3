//! TUI module - Terminal pages with ratatui

mod analyze;
mod summary;
mod tracker;

use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};
use std::io::{stdout, Stdout};
use tracing::info;

use crate::history::History;
use crate::workout::Workout;

pub use tracker::{Focus, Tracker};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Navigation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    AddExercise,
    Analyze,
    Workout,
}

impl Route {
    pub fn all() -> &'static [Route] {
        &[Route::Home, Route::AddExercise, Route::Analyze, Route::Workout]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::AddExercise => "Add Exercise",
            Route::Analyze => "Analyze",
            Route::Workout => "Workout",
        }
    }

    fn index(&self) -> usize {
        Route::all().iter().position(|r| r == self).unwrap_or(0)
    }

    fn next(&self) -> Route {
        let all = Route::all();
        all[(self.index() + 1) % all.len()]
    }
}

/// App state for TUI
pub struct App {
    route: Route,
    history: History,
    tracker: Tracker,
    should_quit: bool,
}

impl App {
    /// The workout clock starts now
    pub fn new(history: History) -> Self {
        Self::started_at(history, Utc::now())
    }

    pub fn started_at(history: History, now: DateTime<Utc>) -> Self {
        Self {
            route: Route::Home,
            history,
            tracker: Tracker::new(Workout::start(now)),
            should_quit: false,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;

        let result = self.event_loop(&mut terminal);

        restore_terminal()?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    pub fn render(&self, frame: &mut Frame) {
        self.render_at(frame, Utc::now());
    }

    pub fn render_at(&self, frame: &mut Frame, now: DateTime<Utc>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(frame.area());

        // Navigation
        let titles: Vec<Line> = Route::all()
            .iter()
            .enumerate()
            .map(|(i, r)| Line::from(format!("{} {}", i + 1, r.title())))
            .collect();
        let nav = Tabs::new(titles)
            .select(self.route.index())
            .highlight_style(Style::default().fg(Color::Cyan).bold())
            .block(Block::default().borders(Borders::ALL).title("ironlog"));
        frame.render_widget(nav, chunks[0]);

        match self.route {
            Route::Home => self.render_home(frame, chunks[1], now),
            Route::AddExercise => self.tracker.render(frame, chunks[1], now),
            Route::Analyze => analyze::render(frame, chunks[1], &self.history),
            Route::Workout => summary::render_session(frame, chunks[1], &self.tracker.workout, now),
        }

        // Footer
        let hint = match self.route {
            Route::AddExercise => self.tracker.key_hint(),
            _ => "1-4/Tab: navigate | q: quit",
        };
        let footer_text = match &self.tracker.status {
            Some(status) => format!("{} | {}", status, hint),
            None => hint.to_string(),
        };
        let footer = Paragraph::new(footer_text)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[2]);
    }

    fn render_home(&self, frame: &mut Frame, area: Rect, now: DateTime<Utc>) {
        let workout = &self.tracker.workout;
        let status = if workout.is_finished() {
            format!(
                "Last session finished: {} exercises, {} minutes.",
                workout.exercises.len(),
                workout.duration_minutes(now)
            )
        } else {
            format!(
                "Session running: {} exercises logged so far.",
                workout.exercises.len()
            )
        };

        let text = vec![
            Line::from("Gym Workout Tracker").style(Style::default().fg(Color::Cyan).bold()),
            Line::from(""),
            Line::from("2 Add Exercise - pick a workout type, log exercises and sets"),
            Line::from("3 Analyze      - totals, durations and exercise frequency"),
            Line::from("4 Workout      - summary of the current session"),
            Line::from(""),
            Line::from(status),
        ];
        let home = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Home"));
        frame.render_widget(home, area);
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press {
                    self.handle_key(key, Utc::now());
                }
        Ok(())
    }

    /// Route a key press to navigation or the active page
    pub fn handle_key(&mut self, key: KeyEvent, now: DateTime<Utc>) {
        let typing = self.route == Route::AddExercise && self.tracker.captures_input();

        if !typing {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char(c @ '1'..='4') => {
                    let index = c as usize - '1' as usize;
                    self.route = Route::all()[index];
                    return;
                }
                KeyCode::Tab if self.route != Route::AddExercise => {
                    self.route = self.route.next();
                    return;
                }
                _ => {}
            }
        }

        if self.route == Route::AddExercise && self.tracker.handle_key(key, now) {
            let workout = &self.tracker.workout;
            if self.history.record(workout) {
                info!("Session {:?} added to history", workout.name);
            }
        }
    }
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Centered popup area
pub(crate) fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn create_app() -> App {
        App::new(History::mock().unwrap())
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = create_app();
        assert_eq!(app.route(), Route::Home);

        app.handle_key(key(KeyCode::Char('3')), Utc::now());
        assert_eq!(app.route(), Route::Analyze);

        app.handle_key(key(KeyCode::Tab), Utc::now());
        assert_eq!(app.route(), Route::Workout);

        app.handle_key(key(KeyCode::Tab), Utc::now());
        assert_eq!(app.route(), Route::Home);
    }

    #[test]
    fn test_tab_on_add_exercise_cycles_sections() {
        let mut app = create_app();
        app.handle_key(key(KeyCode::Char('2')), Utc::now());
        assert_eq!(app.tracker().focus(), Focus::WorkoutType);

        app.handle_key(key(KeyCode::Tab), Utc::now());
        assert_eq!(app.route(), Route::AddExercise);
        assert_eq!(app.tracker().focus(), Focus::Exercise);

        app.handle_key(key(KeyCode::Char('3')), Utc::now());
        assert_eq!(app.route(), Route::Analyze);
    }

    #[test]
    fn test_quit() {
        let mut app = create_app();
        app.handle_key(key(KeyCode::Char('q')), Utc::now());
        assert!(app.should_quit());
    }

    #[test]
    fn test_typing_does_not_navigate_or_quit() {
        let mut app = create_app();
        app.handle_key(key(KeyCode::Char('2')), Utc::now());
        // type chooser is focused first; pick Push
        app.handle_key(key(KeyCode::Enter), Utc::now());
        // move to Custom Exercise and select it
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Down), Utc::now());
        }
        app.handle_key(key(KeyCode::Enter), Utc::now());
        assert!(app.tracker().is_typing());

        for c in "q1".chars() {
            app.handle_key(key(KeyCode::Char(c)), Utc::now());
        }
        assert!(!app.should_quit());
        assert_eq!(app.route(), Route::AddExercise);
        assert_eq!(app.tracker().draft.custom_name, "q1");
    }

    #[test]
    fn test_finished_session_joins_history() {
        let mut app = create_app();
        app.handle_key(key(KeyCode::Char('2')), Utc::now());
        app.handle_key(key(KeyCode::Char('f')), Utc::now());
        app.handle_key(key(KeyCode::Char('y')), Utc::now());

        assert!(app.tracker().workout.is_finished());
        assert_eq!(app.history().workouts().len(), 3);
    }

    #[test]
    fn test_render_pages() {
        let mut app = create_app();
        assert!(screen_text(&app).contains("Gym Workout Tracker"));

        app.handle_key(key(KeyCode::Char('2')), Utc::now());
        let text = screen_text(&app);
        assert!(text.contains("Elapsed Time: 00:00:0"));
        assert!(text.contains("Workout Summary"));
        assert!(text.contains("No exercises added yet."));

        app.handle_key(key(KeyCode::Char('3')), Utc::now());
        let text = screen_text(&app);
        assert!(text.contains("Gym Analytics Dashboard"));
        assert!(text.contains("82.50 min"));
        assert!(text.contains("9125.00 kg"));

        app.handle_key(key(KeyCode::Char('4')), Utc::now());
        assert!(screen_text(&app).contains("Total Volume: 0.0 kg"));
    }

    #[test]
    fn test_render_analyze_empty_history() {
        let path = std::env::temp_dir().join(format!("ironlog-empty-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"userId":"u","workouts":[]}"#).unwrap();
        let history = History::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let mut app = App::new(history);
        app.handle_key(key(KeyCode::Char('3')), Utc::now());
        let text = screen_text(&app);
        assert!(text.contains("No exercises logged."));
        assert!(text.contains("0.00 kg"));
        assert!(!text.contains("-0.00"));
    }
}
