//! Tracker page - workout type, exercise form and draft sets

use chrono::{DateTime, Local, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::debug;

use super::{centered_rect, summary};
use crate::draft::{parse_reps, parse_weight, ExerciseChoice, ExerciseDraft};
use crate::format::{format_elapsed, format_weight};
use crate::workout::{Workout, WorkoutError, WorkoutType};

/// Section of the form receiving keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    WorkoutType,
    Exercise,
    CustomName,
    Sets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetField {
    Weight,
    Reps,
}

/// Form state of the Add Exercise page
pub struct Tracker {
    pub workout: Workout,
    pub draft: ExerciseDraft,
    pub status: Option<String>,
    focus: Focus,
    type_cursor: usize,
    exercise_cursor: usize,
    set_cursor: usize,
    field: SetField,
    /// Edit buffer while a set field is being typed into
    editing: Option<String>,
    confirm_finish: bool,
}

impl Tracker {
    pub fn new(workout: Workout) -> Self {
        let focus = if workout.workout_type.is_some() { Focus::Exercise } else { Focus::WorkoutType };
        Self {
            workout,
            draft: ExerciseDraft::new(),
            status: None,
            focus,
            type_cursor: 0,
            exercise_cursor: 0,
            set_cursor: 0,
            field: SetField::Weight,
            editing: None,
            confirm_finish: false,
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_cursor(&self) -> usize {
        self.set_cursor
    }

    pub fn is_confirming(&self) -> bool {
        self.confirm_finish
    }

    /// Keys are text input rather than commands
    pub fn is_typing(&self) -> bool {
        self.focus == Focus::CustomName || self.editing.is_some()
    }

    /// Keys must not reach navigation: text input or the finish dialog
    pub fn captures_input(&self) -> bool {
        self.is_typing() || self.confirm_finish
    }

    pub fn key_hint(&self) -> &'static str {
        if self.confirm_finish {
            "y/Enter: finish | n/Esc: cancel"
        } else if self.editing.is_some() {
            "Enter: save | Esc: cancel"
        } else if self.focus == Focus::CustomName {
            "type a name | Enter/Esc: done"
        } else {
            "Tab: section | Enter: select/edit | s: add set | x: remove set | e: add exercise | f: finish | 1-4: page | q: quit"
        }
    }

    /// Sections that can currently take focus, in Tab order
    fn sections(&self) -> Vec<Focus> {
        let mut sections = Vec::new();
        if self.workout.workout_type.is_none() {
            sections.push(Focus::WorkoutType);
        }
        sections.push(Focus::Exercise);
        if self.draft.is_custom() {
            sections.push(Focus::CustomName);
        }
        sections.push(Focus::Sets);
        sections
    }

    fn cycle_focus(&mut self, forward: bool) {
        let sections = self.sections();
        let pos = sections.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (pos + 1) % sections.len()
        } else {
            (pos + sections.len() - 1) % sections.len()
        };
        self.focus = sections[next];
    }

    /// Handle a key press. Returns true when the workout was just finished.
    pub fn handle_key(&mut self, key: KeyEvent, now: DateTime<Utc>) -> bool {
        if self.confirm_finish {
            return self.handle_confirm(key, now);
        }
        if self.editing.is_some() {
            self.handle_edit(key);
            return false;
        }

        match self.focus {
            Focus::CustomName => self.handle_custom_name(key),
            _ => self.handle_command(key, now),
        }
        false
    }

    fn handle_confirm(&mut self, key: KeyEvent, now: DateTime<Utc>) -> bool {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.confirm_finish = false;
                match self.workout.finish(now) {
                    Ok(()) => {
                        self.status = Some("Workout finished".to_string());
                        true
                    }
                    Err(e) => {
                        self.report(e);
                        false
                    }
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.confirm_finish = false;
                false
            }
            _ => false,
        }
    }

    fn handle_edit(&mut self, key: KeyEvent) {
        let Some(buffer) = self.editing.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() || (c == '.' && self.field == SetField::Weight) => {
                buffer.push(c);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Enter => {
                let input = std::mem::take(buffer);
                self.editing = None;
                let result = match self.field {
                    SetField::Weight => self.draft.set_weight(self.set_cursor, parse_weight(&input)),
                    SetField::Reps => self.draft.set_reps(self.set_cursor, parse_reps(&input)),
                };
                if let Err(e) = result {
                    self.report(e);
                }
            }
            KeyCode::Esc => self.editing = None,
            _ => {}
        }
    }

    fn handle_custom_name(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.draft.custom_name.push(c),
            KeyCode::Backspace => {
                self.draft.custom_name.pop();
            }
            KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => self.focus = Focus::Sets,
            _ => {}
        }
    }

    fn handle_command(&mut self, key: KeyEvent, now: DateTime<Utc>) {
        match key.code {
            KeyCode::Tab => self.cycle_focus(true),
            KeyCode::BackTab => self.cycle_focus(false),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Left | KeyCode::Right if self.focus == Focus::Sets => {
                self.field = match self.field {
                    SetField::Weight => SetField::Reps,
                    SetField::Reps => SetField::Weight,
                };
            }
            KeyCode::Enter => self.select(now),
            KeyCode::Char('s') => {
                self.draft.add_set();
                self.set_cursor = self.draft.sets.len() - 1;
                self.focus = Focus::Sets;
            }
            KeyCode::Char('x') | KeyCode::Delete if self.focus == Focus::Sets => {
                match self.draft.remove_set(self.set_cursor) {
                    Ok(_) => self.set_cursor = self.set_cursor.min(self.draft.sets.len().saturating_sub(1)),
                    Err(e) => self.report(e),
                }
            }
            KeyCode::Char('e') => self.add_exercise(),
            KeyCode::Char('f') => {
                if self.workout.is_finished() {
                    self.report(WorkoutError::AlreadyFinished);
                } else {
                    self.confirm_finish = true;
                }
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let (cursor, len) = match self.focus {
            Focus::WorkoutType => (&mut self.type_cursor, WorkoutType::all().len()),
            Focus::Exercise => (&mut self.exercise_cursor, ExerciseChoice::all().len()),
            Focus::Sets => (&mut self.set_cursor, self.draft.sets.len()),
            Focus::CustomName => return,
        };
        if len == 0 {
            return;
        }
        *cursor = (*cursor as isize + delta).clamp(0, len as isize - 1) as usize;
    }

    fn select(&mut self, now: DateTime<Utc>) {
        match self.focus {
            Focus::WorkoutType => {
                let workout_type = WorkoutType::all()[self.type_cursor];
                match self.workout.choose_type(workout_type, now.with_timezone(&Local)) {
                    Ok(()) => self.focus = Focus::Exercise,
                    Err(e) => self.report(e),
                }
            }
            Focus::Exercise => {
                let choice = ExerciseChoice::all()[self.exercise_cursor];
                self.draft.select(choice);
                self.set_cursor = 0;
                self.focus = if self.draft.is_custom() { Focus::CustomName } else { Focus::Sets };
            }
            Focus::Sets => {
                if let Some(set) = self.draft.sets.get(self.set_cursor) {
                    let current = match self.field {
                        SetField::Weight if set.weight > 0.0 => format_weight(set.weight),
                        SetField::Reps if set.reps > 0 => set.reps.to_string(),
                        _ => String::new(),
                    };
                    self.editing = Some(current);
                }
            }
            Focus::CustomName => {}
        }
    }

    fn add_exercise(&mut self) {
        let previous = self.draft.clone();
        let result = self
            .draft
            .commit()
            .and_then(|exercise| self.workout.add_exercise(exercise));
        match result {
            Ok(()) => {
                self.status = Some("Exercise added".to_string());
                self.set_cursor = 0;
                self.exercise_cursor = 0;
                self.focus = Focus::Exercise;
            }
            Err(e) => {
                // keep what the user typed
                self.draft = previous;
                self.report(e);
            }
        }
    }

    fn report(&mut self, error: WorkoutError) {
        debug!("Rejected: {}", error);
        self.status = Some(error.to_string());
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, now: DateTime<Utc>) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        self.render_form(frame, columns[0], now);
        summary::render_summary(frame, columns[1], &self.workout, now);

        if self.confirm_finish {
            self.render_confirm(frame, area);
        }
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, now: DateTime<Utc>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Gym Workout Tracker - track your full workout session");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let selector_height = if self.workout.workout_type.is_none() { 7 } else { 1 };
        let custom_height = if self.draft.is_custom() { 3 } else { 0 };
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(selector_height),
                Constraint::Length(8),
                Constraint::Length(custom_height),
                Constraint::Min(3),
            ])
            .split(inner);

        let elapsed = format_elapsed(self.workout.elapsed_secs(now));
        frame.render_widget(Paragraph::new(format!("Elapsed Time: {}", elapsed)), rows[0]);

        if self.workout.workout_type.is_none() {
            let items: Vec<ListItem> = WorkoutType::all().iter().map(|t| ListItem::new(t.label())).collect();
            self.render_list(frame, rows[1], items, "Choose Workout Type", Focus::WorkoutType, self.type_cursor);
        } else {
            let name = Paragraph::new(self.workout.name.as_str()).style(Style::default().bold());
            frame.render_widget(name, rows[1]);
        }

        let items: Vec<ListItem> = ExerciseChoice::all().iter().map(|c| ListItem::new(c.label())).collect();
        self.render_list(frame, rows[2], items, "Choose Exercise", Focus::Exercise, self.exercise_cursor);

        if self.draft.is_custom() {
            let input = Paragraph::new(self.draft.custom_name.as_str()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Custom Exercise Name")
                    .border_style(self.border_style(Focus::CustomName)),
            );
            frame.render_widget(input, rows[3]);
        }

        self.render_sets(frame, rows[4]);
    }

    fn render_list(
        &self,
        frame: &mut Frame,
        area: Rect,
        items: Vec<ListItem>,
        title: &str,
        focus: Focus,
        cursor: usize,
    ) {
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title.to_string())
                    .border_style(self.border_style(focus)),
            )
            .highlight_symbol("> ")
            .highlight_style(Style::default().fg(Color::Cyan));
        let mut state = ListState::default();
        if self.focus == focus {
            state.select(Some(cursor));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_sets(&self, frame: &mut Frame, area: Rect) {
        let title = match self.draft.choice {
            None => "Sets".to_string(),
            Some(_) if !self.draft.name().is_empty() => format!("Sets - {}", self.draft.name()),
            Some(choice) => format!("Sets - {}", choice.label()),
        };

        let lines: Vec<Line> = self
            .draft
            .sets
            .iter()
            .enumerate()
            .map(|(i, set)| {
                let selected = self.focus == Focus::Sets && i == self.set_cursor;
                let cell = |field: SetField, value: String| {
                    let text = match &self.editing {
                        Some(buffer) if selected && self.field == field => format!("[{}_]", buffer),
                        _ => format!(" {} ", value),
                    };
                    if selected && self.field == field {
                        Span::styled(text, Style::default().fg(Color::Cyan).bold())
                    } else {
                        Span::raw(text)
                    }
                };
                Line::from(vec![
                    Span::raw(format!("Set {:<3}", i + 1)),
                    Span::raw(" Weight (kg):"),
                    cell(SetField::Weight, format_weight(set.weight)),
                    Span::raw(" Reps:"),
                    cell(SetField::Reps, set.reps.to_string()),
                ])
            })
            .collect();

        let body = if lines.is_empty() {
            Paragraph::new("Press s to add a set.")
        } else {
            Paragraph::new(lines)
        };
        let sets = body.wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(self.border_style(Focus::Sets)),
        );
        frame.render_widget(sets, area);
    }

    fn render_confirm(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(50, 6, area);
        frame.render_widget(Clear, popup);
        let dialog = Paragraph::new(vec![
            Line::from("Are you sure you want to finish this workout?"),
            Line::from("This action cannot be undone."),
            Line::from(""),
            Line::from("[y] Finish   [n] Cancel").style(Style::default().bold()),
        ])
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Finish Workout"));
        frame.render_widget(dialog, popup);
    }

    fn border_style(&self, focus: Focus) -> Style {
        if self.focus == focus {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    }
}
