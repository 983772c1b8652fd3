//! Workout summary panel and the Workout page

use chrono::{DateTime, Local, Utc};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::format::{format_elapsed, format_kg, format_set};
use crate::workout::Workout;

/// Exercise list with sets, one heading per exercise
fn exercise_lines(workout: &Workout) -> Vec<Line<'static>> {
    if workout.exercises.is_empty() {
        return vec![Line::from("No exercises added yet.")];
    }

    let mut lines = Vec::new();
    for exercise in &workout.exercises {
        lines.push(Line::from(exercise.name.clone()).style(Style::default().bold()));
        for (i, set) in exercise.sets.iter().enumerate() {
            lines.push(Line::from(format!("  {}", format_set(i, set))));
        }
    }
    lines
}

fn totals_lines(workout: &Workout, now: DateTime<Utc>) -> Vec<Line<'static>> {
    vec![
        Line::from(format!(
            "Progress: {} exercises completed",
            workout.exercises.len()
        ))
        .style(Style::default().fg(Color::DarkGray)),
        Line::from(format!("Total Volume: {}", format_kg(workout.total_volume(), 1)))
            .style(Style::default().bold()),
        Line::from(format!("Workout Duration: {} minutes", workout.duration_minutes(now))),
    ]
}

fn progress_gauge(workout: &Workout) -> Gauge<'static> {
    let percent = workout.progress_percent().min(100.0);
    Gauge::default()
        .gauge_style(Style::default().fg(Color::Green))
        .percent(percent as u16)
}

/// Side panel of the tracker page
pub fn render_summary(frame: &mut Frame, area: Rect, workout: &Workout, now: DateTime<Utc>) {
    let block = Block::default().borders(Borders::ALL).title("Workout Summary");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let exercises = Paragraph::new(exercise_lines(workout)).wrap(Wrap { trim: false });
    frame.render_widget(exercises, rows[0]);
    frame.render_widget(progress_gauge(workout), rows[1]);
    frame.render_widget(Paragraph::new(totals_lines(workout, now)), rows[2]);

    let footer = if workout.is_finished() {
        Line::from("Workout finished").style(Style::default().fg(Color::Green))
    } else {
        Line::from("f: Finish Workout").style(Style::default().fg(Color::Yellow))
    };
    frame.render_widget(Paragraph::new(footer), rows[3]);
}

/// Full-page view of the current session
pub fn render_session(frame: &mut Frame, area: Rect, workout: &Workout, now: DateTime<Utc>) {
    let title = if workout.name.is_empty() {
        "Workout (no type chosen)".to_string()
    } else {
        format!("Workout {}", workout.name)
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    let started = workout.started_at.with_timezone(&Local).format("%d-%m-%Y %H:%M");
    let state = match workout.finished_at {
        Some(end) => format!("finished {}", end.with_timezone(&Local).format("%H:%M")),
        None => "in progress".to_string(),
    };
    let header = Paragraph::new(vec![
        Line::from(format!("Started {} ({})", started, state)),
        Line::from(format!(
            "Elapsed Time: {} | {} sets",
            format_elapsed(workout.elapsed_secs(now)),
            workout.total_sets()
        )),
    ]);
    frame.render_widget(header, rows[0]);
    frame.render_widget(progress_gauge(workout), rows[1]);
    frame.render_widget(Paragraph::new(totals_lines(workout, now)), rows[2]);

    let exercises = Paragraph::new(exercise_lines(workout))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::TOP).title("Exercises"));
    frame.render_widget(exercises, rows[3]);
}
