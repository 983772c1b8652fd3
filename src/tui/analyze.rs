//! Analyze page - stat cards, duration chart, exercise frequency

use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
};

use crate::analytics::FrequencySlice;
use crate::format::format_kg;
use crate::history::History;

/// Slice colours, cycled
const PALETTE: [Color; 6] = [
    Color::Rgb(0x00, 0x88, 0xFE),
    Color::Rgb(0x00, 0xC4, 0x9F),
    Color::Rgb(0xFF, 0xBB, 0x28),
    Color::Rgb(0xFF, 0x80, 0x42),
    Color::Rgb(0x88, 0x84, 0xD8),
    Color::Rgb(0x82, 0xCA, 0x9D),
];

pub fn render(frame: &mut Frame, area: Rect, history: &History) {
    let analytics = history.analytics();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Gym Analytics Dashboard - {}", history.user_id()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let shares = analytics.frequency_shares();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(shares.len().max(1) as u16 + 2),
        ])
        .split(inner);

    // Stat cards
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[0]);
    stat_card(frame, cards[0], "Total Workouts", analytics.total_workouts().to_string());
    stat_card(
        frame,
        cards[1],
        "Avg. Workout Duration",
        format!("{:.2} min", analytics.average_duration_minutes()),
    );
    stat_card(
        frame,
        cards[2],
        "Total Weight Lifted",
        format_kg(analytics.total_weight_lifted(), 2),
    );

    // Duration per workout
    let bars: Vec<Bar> = analytics
        .duration_series()
        .into_iter()
        .map(|point| {
            let minutes = point.minutes.max(0.0).round() as u64;
            Bar::default()
                .value(minutes)
                .text_value(format!("{} min", minutes))
                .label(Line::from(point.name))
        })
        .collect();
    let bar_width = if bars.is_empty() {
        1
    } else {
        (rows[1].width.saturating_sub(2) / bars.len() as u16).clamp(3, 20)
    };
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Workout Duration - minutes per session"),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width.saturating_sub(1).max(1))
        .bar_gap(1)
        .bar_style(Style::default().fg(PALETTE[0]))
        .value_style(Style::default().fg(Color::Black).bg(PALETTE[0]));
    frame.render_widget(chart, rows[1]);

    frame.render_widget(frequency_breakdown(&shares, rows[2].width), rows[2]);
}

fn stat_card(frame: &mut Frame, area: Rect, title: &str, value: String) {
    let card = Paragraph::new(value)
        .style(Style::default().bold())
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(card, area);
}

/// One line per exercise: coloured share bar and `Name NN%` label
fn frequency_breakdown(shares: &[FrequencySlice], width: u16) -> Paragraph<'static> {
    let bar_space = width.saturating_sub(30).max(10) as u32;

    let lines: Vec<Line> = if shares.is_empty() {
        vec![Line::from("No exercises logged.")]
    } else {
        shares
            .iter()
            .enumerate()
            .map(|(i, slice)| {
                let color = PALETTE[i % PALETTE.len()];
                let filled = (slice.percent * bar_space / 100).max(1) as usize;
                Line::from(vec![
                    Span::styled("█".repeat(filled), Style::default().fg(color)),
                    Span::raw(format!(" {} ({}x)", slice.label(), slice.count)),
                ])
            })
            .collect()
    };

    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Exercise Frequency - times each exercise was performed"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(name: &str, count: usize, percent: u32) -> FrequencySlice {
        FrequencySlice {
            name: name.to_string(),
            count,
            percent,
        }
    }

    #[test]
    fn test_frequency_breakdown_colours_cycle() {
        let shares: Vec<_> = (0..7).map(|i| slice(&format!("ex{}", i), 1, 14)).collect();
        let paragraph = frequency_breakdown(&shares, 60);
        let area = Rect::new(0, 0, 60, 9);
        let mut buffer = ratatui::buffer::Buffer::empty(area);
        paragraph.render(area, &mut buffer);

        // first column inside the border of rows 1 and 7
        assert_eq!(buffer[(1, 1)].fg, PALETTE[0]);
        assert_eq!(buffer[(1, 7)].fg, PALETTE[0]);
        assert_eq!(buffer[(1, 2)].fg, PALETTE[1]);
    }

    #[test]
    fn test_frequency_breakdown_empty() {
        let paragraph = frequency_breakdown(&[], 40);
        let area = Rect::new(0, 0, 40, 3);
        let mut buffer = ratatui::buffer::Buffer::empty(area);
        paragraph.render(area, &mut buffer);
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("No exercises logged."));
    }
}
