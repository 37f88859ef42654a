use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::game::scoring::accuracy;

use super::grade_color;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(completed) = app.machine().completed_category_score() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(14),
        Constraint::Fill(1),
    ])
    .split(area);

    let percentage = accuracy(completed.correct, completed.total);
    let next = match app.machine().next_category() {
        Some(category) => Line::from(vec![
            Span::styled("Next up: ", Style::default().fg(Color::Gray)),
            Span::styled(category.to_string(), Style::default().fg(Color::Cyan).bold()),
        ]),
        None => Line::from(""),
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} COMPLETE!", completed.category.as_str().to_uppercase()),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(format!("{} / {} correct", completed.correct, completed.total).fg(Color::Gray)),
        Line::from(Span::styled(
            format!("{}%", percentage),
            Style::default().fg(grade_color(percentage)).bold(),
        )),
        Line::from(Span::styled(
            format!("{} pts", completed.score),
            Style::default().fg(Color::Magenta),
        )),
        Line::from(""),
        next,
        Line::from(""),
        Line::from(Span::styled(
            format!("Starting in {}...", app.countdown()),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] continue now  ·  [Esc] restart",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[1]);
}
