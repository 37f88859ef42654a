use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;

const MEDALS: [(&str, Color); 3] = [
    ("1st", Color::Yellow),
    ("2nd", Color::Gray),
    ("3rd", Color::LightRed),
];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let title = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("TOP {}", app.rankings().capacity()),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
    ];
    let widget = Paragraph::new(title).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[0]);

    render_entries(frame, chunks[1], app);

    let widget = Paragraph::new("esc back  ·  r restart  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, chunks[2]);
}

fn render_entries(frame: &mut Frame, area: Rect, app: &App) {
    if app.rankings().is_empty() {
        let widget = Paragraph::new("No results yet. Be the first!")
            .alignment(Alignment::Center)
            .fg(Color::DarkGray);
        frame.render_widget(widget, area);
        return;
    }

    let current = app.current_rank();
    let lines: Vec<Line> = app
        .rankings()
        .list()
        .iter()
        .enumerate()
        .map(|(rank, entry)| {
            let (label, color) = match MEDALS.get(rank) {
                Some((medal, color)) => (medal.to_string(), *color),
                None => (format!("{}th", rank + 1), Color::White),
            };
            let mut style = Style::default().fg(color);
            if current == Some(rank) {
                style = style.bold().reversed();
            }

            Line::from(vec![
                Span::styled(format!(" {:>4}  ", label), style),
                Span::styled(format!("{:<12}", entry.nickname), style),
                Span::styled(format!("{:>6} pts", entry.score), style),
                Span::styled(
                    format!(
                        "  {}/{} ({}%)  {}",
                        entry.correct_count,
                        entry.total_questions,
                        entry.accuracy,
                        entry.date.format("%Y-%m-%d %H:%M")
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}
