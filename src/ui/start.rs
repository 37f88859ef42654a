use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::game::scoring::MAX_TIME;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(13),
        Constraint::Fill(1),
    ])
    .split(area);

    let catalog = app.machine().catalog();
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "TRIVIA RUSH",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(
            format!(
                "{} Questions · {} Categories · {}s each",
                catalog.len(),
                catalog.categories().len(),
                MAX_TIME
            )
            .fg(Color::DarkGray),
        ),
        Line::from(""),
        Line::from(vec![
            Span::styled("Nickname: ", Style::default().fg(Color::White)),
            Span::styled(app.name_input(), Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
    ];

    match app.name_hint() {
        Some(hint) => content.push(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::Red),
        ))),
        None => content.push(Line::from("")),
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "[Enter] start  ·  [Tab] ranking  ·  [Esc] quit",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
