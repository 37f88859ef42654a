use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::models::{CategoryScore, PlayerResult};

use super::grade_color;

const QUESTION_PREVIEW_LENGTH: usize = 50;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(result) = app.machine().finalize_result() else {
        return;
    };

    let category_rows = result.category_scores.len() as u16;
    let chunks = Layout::vertical([
        Constraint::Length(7),
        Constraint::Length(category_rows + 2),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[0], &result, app.machine().max_total_score());
    render_category_breakdown(frame, chunks[1], &result.category_scores);
    render_question_breakdown(frame, chunks[2], app);
    render_controls(frame, chunks[3]);
}

fn render_score_summary(frame: &mut Frame, area: Rect, result: &PlayerResult, max_score: u32) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("RESULTS · {}", result.nickname),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {} pts", result.score, max_score),
            Style::default().fg(Color::Magenta).bold(),
        )),
        Line::from(Span::styled(
            format!(
                "{} / {} correct  ({}%)",
                result.correct_count, result.total_questions, result.accuracy
            ),
            Style::default().fg(grade_color(result.accuracy)).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_category_breakdown(frame: &mut Frame, area: Rect, scores: &[CategoryScore]) {
    let lines: Vec<Line> = scores
        .iter()
        .map(|score| {
            Line::from(vec![
                Span::styled(
                    format!("{:<20}", score.category.as_str()),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:>2}/{:<2}", score.correct, score.total),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("  {:>5} pts", score.score),
                    Style::default().fg(Color::Magenta),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let catalog = app.machine().catalog();
    let lines: Vec<Line> = app
        .machine()
        .snapshot()
        .answers
        .iter()
        .zip(catalog.questions().iter())
        .enumerate()
        .map(|(index, (answer, question))| {
            let (symbol, color) = if answer.correct {
                ("+", Color::Green)
            } else if answer.timed_out() {
                ("~", Color::Yellow)
            } else {
                ("-", Color::Red)
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(truncate_question(&question.text), Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("  {}", answer.score),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((app.result_scroll() as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  l ranking  ·  r restart  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_question() {
        assert_eq!(truncate_question("short"), "short");
        let long = "x".repeat(QUESTION_PREVIEW_LENGTH + 5);
        let truncated = truncate_question(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), QUESTION_PREVIEW_LENGTH + 3);
    }
}
