use ratatui::{
    prelude::*,
    widgets::{Gauge, Paragraph, Wrap},
};

use crate::app::App;
use crate::game::scoring::MAX_TIME;
use crate::models::Question;

const OPTION_LABELS: [char; 4] = ['1', '2', '3', '4'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.machine().current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], app);
    render_timer(frame, chunks[1], app);
    render_question_text(frame, chunks[3], &question.text);
    render_options(frame, chunks[4], question, app);
    render_feedback(frame, chunks[5], question, app);
    render_controls(frame, chunks[6], app.machine().snapshot().answered);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let machine = app.machine();
    let category = machine
        .current_category()
        .map(|c| c.to_string())
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(category, Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!(
                "  {}/{}",
                machine.category_question_index() + 1,
                machine.catalog().block_size()
            ),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!(
                "  ·  Q {}/{}  ·  {} pts",
                machine.question_index() + 1,
                machine.total_questions(),
                machine.snapshot().score
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_timer(frame: &mut Frame, area: Rect, app: &App) {
    let timer = app.machine().snapshot().timer;
    let color = match timer {
        0..=5 => Color::Red,
        6..=10 => Color::Yellow,
        _ => Color::Magenta,
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(f64::from(timer) / f64::from(MAX_TIME))
        .label(format!("{}s", timer));
    frame.render_widget(gauge, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, question: &Question, app: &App) {
    let state = app.machine().snapshot();
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let style = if state.answered {
            if index == question.answer {
                Style::default().fg(Color::Green).bold()
            } else if state.selected == Some(index) {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::DarkGray)
            }
        } else if index == app.highlighted() {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if !state.answered && index == app.highlighted() {
            ">"
        } else {
            " "
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_feedback(frame: &mut Frame, area: Rect, question: &Question, app: &App) {
    let state = app.machine().snapshot();
    if !state.answered {
        return;
    }
    let Some(record) = state.answers.last() else {
        return;
    };

    let (label, color) = if record.timed_out() {
        ("TIME'S UP!", Color::Yellow)
    } else if record.correct {
        ("CORRECT!", Color::Green)
    } else {
        ("WRONG!", Color::Red)
    };

    let mut heading = vec![Span::styled(label, Style::default().fg(color).bold())];
    if record.score > 0 {
        heading.push(Span::styled(
            format!("  +{}", record.score),
            Style::default().fg(Color::Green),
        ));
    }

    let content = vec![
        Line::from(heading),
        Line::from(""),
        Line::from(question.explanation.as_str().fg(Color::Gray)),
    ];
    let widget = Paragraph::new(content).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, answered: bool) {
    let text = if answered {
        "next question coming up...  ·  q quit"
    } else {
        "j/k navigate  ·  enter or 1-4 answer  ·  esc restart  ·  q quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
