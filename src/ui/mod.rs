mod quiz;
mod ranking;
mod result;
mod start;
mod transition;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::game::Phase;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.phase() {
        Phase::NotStarted => start::render(frame, area, app),
        Phase::Playing => quiz::render(frame, area, app),
        Phase::CategoryTransition => transition::render(frame, area, app),
        Phase::Result => result::render(frame, area, app),
        Phase::Ranking => ranking::render(frame, area, app),
    }
}

/// Colour for a percentage, shared by the summary screens.
fn grade_color(percentage: u32) -> Color {
    match percentage {
        70..=100 => Color::Green,
        40..=69 => Color::Yellow,
        _ => Color::Red,
    }
}
