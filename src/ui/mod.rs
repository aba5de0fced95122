mod auth;
mod dashboard;
mod quiz;
mod result;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, Screen};
use crate::models::Grade;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.screen {
        Screen::Auth => auth::render(frame, area, app),
        Screen::Dashboard => dashboard::render(frame, area, app),
        Screen::Quiz => quiz::render(frame, area, app),
        Screen::Result => result::render(frame, area, app),
    }
}

pub(crate) fn grade_color(grade: Grade) -> Color {
    match grade {
        Grade::Good => Color::Green,
        Grade::Fair => Color::Yellow,
        Grade::Poor => Color::Red,
    }
}

/// Keep the last `width` characters of a line so the cursor stays visible.
pub(crate) fn tail(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    text.chars().skip(count - width).collect()
}
