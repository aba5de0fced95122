//! Sign-in and registration screen.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, AuthTab};

const FIELD_WIDTH: usize = 36;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.auth();
    let fields = form.tab.fields();

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(fields.len() as u16 * 2 + 10),
        Constraint::Fill(1),
    ])
    .split(area);
    let column = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(60),
        Constraint::Fill(1),
    ])
    .split(chunks[1]);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "STUDY TERMTRACK",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        render_tabs(form.tab),
        Line::from(""),
    ];

    for (index, field) in fields.iter().enumerate() {
        let focused = index == form.focus;
        let value = form.value(*field);
        let shown = if field.is_secret() {
            "*".repeat(value.chars().count())
        } else {
            value.to_string()
        };
        let label_style = if focused {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut spans = vec![
            Span::styled(format!("{:>17}: ", field.label()), label_style),
            Span::styled(
                super::tail(&shown, FIELD_WIDTH),
                Style::default().fg(Color::Yellow),
            ),
        ];
        if focused {
            spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
        }
        content.push(Line::from(spans));
        content.push(Line::from(""));
    }

    match &form.error {
        Some(err) => content.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        ))),
        None => content.push(Line::from("")),
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "[Tab] next field  ·  [←/→] switch tab  ·  [Enter] submit  ·  [Esc] quit",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, column[1]);
}

fn render_tabs(active: AuthTab) -> Line<'static> {
    let style_for = |tab: AuthTab| {
        if tab == active {
            Style::default().fg(Color::Black).bg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    Line::from(vec![
        Span::styled(" Sign In ", style_for(AuthTab::SignIn)),
        Span::raw("   "),
        Span::styled(" Register ", style_for(AuthTab::Register)),
    ])
}
