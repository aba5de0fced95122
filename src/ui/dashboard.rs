use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::{App, Upload};
use crate::models::Grade;

const PATH_WIDTH: usize = 52;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(11),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], app);
    render_progress(frame, chunks[1], app);
    render_document(frame, chunks[2], app);
    render_controls(frame, chunks[3], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let name = app
        .session()
        .current()
        .map(|account| account.full_name.as_str())
        .unwrap_or("student");

    let content = vec![
        Line::from(Span::styled(
            "STUDY TERMTRACK",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(format!("Welcome back, {}", name).fg(Color::Gray)),
    ];
    let widget = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let summary = app.summary();
    let average_color = if summary.quizzes_taken == 0 {
        Color::DarkGray
    } else {
        super::grade_color(Grade::from_percentage(summary.average_percentage))
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Quizzes taken: ", Style::default().fg(Color::Gray)),
            Span::styled(
                summary.quizzes_taken.to_string(),
                Style::default().fg(Color::White).bold(),
            ),
            Span::raw("    "),
            Span::styled("Average: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}%", summary.average_percentage),
                Style::default().fg(average_color).bold(),
            ),
        ]),
        Line::from(""),
    ];

    if summary.recent.is_empty() {
        lines.push(Line::from("No quizzes taken yet".fg(Color::DarkGray)));
    }
    for record in &summary.recent {
        let percentage = record.percentage().round() as u32;
        let color = super::grade_color(Grade::from_percentage(percentage));
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<12}", record.date),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("{:>3}/{:<3}", record.score, record.total),
                Style::default().fg(Color::White),
            ),
            Span::styled(format!(" {:>3}%", percentage), Style::default().fg(color)),
        ]));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(" Your progress ")
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_document(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Document: ", Style::default().fg(Color::White)),
            Span::styled(
                super::tail(app.path_input(), PATH_WIDTH),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]),
        Line::from("PDF, Word or PowerPoint".fg(Color::DarkGray)),
        Line::from(""),
    ];

    match app.upload() {
        Upload::Empty => {}
        Upload::Failed { name, message } => {
            lines.push(Line::from(Span::styled(
                name.clone(),
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        Upload::Ready {
            name,
            kind_label,
            content,
        } => {
            lines.push(Line::from(vec![
                Span::styled(name.clone(), Style::default().fg(Color::Green).bold()),
                Span::styled(format!("  ({})", kind_label), Style::default().fg(Color::DarkGray)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Topic: ", Style::default().fg(Color::Gray)),
                Span::styled(content.primary_topic().to_string(), Style::default().fg(Color::Cyan)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Key terms: ", Style::default().fg(Color::Gray)),
                Span::styled(content.key_terms.join(", "), Style::default().fg(Color::White)),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Ready. Press [Tab] to generate a quiz.",
                Style::default().fg(Color::Green),
            )));
        }
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Study material ")
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let text = if app.can_generate() {
        "enter load file  ·  tab generate quiz  ·  esc sign out  ·  ctrl+c quit"
    } else {
        "enter load file  ·  esc sign out  ·  ctrl+c quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
