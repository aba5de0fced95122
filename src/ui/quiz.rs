use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::config::NavigationMode;
use crate::models::QuestionKind;
use crate::quiz::{Feedback, Outcome, QuizDriver, Urgency};

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(quiz) = app.quiz() else {
        return;
    };
    let Some((index, question)) = quiz.current() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_status(frame, chunks[0], quiz, index, question.kind());
    render_prompt(frame, chunks[1], &question.prompt);

    if question.kind().is_free_text() {
        render_text_input(frame, chunks[2], app.text_input(), question.kind());
    } else {
        render_options(frame, chunks[2], &app.current_options(), app.selected_option());
    }

    render_feedback(frame, chunks[3], quiz.feedback(), app.quiz_error());
    let is_last = index + 1 == quiz.questions().len();
    render_controls(frame, chunks[4], quiz.navigation(), question.kind(), is_last);
}

fn render_status(frame: &mut Frame, area: Rect, quiz: &dyn QuizDriver, index: usize, kind: QuestionKind) {
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let badge = Line::from(vec![
        Span::styled(
            format!(" {} ", kind.label()),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ),
        Span::styled(
            format!("  {}/{}", index + 1, quiz.questions().len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(badge), halves[0]);

    let timer_color = match quiz.urgency() {
        Urgency::Calm => Color::Green,
        Urgency::Low => Color::Yellow,
        Urgency::Critical => Color::Red,
    };
    let timer = Paragraph::new(format!("{}s", quiz.remaining_secs()))
        .alignment(Alignment::Right)
        .fg(timer_color)
        .bold();
    frame.render_widget(timer, halves[1]);
}

fn render_prompt(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, options: &[String], selected: Option<usize>) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let is_selected = selected == Some(index);
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };
        let label = OPTION_LABELS.get(index).copied().unwrap_or('?');

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_text_input(frame: &mut Frame, area: Rect, input: &str, kind: QuestionKind) {
    let hint = match kind {
        QuestionKind::Enumeration => "Separate items with commas or alt+enter",
        QuestionKind::Define => "Type your definition",
        _ => "Type your answer",
    };

    let style = Style::default().fg(Color::Yellow);
    let mut content: Vec<Line> = input
        .split('\n')
        .map(|line| Line::from(Span::styled(line, style)))
        .collect();
    if let Some(last) = content.last_mut() {
        last.push_span(Span::styled("_", style));
    }

    let widget = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(format!(" {} ", hint))
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_feedback(frame: &mut Frame, area: Rect, feedback: Option<&Feedback>, error: Option<&str>) {
    let line = match (feedback, error) {
        (Some(feedback), _) => {
            let color = match feedback.outcome {
                Outcome::Correct => Color::Green,
                Outcome::Incorrect => Color::Red,
                Outcome::NoAnswer => Color::Yellow,
            };
            Line::from(Span::styled(
                feedback.message.clone(),
                Style::default().fg(color).bold(),
            ))
        }
        (None, Some(err)) => Line::from(Span::styled(err.to_string(), Style::default().fg(Color::Red))),
        (None, None) => Line::from(""),
    };

    let widget = Paragraph::new(line).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_controls(
    frame: &mut Frame,
    area: Rect,
    navigation: NavigationMode,
    kind: QuestionKind,
    is_last: bool,
) {
    let select = if kind.is_free_text() {
        "type answer"
    } else {
        "↑/↓ choose"
    };
    let enter = if is_last { "enter submit" } else { "enter next" };
    let text = match navigation {
        NavigationMode::Free => format!(
            "{}  ·  {}  ·  ←/→ move  ·  ctrl+s submit  ·  esc leave",
            select, enter
        ),
        NavigationMode::Linear => format!("{}  ·  enter submit  ·  esc leave", select),
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
