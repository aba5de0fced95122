use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::quiz::{Mistake, QuizResult};

const PROMPT_PREVIEW_LENGTH: usize = 70;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(result) = app.result() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], result);
    render_mistakes(frame, chunks[2], result, app.result_scroll());
    render_controls(frame, chunks[3]);
}

fn render_score_summary(frame: &mut Frame, area: Rect, result: &QuizResult) {
    let grade_color = super::grade_color(result.grade());

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({}%)", result.correct, result.total, result.percentage),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(format!("{} incorrect", result.total - result.correct).fg(Color::DarkGray)),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_mistakes(frame: &mut Frame, area: Rect, result: &QuizResult, scroll: usize) {
    if result.is_perfect() {
        let widget = Paragraph::new("Perfect score! No mistakes to review.")
            .alignment(Alignment::Center)
            .fg(Color::Green)
            .bold();
        frame.render_widget(widget, area);
        return;
    }

    let lines: Vec<Line> = result
        .mistakes
        .iter()
        .skip(scroll)
        .flat_map(mistake_lines)
        .collect();

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Review your mistakes ")
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn mistake_lines(mistake: &Mistake) -> Vec<Line<'_>> {
    vec![
        Line::from(vec![
            Span::styled(
                format!("{:2}. ", mistake.number),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("[{}] ", mistake.kind.label()),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(truncate_prompt(&mistake.prompt), Style::default().fg(Color::Gray)),
        ]),
        Line::from(vec![
            Span::styled("    Your answer: ", Style::default().fg(Color::DarkGray)),
            Span::styled(mistake.your_answer.as_str(), Style::default().fg(Color::Red)),
        ]),
        Line::from(vec![
            Span::styled("    Correct answer: ", Style::default().fg(Color::DarkGray)),
            Span::styled(mistake.correct_answer.as_str(), Style::default().fg(Color::Green)),
        ]),
        Line::from(""),
    ]
}

fn truncate_prompt(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > PROMPT_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(PROMPT_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  enter dashboard  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_prompt() {
        let long = "x".repeat(PROMPT_PREVIEW_LENGTH + 5);
        assert!(truncate_prompt(&long).ends_with("..."));
        assert_eq!(truncate_prompt("short"), "short");
    }
}
