//! Results and review screen

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::layout::{centered_rect, hint_line};
use crate::app::state::AppState;
use crate::quiz::{QuizRun, ScoringMode, text};
use crate::theme::Theme;

/// Draw the final score, category breakdown and per-question review
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let run = &state.run;
    let summary = summary_lines(run, theme);
    let (overlay, [summary_area, review_area, hint_area]) = panes(area, summary.len());

    let block = Block::default()
        .title(format!(" {} \u{00B7} Results ", run.settings().title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));
    frame.render_widget(block, overlay);

    frame.render_widget(Paragraph::new(summary).alignment(Alignment::Center), summary_area);

    let review = review_lines(run, theme);
    let max_scroll = wrapped_height(&review, review_area.width)
        .saturating_sub(usize::from(review_area.height));
    let scroll = state.review_scroll.min(max_scroll);
    let review = Paragraph::new(review)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(review, review_area);

    let hints = hint_line(&[("r", "Retake"), ("j/k", "Scroll"), ("q", "Quit")], theme);
    frame.render_widget(Paragraph::new(hints).alignment(Alignment::Center), hint_area);
}

/// Largest scroll offset that still fills the review pane of a screen of size `area`
pub fn max_review_scroll(run: &QuizRun, area: Rect, theme: &Theme) -> usize {
    let (_, [_, review_area, _]) = panes(area, summary_lines(run, theme).len());
    wrapped_height(&review_lines(run, theme), review_area.width)
        .saturating_sub(usize::from(review_area.height))
}

/// Overlay plus its summary, review and hint panes
fn panes(area: Rect, summary_height: usize) -> (Rect, [Rect; 3]) {
    let overlay = centered_rect(80, 90, area);
    let inner = Block::default().borders(Borders::ALL).inner(overlay);
    let panes = Layout::vertical([
        Constraint::Length(u16::try_from(summary_height).unwrap_or(u16::MAX)),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);
    (overlay, panes)
}

/// Rows `lines` take once wrapped to `width`
fn wrapped_height(lines: &[Line], width: u16) -> usize {
    let width = usize::from(width.max(1));
    lines.iter().map(|line| line.width().max(1).div_ceil(width)).sum()
}

fn summary_lines(run: &QuizRun, theme: &Theme) -> Vec<Line<'static>> {
    let score = run.score();
    let percentage = score.percentage();
    let settings = run.settings();
    let unit = match settings.scoring {
        ScoringMode::Count => "correct",
        ScoringMode::Weighted => "points",
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            run.feedback().message(run.player_name()),
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}%", percentage),
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} / {} {}", score.correct, score.total, unit),
            Style::default().fg(theme.fg_secondary),
        )),
    ];

    let (verdict, color) = if run.passed() {
        (format!("Passed (needed {}%)", settings.pass_percentage), theme.correct)
    } else {
        (format!("Not passed (needed {}%)", settings.pass_percentage), theme.incorrect)
    };
    lines.push(Line::from(Span::styled(verdict, Style::default().fg(color))));

    let breakdown = run.category_breakdown();
    if settings.show_categories && breakdown.len() > 1 {
        lines.push(Line::from(""));
        for category in breakdown {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<24}", category.name),
                    Style::default().fg(theme.fg_primary),
                ),
                Span::styled(
                    format!(
                        "{:>3}/{:<3} {:>3}%",
                        category.correct,
                        category.total,
                        category.percentage()
                    ),
                    Style::default().fg(theme.fg_secondary),
                ),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines
}

fn review_lines(run: &QuizRun, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (entry, question) in run.review().into_iter().zip(run.questions()) {
        let (marker, color) = if entry.is_correct {
            ("\u{2713}", theme.correct) // ✓
        } else {
            ("\u{2717}", theme.incorrect) // ✗
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("{} Q{} ", marker, entry.index + 1),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                text::strip_select_instruction(&question.question).to_string(),
                Style::default().fg(theme.fg_primary),
            ),
        ]));

        let mut detail = vec![Span::styled(
            format!("    Your answer: {}", text::letters(&entry.selected)),
            Style::default().fg(color),
        )];
        if !entry.is_correct {
            detail.push(Span::styled(
                format!("   Correct: {}", text::letters(&entry.expected)),
                Style::default().fg(theme.correct),
            ));
        }
        lines.push(Line::from(detail));
    }

    lines
}
