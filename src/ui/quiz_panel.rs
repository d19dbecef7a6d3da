//! Question screen

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::layout::{draw_status, format_clock, hint_line, is_low_time};
use crate::app::state::AppState;
use crate::quiz::{Question, QuizRun, Selection, text};
use crate::theme::Theme;

/// Draw the current question with its options
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let run = &state.run;
    let Some(question) = run.current_question() else {
        return;
    };

    let [header_area, body_area, status_area, hint_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    draw_header(frame, header_area, run, theme);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(body_area);
    frame.render_widget(block, body_area);

    let lines = question_lines(run, question, state.cursor, theme);
    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);

    if state.message.is_none() && state.skipped > 0 && run.current_index() == 0 {
        let note = format!("{} malformed questions were skipped", state.skipped);
        let line = Line::from(Span::styled(note, Style::default().fg(theme.fg_muted)));
        frame.render_widget(Paragraph::new(line), status_area);
    } else {
        draw_status(frame, status_area, state.message.as_deref(), theme);
    }
    frame.render_widget(Paragraph::new(hints(run, theme)), hint_area);
}

/// Title, progress and countdown
fn draw_header(frame: &mut Frame, area: Rect, run: &QuizRun, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(format!(" {} ", run.settings().title))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let progress = Line::from(Span::styled(
        format!("Question {} of {}", run.current_index() + 1, run.len()),
        Style::default().fg(theme.fg_secondary),
    ));
    frame.render_widget(Paragraph::new(progress), inner);

    if let (Some(remaining), Some(limit)) =
        (run.remaining_seconds(), run.settings().time_limit_seconds)
    {
        let color =
            if is_low_time(remaining, limit) { theme.timer_warning } else { theme.fg_primary };
        let clock = Line::from(Span::styled(
            format!("\u{23F1} {}", format_clock(remaining)), // ⏱
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(clock).alignment(Alignment::Right), inner);
    }
}

fn question_lines(
    run: &QuizRun,
    question: &Question,
    cursor: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = vec![];

    if run.settings().show_categories {
        let badge = match run.category_position() {
            Some((pos, total)) => {
                format!(" {} \u{00B7} {} of {} ", question.category_name(), pos, total)
            }
            None => format!(" {} ", question.category_name()),
        };
        lines.push(Line::from(Span::styled(
            badge,
            Style::default().fg(theme.bg_primary).bg(theme.accent_secondary),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        text::strip_select_instruction(&question.question).to_string(),
        Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
    )));
    if let Some(hint) = text::selection_hint(question) {
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::from(""));

    let selection = run.current_selection();
    let revealed = run.explanation_visible();
    for (i, option) in question.options.iter().enumerate() {
        lines.push(option_line(question, selection, i, option, i == cursor, revealed, theme));
    }

    if revealed {
        lines.push(Line::from(""));
        lines.extend(explanation_lines(run, question, theme));
    }

    if let Some(remaining) = run.auto_advance_remaining() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Next question in {:.1}s", remaining.as_secs_f32()),
            Style::default().fg(theme.fg_muted),
        )));
    }

    lines
}

fn option_line(
    question: &Question,
    selection: Option<&Selection>,
    index: usize,
    option: &str,
    highlighted: bool,
    revealed: bool,
    theme: &Theme,
) -> Line<'static> {
    let selected = selection.is_some_and(|s| s.contains(index));
    let marker = match (question.answer.is_multiple(), selected) {
        (true, true) => "[x]",
        (true, false) => "[ ]",
        (false, true) => "\u{25CF}",  // ●
        (false, false) => "\u{25CB}", // ○
    };

    let mut style = if selected {
        Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg_secondary)
    };
    let mut verdict = "";
    if revealed {
        if question.answer.contains(index) {
            style = style.fg(theme.correct);
            verdict = " \u{2713}"; // ✓
        } else if selected {
            style = style.fg(theme.incorrect);
            verdict = " \u{2717}"; // ✗
        }
    }
    if highlighted {
        style = style.bg(theme.selection);
    }

    Line::from(Span::styled(
        format!(
            "  {} {}. {}{}",
            marker,
            text::letter(index),
            text::strip_option_prefix(option, index),
            verdict
        ),
        style,
    ))
}

fn explanation_lines(run: &QuizRun, question: &Question, theme: &Theme) -> Vec<Line<'static>> {
    let (verdict, color) = if run.is_correct(run.current_index()) {
        ("Correct!", theme.correct)
    } else {
        ("Incorrect", theme.incorrect)
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(verdict, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  Answer: {}", text::letters(&question.answer.indices())),
            Style::default().fg(theme.fg_secondary),
        ),
    ])];
    if let Some(explanation) = question.explanation.as_deref().filter(|e| !e.is_empty()) {
        lines.push(Line::from(Span::styled(
            explanation.to_string(),
            Style::default().fg(theme.fg_primary),
        )));
    }
    lines
}

/// Key hints for the controls that are currently enabled
fn hints(run: &QuizRun, theme: &Theme) -> Line<'static> {
    let mut hints = vec![("j/k", "Move"), ("Space", "Select")];
    if run.can_advance() {
        hints.push(("n", if run.is_last() { "Finish" } else { "Next" }));
    }
    if run.can_retreat() {
        hints.push(("p", "Previous"));
    }
    if run.can_check_answer() {
        hints.push(("c", "Check Answer"));
    }
    if run.settings().auto_advance {
        let label =
            if run.auto_advance_enabled() { "Auto-advance: on" } else { "Auto-advance: off" };
        hints.push(("a", label));
    }
    hints.push(("?", "Help"));
    hints.push(("q", "Quit"));
    hint_line(&hints, theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{AnswerKey, QuizSettings};

    fn run(settings: QuizSettings) -> QuizRun {
        let q = Question::new(
            "Which two? (Select TWO.)",
            vec!["A. S3".into(), "B. EC2".into(), "C. Lambda".into()],
            AnswerKey::Multiple { correct_answers: vec![0, 2] },
        )
        .unwrap()
        .with_category("Compute");
        QuizRun::new(vec![q], settings).unwrap()
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn option_labels_are_cleaned_and_marked() {
        let mut run = run(QuizSettings::default());
        run.select_option(1);
        let question = run.current_question().unwrap().clone();
        let lines = question_lines(&run, &question, 0, &Theme::default());
        let texts: Vec<String> = lines.iter().map(line_text).collect();

        assert!(texts.contains(&" Compute \u{00B7} 1 of 1 ".to_string()));
        assert!(texts.contains(&"Which two?".to_string()));
        assert!(texts.contains(&"Select 2 answers".to_string()));
        assert!(texts.contains(&"  [ ] A. S3".to_string()));
        assert!(texts.contains(&"  [x] B. EC2".to_string()));
    }

    #[test]
    fn revealed_options_show_verdicts() {
        let mut run = run(QuizSettings::default());
        run.select_option(0);
        run.select_option(1);
        assert!(run.reveal_explanation());

        let question = run.current_question().unwrap().clone();
        let lines = question_lines(&run, &question, 0, &Theme::default());
        let texts: Vec<String> = lines.iter().map(line_text).collect();

        assert!(texts.contains(&"  [x] A. S3 \u{2713}".to_string()));
        assert!(texts.contains(&"  [x] B. EC2 \u{2717}".to_string()));
        assert!(texts.contains(&"  [ ] C. Lambda \u{2713}".to_string()));
        assert!(texts.contains(&"Incorrect  Answer: A, C".to_string()));
    }

    #[test]
    fn hints_follow_enabled_controls() {
        let mut run = run(QuizSettings { hide_check_answer: true, ..Default::default() });
        let text = line_text(&hints(&run, &Theme::default()));
        assert!(!text.contains("Finish"));

        run.select_option(0);
        run.select_option(2);
        let text = line_text(&hints(&run, &Theme::default()));
        assert!(text.contains("Finish"));
        assert!(!text.contains("Check Answer"));
    }
}
