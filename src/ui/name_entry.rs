//! Name prompt shown before a run that requires one

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::layout::{centered_rect, hint_line};
use crate::app::state::AppState;
use crate::theme::Theme;

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let overlay = centered_rect(60, 40, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .title(format!(" {} ", state.run.settings().title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let input_style = if state.name.is_valid() {
        Style::default().fg(theme.fg_primary)
    } else {
        Style::default().fg(theme.fg_muted)
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} questions", state.run.len()),
            Style::default().fg(theme.fg_secondary),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter your name to begin",
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        build_line_with_cursor(&state.name.input, state.name.cursor, input_style, theme),
        Line::from(""),
    ];
    if let Some(ref msg) = state.message {
        lines.push(Line::from(Span::styled(msg.clone(), Style::default().fg(theme.error))));
    }
    lines.push(Line::from(""));
    lines.push(hint_line(&[("Enter", "Start"), ("Esc", "Quit")], theme));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Build a line with a visible cursor
fn build_line_with_cursor(
    text: &str,
    cursor_pos: usize,
    base_style: Style,
    theme: &Theme,
) -> Line<'static> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();

    if cursor_pos > 0 {
        let before: String = chars.iter().take(cursor_pos).collect();
        spans.push(Span::styled(before, base_style));
    }

    // Space when the cursor sits past the end
    let cursor_char = chars.get(cursor_pos).copied().unwrap_or(' ');
    let cursor_style = Style::default().fg(theme.bg_primary).bg(theme.cursor);
    spans.push(Span::styled(cursor_char.to_string(), cursor_style));

    if cursor_pos + 1 < chars.len() {
        let after: String = chars.iter().skip(cursor_pos + 1).collect();
        spans.push(Span::styled(after, base_style));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_just_the_cursor() {
        let theme = Theme::default();
        let line = build_line_with_cursor("", 0, Style::default(), &theme);
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, " ");
    }

    #[test]
    fn cursor_at_end_of_name() {
        let theme = Theme::default();
        let line = build_line_with_cursor("Ada", 3, Style::default(), &theme);
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].content, "Ada");
    }

    #[test]
    fn cursor_inside_multibyte_name() {
        let theme = Theme::default();
        let line = build_line_with_cursor("Zoë K", 2, Style::default(), &theme);
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, "ë");
        assert_eq!(line.spans[2].content, " K");
    }
}
