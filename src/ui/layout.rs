//! Layout utilities and common components

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::theme::Theme;

/// Create a centered rectangle with the given percentage of width and height
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// `mm:ss` countdown text
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Whether the countdown should switch to the warning color
pub fn is_low_time(remaining: u32, limit: u32) -> bool {
    remaining <= 10 || u64::from(remaining) * 10 <= u64::from(limit)
}

/// Key hints as `[key] label` pairs
pub fn hint_line(hints: &[(&str, &str)], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(format!("[{}]", key), Style::default().fg(theme.accent_secondary)));
        spans.push(Span::styled(format!(" {}", label), Style::default().fg(theme.fg_muted)));
    }
    Line::from(spans)
}

/// Draw the status message, if any
pub fn draw_status(frame: &mut Frame, area: Rect, message: Option<&str>, theme: &Theme) {
    if let Some(msg) = message {
        let line = Line::from(Span::styled(msg.to_string(), Style::default().fg(theme.error)));
        frame.render_widget(Paragraph::new(line), area);
    }
}
