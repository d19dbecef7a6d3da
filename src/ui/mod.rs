//! UI rendering components

pub mod layout;
pub mod name_entry;
pub mod quiz_panel;
pub mod results;

use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::state::{AppState, Screen};
use crate::theme::Theme;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    match state.screen() {
        Screen::NameEntry => name_entry::draw(frame, area, state, theme),
        Screen::Question => quiz_panel::draw(frame, area, state, theme),
        Screen::Results => results::draw(frame, area, state, theme),
    }

    if state.show_help {
        draw_help(frame, theme);
    }
}

const HELP: &[(&str, &str)] = &[
    ("j / k, Up / Down", "Move between options"),
    ("Space / Enter", "Select or toggle the highlighted option"),
    ("1-9", "Select an option directly"),
    ("n / l, Right", "Next question, or finish on the last one"),
    ("p / h, Left", "Previous question (untimed runs only)"),
    ("c", "Check answer and show the explanation"),
    ("a", "Toggle auto-advance"),
    ("r", "Retake from the results screen"),
    ("Ctrl-d / Ctrl-u", "Scroll the review"),
    ("q / Esc", "Quit"),
];

fn draw_help(frame: &mut Frame, theme: &Theme) {
    let area = layout::centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_tertiary));

    let mut lines = vec![Line::from("")];
    for (keys, what) in HELP {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<20}", keys),
                Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
            ),
            Span::styled(*what, Style::default().fg(theme.fg_secondary)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press any key to close",
        Style::default().fg(theme.fg_muted),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
