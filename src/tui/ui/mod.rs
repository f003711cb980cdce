//! UI module: View components for the TUI.

pub mod charts;
pub mod form;
pub mod result;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::application::{Prompt, PromptLevel};
use crate::tui::styles::WardTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "Readmission scores are model estimates and do not replace clinical judgement.",
        WardTheme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(WardTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// Modal message box drawn over everything else until dismissed.
pub fn render_prompt(f: &mut Frame, area: Rect, prompt: &Prompt) {
    let popup = centered_rect(60, 7, area);

    let (title, border) = match prompt.level {
        PromptLevel::Error => (" Error ", WardTheme::danger()),
        PromptLevel::Info => (" Notice ", WardTheme::border_focused()),
    };

    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(prompt.text.as_str(), WardTheme::text())),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter] ", WardTheme::key_hint()),
            Span::styled("OK", WardTheme::key_desc()),
        ]),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(title, WardTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(border),
    );

    f.render_widget(Clear, popup);
    f.render_widget(content, popup);
}

/// A rectangle `percent_x` wide and `height` rows tall, centered in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
