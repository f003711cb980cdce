//! Result panel: prediction fields, staffing summary and charts.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::{ResultView, Session, PLACEHOLDER};
use crate::tui::styles::WardTheme;

use super::charts::render_canvas;

/// Render the right-hand side of the screen.
pub fn render_results(f: &mut Frame, area: Rect, session: &Session) {
    let simulation_height = if session.simulation().is_some() { 4 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),                 // Result card
            Constraint::Length(simulation_height), // Simulation output
            Constraint::Min(0),                    // Charts
        ])
        .split(area);

    match session.result() {
        Some(view) => render_result_card(f, chunks[0], view),
        None => render_idle(f, chunks[0]),
    }

    if let Some(summary) = session.simulation() {
        render_simulation(f, chunks[1], summary);
    }

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);

    render_canvas(
        f,
        charts[0],
        "Readmission Risk",
        session.charts().risk(),
        "No prediction yet",
    );
    render_canvas(
        f,
        charts[1],
        "Suggested Staffing",
        session.charts().staffing(),
        "Run a staffing simulation to see beds, nurses and doctors",
    );
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Ready to predict readmission risk",
            WardTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Fill in the form and press Enter",
            WardTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(WardTheme::border()),
    );

    f.render_widget(content, area);
}

fn field<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label:<20}"), WardTheme::text_secondary()),
        Span::styled(value, WardTheme::text()),
    ])
}

fn render_result_card(f: &mut Frame, area: Rect, view: &ResultView) {
    let block = Block::default()
        .title(Span::styled(" Prediction Result ", WardTheme::subtitle()))
        .title_top(
            Line::from(Span::styled(
                format!(" Updated {} ", view.received_at.format("%H:%M:%S")),
                WardTheme::text_muted(),
            ))
            .right_aligned(),
        )
        .borders(Borders::ALL)
        .border_style(WardTheme::border_focused());

    let followup = view.followup.as_deref().unwrap_or(PLACEHOLDER);

    let content = Paragraph::new(vec![
        field("Disease", &view.disease),
        field("Prediction", &view.prediction),
        field("Readmission score", &view.score),
        Line::from(vec![
            Span::styled(format!("{:<20}", "Risk"), WardTheme::text_secondary()),
            Span::styled(
                view.risk_label.as_str(),
                WardTheme::risk_label(&view.risk_label)
                    .add_modifier(ratatui::style::Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Follow-up: ", WardTheme::text_secondary()),
            Span::styled(followup, WardTheme::text()),
        ]),
    ])
    .wrap(Wrap { trim: true })
    .block(block);

    f.render_widget(content, area);
}

fn render_simulation(f: &mut Frame, area: Rect, summary: &str) {
    let content = Paragraph::new(Line::from(Span::styled(summary, WardTheme::text())))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(" Staffing Simulation ", WardTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(WardTheme::border()),
        );

    f.render_widget(content, area);
}
