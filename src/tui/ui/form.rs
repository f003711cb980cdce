//! Patient form view.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{form::Coercion, FieldGroup, FormState};
use crate::tui::styles::WardTheme;

const LABEL_WIDTH: usize = 18;

fn section_title(group: FieldGroup) -> &'static str {
    match group {
        FieldGroup::Shared => "Patient",
        FieldGroup::Diabetes => "Diabetes Labs",
        FieldGroup::Heart => "Heart Vitals",
        FieldGroup::Simulation => "Staffing Simulation",
    }
}

/// Render the patient form; only the selected disease group is shown.
pub fn render_form(f: &mut Frame, area: Rect, form: &FormState) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Patient Form │ {} ", form.disease()),
            WardTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(WardTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let (lines, focus_line) = field_lines(form);

    // Keep the focused field on screen when the form is taller than the pane.
    let height = chunks[0].height as usize;
    let scroll = if height == 0 {
        0
    } else {
        focus_line.saturating_sub(height.saturating_sub(1))
    };

    let fields = Paragraph::new(lines).scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    f.render_widget(fields, chunks[0]);

    let status = match &form.error_message {
        Some(err) => Line::from(vec![
            Span::styled("! ", WardTheme::danger()),
            Span::styled(err.as_str(), WardTheme::danger()),
        ]),
        None => Line::from(Span::styled(form.focused().hint, WardTheme::text_muted())),
    };
    f.render_widget(Paragraph::new(status), chunks[1]);
}

fn field_lines(form: &FormState) -> (Vec<Line<'_>>, usize) {
    let mut lines = Vec::new();
    let mut current_group = None;
    let mut focus_line = 0;

    for (index, spec, value) in form.visible_fields() {
        if current_group != Some(spec.group) {
            if current_group.is_some() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                section_title(spec.group),
                WardTheme::title(),
            )));
            current_group = Some(spec.group);
        }

        let focused = index == form.focus_index();
        if focused {
            focus_line = lines.len();
        }

        let label_style = if focused {
            WardTheme::focused()
        } else {
            WardTheme::text_secondary()
        };

        let mut spans = vec![
            Span::styled(if focused { "› " } else { "  " }, WardTheme::focused()),
            Span::styled(format!("{:<width$}", spec.label, width = LABEL_WIDTH), label_style),
        ];

        match spec.coercion {
            Coercion::Choice(_) => {
                spans.push(Span::styled("‹ ", WardTheme::text_muted()));
                spans.push(Span::styled(value, WardTheme::text()));
                spans.push(Span::styled(" ›", WardTheme::text_muted()));
            }
            _ if value.is_empty() => {
                spans.push(Span::styled(spec.hint, WardTheme::text_muted()));
            }
            _ => spans.push(Span::styled(value, WardTheme::text())),
        }

        if focused && !matches!(spec.coercion, Coercion::Choice(_)) {
            spans.push(Span::styled("▌", WardTheme::cursor()));
        }

        lines.push(Line::from(spans));
    }

    (lines, focus_line)
}
