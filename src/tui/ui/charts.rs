//! Bar chart rendering for the risk and staffing canvases.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Bar as BarWidget, BarChart as BarChartWidget, BarGroup, Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::{BarChart, ChartCanvas};
use crate::tui::styles::WardTheme;

/// Bars are drawn from integers; values are scaled to keep two decimals.
const SCALE: f64 = 100.0;

fn scaled(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        (value * SCALE).round() as u64
    } else {
        0
    }
}

fn bar_text(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Render whatever chart instance the canvas holds, or `empty_hint` if none.
pub fn render_canvas(f: &mut Frame, area: Rect, title: &str, canvas: &ChartCanvas, empty_hint: &str) {
    let block = Block::default()
        .title(Span::styled(format!(" {title} "), WardTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(WardTheme::border());

    match canvas.chart() {
        Some(chart) => render_bar_chart(f, area, block, chart),
        None => {
            let hint = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(empty_hint, WardTheme::text_muted())),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
            f.render_widget(hint, area);
        }
    }
}

fn render_bar_chart(f: &mut Frame, area: Rect, block: Block<'_>, chart: &BarChart) {
    let bars: Vec<BarWidget> = chart
        .bars
        .iter()
        .map(|b| {
            BarWidget::default()
                .value(scaled(b.value))
                .label(Line::from(b.label))
                .text_value(bar_text(b.value))
        })
        .collect();

    // Spread the bars across the pane.
    let inner_width = area.width.saturating_sub(2);
    let count = u16::try_from(bars.len().max(1)).unwrap_or(1);
    let bar_width = (inner_width / count).saturating_sub(2).clamp(3, 20);

    let mut widget = BarChartWidget::default()
        .block(block.title_bottom(Line::from(Span::styled(
            format!(" {} ", chart.series),
            WardTheme::text_muted(),
        ))))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(2)
        .bar_style(WardTheme::chart_bar())
        .value_style(WardTheme::header())
        .label_style(WardTheme::text_secondary());

    if let Some(max) = chart.y_max {
        widget = widget.max(scaled(max));
    }

    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaling() {
        assert_eq!(scaled(0.1234), 12);
        assert_eq!(scaled(1.0), 100);
        assert_eq!(scaled(-3.0), 0);
        assert_eq!(scaled(f64::NAN), 0);
    }

    #[test]
    fn test_bar_text() {
        assert_eq!(bar_text(20.0), "20");
        assert_eq!(bar_text(0.1234), "0.12");
    }
}
