//! Ranked bar charts: node temperature and the selected utilization metric.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
    Frame,
};

use crate::app::App;
use crate::data::view::RankedChart;
use crate::ui::common::render_empty;

/// Bar values are integers; one decimal of precision is kept.
const VALUE_SCALE: f64 = 10.0;

/// Render the Charts view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref view) = app.dashboard else {
        return;
    };

    let columns = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let temperature_title = format!(
        "{} [v:{}]",
        view.temperature_chart.title,
        view.options.temperature_view.label()
    );
    let utilization_title = format!(
        "{} [m:{}]",
        view.utilization_chart.title,
        view.options.utilization_metric.label()
    );

    render_ranked(frame, app, &view.temperature_chart, &temperature_title, columns[0]);
    render_ranked(frame, app, &view.utilization_chart, &utilization_title, columns[1]);
}

fn render_ranked(frame: &mut Frame, app: &App, chart: &RankedChart, title: &str, area: Rect) {
    if chart.bars.is_empty() {
        render_empty(frame, app, area, title, "No nodes to rank");
        return;
    }

    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .map(|b| {
            Bar::default()
                .value(scaled(b.value))
                .label(Line::from(truncate(&b.node_name, 14)))
                .text_value(format!("{:.1}", b.value))
                .style(Style::default().fg(app.theme.tier_color(b.tier)))
        })
        .collect();

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_bottom(format!(
            " warn > {} │ crit > {} ",
            chart.thresholds.warning, chart.thresholds.critical
        ))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let barchart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(barchart, area);
}

/// Negative values are drawn as empty bars.
fn scaled(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        (value * VALUE_SCALE).round() as u64
    } else {
        0
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled() {
        assert_eq!(scaled(45.26), 453);
        assert_eq!(scaled(0.0), 0);
        assert_eq!(scaled(-3.0), 0);
        assert_eq!(scaled(f64::NAN), 0);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Edge", 14), "Edge");
        assert_eq!(truncate("Core-Router-Seattle-01", 8), "Core-Ro…");
    }
}
