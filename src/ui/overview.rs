//! Overview rendering.
//!
//! Status counters with percentage gauges on the left, key metrics with
//! trend sparklines on the right.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::trend::sparkline_levels;
use crate::data::view::{KeyMetrics, StatusSummary, Trends};
use crate::data::NodeStatus;

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the Overview view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref view) = app.dashboard else {
        return;
    };

    let columns = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_status_counts(frame, app, &view.status, columns[0]);
    render_key_metrics(
        frame,
        app,
        view.key_metrics.as_ref(),
        view.trends.as_ref(),
        columns[1],
    );
}

fn render_status_counts(frame: &mut Frame, app: &App, status: &StatusSummary, area: Rect) {
    let block = Block::default()
        .title(format!(" Node Status ({}) ", status.total))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(inner);

    for (i, s) in NodeStatus::ALL.iter().enumerate() {
        let pct = status.percent(*s);
        let label = format!(
            "{:<8} {:>4}  {:5.1}%",
            s.label(),
            status.count(*s),
            pct
        );
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(app.theme.status_color(*s)))
            .ratio((pct / 100.0).clamp(0.0, 1.0))
            .label(label);
        frame.render_widget(gauge, rows[i]);
    }

    let alerts = Line::from(vec![
        Span::styled("Active alerts: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            status.alerts().to_string(),
            if status.alerts() > 0 {
                app.theme.status_style(NodeStatus::Critical)
            } else {
                Style::default().fg(app.theme.healthy)
            },
        ),
    ]);
    frame.render_widget(Paragraph::new(alerts), rows[4]);
}

fn render_key_metrics(
    frame: &mut Frame,
    app: &App,
    metrics: Option<&KeyMetrics>,
    trends: Option<&Trends>,
    area: Rect,
) {
    let block = Block::default()
        .title(" Key Metrics ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let (Some(metrics), Some(trends)) = (metrics, trends) else {
        let paragraph = Paragraph::new("No nodes match the current filters")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let thresholds = app.session().thresholds();
    let temp_style = Style::default().fg(app.theme.tier_color(
        thresholds.temperature.tier(metrics.avg_temperature),
    ));
    let cpu_style =
        Style::default().fg(app.theme.tier_color(thresholds.cpu.tier(metrics.avg_cpu)));

    let header = Row::new(vec!["Metric", "Average", "Trend"]).style(app.theme.header);
    let rows = vec![
        Row::new(vec![
            Cell::from("Temperature"),
            Cell::from(metrics.temperature_label()).style(temp_style),
            Cell::from(render_sparkline(&sparkline_levels(&trends.temperature))),
        ]),
        Row::new(vec![
            Cell::from("CPU"),
            Cell::from(metrics.cpu_label()).style(cpu_style),
            Cell::from(render_sparkline(&sparkline_levels(&trends.cpu))),
        ]),
        Row::new(vec![
            Cell::from("Availability"),
            Cell::from(metrics.availability_label()),
            Cell::from(render_sparkline(&sparkline_levels(&trends.availability))),
        ]),
    ];

    let table = Table::new(
        rows,
        [Constraint::Fill(2), Constraint::Fill(1), Constraint::Min(11)],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}

fn render_sparkline(levels: &[u8]) -> String {
    if levels.is_empty() {
        return "-".to_string();
    }
    levels.iter().map(|&v| SPARKLINE_CHARS[v.min(7) as usize]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_sparkline() {
        assert_eq!(render_sparkline(&[]), "-");
        assert_eq!(render_sparkline(&[0, 3, 7, 9]), "▁▄██");
    }
}
