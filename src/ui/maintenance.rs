//! Maintenance alerts rendering.
//!
//! Three stacked panels: critical issues, warnings (capped with a "+N more"
//! line) and the maintenance schedule.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::maintenance::{
    MaintenancePriority, MaintenanceReport, NO_CRITICAL_MESSAGE, NO_SCHEDULE_MESSAGE,
    NO_WARNINGS_MESSAGE,
};
use crate::data::NodeStatus;

/// Render the Maintenance view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref view) = app.dashboard else {
        return;
    };
    let report = &view.maintenance;

    let chunks = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(30),
        Constraint::Percentage(30),
    ])
    .split(area);

    render_critical(frame, app, report, chunks[0]);
    render_panel(
        frame,
        app,
        chunks[1],
        format!(
            " Warnings ({}) ",
            report.warnings.len() + report.hidden_warnings
        ),
        warning_lines(app, report),
    );
    render_panel(
        frame,
        app,
        chunks[2],
        " Maintenance Schedule ".to_string(),
        schedule_lines(app, report),
    );
}

/// Every critical entry is reachable: the list scrolls to keep the
/// selected row in view.
fn render_critical(frame: &mut Frame, app: &App, report: &MaintenanceReport, area: Rect) {
    let title = format!(" Critical Issues ({}) ", report.critical.len());
    if report.critical.is_empty() {
        render_panel(frame, app, area, title, vec![empty_line(NO_CRITICAL_MESSAGE)]);
        return;
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let items: Vec<ListItem> = critical_lines(app, report)
        .into_iter()
        .map(ListItem::new)
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(app.theme.selected);

    let mut state = ListState::default().with_selected(Some(app.selected_critical_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_panel(frame: &mut Frame, app: &App, area: Rect, title: String, lines: Vec<Line>) {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn empty_line(message: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        message,
        Style::default().add_modifier(Modifier::DIM),
    ))
}

fn critical_lines<'a>(app: &App, report: &'a MaintenanceReport) -> Vec<Line<'a>> {
    let style = app.theme.status_style(NodeStatus::Critical);
    report
        .critical
        .iter()
        .map(|issue| {
            Line::from(vec![
                Span::styled(" ● ", style),
                Span::styled(
                    format!("{} ({})", issue.node_name, issue.node_type),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" - {} ", issue.message)),
                Span::styled(issue.action, style),
            ])
        })
        .collect()
}

fn warning_lines<'a>(app: &App, report: &'a MaintenanceReport) -> Vec<Line<'a>> {
    if report.warnings.is_empty() {
        return vec![empty_line(NO_WARNINGS_MESSAGE)];
    }
    let style = app.theme.status_style(NodeStatus::Warning);
    let mut lines: Vec<Line> = report
        .warnings
        .iter()
        .map(|alert| {
            Line::from(vec![
                Span::styled(" ● ", style),
                Span::styled(
                    alert.node_name.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" - {} ", alert.message)),
                Span::styled(alert.action, style),
            ])
        })
        .collect();

    if let Some(more) = report.more_warnings_label() {
        lines.push(Line::from(Span::styled(
            format!("   {}", more),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }
    lines
}

fn schedule_lines<'a>(app: &App, report: &'a MaintenanceReport) -> Vec<Line<'a>> {
    if report.schedule.is_empty() {
        return vec![empty_line(NO_SCHEDULE_MESSAGE)];
    }
    report
        .schedule
        .iter()
        .map(|slot| {
            let style = match slot.priority {
                MaintenancePriority::Urgent => app.theme.status_style(NodeStatus::Critical),
                MaintenancePriority::Scheduled => app.theme.status_style(NodeStatus::Warning),
            };
            let when = slot.scheduled_for.with_timezone(&Local).format("%Y-%m-%d %H:%M");
            Line::from(vec![
                Span::styled(format!(" [{:<9}] ", slot.priority.label()), style),
                Span::raw(format!("{}  ", when)),
                Span::styled(
                    slot.node_name.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" - {}", slot.priority.note())),
            ])
        })
        .collect()
}
