//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use chrono::Local;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::NodeStatus;
use crate::scheduler::clock_label;

/// Render the header bar with status counts, countdown and clock.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let clock = clock_label(Local::now());

    let Some(ref view) = app.dashboard else {
        let line = Line::from(vec![
            Span::styled(" NOCWATCH ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let status = &view.status;

    // Overall status indicator
    let worst = if status.critical > 0 {
        NodeStatus::Critical
    } else if status.warning > 0 {
        NodeStatus::Warning
    } else {
        NodeStatus::Healthy
    };

    let count_span = |count: usize, status: NodeStatus| {
        if count > 0 {
            Span::styled(count.to_string(), app.theme.status_style(status))
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        }
    };

    let line = Line::from(vec![
        Span::styled(" ● ", app.theme.status_style(worst)),
        Span::styled("NOCWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        count_span(status.healthy, NodeStatus::Healthy),
        Span::raw(" ok "),
        count_span(status.warning, NodeStatus::Warning),
        Span::raw(" warn "),
        count_span(status.critical, NodeStatus::Critical),
        Span::raw(" crit "),
        count_span(status.unknown, NodeStatus::Unknown),
        Span::raw(" n/a │ "),
        Span::styled(
            status.total.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" nodes │ "),
        Span::raw(app.countdown_label()),
        Span::raw(" │ "),
        Span::raw(clock),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, v)| Line::from(format!(" {}:{} ", i + 1, v.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows the active filter selections and the available controls, or a
/// temporary status message.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.current_view {
        View::Charts => "v:temp view m:metric g/t/f:filter x:clear r:refresh ?:help q:quit",
        _ => "g:region t:type f:status x:clear r:refresh e:export ?:help q:quit",
    };

    let status = format!(
        " {} | region:{} type:{} status:{} | {}",
        app.current_view.label(),
        app.filters.region,
        app.filters.node_type,
        app.filters.status,
        controls,
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render a centered placeholder for views with nothing to draw.
pub fn render_empty(frame: &mut Frame, app: &App, area: Rect, title: &str, message: &str) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let paragraph = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::DIM))
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ h/l Tab  Switch views"),
        Line::from("  1-4          Jump to view"),
        Line::from("  ↑/↓ j/k      Scroll critical issues"),
        Line::from(""),
        section(" Filters"),
        Line::from("  g         Cycle region"),
        Line::from("  t         Cycle node type"),
        Line::from("  f         Cycle status"),
        Line::from("  x         Clear filters"),
        Line::from(""),
        section(" Charts"),
        Line::from("  v         Temperature view"),
        Line::from("  m         Utilization metric"),
        Line::from(""),
        section(" General"),
        Line::from("  r         Refresh now"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 26u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
