//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{NodeStatus, Tier};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for warning status and warning-tier bars.
    pub warning: Color,
    /// Color for critical status and critical-tier bars.
    pub critical: Color,
    /// Color for healthy status.
    pub healthy: Color,
    /// Color for nodes without a current sample.
    pub unknown: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for section headings and table headers.
    pub header: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            unknown: Color::Gray,
            border: Color::Gray,
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Rgb(0xd9, 0x77, 0x06),
            critical: Color::Red,
            healthy: Color::Green,
            unknown: Color::DarkGray,
            border: Color::DarkGray,
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn status_color(&self, status: NodeStatus) -> Color {
        match status {
            NodeStatus::Healthy => self.healthy,
            NodeStatus::Warning => self.warning,
            NodeStatus::Critical => self.critical,
            NodeStatus::Unknown => self.unknown,
        }
    }

    /// Get style for a node status
    pub fn status_style(&self, status: NodeStatus) -> Style {
        let style = Style::default().fg(self.status_color(status));
        if status == NodeStatus::Critical {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    pub fn tier_color(&self, tier: Tier) -> Color {
        match tier {
            Tier::Healthy => self.healthy,
            Tier::Warning => self.warning,
            Tier::Critical => self.critical,
        }
    }
}
