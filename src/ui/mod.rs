//! Terminal UI rendering using ratatui.
//!
//! Each view is implemented in its own submodule with a `render` function.
//! Views only read the [`DashboardView`](crate::data::DashboardView) held by
//! the [`App`](crate::app::App); nothing here computes statuses or rankings.
//!
//! ## Submodules
//!
//! - [`overview`]: Status counters, alert count and key metrics with sparklines
//! - [`map`]: Node locations on a world map, colored by status
//! - [`charts`]: Ranked temperature and utilization bar charts
//! - [`maintenance`]: Critical issues, warnings and the maintenance schedule
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (overview/map/charts/maintenance)    │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod charts;
pub mod common;
pub mod maintenance;
pub mod map;
pub mod overview;
pub mod theme;

pub use theme::Theme;
