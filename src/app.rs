//! Application state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info};

use crate::data::{CurrentSnapshot, DashboardView, Filters, NodeStatus, ViewOptions};
use crate::scheduler::RefreshScheduler;
use crate::session::Session;
use crate::ui::Theme;

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Status counters and key metrics with sparklines.
    Overview,
    /// Node locations colored by status.
    Map,
    /// Ranked temperature and utilization charts.
    Charts,
    /// Critical issues, warnings and the maintenance schedule.
    Maintenance,
}

impl View {
    pub const ALL: [View; 4] = [View::Overview, View::Map, View::Charts, View::Maintenance];

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Overview => View::Map,
            View::Map => View::Charts,
            View::Charts => View::Maintenance,
            View::Maintenance => View::Overview,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Overview => View::Maintenance,
            View::Map => View::Overview,
            View::Charts => View::Map,
            View::Maintenance => View::Charts,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Map => "Map",
            View::Charts => "Charts",
            View::Maintenance => "Maintenance",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            View::Overview => 0,
            View::Map => 1,
            View::Charts => 2,
            View::Maintenance => 3,
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    session: Session,
    scheduler: RefreshScheduler,

    /// Snapshot of the last full cycle. Filter changes re-derive the view from
    /// it without advancing the simulator.
    snapshot: CurrentSnapshot,
    pub dashboard: Option<DashboardView>,

    // Selections
    pub filters: Filters,
    pub options: ViewOptions,
    regions: Vec<String>,
    node_types: Vec<String>,

    /// Highlighted row in the Maintenance view's critical list.
    pub selected_critical_index: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App around a loaded session.
    pub fn new(session: Session, refresh_interval: Duration, theme: Theme) -> Self {
        let regions = session.store().regions();
        let node_types = session.store().node_types();
        Self {
            running: true,
            current_view: View::Overview,
            show_help: false,
            session,
            scheduler: RefreshScheduler::new(refresh_interval),
            snapshot: CurrentSnapshot::default(),
            dashboard: None,
            filters: Filters::default(),
            options: ViewOptions::default(),
            regions,
            node_types,
            selected_critical_index: 0,
            theme,
            status_message: None,
        }
    }

    /// Run the first cycle and start the auto-refresh countdown.
    pub fn start(&mut self, now: Instant) {
        self.refresh();
        self.scheduler.start(now);
    }

    /// Advance the countdown, running a cycle when it reaches zero.
    pub fn on_tick(&mut self, now: Instant) {
        if self.scheduler.poll(now) {
            debug!("Auto-refresh triggered");
            self.refresh();
        }
    }

    /// Full cycle: new snapshot, then a new view.
    pub fn refresh(&mut self) {
        let (snapshot, view) = self.session.refresh(&self.filters, self.options, Utc::now());
        self.snapshot = snapshot;
        self.dashboard = Some(view);
        self.clamp_selection();
    }

    /// Rebuild the view from the current snapshot after a selection change.
    pub fn rebuild(&mut self) {
        let view = self.session.build_view(&self.snapshot, &self.filters, self.options, Utc::now());
        self.dashboard = Some(view);
        self.clamp_selection();
    }

    /// Refresh now and restart the countdown.
    pub fn manual_refresh(&mut self) {
        info!("Manual refresh");
        self.refresh();
        self.scheduler.manual_refresh();
        self.set_status_message("Refreshed".to_string());
    }

    pub fn countdown_label(&self) -> String {
        self.scheduler.countdown_label()
    }

    pub fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn node_types(&self) -> &[String] {
        &self.node_types
    }

    /// Step the region selector (all, then each region).
    pub fn cycle_region(&mut self) {
        self.filters.region = self.filters.region.cycle(&self.regions);
        self.on_filter_changed(format!("Region: {}", self.filters.region));
    }

    pub fn cycle_node_type(&mut self) {
        self.filters.node_type = self.filters.node_type.cycle(&self.node_types);
        self.on_filter_changed(format!("Node type: {}", self.filters.node_type));
    }

    pub fn cycle_status(&mut self) {
        self.filters.status = self.filters.status.cycle(&NodeStatus::ALL);
        self.on_filter_changed(format!("Status: {}", self.filters.status));
    }

    pub fn cycle_temperature_view(&mut self) {
        self.options.temperature_view = self.options.temperature_view.next();
        self.on_filter_changed(format!(
            "Temperature view: {}",
            self.options.temperature_view.label()
        ));
    }

    pub fn cycle_utilization_metric(&mut self) {
        self.options.utilization_metric = self.options.utilization_metric.next();
        self.on_filter_changed(format!(
            "Utilization metric: {}",
            self.options.utilization_metric.label()
        ));
    }

    /// Reset region, node type and status selectors to `all`.
    pub fn clear_filters(&mut self) {
        if self.filters.is_unfiltered() {
            return;
        }
        self.filters = Filters::default();
        self.on_filter_changed("Filters cleared".to_string());
    }

    fn on_filter_changed(&mut self, message: String) {
        debug!(filters = ?self.filters, options = ?self.options, "Selection changed");
        self.rebuild();
        self.set_status_message(message);
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    fn critical_count(&self) -> usize {
        self.dashboard
            .as_ref()
            .map_or(0, |view| view.maintenance.critical.len())
    }

    fn clamp_selection(&mut self) {
        let max = self.critical_count().saturating_sub(1);
        self.selected_critical_index = self.selected_critical_index.min(max);
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        if self.current_view == View::Maintenance {
            let max = self.critical_count().saturating_sub(1);
            self.selected_critical_index = (self.selected_critical_index + 1).min(max);
        }
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        if self.current_view == View::Maintenance {
            self.selected_critical_index = self.selected_critical_index.saturating_sub(1);
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current view to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(ref view) = self.dashboard else {
            anyhow::bail!("No data to export");
        };
        write_export(view, path)
    }
}

/// Write a dashboard view as pretty-printed JSON.
pub fn write_export(view: &DashboardView, path: &Path) -> Result<()> {
    use std::io::Write;

    let json = serde_json::to_string_pretty(view)?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;

    info!(path = %path.display(), nodes = view.status.total, "Exported dashboard view");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataStore, Selector, TemperatureView, Thresholds, UtilizationMetric};

    const NODES: &str = "\
node_id,node_name,node_type,region,latitude,longitude
a,Alpha,router,West,37.7,-122.4
b,Beta,switch,East,40.7,-74.0
c,Gamma,router,East,41.8,-87.6
";

    const PERF: &str = "\
node_id,timestamp,temperature_celsius,cpu_utilization_percent,memory_utilization_percent,throughput_utilization_percent,download_bandwidth_mbps,upload_bandwidth_mbps,availability_percent
a,2024-01-01 00:00:00,30,40,50,30,900,300,99.9
b,2024-01-01 00:00:00,30,40,50,30,900,300,99.9
c,2024-01-01 00:00:00,30,40,50,30,900,300,99.9
";

    fn app() -> App {
        let store = DataStore::from_readers(NODES.as_bytes(), PERF.as_bytes()).unwrap();
        let session = Session::with_seed(store, Thresholds::default(), 11);
        App::new(session, Duration::from_secs(3), Theme::dark())
    }

    #[test]
    fn test_view_cycle() {
        let mut view = View::Overview;
        for _ in 0..4 {
            view = view.next();
        }
        assert_eq!(view, View::Overview);
        assert_eq!(View::Overview.prev(), View::Maintenance);
        assert_eq!(View::Charts.label(), "Charts");
    }

    #[test]
    fn test_start_builds_first_view() {
        let mut app = app();
        assert!(app.dashboard.is_none());
        app.start(Instant::now());
        let view = app.dashboard.as_ref().unwrap();
        assert_eq!(view.status.total, 3);
        assert_eq!(app.session().cursor(), 50);
        assert!(app.scheduler().is_running());
        assert_eq!(app.countdown_label(), "Auto-refresh in 0:03");
    }

    #[test]
    fn test_filter_change_does_not_resimulate() {
        let mut app = app();
        app.start(Instant::now());
        app.cycle_region();
        assert_eq!(app.filters.region, Selector::Only("West".to_string()));
        assert_eq!(app.dashboard.as_ref().unwrap().status.total, 1);
        assert_eq!(app.session().cursor(), 50);
        assert_eq!(app.get_status_message(), Some("Region: West"));
    }

    #[test]
    fn test_clear_filters() {
        let mut app = app();
        app.start(Instant::now());
        app.cycle_node_type();
        app.cycle_node_type();
        assert_eq!(app.filters.node_type, Selector::Only("switch".to_string()));
        app.clear_filters();
        assert!(app.filters.is_unfiltered());
        assert_eq!(app.dashboard.as_ref().unwrap().status.total, 3);
    }

    #[test]
    fn test_status_filter_cycles_through_all_statuses() {
        let mut app = app();
        app.start(Instant::now());
        for status in NodeStatus::ALL {
            app.cycle_status();
            assert_eq!(app.filters.status, Selector::Only(status));
        }
        app.cycle_status();
        assert!(app.filters.status.is_all());
    }

    #[test]
    fn test_chart_selectors() {
        let mut app = app();
        app.start(Instant::now());
        app.cycle_temperature_view();
        app.cycle_utilization_metric();
        let view = app.dashboard.as_ref().unwrap();
        assert_eq!(view.options.temperature_view, TemperatureView::Warning);
        assert_eq!(view.options.utilization_metric, UtilizationMetric::Memory);
        assert_eq!(view.utilization_chart.title, "Memory Utilization (%)");
    }

    #[test]
    fn test_timer_triggers_refresh() {
        let mut app = app();
        let start = Instant::now();
        app.start(start);
        app.on_tick(start + Duration::from_secs(2));
        assert_eq!(app.session().cursor(), 50);
        app.on_tick(start + Duration::from_secs(3));
        assert_eq!(app.session().cursor(), 100);
    }

    #[test]
    fn test_manual_refresh_resets_countdown() {
        let mut app = app();
        let start = Instant::now();
        app.start(start);
        app.on_tick(start + Duration::from_secs(2));
        assert_eq!(app.scheduler().countdown(), 1);
        app.manual_refresh();
        assert_eq!(app.scheduler().countdown(), 3);
        assert_eq!(app.session().cursor(), 100);
    }

    #[test]
    fn test_critical_selection_reaches_last_entry() {
        let mut nodes = String::from("node_id,node_name,node_type,region,latitude,longitude\n");
        let mut perf = String::from(
            "node_id,temperature_celsius,cpu_utilization_percent,availability_percent\n",
        );
        for i in 0..30 {
            nodes.push_str(&format!("n{i},Hot-{i:02},router,West,37,-122\n"));
            perf.push_str(&format!("n{i},80,40,99.9\n"));
        }
        let store = DataStore::from_readers(nodes.as_bytes(), perf.as_bytes()).unwrap();
        let session = Session::with_seed(store, Thresholds::default(), 2);
        let mut app = App::new(session, Duration::from_secs(180), Theme::dark());
        app.start(Instant::now());
        assert_eq!(app.dashboard.as_ref().unwrap().maintenance.critical.len(), 30);

        app.select_next();
        assert_eq!(app.selected_critical_index, 0);

        app.set_view(View::Maintenance);
        for _ in 0..40 {
            app.select_next();
        }
        assert_eq!(app.selected_critical_index, 29);
        app.select_prev();
        assert_eq!(app.selected_critical_index, 28);

        // Healthy-only filter leaves no critical rows
        app.cycle_status();
        assert_eq!(app.filters.status, Selector::Only(NodeStatus::Healthy));
        assert_eq!(app.selected_critical_index, 0);
    }

    #[test]
    fn test_export_state() {
        let mut app = app();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        assert!(app.export_state(&path).is_err());

        app.start(Instant::now());
        app.export_state(&path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["status"]["total"], 3);
        assert_eq!(json["filters"]["region"], "all");
    }
}
