//! Chart-ready and list-ready projections of one refresh cycle.
//!
//! Everything here is pure data. The terminal UI and the JSON export both
//! consume [`DashboardView`] without recomputing anything.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use super::filter::{EnrichedNode, Filters, FilteredNodes};
use super::maintenance::MaintenanceReport;
use super::records::Metric;
use super::status::NodeStatus;
use super::thresholds::{ThresholdPair, Thresholds, Tier, UtilizationMetric};
use super::trend::synthetic_trend;

/// Bars kept per ranked chart.
pub const TOP_N: usize = 20;

const TEMPERATURE_TREND_VARIATION: f64 = 5.0;
const CPU_TREND_VARIATION: f64 = 10.0;
const AVAILABILITY_TREND_VARIATION: f64 = 1.0;

/// Node counts per status and their share of the filtered total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusSummary {
    pub total: usize,
    pub healthy: usize,
    pub warning: usize,
    pub critical: usize,
    pub unknown: usize,
    pub healthy_pct: f64,
    pub warning_pct: f64,
    pub critical_pct: f64,
    pub unknown_pct: f64,
}

impl StatusSummary {
    pub fn from_nodes(nodes: &[EnrichedNode<'_>]) -> Self {
        let mut summary = Self {
            total: nodes.len(),
            ..Self::default()
        };

        for node in nodes {
            match node.status {
                NodeStatus::Healthy => summary.healthy += 1,
                NodeStatus::Warning => summary.warning += 1,
                NodeStatus::Critical => summary.critical += 1,
                NodeStatus::Unknown => summary.unknown += 1,
            }
        }

        summary.healthy_pct = percent(summary.healthy, summary.total);
        summary.warning_pct = percent(summary.warning, summary.total);
        summary.critical_pct = percent(summary.critical, summary.total);
        summary.unknown_pct = percent(summary.unknown, summary.total);
        summary
    }

    pub fn count(&self, status: NodeStatus) -> usize {
        match status {
            NodeStatus::Healthy => self.healthy,
            NodeStatus::Warning => self.warning,
            NodeStatus::Critical => self.critical,
            NodeStatus::Unknown => self.unknown,
        }
    }

    pub fn percent(&self, status: NodeStatus) -> f64 {
        match status {
            NodeStatus::Healthy => self.healthy_pct,
            NodeStatus::Warning => self.warning_pct,
            NodeStatus::Critical => self.critical_pct,
            NodeStatus::Unknown => self.unknown_pct,
        }
    }

    /// Warning plus critical nodes.
    pub fn alerts(&self) -> usize {
        self.warning + self.critical
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Mean metrics over the filtered nodes.
///
/// Nodes without a sample add 0 to the sum but still count in the
/// denominator, which pulls the means down when samples are missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub avg_temperature: f64,
    pub avg_cpu: f64,
    pub avg_availability: f64,
}

impl KeyMetrics {
    /// `None` for an empty node set.
    pub fn from_nodes(nodes: &[EnrichedNode<'_>]) -> Option<Self> {
        if nodes.is_empty() {
            return None;
        }
        let mean = |metric: Metric| {
            nodes.iter().map(|n| n.metric(metric)).sum::<f64>() / nodes.len() as f64
        };
        Some(Self {
            avg_temperature: mean(Metric::Temperature),
            avg_cpu: mean(Metric::Cpu),
            avg_availability: mean(Metric::Availability),
        })
    }

    pub fn temperature_label(&self) -> String {
        format!("{:.1}°C", self.avg_temperature)
    }

    pub fn cpu_label(&self) -> String {
        format!("{:.1}%", self.avg_cpu)
    }

    pub fn availability_label(&self) -> String {
        format!("{:.2}%", self.avg_availability)
    }
}

/// Decorative sparkline series for the key metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trends {
    pub temperature: Vec<f64>,
    pub cpu: Vec<f64>,
    pub availability: Vec<f64>,
}

impl Trends {
    pub fn generate<R: Rng + ?Sized>(metrics: &KeyMetrics, rng: &mut R) -> Self {
        Self {
            temperature: synthetic_trend(metrics.avg_temperature, TEMPERATURE_TREND_VARIATION, rng),
            cpu: synthetic_trend(metrics.avg_cpu, CPU_TREND_VARIATION, rng),
            availability: synthetic_trend(
                metrics.avg_availability,
                AVAILABILITY_TREND_VARIATION,
                rng,
            ),
        }
    }
}

/// One bar of a ranked chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedBar {
    pub node_id: String,
    pub node_name: String,
    pub value: f64,
    pub tier: Tier,
}

/// Top nodes by one metric, highest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedChart {
    pub title: &'static str,
    pub thresholds: ThresholdPair,
    pub bars: Vec<RankedBar>,
}

/// Sort descending by `metric` (missing samples rank as 0), keep the top
/// [`TOP_N`] and color each bar with `thresholds`.
///
/// Ties keep their filter order.
pub fn rank_nodes(
    nodes: &[EnrichedNode<'_>],
    metric: Metric,
    thresholds: ThresholdPair,
    title: &'static str,
) -> RankedChart {
    let mut ranked: Vec<(&EnrichedNode<'_>, f64)> =
        nodes.iter().map(|n| (n, n.metric(metric))).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let bars = ranked
        .into_iter()
        .take(TOP_N)
        .map(|(n, value)| RankedBar {
            node_id: n.node.node_id.clone(),
            node_name: n.node.node_name.clone(),
            value,
            tier: thresholds.tier(value),
        })
        .collect();

    RankedChart {
        title,
        thresholds,
        bars,
    }
}

/// Which nodes the temperature chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureView {
    #[default]
    All,
    /// Above the warning cutoff.
    Warning,
    /// Above the critical cutoff.
    Critical,
}

impl TemperatureView {
    pub fn next(self) -> Self {
        match self {
            TemperatureView::All => TemperatureView::Warning,
            TemperatureView::Warning => TemperatureView::Critical,
            TemperatureView::Critical => TemperatureView::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemperatureView::All => "all",
            TemperatureView::Warning => "warning",
            TemperatureView::Critical => "critical",
        }
    }

    /// Nodes without a sample only appear in the `All` view.
    fn admits(&self, node: &EnrichedNode<'_>, cutoffs: ThresholdPair) -> bool {
        let Some(sample) = node.sample else {
            return *self == TemperatureView::All;
        };
        match self {
            TemperatureView::All => true,
            TemperatureView::Warning => sample.temperature_celsius > cutoffs.warning,
            TemperatureView::Critical => sample.temperature_celsius > cutoffs.critical,
        }
    }
}

pub fn temperature_chart(
    nodes: &[EnrichedNode<'_>],
    view: TemperatureView,
    thresholds: &Thresholds,
) -> RankedChart {
    let selected: Vec<EnrichedNode<'_>> =
        nodes.iter().filter(|n| view.admits(n, thresholds.temperature)).copied().collect();
    rank_nodes(
        &selected,
        Metric::Temperature,
        thresholds.temperature,
        "Node Temperature (°C)",
    )
}

pub fn utilization_chart(
    nodes: &[EnrichedNode<'_>],
    metric: UtilizationMetric,
    thresholds: &Thresholds,
) -> RankedChart {
    rank_nodes(
        nodes,
        metric.column(),
        thresholds.for_utilization(metric),
        metric.title(),
    )
}

/// A node marker for the geographic map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub node_id: String,
    pub node_name: String,
    pub node_type: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: NodeStatus,
}

impl MapPoint {
    /// Hover text: name, type and region on separate lines.
    pub fn label(&self) -> String {
        format!(
            "{}\nType: {}\nRegion: {}",
            self.node_name, self.node_type, self.region
        )
    }
}

pub fn map_points(nodes: &[EnrichedNode<'_>]) -> Vec<MapPoint> {
    nodes
        .iter()
        .map(|n| MapPoint {
            node_id: n.node.node_id.clone(),
            node_name: n.node.node_name.clone(),
            node_type: n.node.node_type.clone(),
            region: n.node.region.clone(),
            latitude: n.node.latitude,
            longitude: n.node.longitude,
            status: n.status,
        })
        .collect()
}

/// Chart selectors that do not narrow the node set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewOptions {
    pub temperature_view: TemperatureView,
    pub utilization_metric: UtilizationMetric,
}

/// Every payload the dashboard draws for one cycle.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub generated_at: DateTime<Utc>,
    pub filters: Filters,
    pub options: ViewOptions,
    /// Samples in the unfiltered snapshot.
    pub snapshot_size: usize,
    pub status: StatusSummary,
    pub key_metrics: Option<KeyMetrics>,
    pub trends: Option<Trends>,
    pub map: Vec<MapPoint>,
    pub temperature_chart: RankedChart,
    pub utilization_chart: RankedChart,
    pub maintenance: MaintenanceReport,
}

/// Assemble every payload from the filtered nodes.
pub fn build_dashboard<R: Rng + ?Sized>(
    filtered: &FilteredNodes<'_>,
    filters: &Filters,
    options: ViewOptions,
    thresholds: &Thresholds,
    now: DateTime<Utc>,
    rng: &mut R,
) -> DashboardView {
    let nodes = &filtered.nodes;
    let key_metrics = KeyMetrics::from_nodes(nodes);
    let trends = key_metrics.as_ref().map(|m| Trends::generate(m, &mut *rng));

    DashboardView {
        generated_at: now,
        filters: filters.clone(),
        options,
        snapshot_size: filtered.snapshot.len(),
        status: StatusSummary::from_nodes(nodes),
        key_metrics,
        trends,
        map: map_points(nodes),
        temperature_chart: temperature_chart(nodes, options.temperature_view, thresholds),
        utilization_chart: utilization_chart(nodes, options.utilization_metric, thresholds),
        maintenance: MaintenanceReport::build(nodes, thresholds, now, rng),
    }
}
