//! Threshold tables for node status and ranked chart coloring.

use serde::{Deserialize, Serialize};

use super::records::Metric;

/// Severity of a single metric value against a [`ThresholdPair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Healthy,
    Warning,
    Critical,
}

/// Warning and critical cutoffs for one metric. Values strictly above a
/// cutoff fall into that tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPair {
    pub warning: f64,
    pub critical: f64,
}

impl ThresholdPair {
    pub const fn new(warning: f64, critical: f64) -> Self {
        Self { warning, critical }
    }

    /// Classify a value into a three-tier color band.
    pub fn tier(&self, value: f64) -> Tier {
        if value > self.critical {
            Tier::Critical
        } else if value > self.warning {
            Tier::Warning
        } else {
            Tier::Healthy
        }
    }
}

/// All thresholds used by the classifier and the chart views.
///
/// Temperature and CPU pairs drive node status together with the availability
/// floors. Memory and network pairs only color the utilization chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Degrees Celsius.
    pub temperature: ThresholdPair,
    /// CPU utilization percent.
    pub cpu: ThresholdPair,
    /// Memory utilization percent.
    pub memory: ThresholdPair,
    /// Throughput utilization percent.
    pub network: ThresholdPair,
    /// Availability below this is a warning.
    pub availability_warning: f64,
    /// Availability below this is critical.
    pub availability_critical: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temperature: ThresholdPair::new(40.0, 50.0),
            cpu: ThresholdPair::new(70.0, 90.0),
            memory: ThresholdPair::new(80.0, 90.0),
            network: ThresholdPair::new(75.0, 90.0),
            availability_warning: 98.0,
            availability_critical: 95.0,
        }
    }
}

impl Thresholds {
    /// Threshold pair for a selectable utilization metric.
    pub fn for_utilization(&self, metric: UtilizationMetric) -> ThresholdPair {
        match metric {
            UtilizationMetric::Cpu => self.cpu,
            UtilizationMetric::Memory => self.memory,
            UtilizationMetric::Network => self.network,
        }
    }
}

/// Metric shown in the utilization chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationMetric {
    #[default]
    Cpu,
    Memory,
    Network,
}

impl UtilizationMetric {
    /// Cycle to the next metric.
    pub fn next(self) -> Self {
        match self {
            UtilizationMetric::Cpu => UtilizationMetric::Memory,
            UtilizationMetric::Memory => UtilizationMetric::Network,
            UtilizationMetric::Network => UtilizationMetric::Cpu,
        }
    }

    /// Sample column read for this metric.
    pub fn column(&self) -> Metric {
        match self {
            UtilizationMetric::Cpu => Metric::Cpu,
            UtilizationMetric::Memory => Metric::Memory,
            UtilizationMetric::Network => Metric::Throughput,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            UtilizationMetric::Cpu => "CPU Utilization (%)",
            UtilizationMetric::Memory => "Memory Utilization (%)",
            UtilizationMetric::Network => "Network Utilization (%)",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UtilizationMetric::Cpu => "cpu",
            UtilizationMetric::Memory => "memory",
            UtilizationMetric::Network => "network",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries_are_exclusive() {
        let pair = ThresholdPair::new(70.0, 90.0);
        assert_eq!(pair.tier(70.0), Tier::Healthy);
        assert_eq!(pair.tier(70.1), Tier::Warning);
        assert_eq!(pair.tier(90.0), Tier::Warning);
        assert_eq!(pair.tier(90.5), Tier::Critical);
    }

    #[test]
    fn test_utilization_thresholds() {
        let t = Thresholds::default();
        assert_eq!(t.for_utilization(UtilizationMetric::Cpu), ThresholdPair::new(70.0, 90.0));
        assert_eq!(t.for_utilization(UtilizationMetric::Memory), ThresholdPair::new(80.0, 90.0));
        assert_eq!(t.for_utilization(UtilizationMetric::Network), ThresholdPair::new(75.0, 90.0));
        assert_eq!(UtilizationMetric::Network.column(), Metric::Throughput);
    }

    #[test]
    fn test_metric_cycle_wraps() {
        let m = UtilizationMetric::Cpu.next().next().next();
        assert_eq!(m, UtilizationMetric::Cpu);
    }
}
