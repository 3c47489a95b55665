//! Node health classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::records::PerformanceSample;
use super::thresholds::Thresholds;

/// Health status derived for a node each refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Healthy,
    Warning,
    Critical,
    /// No sample for this node in the current cycle.
    Unknown,
}

impl NodeStatus {
    /// All statuses in selector order.
    pub const ALL: [NodeStatus; 4] = [
        NodeStatus::Healthy,
        NodeStatus::Warning,
        NodeStatus::Critical,
        NodeStatus::Unknown,
    ];

    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            NodeStatus::Healthy => "OK",
            NodeStatus::Warning => "WARN",
            NodeStatus::Critical => "CRIT",
            NodeStatus::Unknown => "N/A",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NodeStatus::Healthy => "healthy",
            NodeStatus::Warning => "warning",
            NodeStatus::Critical => "critical",
            NodeStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a node from its current sample.
///
/// Rules are checked in order and the first match wins: a missing sample is
/// `Unknown`; any critical breach (temperature, CPU, availability) is
/// `Critical`; any warning breach is `Warning`; everything else is `Healthy`.
/// The status depends only on the sample, never on the node's metadata.
pub fn classify(sample: Option<&PerformanceSample>, thresholds: &Thresholds) -> NodeStatus {
    let Some(perf) = sample else {
        return NodeStatus::Unknown;
    };

    if perf.temperature_celsius > thresholds.temperature.critical
        || perf.cpu_utilization_percent > thresholds.cpu.critical
        || perf.availability_percent < thresholds.availability_critical
    {
        return NodeStatus::Critical;
    }

    if perf.temperature_celsius > thresholds.temperature.warning
        || perf.cpu_utilization_percent > thresholds.cpu.warning
        || perf.availability_percent < thresholds.availability_warning
    {
        return NodeStatus::Warning;
    }

    NodeStatus::Healthy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(temp: f64, cpu: f64, availability: f64) -> PerformanceSample {
        PerformanceSample {
            node_id: "n".into(),
            timestamp: None,
            temperature_celsius: temp,
            cpu_utilization_percent: cpu,
            memory_utilization_percent: 50.0,
            throughput_utilization_percent: 50.0,
            download_bandwidth_mbps: 100.0,
            upload_bandwidth_mbps: 50.0,
            availability_percent: availability,
        }
    }

    fn status(temp: f64, cpu: f64, availability: f64) -> NodeStatus {
        classify(Some(&sample(temp, cpu, availability)), &Thresholds::default())
    }

    #[test]
    fn test_missing_sample_is_unknown() {
        assert_eq!(classify(None, &Thresholds::default()), NodeStatus::Unknown);
    }

    #[test]
    fn test_temperature_breach_alone_is_critical() {
        assert_eq!(status(52.0, 40.0, 99.0), NodeStatus::Critical);
    }

    #[test]
    fn test_each_critical_condition() {
        assert_eq!(status(30.0, 91.0, 99.9), NodeStatus::Critical);
        assert_eq!(status(30.0, 20.0, 94.9), NodeStatus::Critical);
        // Critical wins even when other metrics are only warnings
        assert_eq!(status(45.0, 75.0, 94.0), NodeStatus::Critical);
    }

    #[test]
    fn test_each_warning_condition() {
        assert_eq!(status(40.5, 20.0, 99.9), NodeStatus::Warning);
        assert_eq!(status(30.0, 70.5, 99.9), NodeStatus::Warning);
        assert_eq!(status(30.0, 20.0, 97.5), NodeStatus::Warning);
    }

    #[test]
    fn test_boundaries_are_healthy() {
        // Cutoffs are strict: exactly on the line does not breach
        assert_eq!(status(40.0, 70.0, 98.0), NodeStatus::Healthy);
        assert_eq!(status(50.0, 90.0, 95.0), NodeStatus::Warning);
    }

    #[test]
    fn test_healthy_grid() {
        for temp in [10.0, 25.0, 39.9] {
            for cpu in [0.0, 35.0, 69.9] {
                for availability in [98.0, 99.5, 100.0] {
                    assert_eq!(status(temp, cpu, availability), NodeStatus::Healthy);
                }
            }
        }
    }
}
