//! Maintenance alerts and a cosmetic maintenance schedule.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;

use super::filter::EnrichedNode;
use super::records::PerformanceSample;
use super::status::NodeStatus;
use super::thresholds::Thresholds;

/// Warning entries shown before collapsing into a "+N more" line.
pub const WARNING_DISPLAY_LIMIT: usize = 5;

/// Schedule slots per severity.
pub const SCHEDULE_LIMIT: usize = 3;

pub const NO_CRITICAL_MESSAGE: &str = "No critical issues detected";
pub const NO_WARNINGS_MESSAGE: &str = "No warnings detected";
pub const NO_SCHEDULE_MESSAGE: &str = "No maintenance currently scheduled";

/// Why a critical node is critical. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CriticalReason {
    Temperature(f64),
    CpuOverload(f64),
    LowAvailability(f64),
    MultipleIssues,
}

impl CriticalReason {
    pub fn from_sample(sample: Option<&PerformanceSample>, thresholds: &Thresholds) -> Self {
        let Some(perf) = sample else {
            return CriticalReason::MultipleIssues;
        };
        if perf.temperature_celsius > thresholds.temperature.critical {
            CriticalReason::Temperature(perf.temperature_celsius)
        } else if perf.cpu_utilization_percent > thresholds.cpu.critical {
            CriticalReason::CpuOverload(perf.cpu_utilization_percent)
        } else if perf.availability_percent < thresholds.availability_critical {
            CriticalReason::LowAvailability(perf.availability_percent)
        } else {
            CriticalReason::MultipleIssues
        }
    }
}

impl fmt::Display for CriticalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriticalReason::Temperature(t) => write!(f, "Temperature critical: {:.1}°C", t),
            CriticalReason::CpuOverload(c) => write!(f, "CPU overload: {:.1}%", c),
            CriticalReason::LowAvailability(a) => write!(f, "Low availability: {:.2}%", a),
            CriticalReason::MultipleIssues => f.write_str("Multiple issues detected"),
        }
    }
}

/// Why a warning node is flagged. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum WarningReason {
    HighTemperature(f64),
    HighCpu(f64),
    PerformanceDegradation,
}

impl WarningReason {
    pub fn from_sample(sample: Option<&PerformanceSample>, thresholds: &Thresholds) -> Self {
        let Some(perf) = sample else {
            return WarningReason::PerformanceDegradation;
        };
        if perf.temperature_celsius > thresholds.temperature.warning {
            WarningReason::HighTemperature(perf.temperature_celsius)
        } else if perf.cpu_utilization_percent > thresholds.cpu.warning {
            WarningReason::HighCpu(perf.cpu_utilization_percent)
        } else {
            WarningReason::PerformanceDegradation
        }
    }
}

impl fmt::Display for WarningReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningReason::HighTemperature(t) => write!(f, "High temperature: {:.1}°C", t),
            WarningReason::HighCpu(c) => write!(f, "High CPU: {:.1}%", c),
            WarningReason::PerformanceDegradation => f.write_str("Performance degradation"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CriticalIssue {
    pub node_id: String,
    pub node_name: String,
    pub node_type: String,
    pub reason: CriticalReason,
    pub message: String,
    pub action: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct WarningAlert {
    pub node_id: String,
    pub node_name: String,
    pub reason: WarningReason,
    pub message: String,
    pub action: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenancePriority {
    /// Critical node, slot within the next 24 hours.
    Urgent,
    /// Warning node, slot within the next week.
    Scheduled,
}

impl MaintenancePriority {
    pub fn label(&self) -> &'static str {
        match self {
            MaintenancePriority::Urgent => "Urgent",
            MaintenancePriority::Scheduled => "Scheduled",
        }
    }

    pub fn note(&self) -> &'static str {
        match self {
            MaintenancePriority::Urgent => "Hardware inspection required",
            MaintenancePriority::Scheduled => "Preventative maintenance",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduledMaintenance {
    pub node_id: String,
    pub node_name: String,
    pub priority: MaintenancePriority,
    pub scheduled_for: DateTime<Utc>,
}

/// Maintenance lists for one refresh cycle.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MaintenanceReport {
    /// Every critical node.
    pub critical: Vec<CriticalIssue>,
    /// At most [`WARNING_DISPLAY_LIMIT`] warning nodes.
    pub warnings: Vec<WarningAlert>,
    /// Warning nodes left out of `warnings`.
    pub hidden_warnings: usize,
    pub schedule: Vec<ScheduledMaintenance>,
}

impl MaintenanceReport {
    /// Partition nodes into critical and warning lists and draw schedule slots.
    pub fn build<R: Rng + ?Sized>(
        nodes: &[EnrichedNode<'_>],
        thresholds: &Thresholds,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let critical_nodes: Vec<&EnrichedNode<'_>> =
            nodes.iter().filter(|n| n.status == NodeStatus::Critical).collect();
        let warning_nodes: Vec<&EnrichedNode<'_>> =
            nodes.iter().filter(|n| n.status == NodeStatus::Warning).collect();

        let critical = critical_nodes
            .iter()
            .map(|n| {
                let reason = CriticalReason::from_sample(n.sample, thresholds);
                CriticalIssue {
                    node_id: n.node.node_id.clone(),
                    node_name: n.node.node_name.clone(),
                    node_type: n.node.node_type.clone(),
                    reason,
                    message: reason.to_string(),
                    action: "Immediate maintenance required",
                }
            })
            .collect();

        let warnings = warning_nodes
            .iter()
            .take(WARNING_DISPLAY_LIMIT)
            .map(|n| {
                let reason = WarningReason::from_sample(n.sample, thresholds);
                WarningAlert {
                    node_id: n.node.node_id.clone(),
                    node_name: n.node.node_name.clone(),
                    reason,
                    message: reason.to_string(),
                    action: "Monitor closely",
                }
            })
            .collect();

        let hidden_warnings = warning_nodes.len().saturating_sub(WARNING_DISPLAY_LIMIT);

        let mut schedule = Vec::new();
        for n in critical_nodes.iter().take(SCHEDULE_LIMIT) {
            let hours = rng.gen_range(0..24);
            schedule.push(ScheduledMaintenance {
                node_id: n.node.node_id.clone(),
                node_name: n.node.node_name.clone(),
                priority: MaintenancePriority::Urgent,
                scheduled_for: now + Duration::hours(hours),
            });
        }
        for n in warning_nodes.iter().take(SCHEDULE_LIMIT) {
            let days = rng.gen_range(1..=7);
            schedule.push(ScheduledMaintenance {
                node_id: n.node.node_id.clone(),
                node_name: n.node.node_name.clone(),
                priority: MaintenancePriority::Scheduled,
                scheduled_for: now + Duration::days(days),
            });
        }

        Self {
            critical,
            warnings,
            hidden_warnings,
            schedule,
        }
    }

    /// Summary line for truncated warnings, e.g. "+3 more warnings".
    pub fn more_warnings_label(&self) -> Option<String> {
        (self.hidden_warnings > 0).then(|| format!("+{} more warnings", self.hidden_warnings))
    }
}
