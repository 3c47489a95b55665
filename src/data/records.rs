//! Dataset row types for node metadata and performance samples.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Accepted naive timestamp layouts (interpreted as UTC).
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Static metadata for one network node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(default)]
    pub node_id: String,
    #[serde(default)]
    pub node_name: String,
    #[serde(default)]
    pub node_type: String,
    #[serde(default)]
    pub region: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: f64,
}

/// One performance measurement for a node.
///
/// Historical samples come straight from the dataset; the simulator produces
/// perturbed copies of them for the current cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSample {
    #[serde(default)]
    pub node_id: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temperature_celsius: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cpu_utilization_percent: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub memory_utilization_percent: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub throughput_utilization_percent: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub download_bandwidth_mbps: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub upload_bandwidth_mbps: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub availability_percent: f64,
}

/// Numeric columns of a [`PerformanceSample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Temperature,
    Cpu,
    Memory,
    Throughput,
    Download,
    Upload,
    Availability,
}

impl PerformanceSample {
    /// Read a metric by column.
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Temperature => self.temperature_celsius,
            Metric::Cpu => self.cpu_utilization_percent,
            Metric::Memory => self.memory_utilization_percent,
            Metric::Throughput => self.throughput_utilization_percent,
            Metric::Download => self.download_bandwidth_mbps,
            Metric::Upload => self.upload_bandwidth_mbps,
            Metric::Availability => self.availability_percent,
        }
    }
}

/// Rows that reference a node. Rows with an empty id are dropped at load time.
pub trait NodeKeyed {
    fn node_id(&self) -> &str;
}

impl NodeKeyed for NodeRecord {
    fn node_id(&self) -> &str {
        &self.node_id
    }
}

impl NodeKeyed for PerformanceSample {
    fn node_id(&self) -> &str {
        &self.node_id
    }
}

/// Empty cells read as 0.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>().map_err(|e| de::Error::custom(format!("invalid number {:?}: {}", raw, e)))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(de::Error::custom)
}

/// Parse a dataset timestamp. Empty strings yield `None`.
pub fn parse_timestamp(raw: &str) -> Result<Option<DateTime<Utc>>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Some(naive.and_utc()))
        .ok_or_else(|| format!("unrecognized timestamp: {}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_timestamp_formats() {
        let a = parse_timestamp("2024-03-01 12:30:00").unwrap().unwrap();
        let b = parse_timestamp("2024-03-01T12:30:00").unwrap().unwrap();
        let c = parse_timestamp("2024-03-01T12:30:00Z").unwrap().unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.hour(), 12);
    }

    #[test]
    fn test_parse_timestamp_empty_and_invalid() {
        assert_eq!(parse_timestamp("  ").unwrap(), None);
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_metric_accessor() {
        let sample = PerformanceSample {
            node_id: "n1".into(),
            timestamp: None,
            temperature_celsius: 41.0,
            cpu_utilization_percent: 72.5,
            memory_utilization_percent: 60.0,
            throughput_utilization_percent: 33.0,
            download_bandwidth_mbps: 900.0,
            upload_bandwidth_mbps: 300.0,
            availability_percent: 99.9,
        };
        assert_eq!(sample.metric(Metric::Cpu), 72.5);
        assert_eq!(sample.metric(Metric::Throughput), 33.0);
        assert_eq!(sample.metric(Metric::Availability), 99.9);
    }
}
