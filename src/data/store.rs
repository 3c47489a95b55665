//! In-memory dataset store and CSV loading.
//!
//! Both datasets are read once at startup. The two files are loaded by
//! independent blocking tasks and joined; if either fails the whole load
//! fails and nothing is kept.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::records::{NodeKeyed, NodeRecord, PerformanceSample};
use crate::error::LoadError;

/// Default node metadata file, relative to the working directory.
pub const DEFAULT_NODES_FILE: &str = "network_nodes_metadata.csv";

/// Default performance history file, relative to the working directory.
pub const DEFAULT_PERFORMANCE_FILE: &str = "network_performance_data.csv";

/// Node metadata and the ordered performance history.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    nodes: Vec<NodeRecord>,
    history: Vec<PerformanceSample>,
}

impl DataStore {
    pub fn new(nodes: Vec<NodeRecord>, history: Vec<PerformanceSample>) -> Self {
        Self { nodes, history }
    }

    /// Load both datasets concurrently.
    pub async fn load(nodes_path: &Path, performance_path: &Path) -> Result<Self, LoadError> {
        let nodes_path = nodes_path.to_path_buf();
        let performance_path = performance_path.to_path_buf();

        let nodes_task =
            tokio::task::spawn_blocking(move || read_csv_file::<NodeRecord>(&nodes_path));
        let history_task = tokio::task::spawn_blocking(move || {
            read_csv_file::<PerformanceSample>(&performance_path)
        });

        let (nodes, history) = tokio::try_join!(joined(nodes_task), joined(history_task))?;

        info!(
            nodes = nodes.len(),
            samples = history.len(),
            "Loaded datasets"
        );
        Ok(Self::new(nodes, history))
    }

    /// Parse both datasets from in-memory readers.
    pub fn from_readers<N: Read, P: Read>(nodes: N, performance: P) -> Result<Self, csv::Error> {
        Ok(Self::new(read_records(nodes)?, read_records(performance)?))
    }

    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    pub fn history(&self) -> &[PerformanceSample] {
        &self.history
    }

    /// Distinct non-empty regions in first-seen order.
    pub fn regions(&self) -> Vec<String> {
        distinct(self.nodes.iter().map(|n| n.region.as_str()))
    }

    /// Distinct non-empty node types in first-seen order.
    pub fn node_types(&self) -> Vec<String> {
        distinct(self.nodes.iter().map(|n| n.node_type.as_str()))
    }
}

async fn joined<T>(task: JoinHandle<Result<T, LoadError>>) -> Result<T, LoadError> {
    task.await?
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .map(str::trim)
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Read a CSV file with a header row.
fn read_csv_file<T>(path: &Path) -> Result<Vec<T>, LoadError>
where
    T: DeserializeOwned + NodeKeyed,
{
    let file = File::open(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(file).map_err(|source| LoadError::Parse {
        path: PathBuf::from(path),
        source,
    })
}

/// Decode rows by header name, dropping rows without a `node_id`.
///
/// Short rows are accepted; their missing trailing cells read as empty.
pub fn read_records<T, R>(reader: R) -> Result<Vec<T>, csv::Error>
where
    T: DeserializeOwned + NodeKeyed,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();

    let mut records = Vec::new();
    let mut discarded = 0usize;
    let mut record = csv::StringRecord::new();
    while csv_reader.read_record(&mut record)? {
        // Deserializing by header expects a cell per column.
        while record.len() < headers.len() {
            record.push_field("");
        }
        let row: T = record.deserialize(Some(&headers))?;
        if row.node_id().trim().is_empty() {
            discarded += 1;
            continue;
        }
        records.push(row);
    }

    if discarded > 0 {
        debug!(discarded, "Dropped rows without node_id");
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const NODES_CSV: &str = "\
node_id,node_name,node_type,region,latitude,longitude,vendor
N1,Alpha,router,West,37.77,-122.42,acme
N2,Beta,switch,East,40.71,-74.00,acme
,Ghost,router,West,0,0,acme
N3,Gamma,router,West,47.61,-122.33,acme
";

    const PERF_CSV: &str = "\
node_id,timestamp,temperature_celsius,cpu_utilization_percent,memory_utilization_percent,throughput_utilization_percent,download_bandwidth_mbps,upload_bandwidth_mbps,availability_percent
N1,2024-01-01 00:00:00,35.5,40,50,30,900,300,99.9
N2,2024-01-01 00:00:00,42,75,60,20,800,250,98.5
,2024-01-01 00:00:00,1,1,1,1,1,1,1
N1,2024-01-01 00:05:00,36,,55,31,910,305,99.8
";

    fn temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_from_readers_drops_rows_without_id() {
        let store = DataStore::from_readers(NODES_CSV.as_bytes(), PERF_CSV.as_bytes()).unwrap();
        assert_eq!(store.nodes().len(), 3);
        assert_eq!(store.history().len(), 3);
        assert_eq!(store.nodes()[1].node_name, "Beta");
        assert_eq!(store.nodes()[0].longitude, -122.42);
    }

    #[test]
    fn test_short_and_blank_rows_do_not_fail_load() {
        let nodes = "\
node_id,node_name,node_type,region,latitude,longitude
N1,Alpha,router,West,37.77,-122.42
N2,Beta,switch
   
N3,Gamma,router,West,47.61,-122.33
";
        let perf = "\
node_id,timestamp,temperature_celsius,cpu_utilization_percent,availability_percent
N1,2024-01-01 00:00:00,35.5
  ,
N2,2024-01-01 00:00:00,42,75,98.5
";
        let store = DataStore::from_readers(nodes.as_bytes(), perf.as_bytes()).unwrap();
        assert_eq!(store.nodes().len(), 3);
        assert_eq!(store.nodes()[1].node_type, "switch");
        assert_eq!(store.nodes()[1].region, "");
        assert_eq!(store.nodes()[1].latitude, 0.0);
        assert_eq!(store.history().len(), 2);
        assert_eq!(store.history()[0].temperature_celsius, 35.5);
        assert_eq!(store.history()[0].availability_percent, 0.0);
    }

    #[test]
    fn test_empty_numeric_cell_reads_as_zero() {
        let store = DataStore::from_readers(NODES_CSV.as_bytes(), PERF_CSV.as_bytes()).unwrap();
        let last = &store.history()[2];
        assert_eq!(last.cpu_utilization_percent, 0.0);
        assert_eq!(last.memory_utilization_percent, 55.0);
        assert!(last.timestamp.is_some());
    }

    #[test]
    fn test_filter_options_in_first_seen_order() {
        let store = DataStore::from_readers(NODES_CSV.as_bytes(), PERF_CSV.as_bytes()).unwrap();
        assert_eq!(store.regions(), vec!["West", "East"]);
        assert_eq!(store.node_types(), vec!["router", "switch"]);
    }

    #[test]
    fn test_load_from_files() {
        let nodes = temp_csv(NODES_CSV);
        let perf = temp_csv(PERF_CSV);
        let store = tokio_test::block_on(DataStore::load(nodes.path(), perf.path())).unwrap();
        assert_eq!(store.nodes().len(), 3);
        assert_eq!(store.history().len(), 3);
    }

    #[test]
    fn test_load_missing_file_fails_whole_load() {
        let nodes = temp_csv(NODES_CSV);
        let result =
            tokio_test::block_on(DataStore::load(nodes.path(), Path::new("/nonexistent/perf.csv")));
        match result {
            Err(LoadError::Read { path, .. }) => assert_eq!(path, Path::new("/nonexistent/perf.csv")),
            other => panic!("expected read error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_bad_number_is_parse_error() {
        let nodes = temp_csv(NODES_CSV);
        let perf = temp_csv(
            "node_id,timestamp,temperature_celsius\nN1,2024-01-01 00:00:00,very hot\n",
        );
        let err = tokio_test::block_on(DataStore::load(nodes.path(), perf.path())).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("failed to parse"));
    }
}
