//! Data models and processing for node telemetry.
//!
//! Everything in this module is pure data shaping: it never touches the
//! terminal. The UI and the JSON export consume the [`DashboardView`]
//! assembled here.
//!
//! ## Submodules
//!
//! - [`records`]: Dataset rows ([`NodeRecord`], [`PerformanceSample`])
//! - [`store`]: CSV loading and the in-memory [`DataStore`]
//! - [`simulator`]: Rotating-window telemetry synthesis ([`CurrentSnapshot`])
//! - [`thresholds`]: Cutoff tables ([`Thresholds`])
//! - [`status`]: Health classification ([`NodeStatus`])
//! - [`filter`]: Region, node type and status filtering
//! - [`view`]: Counters, aggregates, ranked charts and map payloads
//! - [`maintenance`]: Alert lists and the synthetic schedule
//! - [`trend`]: Synthetic sparkline series
//! - [`duration`]: Interval parsing and countdown formatting
//!
//! ## Data Flow
//!
//! ```text
//! DataStore (history)
//!        │
//!        ▼
//! Simulator::simulate()  ──▶ CurrentSnapshot
//!        │
//!        ▼
//! apply_filters()        ──▶ EnrichedNode (status via classify())
//!        │
//!        ▼
//! build_dashboard()      ──▶ DashboardView
//! ```

pub mod duration;
pub mod filter;
pub mod maintenance;
pub mod records;
pub mod simulator;
pub mod status;
pub mod store;
pub mod thresholds;
pub mod trend;
pub mod view;

pub use filter::{apply_filters, EnrichedNode, FilteredNodes, Filters, Selector};
pub use maintenance::MaintenanceReport;
pub use records::{Metric, NodeRecord, PerformanceSample};
pub use simulator::{CurrentSnapshot, Simulator};
pub use status::{classify, NodeStatus};
pub use store::DataStore;
pub use thresholds::{ThresholdPair, Thresholds, Tier, UtilizationMetric};
pub use view::{build_dashboard, DashboardView, TemperatureView, ViewOptions};
