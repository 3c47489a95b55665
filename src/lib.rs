//! # nocwatch
//!
//! A terminal dashboard and library for monitoring network node health.
//!
//! Two CSV datasets are loaded once: static node metadata and a history of
//! performance samples. Every refresh cycle the simulator replays a rotating
//! window of that history with random noise and occasional injected faults,
//! each node is classified against threshold rules, and the result is shaped
//! into counters, a map, ranked charts and maintenance lists.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(processing)   │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌──────────┐   ┌───────────┐                               │
//! │  │ session  │   │ scheduler │◀── one-second countdown       │
//! │  │ (store,  │   └───────────┘                               │
//! │  │ cursor,  │                                               │
//! │  │ rng)     │                                               │
//! │  └──────────┘                                               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation and filter selections
//! - **[`session`]**: Loaded datasets, simulator cursor and random source
//! - **[`scheduler`]**: Auto-refresh countdown driven by the event loop
//! - **[`data`]**: Records, simulation, classification, filtering and view
//!   building. Pure data, no terminal access
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]**: Layered settings (defaults, TOML file, environment)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Dashboard over the default CSV files in the working directory
//! nocwatch
//!
//! # Explicit files, a 60 second refresh and a fixed seed
//! nocwatch --nodes nodes.csv --performance perf.csv --refresh 60s --seed 7
//!
//! # One cycle written as JSON
//! nocwatch --export view.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use chrono::Utc;
//! use nocwatch::{DataStore, Filters, Session, Thresholds, ViewOptions};
//!
//! let nodes = "node_id,node_name,node_type,region,latitude,longitude\n\
//!              n1,Core-1,router,West,37.7,-122.4\n";
//! let perf = "node_id,timestamp,temperature_celsius,cpu_utilization_percent,availability_percent\n\
//!             n1,2024-01-01 00:00:00,52,40,99\n";
//!
//! let store = DataStore::from_readers(nodes.as_bytes(), perf.as_bytes()).unwrap();
//! let mut session = Session::with_seed(store, Thresholds::default(), 42);
//! let (_snapshot, view) = session.refresh(&Filters::default(), ViewOptions::default(), Utc::now());
//! assert_eq!(view.status.total, 1);
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod session;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::Settings;
pub use data::{
    DashboardView, DataStore, Filters, NodeRecord, NodeStatus, PerformanceSample, Thresholds,
    ViewOptions,
};
pub use error::LoadError;
pub use scheduler::RefreshScheduler;
pub use session::Session;
