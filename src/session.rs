//! Per-process dashboard context.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::data::{
    apply_filters, build_dashboard, CurrentSnapshot, DashboardView, DataStore, Filters, Simulator,
    Thresholds, ViewOptions,
};

/// Loaded datasets plus the mutable state carried between refresh cycles:
/// the simulator cursor and the random source.
pub struct Session {
    store: DataStore,
    simulator: Simulator,
    rng: StdRng,
    thresholds: Thresholds,
}

impl Session {
    /// Create a session seeded from OS entropy.
    pub fn new(store: DataStore, thresholds: Thresholds) -> Self {
        Self::with_rng(store, thresholds, StdRng::from_entropy())
    }

    /// Create a session with a fixed seed for reproducible output.
    pub fn with_seed(store: DataStore, thresholds: Thresholds, seed: u64) -> Self {
        Self::with_rng(store, thresholds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(store: DataStore, thresholds: Thresholds, rng: StdRng) -> Self {
        Self {
            store,
            simulator: Simulator::new(),
            rng,
            thresholds,
        }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Position of the simulator in the history.
    pub fn cursor(&self) -> usize {
        self.simulator.cursor()
    }

    /// Synthesize the next snapshot and advance the cursor.
    pub fn simulate(&mut self, now: DateTime<Utc>) -> CurrentSnapshot {
        self.simulator.simulate(self.store.history(), now, &mut self.rng)
    }

    /// Filter nodes against an existing snapshot and build every payload.
    pub fn build_view(
        &mut self,
        snapshot: &CurrentSnapshot,
        filters: &Filters,
        options: ViewOptions,
        now: DateTime<Utc>,
    ) -> DashboardView {
        let filtered = apply_filters(self.store.nodes(), snapshot, filters, &self.thresholds);
        build_dashboard(&filtered, filters, options, &self.thresholds, now, &mut self.rng)
    }

    /// Run a full cycle: fresh snapshot, then the view built from it.
    pub fn refresh(
        &mut self,
        filters: &Filters,
        options: ViewOptions,
        now: DateTime<Utc>,
    ) -> (CurrentSnapshot, DashboardView) {
        let snapshot = self.simulate(now);
        let view = self.build_view(&snapshot, filters, options, now);
        info!(
            cursor = self.cursor(),
            shown = view.status.total,
            critical = view.status.critical,
            warning = view.status.warning,
            "Refresh cycle complete"
        );
        (snapshot, view)
    }
}
