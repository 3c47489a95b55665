//! Synthetic "live" telemetry built from historical samples.
//!
//! Each cycle takes a window of the history, keeps the first sample per node,
//! stamps it with the current time and perturbs its metrics. A small share of
//! nodes also receive an injected fault so the dashboard has something to
//! alert on.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use super::records::PerformanceSample;

/// Number of history rows examined per cycle.
pub const WINDOW_SIZE: usize = 50;

/// Cursor advance per cycle.
pub const CURSOR_STEP: usize = 50;

/// Per-node chance of an injected fault.
pub const FAULT_PROBABILITY: f64 = 0.05;

const TEMPERATURE_VARIATION: f64 = 5.0;
const CPU_VARIATION: f64 = 10.0;
const MEMORY_VARIATION: f64 = 5.0;
/// Bandwidth varies by this fraction of its own value.
const BANDWIDTH_VARIATION_RATIO: f64 = 0.1;

const MAX_TEMPERATURE_SPIKE: f64 = 20.0;
const MAX_CPU_SPIKE: f64 = 30.0;
const MAX_AVAILABILITY_DROP: f64 = 5.0;

/// One synthesized sample per node for the current cycle.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CurrentSnapshot {
    pub taken_at: Option<DateTime<Utc>>,
    samples: Vec<PerformanceSample>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl CurrentSnapshot {
    pub fn new(taken_at: DateTime<Utc>, samples: Vec<PerformanceSample>) -> Self {
        let index = samples.iter().enumerate().map(|(i, s)| (s.node_id.clone(), i)).collect();
        Self {
            taken_at: Some(taken_at),
            samples,
            index,
        }
    }

    /// Current sample for a node, if it was part of this cycle's window.
    pub fn get(&self, node_id: &str) -> Option<&PerformanceSample> {
        self.index.get(node_id).map(|&i| &self.samples[i])
    }

    pub fn samples(&self) -> &[PerformanceSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// A fault injected into a simulated sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum Fault {
    /// Added to the temperature.
    TemperatureSpike(f64),
    /// Added to CPU utilization, capped at 100.
    CpuSpike(f64),
    /// Subtracted from availability. Not clamped.
    AvailabilityDrop(f64),
}

impl Fault {
    /// Apply this fault to a sample.
    pub fn apply(&self, sample: &mut PerformanceSample) {
        match *self {
            Fault::TemperatureSpike(amount) => sample.temperature_celsius += amount,
            Fault::CpuSpike(amount) => {
                sample.cpu_utilization_percent =
                    (sample.cpu_utilization_percent + amount).min(100.0);
            }
            Fault::AvailabilityDrop(amount) => sample.availability_percent -= amount,
        }
    }

    /// Roll for a fault: `None` most of the time, otherwise one of the three
    /// kinds chosen uniformly.
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Option<Self> {
        if rng.gen::<f64>() >= FAULT_PROBABILITY {
            return None;
        }
        let fault = match rng.gen_range(0..3) {
            0 => Fault::TemperatureSpike(rng.gen::<f64>() * MAX_TEMPERATURE_SPIKE),
            1 => Fault::CpuSpike(rng.gen::<f64>() * MAX_CPU_SPIKE),
            _ => Fault::AvailabilityDrop(rng.gen::<f64>() * MAX_AVAILABILITY_DROP),
        };
        Some(fault)
    }
}

/// Add uniform noise in `[-max_variation, max_variation)` to a value.
pub fn add_variation<R: Rng + ?Sized>(value: f64, max_variation: f64, rng: &mut R) -> f64 {
    value + (rng.gen::<f64>() * 2.0 - 1.0) * max_variation
}

/// Rotating walk through the history that produces one snapshot per cycle.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    cursor: usize,
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a specific cursor position.
    pub fn with_cursor(cursor: usize) -> Self {
        Self { cursor }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// History range examined for a given cursor.
    ///
    /// The start wraps within the first third of the history; the end is
    /// bounded by the history length, so a window near the end is shorter.
    /// Histories with fewer than three rows always start at 0.
    pub fn window(history_len: usize, cursor: usize) -> Range<usize> {
        let period = history_len / 3;
        let start = if period == 0 { 0 } else { cursor % period };
        let end = (start + WINDOW_SIZE).min(history_len);
        start.min(end)..end
    }

    /// Produce the snapshot for this cycle and advance the cursor.
    pub fn simulate<R: Rng + ?Sized>(
        &mut self,
        history: &[PerformanceSample],
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> CurrentSnapshot {
        let window = Self::window(history.len(), self.cursor);
        self.cursor = self.cursor.wrapping_add(CURSOR_STEP);

        let mut seen = HashSet::new();
        let mut samples = Vec::new();

        for base in &history[window.clone()] {
            if !seen.insert(base.node_id.as_str()) {
                continue;
            }
            let mut sample = perturb(base, now, rng);
            if let Some(fault) = Fault::roll(rng) {
                debug!(node_id = %sample.node_id, ?fault, "Injected simulated fault");
                fault.apply(&mut sample);
            }
            samples.push(sample);
        }

        debug!(
            start = window.start,
            end = window.end,
            nodes = samples.len(),
            "Simulated telemetry window"
        );

        CurrentSnapshot::new(now, samples)
    }
}

fn perturb<R: Rng + ?Sized>(
    base: &PerformanceSample,
    now: DateTime<Utc>,
    rng: &mut R,
) -> PerformanceSample {
    let mut sample = base.clone();
    sample.timestamp = Some(now);
    sample.temperature_celsius =
        add_variation(sample.temperature_celsius, TEMPERATURE_VARIATION, rng);
    sample.cpu_utilization_percent =
        add_variation(sample.cpu_utilization_percent, CPU_VARIATION, rng);
    sample.memory_utilization_percent =
        add_variation(sample.memory_utilization_percent, MEMORY_VARIATION, rng);
    sample.download_bandwidth_mbps = add_variation(
        sample.download_bandwidth_mbps,
        sample.download_bandwidth_mbps * BANDWIDTH_VARIATION_RATIO,
        rng,
    );
    sample.upload_bandwidth_mbps = add_variation(
        sample.upload_bandwidth_mbps,
        sample.upload_bandwidth_mbps * BANDWIDTH_VARIATION_RATIO,
        rng,
    );
    sample
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample(node_id: &str, temp: f64) -> PerformanceSample {
        PerformanceSample {
            node_id: node_id.into(),
            timestamp: None,
            temperature_celsius: temp,
            cpu_utilization_percent: 50.0,
            memory_utilization_percent: 50.0,
            throughput_utilization_percent: 40.0,
            download_bandwidth_mbps: 1000.0,
            upload_bandwidth_mbps: 200.0,
            availability_percent: 99.5,
        }
    }

    fn history(len: usize, nodes: usize) -> Vec<PerformanceSample> {
        (0..len).map(|i| sample(&format!("node-{}", i % nodes), 30.0)).collect()
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z").unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_window_rotates_and_wraps() {
        assert_eq!(Simulator::window(300, 0), 0..50);
        assert_eq!(Simulator::window(300, 50), 50..100);
        assert_eq!(Simulator::window(300, 100), 0..50);
        assert_eq!(Simulator::window(300, 150), 50..100);
    }

    #[test]
    fn test_window_near_end_is_shorter() {
        // period = 3, cursor 50 -> start 2
        assert_eq!(Simulator::window(10, 50), 2..10);
    }

    #[test]
    fn test_window_tiny_history() {
        assert_eq!(Simulator::window(0, 100), 0..0);
        assert_eq!(Simulator::window(2, 100), 0..2);
    }

    #[test]
    fn test_cursor_advances_by_step() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sim = Simulator::new();
        let history = history(300, 10);
        sim.simulate(&history, now(), &mut rng);
        sim.simulate(&history, now(), &mut rng);
        assert_eq!(sim.cursor(), 2 * CURSOR_STEP);
    }

    #[test]
    fn test_with_cursor_starts_mid_history() {
        let history: Vec<_> = (0..300)
            .map(|i| sample(if i < 50 { "early" } else { "later" }, 30.0))
            .collect();
        let mut rng = StdRng::seed_from_u64(4);
        let mut sim = Simulator::with_cursor(CURSOR_STEP);
        let snapshot = sim.simulate(&history, now(), &mut rng);
        assert!(snapshot.get("early").is_none());
        assert!(snapshot.get("later").is_some());
        assert_eq!(sim.cursor(), 2 * CURSOR_STEP);
    }

    #[test]
    fn test_one_sample_per_node_in_window() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sim = Simulator::new();
        // 50-row window over 20 distinct nodes
        let snapshot = sim.simulate(&history(300, 20), now(), &mut rng);
        assert_eq!(snapshot.len(), 20);
        assert!(snapshot.get("node-0").is_some());
        assert!(snapshot.get("node-19").is_some());
        assert!(snapshot.get("node-20").is_none());
        assert!(snapshot.samples().iter().all(|s| s.timestamp == Some(now())));
    }

    #[test]
    fn test_first_sample_wins() {
        let history = vec![sample("a", 20.0), sample("b", 30.0), sample("a", 80.0)];
        let mut rng = StdRng::seed_from_u64(3);
        let snapshot = Simulator::new().simulate(&history, now(), &mut rng);
        let a = snapshot.get("a").unwrap();
        // Base 20 plus at most 5 noise and a 20 spike; never near 80
        assert!(a.temperature_celsius < 46.0);
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_nodes_outside_window_have_no_sample() {
        let mut history = history(60, 5);
        history.push(sample("late", 30.0));
        let mut rng = StdRng::seed_from_u64(9);
        let snapshot = Simulator::new().simulate(&history, now(), &mut rng);
        assert!(snapshot.get("late").is_none());
    }

    #[test]
    fn test_same_seed_same_snapshot() {
        let history = history(300, 25);
        let a = Simulator::new().simulate(&history, now(), &mut StdRng::seed_from_u64(42));
        let b = Simulator::new().simulate(&history, now(), &mut StdRng::seed_from_u64(42));
        assert_eq!(a.samples(), b.samples());
    }

    #[test]
    fn test_add_variation_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let v = add_variation(50.0, 10.0, &mut rng);
            assert!((40.0..=60.0).contains(&v));
        }
    }

    #[test]
    fn test_perturbation_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        let base = sample("n", 30.0);
        for _ in 0..500 {
            let s = perturb(&base, now(), &mut rng);
            assert!((s.temperature_celsius - 30.0).abs() <= 5.0);
            assert!((s.cpu_utilization_percent - 50.0).abs() <= 10.0);
            assert!((s.memory_utilization_percent - 50.0).abs() <= 5.0);
            assert!((s.download_bandwidth_mbps - 1000.0).abs() <= 100.0);
            assert!((s.upload_bandwidth_mbps - 200.0).abs() <= 20.0);
            assert_eq!(s.availability_percent, 99.5);
            assert_eq!(s.throughput_utilization_percent, 40.0);
        }
    }

    #[test]
    fn test_cpu_spike_is_capped() {
        let mut s = sample("n", 30.0);
        s.cpu_utilization_percent = 95.0;
        Fault::CpuSpike(30.0).apply(&mut s);
        assert_eq!(s.cpu_utilization_percent, 100.0);
    }

    #[test]
    fn test_availability_drop_is_not_clamped() {
        let mut s = sample("n", 30.0);
        s.availability_percent = 2.0;
        Fault::AvailabilityDrop(5.0).apply(&mut s);
        assert_eq!(s.availability_percent, -3.0);
    }

    #[test]
    fn test_fault_rate_is_roughly_five_percent() {
        let mut rng = StdRng::seed_from_u64(2024);
        let faults = (0..4000).filter_map(|_| Fault::roll(&mut rng)).count();
        assert!((100..=320).contains(&faults), "unexpected fault count {}", faults);
    }

    #[test]
    fn test_fault_magnitudes() {
        let mut rng = StdRng::seed_from_u64(77);
        for _ in 0..5000 {
            match Fault::roll(&mut rng) {
                Some(Fault::TemperatureSpike(a)) => assert!((0.0..20.0).contains(&a)),
                Some(Fault::CpuSpike(a)) => assert!((0.0..30.0).contains(&a)),
                Some(Fault::AvailabilityDrop(a)) => assert!((0.0..5.0).contains(&a)),
                None => {}
            }
        }
    }
}
