use std::path::PathBuf;

use super::delta::{self, PreviousSampleStore};
use super::process;
use super::snapshot::SystemSnapshot;
use super::stat;
use super::users::UserTable;

pub const PROC_ROOT: &str = "/proc";

/// Samples the process-information source and owns the previous tick's
/// counters.
pub struct Collector {
    root: PathBuf,
    users: UserTable,
    previous: PreviousSampleStore,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    /// Reads `/proc` with the system account table. Takes one priming sample
    /// so the first displayed tick already has a baseline.
    pub fn new() -> Self {
        let mut collector = Collector::with_root(PROC_ROOT, UserTable::load());
        let _ = collector.refresh();
        collector
    }

    /// An unprimed collector over an arbitrary root.
    pub fn with_root(root: impl Into<PathBuf>, users: UserTable) -> Self {
        Collector {
            root: root.into(),
            users,
            previous: PreviousSampleStore::default(),
        }
    }

    pub fn previous(&self) -> &PreviousSampleStore {
        &self.previous
    }

    pub fn refresh(&mut self) -> SystemSnapshot {
        #[cfg(feature = "perf-tracing")]
        let _refresh_span = tracing::debug_span!("collector.refresh").entered();

        let memory = stat::sample_memory(&self.root);
        let cpu = stat::sample_system_cpu(&self.root);
        let records = process::enumerate(&self.root, &self.users);

        let tick = delta::advance(&self.previous, cpu, memory, records);
        self.previous = tick.next;
        tick.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn unavailable_root_degrades_to_empty_snapshot() {
        let mut collector = Collector::with_root("/nonexistent/sysmon-root", UserTable::default());
        let snapshot = collector.refresh();
        assert_eq!(snapshot.cpu_usage_percent, 0.0);
        assert_eq!(snapshot.memory_total_kb(), 0);
        assert!(snapshot.processes.is_empty());
        assert!(collector.previous().is_empty());
    }

    #[test]
    fn live_proc_contains_this_process() {
        if !Path::new(PROC_ROOT).join("self").exists() {
            return;
        }
        let mut collector = Collector::with_root(PROC_ROOT, UserTable::default());
        let snapshot = collector.refresh();
        let me = std::process::id();
        assert!(snapshot.processes.iter().any(|p| p.pid == me));
    }
}
