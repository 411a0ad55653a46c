use std::collections::HashMap;

use super::process::{CpuTimes, ProcessRecord, ProcessSample};
use super::snapshot::SystemSnapshot;
use super::stat::{MemoryInfo, SystemCpuSample};

/// Last observed counters, keyed by pid. Replaced wholesale every tick so
/// exited processes drop out and new ones start from a zero baseline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviousSampleStore {
    cpu: SystemCpuSample,
    times: HashMap<u32, CpuTimes>,
}

impl PreviousSampleStore {
    pub fn system_cpu(&self) -> SystemCpuSample {
        self.cpu
    }

    pub fn cpu_times(&self, pid: u32) -> Option<CpuTimes> {
        self.times.get(&pid).copied()
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Output of one tick: what to show now, and what to compare against next.
#[derive(Debug, Clone)]
pub struct Tick {
    pub snapshot: SystemSnapshot,
    pub next: PreviousSampleStore,
}

/// Jiffies elapsed between two samples; zero unless the total moved forward.
pub fn total_delta(curr: &SystemCpuSample, prev: &SystemCpuSample) -> u64 {
    curr.total().saturating_sub(prev.total())
}

pub fn system_cpu_usage(curr: &SystemCpuSample, prev: &SystemCpuSample) -> f64 {
    let total = total_delta(curr, prev);
    if total == 0 {
        return 0.0;
    }
    let idle = curr.idle.saturating_sub(prev.idle);
    let busy = total.saturating_sub(idle);
    100.0 * busy as f64 / total as f64
}

/// Share of the window's CPU time spent by one process.
///
/// A pid with no previous entry is measured from zero. So is a pid whose
/// counters went backwards, which only happens when the id was reused by a
/// new process inside the window.
pub fn process_cpu_percent(curr: CpuTimes, prev: Option<CpuTimes>, total_delta: u64) -> f64 {
    if total_delta == 0 {
        return 0.0;
    }
    let now = curr.total();
    let baseline = prev.map(|p| p.total()).filter(|&b| b <= now).unwrap_or(0);
    100.0 * (now - baseline) as f64 / total_delta as f64
}

pub fn mem_percent(rss_kb: u64, total_kb: u64) -> f64 {
    if total_kb == 0 {
        return 0.0;
    }
    100.0 * rss_kb as f64 / total_kb as f64
}

/// Combines a fresh read with the previous store.
///
/// When the current CPU sample is unknown (all zero) no percentages are
/// derived and the previous store is carried forward instead: system counters
/// and per-pid ticks must always come from the same sample. Exited pids still
/// drop out, and pids first seen on an unknown tick start from zero.
pub fn advance(
    prev: &PreviousSampleStore,
    cpu: SystemCpuSample,
    memory: MemoryInfo,
    records: Vec<ProcessRecord>,
) -> Tick {
    #[cfg(feature = "perf-tracing")]
    let _span = tracing::debug_span!("delta.advance", processes = records.len()).entered();

    let (window, cpu_usage_percent, next_cpu) = if cpu.is_unknown() {
        (0, 0.0, prev.cpu)
    } else {
        (
            total_delta(&cpu, &prev.cpu),
            system_cpu_usage(&cpu, &prev.cpu),
            cpu,
        )
    };

    let mut times = HashMap::with_capacity(records.len());
    let processes = records
        .into_iter()
        .map(|record| {
            let ticks = record.cpu_times();
            let baseline = prev.cpu_times(record.pid);
            if !cpu.is_unknown() {
                times.insert(record.pid, ticks);
            } else if let Some(kept) = baseline {
                times.insert(record.pid, kept);
            }
            ProcessSample {
                cpu_percent: process_cpu_percent(ticks, baseline, window),
                mem_percent: mem_percent(record.rss_kb, memory.total_kb),
                pid: record.pid,
                name: record.name,
                user: record.user,
                utime: record.utime,
                stime: record.stime,
                rss_kb: record.rss_kb,
            }
        })
        .collect();

    Tick {
        snapshot: SystemSnapshot {
            cpu_usage_percent,
            memory,
            processes,
        },
        next: PreviousSampleStore {
            cpu: next_cpu,
            times,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpu(user: u64, system: u64, idle: u64) -> SystemCpuSample {
        SystemCpuSample {
            user,
            system,
            idle,
            ..Default::default()
        }
    }

    fn record(pid: u32, utime: u64, stime: u64, rss_kb: u64) -> ProcessRecord {
        ProcessRecord {
            pid,
            name: format!("proc{pid}"),
            user: "root".to_string(),
            utime,
            stime,
            rss_kb,
        }
    }

    #[test]
    fn system_usage_is_busy_share_of_window() {
        let prev = cpu(100, 100, 800);
        let curr = cpu(150, 150, 900);
        // total moved 200, idle moved 100
        assert!((system_cpu_usage(&curr, &prev) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn system_usage_is_zero_without_elapsed_time_or_after_reset() {
        let s = cpu(10, 10, 10);
        assert_eq!(system_cpu_usage(&s, &s), 0.0);
        assert_eq!(system_cpu_usage(&cpu(1, 1, 1), &s), 0.0);
        assert_eq!(total_delta(&cpu(1, 1, 1), &s), 0);
    }

    #[test]
    fn new_process_is_measured_from_zero_baseline() {
        let curr = CpuTimes {
            utime: 30,
            stime: 20,
        };
        assert!((process_cpu_percent(curr, None, 200) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn known_process_uses_previous_ticks() {
        let prev = CpuTimes {
            utime: 10,
            stime: 10,
        };
        let curr = CpuTimes {
            utime: 40,
            stime: 30,
        };
        assert!((process_cpu_percent(curr, Some(prev), 100) - 50.0).abs() < 1e-9);
        assert_eq!(process_cpu_percent(curr, Some(prev), 0), 0.0);
    }

    #[test]
    fn reused_pid_with_smaller_counters_restarts_from_zero() {
        let prev = CpuTimes {
            utime: 500,
            stime: 500,
        };
        let curr = CpuTimes { utime: 5, stime: 5 };
        assert!((process_cpu_percent(curr, Some(prev), 100) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn percentages_are_not_clamped() {
        let curr = CpuTimes {
            utime: 300,
            stime: 100,
        };
        assert!((process_cpu_percent(curr, None, 200) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn memory_percent_guards_zero_operands() {
        assert_eq!(mem_percent(0, 1024), 0.0);
        assert_eq!(mem_percent(1024, 0), 0.0);
        assert!((mem_percent(256, 1024) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn advance_replaces_store_and_drops_exited_pids() {
        let memory = MemoryInfo {
            total_kb: 1000,
            available_kb: 500,
        };
        let first = advance(
            &PreviousSampleStore::default(),
            cpu(100, 0, 100),
            memory,
            vec![record(1, 10, 0, 100), record(2, 20, 0, 200)],
        );
        assert_eq!(first.next.len(), 2);

        let second = advance(
            &first.next,
            cpu(150, 0, 150),
            memory,
            vec![record(2, 30, 0, 200), record(3, 5, 0, 50)],
        );
        assert_eq!(second.next.len(), 2);
        assert!(second.next.cpu_times(1).is_none());
        assert_eq!(second.next.system_cpu(), cpu(150, 0, 150));

        let by_pid = |pid: u32| {
            second
                .snapshot
                .processes
                .iter()
                .find(|p| p.pid == pid)
                .unwrap()
                .clone()
        };
        // window is 100 jiffies
        assert!((by_pid(2).cpu_percent - 10.0).abs() < 1e-9);
        assert!((by_pid(3).cpu_percent - 5.0).abs() < 1e-9);
        assert!((by_pid(3).mem_percent - 5.0).abs() < 1e-9);
        assert!((second.snapshot.cpu_usage_percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_cpu_sample_keeps_previous_baseline() {
        let prev = advance(
            &PreviousSampleStore::default(),
            cpu(100, 0, 100),
            MemoryInfo::default(),
            vec![record(1, 10, 0, 0)],
        )
        .next;
        let tick = advance(
            &prev,
            SystemCpuSample::default(),
            MemoryInfo::default(),
            vec![record(1, 50, 0, 0)],
        );
        assert_eq!(tick.snapshot.cpu_usage_percent, 0.0);
        assert_eq!(tick.snapshot.processes[0].cpu_percent, 0.0);
        assert_eq!(tick.next.system_cpu(), cpu(100, 0, 100));
        assert_eq!(tick.next.cpu_times(1).map(|t| t.utime), Some(10));
    }

    #[test]
    fn process_window_matches_system_window_across_unknown_sample() {
        let memory = MemoryInfo::default();
        let first = advance(
            &PreviousSampleStore::default(),
            cpu(100, 0, 100),
            memory,
            vec![record(1, 10, 0, 0)],
        );
        let blind = advance(
            &first.next,
            SystemCpuSample::default(),
            memory,
            vec![record(1, 60, 0, 0), record(2, 5, 0, 0)],
        );
        assert!(blind.next.cpu_times(2).is_none());

        let tick = advance(
            &blind.next,
            cpu(200, 0, 200),
            memory,
            vec![record(1, 110, 0, 0), record(2, 25, 0, 0)],
        );
        // both windows span 200 jiffies: 100 busy, and pid 1 used 100 of them
        assert!((tick.snapshot.cpu_usage_percent - 50.0).abs() < 1e-9);
        let by_pid = |pid: u32| {
            tick.snapshot
                .processes
                .iter()
                .find(|p| p.pid == pid)
                .map(|p| p.cpu_percent)
                .unwrap()
        };
        assert!((by_pid(1) - 50.0).abs() < 1e-9);
        assert!((by_pid(2) - 12.5).abs() < 1e-9);
    }
}
