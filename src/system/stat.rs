use std::path::Path;

use color_eyre::Result;
use color_eyre::eyre::eyre;

/// Aggregate CPU time counters from the `cpu` line of `/proc/stat`, in jiffies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemCpuSample {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl SystemCpuSample {
    /// Sum of every counter. Always recomputed, never stored.
    pub fn total(&self) -> u64 {
        self.user
            .saturating_add(self.nice)
            .saturating_add(self.system)
            .saturating_add(self.idle)
            .saturating_add(self.iowait)
            .saturating_add(self.irq)
            .saturating_add(self.softirq)
            .saturating_add(self.steal)
    }

    /// An all-zero sample stands for "source unavailable".
    pub fn is_unknown(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryInfo {
    pub total_kb: u64,
    pub available_kb: u64,
}

impl MemoryInfo {
    pub fn used_kb(&self) -> u64 {
        self.total_kb.saturating_sub(self.available_kb)
    }
}

pub fn parse_cpu_line(contents: &str) -> Result<SystemCpuSample> {
    let line = contents
        .lines()
        .find(|line| line.split_whitespace().next() == Some("cpu"))
        .ok_or_else(|| eyre!("no aggregate `cpu` line"))?;

    // Older kernels expose fewer than eight counters; the rest stay zero.
    let mut counters = [0u64; 8];
    for (slot, field) in counters.iter_mut().zip(line.split_whitespace().skip(1)) {
        *slot = field.parse().unwrap_or(0);
    }
    let [user, nice, system, idle, iowait, irq, softirq, steal] = counters;

    Ok(SystemCpuSample {
        user,
        nice,
        system,
        idle,
        iowait,
        irq,
        softirq,
        steal,
    })
}

pub fn parse_meminfo(contents: &str) -> Result<MemoryInfo> {
    let mut total_kb = None;
    let mut available_kb = 0;
    for line in contents.lines() {
        let mut parts = line.split_whitespace();
        let key = parts.next();
        let value = parts.next().and_then(|v| v.parse().ok()).unwrap_or(0);
        match key {
            Some("MemTotal:") => total_kb = Some(value),
            Some("MemAvailable:") => available_kb = value,
            _ => {}
        }
    }
    Ok(MemoryInfo {
        total_kb: total_kb.ok_or_else(|| eyre!("no MemTotal line"))?,
        available_kb,
    })
}

pub fn read_system_cpu(path: &Path) -> Result<SystemCpuSample> {
    let contents = std::fs::read_to_string(path)?;
    parse_cpu_line(&contents)
}

pub fn read_memory(path: &Path) -> Result<MemoryInfo> {
    let contents = std::fs::read_to_string(path)?;
    parse_meminfo(&contents)
}

/// Reads `<root>/stat`, falling back to a zeroed sample.
pub fn sample_system_cpu(root: &Path) -> SystemCpuSample {
    read_system_cpu(&root.join("stat")).unwrap_or_else(|_err| {
        #[cfg(feature = "perf-tracing")]
        tracing::debug!(error = %_err, "system cpu sample unavailable");
        SystemCpuSample::default()
    })
}

/// Reads `<root>/meminfo`, falling back to zeroed totals.
pub fn sample_memory(root: &Path) -> MemoryInfo {
    read_memory(&root.join("meminfo")).unwrap_or_else(|_err| {
        #[cfg(feature = "perf-tracing")]
        tracing::debug!(error = %_err, "memory sample unavailable");
        MemoryInfo::default()
    })
}
