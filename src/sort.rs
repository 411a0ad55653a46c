use crate::system::process::ProcessSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Cpu,
    Memory,
    Pid,
}

impl SortMode {
    pub fn label(self) -> &'static str {
        match self {
            SortMode::Cpu => "CPU",
            SortMode::Memory => "Memory",
            SortMode::Pid => "PID",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => SortMode::Memory,
            "pid" => SortMode::Pid,
            _ => SortMode::Cpu,
        }
    }
}

/// CPU and memory sort descending, pid ascending. The sort is stable, so exact
/// ties keep their enumeration order.
pub fn sort_processes(processes: &mut [ProcessSample], mode: SortMode) {
    match mode {
        SortMode::Cpu => processes.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent)),
        SortMode::Memory => processes.sort_by(|a, b| b.mem_percent.total_cmp(&a.mem_percent)),
        SortMode::Pid => processes.sort_by_key(|p| p.pid),
    }
}
