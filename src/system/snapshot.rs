use super::process::ProcessSample;
use super::stat::MemoryInfo;

#[derive(Debug, Clone, Default)]
pub struct SystemSnapshot {
    pub cpu_usage_percent: f64,
    pub memory: MemoryInfo,
    pub processes: Vec<ProcessSample>,
}

impl SystemSnapshot {
    pub fn memory_used_kb(&self) -> u64 {
        self.memory.used_kb()
    }

    pub fn memory_total_kb(&self) -> u64 {
        self.memory.total_kb
    }

    pub fn memory_percent(&self) -> f64 {
        super::delta::mem_percent(self.memory.used_kb(), self.memory.total_kb)
    }
}
