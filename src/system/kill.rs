use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, Signal, System};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillResult {
    Success(u32),
    Failed(u32, String),
    NotFound(u32),
}

impl KillResult {
    pub fn message(&self) -> String {
        match self {
            KillResult::Success(pid) => format!("Sent SIGTERM to PID {pid}"),
            KillResult::Failed(_, err) => err.clone(),
            KillResult::NotFound(pid) => format!("Process {pid} not found"),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, KillResult::Success(_))
    }
}

/// Boundary for asking a process to stop.
pub trait Terminate {
    fn terminate(&mut self, pid: u32) -> KillResult;
}

/// Sends SIGTERM through sysinfo. Never escalates to SIGKILL and never
/// retries.
#[derive(Default)]
pub struct SignalTerminator {
    sys: System,
}

impl SignalTerminator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Terminate for SignalTerminator {
    fn terminate(&mut self, pid: u32) -> KillResult {
        let sysinfo_pid = Pid::from_u32(pid);
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[sysinfo_pid]),
            true,
            ProcessRefreshKind::nothing(),
        );
        match self.sys.process(sysinfo_pid) {
            Some(process) => match process.kill_with(Signal::Term) {
                Some(true) => KillResult::Success(pid),
                Some(false) => KillResult::Failed(
                    pid,
                    format!("Failed to send SIGTERM to PID {pid} (permission denied?)"),
                ),
                None => KillResult::Failed(
                    pid,
                    "SIGTERM is not supported on this platform".to_string(),
                ),
            },
            None => KillResult::NotFound(pid),
        }
    }
}
