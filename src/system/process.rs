use std::path::Path;

use color_eyre::Result;
use color_eyre::eyre::eyre;

use super::users::UserTable;

/// Cumulative scheduler ticks from `/proc/<pid>/stat`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub utime: u64,
    pub stime: u64,
}

impl CpuTimes {
    pub fn total(&self) -> u64 {
        self.utime.saturating_add(self.stime)
    }
}

/// The fields sysmon reads from `/proc/<pid>/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusFields {
    pub name: Option<String>,
    pub rss_kb: u64,
    pub uid: Option<u32>,
}

/// One process as read from the process-information source, before any
/// delta has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
    pub user: String,
    pub utime: u64,
    pub stime: u64,
    pub rss_kb: u64,
}

impl ProcessRecord {
    pub fn cpu_times(&self) -> CpuTimes {
        CpuTimes {
            utime: self.utime,
            stime: self.stime,
        }
    }
}

/// A process after the delta engine has run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    pub user: String,
    pub utime: u64,
    pub stime: u64,
    pub rss_kb: u64,
    pub cpu_percent: f64,
    pub mem_percent: f64,
}

// Token positions counted from the first token after the closing `)` of comm,
// which is field 3 (state) in proc(5) numbering.
const UTIME_INDEX: usize = 14 - 3;
const STIME_INDEX: usize = 15 - 3;

/// Parses utime (field 14) and stime (field 15) out of a `/proc/<pid>/stat`
/// line.
///
/// Fields are 1-indexed as in proc(5): (1) pid, (2) comm, (3) state, ...,
/// (14) utime, (15) stime. comm is wrapped in parentheses and may itself
/// contain spaces or `)`, so the line is split after the *last* `)`.
/// A line that does not reach field 15 is rejected; an individual token that
/// fails to parse reads as zero.
pub fn parse_stat_times(line: &str) -> Result<CpuTimes> {
    let after_comm = line
        .rfind(')')
        .ok_or_else(|| eyre!("stat line has no comm field"))?
        + 1;
    let fields: Vec<&str> = line[after_comm..].split_whitespace().collect();
    if fields.len() <= STIME_INDEX {
        return Err(eyre!(
            "stat line has {} fields after comm, expected at least {}",
            fields.len(),
            STIME_INDEX + 1
        ));
    }
    Ok(CpuTimes {
        utime: fields[UTIME_INDEX].parse().unwrap_or(0),
        stime: fields[STIME_INDEX].parse().unwrap_or(0),
    })
}

pub fn parse_status(contents: &str) -> StatusFields {
    let mut fields = StatusFields::default();
    for line in contents.lines() {
        if let Some(val) = line.strip_prefix("Name:") {
            let name = val.trim();
            if !name.is_empty() {
                fields.name = Some(name.to_string());
            }
        } else if let Some(val) = line.strip_prefix("VmRSS:") {
            fields.rss_kb = val
                .split_whitespace()
                .next()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
        } else if let Some(val) = line.strip_prefix("Uid:") {
            fields.uid = val.split_whitespace().next().and_then(|v| v.parse().ok());
        }
    }
    fields
}

pub fn list_pids(root: &Path) -> Result<Vec<u32>> {
    let mut pids = Vec::new();
    for entry in std::fs::read_dir(root)?.flatten() {
        if let Some(pid) = entry
            .file_name()
            .to_str()
            .and_then(|name| name.parse::<u32>().ok())
        {
            pids.push(pid);
        }
    }
    Ok(pids)
}

pub fn read_process(root: &Path, pid: u32, users: &UserTable) -> Result<ProcessRecord> {
    let dir = root.join(pid.to_string());

    // A read failure here means the process exited after the listing.
    let stat = std::fs::read_to_string(dir.join("stat"))?;
    let times = parse_stat_times(&stat).unwrap_or_default();

    let status = parse_status(&std::fs::read_to_string(dir.join("status"))?);
    let name = status
        .name
        .ok_or_else(|| eyre!("pid {pid}: status has no Name field"))?;

    Ok(ProcessRecord {
        pid,
        name,
        user: users.resolve(status.uid).to_string(),
        utime: times.utime,
        stime: times.stime,
        rss_kb: status.rss_kb,
    })
}

/// Reads every process under `root`. A process that cannot be read is left
/// out; the pass itself never fails.
pub fn enumerate(root: &Path, users: &UserTable) -> Vec<ProcessRecord> {
    let pids = list_pids(root).unwrap_or_default();
    let mut records = Vec::with_capacity(pids.len());
    for pid in pids {
        match read_process(root, pid, users) {
            Ok(record) => records.push(record),
            Err(_err) => {
                #[cfg(feature = "perf-tracing")]
                tracing::debug!(pid, error = %_err, "process dropped from tick");
            }
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_fields_fourteen_and_fifteen_are_user_and_kernel_ticks() {
        let line = "1234 (bash) S 1 1234 1234 34816 1234 4194304 2500 0 0 0 731 112 0 0 20 0 1 0 4242 12000000 1500 18446744073709551615";
        let times = parse_stat_times(line).unwrap();
        assert_eq!(times.utime, 731);
        assert_eq!(times.stime, 112);
        assert_eq!(times.total(), 843);
    }

    #[test]
    fn comm_with_spaces_and_parens_does_not_shift_fields() {
        let line = "77 (Web Content (x)) R 1 77 77 0 -1 0 0 0 0 0 50 9 0 0 20 0";
        let times = parse_stat_times(line).unwrap();
        assert_eq!(times.utime, 50);
        assert_eq!(times.stime, 9);
    }

    #[test]
    fn truncated_stat_line_is_rejected() {
        assert!(parse_stat_times("1 (init) S 1 1 1").is_err());
        assert!(parse_stat_times("garbage without comm").is_err());
    }

    #[test]
    fn unparseable_tick_reads_as_zero() {
        let line = "5 (x) S 1 1 1 0 -1 0 0 0 0 0 oops 4";
        let times = parse_stat_times(line).unwrap();
        assert_eq!(times.utime, 0);
        assert_eq!(times.stime, 4);
    }

    #[test]
    fn status_block_yields_name_rss_and_uid() {
        let text = "Name:\tnginx\nUmask:\t0022\nState:\tS (sleeping)\nUid:\t33\t33\t33\t33\nVmRSS:\t   10240 kB\n";
        let fields = parse_status(text);
        assert_eq!(fields.name.as_deref(), Some("nginx"));
        assert_eq!(fields.rss_kb, 10240);
        assert_eq!(fields.uid, Some(33));
    }

    #[test]
    fn kernel_thread_without_rss_reads_zero() {
        let fields = parse_status("Name:\tkworker/0:1\nUid:\t0\t0\t0\t0\n");
        assert_eq!(fields.rss_kb, 0);
        assert_eq!(fields.uid, Some(0));
    }

    #[test]
    fn blank_name_counts_as_missing() {
        let fields = parse_status("Name:\t \nVmRSS:\t12 kB\n");
        assert!(fields.name.is_none());
        assert_eq!(fields.rss_kb, 12);
    }
}
