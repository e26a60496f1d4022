//! Resident memory reporting
//!
//! Purely informational: nothing in the harness branches on these numbers.

/// Reports the process's resident set size, when the host exposes it
pub trait MemoryProbe {
    fn resident_bytes(&self) -> Option<u64>;
}

/// Reads `VmRSS` from `/proc/self/status` (Linux only)
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcStatusProbe;

impl MemoryProbe for ProcStatusProbe {
    #[cfg(target_os = "linux")]
    fn resident_bytes(&self) -> Option<u64> {
        let status = std::fs::read_to_string("/proc/self/status").ok()?;
        parse_vm_rss(&status)
    }

    #[cfg(not(target_os = "linux"))]
    fn resident_bytes(&self) -> Option<u64> {
        None
    }
}

/// Probe for hosts without memory accounting
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProbe;

impl MemoryProbe for NullProbe {
    fn resident_bytes(&self) -> Option<u64> {
        None
    }
}

/// Extracts `VmRSS` (reported in kB) from a status file, in bytes
pub fn parse_vm_rss(status: &str) -> Option<u64> {
    status
        .lines()
        .find(|l| l.starts_with("VmRSS:"))
        .and_then(|l| {
            l.trim_start_matches("VmRSS:")
                .trim()
                .trim_end_matches("kB")
                .trim()
                .parse::<u64>()
                .ok()
        })
        .map(|kb| kb * 1024)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vm_rss() {
        let status = "Name:\tspmv-bench\nVmPeak:\t  20000 kB\nVmRSS:\t   1536 kB\nThreads:\t4\n";
        assert_eq!(parse_vm_rss(status), Some(1536 * 1024));
        assert_eq!(parse_vm_rss("Name:\tx\n"), None);
        assert_eq!(parse_vm_rss("VmRSS:\tlots kB\n"), None);
    }

    #[test]
    fn test_null_probe() {
        assert_eq!(NullProbe.resident_bytes(), None);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_proc_probe_reports_something() {
        assert!(ProcStatusProbe.resident_bytes().unwrap_or(0) > 0);
    }
}
