//! Coarse facts about the host, reported by telemetry.

use std::path::Path;

pub fn os_family() -> String {
    std::env::consts::OS.to_string()
}

pub fn is_docker() -> bool {
    if Path::new("/.dockerenv").exists() {
        return true;
    }
    std::fs::read_to_string("/proc/1/cgroup")
        .map(|cgroup| cgroup.contains("docker"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_family_is_never_empty() {
        assert!(!os_family().is_empty());
    }
}
