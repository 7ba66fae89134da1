//! Read-only access to host state for detection and interactivity probes.
//!
//! Every predicate goes through [`Host`] so the probes can be exercised
//! against a scripted host in tests.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cmd;
use crate::error::InspectionError;

/// Upper bound for any probe that shells out to an external command
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Process id the kernel reparents orphaned processes to
pub const INIT_PID: u32 = 1;

/// Host queries used by backend predicates. None of these mutate host state.
pub trait Host: Send + Sync {
    /// Whether a filesystem path exists
    fn path_exists(&self, path: &Path) -> bool;

    /// Read a small file (e.g. under /proc) as text
    fn read_to_string(&self, path: &Path) -> Option<String>;

    /// Locate a program on `$PATH`
    fn find_program(&self, name: &str) -> Option<PathBuf>;

    /// Run a command and return its stdout; must give up after `timeout`
    fn command_output(&self, program: &str, args: &[&str], timeout: Duration) -> Result<String>;

    /// Parent process id of the current process
    fn parent_pid(&self) -> Result<u32, InspectionError>;

    /// Home directory of the invoking user, for per-user service paths
    fn home_dir(&self) -> Option<PathBuf>;
}

/// The live system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl Host for SystemHost {
    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Option<String> {
        fs::read_to_string(path).ok()
    }

    fn find_program(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }

    fn command_output(&self, program: &str, args: &[&str], timeout: Duration) -> Result<String> {
        cmd::run_output_timeout(program, args, timeout)
    }

    fn parent_pid(&self) -> Result<u32, InspectionError> {
        let ppid = nix::unistd::getppid().as_raw();
        u32::try_from(ppid)
            .map_err(|_| InspectionError::new(format!("invalid parent pid {}", ppid)))
    }

    fn home_dir(&self) -> Option<PathBuf> {
        std::env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(PathBuf::from)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_host_sees_root() {
        assert!(SystemHost.path_exists(Path::new("/")));
    }

    #[test]
    fn system_host_missing_path() {
        assert!(!SystemHost.path_exists(Path::new("/svcinit/does/not/exist")));
        assert!(SystemHost
            .read_to_string(Path::new("/svcinit/does/not/exist"))
            .is_none());
    }

    #[test]
    fn system_host_finds_sh() {
        assert!(SystemHost.find_program("sh").is_some());
    }

    #[test]
    fn system_host_parent_pid_is_positive() {
        assert!(SystemHost.parent_pid().unwrap() > 0);
    }

    #[test]
    fn fake_host_unscripted_command_fails() {
        let host = fake::FakeHost::new();
        assert!(host
            .command_output("initctl", &["--version"], DEFAULT_PROBE_TIMEOUT)
            .is_err());
    }
}
