use crate::error::InspectionError;
use crate::host::{Host, INIT_PID};

/// Whether the current process was started from a terminal rather than by the init system.
///
/// A process whose parent is pid 1 was either launched by init or orphaned
/// and reparented to it; anything else is treated as interactive.
///
/// Known limitation: services run under a per-user manager (e.g.
/// `systemd --user`) have that manager as parent and are reported as
/// interactive. Telling them apart needs session/cgroup inspection.
pub fn is_interactive(host: &dyn Host) -> Result<bool, InspectionError> {
    Ok(host.parent_pid()? != INIT_PID)
}
