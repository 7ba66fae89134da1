mod registry;
mod supervisord;
mod systemd;
mod sysvinit;
mod upstart;

pub use registry::Registry;
pub use supervisord::Supervisord;
pub use systemd::Systemd;
pub use sysvinit::SysVinit;
pub use upstart::Upstart;

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::error::{ConstructionError, InspectionError};
use crate::host::Host;
use crate::service::{Runner, Service};

/// Backend for one init system (systemd, upstart, supervisord, SysV)
pub trait InitSystem: Send + Sync {
    /// Identifier such as "linux-systemd"
    fn name(&self) -> &str;

    /// Whether this init system manages the host. May probe the filesystem
    /// or run a short, time-bounded command; never changes host state.
    fn detect(&self) -> bool;

    /// Whether the current process was launched from a terminal
    fn try_interactive(&self) -> Result<bool, InspectionError>;

    /// Best-effort [`try_interactive`](Self::try_interactive); assumes
    /// interactive if the parent process cannot be inspected
    fn interactive(&self) -> bool {
        self.try_interactive().unwrap_or(true)
    }

    /// Build a service handle for `config`, driven by `runner`
    fn construct(
        &self,
        runner: Arc<dyn Runner>,
        config: ServiceConfig,
    ) -> Result<Service, ConstructionError>;
}

/// Built-in backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitKind {
    Systemd,
    Upstart,
    Supervisord,
    SysVinit,
}

impl InitKind {
    /// Detection priority: most specific first, SysV catch-all last
    pub const ALL: [InitKind; 4] = [
        InitKind::Systemd,
        InitKind::Upstart,
        InitKind::Supervisord,
        InitKind::SysVinit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InitKind::Systemd => systemd::NAME,
            InitKind::Upstart => upstart::NAME,
            InitKind::Supervisord => supervisord::NAME,
            InitKind::SysVinit => sysvinit::NAME,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn create(self, host: Arc<dyn Host>) -> Box<dyn InitSystem> {
        match self {
            InitKind::Systemd => Box::new(Systemd::new(host)),
            InitKind::Upstart => Box::new(Upstart::new(host)),
            InitKind::Supervisord => Box::new(Supervisord::new(host)),
            InitKind::SysVinit => Box::new(SysVinit::new(host)),
        }
    }
}
