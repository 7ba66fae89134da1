use std::path::Path;
use std::sync::Arc;

use super::InitSystem;
use crate::config::ServiceConfig;
use crate::error::{ConstructionError, InspectionError};
use crate::host::{Host, DEFAULT_PROBE_TIMEOUT};
use crate::interactive;
use crate::service::{self, ControlTool, Runner, Service};

pub(super) const NAME: &str = "linux-upstart";

const UDEV_BRIDGE: &str = "/sbin/upstart-udev-bridge";
const INITCTL: &str = "/sbin/initctl";
const JOB_DIR: &str = "/etc/init";

pub struct Upstart {
    host: Arc<dyn Host>,
}

impl Upstart {
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self { host }
    }

    /// `initctl` also ships with systemd compatibility shims, so ask it
    fn initctl_is_upstart(&self) -> bool {
        if !self.host.path_exists(Path::new(INITCTL)) {
            return false;
        }

        match self
            .host
            .command_output(INITCTL, &["--version"], DEFAULT_PROBE_TIMEOUT)
        {
            Ok(version) => version.contains("upstart"),
            Err(e) => {
                tracing::debug!("initctl probe failed: {:#}", e);
                false
            }
        }
    }
}

impl InitSystem for Upstart {
    fn name(&self) -> &str {
        NAME
    }

    fn detect(&self) -> bool {
        self.host.path_exists(Path::new(UDEV_BRIDGE)) || self.initctl_is_upstart()
    }

    fn try_interactive(&self) -> Result<bool, InspectionError> {
        interactive::is_interactive(self.host.as_ref())
    }

    fn construct(
        &self,
        runner: Arc<dyn Runner>,
        config: ServiceConfig,
    ) -> Result<Service, ConstructionError> {
        let executable = service::validate(&config, NAME, false)?;
        let job_path = Path::new(JOB_DIR).join(format!("{}.conf", config.name));
        Ok(Service::new(
            NAME,
            config,
            runner,
            executable,
            job_path,
            ControlTool::Initctl,
        ))
    }
}
