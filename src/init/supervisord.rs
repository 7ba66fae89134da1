use std::path::Path;
use std::sync::Arc;

use super::InitSystem;
use crate::config::ServiceConfig;
use crate::error::{ConstructionError, InspectionError};
use crate::host::Host;
use crate::interactive;
use crate::service::{self, ControlTool, Runner, Service};

pub(super) const NAME: &str = "linux-supervisord";

/// Locations supervisord reads its main config from
const CONFIG_FILES: &[&str] = &["/etc/supervisord.conf", "/etc/supervisor/supervisord.conf"];
const PROGRAM_DIR: &str = "/etc/supervisor/conf.d";

pub struct Supervisord {
    host: Arc<dyn Host>,
}

impl Supervisord {
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self { host }
    }
}

impl InitSystem for Supervisord {
    fn name(&self) -> &str {
        NAME
    }

    fn detect(&self) -> bool {
        let configured = CONFIG_FILES
            .iter()
            .any(|path| self.host.path_exists(Path::new(path)));

        configured && self.host.find_program("supervisorctl").is_some()
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
        let program_path = Path::new(PROGRAM_DIR).join(format!("{}.conf", config.name));
        Ok(Service::new(
            NAME,
            config,
            runner,
            executable,
            program_path,
            ControlTool::Supervisorctl,
        ))
    }
}
