use std::path::Path;
use std::sync::Arc;

use super::InitSystem;
use crate::config::ServiceConfig;
use crate::error::{ConstructionError, InspectionError};
use crate::host::Host;
use crate::interactive;
use crate::service::{self, ControlTool, Runner, Service};

pub(super) const NAME: &str = "unix-systemv";

const SCRIPT_DIR: &str = "/etc/init.d";

/// SysV init scripts. Detection always succeeds, so this backend must be
/// registered last.
pub struct SysVinit {
    host: Arc<dyn Host>,
}

impl SysVinit {
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self { host }
    }
}

impl InitSystem for SysVinit {
    fn name(&self) -> &str {
        NAME
    }

    fn detect(&self) -> bool {
        true
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
        let script_path = Path::new(SCRIPT_DIR).join(&config.name);
        Ok(Service::new(
            NAME,
            config,
            runner,
            executable,
            script_path,
            ControlTool::SysvService,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::FakeHost;
    use crate::service::{Action, NoopRunner};

    #[test]
    fn always_detected() {
        assert!(SysVinit::new(Arc::new(FakeHost::new())).detect());
    }

    #[test]
    fn script_path_and_commands() {
        let mut config = ServiceConfig::new("web");
        config.executable = Some("/usr/bin/web".into());
        let service = SysVinit::new(Arc::new(FakeHost::new()))
            .construct(Arc::new(NoopRunner), config)
            .unwrap();
        assert_eq!(service.definition_path(), Path::new("/etc/init.d/web"));
        let commands: Vec<_> = Action::ALL
            .into_iter()
            .map(|action| service.control_command(action).join(" "))
            .collect();
        assert_eq!(
            commands,
            vec![
                "service web start",
                "service web stop",
                "service web restart",
                "service web status"
            ]
        );
    }

    #[test]
    fn rejects_invalid_name() {
        let err = SysVinit::new(Arc::new(FakeHost::new()))
            .construct(Arc::new(NoopRunner), ServiceConfig::new("../etc"))
            .unwrap_err();
        assert_eq!(err, ConstructionError::InvalidName("../etc".into()));
    }
}
