use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::InitSystem;
use crate::config::ServiceConfig;
use crate::error::{ConstructionError, InspectionError};
use crate::host::Host;
use crate::interactive;
use crate::service::{self, ControlTool, Runner, Service};

pub(super) const NAME: &str = "linux-systemd";

/// Directory systemd creates at boot when it is pid 1
const RUNTIME_DIR: &str = "/run/systemd/system";
const SYSTEM_UNIT_DIR: &str = "/etc/systemd/system";
const USER_UNIT_DIR: &str = ".config/systemd/user";

/// systemd backend; the only one supporting per-user services
pub struct Systemd {
    host: Arc<dyn Host>,
}

impl Systemd {
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self { host }
    }

    fn unit_path(&self, config: &ServiceConfig) -> Result<PathBuf, ConstructionError> {
        let file = format!("{}.service", config.name);
        if !config.user_service {
            return Ok(Path::new(SYSTEM_UNIT_DIR).join(file));
        }

        let home = self
            .host
            .home_dir()
            .ok_or_else(|| ConstructionError::NoHomeDirectory(config.name.clone()))?;
        Ok(home.join(USER_UNIT_DIR).join(file))
    }
}

impl InitSystem for Systemd {
    fn name(&self) -> &str {
        NAME
    }

    fn detect(&self) -> bool {
        if self.host.path_exists(Path::new(RUNTIME_DIR)) {
            return true;
        }

        // Containers may lack /run/systemd but still run systemd as pid 1
        self.host
            .read_to_string(Path::new("/proc/1/comm"))
            .is_some_and(|comm| comm.trim() == "systemd")
    }

    fn try_interactive(&self) -> Result<bool, InspectionError> {
        interactive::is_interactive(self.host.as_ref())
    }

    fn construct(
        &self,
        runner: Arc<dyn Runner>,
        config: ServiceConfig,
    ) -> Result<Service, ConstructionError> {
        let executable = service::validate(&config, NAME, true)?;
        let unit_path = self.unit_path(&config)?;
        let control = ControlTool::Systemctl {
            user: config.user_service,
        };
        Ok(Service::new(NAME, config, runner, executable, unit_path, control))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::FakeHost;
    use crate::service::{Action, NoopRunner};

    fn systemd(host: FakeHost) -> Systemd {
        Systemd::new(Arc::new(host))
    }

    fn config(name: &str) -> ServiceConfig {
        let mut config = ServiceConfig::new(name);
        config.executable = Some(PathBuf::from("/usr/bin/web"));
        config
    }

    #[test]
    fn detects_runtime_dir() {
        assert!(systemd(FakeHost::new().with_path("/run/systemd/system")).detect());
    }

    #[test]
    fn detects_pid1_comm() {
        assert!(systemd(FakeHost::new().with_file("/proc/1/comm", "systemd\n")).detect());
    }

    #[test]
    fn other_pid1_not_detected() {
        assert!(!systemd(FakeHost::new().with_file("/proc/1/comm", "init\n")).detect());
        assert!(!systemd(FakeHost::new()).detect());
    }

    #[test]
    fn system_unit_path_and_commands() {
        let service = systemd(FakeHost::new())
            .construct(Arc::new(NoopRunner), config("web"))
            .unwrap();
        assert_eq!(service.platform(), "linux-systemd");
        assert_eq!(
            service.definition_path(),
            Path::new("/etc/systemd/system/web.service")
        );
        assert_eq!(
            service.control_command(Action::Stop),
            vec!["systemctl", "stop", "web.service"]
        );
    }

    #[test]
    fn user_unit_lives_in_home() {
        let mut cfg = config("web");
        cfg.user_service = true;
        let service = systemd(FakeHost::new().with_home("/home/polar"))
            .construct(Arc::new(NoopRunner), cfg)
            .unwrap();
        assert_eq!(
            service.definition_path(),
            Path::new("/home/polar/.config/systemd/user/web.service")
        );
        assert_eq!(
            service.control_command(Action::Status),
            vec!["systemctl", "--user", "is-active", "web.service"]
        );
    }

    #[test]
    fn user_unit_without_home_fails() {
        let mut cfg = config("web");
        cfg.user_service = true;
        let err = systemd(FakeHost::new())
            .construct(Arc::new(NoopRunner), cfg)
            .unwrap_err();
        assert_eq!(err, ConstructionError::NoHomeDirectory("web".into()));
    }

    #[test]
    fn runner_is_carried() {
        let runner: Arc<dyn Runner> = Arc::new(NoopRunner);
        let service = systemd(FakeHost::new())
            .construct(runner.clone(), config("web"))
            .unwrap();
        assert!(Arc::ptr_eq(service.runner(), &runner));
    }
}
