use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::error::ConstructionError;

/// Behavior supplied by the program being turned into a service
pub trait Runner: Send + Sync {
    /// Begin work; must not block
    fn start(&self) -> Result<()>;

    /// Stop work and release resources
    fn stop(&self) -> Result<()>;
}

/// Runner that does nothing, for inspecting handles without a program attached
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRunner;

impl Runner for NoopRunner {
    fn start(&self) -> Result<()> {
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        Ok(())
    }
}

/// Lifecycle actions a backend's control tool understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
    Restart,
    Status,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Start, Action::Stop, Action::Restart, Action::Status];

    pub fn verb(self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Stop => "stop",
            Action::Restart => "restart",
            Action::Status => "status",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Command-line tool a backend drives services with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlTool {
    Systemctl { user: bool },
    Initctl,
    Supervisorctl,
    SysvService,
}

impl ControlTool {
    fn command(self, name: &str, action: Action) -> Vec<String> {
        match self {
            ControlTool::Systemctl { user } => {
                let verb = match action {
                    Action::Status => "is-active",
                    other => other.verb(),
                };
                let mut argv = vec!["systemctl".to_string()];
                if user {
                    argv.push("--user".into());
                }
                argv.push(verb.into());
                argv.push(format!("{}.service", name));
                argv
            }
            ControlTool::Initctl => vec!["initctl".into(), action.verb().into(), name.into()],
            ControlTool::Supervisorctl => {
                vec!["supervisorctl".into(), action.verb().into(), name.into()]
            }
            ControlTool::SysvService => vec!["service".into(), name.into(), action.verb().into()],
        }
    }
}

/// A service bound to one backend.
///
/// Holds everything the install/control layer needs; it never touches the
/// host itself.
#[derive(Clone)]
pub struct Service {
    platform: String,
    config: ServiceConfig,
    runner: Arc<dyn Runner>,
    executable: PathBuf,
    definition_path: PathBuf,
    control: ControlTool,
}

impl Service {
    pub(crate) fn new(
        platform: &str,
        config: ServiceConfig,
        runner: Arc<dyn Runner>,
        executable: PathBuf,
        definition_path: PathBuf,
        control: ControlTool,
    ) -> Self {
        Self {
            platform: platform.to_string(),
            config,
            runner,
            executable,
            definition_path,
            control,
        }
    }

    /// Name of the backend that built this handle
    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn runner(&self) -> &Arc<dyn Runner> {
        &self.runner
    }

    /// Resolved program path
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Where the backend keeps the service definition
    pub fn definition_path(&self) -> &Path {
        &self.definition_path
    }

    pub fn control_tool(&self) -> ControlTool {
        self.control
    }

    /// Argv that performs `action` on this service
    pub fn control_command(&self, action: Action) -> Vec<String> {
        self.control.command(&self.config.name, action)
    }
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("platform", &self.platform)
            .field("config", &self.config)
            .field("executable", &self.executable)
            .field("definition_path", &self.definition_path)
            .field("control", &self.control)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.config.display_name(), self.platform)
    }
}

/// Checks shared by every backend; returns the executable to run
pub(crate) fn validate(
    config: &ServiceConfig,
    backend: &str,
    supports_user_services: bool,
) -> Result<PathBuf, ConstructionError> {
    let name = &config.name;
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@');
    if name.is_empty() || name == "." || name == ".." || !name.chars().all(allowed) {
        return Err(ConstructionError::InvalidName(name.clone()));
    }

    if config.user_service && !supports_user_services {
        return Err(ConstructionError::UserServiceUnsupported {
            backend: backend.to_string(),
        });
    }

    if let Some(bad) = config
        .environment
        .iter()
        .find(|entry| crate::template::env_key(entry).is_empty() || !entry.contains('='))
    {
        return Err(ConstructionError::MalformedEnvironment(bad.clone()));
    }

    match &config.executable {
        Some(path) => Ok(path.clone()),
        None => std::env::current_exe().map_err(|e| ConstructionError::Executable(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_plain_config() {
        let mut config = ServiceConfig::new("web");
        config.executable = Some(PathBuf::from("/usr/bin/web"));
        config.environment = vec!["A=1".into(), "B=x=y".into(), "C=".into()];
        assert_eq!(
            validate(&config, "unix-systemv", false).unwrap(),
            PathBuf::from("/usr/bin/web")
        );
    }

    #[test]
    fn validate_defaults_to_current_exe() {
        let config = ServiceConfig::new("web");
        assert_eq!(
            validate(&config, "unix-systemv", false).unwrap(),
            std::env::current_exe().unwrap()
        );
    }

    #[test]
    fn validate_rejects_bad_names() {
        for name in ["", ".", "..", "my service", "a/b", "tab\tname", "web;rm", "wéb"] {
            let config = ServiceConfig::new(name);
            assert_eq!(
                validate(&config, "unix-systemv", false),
                Err(ConstructionError::InvalidName(name.into()))
            );
        }
    }

    #[test]
    fn validate_accepts_unit_style_names() {
        for name in ["web", "my-app_2", "api.v1", "getty@tty1", "..hidden"] {
            let mut config = ServiceConfig::new(name);
            config.executable = Some(PathBuf::from("/usr/bin/web"));
            assert!(validate(&config, "unix-systemv", false).is_ok(), "{}", name);
        }
    }

    #[test]
    fn validate_rejects_user_service_when_unsupported() {
        let mut config = ServiceConfig::new("web");
        config.user_service = true;
        assert!(matches!(
            validate(&config, "linux-upstart", false),
            Err(ConstructionError::UserServiceUnsupported { backend }) if backend == "linux-upstart"
        ));
        assert!(validate(&config, "linux-systemd", true).is_ok());
    }

    #[test]
    fn validate_rejects_malformed_environment() {
        let mut config = ServiceConfig::new("web");
        config.environment = vec!["GOOD=1".into(), "NOEQUALS".into()];
        assert_eq!(
            validate(&config, "unix-systemv", false),
            Err(ConstructionError::MalformedEnvironment("NOEQUALS".into()))
        );

        config.environment = vec!["=value".into()];
        assert_eq!(
            validate(&config, "unix-systemv", false),
            Err(ConstructionError::MalformedEnvironment("=value".into()))
        );
    }

    #[test]
    fn systemctl_status_uses_is_active() {
        assert_eq!(
            ControlTool::Systemctl { user: false }.command("web", Action::Status),
            vec!["systemctl", "is-active", "web.service"]
        );
        assert_eq!(
            ControlTool::Systemctl { user: true }.command("web", Action::Start),
            vec!["systemctl", "--user", "start", "web.service"]
        );
    }

    #[test]
    fn sysv_puts_name_before_verb() {
        assert_eq!(
            ControlTool::SysvService.command("web", Action::Restart),
            vec!["service", "web", "restart"]
        );
    }

    #[test]
    fn noop_runner_succeeds() {
        assert!(NoopRunner.start().is_ok());
        assert!(NoopRunner.stop().is_ok());
    }
}
