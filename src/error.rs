use thiserror::Error;

/// No registered backend recognised the host init system
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no init system backend detected (tried: {})", .tried.join(", "))]
pub struct DetectionFailure {
    /// Backend names in the order they were probed
    pub tried: Vec<String>,
}

/// A backend rejected the configuration or runner it was given
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("invalid service name '{0}': expected letters, digits, '-', '_', '.' or '@'")]
    InvalidName(String),

    #[error("{backend} does not support user services")]
    UserServiceUnsupported { backend: String },

    #[error("cannot locate home directory for user service '{0}'")]
    NoHomeDirectory(String),

    #[error("malformed environment entry '{0}': expected KEY=VALUE")]
    MalformedEnvironment(String),

    #[error("unable to determine executable path: {0}")]
    Executable(String),
}

/// The parent process query behind the interactivity check failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to inspect parent process: {reason}")]
pub struct InspectionError {
    pub reason: String,
}

impl InspectionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_failure_lists_tried_backends() {
        let err = DetectionFailure {
            tried: vec!["linux-systemd".into(), "linux-upstart".into()],
        };
        assert_eq!(
            err.to_string(),
            "no init system backend detected (tried: linux-systemd, linux-upstart)"
        );
    }

    #[test]
    fn user_service_message_names_backend() {
        let err = ConstructionError::UserServiceUnsupported {
            backend: "unix-systemv".into(),
        };
        assert_eq!(err.to_string(), "unix-systemv does not support user services");
    }
}
