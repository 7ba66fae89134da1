use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

use super::{InitKind, InitSystem};
use crate::error::DetectionFailure;
use crate::host::{Host, SystemHost};

/// Ordered set of init system backends with a memoized active one.
///
/// Backends are fixed at construction. [`resolve`](Registry::resolve) picks
/// the first one (in registration order) whose `detect()` is true and keeps
/// that answer for the life of the registry.
pub struct Registry {
    backends: Vec<Box<dyn InitSystem>>,
    active: OnceCell<usize>,
}

impl Registry {
    /// Register backends in priority order
    pub fn new(backends: Vec<Box<dyn InitSystem>>) -> Self {
        Self {
            backends,
            active: OnceCell::new(),
        }
    }

    /// Built-in backends against the given host
    pub fn linux(host: Arc<dyn Host>) -> Self {
        Self::new(
            InitKind::ALL
                .into_iter()
                .map(|kind| kind.create(host.clone()))
                .collect(),
        )
    }

    /// Built-in backends against the live system
    pub fn system() -> Self {
        Self::linux(Arc::new(SystemHost))
    }

    /// The backend managing this host.
    ///
    /// A failed resolution is not cached, so a later call probes again.
    pub fn resolve(&self) -> Result<&dyn InitSystem, DetectionFailure> {
        let index = self.active.get_or_try_init(|| {
            for (index, backend) in self.backends.iter().enumerate() {
                let detected = backend.detect();
                tracing::debug!("init system {} detected: {}", backend.name(), detected);
                if detected {
                    return Ok(index);
                }
            }

            Err(DetectionFailure {
                tried: self.names().into_iter().map(str::to_string).collect(),
            })
        })?;

        Ok(self.backends[*index].as_ref())
    }

    /// Run every detection predicate, uncached, in registration order
    pub fn probe_all(&self) -> Vec<(&str, bool)> {
        self.backends
            .iter()
            .map(|backend| (backend.name(), backend.detect()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn InitSystem> {
        self.backends.iter().map(|backend| backend.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|backend| backend.name()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&dyn InitSystem> {
        self.iter().find(|backend| backend.name() == name)
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("backends", &self.names())
            .field("active", &self.active.get())
            .finish()
    }
}
