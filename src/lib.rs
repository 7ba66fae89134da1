//! Init system detection and service backend dispatch.
//!
//! A [`Registry`](init::Registry) holds the candidate backends in priority
//! order and resolves the one managing the host. The resolved backend turns
//! a [`ServiceConfig`](config::ServiceConfig) and a [`Runner`](service::Runner)
//! into a [`Service`](service::Service) handle.

pub mod cmd;
pub mod config;
pub mod error;
pub mod host;
pub mod init;
pub mod interactive;
pub mod service;
pub mod template;

pub use config::ServiceConfig;
pub use error::{ConstructionError, DetectionFailure, InspectionError};
pub use init::{InitKind, InitSystem, Registry};
pub use service::{Action, Runner, Service};
