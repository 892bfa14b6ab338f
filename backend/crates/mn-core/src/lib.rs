pub mod error;
pub mod models;
pub mod service_registry;
pub mod shutdown_coordinator;
pub mod shutdown_guard;

pub use error::{ControlError, Result, UnavailableReason};
pub use models::admission::Admission;
pub use models::launch_command::LaunchCommand;
pub use models::process_handle::ProcessHandle;
pub use models::registry_snapshot::{RegistrySnapshot, ServiceSnapshot};
pub use models::role::Role;
pub use models::service_descriptor::ServiceDescriptor;
pub use models::service_status::ServiceStatus;
pub use service_registry::ServiceRegistry;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;

pub use error_location::ErrorLocation;

#[cfg(test)]
mod tests;
