pub mod admission;
pub mod launch_command;
pub mod process_handle;
pub mod registry_snapshot;
pub mod role;
pub mod service_descriptor;
pub mod service_status;
