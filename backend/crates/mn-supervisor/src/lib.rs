pub mod health_monitor;
pub mod health_probe;
pub mod process_supervisor;
pub mod start_outcome;


pub use health_monitor::HealthMonitor;
pub use health_probe::HealthProbe;
pub use process_supervisor::{ProcessSupervisor, SupervisorSettings};
pub use start_outcome::StartOutcome;
