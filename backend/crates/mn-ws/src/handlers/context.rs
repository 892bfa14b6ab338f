use crate::SessionRegistry;

use std::sync::Arc;

use mn_core::ServiceRegistry;
use mn_router::RequestRouter;
use mn_supervisor::ProcessSupervisor;

/// Everything a command handler may touch
#[derive(Clone)]
pub struct CommandContext {
    pub registry: ServiceRegistry,
    pub supervisor: Arc<ProcessSupervisor>,
    pub router: RequestRouter,
    pub sessions: SessionRegistry,
}
