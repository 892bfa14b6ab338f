use crate::{
    Admission, ControlError, RegistrySnapshot, Result, ServiceDescriptor, ServiceSnapshot,
    ServiceStatus, UnavailableReason,
};

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;

/// All shared control state, guarded by one lock
#[derive(Debug, Default)]
struct ControlState {
    services: BTreeMap<String, ServiceDescriptor>,
    request_count: u64,
    cursors: BTreeMap<String, usize>,
}

/// Single source of truth for service descriptors, the request counter and
/// load balancer cursors. Cheap to clone; clones share state.
#[derive(Clone, Debug, Default)]
pub struct ServiceRegistry {
    inner: Arc<Mutex<ControlState>>,
}

impl ServiceRegistry {
    pub fn new(descriptors: impl IntoIterator<Item = ServiceDescriptor>) -> Self {
        let mut state = ControlState::default();
        for descriptor in descriptors {
            if descriptor.is_load_balanced() {
                state.cursors.insert(descriptor.name.clone(), 0);
            }
            state.services.insert(descriptor.name.clone(), descriptor);
        }

        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Copy of one descriptor
    pub async fn get(&self, name: &str) -> Option<ServiceDescriptor> {
        let state = self.inner.lock().await;
        state.services.get(name).cloned()
    }

    pub async fn names(&self) -> Vec<String> {
        let state = self.inner.lock().await;
        state.services.keys().cloned().collect()
    }

    /// Apply `mutator` to the named descriptor while holding the lock.
    pub async fn update<F, R>(&self, name: &str, mutator: F) -> Result<R>
    where
        F: FnOnce(&mut ServiceDescriptor) -> R,
    {
        let mut state = self.inner.lock().await;
        let descriptor = state
            .services
            .get_mut(name)
            .ok_or_else(|| ControlError::not_found(name))?;
        Ok(mutator(descriptor))
    }

    /// Set `healthy`, returning the previous value
    pub async fn set_healthy(&self, name: &str, healthy: bool) -> Result<bool> {
        self.update(name, |descriptor| {
            std::mem::replace(&mut descriptor.healthy, healthy)
        })
        .await
    }

    pub async fn record_request(&self) -> u64 {
        let mut state = self.inner.lock().await;
        state.request_count += 1;
        state.request_count
    }

    /// Router gate: reject stopped or unhealthy services, otherwise read and
    /// advance the round robin cursor in the same critical section.
    pub async fn admit(&self, name: &str) -> Result<Admission> {
        let mut state = self.inner.lock().await;
        let ControlState {
            services, cursors, ..
        } = &mut *state;

        let descriptor = services
            .get(name)
            .ok_or_else(|| ControlError::not_found(name))?;

        if descriptor.status == ServiceStatus::Stopped {
            return Err(ControlError::unavailable(
                name,
                UnavailableReason::ManuallyStopped,
            ));
        }
        if !descriptor.healthy {
            return Err(ControlError::unavailable(name, UnavailableReason::Unhealthy));
        }

        let instance = if descriptor.is_load_balanced() {
            let cursor = cursors.entry(name.to_string()).or_insert(0);
            let selected = *cursor;
            *cursor = (selected + 1) % descriptor.instances;
            Some(selected)
        } else {
            None
        };

        Ok(Admission {
            service: name.to_string(),
            base_url: descriptor.base_url(),
            instance,
        })
    }

    pub async fn snapshot(&self) -> RegistrySnapshot {
        let state = self.inner.lock().await;
        RegistrySnapshot {
            services: state
                .services
                .iter()
                .map(|(name, descriptor)| (name.clone(), ServiceSnapshot::from(descriptor)))
                .collect(),
            total_requests: state.request_count,
            load_balancer_state: state.cursors.clone(),
        }
    }
}
