// libs/shared/store/src/locks.rs

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;
use uuid::Uuid;

/// Per-professional mutual exclusion for the booking and regeneration
/// critical sections. The check-free/consume-slot/create-appointment sequence
/// (and its cancel mirror) must be atomic per professional; everything that
/// mutates a professional's inventory takes this lock first.
#[derive(Default)]
pub struct ProfessionalLocks {
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl ProfessionalLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until the professional's lock is free. The guard releases the
    /// critical section on drop.
    pub async fn acquire(&self, professional_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut registry = self.locks.lock().await;
            registry
                .entry(professional_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };

        debug!("Acquiring scheduling lock for professional {}", professional_id);
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lock_serializes_access_per_professional() {
        let locks = Arc::new(ProfessionalLocks::new());
        let professional_id = Uuid::new_v4();

        let guard = locks.acquire(professional_id).await;
        let contender = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move { locks.acquire(professional_id).await })
        };

        // The second acquire must not complete while the guard is held.
        tokio::task::yield_now().await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.expect("contender task panicked");
    }

    #[tokio::test]
    async fn different_professionals_do_not_contend() {
        let locks = ProfessionalLocks::new();
        let _first = locks.acquire(Uuid::new_v4()).await;
        let _second = locks.acquire(Uuid::new_v4()).await;
    }
}
