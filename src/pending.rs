//! In-flight write tracking for the `disable_while_pending` submit policy.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, PoisonError},
};

use crate::{config::SubmitPolicy, resources::ResourceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteOp {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WriteKey {
    pub kind: ResourceKind,
    pub op: WriteOp,
    pub key: Option<i64>,
}

impl WriteKey {
    pub fn create(kind: ResourceKind) -> Self {
        Self {
            kind,
            op: WriteOp::Create,
            key: None,
        }
    }

    pub fn update(kind: ResourceKind, key: i64) -> Self {
        Self {
            kind,
            op: WriteOp::Update,
            key: Some(key),
        }
    }

    pub fn delete(kind: ResourceKind, key: i64) -> Self {
        Self {
            kind,
            op: WriteOp::Delete,
            key: Some(key),
        }
    }
}

#[derive(Clone, Default)]
pub struct PendingWrites {
    policy: SubmitPolicy,
    inflight: Arc<Mutex<HashSet<WriteKey>>>,
}

impl PendingWrites {
    pub fn new(policy: SubmitPolicy) -> Self {
        Self {
            policy,
            inflight: Arc::default(),
        }
    }

    pub fn policy(&self) -> SubmitPolicy {
        self.policy
    }

    /// `None` when the policy rejects a duplicate of an in-flight write.
    /// The returned guard releases the slot when dropped.
    pub fn begin(&self, key: WriteKey) -> Option<PendingGuard> {
        if !self.policy.disables_while_pending() {
            return Some(PendingGuard {
                key,
                inflight: None,
            });
        }

        let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        if !inflight.insert(key) {
            return None;
        }
        Some(PendingGuard {
            key,
            inflight: Some(Arc::clone(&self.inflight)),
        })
    }
}

pub struct PendingGuard {
    key: WriteKey,
    inflight: Option<Arc<Mutex<HashSet<WriteKey>>>>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if let Some(inflight) = self.inflight.take() {
            inflight
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_pass_by_default() {
        let pending = PendingWrites::new(SubmitPolicy::AllowDuplicates);
        let key = WriteKey::delete(ResourceKind::Player, 7);
        let first = pending.begin(key);
        let second = pending.begin(key);
        assert!(first.is_some() && second.is_some());
    }

    #[test]
    fn duplicate_is_rejected_until_guard_drops() {
        let pending = PendingWrites::new(SubmitPolicy::DisableWhilePending);
        let key = WriteKey::update(ResourceKind::Team, 5);

        let guard = pending.begin(key);
        assert!(guard.is_some());
        assert!(pending.begin(key).is_none());
        assert!(pending.begin(WriteKey::update(ResourceKind::Team, 6)).is_some());

        drop(guard);
        assert!(pending.begin(key).is_some());
    }
}
