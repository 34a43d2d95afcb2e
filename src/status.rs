//! Status notifications shared by every adapter call.
//!
//! The adapter publishes [`StatusEvent`]s; the console keeps the latest one for
//! page renders and streams all of them to browsers. Success and error events
//! fall back to [`StatusKind::Idle`] after the configured delay unless a newer
//! event replaced them first.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Idle,
    Loading,
    Success,
    Error,
}

impl StatusKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    fn decays(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub kind: StatusKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl StatusEvent {
    pub fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn idle() -> Self {
        Self::new(StatusKind::Idle, "")
    }
}

/// Publisher side of the status slot. Cheap to clone.
#[derive(Clone)]
pub struct StatusChannel {
    inner: Arc<Inner>,
}

struct Inner {
    sender: broadcast::Sender<StatusEvent>,
    slot: Mutex<Slot>,
    decay: Duration,
}

struct Slot {
    current: StatusEvent,
    generation: u64,
}

impl StatusChannel {
    pub fn new(decay: Duration) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                sender,
                slot: Mutex::new(Slot {
                    current: StatusEvent::idle(),
                    generation: 0,
                }),
                decay,
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.inner.sender.subscribe()
    }

    pub fn current(&self) -> StatusEvent {
        self.inner.lock_slot().current.clone()
    }

    pub fn loading(&self, message: impl Into<String>) {
        self.publish(StatusEvent::new(StatusKind::Loading, message));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.publish(StatusEvent::new(StatusKind::Success, message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(StatusEvent::new(StatusKind::Error, message));
    }

    /// Replaces whatever the slot shows. Never blocks on subscribers.
    pub fn publish(&self, event: StatusEvent) {
        let generation = {
            let mut slot = self.inner.lock_slot();
            slot.generation += 1;
            slot.current = event.clone();
            slot.generation
        };

        let decays = event.kind.decays();
        // No subscribers is fine; the slot still holds the event.
        let _ = self.inner.sender.send(event);

        if decays {
            self.schedule_decay(generation);
        }
    }

    fn schedule_decay(&self, generation: u64) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("no runtime for status decay; keeping current status");
            return;
        };

        let inner: Weak<Inner> = Arc::downgrade(&self.inner);
        let delay = self.inner.decay;
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = inner.upgrade() {
                inner.decay(generation);
            }
        });
    }
}

impl Inner {
    fn lock_slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn decay(&self, generation: u64) {
        let idle = {
            let mut slot = self.lock_slot();
            if slot.generation != generation {
                return;
            }
            slot.generation += 1;
            slot.current = StatusEvent::idle();
            slot.current.clone()
        };
        let _ = self.sender.send(idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECAY: Duration = Duration::from_millis(3000);

    #[tokio::test(start_paused = true)]
    async fn success_decays_to_idle() {
        let status = StatusChannel::new(DECAY);
        let mut rx = status.subscribe();

        status.loading("Loading data...");
        status.success("Data loaded successfully!");

        assert_eq!(rx.recv().await.unwrap().kind, StatusKind::Loading);
        assert_eq!(rx.recv().await.unwrap().kind, StatusKind::Success);
        assert_eq!(status.current().kind, StatusKind::Success);

        let idle = rx.recv().await.unwrap();
        assert_eq!(idle.kind, StatusKind::Idle);
        assert_eq!(status.current().kind, StatusKind::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn loading_does_not_decay() {
        let status = StatusChannel::new(DECAY);
        status.loading("Loading data...");

        tokio::time::sleep(DECAY * 2).await;
        assert_eq!(status.current().kind, StatusKind::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_event_cancels_pending_decay() {
        let status = StatusChannel::new(DECAY);

        status.success("first");
        tokio::time::sleep(DECAY / 2).await;
        status.error("Error: second");

        tokio::time::sleep(DECAY / 2 + Duration::from_millis(10)).await;
        let current = status.current();
        assert_eq!(current.kind, StatusKind::Error);
        assert_eq!(current.message, "Error: second");

        tokio::time::sleep(DECAY / 2).await;
        assert_eq!(status.current().kind, StatusKind::Idle);
    }

    #[test]
    fn publishing_outside_runtime_keeps_event() {
        let status = StatusChannel::new(DECAY);
        status.error("Error: offline");
        assert_eq!(status.current().kind, StatusKind::Error);
    }
}
