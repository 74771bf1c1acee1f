//! # Install Prompt
//!
//! Offers to install the portal as an app once the host environment says it
//! can. The availability event and the deferred prompt handle it carries are
//! supplied from outside ([`DeferredPrompt`] through a one-shot channel), as
//! is the place a dismissal is remembered ([`DismissalStore`]).
//!
//! After the user dismisses the prompt it stays hidden for the reminder
//! interval (24 hours by default).

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::RwLock;
use tokio::sync::oneshot;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Accepted,
    Dismissed,
}

/// Deferred install handle delivered with the availability event.
#[async_trait]
pub trait DeferredPrompt: Send + Sync {
    /// Shows the native install dialog and waits for the user's choice.
    async fn prompt(&self) -> InstallOutcome;
}

/// Remembers when the prompt was last dismissed.
pub trait DismissalStore: Send + Sync {
    fn dismissed_at(&self) -> Option<DateTime<Utc>>;

    fn record_dismissal(&self, at: DateTime<Utc>);
}

#[derive(Debug, Default)]
pub struct MemoryDismissalStore {
    dismissed_at: RwLock<Option<DateTime<Utc>>>,
}

impl MemoryDismissalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DismissalStore for MemoryDismissalStore {
    fn dismissed_at(&self) -> Option<DateTime<Utc>> {
        *self
            .dismissed_at
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record_dismissal(&self, at: DateTime<Utc>) {
        *self
            .dismissed_at
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(at);
    }
}

pub struct InstallPrompt<P, S> {
    store: S,
    reminder: Duration,
    deferred: Option<P>,
    visible: bool,
}

impl<P: DeferredPrompt, S: DismissalStore> InstallPrompt<P, S> {
    pub fn new(store: S, reminder: Duration) -> Self {
        Self {
            store,
            reminder,
            deferred: None,
            visible: false,
        }
    }

    fn recently_dismissed(&self, now: DateTime<Utc>) -> bool {
        self.store
            .dismissed_at()
            .is_some_and(|at| now - at < self.reminder)
    }

    /// Keeps the deferred handle and shows the prompt unless it was
    /// dismissed within the reminder interval.
    pub fn on_available(&mut self, handle: P, now: DateTime<Utc>) {
        self.deferred = Some(handle);
        self.visible = !self.recently_dismissed(now);
        debug!("Install prompt available, visible: {}", self.visible);
    }

    /// Waits for the availability event.
    ///
    /// There is no timeout. If the sender is dropped first the wait ends and
    /// nothing is shown. Returns whether an event arrived.
    pub async fn await_availability(&mut self, events: oneshot::Receiver<P>) -> bool {
        match events.await {
            Ok(handle) => {
                self.on_available(handle, Utc::now());
                true
            }
            Err(_) => {
                debug!("Install availability source closed before firing");
                false
            }
        }
    }

    /// Shows the native dialog. Without a deferred handle this does nothing.
    pub async fn install(&mut self) -> Option<InstallOutcome> {
        let outcome = self.deferred.as_ref()?.prompt().await;

        if outcome == InstallOutcome::Accepted {
            info!("App installation accepted");
            self.deferred = None;
            self.visible = false;
        }

        Some(outcome)
    }

    /// Hides the prompt and records when, starting the reminder interval.
    pub fn dismiss(&mut self, now: DateTime<Utc>) {
        self.visible = false;
        self.store.record_dismissal(now);
    }

    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        self.visible && self.deferred.is_some() && !self.recently_dismissed(now)
    }

    pub fn has_deferred_prompt(&self) -> bool {
        self.deferred.is_some()
    }
}
