//! Reload notification infrastructure.
//!
//! [`WatchReloadNotifier`] publishes a generation counter on a
//! `tokio::sync::watch` channel.  Every successful upload bumps the counter;
//! a consumer that enforces redirects holds a [`watch::Receiver`], waits for
//! `changed()`, and re-reads `redirects.json` from disk.
//!
//! # Why a watch channel?
//!
//! Consumers only care that the file changed since they last loaded it, not
//! how many times.  A watch channel keeps just the latest value, so a slow
//! consumer that misses three uploads reloads once instead of three times.
//!
//! # Testability
//!
//! The [`mock::RecordingReloadNotifier`] counts calls so tests can assert
//! "exactly one reload, after the write".

use tokio::sync::watch;
use tracing::info;

use crate::application::ports::ReloadNotifier;

pub mod mock;

/// Reload generation published to subscribers.  Starts at 0.
pub type ReloadGeneration = u64;

/// [`ReloadNotifier`] backed by a watch channel.
#[derive(Debug)]
pub struct WatchReloadNotifier {
    sender: watch::Sender<ReloadGeneration>,
}

impl WatchReloadNotifier {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(0);
        Self { sender }
    }

    /// Returns a receiver that observes every future reload.
    pub fn subscribe(&self) -> watch::Receiver<ReloadGeneration> {
        self.sender.subscribe()
    }

    /// Number of reloads signalled so far.
    pub fn generation(&self) -> ReloadGeneration {
        *self.sender.borrow()
    }
}

impl Default for WatchReloadNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ReloadNotifier for WatchReloadNotifier {
    fn notify_reload(&self) {
        // send_modify succeeds even with no subscribers, which is the normal
        // case for the one-shot CLI.
        self.sender.send_modify(|generation| *generation += 1);
        info!(
            generation = self.generation(),
            subscribers = self.sender.receiver_count(),
            "redirects reload signalled"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notifier_starts_at_generation_zero() {
        assert_eq!(WatchReloadNotifier::new().generation(), 0);
    }

    #[test]
    fn test_notify_without_subscribers_still_advances_generation() {
        let notifier = WatchReloadNotifier::new();
        notifier.notify_reload();
        notifier.notify_reload();
        assert_eq!(notifier.generation(), 2);
    }

    #[tokio::test]
    async fn test_subscriber_sees_reload() {
        // Arrange
        let notifier = WatchReloadNotifier::new();
        let mut rx = notifier.subscribe();

        // Act
        notifier.notify_reload();

        // Assert
        rx.changed().await.expect("sender is alive");
        assert_eq!(*rx.borrow_and_update(), 1);
    }

    #[tokio::test]
    async fn test_slow_subscriber_sees_only_latest_generation() {
        let notifier = WatchReloadNotifier::new();
        let mut rx = notifier.subscribe();

        notifier.notify_reload();
        notifier.notify_reload();
        notifier.notify_reload();

        rx.changed().await.expect("sender is alive");
        assert_eq!(*rx.borrow_and_update(), 3);
        assert!(!rx.has_changed().unwrap());
    }
}
