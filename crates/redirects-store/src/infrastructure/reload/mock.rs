//! Recording reload notifier for tests.
//!
//! Lets tests assert how many reloads were signalled without wiring up a
//! real consumer.  An optional probe runs inside `notify_reload`, so a test
//! can inspect the file system at the exact moment the signal fires.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::ReloadNotifier;

type Probe = Box<dyn Fn() + Send + Sync>;

/// A [`ReloadNotifier`] that counts calls.
#[derive(Default)]
pub struct RecordingReloadNotifier {
    calls: AtomicUsize,
    probe: Option<Probe>,
}

impl RecordingReloadNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `probe` on every notification, before the call is counted.
    pub fn with_probe(probe: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            probe: Some(Box::new(probe)),
        }
    }

    /// Returns the number of times [`ReloadNotifier::notify_reload`] was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ReloadNotifier for RecordingReloadNotifier {
    fn notify_reload(&self) {
        if let Some(probe) = &self.probe {
            probe();
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}
