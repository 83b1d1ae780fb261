//! Ports: the traits the persistence coordinator depends on.
//!
//! Infrastructure implementations live in `crate::infrastructure`; unit tests
//! inject recording doubles or `mockall` mocks instead.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Local};
use redirects_core::{Action, Requester};
use thiserror::Error;

/// A permission check answered "no".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{requester} may not {action} {resource}: {reason}")]
pub struct PermissionDenied {
    pub requester: String,
    pub resource: String,
    pub action: Action,
    pub reason: String,
}

impl PermissionDenied {
    pub fn new(
        requester: &Requester,
        resource: &str,
        action: Action,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            requester: requester.id.clone(),
            resource: resource.to_string(),
            action,
            reason: reason.into(),
        }
    }
}

/// Answers whether `requester` may perform `action` on `resource`.
///
/// The coordinator calls this before touching anything.  An `Err` means
/// "deny"; the coordinator then stops without side effects.
#[async_trait]
pub trait PermissionChecker: Send + Sync {
    async fn check(
        &self,
        resource: &str,
        action: Action,
        requester: &Requester,
    ) -> Result<(), PermissionDenied>;
}

/// Tells every consumer of the redirects file to discard its cached copy.
///
/// Fire-and-forget: the coordinator calls it once after a successful write
/// and does not wait for consumers to finish reloading.
#[cfg_attr(test, mockall::automock)]
pub trait ReloadNotifier: Send + Sync {
    fn notify_reload(&self);
}

/// Source of the timestamp embedded in backup file names.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the machine's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock frozen at one instant.
///
/// Useful for reproducing same-second backup collisions deterministically.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
