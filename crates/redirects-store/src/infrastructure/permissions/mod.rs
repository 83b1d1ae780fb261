//! Role-based permission checks backed by the `[access]` config section.
//!
//! Each requester id maps to one role; each role grants a set of actions.
//! Anything not granted is denied, including requesters that have no role and
//! resources other than `"redirects"`.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use redirects_core::{Action, Requester, REDIRECTS_RESOURCE};
use tracing::debug;

use crate::application::ports::{PermissionChecker, PermissionDenied};
use crate::infrastructure::storage::config::AccessConfig;

/// In-memory [`PermissionChecker`] built from an [`AccessConfig`].
#[derive(Debug, Clone, Default)]
pub struct RolePermissions {
    roles: HashMap<String, HashSet<Action>>,
    requesters: HashMap<String, String>,
}

impl RolePermissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `actions` to `role`, adding to anything already granted.
    pub fn grant(mut self, role: impl Into<String>, actions: &[Action]) -> Self {
        self.roles
            .entry(role.into())
            .or_default()
            .extend(actions.iter().copied());
        self
    }

    /// Assigns `role` to the requester with id `requester`.
    pub fn assign(mut self, requester: impl Into<String>, role: impl Into<String>) -> Self {
        self.requesters.insert(requester.into(), role.into());
        self
    }

    /// Returns the role assigned to `requester`, if any.
    pub fn role_of(&self, requester: &Requester) -> Option<&str> {
        self.requesters.get(&requester.id).map(String::as_str)
    }
}

impl From<&AccessConfig> for RolePermissions {
    fn from(cfg: &AccessConfig) -> Self {
        let roles = cfg
            .roles
            .iter()
            .map(|(role, actions)| (role.clone(), actions.iter().copied().collect()))
            .collect();
        Self {
            roles,
            requesters: cfg.requesters.clone(),
        }
    }
}

#[async_trait]
impl PermissionChecker for RolePermissions {
    async fn check(
        &self,
        resource: &str,
        action: Action,
        requester: &Requester,
    ) -> Result<(), PermissionDenied> {
        if resource != REDIRECTS_RESOURCE {
            return Err(PermissionDenied::new(
                requester,
                resource,
                action,
                "unknown resource",
            ));
        }

        let Some(role) = self.role_of(requester) else {
            return Err(PermissionDenied::new(
                requester,
                resource,
                action,
                "no role assigned",
            ));
        };

        let granted = self
            .roles
            .get(role)
            .is_some_and(|actions| actions.contains(&action));
        if !granted {
            return Err(PermissionDenied::new(
                requester,
                resource,
                action,
                format!("role {role} does not grant {action}"),
            ));
        }

        debug!(requester = %requester, role, %action, "permission granted");
        Ok(())
    }
}
