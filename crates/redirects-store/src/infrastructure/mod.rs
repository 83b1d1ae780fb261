//! Infrastructure layer for the redirects store.
//!
//! Contains the adapters behind the application ports: file-system storage
//! and configuration, the role-based permission table, and the reload
//! notification channel.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `redirects_core`, but MUST NOT be imported by the domain layer.

pub mod permissions;
pub mod reload;
pub mod storage;
