//! Application layer use cases for the redirects store.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure business rules in `redirects-core`) and the infrastructure (files,
//! permission tables, reload channels).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "replace the
//!   redirects file without losing the old one").
//! - **Depend on abstractions** (traits) rather than concrete implementations,
//!   so the infrastructure can be swapped without changing this code.
//!
//! # Sub-modules
//!
//! - **`ports`** – The traits the use case depends on: permission checks,
//!   reload notification, and the clock used to name backups.
//!
//! - **`manage_redirects`** – The persistence coordinator.  `download` reads
//!   the current file; `upload` rotates a backup, validates the candidate,
//!   writes it, and signals a reload.

pub mod manage_redirects;
pub mod ports;
