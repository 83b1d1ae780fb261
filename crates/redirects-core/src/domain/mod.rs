//! Domain entities for the redirects store.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain** (or "entities" layer).  Domain code:
//!
//! - Contains the core business rules of the application.
//! - Has **no** imports from OS APIs, file systems, or async runtimes.
//! - Can be compiled and tested on any platform without any external setup.
//!
//! Code in outer layers (application, infrastructure, CLI) depends on the
//! domain, but the domain never depends on them.

/// Permission vocabulary: the resource name, actions, and requester identity.
pub mod access;

/// Naming of the current and backup configuration files.
pub mod backup;

/// Redirect rules and rule lists, the core domain concept.
///
/// See [`rule::RedirectSet`] for the main type.
pub mod rule;

/// Structural validation of candidate rule lists.
pub mod validate;
