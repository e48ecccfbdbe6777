//! Object namespace boundary for nslink.
//!
//! The link subsystem never owns the objects its links point at. It asks a
//! [`Namespace`] whether groups and objects exist, which group is the root
//! of a domain, and tells it when a group's link table changed so the
//! group's `lastModified` stays current.
//!
//! # Backends
//!
//! - [`InMemoryNamespace`] -- `HashMap`-based namespace for tests and the
//!   bundled server
//!
//! # Rules
//!
//! 1. Existence checks are side-effect free and safe to call concurrently.
//! 2. Deleting a group removes only that group; objects it linked to are
//!    untouched and stay addressable by id.
//! 3. Backend faults are returned as errors, never panics.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{NamespaceError, NamespaceResult};
pub use memory::{DomainRecord, GroupRecord, InMemoryNamespace};
pub use traits::Namespace;
