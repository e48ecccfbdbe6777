//! Foundation types for nslink.
//!
//! Every other nslink crate depends on `nslink-types` for the identifiers
//! that name objects in the namespace and for the timestamp type stamped on
//! groups and links.
//!
//! # Key Types
//!
//! - [`ObjectId`]: UUID identifying any object in the namespace (groups included)
//! - [`GroupId`]: an [`ObjectId`] used in the group position of a request
//! - [`ObjectKind`]: the collection an object lives in (`groups`, `datasets`, ...)
//! - [`Timestamp`]: UTC wall-clock time for `created` / `lastModified`

pub mod error;
pub mod object;
pub mod temporal;

pub use error::TypeError;
pub use object::{GroupId, ObjectId, ObjectKind};
pub use temporal::{now, Timestamp};
