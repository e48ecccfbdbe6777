//! Link resource management for nslink.
//!
//! Groups hold named links to other objects. This crate stores those links,
//! resolves names to links, pages through a group's links in name order,
//! and applies create/replace/delete requests with a well-defined tombstone
//! state.
//!
//! # Architecture
//!
//! - **Hard links** name an object by id. The target must exist when the
//!   link is written.
//! - **Soft links** carry a path string that is stored as given.
//! - **Tombstones** remember that a name was deleted, so a read can answer
//!   "gone" instead of "not found". A later put revives the name.
//! - **Put is an upsert** and reports success every time its checks pass;
//!   remove needs an active link.
//!
//! # Modules
//!
//! - [`error`]: [`LinkError`] and its [`ErrorKind`] classification
//! - [`types`]: [`Link`], [`LinkSpec`], [`LinkPayload`], outcome enums
//! - [`names`]: link name validation
//! - [`resolver`]: [`LinkResolver`], name and target resolution
//! - [`store`]: [`LinkStore`], per-group link tables
//! - [`cursor`]: keyset pagination with [`PageRequest`], [`LinkPage`], [`LinkCursor`]
//! - [`controller`]: [`LinkController`], request-level operations

pub mod controller;
pub mod cursor;
pub mod error;
pub mod names;
pub mod resolver;
pub mod store;
mod table;
pub mod types;

pub use controller::LinkController;
pub use cursor::{fetch_page, LinkCursor, LinkPage, PageRequest};
pub use error::{ErrorKind, LinkError, Result};
pub use names::validate_link_name;
pub use resolver::LinkResolver;
pub use store::{LinkStore, LinkWrite};
pub use types::{
    Link, LinkClass, LinkPayload, LinkSpec, LinkTarget, PutOutcome, RemoveOutcome, Resolution,
    SlotState, TargetValidation,
};
