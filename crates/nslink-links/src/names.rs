//! Link name validation.
//!
//! A link name is one path component inside its group:
//! - Must be non-empty
//! - Must not contain the path separator `/`
//!
//! Anything else, spaces included, is allowed.

use crate::error::{LinkError, Result};

/// Separator between path components in the namespace.
pub const PATH_SEPARATOR: char = '/';

/// Validate a link name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use nslink_links::names::validate_link_name;
///
/// assert!(validate_link_name("g1").is_ok());
/// assert!(validate_link_name("name with spaces").is_ok());
/// assert!(validate_link_name("").is_err());
/// assert!(validate_link_name("bad/name").is_err());
/// ```
pub fn validate_link_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(LinkError::InvalidName {
            name: name.to_string(),
            reason: "link name must not be empty".into(),
        });
    }

    if name.contains(PATH_SEPARATOR) {
        return Err(LinkError::InvalidName {
            name: name.to_string(),
            reason: format!("must not contain {PATH_SEPARATOR:?}"),
        });
    }

    Ok(())
}
