//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`AppName`] - Validated application identifier
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use stevedore::core::types::AppName;
//!
//! // Valid constructions
//! let app = AppName::new("cloudprint").unwrap();
//! assert_eq!(app.as_str(), "cloudprint");
//!
//! // Invalid constructions fail at creation time
//! assert!(AppName::new("").is_err());
//! assert!(AppName::new("apps/nested").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid app name: {0}")]
    InvalidAppName(String),
}

/// A validated application identifier.
///
/// An app name is the name of one directory under the applications root.
/// It must be usable verbatim as a single path component:
/// - Cannot be empty
/// - Cannot contain `/` or `\`
/// - Cannot start with `.` (hidden directories are not apps)
/// - Cannot contain ASCII control characters
///
/// # Example
///
/// ```
/// use stevedore::core::types::AppName;
///
/// let app = AppName::new("backend").unwrap();
/// assert_eq!(app.as_str(), "backend");
///
/// assert!(AppName::new(".git").is_err());
/// assert!(AppName::new("a/b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppName(String);

impl AppName {
    /// Create a new validated app name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidAppName` if the name is not a plain
    /// directory name.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidAppName("app name cannot be empty".into()));
        }

        if name.starts_with('.') {
            return Err(TypeError::InvalidAppName(
                "app name cannot start with '.'".into(),
            ));
        }

        if name.contains('/') || name.contains('\\') {
            return Err(TypeError::InvalidAppName(
                "app name cannot contain path separators".into(),
            ));
        }

        if name.chars().any(|c| c.is_ascii_control()) {
            return Err(TypeError::InvalidAppName(
                "app name cannot contain control characters".into(),
            ));
        }

        Ok(())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AppName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AppName> for String {
    fn from(value: AppName) -> Self {
        value.0
    }
}

impl AsRef<str> for AppName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
