//! Owner identity supplied by the external identity provider.
//!
//! The registry never mints or rewrites owner identifiers. It only checks
//! that a value is usable as an opaque key and that a caller holds one
//! before any write.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Error;

/// Maximum accepted length of an owner identifier, in characters.
pub const OWNER_ID_MAX: usize = 255;

/// Validation errors returned by [`OwnerId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerIdValidationError {
    /// The identifier is empty.
    Empty,
    /// The identifier contains whitespace.
    ContainsWhitespace,
    /// The identifier exceeds [`OWNER_ID_MAX`] characters.
    TooLong {
        /// Maximum permitted length.
        max: usize,
    },
}

impl fmt::Display for OwnerIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "owner id must not be empty"),
            Self::ContainsWhitespace => write!(f, "owner id must not contain whitespace"),
            Self::TooLong { max } => write!(f, "owner id must be at most {max} characters"),
        }
    }
}

impl std::error::Error for OwnerIdValidationError {}

/// Opaque, externally issued account identifier.
///
/// # Examples
/// ```
/// use linkbio::domain::OwnerId;
///
/// let owner = OwnerId::new("user_2abc").expect("valid owner id");
/// assert_eq!(owner.as_ref(), "user_2abc");
/// assert!(OwnerId::new("has space").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerId(String);

impl OwnerId {
    /// Validate and construct an [`OwnerId`].
    pub fn new(id: impl Into<String>) -> Result<Self, OwnerIdValidationError> {
        Self::from_owned(id.into())
    }

    fn from_owned(id: String) -> Result<Self, OwnerIdValidationError> {
        if id.is_empty() {
            return Err(OwnerIdValidationError::Empty);
        }
        if id.chars().any(char::is_whitespace) {
            return Err(OwnerIdValidationError::ContainsWhitespace);
        }
        if id.chars().count() > OWNER_ID_MAX {
            return Err(OwnerIdValidationError::TooLong { max: OWNER_ID_MAX });
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for OwnerId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<OwnerId> for String {
    fn from(value: OwnerId) -> Self {
        value.0
    }
}

impl TryFrom<String> for OwnerId {
    type Error = OwnerIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Identity of the caller for a single request.
///
/// Built by inbound adapters from whatever the identity provider verified.
/// Anonymous contexts may read public data but every write calls
/// [`OwnerContext::require`] first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerContext(Option<OwnerId>);

impl OwnerContext {
    /// Context for a caller with no verified identity.
    pub const fn anonymous() -> Self {
        Self(None)
    }

    /// Context for a verified owner.
    pub const fn verified(owner_id: OwnerId) -> Self {
        Self(Some(owner_id))
    }

    /// The verified owner, if present.
    pub fn owner_id(&self) -> Option<&OwnerId> {
        self.0.as_ref()
    }

    /// Return the verified owner or fail with [`super::ErrorCode::Unauthorized`].
    pub fn require(&self) -> Result<&OwnerId, Error> {
        self.0
            .as_ref()
            .ok_or_else(|| Error::unauthorized("authentication required"))
    }
}

impl From<Option<OwnerId>> for OwnerContext {
    fn from(value: Option<OwnerId>) -> Self {
        Self(value)
    }
}

/// Records keyed by an owner.
pub trait Owned {
    /// The owner holding the record.
    fn owner_id(&self) -> &OwnerId;
}

/// Authorisation predicate shared by every mutating operation.
pub fn is_owned_by<R: Owned + ?Sized>(record: &R, caller: &OwnerId) -> bool {
    record.owner_id() == caller
}
