//! Public handles and their availability outcomes.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::OwnerId;

/// Minimum handle length, in characters.
pub const HANDLE_MIN: usize = 3;
/// Maximum handle length, in characters.
pub const HANDLE_MAX: usize = 30;

static HANDLE_RE: OnceLock<Regex> = OnceLock::new();

fn handle_regex() -> &'static Regex {
    HANDLE_RE.get_or_init(|| {
        // Length is enforced separately so the reason reported matches the first failure.
        Regex::new("^[A-Za-z0-9_-]+$")
            .unwrap_or_else(|error| panic!("handle regex failed to compile: {error}"))
    })
}

/// Validation errors returned by [`Handle::new`].
///
/// The `Display` output is shown to end users verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleValidationError {
    /// Characters outside `[A-Za-z0-9_-]`.
    InvalidCharacters,
    /// Length outside `HANDLE_MIN..=HANDLE_MAX`.
    InvalidLength,
}

impl HandleValidationError {
    /// Stable machine-readable code for error details.
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidCharacters => "invalid_handle_characters",
            Self::InvalidLength => "invalid_handle_length",
        }
    }
}

impl fmt::Display for HandleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacters => write!(
                f,
                "Username can only contain letters, numbers, hyphens, and underscores"
            ),
            Self::InvalidLength => write!(
                f,
                "Username must be between {HANDLE_MIN} and {HANDLE_MAX} characters"
            ),
        }
    }
}

impl std::error::Error for HandleValidationError {}

/// Globally unique, case-sensitive public handle.
///
/// # Examples
/// ```
/// use linkbio::domain::{Handle, HandleValidationError};
///
/// assert!(Handle::new("ada_l").is_ok());
/// assert_eq!(Handle::new("ab"), Err(HandleValidationError::InvalidLength));
/// assert_eq!(Handle::new("a b"), Err(HandleValidationError::InvalidCharacters));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Handle(String);

impl Handle {
    /// Validate and construct a [`Handle`].
    ///
    /// The character set is checked before the length.
    pub fn new(handle: impl Into<String>) -> Result<Self, HandleValidationError> {
        Self::from_owned(handle.into())
    }

    fn from_owned(handle: String) -> Result<Self, HandleValidationError> {
        if !handle_regex().is_match(&handle) {
            return Err(HandleValidationError::InvalidCharacters);
        }
        let length = handle.chars().count();
        if !(HANDLE_MIN..=HANDLE_MAX).contains(&length) {
            return Err(HandleValidationError::InvalidLength);
        }
        Ok(Self(handle))
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Handle> for String {
    fn from(value: Handle) -> Self {
        value.0
    }
}

impl TryFrom<String> for Handle {
    type Error = HandleValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Binding between an owner and the handle it claimed.
///
/// At most one record exists per owner and at most one per handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsernameRecord {
    /// Owner holding the handle.
    pub owner_id: OwnerId,
    /// Claimed handle.
    pub handle: Handle,
}

/// Message shown when another owner already holds a handle.
pub const HANDLE_TAKEN_MESSAGE: &str = "Username is already taken";

/// Outcome category of an availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    /// Free to claim.
    Available,
    /// Held by another owner.
    Taken,
    /// Already the caller's own handle; claiming it again is a no-op.
    Current,
    /// Fails format or length validation.
    Invalid,
}

/// Result of checking whether a candidate handle can be claimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleAvailability {
    /// Outcome category.
    pub status: AvailabilityStatus,
    /// Display-ready explanation when the handle cannot be claimed fresh.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl HandleAvailability {
    /// The candidate is free.
    pub const fn available() -> Self {
        Self {
            status: AvailabilityStatus::Available,
            reason: None,
        }
    }

    /// Another owner holds the candidate.
    pub fn taken() -> Self {
        Self {
            status: AvailabilityStatus::Taken,
            reason: Some(HANDLE_TAKEN_MESSAGE.to_owned()),
        }
    }

    /// The candidate is the caller's current handle.
    pub const fn current() -> Self {
        Self {
            status: AvailabilityStatus::Current,
            reason: None,
        }
    }

    /// The candidate failed validation.
    pub fn invalid(error: HandleValidationError) -> Self {
        Self {
            status: AvailabilityStatus::Invalid,
            reason: Some(error.to_string()),
        }
    }

    /// Whether the candidate may be claimed as a new handle.
    pub fn is_available(&self) -> bool {
        self.status == AvailabilityStatus::Available
    }
}

/// Stable public identity of an owner: the claimed handle, or the raw owner
/// id when no handle has been claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicSlug {
    /// The owner's claimed handle.
    Handle(Handle),
    /// Fallback to the opaque owner identifier.
    OwnerId(OwnerId),
}

impl PublicSlug {
    /// Borrow the slug text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Handle(handle) => handle.as_ref(),
            Self::OwnerId(owner_id) => owner_id.as_ref(),
        }
    }

    /// Whether the slug is a claimed handle.
    pub const fn is_handle(&self) -> bool {
        matches!(self, Self::Handle(_))
    }
}

impl fmt::Display for PublicSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abc")]
    #[case("Ada_Lovelace-1815")]
    #[case("___")]
    #[case("a23456789012345678901234567890")]
    fn accepts_valid_handles(#[case] raw: &str) {
        assert_eq!(Handle::new(raw).expect("valid handle").as_ref(), raw);
    }

    #[rstest]
    #[case("", HandleValidationError::InvalidCharacters)]
    #[case("ab", HandleValidationError::InvalidLength)]
    #[case("a234567890123456789012345678901", HandleValidationError::InvalidLength)]
    #[case("ada.lovelace", HandleValidationError::InvalidCharacters)]
    #[case("héllo", HandleValidationError::InvalidCharacters)]
    #[case("a!", HandleValidationError::InvalidCharacters)]
    fn rejects_invalid_handles(#[case] raw: &str, #[case] expected: HandleValidationError) {
        assert_eq!(Handle::new(raw), Err(expected));
    }

    #[rstest]
    fn reasons_are_display_ready() {
        assert_eq!(
            HandleValidationError::InvalidCharacters.to_string(),
            "Username can only contain letters, numbers, hyphens, and underscores"
        );
        assert_eq!(
            HandleValidationError::InvalidLength.to_string(),
            "Username must be between 3 and 30 characters"
        );
        assert_eq!(
            HandleAvailability::taken().reason.as_deref(),
            Some("Username is already taken")
        );
    }

    #[rstest]
    fn only_available_status_is_claimable() {
        assert!(HandleAvailability::available().is_available());
        assert!(!HandleAvailability::current().is_available());
        assert!(!HandleAvailability::taken().is_available());
        assert!(!HandleAvailability::invalid(HandleValidationError::InvalidLength).is_available());
    }

    #[rstest]
    fn public_slug_exposes_text() {
        let handle = PublicSlug::Handle(Handle::new("ada").expect("valid"));
        let owner = PublicSlug::OwnerId(OwnerId::new("user_1").expect("valid"));
        assert_eq!(handle.as_str(), "ada");
        assert!(handle.is_handle());
        assert_eq!(owner.to_string(), "user_1");
        assert!(!owner.is_handle());
    }
}
