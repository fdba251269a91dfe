//! Link records and their value objects.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::{OwnerId, owner::Owned};

/// Maximum title length, in characters.
pub const LINK_TITLE_MAX: usize = 100;
/// Maximum URL length, in characters.
pub const LINK_URL_MAX: usize = 2048;

/// Validation errors for link input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkValidationError {
    /// Link id is empty or padded with whitespace.
    InvalidId,
    /// Title is empty once trimmed.
    EmptyTitle,
    /// Title exceeds the maximum length.
    TitleTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// URL is empty once trimmed.
    EmptyUrl,
    /// URL exceeds the maximum length.
    UrlTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// URL is not an absolute URL.
    MalformedUrl,
    /// URL scheme is neither `http` nor `https`.
    UnsupportedScheme {
        /// Scheme found in the input.
        scheme: String,
    },
}

impl LinkValidationError {
    /// Request field the error refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::EmptyUrl
            | Self::UrlTooLong { .. }
            | Self::MalformedUrl
            | Self::UnsupportedScheme { .. } => "url",
        }
    }

    /// Stable machine-readable code for error details.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_link_id",
            Self::EmptyTitle => "empty_title",
            Self::TitleTooLong { .. } => "title_too_long",
            Self::EmptyUrl => "empty_url",
            Self::UrlTooLong { .. } => "url_too_long",
            Self::MalformedUrl => "malformed_url",
            Self::UnsupportedScheme { .. } => "unsupported_scheme",
        }
    }
}

impl fmt::Display for LinkValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "link id must be a non-empty token"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::EmptyUrl => write!(f, "url must not be empty"),
            Self::UrlTooLong { max } => write!(f, "url must be at most {max} characters"),
            Self::MalformedUrl => write!(f, "url must be an absolute URL"),
            Self::UnsupportedScheme { scheme } => {
                write!(f, "url scheme must be http or https, found {scheme}")
            }
        }
    }
}

impl std::error::Error for LinkValidationError {}

/// Registry-assigned opaque link identifier.
///
/// Client-supplied ids are accepted as long as they are well-formed tokens;
/// whether they resolve to a record is a separate question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LinkId(String);

impl LinkId {
    /// Parse a link id received from a caller.
    pub fn new(id: impl Into<String>) -> Result<Self, LinkValidationError> {
        Self::from_owned(id.into())
    }

    /// Mint a fresh identifier for a new link.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    fn from_owned(id: String) -> Result<Self, LinkValidationError> {
        if id.is_empty() || id.trim() != id {
            return Err(LinkValidationError::InvalidId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for LinkId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<LinkId> for String {
    fn from(value: LinkId) -> Self {
        value.0
    }
}

impl TryFrom<String> for LinkId {
    type Error = LinkValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Link title, stored exactly as provided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LinkTitle(String);

impl LinkTitle {
    /// Validate and construct a [`LinkTitle`].
    pub fn new(title: impl Into<String>) -> Result<Self, LinkValidationError> {
        Self::from_owned(title.into())
    }

    fn from_owned(title: String) -> Result<Self, LinkValidationError> {
        if title.trim().is_empty() {
            return Err(LinkValidationError::EmptyTitle);
        }
        if title.chars().count() > LINK_TITLE_MAX {
            return Err(LinkValidationError::TitleTooLong {
                max: LINK_TITLE_MAX,
            });
        }
        Ok(Self(title))
    }
}

impl AsRef<str> for LinkTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<LinkTitle> for String {
    fn from(value: LinkTitle) -> Self {
        value.0
    }
}

impl TryFrom<String> for LinkTitle {
    type Error = LinkValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Absolute `http`/`https` link target.
///
/// The original text is kept; normalisation (such as adding a missing
/// scheme) happens in the presentation layer before the registry sees it.
///
/// # Examples
/// ```
/// use linkbio::domain::LinkUrl;
///
/// assert!(LinkUrl::new("https://example.com/a?b=c").is_ok());
/// assert!(LinkUrl::new("example.com").is_err());
/// assert!(LinkUrl::new("ftp://example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LinkUrl(String);

impl LinkUrl {
    /// Validate and construct a [`LinkUrl`].
    pub fn new(url: impl Into<String>) -> Result<Self, LinkValidationError> {
        Self::from_owned(url.into())
    }

    fn from_owned(url: String) -> Result<Self, LinkValidationError> {
        if url.trim().is_empty() {
            return Err(LinkValidationError::EmptyUrl);
        }
        if url.chars().count() > LINK_URL_MAX {
            return Err(LinkValidationError::UrlTooLong { max: LINK_URL_MAX });
        }
        let parsed = Url::parse(url.trim()).map_err(|_| LinkValidationError::MalformedUrl)?;
        match parsed.scheme() {
            "http" | "https" => Ok(Self(url)),
            other => Err(LinkValidationError::UnsupportedScheme {
                scheme: other.to_owned(),
            }),
        }
    }
}

impl AsRef<str> for LinkUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<LinkUrl> for String {
    fn from(value: LinkUrl) -> Self {
        value.0
    }
}

impl TryFrom<String> for LinkUrl {
    type Error = LinkValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Display position key; ascending keys give display order.
///
/// Two schemes write keys: creation uses wall-clock milliseconds (recency),
/// reordering uses 0-based positions (index). Mixing them means a link
/// created after a reorder sorts after every reordered link.
///
/// Storage raises a new recency key above the owner's highest key (see
/// [`OrderKey::placed_after`]), so links created within one millisecond
/// still list in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderKey(i64);

impl OrderKey {
    /// Wrap a raw key value.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Recency-scheme key for a link created at `now`.
    pub fn recency(now: DateTime<Utc>) -> Self {
        Self(now.timestamp_millis())
    }

    /// This key, raised to one past `highest` when it would not sort after it.
    #[must_use]
    pub fn placed_after(self, highest: Option<Self>) -> Self {
        match highest {
            Some(highest) if highest.0 >= self.0 => Self(highest.0.saturating_add(1)),
            _ => self,
        }
    }

    /// Index-scheme key for the given position.
    pub fn index(position: usize) -> Self {
        Self(i64::try_from(position).unwrap_or(i64::MAX))
    }

    /// Raw key value.
    pub const fn value(self) -> i64 {
        self.0
    }
}

/// A link owned by one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    /// Immutable identifier.
    pub id: LinkId,
    /// Owner holding the link.
    pub owner_id: OwnerId,
    /// Display title.
    pub title: LinkTitle,
    /// Target URL.
    pub url: LinkUrl,
    /// Display position key.
    pub order: OrderKey,
}

impl Owned for LinkRecord {
    fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }
}

/// Sort records into display order: ascending key, ties broken by id.
pub fn sort_for_display(records: &mut [LinkRecord]) {
    records.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
}
