//! Per-owner profile presentation settings.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::OwnerId;

/// Maximum profile description length, in characters.
pub const DESCRIPTION_MAX: usize = 280;
/// Accent colour reported when the owner has not chosen one.
pub const DEFAULT_ACCENT_COLOR: &str = "#6366f1";

static ACCENT_RE: OnceLock<Regex> = OnceLock::new();

fn accent_regex() -> &'static Regex {
    ACCENT_RE.get_or_init(|| {
        Regex::new("^#[0-9A-Fa-f]{6}$")
            .unwrap_or_else(|error| panic!("accent colour regex failed to compile: {error}"))
    })
}

/// Validation errors for customization input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomizationValidationError {
    /// Description exceeds [`DESCRIPTION_MAX`] characters.
    DescriptionTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// Accent colour is not `#RRGGBB`.
    InvalidAccentColor,
}

impl CustomizationValidationError {
    /// Request field the error refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::DescriptionTooLong { .. } => "description",
            Self::InvalidAccentColor => "accentColor",
        }
    }

    /// Stable machine-readable code for error details.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DescriptionTooLong { .. } => "description_too_long",
            Self::InvalidAccentColor => "invalid_accent_color",
        }
    }
}

impl fmt::Display for CustomizationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DescriptionTooLong { max } => {
                write!(f, "description must be at most {max} characters")
            }
            Self::InvalidAccentColor => {
                write!(f, "accent colour must be a hex colour such as #6366f1")
            }
        }
    }
}

impl std::error::Error for CustomizationValidationError {}

/// Free-text profile description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileDescription(String);

impl ProfileDescription {
    /// Validate and construct a [`ProfileDescription`].
    pub fn new(text: impl Into<String>) -> Result<Self, CustomizationValidationError> {
        Self::from_owned(text.into())
    }

    fn from_owned(text: String) -> Result<Self, CustomizationValidationError> {
        if text.chars().count() > DESCRIPTION_MAX {
            return Err(CustomizationValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            });
        }
        Ok(Self(text))
    }
}

impl AsRef<str> for ProfileDescription {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<ProfileDescription> for String {
    fn from(value: ProfileDescription) -> Self {
        value.0
    }
}

impl TryFrom<String> for ProfileDescription {
    type Error = CustomizationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Hex accent colour in `#RRGGBB` form.
///
/// # Examples
/// ```
/// use linkbio::domain::AccentColor;
///
/// assert!(AccentColor::new("#0F172a").is_ok());
/// assert!(AccentColor::new("red").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccentColor(String);

impl AccentColor {
    /// Validate and construct an [`AccentColor`].
    pub fn new(value: impl Into<String>) -> Result<Self, CustomizationValidationError> {
        Self::from_owned(value.into())
    }

    fn from_owned(value: String) -> Result<Self, CustomizationValidationError> {
        if !accent_regex().is_match(&value) {
            return Err(CustomizationValidationError::InvalidAccentColor);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for AccentColor {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<AccentColor> for String {
    fn from(value: AccentColor) -> Self {
        value.0
    }
}

impl TryFrom<String> for AccentColor {
    type Error = CustomizationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Stored presentation settings for one owner.
///
/// Absent fields mean "use the presentation default".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCustomization {
    /// Owner the settings belong to.
    pub owner_id: OwnerId,
    /// Optional profile description.
    pub description: Option<ProfileDescription>,
    /// Optional accent colour.
    pub accent_color: Option<AccentColor>,
}

impl ProfileCustomization {
    /// Settings with every field unset.
    pub const fn empty(owner_id: OwnerId) -> Self {
        Self {
            owner_id,
            description: None,
            accent_color: None,
        }
    }

    /// Chosen accent colour, or [`DEFAULT_ACCENT_COLOR`].
    pub fn accent_color_or_default(&self) -> &str {
        self.accent_color
            .as_ref()
            .map_or(DEFAULT_ACCENT_COLOR, AsRef::as_ref)
    }
}
