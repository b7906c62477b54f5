//! Profile records: the raw input shape and the display shape held by the store.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;

pub type ProfileId = u64;

/// Age below which a profile cannot be edited.
pub const ADULT_AGE: i32 = 18;

/// A record as supplied by the external data source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawProfile {
    pub id: ProfileId,
    pub first: String,
    pub last: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub country: String,
    pub description: String,
    pub picture: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Age {
    /// Computed from a date of birth at load time.
    Years(i32),
    /// Typed into the add form, kept verbatim.
    Entered(String),
}

impl Age {
    #[must_use]
    pub fn years(&self) -> Option<i32> {
        match self {
            Age::Years(years) => Some(*years),
            Age::Entered(text) => text.trim().parse().ok(),
        }
    }

    /// Entered text is compared as a number, fractions included. Text that
    /// is not a number never counts as a minor.
    #[must_use]
    pub fn is_minor(&self) -> bool {
        match self {
            Age::Years(years) => *years < ADULT_AGE,
            Age::Entered(text) => text
                .trim()
                .parse::<f64>()
                .is_ok_and(|years| years < f64::from(ADULT_AGE)),
        }
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Age::Years(years) => write!(f, "{years}"),
            Age::Entered(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PictureRef {
    Url(String),
    File(PathBuf),
}

impl fmt::Display for PictureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PictureRef::Url(url) => f.write_str(url),
            PictureRef::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayProfile {
    pub id: ProfileId,
    pub name: String,
    pub age: Age,
    pub gender: String,
    pub country: String,
    pub description: String,
    pub picture: Option<PictureRef>,
}

impl DisplayProfile {
    /// Whether any user-visible field differs from `other`.
    ///
    /// Age takes part in the comparison even though the edit form cannot
    /// change it.
    #[must_use]
    pub fn differs_from(&self, other: &DisplayProfile) -> bool {
        self.name != other.name
            || self.age != other.age
            || self.gender != other.gender
            || self.country != other.country
            || self.description != other.description
    }
}
