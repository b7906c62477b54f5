//! Error types for the profile directory.

use std::fmt;

use smol_str::SmolStr;
use thiserror::Error;

/// Fixed notice shown when a new profile is missing required fields.
pub const REQUIRED_FIELDS_NOTICE: &str =
    "Please fill out all required fields: Name, Age, Gender, and Country.";

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read {path}")]
    Io {
        path: SmolStr,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid profile data: {0}")]
    InvalidData(SmolStr),
    #[error("invalid config: {0}")]
    InvalidConfig(SmolStr),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Fields a new profile must carry before it can be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Name,
    Age,
    Gender,
    Country,
}

impl RequiredField {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RequiredField::Name => "Name",
            RequiredField::Age => "Age",
            RequiredField::Gender => "Gender",
            RequiredField::Country => "Country",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rejected profile creation. The notice text never varies with which
/// fields are missing; `missing` carries the detail for callers that want it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill out all required fields: Name, Age, Gender, and Country.")]
pub struct ValidationError {
    pub missing: Vec<RequiredField>,
}
