//! Turns raw records from the data source into display profiles.

use std::path::Path;

use chrono::{Datelike, Local};
use tracing::info;

use crate::error::DirectoryError;
use crate::profile::{Age, DisplayProfile, PictureRef, RawProfile};

pub fn read_raw_profiles(path: impl AsRef<Path>) -> Result<Vec<RawProfile>, DirectoryError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
        path: path.display().to_string().into(),
        source,
    })?;
    parse_raw_profiles(&text)
        .map_err(|err| DirectoryError::InvalidData(format!("{}: {err}", path.display()).into()))
}

pub fn parse_raw_profiles(text: &str) -> Result<Vec<RawProfile>, DirectoryError> {
    serde_json::from_str(text).map_err(|err| DirectoryError::InvalidData(err.to_string().into()))
}

/// Derive display profiles using the local clock's calendar year.
#[must_use]
pub fn load_profiles(raw: &[RawProfile]) -> Vec<DisplayProfile> {
    derive_profiles(raw, Local::now().year())
}

#[must_use]
pub fn derive_profiles(raw: &[RawProfile], current_year: i32) -> Vec<DisplayProfile> {
    let profiles: Vec<DisplayProfile> = raw
        .iter()
        .map(|record| DisplayProfile {
            id: record.id,
            name: format!("{} {}", record.first, record.last),
            age: Age::Years(age_in_year(record, current_year)),
            gender: capitalize_first(&record.gender),
            country: record.country.clone(),
            description: record.description.clone(),
            picture: Some(PictureRef::Url(record.picture.clone())),
        })
        .collect();
    info!(count = profiles.len(), current_year, "loaded profiles");
    profiles
}

/// Year difference only; month and day are not considered.
fn age_in_year(record: &RawProfile, current_year: i32) -> i32 {
    current_year - record.dob.year()
}

#[must_use]
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw(id: u64, first: &str, last: &str, dob: (i32, u32, u32), gender: &str) -> RawProfile {
        RawProfile {
            id,
            first: first.to_string(),
            last: last.to_string(),
            dob: NaiveDate::from_ymd_opt(dob.0, dob.1, dob.2).expect("valid date"),
            gender: gender.to_string(),
            country: "Norway".to_string(),
            description: "Test record".to_string(),
            picture: format!("https://example.test/{id}.jpg"),
        }
    }

    #[test]
    fn age_ignores_month_and_day() {
        let records = vec![
            raw(1, "Early", "Bird", (1990, 1, 1), "male"),
            raw(2, "Late", "Owl", (1990, 12, 31), "female"),
        ];
        let profiles = derive_profiles(&records, 2024);
        assert_eq!(profiles[0].age, Age::Years(34));
        assert_eq!(profiles[1].age, Age::Years(34));
    }

    #[test]
    fn derivation_preserves_order_and_joins_names() {
        let records = vec![
            raw(7, "Zed", "Last", (2000, 5, 5), "male"),
            raw(3, "Amy", "First", (1980, 5, 5), "female"),
        ];
        let profiles = derive_profiles(&records, 2024);
        let ids: Vec<_> = profiles.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![7, 3]);
        assert_eq!(profiles[0].name, "Zed Last");
        assert_eq!(
            profiles[1].picture,
            Some(PictureRef::Url("https://example.test/3.jpg".to_string()))
        );
    }

    #[test]
    fn gender_only_first_character_is_uppercased() {
        assert_eq!(capitalize_first("female"), "Female");
        assert_eq!(capitalize_first("rather not say"), "Rather not say");
        assert_eq!(capitalize_first("mALE"), "MALE");
        assert_eq!(capitalize_first("éva"), "Éva");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn parse_rejects_malformed_dates() {
        let err = parse_raw_profiles(
            r#"[{"id": 1, "first": "A", "last": "B", "dob": "not-a-date",
                "gender": "male", "country": "X", "description": "", "picture": ""}]"#,
        )
        .expect_err("bad dob");
        assert!(matches!(err, DirectoryError::InvalidData(_)));
    }

    #[test]
    fn read_reports_missing_file_path() {
        let err = read_raw_profiles("/nonexistent/profiles.json").expect_err("missing file");
        assert!(err.to_string().contains("/nonexistent/profiles.json"));
    }
}
