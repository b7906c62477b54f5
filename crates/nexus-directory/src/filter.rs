//! Search derivation over the profile list.

use crate::profile::DisplayProfile;

/// Profiles whose name contains `search` case-insensitively, in list order.
pub fn visible<'a, I>(profiles: I, search: &str) -> Vec<&'a DisplayProfile>
where
    I: IntoIterator<Item = &'a DisplayProfile>,
{
    let needle = search.to_lowercase();
    profiles
        .into_iter()
        .filter(|profile| matches_search(profile, &needle))
        .collect()
}

fn matches_search(profile: &DisplayProfile, lowered: &str) -> bool {
    lowered.is_empty() || profile.name.to_lowercase().contains(lowered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Age;

    fn named(id: u64, name: &str) -> DisplayProfile {
        DisplayProfile {
            id,
            name: name.to_string(),
            age: Age::Years(40),
            gender: "Other".to_string(),
            country: "Chile".to_string(),
            description: String::new(),
            picture: None,
        }
    }

    #[test]
    fn search_is_case_insensitive_substring_in_order() {
        let profiles = vec![
            named(1, "Dan Brown"),
            named(2, "Zoe Kim"),
            named(3, "ANNA Berg"),
            named(4, "Lana Ray"),
        ];
        let ids: Vec<_> = visible(&profiles, "An").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn empty_search_keeps_everything() {
        let profiles = vec![named(5, "B"), named(2, "A")];
        let ids: Vec<_> = visible(&profiles, "").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![5, 2]);
    }

    #[test]
    fn no_match_yields_empty() {
        let profiles = vec![named(1, "Dan Brown")];
        assert!(visible(&profiles, "xyz").is_empty());
    }
}
