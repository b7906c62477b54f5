//! View state for the profile directory and the transitions that change it.
//!
//! Every operation is a single synchronous transition. Operations invoked in a
//! state where they make no sense (saving with no active edit, editing a
//! minor, deleting an id that is already gone) are silent no-ops; the only
//! reported failure is [`ValidationError`] from [`ViewState::save_new_profile`].

use std::path::PathBuf;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::{RequiredField, ValidationError};
use crate::filter;
use crate::profile::{Age, DisplayProfile, PictureRef, ProfileId};

/// Fields the edit form may change. Age is shown read-only and has no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Name,
    Gender,
    Country,
    Description,
}

impl EditField {
    pub const ALL: [EditField; 4] = [
        EditField::Name,
        EditField::Gender,
        EditField::Country,
        EditField::Description,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EditField::Name => "Name",
            EditField::Gender => "Gender",
            EditField::Country => "Country",
            EditField::Description => "Description",
        }
    }

    #[must_use]
    pub fn value(self, profile: &DisplayProfile) -> &str {
        match self {
            EditField::Name => &profile.name,
            EditField::Gender => &profile.gender,
            EditField::Country => &profile.country,
            EditField::Description => &profile.description,
        }
    }

    fn slot(self, profile: &mut DisplayProfile) -> &mut String {
        match self {
            EditField::Name => &mut profile.name,
            EditField::Gender => &mut profile.gender,
            EditField::Country => &mut profile.country,
            EditField::Description => &mut profile.description,
        }
    }
}

/// Text fields of the add form. The picture is attached separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Age,
    Gender,
    Country,
    Description,
}

impl DraftField {
    pub const ALL: [DraftField; 5] = [
        DraftField::Name,
        DraftField::Age,
        DraftField::Gender,
        DraftField::Country,
        DraftField::Description,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DraftField::Name => "Name",
            DraftField::Age => "Age",
            DraftField::Gender => "Gender",
            DraftField::Country => "Country",
            DraftField::Description => "Description",
        }
    }

    #[must_use]
    pub fn value(self, draft: &NewProfileDraft) -> &str {
        match self {
            DraftField::Name => &draft.name,
            DraftField::Age => &draft.age,
            DraftField::Gender => &draft.gender,
            DraftField::Country => &draft.country,
            DraftField::Description => &draft.description,
        }
    }

    fn slot(self, draft: &mut NewProfileDraft) -> &mut String {
        match self {
            DraftField::Name => &mut draft.name,
            DraftField::Age => &mut draft.age,
            DraftField::Gender => &mut draft.gender,
            DraftField::Country => &mut draft.country,
            DraftField::Description => &mut draft.description,
        }
    }
}

/// In-progress fields for a profile that does not exist yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProfileDraft {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub country: String,
    pub description: String,
    pub picture: Option<PictureRef>,
}

impl NewProfileDraft {
    fn missing_fields(&self) -> Vec<RequiredField> {
        [
            (RequiredField::Name, &self.name),
            (RequiredField::Age, &self.age),
            (RequiredField::Gender, &self.gender),
            (RequiredField::Country, &self.country),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EditSession {
    id: ProfileId,
    buffer: DisplayProfile,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    profiles: IndexMap<ProfileId, DisplayProfile>,
    expanded_id: Option<ProfileId>,
    edit: Option<EditSession>,
    delete_confirm_id: Option<ProfileId>,
    add_form_visible: bool,
    new_profile: NewProfileDraft,
    search_text: String,
    save_enabled: bool,
}

impl ViewState {
    /// Build the initial state from loaded profiles. A later duplicate id
    /// replaces the earlier record in place.
    #[must_use]
    pub fn new(profiles: impl IntoIterator<Item = DisplayProfile>) -> Self {
        let mut by_id = IndexMap::new();
        for profile in profiles {
            if let Some(dropped) = by_id.insert(profile.id, profile) {
                warn!(
                    id = dropped.id,
                    name = %dropped.name,
                    "duplicate profile id, earlier record replaced"
                );
            }
        }
        Self {
            profiles: by_id,
            ..Self::default()
        }
    }

    pub fn profiles(&self) -> impl ExactSizeIterator<Item = &DisplayProfile> + '_ {
        self.profiles.values()
    }

    #[must_use]
    pub fn profile(&self, id: ProfileId) -> Option<&DisplayProfile> {
        self.profiles.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    #[must_use]
    pub fn expanded_id(&self) -> Option<ProfileId> {
        self.expanded_id
    }

    #[must_use]
    pub fn edit_id(&self) -> Option<ProfileId> {
        self.edit.as_ref().map(|edit| edit.id)
    }

    #[must_use]
    pub fn edit_buffer(&self) -> Option<&DisplayProfile> {
        self.edit.as_ref().map(|edit| &edit.buffer)
    }

    #[must_use]
    pub fn delete_confirm_id(&self) -> Option<ProfileId> {
        self.delete_confirm_id
    }

    #[must_use]
    pub fn add_form_visible(&self) -> bool {
        self.add_form_visible
    }

    #[must_use]
    pub fn new_profile(&self) -> &NewProfileDraft {
        &self.new_profile
    }

    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    #[must_use]
    pub fn save_enabled(&self) -> bool {
        self.save_enabled
    }

    /// Profiles matching the current search text, in list order.
    #[must_use]
    pub fn visible_profiles(&self) -> Vec<&DisplayProfile> {
        filter::visible(self.profiles.values(), &self.search_text)
    }

    /// Next id for a created profile: one past the largest id, or 1. When
    /// the largest id is `ProfileId::MAX` the smallest unused id is taken.
    #[must_use]
    pub fn next_id(&self) -> ProfileId {
        let Some(max) = self.profiles.keys().max() else {
            return 1;
        };
        max.checked_add(1).unwrap_or_else(|| self.smallest_unused_id())
    }

    fn smallest_unused_id(&self) -> ProfileId {
        (1..=ProfileId::MAX)
            .find(|id| !self.profiles.contains_key(id))
            .unwrap_or(0)
    }

    pub fn toggle_expand(&mut self, id: ProfileId) {
        if self.edit.is_some() {
            debug!(id, "expand ignored while editing");
            return;
        }
        self.expanded_id = if self.expanded_id == Some(id) {
            None
        } else {
            Some(id)
        };
        debug!(expanded = ?self.expanded_id, "toggled expand");
    }

    pub fn start_edit(&mut self, id: ProfileId) {
        let Some(profile) = self.profiles.get(&id) else {
            return;
        };
        if profile.age.is_minor() {
            debug!(id, age = %profile.age, "edit refused for minor");
            return;
        }
        self.edit = Some(EditSession {
            id,
            buffer: profile.clone(),
        });
        self.refresh_save_enabled();
        debug!(id, "edit started");
    }

    pub fn edit_field(&mut self, field: EditField, value: impl Into<String>) {
        let Some(edit) = self.edit.as_mut() else {
            return;
        };
        *field.slot(&mut edit.buffer) = value.into();
        self.refresh_save_enabled();
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
        self.refresh_save_enabled();
    }

    pub fn save_edit(&mut self) {
        let Some(edit) = self.edit.take() else {
            return;
        };
        if let Some(slot) = self.profiles.get_mut(&edit.id) {
            *slot = edit.buffer;
            debug!(id = edit.id, "edit saved");
        }
        self.save_enabled = false;
    }

    pub fn request_delete(&mut self, id: ProfileId) {
        self.delete_confirm_id = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.delete_confirm_id = None;
    }

    pub fn confirm_delete(&mut self) {
        let Some(id) = self.delete_confirm_id.take() else {
            return;
        };
        if self.profiles.shift_remove(&id).is_some() {
            debug!(id, "profile deleted");
            if self.expanded_id == Some(id) {
                self.expanded_id = None;
            }
            self.refresh_save_enabled();
        }
    }

    pub fn open_add_form(&mut self) {
        self.add_form_visible = true;
    }

    pub fn cancel_add(&mut self) {
        self.add_form_visible = false;
        self.new_profile = NewProfileDraft::default();
    }

    pub fn edit_new_profile_field(&mut self, field: DraftField, value: impl Into<String>) {
        *field.slot(&mut self.new_profile) = value.into();
    }

    /// Attach the first uploaded file as the draft's picture. An empty
    /// upload leaves the current picture in place.
    pub fn attach_new_profile_picture(&mut self, files: &[PathBuf]) {
        if let Some(first) = files.first() {
            self.new_profile.picture = Some(PictureRef::File(first.clone()));
        }
    }

    pub fn save_new_profile(&mut self) -> Result<ProfileId, ValidationError> {
        let missing = self.new_profile.missing_fields();
        if !missing.is_empty() {
            debug!(?missing, "new profile rejected");
            return Err(ValidationError { missing });
        }
        let id = self.next_id();
        let draft = std::mem::take(&mut self.new_profile);
        let profile = DisplayProfile {
            id,
            name: draft.name,
            age: Age::Entered(draft.age),
            gender: draft.gender,
            country: draft.country,
            description: draft.description,
            picture: draft.picture,
        };
        self.profiles.shift_insert(0, id, profile);
        self.add_form_visible = false;
        debug!(id, "profile created");
        Ok(id)
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    fn refresh_save_enabled(&mut self) {
        self.save_enabled = match &self.edit {
            Some(edit) => self
                .profiles
                .get(&edit.id)
                .is_some_and(|stored| stored.differs_from(&edit.buffer)),
            None => false,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: ProfileId, name: &str, age: i32) -> DisplayProfile {
        DisplayProfile {
            id,
            name: name.to_string(),
            age: Age::Years(age),
            gender: "Female".to_string(),
            country: "Norway".to_string(),
            description: format!("{name} bio"),
            picture: None,
        }
    }

    fn sample_state() -> ViewState {
        ViewState::new(vec![
            person(1, "Dan Brown", 60),
            person(2, "Zoe Kim", 15),
            person(5, "Anna Berg", 33),
        ])
    }

    fn ids(state: &ViewState) -> Vec<ProfileId> {
        state.profiles().map(|p| p.id).collect()
    }

    fn fill_draft(state: &mut ViewState, name: &str, age: &str, gender: &str, country: &str) {
        state.edit_new_profile_field(DraftField::Name, name);
        state.edit_new_profile_field(DraftField::Age, age);
        state.edit_new_profile_field(DraftField::Gender, gender);
        state.edit_new_profile_field(DraftField::Country, country);
    }

    #[test]
    fn toggle_expand_twice_restores_state() {
        let mut state = sample_state();
        state.toggle_expand(1);
        assert_eq!(state.expanded_id(), Some(1));
        state.toggle_expand(5);
        assert_eq!(state.expanded_id(), Some(5));
        state.toggle_expand(5);
        assert_eq!(state.expanded_id(), None);
    }

    #[test]
    fn toggle_expand_is_ignored_while_editing() {
        let mut state = sample_state();
        state.toggle_expand(1);
        state.start_edit(1);
        state.toggle_expand(5);
        assert_eq!(state.expanded_id(), Some(1));
        state.toggle_expand(1);
        assert_eq!(state.expanded_id(), Some(1));
    }

    #[test]
    fn start_edit_refuses_minors() {
        let mut state = sample_state();
        state.start_edit(2);
        assert_eq!(state.edit_id(), None);
        assert!(state.edit_buffer().is_none());

        state.start_edit(1);
        state.start_edit(2);
        assert_eq!(state.edit_id(), Some(1));
    }

    #[test]
    fn start_edit_does_not_expand() {
        let mut state = sample_state();
        state.start_edit(5);
        assert_eq!(state.edit_id(), Some(5));
        assert_eq!(state.expanded_id(), None);
    }

    #[test]
    fn start_edit_on_unknown_id_is_noop() {
        let mut state = sample_state();
        state.start_edit(42);
        assert_eq!(state.edit_id(), None);
    }

    #[test]
    fn save_enabled_tracks_buffer_divergence() {
        let mut state = sample_state();
        state.start_edit(1);
        assert!(!state.save_enabled());

        state.edit_field(EditField::Country, "Sweden");
        assert!(state.save_enabled());

        state.edit_field(EditField::Country, "Norway");
        assert!(!state.save_enabled());

        state.edit_field(EditField::Description, "New bio");
        assert!(state.save_enabled());
        assert_eq!(state.profile(1).map(|p| p.description.as_str()), Some("Dan Brown bio"));

        state.cancel_edit();
        assert!(!state.save_enabled());
        assert_eq!(state.edit_id(), None);
    }

    #[test]
    fn edit_field_without_edit_is_noop() {
        let mut state = sample_state();
        state.edit_field(EditField::Name, "Nobody");
        assert!(state.edit_buffer().is_none());
        assert!(!state.save_enabled());
    }

    #[test]
    fn save_edit_replaces_whole_record() {
        let mut state = sample_state();
        state.start_edit(5);
        state.edit_field(EditField::Name, "Anna Berg-Lund");
        state.edit_field(EditField::Gender, "Other");
        let buffer = state.edit_buffer().cloned().expect("buffer present");

        state.save_edit();
        assert_eq!(state.profile(5), Some(&buffer));
        assert_eq!(state.edit_id(), None);
        assert!(state.edit_buffer().is_none());
        assert!(!state.save_enabled());
        assert_eq!(ids(&state), vec![1, 2, 5]);
    }

    #[test]
    fn save_edit_without_edit_is_noop() {
        let mut state = sample_state();
        let before: Vec<_> = state.profiles().cloned().collect();
        state.save_edit();
        let after: Vec<_> = state.profiles().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut state = sample_state();
        state.request_delete(2);
        assert_eq!(state.delete_confirm_id(), Some(2));
        assert_eq!(state.len(), 3);

        state.cancel_delete();
        assert_eq!(state.delete_confirm_id(), None);
        assert_eq!(state.len(), 3);

        state.request_delete(2);
        state.confirm_delete();
        assert_eq!(ids(&state), vec![1, 5]);
        assert_eq!(state.delete_confirm_id(), None);
    }

    #[test]
    fn confirm_delete_of_missing_id_is_noop() {
        let mut state = sample_state();
        state.request_delete(5);
        state.confirm_delete();
        state.request_delete(5);
        state.confirm_delete();
        assert_eq!(ids(&state), vec![1, 2]);
        state.confirm_delete();
        assert_eq!(ids(&state), vec![1, 2]);
    }

    #[test]
    fn confirm_delete_clears_expansion_of_removed_profile() {
        let mut state = sample_state();
        state.toggle_expand(1);
        state.request_delete(1);
        state.confirm_delete();
        assert_eq!(state.expanded_id(), None);
    }

    #[test]
    fn deleting_profile_under_edit_disables_save() {
        let mut state = sample_state();
        state.start_edit(1);
        state.edit_field(EditField::Country, "Peru");
        assert!(state.save_enabled());

        state.request_delete(1);
        state.confirm_delete();
        assert!(state.profile(1).is_none());
        assert_eq!(state.edit_id(), Some(1));
        assert!(!state.save_enabled());

        state.edit_field(EditField::Country, "Chile");
        assert!(!state.save_enabled());
    }

    #[test]
    fn save_new_profile_prepends_with_next_id() {
        let mut state = sample_state();
        state.open_add_form();
        fill_draft(&mut state, "Ann", "30", "Female", "Norway");
        let id = state.save_new_profile().expect("valid draft");

        assert_eq!(id, 6);
        assert_eq!(ids(&state), vec![6, 1, 2, 5]);
        let created = state.profile(6).expect("created profile");
        assert_eq!(created.age, Age::Entered("30".to_string()));
        assert_eq!(created.description, "");
        assert!(!state.add_form_visible());
        assert_eq!(state.new_profile(), &NewProfileDraft::default());
    }

    #[test]
    fn save_new_profile_rejects_missing_fields_without_mutation() {
        for blank in DraftField::ALL.into_iter().take(4) {
            let mut state = sample_state();
            state.open_add_form();
            fill_draft(&mut state, "Ann", "30", "Female", "Norway");
            state.edit_new_profile_field(blank, "");

            let draft_before = state.new_profile().clone();
            let err = state.save_new_profile().expect_err("missing field");
            assert_eq!(err.missing.len(), 1);
            assert_eq!(ids(&state), vec![1, 2, 5]);
            assert!(state.add_form_visible());
            assert_eq!(state.new_profile(), &draft_before);
        }
    }

    #[test]
    fn first_profile_in_empty_directory_gets_id_one() {
        let mut state = ViewState::default();
        fill_draft(&mut state, "Solo", "22", "Male", "Peru");
        assert_eq!(state.save_new_profile(), Ok(1));
    }

    #[test]
    fn next_id_uses_maximum_not_last() {
        let state = ViewState::new(vec![person(9, "A", 30), person(3, "B", 30)]);
        assert_eq!(state.next_id(), 10);
    }

    #[test]
    fn next_id_after_max_id_takes_smallest_unused() {
        let mut state = ViewState::new(vec![
            person(ProfileId::MAX, "Last", 40),
            person(1, "First", 40),
        ]);
        assert_eq!(state.next_id(), 2);

        fill_draft(&mut state, "Ola Nordmann", "30", "Male", "Norway");
        assert_eq!(state.save_new_profile(), Ok(2));
        assert_eq!(ids(&state), vec![2, ProfileId::MAX, 1]);
    }

    #[test]
    fn duplicate_ids_keep_first_position_and_last_record() {
        let state = ViewState::new(vec![
            person(1, "Dan Brown", 60),
            person(2, "Zoe Kim", 15),
            person(1, "Dan Green", 61),
        ]);
        assert_eq!(ids(&state), vec![1, 2]);
        assert_eq!(state.profile(1).map(|p| p.name.as_str()), Some("Dan Green"));
    }

    #[test]
    fn created_profile_with_minor_age_cannot_be_edited() {
        let mut state = sample_state();
        fill_draft(&mut state, "Kid", "12", "Other", "Chile");
        let id = state.save_new_profile().expect("valid draft");
        state.start_edit(id);
        assert_eq!(state.edit_id(), None);
    }

    #[test]
    fn picture_upload_keeps_first_file() {
        let mut state = sample_state();
        state.attach_new_profile_picture(&[PathBuf::from("a.png"), PathBuf::from("b.png")]);
        assert_eq!(
            state.new_profile().picture,
            Some(PictureRef::File(PathBuf::from("a.png")))
        );
        state.attach_new_profile_picture(&[]);
        assert_eq!(
            state.new_profile().picture,
            Some(PictureRef::File(PathBuf::from("a.png")))
        );
    }

    #[test]
    fn cancel_add_resets_draft() {
        let mut state = sample_state();
        state.open_add_form();
        fill_draft(&mut state, "Ann", "30", "Female", "Norway");
        state.cancel_add();
        assert!(!state.add_form_visible());
        assert_eq!(state.new_profile(), &NewProfileDraft::default());
    }

    #[test]
    fn search_text_does_not_touch_profiles() {
        let mut state = sample_state();
        state.set_search_text("an");
        let visible: Vec<_> = state.visible_profiles().iter().map(|p| p.id).collect();
        assert_eq!(visible, vec![1, 5]);
        assert_eq!(state.len(), 3);
        state.set_search_text("");
        assert_eq!(state.visible_profiles().len(), 3);
    }
}
