//! Dispatching store: applies [`Action`]s to a [`ViewState`] and notifies
//! subscribers after each applied transition.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::profile::{DisplayProfile, ProfileId};
use crate::state::{DraftField, EditField, ViewState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ToggleExpand(ProfileId),
    StartEdit(ProfileId),
    EditField(EditField, String),
    CancelEdit,
    SaveEdit,
    RequestDelete(ProfileId),
    CancelDelete,
    ConfirmDelete,
    OpenAddForm,
    CancelAdd,
    EditNewProfileField(DraftField, String),
    AttachNewProfilePicture(Vec<PathBuf>),
    SaveNewProfile,
    SetSearchText(String),
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::ToggleExpand(_) => "toggle_expand",
            Action::StartEdit(_) => "start_edit",
            Action::EditField(..) => "edit_field",
            Action::CancelEdit => "cancel_edit",
            Action::SaveEdit => "save_edit",
            Action::RequestDelete(_) => "request_delete",
            Action::CancelDelete => "cancel_delete",
            Action::ConfirmDelete => "confirm_delete",
            Action::OpenAddForm => "open_add_form",
            Action::CancelAdd => "cancel_add",
            Action::EditNewProfileField(..) => "edit_new_profile_field",
            Action::AttachNewProfilePicture(_) => "attach_new_profile_picture",
            Action::SaveNewProfile => "save_new_profile",
            Action::SetSearchText(_) => "set_search_text",
        }
    }
}

/// Apply one action to the state.
///
/// Returns the id of a newly created profile for [`Action::SaveNewProfile`].
pub fn reduce(state: &mut ViewState, action: Action) -> Result<Option<ProfileId>, ValidationError> {
    match action {
        Action::ToggleExpand(id) => state.toggle_expand(id),
        Action::StartEdit(id) => state.start_edit(id),
        Action::EditField(field, value) => state.edit_field(field, value),
        Action::CancelEdit => state.cancel_edit(),
        Action::SaveEdit => state.save_edit(),
        Action::RequestDelete(id) => state.request_delete(id),
        Action::CancelDelete => state.cancel_delete(),
        Action::ConfirmDelete => state.confirm_delete(),
        Action::OpenAddForm => state.open_add_form(),
        Action::CancelAdd => state.cancel_add(),
        Action::EditNewProfileField(field, value) => state.edit_new_profile_field(field, value),
        Action::AttachNewProfilePicture(files) => state.attach_new_profile_picture(&files),
        Action::SaveNewProfile => return state.save_new_profile().map(Some),
        Action::SetSearchText(text) => state.set_search_text(text),
    }
    Ok(None)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ViewState)>;

/// Owns the view state and fans out change notifications.
pub struct Directory {
    state: ViewState,
    revision: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Directory")
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Directory {
    #[must_use]
    pub fn new(profiles: impl IntoIterator<Item = DisplayProfile>) -> Self {
        Self::from_state(ViewState::new(profiles))
    }

    #[must_use]
    pub fn from_state(state: ViewState) -> Self {
        Self {
            state,
            revision: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Incremented after every transition that reached subscribers.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ViewState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Apply `action`. A validation failure leaves the state untouched and
    /// does not notify subscribers.
    pub fn dispatch(&mut self, action: Action) -> Result<Option<ProfileId>, ValidationError> {
        let name = action.name();
        let outcome = reduce(&mut self.state, action);
        match &outcome {
            Ok(_) => {
                self.revision += 1;
                debug!(action = name, revision = self.revision, "dispatched");
                for (_, listener) in &mut self.listeners {
                    listener(&self.state);
                }
            }
            Err(err) => warn!(action = name, missing = ?err.missing, "action rejected"),
        }
        outcome
    }
}
