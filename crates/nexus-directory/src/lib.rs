//! In-memory profile directory.
//!
//! Loads raw profile records once, then manages the view state of a
//! searchable, expandable list with local create/edit/delete. Nothing is
//! persisted; every change lives in the [`ViewState`] owned by a
//! [`Directory`].

pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod profile;
pub mod state;
pub mod store;

pub use config::NexusConfig;
pub use error::{DirectoryError, RequiredField, ValidationError, REQUIRED_FIELDS_NOTICE};
pub use profile::{Age, DisplayProfile, PictureRef, ProfileId, RawProfile};
pub use state::{DraftField, EditField, NewProfileDraft, ViewState};
pub use store::{Action, Directory, SubscriptionId};
