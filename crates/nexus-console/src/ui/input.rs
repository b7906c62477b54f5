use super::state::{
    apply, cycle_gender, move_form_field, move_selection, picture_files, selected_id,
    set_status,
};
use super::*;

/// Returns `true` when the console should exit.
pub(super) fn handle_key(key: KeyEvent, state: &mut UiState) -> bool {
    if state.notice.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            state.notice = None;
        }
        return false;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    let view = state.directory.state();
    if view.delete_confirm_id().is_some() {
        handle_delete_confirm(key, state);
        return false;
    }
    if view.add_form_visible() {
        handle_add_form_key(key, state);
        return false;
    }
    if view.edit_id().is_some() {
        handle_edit_form_key(key, state);
        return false;
    }
    if state.searching {
        handle_search_key(key, state);
        return false;
    }
    handle_browse_key(key, state)
}

fn is_save_chord(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('s') | KeyCode::Char('S'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn handle_browse_key(key: KeyEvent, state: &mut UiState) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        KeyCode::Up | KeyCode::Char('k') => move_selection(state, -1),
        KeyCode::Down | KeyCode::Char('j') => move_selection(state, 1),
        KeyCode::Home => state.selected = 0,
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(id) = selected_id(state) {
                apply(state, Action::ToggleExpand(id));
            }
        }
        KeyCode::Char('/') => {
            state.searching = true;
        }
        KeyCode::Char('a') | KeyCode::Char('A') => {
            state.form_field = 0;
            state.picture_input.clear();
            apply(state, Action::OpenAddForm);
        }
        KeyCode::Char('e') | KeyCode::Char('E') => start_edit_selected(state),
        KeyCode::Char('d') | KeyCode::Char('D') => {
            if let Some(id) = expanded_selection(state) {
                apply(state, Action::RequestDelete(id));
            }
        }
        KeyCode::Esc => {
            if !state.directory.state().search_text().is_empty() {
                apply(state, Action::SetSearchText(String::new()));
            }
            state.status = None;
        }
        _ => {}
    }
    false
}

/// Edit and delete controls only exist inside the expanded section.
fn expanded_selection(state: &UiState) -> Option<ProfileId> {
    let id = selected_id(state)?;
    (state.directory.state().expanded_id() == Some(id)).then_some(id)
}

fn start_edit_selected(state: &mut UiState) {
    let Some(id) = expanded_selection(state) else {
        return;
    };
    apply(state, Action::StartEdit(id));
    if state.directory.state().edit_id() == Some(id) {
        state.form_field = 0;
        state.status = None;
    } else {
        set_status(state, "Profiles under 18 cannot be edited.", COLOR_AMBER);
    }
}

fn handle_search_key(key: KeyEvent, state: &mut UiState) {
    let mut text = state.directory.state().search_text().to_string();
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            state.searching = false;
            return;
        }
        KeyCode::Backspace => {
            text.pop();
        }
        KeyCode::Char(ch) => text.push(ch),
        _ => return,
    }
    apply(state, Action::SetSearchText(text));
}

fn handle_delete_confirm(key: KeyEvent, state: &mut UiState) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            apply(state, Action::ConfirmDelete);
            set_status(state, "Profile deleted.", COLOR_GREEN);
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            apply(state, Action::CancelDelete);
        }
        _ => {}
    }
}

fn handle_edit_form_key(key: KeyEvent, state: &mut UiState) {
    let rows = EditField::ALL.len();
    if is_save_chord(&key) {
        save_edit(state);
        return;
    }
    match key.code {
        KeyCode::Esc => {
            apply(state, Action::CancelEdit);
            set_status(state, "Edit cancelled.", COLOR_INFO);
        }
        KeyCode::Enter => save_edit(state),
        KeyCode::Tab | KeyCode::Down => move_form_field(state, rows, 1),
        KeyCode::BackTab | KeyCode::Up => move_form_field(state, rows, -1),
        code => {
            let field = EditField::ALL[state.form_field.min(rows - 1)];
            let Some(buffer) = state.directory.state().edit_buffer() else {
                return;
            };
            let current = field.value(buffer);
            let next = if field == EditField::Gender {
                match code {
                    KeyCode::Right => Some(cycle_gender(current, true).to_string()),
                    KeyCode::Left => Some(cycle_gender(current, false).to_string()),
                    _ => None,
                }
            } else {
                edited_text(current, code, |_| true)
            };
            if let Some(value) = next {
                apply(state, Action::EditField(field, value));
            }
        }
    }
}

/// Saving is only offered once the buffer differs from the stored profile.
fn save_edit(state: &mut UiState) {
    if !state.directory.state().save_enabled() {
        return;
    }
    apply(state, Action::SaveEdit);
    set_status(state, "Changes saved.", COLOR_GREEN);
}

fn handle_add_form_key(key: KeyEvent, state: &mut UiState) {
    if is_save_chord(&key) {
        save_new_profile(state);
        return;
    }
    match key.code {
        KeyCode::Esc => {
            state.picture_input.clear();
            apply(state, Action::CancelAdd);
        }
        KeyCode::Tab | KeyCode::Down => move_form_field(state, ADD_FORM_ROWS, 1),
        KeyCode::BackTab | KeyCode::Up => move_form_field(state, ADD_FORM_ROWS, -1),
        KeyCode::Enter if state.form_field == PICTURE_FIELD => {
            let files = picture_files(&state.picture_input);
            if !files.is_empty() {
                apply(state, Action::AttachNewProfilePicture(files));
                set_status(state, "Picture attached.", COLOR_GREEN);
            }
        }
        KeyCode::Enter => save_new_profile(state),
        code if state.form_field == PICTURE_FIELD => {
            if let Some(value) = edited_text(&state.picture_input, code, |_| true) {
                state.picture_input = value;
            }
        }
        code => {
            let field = DraftField::ALL[state.form_field.min(DraftField::ALL.len() - 1)];
            let current = field.value(state.directory.state().new_profile());
            let next = match field {
                DraftField::Gender => match code {
                    KeyCode::Right => Some(cycle_gender(current, true).to_string()),
                    KeyCode::Left => Some(cycle_gender(current, false).to_string()),
                    _ => None,
                },
                DraftField::Age => edited_text(current, code, |ch| ch.is_ascii_digit()),
                _ => edited_text(current, code, |_| true),
            };
            if let Some(value) = next {
                apply(state, Action::EditNewProfileField(field, value));
            }
        }
    }
}

fn save_new_profile(state: &mut UiState) {
    if let Some(id) = apply(state, Action::SaveNewProfile) {
        state.picture_input.clear();
        state.selected = 0;
        set_status(state, &format!("Profile {id} created."), COLOR_GREEN);
    }
}

/// Apply a text-editing key to `current`. Returns `None` when the key does
/// not change the text.
fn edited_text(current: &str, code: KeyCode, accept: impl Fn(char) -> bool) -> Option<String> {
    match code {
        KeyCode::Backspace => {
            let mut text = current.to_string();
            text.pop().map(|_| text)
        }
        KeyCode::Char(ch) if accept(ch) => {
            let mut text = current.to_string();
            text.push(ch);
            Some(text)
        }
        _ => None,
    }
}
