use super::*;

pub(super) fn set_status(state: &mut UiState, text: &str, color: Color) {
    state.status = Some(StatusLine {
        text: text.to_string(),
        style: Style::default().fg(color),
    });
}

/// Dispatch into the store, turning a validation failure into the blocking
/// notice.
pub(super) fn apply(state: &mut UiState, action: Action) -> Option<ProfileId> {
    let outcome = match state.directory.dispatch(action) {
        Ok(created) => created,
        Err(err) => {
            state.notice = Some(err.to_string());
            None
        }
    };
    clamp_selection(state);
    outcome
}

pub(super) fn selected_profile(state: &UiState) -> Option<&DisplayProfile> {
    state
        .directory
        .state()
        .visible_profiles()
        .get(state.selected)
        .copied()
}

pub(super) fn selected_id(state: &UiState) -> Option<ProfileId> {
    selected_profile(state).map(|profile| profile.id)
}

pub(super) fn clamp_selection(state: &mut UiState) {
    let len = state.directory.state().visible_profiles().len();
    if state.selected >= len {
        state.selected = len.saturating_sub(1);
    }
}

pub(super) fn move_selection(state: &mut UiState, delta: isize) {
    let len = state.directory.state().visible_profiles().len();
    if len == 0 {
        state.selected = 0;
        return;
    }
    state.selected = state.selected.saturating_add_signed(delta).min(len - 1);
}

pub(super) fn move_form_field(state: &mut UiState, rows: usize, delta: isize) {
    if rows == 0 {
        return;
    }
    let rows = rows as isize;
    state.form_field = (state.form_field as isize + delta).rem_euclid(rows) as usize;
}

/// Next or previous gender option. A value outside the option list moves to
/// the first option.
pub(super) fn cycle_gender(current: &str, forward: bool) -> &'static str {
    let len = GENDER_OPTIONS.len();
    let next = match GENDER_OPTIONS.iter().position(|option| *option == current) {
        Some(index) if forward => (index + 1) % len,
        Some(index) => (index + len - 1) % len,
        None => 0,
    };
    GENDER_OPTIONS[next]
}

/// Comma-separated paths typed into the picture row.
pub(super) fn picture_files(input: &str) -> Vec<PathBuf> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(PathBuf::from)
        .collect()
}
