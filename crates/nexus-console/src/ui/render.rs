use super::*;

const ADD_FORM_HEIGHT: u16 = ADD_FORM_ROWS as u16 + 3;
const DETAIL_INDENT: &str = "    ";

pub(super) fn render_ui(area: Rect, frame: &mut ratatui::Frame<'_>, state: &UiState) {
    let view = state.directory.state();
    let form_height = if view.add_form_visible() {
        ADD_FORM_HEIGHT
    } else {
        0
    };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(form_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);
    render_search(layout[0], frame, state);
    if view.add_form_visible() {
        render_add_form(layout[1], frame, state);
    }
    render_profiles(layout[2], frame, state);
    render_footer(layout[3], frame, state);

    if view.delete_confirm_id().is_some() {
        render_delete_confirm(area, frame);
    }
    if let Some(notice) = state.notice.as_deref() {
        render_notice(area, frame, notice);
    }
}

fn render_search(area: Rect, frame: &mut ratatui::Frame<'_>, state: &UiState) {
    let block = panel_block("Profile Nexus", state.searching);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let text = state.directory.state().search_text();
    let line = if text.is_empty() && !state.searching {
        Line::from(Span::styled("Search user (press /)", hint_style()))
    } else {
        Line::from(vec![
            Span::styled("Search: ", label_style()),
            Span::styled(text.to_string(), value_style()),
        ])
    };
    frame.render_widget(Paragraph::new(line), inner);
    if state.searching {
        let offset = u16::try_from("Search: ".len() + text.chars().count()).unwrap_or(u16::MAX);
        frame.set_cursor(inner.x.saturating_add(offset), inner.y);
    }
}

fn render_add_form(area: Rect, frame: &mut ratatui::Frame<'_>, state: &UiState) {
    let block = panel_block("Add Profile", true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let draft = state.directory.state().new_profile();
    let mut lines: Vec<Line> = DraftField::ALL
        .iter()
        .enumerate()
        .map(|(row, field)| {
            let value = field.value(draft);
            let value = if *field == DraftField::Gender && value.is_empty() {
                "< choose >"
            } else {
                value
            };
            form_line(field.label(), value, row == state.form_field)
        })
        .collect();
    let picture = match &draft.picture {
        Some(picture) if state.picture_input.is_empty() => picture.to_string(),
        _ => state.picture_input.clone(),
    };
    lines.push(form_line(
        "Picture",
        &picture,
        state.form_field == PICTURE_FIELD,
    ));
    lines.push(Line::from(Span::styled(
        "Tab next field  Ctrl+S save  Esc cancel",
        hint_style(),
    )));
    frame.render_widget(Paragraph::new(lines), inner);
}

fn form_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let value_style = if focused {
        value_style().add_modifier(Modifier::BOLD)
    } else {
        value_style()
    };
    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(COLOR_TEAL)),
        Span::styled(format!("{label:<12}"), label_style()),
        Span::styled(value.to_string(), value_style),
    ])
}

fn render_profiles(area: Rect, frame: &mut ratatui::Frame<'_>, state: &UiState) {
    let view = state.directory.state();
    let visible = view.visible_profiles();
    let title = format!("Profiles ({} of {})", visible.len(), view.len());
    let block = panel_block(&title, !state.searching && !view.add_form_visible());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if visible.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled("No matching profiles.", hint_style()))),
            inner,
        );
        return;
    }

    let mut lines = Vec::new();
    let mut selected_row = 0;
    for (index, profile) in visible.iter().enumerate() {
        if index == state.selected {
            selected_row = lines.len();
        }
        lines.push(header_line(state, profile, index == state.selected));
        if view.expanded_id() == Some(profile.id) {
            if view.edit_id() == Some(profile.id) {
                lines.extend(edit_lines(state, profile));
            } else {
                lines.extend(detail_lines(profile));
            }
        }
    }
    let height = usize::from(inner.height.max(1));
    let scroll = selected_row.saturating_sub(height - 1);
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

fn header_line(state: &UiState, profile: &DisplayProfile, selected: bool) -> Line<'static> {
    let view = state.directory.state();
    let arrow = if view.expanded_id() == Some(profile.id) {
        "▾ "
    } else {
        "▸ "
    };
    let name = match view.edit_buffer() {
        Some(buffer) if view.edit_id() == Some(profile.id) => buffer.name.clone(),
        _ => profile.name.clone(),
    };
    let mut style = Style::default().fg(Color::White);
    if selected {
        style = style.bg(COLOR_SELECTED_BG).add_modifier(Modifier::BOLD);
    }
    Line::from(vec![
        Span::styled(arrow.to_string(), Style::default().fg(COLOR_TEAL)),
        Span::styled(name, style),
    ])
}

fn detail_lines(profile: &DisplayProfile) -> Vec<Line<'static>> {
    let picture = profile
        .picture
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string);
    vec![
        Line::from(vec![
            Span::raw(DETAIL_INDENT),
            Span::styled(format!("Age: {} Years", profile.age), value_style()),
            Span::raw("   "),
            Span::styled(format!("Gender: {}", profile.gender), value_style()),
            Span::raw("   "),
            Span::styled(format!("Country: {}", profile.country), value_style()),
        ]),
        Line::from(vec![
            Span::raw(DETAIL_INDENT),
            Span::styled(
                format!("Description: {}", profile.description),
                value_style(),
            ),
        ]),
        Line::from(vec![
            Span::raw(DETAIL_INDENT),
            Span::styled(format!("Picture: {picture}"), hint_style()),
        ]),
        Line::from(vec![
            Span::raw(DETAIL_INDENT),
            Span::styled("[e] edit  [d] delete", hint_style()),
        ]),
    ]
}

fn edit_lines(state: &UiState, profile: &DisplayProfile) -> Vec<Line<'static>> {
    let view = state.directory.state();
    let Some(buffer) = view.edit_buffer() else {
        return detail_lines(profile);
    };
    let mut lines = vec![Line::from(vec![
        Span::raw(DETAIL_INDENT),
        Span::styled(format!("Age: {} (read-only)", buffer.age), hint_style()),
    ])];
    for (row, field) in EditField::ALL.iter().enumerate() {
        let mut line = form_line(field.label(), field.value(buffer), row == state.form_field);
        line.spans.insert(0, Span::raw(DETAIL_INDENT));
        lines.push(line);
    }
    let save_hint = if view.save_enabled() {
        Span::styled("[Enter] save", Style::default().fg(COLOR_GREEN))
    } else {
        Span::styled("[Enter] save (no changes)", hint_style())
    };
    lines.push(Line::from(vec![
        Span::raw(DETAIL_INDENT),
        save_hint,
        Span::styled("  [Esc] cancel", hint_style()),
    ]));
    lines
}

fn render_footer(area: Rect, frame: &mut ratatui::Frame<'_>, state: &UiState) {
    if let Some(status) = &state.status {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(status.text.clone(), status.style))),
            area,
        );
        return;
    }
    let view = state.directory.state();
    let hint = if view.add_form_visible() {
        "Type to fill the form  Left/Right pick gender  Enter on picture attaches file(s)"
    } else if view.edit_id().is_some() {
        "Type to edit  Tab next field  Left/Right pick gender"
    } else if state.searching {
        "Type to search  Enter/Esc done"
    } else {
        "Up/Down move  Enter expand  / search  a add  e edit  d delete  q quit"
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(hint, hint_style()))),
        area,
    );
}

fn render_delete_confirm(area: Rect, frame: &mut ratatui::Frame<'_>) {
    let popup = centered_rect(area, 50, 5);
    frame.render_widget(Clear, popup);
    let block = panel_block("Delete", true).border_style(Style::default().fg(COLOR_RED));
    let lines = vec![
        Line::from(Span::styled(
            "Are you sure you want to delete this user?",
            value_style(),
        )),
        Line::from(vec![
            Span::styled("[y] Delete", Style::default().fg(COLOR_RED)),
            Span::styled("  [n] Cancel", hint_style()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn render_notice(area: Rect, frame: &mut ratatui::Frame<'_>, notice: &str) {
    let popup = centered_rect(area, 76, 5);
    frame.render_widget(Clear, popup);
    let block = panel_block("Notice", true).border_style(Style::default().fg(COLOR_AMBER));
    let lines = vec![
        Line::from(Span::styled(notice.to_string(), value_style())),
        Line::from(Span::styled("Press Enter to continue", hint_style())),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        popup,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
