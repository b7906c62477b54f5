//! Terminal UI for browsing and editing the profile directory.

use std::io;
use std::path::PathBuf;
use std::time::Duration as StdDuration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use nexus_directory::{
    Action, Directory, DisplayProfile, DraftField, EditField, NexusConfig, ProfileId,
};
use ratatui::backend::CrosstermBackend;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Terminal,
};
use tracing::info;

use crate::list::load_directory;

mod input;
mod render;
mod state;

const COLOR_TEAL: Color = Color::Rgb(0, 168, 150);
const COLOR_GREEN: Color = Color::Rgb(46, 204, 113);
const COLOR_AMBER: Color = Color::Rgb(243, 156, 18);
const COLOR_RED: Color = Color::Rgb(231, 76, 60);
const COLOR_INFO: Color = Color::Rgb(142, 142, 147);
const COLOR_YELLOW: Color = Color::Rgb(245, 196, 66);
const COLOR_CYAN: Color = Color::Rgb(64, 212, 255);
const COLOR_SELECTED_BG: Color = Color::Rgb(40, 40, 48);

const GENDER_OPTIONS: [&str; 5] = ["Male", "Female", "Transgender", "Rather not say", "Other"];

/// Row of the add form that takes picture file paths.
const PICTURE_FIELD: usize = DraftField::ALL.len();
const ADD_FORM_ROWS: usize = PICTURE_FIELD + 1;

#[derive(Debug, Clone)]
struct StatusLine {
    text: String,
    style: Style,
}

/// Presentation state layered over the directory store. Which form or
/// dialog is open is read from the store itself; only cursor positions and
/// raw text the store does not track live here.
struct UiState {
    directory: Directory,
    selected: usize,
    searching: bool,
    form_field: usize,
    picture_input: String,
    notice: Option<String>,
    status: Option<StatusLine>,
}

impl UiState {
    fn new(directory: Directory) -> Self {
        Self {
            directory,
            selected: 0,
            searching: false,
            form_field: 0,
            picture_input: String::new(),
            notice: None,
            status: None,
        }
    }
}

pub fn run_ui(config: &NexusConfig) -> anyhow::Result<()> {
    let directory = load_directory(&config.data_path)?;
    info!(
        path = %config.data_path.display(),
        profiles = directory.state().len(),
        "starting console"
    );
    let mut state = UiState::new(directory);
    let tick = StdDuration::from_millis(config.tick_ms);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = (|| -> anyhow::Result<()> {
        loop {
            terminal.draw(|frame| render_ui(frame.size(), frame, &state))?;

            if event::poll(tick)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && handle_key(key, &mut state) {
                        break;
                    }
                }
            }
        }
        Ok(())
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn handle_key(key: KeyEvent, state: &mut UiState) -> bool {
    input::handle_key(key, state)
}

fn render_ui(area: Rect, frame: &mut ratatui::Frame<'_>, state: &UiState) {
    render::render_ui(area, frame, state);
}

fn label_style() -> Style {
    Style::default().fg(COLOR_CYAN)
}

fn header_style() -> Style {
    Style::default()
        .fg(COLOR_YELLOW)
        .add_modifier(Modifier::BOLD)
}

fn value_style() -> Style {
    Style::default().fg(Color::White)
}

fn hint_style() -> Style {
    Style::default()
        .fg(COLOR_INFO)
        .add_modifier(Modifier::DIM)
}

fn panel_block(title: &str, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(COLOR_TEAL)
    } else {
        Style::default().fg(COLOR_INFO)
    };
    Block::default()
        .title(Span::styled(format!(" {title} "), header_style()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
}
