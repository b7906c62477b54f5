//! Non-interactive commands: `list` and `check`.

use std::path::Path;

use nexus_directory::loader::{load_profiles, read_raw_profiles};
use nexus_directory::{Action, Directory, DisplayProfile};

use crate::style;

pub fn load_directory(data: &Path) -> anyhow::Result<Directory> {
    let raw = read_raw_profiles(data)?;
    Ok(Directory::new(load_profiles(&raw)))
}

pub fn run_list(data: &Path, search: &str) -> anyhow::Result<()> {
    let mut directory = load_directory(data)?;
    directory.dispatch(Action::SetSearchText(search.to_string()))?;
    for line in list_lines(&directory) {
        println!("{line}");
    }
    Ok(())
}

pub fn run_check(data: &Path) -> anyhow::Result<()> {
    let directory = load_directory(data)?;
    println!(
        "{}",
        style::success(format!(
            "{}: {} profile(s) loaded",
            data.display(),
            directory.state().len()
        ))
    );
    Ok(())
}

pub fn list_lines(directory: &Directory) -> Vec<String> {
    let state = directory.state();
    let visible = state.visible_profiles();
    let mut lines: Vec<String> = visible.iter().map(|profile| profile_line(profile)).collect();
    lines.push(format!("{} of {} profiles", visible.len(), state.len()));
    lines
}

fn profile_line(profile: &DisplayProfile) -> String {
    format!(
        "#{:<4} {} ({}, {}, {})",
        profile.id, profile.name, profile.age, profile.gender, profile.country
    )
}
