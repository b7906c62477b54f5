//! Terminal text styling for non-interactive output.

use owo_colors::OwoColorize;

pub fn success(text: impl AsRef<str>) -> String {
    text.as_ref().green().bold().to_string()
}

pub fn error(text: impl AsRef<str>) -> String {
    text.as_ref().red().bold().to_string()
}
