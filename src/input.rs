// src/input.rs
use crate::i18n::Lang;

/// Everything a visitor can ask the gallery to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Prev,
    Next,
    GoTo(usize),
    ChangeLang(Lang),
    OpenZoom,
    CloseZoom,
}

/// Map a `KeyboardEvent.key` value to a command. While the zoom overlay is
/// open only Escape does anything.
pub fn key_command(key: &str, zoom_open: bool) -> Option<Command> {
    match (key, zoom_open) {
        ("Escape", true) => Some(Command::CloseZoom),
        (_, true) => None,
        ("ArrowLeft", false) => Some(Command::Prev),
        ("ArrowRight", false) => Some(Command::Next),
        _ => None,
    }
}
