//! Key binding configuration.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// All key bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shortcuts {
    pub global: GlobalShortcuts,
    pub list: ListShortcuts,
    pub input_box: InputBoxShortcuts,
}

/// Bindings active on every page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalShortcuts {
    pub quit: Vec<String>,
}

/// Bindings for selectable lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListShortcuts {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub select: Vec<String>,
    pub back: Vec<String>,
}

/// Bindings for the input box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputBoxShortcuts {
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
    pub backspace: Vec<String>,
    pub delete: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub home: Vec<String>,
    pub end: Vec<String>,
    pub clear_line: Vec<String>,
}

impl Shortcuts {
    /// Load from TOML, or fall back to the defaults when the file is absent.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let shortcuts: Shortcuts = toml::from_str(&content)?;
            Ok(shortcuts)
        } else {
            Ok(Self::default())
        }
    }
}

impl Default for Shortcuts {
    fn default() -> Self {
        Self {
            global: GlobalShortcuts {
                quit: vec!["Ctrl+c".into()],
            },
            list: ListShortcuts {
                up: vec!["Up".into(), "k".into()],
                down: vec!["Down".into(), "j".into()],
                select: vec!["Enter".into()],
                back: vec!["Esc".into()],
            },
            input_box: InputBoxShortcuts {
                confirm: vec!["Enter".into()],
                cancel: vec!["Esc".into()],
                backspace: vec!["Backspace".into()],
                delete: vec!["Delete".into()],
                left: vec!["Left".into()],
                right: vec!["Right".into()],
                home: vec!["Home".into()],
                end: vec!["End".into()],
                clear_line: vec!["Ctrl+u".into()],
            },
        }
    }
}

/// Human-readable form of a binding list, e.g. `Up/k`.
pub fn describe(shortcuts: &[String]) -> String {
    shortcuts.join("/")
}

/// True when `key` matches any of the shortcut strings.
pub fn matches_shortcut(key: &KeyEvent, shortcuts: &[String]) -> bool {
    shortcuts.iter().any(|s| matches_single_shortcut(key, s))
}

/// True when `key` matches one shortcut string such as `Ctrl+u`, `a` or `Enter`.
fn matches_single_shortcut(key: &KeyEvent, shortcut: &str) -> bool {
    let parts: Vec<&str> = shortcut.split('+').collect();

    let (modifiers_str, key_str) = if parts.len() > 1 {
        (&parts[0..parts.len() - 1], parts[parts.len() - 1])
    } else {
        (&[][..], parts[0])
    };

    let mut expected_modifiers = KeyModifiers::empty();
    for modifier in modifiers_str {
        match *modifier {
            "Ctrl" | "ctrl" => expected_modifiers |= KeyModifiers::CONTROL,
            "Alt" | "alt" => expected_modifiers |= KeyModifiers::ALT,
            "Shift" | "shift" => expected_modifiers |= KeyModifiers::SHIFT,
            _ => return false,
        }
    }

    if key.modifiers != expected_modifiers {
        return false;
    }

    match key_str {
        "Enter" | "enter" => key.code == KeyCode::Enter,
        "Esc" | "esc" => key.code == KeyCode::Esc,
        "Tab" | "tab" => key.code == KeyCode::Tab,
        "Backspace" | "backspace" => key.code == KeyCode::Backspace,
        "Delete" | "delete" => key.code == KeyCode::Delete,
        "Up" | "up" => key.code == KeyCode::Up,
        "Down" | "down" => key.code == KeyCode::Down,
        "Left" | "left" => key.code == KeyCode::Left,
        "Right" | "right" => key.code == KeyCode::Right,
        "Home" | "home" => key.code == KeyCode::Home,
        "End" | "end" => key.code == KeyCode::End,
        // Single characters compare as Char.
        s if s.chars().count() == 1 => s
            .chars()
            .next()
            .is_some_and(|c| key.code == KeyCode::Char(c)),
        _ => false,
    }
}
