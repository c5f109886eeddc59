//! Single-line text input box.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Alignment,
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{
    layout::centered_popup,
    shortcuts::{self, InputBoxShortcuts},
    surface::Surface,
};

/// Input box state.
#[derive(Clone, Debug)]
pub struct InputBoxState {
    /// Prompt shown above the field.
    pub prompt: String,
    /// Current value.
    pub value: String,
    /// Cursor position in characters.
    pub cursor: usize,
    /// Show `*` instead of the typed characters.
    pub masked: bool,
}

impl InputBoxState {
    pub fn new(prompt: impl Into<String>, masked: bool) -> Self {
        Self {
            prompt: prompt.into(),
            value: String::new(),
            cursor: 0,
            masked,
        }
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.byte_index(self.cursor);
        self.value.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let byte_idx = self.byte_index(self.cursor - 1);
            self.value.remove(byte_idx);
            self.cursor -= 1;
        }
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let byte_idx = self.byte_index(self.cursor);
            self.value.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear_line(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Text to display: the value, or one `*` per character when masked.
    pub fn display_value(&self) -> String {
        if self.masked {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// Byte offset of the `char_idx`-th character.
    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

/// Outcome of feeding one key to the input box.
#[derive(Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// Still editing.
    Editing,
    /// The value was confirmed.
    Confirmed(String),
    /// Input was abandoned.
    Cancelled,
}

/// Apply one key press to `state`.
pub fn handle_input_key(
    state: &mut InputBoxState,
    sc: &InputBoxShortcuts,
    k: &KeyEvent,
) -> InputOutcome {
    if shortcuts::matches_shortcut(k, &sc.confirm) {
        return InputOutcome::Confirmed(state.value.clone());
    } else if shortcuts::matches_shortcut(k, &sc.cancel) {
        return InputOutcome::Cancelled;
    } else if shortcuts::matches_shortcut(k, &sc.backspace) {
        state.backspace();
    } else if shortcuts::matches_shortcut(k, &sc.delete) {
        state.delete();
    } else if shortcuts::matches_shortcut(k, &sc.left) {
        state.move_left();
    } else if shortcuts::matches_shortcut(k, &sc.right) {
        state.move_right();
    } else if shortcuts::matches_shortcut(k, &sc.home) {
        state.move_home();
    } else if shortcuts::matches_shortcut(k, &sc.end) {
        state.move_end();
    } else if shortcuts::matches_shortcut(k, &sc.clear_line) {
        state.clear_line();
    } else if let KeyCode::Char(c) = k.code {
        // Control chords never insert text.
        if !k.modifiers.contains(KeyModifiers::CONTROL) {
            state.insert_char(c);
        }
    }
    InputOutcome::Editing
}

/// Ask for one line of text. Returns `None` when the user cancels.
pub async fn prompt(
    surface: &mut dyn Surface,
    sc: &InputBoxShortcuts,
    prompt: &str,
    masked: bool,
) -> Result<Option<String>> {
    let mut state = InputBoxState::new(prompt, masked);
    surface.set_help(&format!(
        "{}=confirm | {}=cancel | {}=clear",
        shortcuts::describe(&sc.confirm),
        shortcuts::describe(&sc.cancel),
        shortcuts::describe(&sc.clear_line),
    ));
    loop {
        surface.draw(&mut |f, _area| render_input_box(f, &state))?;
        let k = surface.next_key().await?;
        match handle_input_key(&mut state, sc, &k) {
            InputOutcome::Editing => {}
            InputOutcome::Confirmed(value) => return Ok(Some(value)),
            InputOutcome::Cancelled => return Ok(None),
        }
    }
}

/// Draw the input box as a centered popup.
pub fn render_input_box(f: &mut Frame, state: &InputBoxState) {
    let popup_area = centered_popup(f.area(), 70, 6);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Input")
        .style(Style::default().bg(Color::DarkGray));
    f.render_widget(block, popup_area);

    let inner_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // prompt
            Constraint::Length(1), // field
            Constraint::Length(1), // spacer
            Constraint::Length(1), // hint
        ])
        .split(popup_area);

    let prompt_widget = Paragraph::new(state.prompt.clone()).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(prompt_widget, inner_layout[0]);

    // Scroll horizontally once the cursor passes the visible width.
    let display_width = inner_layout[1].width as usize;
    let scroll_offset = state
        .cursor
        .saturating_sub(display_width.saturating_sub(2));

    let chars: Vec<char> = state.display_value().chars().collect();
    let visible: Vec<char> = chars
        .iter()
        .skip(scroll_offset)
        .take(display_width)
        .copied()
        .collect();

    // Mark the cursor with a bar.
    let at = state.cursor.saturating_sub(scroll_offset).min(visible.len());
    let before: String = visible[..at].iter().collect();
    let after: String = visible[at..].iter().collect();
    let input_widget =
        Paragraph::new(format!("{before}|{after}")).style(Style::default().fg(Color::Green));
    f.render_widget(input_widget, inner_layout[1]);

    let hint = if state.masked { "(hidden)" } else { "" };
    let help = Paragraph::new(hint)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(help, inner_layout[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        shortcuts::Shortcuts,
        surface::testing::{key, scripted, screen_text, typed},
    };

    #[test]
    fn test_editing_keeps_cursor_in_characters() {
        let mut state = InputBoxState::new("Title", false);
        for c in "héllo".chars() {
            state.insert_char(c);
        }
        state.move_left();
        state.move_left();
        state.backspace();
        assert_eq!(state.value, "hélo");
        assert_eq!(state.cursor, 2);
        state.move_home();
        state.delete();
        assert_eq!(state.value, "élo");
        state.move_end();
        state.insert_char('!');
        assert_eq!(state.value, "élo!");
    }

    #[test]
    fn test_masked_value_hides_characters() {
        let mut state = InputBoxState::new("Password", true);
        state.insert_char('a');
        state.insert_char('b');
        assert_eq!(state.display_value(), "**");
        assert_eq!(state.value, "ab");
    }

    #[test]
    fn test_control_chords_do_not_insert() {
        let sc = Shortcuts::default().input_box;
        let mut state = InputBoxState::new("Name", false);
        let ctrl_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(handle_input_key(&mut state, &sc, &ctrl_x), InputOutcome::Editing);
        assert_eq!(state.value, "");
    }

    #[tokio::test]
    async fn test_prompt_returns_typed_value() {
        let mut keys = typed("abc");
        keys.push(key(KeyCode::Backspace));
        keys.push(key(KeyCode::Enter));
        let mut surface = scripted(keys);
        let sc = Shortcuts::default().input_box;

        let value = prompt(&mut surface, &sc, "Name", false).await.unwrap();
        assert_eq!(value.as_deref(), Some("ab"));
        assert!(screen_text(&surface).contains("Name"));
    }

    #[tokio::test]
    async fn test_prompt_cancel_returns_none() {
        let mut keys = typed("abc");
        keys.push(key(KeyCode::Esc));
        let mut surface = scripted(keys);
        let sc = Shortcuts::default().input_box;

        assert_eq!(prompt(&mut surface, &sc, "Name", false).await.unwrap(), None);
    }
}
