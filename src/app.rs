//! Composition root: wires the store, session and pages into a state machine.

use anyhow::Result;
use std::{path::Path, sync::Arc};
use tokio::sync::{Notify, mpsc};

use crate::{
    config::Config,
    machine::PageStateMachine,
    pages::{self, PageContext},
    session::Session,
    shortcuts::Shortcuts,
    store::Store,
    surface::TerminalSurface,
    ui::{self, Tui},
};

/// Run the application until the user quits.
pub async fn run_app(terminal: Tui, cfg: &Config) -> Result<()> {
    // Key bindings are optional; defaults apply when the file is absent.
    let shortcuts = Arc::new(Shortcuts::load_or_default(Path::new("shortcut.toml"))?);

    // One session per run, captured by every page factory.
    let ctx = PageContext {
        store: Store::new(&cfg.store.path),
        session: Session::new(),
        shortcuts: shortcuts.clone(),
    };
    tracing::info!("store at {}", cfg.store.path.display());

    // Keys flow from a blocking reader into the surface.
    let (tx_key, rx_key) = mpsc::channel(64);
    let quit = Arc::new(Notify::new());
    let reader = ui::spawn_key_reader(tx_key, shortcuts, quit.clone());

    let surface = TerminalSurface::new(terminal, rx_key);
    let mut machine = PageStateMachine::new(pages::build_factories(ctx), surface);
    let res = machine.run_until(quit.notified()).await;
    tracing::info!("navigation stopped on {:?}", machine.current());

    // Dropping the machine closes the key channel so the reader exits.
    drop(machine);
    if let Err(e) = reader.await {
        tracing::warn!("key reader ended abnormally: {e}");
    }
    res
}

#[cfg(test)]
mod tests {
    use crate::{
        machine::{PageState, PageStateMachine},
        pages::{build_factories, testing::context},
        surface::testing::{key, scripted, typed},
    };
    use crossterm::event::{KeyCode, KeyEvent};

    fn line(text: &str) -> Vec<KeyEvent> {
        let mut keys = typed(text);
        keys.push(key(KeyCode::Enter));
        keys
    }

    #[tokio::test]
    async fn test_full_session_register_write_read_quit() {
        let (_dir, ctx) = context();
        let store = ctx.store.clone();
        let session = ctx.session.clone();

        let mut keys = Vec::new();
        // Login: create an account.
        keys.extend([key(KeyCode::Down), key(KeyCode::Enter)]);
        keys.extend(line("carol"));
        keys.extend(line("pw"));
        // Menu: add a note.
        keys.extend([key(KeyCode::Down), key(KeyCode::Enter)]);
        keys.extend(line("first"));
        keys.extend(line("hello world"));
        // Menu: show notes, open the note, leave.
        keys.push(key(KeyCode::Enter));
        keys.push(key(KeyCode::Enter));
        keys.push(key(KeyCode::Char(' ')));
        keys.push(key(KeyCode::Esc));
        // Menu: quit.
        keys.extend([key(KeyCode::Up), key(KeyCode::Enter)]);

        let mut machine = PageStateMachine::new(build_factories(ctx), scripted(keys));
        machine.run().await.unwrap();

        assert_eq!(machine.current(), PageState::End);
        assert_eq!(machine.surface().title(), "Menu (carol)");
        let user = session.current().unwrap();
        let notes = store.notes_for(&user).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].body, "hello world");
    }

    #[tokio::test]
    async fn test_quit_from_login_ends_without_menu() {
        let (_dir, ctx) = context();
        let keys = vec![key(KeyCode::Up), key(KeyCode::Enter)];

        let mut machine = PageStateMachine::new(build_factories(ctx), scripted(keys));
        machine.run().await.unwrap();
        assert_eq!(machine.surface().title(), "Login");
    }

    #[tokio::test]
    async fn test_closed_input_surfaces_as_error() {
        let (_dir, ctx) = context();
        let mut machine = PageStateMachine::new(build_factories(ctx), scripted(vec![]));
        let err = machine.run().await.unwrap_err();
        assert!(err.to_string().contains("key input closed"));
    }
}
