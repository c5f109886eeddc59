//! Terminal setup, teardown and the keyboard reader.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, Stdout},
    sync::Arc,
    time::Duration,
};
use tokio::{
    sync::{Notify, mpsc},
    task::JoinHandle,
};

use crate::shortcuts::{self, Shortcuts};

/// Terminal type used by the application.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enter the alternate screen with raw mode enabled.
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        // Leave the shell usable when the alternate screen is unavailable.
        let _ = disable_raw_mode();
        return Err(e.into());
    }
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

/// Put the terminal back the way we found it.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Forward key presses to `tx` from a blocking task.
///
/// The quit shortcut is not forwarded; it fires `quit` instead. The task
/// stops once the receiver is dropped.
pub fn spawn_key_reader(
    tx: mpsc::Sender<KeyEvent>,
    shortcuts: Arc<Shortcuts>,
    quit: Arc<Notify>,
) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        loop {
            // Short poll so a dropped receiver is noticed quickly.
            match event::poll(Duration::from_millis(50)) {
                Ok(true) => {}
                Ok(false) => {
                    if tx.is_closed() {
                        break;
                    }
                    continue;
                }
                Err(e) => {
                    tracing::error!("key poll failed: {e}");
                    break;
                }
            }
            let k = match event::read() {
                Ok(Event::Key(k)) if k.kind == KeyEventKind::Press => k,
                Ok(_) => continue,
                Err(e) => {
                    tracing::error!("key read failed: {e}");
                    break;
                }
            };
            if shortcuts::matches_shortcut(&k, &shortcuts.global.quit) {
                tracing::info!("quit key pressed");
                quit.notify_one();
                break;
            }
            if tx.blocking_send(k).is_err() {
                break;
            }
        }
    })
}
