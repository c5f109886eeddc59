//! Rendering surface that pages draw on and read keys from.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tokio::sync::mpsc;

use crate::layout;

/// Where pages display themselves and wait for input.
#[async_trait]
pub trait Surface: Send {
    /// Set the header title for the page being visited.
    fn announce(&mut self, title: &str);
    /// Replace the key hints in the help bar.
    fn set_help(&mut self, help: &str);
    /// Replace the status line text.
    fn set_status(&mut self, status: &str);
    /// Draw the chrome and let `body` fill the page area.
    fn draw(&mut self, body: &mut dyn FnMut(&mut Frame, Rect)) -> Result<()>;
    /// Suspend until the next key press.
    async fn next_key(&mut self) -> Result<KeyEvent>;
}

/// Surface backed by a ratatui terminal and a key channel.
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    keys: mpsc::Receiver<KeyEvent>,
    title: String,
    help: String,
    status: String,
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(terminal: Terminal<B>, keys: mpsc::Receiver<KeyEvent>) -> Self {
        Self {
            terminal,
            keys,
            title: String::new(),
            help: String::new(),
            status: "Ready".into(),
        }
    }

    /// Title most recently announced.
    #[cfg(test)]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[cfg(test)]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[cfg(test)]
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

#[async_trait]
impl<B: Backend + Send> Surface for TerminalSurface<B> {
    fn announce(&mut self, title: &str) {
        tracing::debug!("visiting page: {title}");
        self.title = title.to_string();
        // A new visit starts with a clean status line.
        self.status.clear();
    }

    fn set_help(&mut self, help: &str) {
        self.help = help.to_string();
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    fn draw(&mut self, body: &mut dyn FnMut(&mut Frame, Rect)) -> Result<()> {
        let (title, help, status) = (&self.title, &self.help, &self.status);
        self.terminal.draw(|f| {
            let page = layout::create_page_layout(f.area());

            let header = Paragraph::new(title.as_str())
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .block(Block::default().borders(Borders::ALL).title("NOTES"));
            f.render_widget(header, page.header);

            let help_bar = Paragraph::new(help.as_str())
                .block(Block::default().borders(Borders::ALL).title("HELP"))
                .wrap(Wrap { trim: true });
            f.render_widget(help_bar, page.help_bar);

            let status_bar = Paragraph::new(status.as_str())
                .block(Block::default().borders(Borders::ALL).title("STATUS"))
                .wrap(Wrap { trim: true });
            f.render_widget(status_bar, page.status_bar);

            // Pages draw last so popups can cover the chrome.
            body(f, page.body);
        })?;
        Ok(())
    }

    async fn next_key(&mut self) -> Result<KeyEvent> {
        self.keys
            .recv()
            .await
            .ok_or_else(|| anyhow!("key input closed"))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crossterm::event::KeyCode;

    #[tokio::test]
    async fn test_draw_shows_announced_title_and_status() {
        let mut surface = scripted(vec![]);
        surface.announce("Login");
        surface.set_status("Invalid user name or password");
        surface
            .draw(&mut |f, area| {
                f.render_widget(Paragraph::new("body text"), area);
            })
            .unwrap();
        let text = screen_text(&surface);
        assert!(text.contains("Login"));
        assert!(text.contains("body text"));
        assert!(text.contains("Invalid user name or password"));
    }

    #[tokio::test]
    async fn test_announce_clears_status() {
        let mut surface = scripted(vec![]);
        surface.set_status("old");
        surface.announce("Menu");
        assert_eq!(surface.status(), "");
        assert_eq!(surface.title(), "Menu");
    }

    #[tokio::test]
    async fn test_next_key_errors_when_input_closes() {
        let mut surface = scripted(vec![key(KeyCode::Enter)]);
        assert_eq!(surface.next_key().await.unwrap().code, KeyCode::Enter);
        assert!(surface.next_key().await.is_err());
    }
}
