//! Write a new note.

use anyhow::Result;
use async_trait::async_trait;

use crate::{
    input,
    machine::{Page, PageState},
    surface::Surface,
};

use super::PageContext;

pub struct AddNotePage {
    ctx: PageContext,
}

impl AddNotePage {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Page for AddNotePage {
    fn title(&self) -> &str {
        "Add note"
    }

    async fn render(&mut self, surface: &mut dyn Surface) -> Result<PageState> {
        let Some(user) = self.ctx.session.current() else {
            return Ok(PageState::Login);
        };
        let keys = &self.ctx.shortcuts.input_box;

        let title = loop {
            match input::prompt(surface, keys, "Title", false).await? {
                None => return Ok(PageState::Menu),
                Some(t) if t.trim().is_empty() => surface.set_status("Title must not be empty"),
                Some(t) => break t.trim().to_string(),
            }
        };
        let Some(body) = input::prompt(surface, keys, "Note", false).await? else {
            return Ok(PageState::Menu);
        };

        self.ctx.store.add_note(&user, &title, &body).await?;
        Ok(PageState::Menu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pages::testing::signed_in_context,
        surface::testing::{key, scripted, typed},
    };
    use crossterm::event::KeyCode;

    #[tokio::test]
    async fn test_note_is_saved_for_user() {
        let (_dir, ctx) = signed_in_context().await;
        let mut keys = typed("  groceries ");
        keys.push(key(KeyCode::Enter));
        keys.extend(typed("milk, bread"));
        keys.push(key(KeyCode::Enter));
        let mut surface = scripted(keys);

        let next = AddNotePage::new(ctx.clone()).render(&mut surface).await.unwrap();
        assert_eq!(next, PageState::Menu);

        let user = ctx.session.current().unwrap();
        let notes = ctx.store.notes_for(&user).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "groceries");
        assert_eq!(notes[0].body, "milk, bread");
    }

    #[tokio::test]
    async fn test_empty_title_is_asked_again() {
        let (_dir, ctx) = signed_in_context().await;
        let mut keys = vec![key(KeyCode::Enter)];
        keys.extend(typed("t"));
        keys.push(key(KeyCode::Enter));
        keys.push(key(KeyCode::Enter));
        let mut surface = scripted(keys);

        AddNotePage::new(ctx.clone()).render(&mut surface).await.unwrap();
        assert_eq!(surface.status(), "Title must not be empty");
        let user = ctx.session.current().unwrap();
        let notes = ctx.store.notes_for(&user).await.unwrap();
        assert_eq!(notes[0].title, "t");
        assert_eq!(notes[0].body, "");
    }

    #[tokio::test]
    async fn test_cancel_saves_nothing() {
        let (_dir, ctx) = signed_in_context().await;
        let mut keys = typed("draft");
        keys.push(key(KeyCode::Enter));
        keys.push(key(KeyCode::Esc));
        let mut surface = scripted(keys);

        let next = AddNotePage::new(ctx.clone()).render(&mut surface).await.unwrap();
        assert_eq!(next, PageState::Menu);
        let user = ctx.session.current().unwrap();
        assert!(ctx.store.notes_for(&user).await.unwrap().is_empty());
    }
}
