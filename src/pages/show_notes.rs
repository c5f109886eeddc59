//! Browse the signed-in user's notes.

use anyhow::Result;
use async_trait::async_trait;

use crate::{
    machine::{Page, PageState},
    selectable::SelectableList,
    surface::Surface,
};

use super::{PageContext, pick, show_text};

pub struct ShowNotesPage {
    ctx: PageContext,
}

impl ShowNotesPage {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Page for ShowNotesPage {
    fn title(&self) -> &str {
        "My notes"
    }

    async fn render(&mut self, surface: &mut dyn Surface) -> Result<PageState> {
        let Some(user) = self.ctx.session.current() else {
            return Ok(PageState::Login);
        };

        let notes = self.ctx.store.notes_for(&user).await?;
        if notes.is_empty() {
            show_text(surface, "Notes", "You have no notes yet.").await?;
            return Ok(PageState::Menu);
        }

        let mut list = SelectableList::new();
        for (i, note) in notes.iter().enumerate() {
            list.push(note.label(), move || i);
        }
        surface.set_status(&format!("{} note(s)", notes.len()));

        let keys = &self.ctx.shortcuts.list;
        while let Some(i) = pick(surface, keys, "Select a note to read it.", &mut list).await? {
            let note = &notes[i];
            show_text(surface, &note.title, &note.body).await?;
        }
        Ok(PageState::Menu)
    }
}
