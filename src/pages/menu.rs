//! Main menu.

use anyhow::Result;
use async_trait::async_trait;

use crate::{
    machine::{Page, PageState},
    selectable::SelectableList,
    surface::Surface,
};

use super::{PageContext, pick};

/// Choose what to do next once signed in.
pub struct MenuPage {
    ctx: PageContext,
    title: String,
}

impl MenuPage {
    pub fn new(ctx: PageContext) -> Self {
        let title = match ctx.session.current() {
            Some(user) => format!("Menu ({})", user.name),
            None => "Menu".to_string(),
        };
        Self { ctx, title }
    }
}

#[async_trait]
impl Page for MenuPage {
    fn title(&self) -> &str {
        &self.title
    }

    async fn render(&mut self, surface: &mut dyn Surface) -> Result<PageState> {
        if self.ctx.session.current().is_none() {
            return Ok(PageState::Login);
        }

        let session = &self.ctx.session;
        let mut items = SelectableList::new()
            .with("Show notes", || PageState::ShowNotes)
            .with("Add note", || PageState::AddNote)
            .with("Log out", || {
                session.sign_out();
                PageState::Login
            })
            .with("Quit", || PageState::End);

        let keys = &self.ctx.shortcuts.list;
        match pick(surface, keys, "What would you like to do?", &mut items).await? {
            Some(next) => Ok(next),
            None => {
                session.sign_out();
                Ok(PageState::Login)
            }
        }
    }
}
