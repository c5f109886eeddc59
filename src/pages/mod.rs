//! Concrete pages and the helpers they share.

mod add_note;
mod login;
mod menu;
mod show_notes;

pub use add_note::AddNotePage;
pub use login::LoginPage;
pub use menu::MenuPage;
pub use show_notes::ShowNotesPage;

use anyhow::Result;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use std::sync::Arc;

use crate::{
    machine::{Page, PageFactoryMap, PageState},
    selectable::SelectableList,
    session::Session,
    shortcuts::{self, ListShortcuts, Shortcuts},
    store::Store,
    surface::Surface,
};

/// Dependencies every page closes over.
#[derive(Clone)]
pub struct PageContext {
    pub store: Store,
    pub session: Session,
    pub shortcuts: Arc<Shortcuts>,
}

/// Factories for every page, each capturing its own copy of `ctx`.
pub fn build_factories(ctx: PageContext) -> PageFactoryMap {
    let mut factories = PageFactoryMap::new();

    let c = ctx.clone();
    factories.insert(
        PageState::Login,
        Box::new(move || Box::new(LoginPage::new(c.clone())) as Box<dyn Page>),
    );
    let c = ctx.clone();
    factories.insert(
        PageState::Menu,
        Box::new(move || Box::new(MenuPage::new(c.clone())) as Box<dyn Page>),
    );
    let c = ctx.clone();
    factories.insert(
        PageState::ShowNotes,
        Box::new(move || Box::new(ShowNotesPage::new(c.clone())) as Box<dyn Page>),
    );
    factories.insert(
        PageState::AddNote,
        Box::new(move || Box::new(AddNotePage::new(ctx.clone())) as Box<dyn Page>),
    );

    factories
}

/// Let the user move through `list` until a choice is committed.
///
/// Returns the committed value, or `None` when the back key is pressed.
/// `list` must not be empty.
pub async fn pick<T>(
    surface: &mut dyn Surface,
    keys: &ListShortcuts,
    intro: &str,
    list: &mut SelectableList<'_, T>,
) -> Result<Option<T>> {
    surface.set_help(&format!(
        "{}=up | {}=down | {}=select | {}=back",
        shortcuts::describe(&keys.up),
        shortcuts::describe(&keys.down),
        shortcuts::describe(&keys.select),
        shortcuts::describe(&keys.back),
    ));
    loop {
        surface.draw(&mut |f, area| render_list(f, area, intro, &*list))?;
        let k = surface.next_key().await?;
        if shortcuts::matches_shortcut(&k, &keys.up) {
            list.retreat();
        } else if shortcuts::matches_shortcut(&k, &keys.down) {
            list.advance();
        } else if shortcuts::matches_shortcut(&k, &keys.select) {
            tracing::debug!("picked {:?}", list.current_label());
            return Ok(Some(list.invoke()));
        } else if shortcuts::matches_shortcut(&k, &keys.back) {
            return Ok(None);
        }
    }
}

/// Draw `intro` above the list with the cursor row highlighted.
pub fn render_list<T>(f: &mut Frame, area: Rect, intro: &str, list: &SelectableList<'_, T>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);

    f.render_widget(Paragraph::new(intro), chunks[0]);

    let items: Vec<ListItem> = list.labels().map(ListItem::new).collect();
    let widget = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Rgb(255, 140, 0))
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut state = list.list_state();
    f.render_stateful_widget(widget, chunks[1], &mut state);
}

/// Show a block of text until any key is pressed.
pub async fn show_text(surface: &mut dyn Surface, heading: &str, text: &str) -> Result<()> {
    surface.set_help("any key=back");
    surface.draw(&mut |f, area| {
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(heading))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    })?;
    surface.next_key().await?;
    Ok(())
}
