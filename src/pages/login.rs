//! Sign-in screen.

use anyhow::Result;
use async_trait::async_trait;

use crate::{
    input,
    machine::{Page, PageState},
    selectable::SelectableList,
    surface::Surface,
};

use super::{PageContext, pick};

/// Entries of the login list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoginChoice {
    SignIn,
    CreateAccount,
    Quit,
}

/// Sign in, register, or quit.
pub struct LoginPage {
    ctx: PageContext,
}

impl LoginPage {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    /// Prompt for a name and password; `None` when either prompt is cancelled.
    async fn ask_credentials(&self, surface: &mut dyn Surface) -> Result<Option<(String, String)>> {
        let keys = &self.ctx.shortcuts.input_box;
        let Some(name) = input::prompt(surface, keys, "User name", false).await? else {
            return Ok(None);
        };
        let Some(password) = input::prompt(surface, keys, "Password", true).await? else {
            return Ok(None);
        };
        Ok(Some((name.trim().to_string(), password)))
    }

    async fn sign_in(&self, surface: &mut dyn Surface) -> Result<bool> {
        let Some((name, password)) = self.ask_credentials(surface).await? else {
            return Ok(false);
        };
        match self.ctx.store.authenticate(&name, &password).await? {
            Some(user) => {
                self.ctx.session.sign_in(user);
                Ok(true)
            }
            None => {
                tracing::warn!("failed sign-in for {name}");
                surface.set_status("Invalid user name or password");
                Ok(false)
            }
        }
    }

    async fn create_account(&self, surface: &mut dyn Surface) -> Result<bool> {
        let Some((name, password)) = self.ask_credentials(surface).await? else {
            return Ok(false);
        };
        if name.is_empty() {
            surface.set_status("User name must not be empty");
            return Ok(false);
        }
        match self.ctx.store.create_user(&name, &password).await {
            Ok(user) => {
                self.ctx.session.sign_in(user);
                Ok(true)
            }
            Err(e) => {
                // Duplicate names are reported on the page, not as a failure.
                surface.set_status(&e.to_string());
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl Page for LoginPage {
    fn title(&self) -> &str {
        "Login"
    }

    async fn render(&mut self, surface: &mut dyn Surface) -> Result<PageState> {
        let mut choices = SelectableList::new()
            .with("Sign in", || LoginChoice::SignIn)
            .with("Create account", || LoginChoice::CreateAccount)
            .with("Quit", || LoginChoice::Quit);

        loop {
            let keys = &self.ctx.shortcuts.list;
            let choice = pick(surface, keys, "Welcome. Sign in to read your notes.", &mut choices)
                .await?
                .unwrap_or(LoginChoice::Quit);
            let signed_in = match choice {
                LoginChoice::SignIn => self.sign_in(surface).await?,
                LoginChoice::CreateAccount => self.create_account(surface).await?,
                LoginChoice::Quit => return Ok(PageState::End),
            };
            if signed_in {
                return Ok(PageState::Menu);
            }
        }
    }
}
