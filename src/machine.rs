//! Page state machine that drives screen-to-screen navigation.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;

use crate::surface::Surface;

/// Screens the application can be on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageState {
    /// Sign in or create an account.
    Login,
    /// Main menu after signing in.
    Menu,
    /// Browse the signed-in user's notes.
    ShowNotes,
    /// Write a new note.
    AddNote,
    /// Terminal state; never rendered.
    End,
}

/// One visit to a screen.
#[async_trait]
pub trait Page: Send {
    /// Header title shown while this page is active.
    fn title(&self) -> &str;
    /// Run every interaction for this visit and report where to go next.
    async fn render(&mut self, surface: &mut dyn Surface) -> Result<PageState>;
}

/// Builds a fresh page for each visit.
pub type PageFactory = Box<dyn Fn() -> Box<dyn Page> + Send + Sync>;

/// Page factories keyed by the state they render.
pub type PageFactoryMap = HashMap<PageState, PageFactory>;

/// Owns the current state and loops until `End`.
pub struct PageStateMachine<S: Surface> {
    factories: PageFactoryMap,
    current: PageState,
    surface: S,
}

impl<S: Surface> PageStateMachine<S> {
    /// New machine positioned at `Login`.
    pub fn new(factories: PageFactoryMap, surface: S) -> Self {
        Self {
            factories,
            current: PageState::Login,
            surface,
        }
    }

    pub fn current(&self) -> PageState {
        self.current
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Visit pages until the state becomes `End`.
    ///
    /// A missing factory for the state about to be visited is an error. A page
    /// that reports a state with no factory ends the run instead. Errors from
    /// `render` are returned as is.
    pub async fn run(&mut self) -> Result<()> {
        while self.current != PageState::End {
            let factory = self
                .factories
                .get(&self.current)
                .ok_or_else(|| anyhow!("no page registered for {:?}", self.current))?;
            let mut page = factory();

            self.surface.announce(page.title());
            let next = page.render(&mut self.surface).await?;

            if self.factories.contains_key(&next) {
                tracing::debug!("page transition: {:?} -> {:?}", self.current, next);
                self.current = next;
            } else {
                tracing::info!("no page for {:?}; ending run", next);
                self.current = PageState::End;
            }
        }
        Ok(())
    }

    /// Like [`run`](Self::run) but returns early once `shutdown` completes.
    ///
    /// Shutdown wins when both are ready, since the quit key also closes input.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = shutdown => {
                tracing::info!("shutdown requested");
                Ok(())
            }
            res = self.run() => res,
        }
    }
}
