//! Signed-in identity shared by the pages of one run.

use std::sync::{Arc, Mutex, PoisonError};

use crate::notes::User;

/// Cloneable handle to the current user.
#[derive(Clone, Debug, Default)]
pub struct Session {
    user: Arc<Mutex<Option<User>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the signed-in user.
    pub fn sign_in(&self, user: User) {
        tracing::info!("signed in: {}", user.name);
        *self.user.lock().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    pub fn sign_out(&self) {
        if let Some(user) = self.user.lock().unwrap_or_else(PoisonError::into_inner).take() {
            tracing::info!("signed out: {}", user.name);
        }
    }

    /// Snapshot of the signed-in user, if any.
    pub fn current(&self) -> Option<User> {
        self.user
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn alice() -> User {
        User {
            id: Uuid::new_v4(),
            name: "alice".into(),
            password_digest: String::new(),
        }
    }

    #[test]
    fn test_clones_share_the_same_user() {
        let session = Session::new();
        let other = session.clone();
        session.sign_in(alice());
        assert_eq!(other.current().map(|u| u.name), Some("alice".into()));
        other.sign_out();
        assert!(session.current().is_none());
    }
}
