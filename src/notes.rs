//! User and note records kept by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable id notes refer to.
    pub id: Uuid,
    /// Login name, unique within a store.
    pub name: String,
    /// Encoded SHA-256 of the password.
    pub password_digest: String,
}

/// One note owned by a user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    /// Id of the owning [`User`].
    pub owner_id: Uuid,
    pub title: String,
    pub body: String,
    /// Creation time, used for ordering and display.
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Create a note stamped with the current time.
    pub fn new(owner: &User, title: String, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner.id,
            title,
            body,
            created_at: Utc::now(),
        }
    }

    /// List label: creation date and title.
    pub fn label(&self) -> String {
        format!("{}  {}", self.created_at.format("%Y-%m-%d %H:%M"), self.title)
    }
}
