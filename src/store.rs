//! JSON file store for users and notes.

use anyhow::{Result, bail};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::{io::ErrorKind, path::PathBuf};
use tokio::{
    fs,
    io::{AsyncWriteExt, BufWriter},
};
use uuid::Uuid;

use crate::notes::{Note, User};

/// Everything persisted in the store file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    notes: Vec<Note>,
}

/// Stores users and notes in a local JSON file.
#[derive(Clone, Debug)]
pub struct Store {
    /// Location of the data file on disk.
    path: PathBuf,
}

impl Store {
    /// Create a store backed by the given path. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Digest stored in place of the password.
    fn password_digest(password: &str) -> String {
        let hash = Sha256::digest(password.as_bytes());
        URL_SAFE_NO_PAD.encode(hash)
    }

    /// Load the whole store; a missing or empty file is an empty store.
    async fn load(&self) -> Result<StoreData> {
        match fs::read(&self.path).await {
            Ok(data) => {
                if data.is_empty() {
                    return Ok(StoreData::default());
                }
                Ok(serde_json::from_slice(&data)?)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StoreData::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist the whole store, creating directories if needed.
    async fn save(&self, data: &StoreData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let bytes = serde_json::to_vec_pretty(data)?;
        let file = fs::File::create(&self.path).await?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&bytes).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Register a new user. Names must be unique.
    pub async fn create_user(&self, name: &str, password: &str) -> Result<User> {
        let mut data = self.load().await?;
        if data.users.iter().any(|u| u.name == name) {
            bail!("user name already taken: {name}");
        }
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            password_digest: Self::password_digest(password),
        };
        data.users.push(user.clone());
        self.save(&data).await?;
        tracing::info!("user created: {name}");
        Ok(user)
    }

    /// User matching both name and password, if any.
    pub async fn authenticate(&self, name: &str, password: &str) -> Result<Option<User>> {
        let digest = Self::password_digest(password);
        let data = self.load().await?;
        Ok(data
            .users
            .into_iter()
            .find(|u| u.name == name && u.password_digest == digest))
    }

    /// Append a note owned by `owner`.
    pub async fn add_note(&self, owner: &User, title: &str, body: &str) -> Result<Note> {
        let mut data = self.load().await?;
        let note = Note::new(owner, title.to_string(), body.to_string());
        data.notes.push(note.clone());
        self.save(&data).await?;
        tracing::info!("note added for {}: {}", owner.name, note.id);
        Ok(note)
    }

    /// Notes owned by `owner`, newest first.
    pub async fn notes_for(&self, owner: &User) -> Result<Vec<Note>> {
        let data = self.load().await?;
        let mut notes: Vec<Note> = data
            .notes
            .into_iter()
            .filter(|n| n.owner_id == owner.id)
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }
}
