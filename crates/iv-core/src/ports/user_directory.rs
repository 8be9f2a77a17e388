//! User and group directory port

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("user directory unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait UserDirectoryPort: Send + Sync {
    /// Every user the directory knows about.
    async fn list_user_ids(&self) -> Result<Vec<String>, DirectoryError>;

    /// Groups of a user; unknown users belong to no group.
    async fn groups_for_user(&self, user_id: &str) -> Result<Vec<String>, DirectoryError>;

    async fn list_groups(&self) -> Result<Vec<String>, DirectoryError>;
}

