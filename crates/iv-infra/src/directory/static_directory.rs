use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use iv_core::config::DirectoryUser;
use iv_core::ports::{DirectoryError, UserDirectoryPort};

/// User directory fixed at startup from the configuration file.
#[derive(Debug, Clone, Default)]
pub struct StaticUserDirectory {
    users: BTreeMap<String, Vec<String>>,
}

impl StaticUserDirectory {
    /// Entries with an empty id are dropped; repeated ids merge their groups.
    pub fn new(users: impl IntoIterator<Item = DirectoryUser>) -> Self {
        let mut merged: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for user in users {
            if user.id.is_empty() {
                continue;
            }
            let groups = merged.entry(user.id).or_default();
            for group in user.groups {
                if !groups.contains(&group) {
                    groups.push(group);
                }
            }
        }
        Self { users: merged }
    }
}

#[async_trait]
impl UserDirectoryPort for StaticUserDirectory {
    async fn list_user_ids(&self) -> Result<Vec<String>, DirectoryError> {
        Ok(self.users.keys().cloned().collect())
    }

    async fn groups_for_user(&self, user_id: &str) -> Result<Vec<String>, DirectoryError> {
        Ok(self.users.get(user_id).cloned().unwrap_or_default())
    }

    async fn list_groups(&self) -> Result<Vec<String>, DirectoryError> {
        let groups: BTreeSet<&String> = self.users.values().flatten().collect();
        Ok(groups.into_iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, groups: &[&str]) -> DirectoryUser {
        DirectoryUser {
            id: id.to_string(),
            groups: groups.iter().map(|g| g.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn lists_users_and_distinct_groups() {
        let directory = StaticUserDirectory::new([
            user("bob", &["staff"]),
            user("alice", &["admin", "staff"]),
            user("", &["ghost"]),
        ]);

        assert_eq!(
            directory.list_user_ids().await.unwrap(),
            vec!["alice".to_string(), "bob".to_string()]
        );
        assert_eq!(
            directory.list_groups().await.unwrap(),
            vec!["admin".to_string(), "staff".to_string()]
        );
        assert_eq!(directory.groups_for_user("bob").await.unwrap(), vec!["staff".to_string()]);
    }

    #[tokio::test]
    async fn unknown_user_has_no_groups() {
        let directory = StaticUserDirectory::new([user("alice", &["admin"])]);
        assert!(directory.groups_for_user("mallory").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn repeated_entries_merge_groups() {
        let directory = StaticUserDirectory::new([user("alice", &["a"]), user("alice", &["b", "a"])]);
        assert_eq!(
            directory.groups_for_user("alice").await.unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
    }
}
