use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Whole content of a config store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StoreDocument {
    #[serde(default)]
    pub app: BTreeMap<String, String>,
    #[serde(default)]
    pub users: BTreeMap<String, BTreeMap<String, String>>,
}

impl StoreDocument {
    pub fn user_value(&self, user_id: &str, key: &str) -> Option<String> {
        self.users.get(user_id).and_then(|values| values.get(key)).cloned()
    }

    pub fn set_user_value(&mut self, user_id: &str, key: &str, value: &str) {
        self.users
            .entry(user_id.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Returns true when something was removed.
    pub fn delete_user_value(&mut self, user_id: &str, key: &str) -> bool {
        let Some(values) = self.users.get_mut(user_id) else {
            return false;
        };
        let removed = values.remove(key).is_some();
        if values.is_empty() {
            self.users.remove(user_id);
        }
        removed
    }

    pub fn users_with_value(&self, key: &str) -> Vec<String> {
        self.users
            .iter()
            .filter(|(_, values)| values.contains_key(key))
            .map(|(user_id, _)| user_id.clone())
            .collect()
    }
}
