//! Todo Entity

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// Owner assigned to todos created locally
pub const LOCAL_USER_ID: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u32,
    #[serde(default)]
    pub user_id: u32,
    pub title: String,
    pub completed: bool,
}

impl Todo {
    /// A fresh, not yet completed todo owned by the local user
    pub fn new(id: u32, title: &str) -> Self {
        Self {
            id,
            user_id: LOCAL_USER_ID,
            title: title.to_string(),
            completed: false,
        }
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

impl Entity for Todo {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
