//! User Entity

use serde::{Deserialize, Serialize};
use super::entity::Entity;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    #[serde(default)]
    pub catch_phrase: String,
    #[serde(default)]
    pub bs: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub suite: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub company: Company,
}

impl User {
    pub fn new(id: u32, name: &str, email: &str, company: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            username: String::new(),
            phone: String::new(),
            website: String::new(),
            address: Address::default(),
            company: Company {
                name: company.to_string(),
                ..Default::default()
            },
        }
    }
}

impl Entity for User {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
