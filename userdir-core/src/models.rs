use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub id: i64,
    pub name: String,
}

/// A user as returned by the detail, create and update endpoints.
///
/// `locations` holds location names ordered by location id, i.e. the order
/// in which the locations were first created, not the order the user was
/// attached to them. The password hash is never part of this shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserDetail {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub role: String,
    pub age: i64,
    pub locations: Vec<String>,
}

/// One row of the user listing: the detail shape plus the number of ads the
/// user authored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    #[serde(flatten)]
    pub user: UserDetail,
    pub total_ads: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPage {
    pub items: Vec<UserSummary>,
    pub num_page: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Validated input for inserting a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub password_hash: String,
    pub role: String,
    pub age: i64,
    pub locations: Vec<String>,
}

/// Full overwrite of a user's scalar fields plus locations to attach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub role: String,
    pub age: i64,
    pub locations: Vec<String>,
}
