use crate::errors::{DirectoryError, DirectoryResult};
use crate::models::{NewUser, UserChanges};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub password: String,
    pub role: String,
    pub age: i64,
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub role: String,
    pub age: i64,
    pub locations: Vec<String>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> DirectoryResult<()> {
        validate_user_name(&self.user_name)?;
        validate_locations(&self.locations)
    }

    /// Consumes the request, replacing the plaintext password with its hash.
    pub fn into_new_user(self, password_hash: String) -> NewUser {
        NewUser {
            first_name: self.first_name,
            last_name: self.last_name,
            user_name: self.user_name,
            password_hash,
            role: self.role,
            age: self.age,
            locations: dedup_locations(self.locations),
        }
    }
}

impl UpdateUserRequest {
    pub fn validate(&self) -> DirectoryResult<()> {
        validate_user_name(&self.user_name)?;
        validate_locations(&self.locations)
    }

    pub fn into_changes(self) -> UserChanges {
        UserChanges {
            first_name: self.first_name,
            last_name: self.last_name,
            user_name: self.user_name,
            role: self.role,
            age: self.age,
            locations: dedup_locations(self.locations),
        }
    }
}

fn validate_user_name(user_name: &str) -> DirectoryResult<()> {
    if user_name.trim().is_empty() {
        return Err(DirectoryError::Validation(
            "user_name must not be blank".to_string(),
        ));
    }
    Ok(())
}

fn validate_locations(locations: &[String]) -> DirectoryResult<()> {
    if let Some(index) = locations.iter().position(|name| name.trim().is_empty()) {
        return Err(DirectoryError::Validation(format!(
            "locations[{}] must not be blank",
            index
        )));
    }
    Ok(())
}

// Keeps the first occurrence of each name, preserving order.
fn dedup_locations(locations: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(locations.len());
    for name in locations {
        if !unique.contains(&name) {
            unique.push(name);
        }
    }
    unique
}
