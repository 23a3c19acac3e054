use sqlx::{sqlite::SqliteRow, Row};
use userdir_core::models::{Location, UserDetail, UserSummary};

/// SQL queries for the user store
pub struct Queries;

impl Queries {
    // User queries
    pub const INSERT_USER: &'static str = r#"
        INSERT INTO users (first_name, last_name, user_name, password_hash, role, age)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    "#;

    pub const GET_USER: &'static str = r#"
        SELECT id, first_name, last_name, user_name, role, age
        FROM users
        WHERE id = ?1
    "#;

    pub const UPDATE_USER: &'static str = r#"
        UPDATE users
        SET first_name = ?2, last_name = ?3, user_name = ?4, role = ?5, age = ?6
        WHERE id = ?1
    "#;

    pub const DELETE_USER: &'static str = r#"
        DELETE FROM users WHERE id = ?1
    "#;

    pub const COUNT_USERS: &'static str = r#"
        SELECT COUNT(*) FROM users
    "#;

    pub const LIST_USERS_PAGE: &'static str = r#"
        SELECT u.id, u.first_name, u.last_name, u.user_name, u.role, u.age,
               (SELECT COUNT(*) FROM ads a WHERE a.author_id = u.id) AS total_ads
        FROM users u
        ORDER BY u.id
        LIMIT ?1 OFFSET ?2
    "#;

    // Location queries
    pub const INSERT_LOCATION_IF_MISSING: &'static str = r#"
        INSERT INTO locations (name) VALUES (?1)
        ON CONFLICT (name) DO NOTHING
    "#;

    pub const GET_LOCATION_BY_NAME: &'static str = r#"
        SELECT id, name FROM locations WHERE name = ?1
    "#;

    pub const COUNT_LOCATIONS: &'static str = r#"
        SELECT COUNT(*) FROM locations
    "#;

    // Join table queries
    pub const ATTACH_LOCATION: &'static str = r#"
        INSERT INTO user_locations (user_id, location_id) VALUES (?1, ?2)
        ON CONFLICT (user_id, location_id) DO NOTHING
    "#;

    pub const GET_USER_LOCATION_NAMES: &'static str = r#"
        SELECT l.name
        FROM user_locations ul
        JOIN locations l ON l.id = ul.location_id
        WHERE ul.user_id = ?1
        ORDER BY l.id
    "#;

    /// Completed with a bound id list and `)` by the caller.
    pub const PAGE_LOCATION_NAMES_PREFIX: &'static str = r#"
        SELECT ul.user_id, l.name
        FROM user_locations ul
        JOIN locations l ON l.id = ul.location_id
        WHERE ul.user_id IN ("#;
}

/// Helper functions for mapping rows
pub struct DbHelpers;

impl DbHelpers {
    pub fn parse_user(row: &SqliteRow, locations: Vec<String>) -> Result<UserDetail, sqlx::Error> {
        Ok(UserDetail {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            user_name: row.try_get("user_name")?,
            role: row.try_get("role")?,
            age: row.try_get("age")?,
            locations,
        })
    }

    pub fn parse_summary(row: &SqliteRow, locations: Vec<String>) -> Result<UserSummary, sqlx::Error> {
        Ok(UserSummary {
            user: Self::parse_user(row, locations)?,
            total_ads: row.try_get("total_ads")?,
        })
    }

    pub fn parse_location(row: &SqliteRow) -> Result<Location, sqlx::Error> {
        Ok(Location {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
        })
    }
}
