use crate::errors::{ApiError, ServerResult};
use crate::queries::{DbHelpers, Queries};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    QueryBuilder, Row, Sqlite, SqliteConnection, SqlitePool,
};
use std::collections::HashMap;
use std::str::FromStr;
use userdir_core::models::{Location, NewUser, UserChanges, UserDetail, UserPage};
use userdir_core::pagination::Paginator;

pub struct ServerDatabase {
    pub pool: SqlitePool,
}

impl ServerDatabase {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> ServerResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Inserts the user and attaches every named location, creating the
    /// missing ones, in a single transaction.
    pub async fn create_user(&self, new_user: &NewUser) -> ServerResult<UserDetail> {
        let mut tx = self.pool.begin().await?;

        let user_id = sqlx::query(Queries::INSERT_USER)
            .bind(&new_user.first_name)
            .bind(&new_user.last_name)
            .bind(&new_user.user_name)
            .bind(&new_user.password_hash)
            .bind(&new_user.role)
            .bind(new_user.age)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        for name in &new_user.locations {
            let location = Self::get_or_create_location(&mut tx, name).await?;
            Self::attach_location(&mut tx, user_id, location.id).await?;
        }

        let user = Self::fetch_user(&mut tx, user_id).await?;
        tx.commit().await?;

        tracing::debug!(user_id, locations = new_user.locations.len(), "Created user");
        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> ServerResult<UserDetail> {
        let mut conn = self.pool.acquire().await?;
        Self::fetch_user(&mut conn, id).await
    }

    /// Overwrites the scalar fields and attaches the given locations. Existing
    /// location links are kept.
    pub async fn update_user(&self, id: i64, changes: &UserChanges) -> ServerResult<UserDetail> {
        let mut tx = self.pool.begin().await?;

        // Write first so the transaction holds the write lock before any read.
        let updated = sqlx::query(Queries::UPDATE_USER)
            .bind(id)
            .bind(&changes.first_name)
            .bind(&changes.last_name)
            .bind(&changes.user_name)
            .bind(&changes.role)
            .bind(changes.age)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(ApiError::user_not_found(id).into());
        }

        for name in &changes.locations {
            let location = Self::get_or_create_location(&mut tx, name).await?;
            Self::attach_location(&mut tx, id, location.id).await?;
        }

        let user = Self::fetch_user(&mut tx, id).await?;
        tx.commit().await?;

        tracing::debug!(user_id = id, "Updated user");
        Ok(user)
    }

    pub async fn delete_user(&self, id: i64) -> ServerResult<()> {
        let deleted = sqlx::query(Queries::DELETE_USER)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(ApiError::user_not_found(id).into());
        }

        tracing::debug!(user_id = id, "Deleted user");
        Ok(())
    }

    /// Returns one page of users ordered by id, each with its own ad count and
    /// location names.
    pub async fn list_users(&self, page: Option<&str>, per_page: u32) -> ServerResult<UserPage> {
        let mut tx = self.pool.begin().await?;

        let count: i64 = sqlx::query_scalar(Queries::COUNT_USERS)
            .fetch_one(&mut *tx)
            .await?;
        let paginator = Paginator::new(count as u64, per_page)?;
        let window = paginator.page(page);

        let rows = sqlx::query(Queries::LIST_USERS_PAGE)
            .bind(window.limit as i64)
            .bind(window.offset as i64)
            .fetch_all(&mut *tx)
            .await?;

        let ids = rows
            .iter()
            .map(|row| row.try_get::<i64, _>("id"))
            .collect::<Result<Vec<_>, _>>()?;
        let mut locations = Self::location_names_for(&mut tx, &ids).await?;
        tx.commit().await?;

        let items = rows
            .iter()
            .map(|row| {
                let id: i64 = row.try_get("id")?;
                DbHelpers::parse_summary(row, locations.remove(&id).unwrap_or_default())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(UserPage {
            items,
            num_page: paginator.num_pages(),
            total: paginator.count(),
        })
    }

    pub async fn count_locations(&self) -> ServerResult<i64> {
        let count: i64 = sqlx::query_scalar(Queries::COUNT_LOCATIONS)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Returns the location with this name, inserting it first if needed.
    pub async fn get_or_create_location(
        conn: &mut SqliteConnection,
        name: &str,
    ) -> Result<Location, sqlx::Error> {
        sqlx::query(Queries::INSERT_LOCATION_IF_MISSING)
            .bind(name)
            .execute(&mut *conn)
            .await?;

        let row = sqlx::query(Queries::GET_LOCATION_BY_NAME)
            .bind(name)
            .fetch_one(&mut *conn)
            .await?;

        DbHelpers::parse_location(&row)
    }

    /// Links a location to a user. Linking twice is a no-op.
    pub async fn attach_location(
        conn: &mut SqliteConnection,
        user_id: i64,
        location_id: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(Queries::ATTACH_LOCATION)
            .bind(user_id)
            .bind(location_id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn fetch_user(conn: &mut SqliteConnection, id: i64) -> ServerResult<UserDetail> {
        let row = sqlx::query(Queries::GET_USER)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| ApiError::user_not_found(id))?;

        let locations: Vec<String> = sqlx::query_scalar(Queries::GET_USER_LOCATION_NAMES)
            .bind(id)
            .fetch_all(&mut *conn)
            .await?;

        Ok(DbHelpers::parse_user(&row, locations)?)
    }

    async fn location_names_for(
        conn: &mut SqliteConnection,
        user_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<String>>, sqlx::Error> {
        let mut by_user: HashMap<i64, Vec<String>> = HashMap::new();
        if user_ids.is_empty() {
            return Ok(by_user);
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(Queries::PAGE_LOCATION_NAMES_PREFIX);
        let mut separated = builder.separated(", ");
        for id in user_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY ul.user_id, l.id");

        let rows = builder.build().fetch_all(&mut *conn).await?;
        for row in rows {
            let user_id: i64 = row.try_get("user_id")?;
            let name: String = row.try_get("name")?;
            by_user.entry(user_id).or_default().push(name);
        }

        Ok(by_user)
    }
}
