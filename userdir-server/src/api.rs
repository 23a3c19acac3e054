use crate::{auth, errors::{ApiError, ServerResult}, AppState};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, RawQuery, State,
    },
    Json,
};
use std::sync::Arc;
use userdir_core::{
    models::{StatusResponse, UserDetail, UserPage},
    requests::{CreateUserRequest, UpdateUserRequest},
};

/// Returns the last `page` value in the query string, left unparsed so that
/// invalid numbers fall back to the first page instead of a 400. Other keys
/// are ignored.
pub fn page_param(query: Option<&str>) -> Result<Option<String>, ApiError> {
    let Some(query) = query else {
        return Ok(None);
    };

    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
        .map_err(|e| ApiError::bad_request("Invalid query string", Some(e.to_string())))?;

    Ok(pairs
        .into_iter()
        .filter(|(key, _)| key == "page")
        .map(|(_, value)| value)
        .last())
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> ServerResult<Json<UserPage>> {
    let requested = page_param(query.as_deref())?;
    let page = state
        .db
        .list_users(requested.as_deref(), state.total_on_page)
        .await?;

    tracing::debug!(total = page.total, num_page = page.num_page, "Listed users");
    Ok(Json(page))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ServerResult<Json<UserDetail>> {
    let Path(id) = path.map_err(ApiError::from)?;
    let user = state.db.get_user(id).await?;
    Ok(Json(user))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ServerResult<Json<UserDetail>> {
    let Json(req) = payload.map_err(ApiError::from)?;
    req.validate()?;

    let password_hash = auth::hash_password_blocking(req.password.clone())
        .await
        .map_err(|e| {
            tracing::error!(%e, "Password hashing failed");
            ApiError::internal("Failed to hash password")
        })?;
    let user = state.db.create_user(&req.into_new_user(password_hash)).await?;

    tracing::info!(user_id = user.id, user_name = %user.user_name, "User created");
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ServerResult<Json<UserDetail>> {
    let Path(id) = path.map_err(ApiError::from)?;
    let Json(req) = payload.map_err(ApiError::from)?;
    req.validate()?;

    let user = state.db.update_user(id, &req.into_changes()).await?;

    tracing::info!(user_id = user.id, "User updated");
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ServerResult<Json<StatusResponse>> {
    let Path(id) = path.map_err(ApiError::from)?;
    state.db.delete_user(id).await?;

    tracing::info!(user_id = id, "User deleted");
    Ok(Json(StatusResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_param_takes_last_value() {
        assert_eq!(page_param(Some("page=1&page=3")).unwrap(), Some("3".to_string()));
        assert_eq!(page_param(Some("sort=id&page=2")).unwrap(), Some("2".to_string()));
        assert_eq!(page_param(Some("page=%32")).unwrap(), Some("2".to_string()));
    }

    #[test]
    fn test_page_param_absent() {
        assert_eq!(page_param(None).unwrap(), None);
        assert_eq!(page_param(Some("")).unwrap(), None);
        assert_eq!(page_param(Some("sort=id")).unwrap(), None);
    }
}
