//! userdir - user records with named locations
//!
//! This crate provides a unified API for the user directory service.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use userdir::{router, AppState, ServerDatabase};
//!
//! let db = Arc::new(ServerDatabase::new("sqlite://userdir.db", 5).await?);
//! db.run_migrations().await?;
//! let app = router(Arc::new(AppState { db, total_on_page: 10 }));
//! ```

// Re-export server types
pub use userdir_server::config::Config;
pub use userdir_server::database::ServerDatabase;
pub use userdir_server::errors::{ApiError, ServerError, ServerResult};
pub use userdir_server::{router, AppState};

// Credential helpers for callers that authenticate against stored users
pub use userdir_server::auth::{hash_password, verify_password};

// Re-export core types that external applications may need
pub use userdir_core::errors::{DirectoryError, DirectoryResult};
pub use userdir_core::models::{Location, UserDetail, UserPage, UserSummary};
pub use userdir_core::requests::{CreateUserRequest, UpdateUserRequest};
