pub mod models;
pub mod requests;
pub mod pagination;
pub mod errors;

pub use models::*;
pub use requests::*;
pub use pagination::*;
pub use errors::*;
