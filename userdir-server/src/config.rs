use clap::Parser;
use userdir_core::{DirectoryError, DirectoryResult};

#[derive(Parser, Debug, Clone)]
#[command(name = "userdir-server")]
#[command(about = "REST API for user records and their locations", long_about = None)]
pub struct Config {
    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://userdir.db")]
    pub database_url: String,

    /// Address the HTTP server listens on
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:8080")]
    pub bind_address: String,

    /// Users per page in the listing
    #[arg(long, env = "TOTAL_ON_PAGE", default_value_t = 10)]
    pub total_on_page: u32,

    /// Connection pool size
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,
}

impl Config {
    pub fn validate(&self) -> DirectoryResult<()> {
        if self.total_on_page == 0 {
            return Err(DirectoryError::InvalidPageSize(self.total_on_page));
        }
        Ok(())
    }
}
