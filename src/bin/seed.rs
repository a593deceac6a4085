//! Insert the demo data set into the configured PostgreSQL database.

use access_control_api::{connect_postgres, seed::seed, Config, ConfigError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    let url = config
        .database_url
        .as_deref()
        .ok_or(ConfigError::Missing("DATABASE_URL"))?;
    let store = connect_postgres(url, config.db_max_connections).await?;
    let summary = seed(&store).await?;
    println!(
        "seeded {} users, {} buildings, {} access points, {} access logs",
        summary.users, summary.buildings, summary.access_points, summary.access_logs
    );
    Ok(())
}
