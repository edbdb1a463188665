use bakeshop_api::config::ApiConfig;
use bakeshop_db::{create_pool, schema::initialize_database};
use color_eyre::eyre::Result;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;

    // Tables only; opening hours and slot rules are seeded by db-migrate
    initialize_database(&db_pool).await?;

    // Start API server
    bakeshop_api::start_server(config, db_pool).await?;

    Ok(())
}
