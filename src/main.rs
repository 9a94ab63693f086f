// src/main.rs
use dotenvy::dotenv;
use wisecoach::{backend, config::Config, database, jobs, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logging::init();

    let config = Config::from_env()?;

    let pool = database::db::connection::get_db_pool(&config.database_url).await?;
    database::db::migrate::run_migrations(&pool).await?;

    jobs::spawn_all(pool.clone());

    backend::run_server(pool, config).await
}
