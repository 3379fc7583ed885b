use std::sync::Arc;

use crate::server::{config::Config, error::Error, transient::RedisTransientStore};

/// Build the LearnyBox client, caching its tokens and member pages in `store`
pub fn build_learnybox_client(
    config: &Config,
    store: Arc<dyn learnybox::TransientStore>,
) -> Result<learnybox::Client, Error> {
    let learnybox_client = learnybox::Client::builder()
        .api_url(&config.learnybox_api_url)
        .api_key(&config.learnybox_api_key)
        .user_agent(&config.user_agent)
        .store(store)
        .build()?;

    Ok(learnybox_client)
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Connect to Valkey/Redis for the LearnyBox token and member page cache
pub async fn connect_to_transient_store(config: &Config) -> Result<RedisTransientStore, Error> {
    use fred::prelude::*;

    let redis_config = Config::from_url(&config.valkey_url)?;
    let pool = Pool::new(redis_config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    Ok(RedisTransientStore::new(pool))
}
