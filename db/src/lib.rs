use std::{str::FromStr, sync::Arc};

use common::{
    env_config::{Config, UsageBackend},
    error::Res,
};
use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
};

pub mod postgres;
pub mod rest;
pub mod usage;

pub use postgres::PgUsageStore;
pub use rest::RestUsageStore;
pub use usage::UsageStore;

/// Opens the connection pool used to call the usage procedures.
///
/// The database and its procedures are owned elsewhere; nothing is created
/// or migrated here.
pub async fn setup(database_url: &str, ssl_mode: &str, max_connections: u32) -> Res<PgPool> {
    let options = PgConnectOptions::from_str(database_url)?.ssl_mode(PgSslMode::from_str(ssl_mode)?);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Builds the usage store selected by `USAGE_BACKEND`.
pub async fn connect_usage_store(config: &Config) -> Res<Arc<dyn UsageStore>> {
    match &config.usage_backend {
        UsageBackend::Postgres {
            database_url,
            ssl_mode,
            max_connections,
        } => {
            let pool = setup(database_url, ssl_mode, *max_connections).await?;
            log::info!("Usage procedures are called over Postgres");
            Ok(Arc::new(PgUsageStore::new(pool, &config.procedures)?))
        }
        UsageBackend::Rest {
            rpc_url,
            api_key,
            user_arg,
        } => {
            log::info!("Usage procedures are called through {}", rpc_url);
            Ok(Arc::new(RestUsageStore::new(
                rpc_url,
                api_key.clone(),
                user_arg.clone(),
                config.procedures.clone(),
            )?))
        }
    }
}
