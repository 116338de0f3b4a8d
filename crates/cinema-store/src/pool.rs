//! Connection pool utilities

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use deadpool_postgres::{Manager, ManagerConfig, Pool, PoolBuilder, RecyclingMethod};
use tokio_postgres::NoTls;
use tokio_postgres::Socket;
use tokio_postgres::tls::{MakeTlsConnect, TlsConnect};

/// Create a connection pool from a [`StoreConfig`] without TLS.
///
/// # Example
///
/// ```ignore
/// let config = cinema_store::StoreConfig::from_env()?;
/// let pool = cinema_store::create_pool(&config)?;
/// let client = pool.get().await?;
/// let movies = cinema_store::MovieRepo::new(&client);
/// ```
pub fn create_pool(config: &StoreConfig) -> StoreResult<Pool> {
    create_pool_with_tls(config, NoTls)
}

/// Create a connection pool using a custom TLS connector.
pub fn create_pool_with_tls<T>(config: &StoreConfig, tls: T) -> StoreResult<Pool>
where
    T: MakeTlsConnect<Socket> + Clone + Sync + Send + 'static,
    T::Stream: Sync + Send,
    T::TlsConnect: Sync + Send,
    <T::TlsConnect as TlsConnect<Socket>>::Future: Send,
{
    config.validate()?;
    let max_size = config.max_pool_size;
    create_pool_with_manager_config(&config.database_url, tls, default_manager_config(), |b| {
        b.max_size(max_size)
    })
}

/// Create a connection pool with an injected `ManagerConfig` and `PoolBuilder` tweaks.
pub fn create_pool_with_manager_config<T>(
    database_url: &str,
    tls: T,
    manager_config: ManagerConfig,
    configure_pool: impl FnOnce(PoolBuilder) -> PoolBuilder,
) -> StoreResult<Pool>
where
    T: MakeTlsConnect<Socket> + Clone + Sync + Send + 'static,
    T::Stream: Sync + Send,
    T::TlsConnect: Sync + Send,
    <T::TlsConnect as TlsConnect<Socket>>::Future: Send,
{
    let pg_config: tokio_postgres::Config = database_url
        .parse()
        .map_err(|e: tokio_postgres::Error| StoreError::Connection(e.to_string()))?;

    let mgr = Manager::from_config(pg_config, tls, manager_config);
    configure_pool(Pool::builder(mgr))
        .build()
        .map_err(|e| StoreError::Pool(e.to_string()))
}

fn default_manager_config() -> ManagerConfig {
    ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    }
}
