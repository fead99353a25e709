#![allow(non_snake_case, non_camel_case_types)]
#![allow(clippy::needless_return)]

use sqlx::postgres::PgPoolOptions;

pub static DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Clone, Default)]
pub struct dbState {
    pub dbPool: Option<sqlx::PgPool>
}

impl dbState {
    pub fn new() -> dbState {
        return dbState::default();
    }

    pub async fn connect(&mut self, databaseUrl: &str, maxConnections: u32) -> sqlx::Result<()> {
        let pool = PgPoolOptions::new()
            .max_connections(maxConnections)
            .connect(databaseUrl)
            .await?;
        self.dbPool = Some(pool);
        tracing::info!(maxConnections, "connected to postgres");

        return Ok(());
    }

    pub fn getConnection(&self) -> Option<&sqlx::PgPool> {
        return self.dbPool.as_ref();
    }

    //sqlx keeps track of applied migrations in _sqlx_migrations, so this is safe to run on every start
    pub async fn migrateDb(&self) -> Result<(), sqlx::migrate::MigrateError> {
        let Some(dbPool) = self.getConnection() else {
            return Err(sqlx::migrate::MigrateError::Execute(sqlx::Error::PoolClosed));
        };

        sqlx::migrate!("./migrations").run(dbPool).await?;
        tracing::info!("database migrations applied");
        return Ok(());
    }
}
