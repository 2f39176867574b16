//! `Dialector` - ties configuration, connection and dialect together.

use crate::config::DialectConfig;
use crate::connection::{connect, open_driver};
use crate::dialect::{Dialect, ImmudbDialect};
use crate::executor::{LedgerExecutor, MayPostgresExecutor};
use crate::migration::{MigrationError, Migrator};

/// Entry point for migrating against an immudb ledger.
///
/// Connection precedence in [`Dialector::initialize`]:
/// 1. an executor handed in with [`Dialector::with_connection`]
/// 2. the driver named by `driver_name`
/// 3. the native `may_postgres` connector opened from `dsn`
pub struct Dialector {
    config: DialectConfig,
    dialect: ImmudbDialect,
    conn: Option<Box<dyn LedgerExecutor>>,
}

impl Dialector {
    /// Dialector for `dsn` with default settings.
    pub fn open(dsn: impl Into<String>) -> Self {
        Self::new(DialectConfig::from_dsn(dsn))
    }

    pub fn new(config: DialectConfig) -> Self {
        let dialect = ImmudbDialect::new(&config);
        Self {
            config,
            dialect,
            conn: None,
        }
    }

    /// Use an already open connection instead of connecting.
    pub fn with_connection(config: DialectConfig, conn: Box<dyn LedgerExecutor>) -> Self {
        let mut dialector = Self::new(config);
        dialector.conn = Some(conn);
        dialector
    }

    pub fn name(&self) -> &str {
        self.dialect.name()
    }

    pub fn config(&self) -> &DialectConfig {
        &self.config
    }

    pub fn dialect(&self) -> &ImmudbDialect {
        &self.dialect
    }

    /// Open the connection unless one is already held.
    pub fn initialize(&mut self) -> Result<(), MigrationError> {
        if self.conn.is_some() {
            return Ok(());
        }

        let conn: Box<dyn LedgerExecutor> = match self.config.driver_name.as_deref() {
            Some(driver) if !driver.is_empty() => {
                log::debug!("opening ledger connection through driver {driver}");
                open_driver(driver, &self.config.dsn)?
            }
            _ => Box::new(MayPostgresExecutor::new(connect(&self.config.dsn)?)),
        };
        self.conn = Some(conn);
        Ok(())
    }

    pub fn executor(&self) -> Option<&dyn LedgerExecutor> {
        self.conn.as_deref()
    }

    /// A migrator over the open connection.
    ///
    /// # Errors
    ///
    /// `MigrationError::Config` when [`Dialector::initialize`] has not run.
    pub fn migrator(&self) -> Result<Migrator<'_>, MigrationError> {
        let executor = self.executor().ok_or_else(|| {
            MigrationError::Config("dialector is not initialized: no open connection".to_string())
        })?;
        Ok(Migrator::from_config(executor, &self.dialect, &self.config))
    }
}
