//! Contains the type representing the database pool.

use sea_orm::DbConn;

/// Represents the database of the registry.
pub struct Database {
    /// The SQL database connection pool. This can also be a testing database [`DbConn::MockDatabaseConnection`].
    pub sql_conn: DbConn,
}

impl From<DbConn> for Database {
    fn from(sql_conn: DbConn) -> Self {
        Self { sql_conn }
    }
}

impl Database {
    /// Returns the database from the URL to the SQL database.
    pub async fn from_db_url(db_url: String) -> Result<Self, sea_orm::DbErr> {
        let sql_conn = sea_orm::Database::connect(db_url).await?;
        Ok(Self { sql_conn })
    }
}

// For some reasons, sea_orm::DbConn doesn't implement Clone
impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            sql_conn: match &self.sql_conn {
                #[cfg(feature = "mysql")]
                sea_orm::DatabaseConnection::SqlxMySqlPoolConnection(conn) => {
                    sea_orm::DatabaseConnection::SqlxMySqlPoolConnection(conn.clone())
                }
                #[cfg(feature = "mock")]
                sea_orm::DatabaseConnection::MockDatabaseConnection(conn) => {
                    sea_orm::DatabaseConnection::MockDatabaseConnection(conn.clone())
                }
                #[cfg(feature = "postgres")]
                sea_orm::DatabaseConnection::SqlxPostgresPoolConnection(conn) => {
                    sea_orm::DatabaseConnection::SqlxPostgresPoolConnection(conn.clone())
                }
                #[cfg(feature = "sqlite")]
                sea_orm::DatabaseConnection::SqlxSqlitePoolConnection(conn) => {
                    sea_orm::DatabaseConnection::SqlxSqlitePoolConnection(conn.clone())
                }
                #[cfg(feature = "sea-orm-proxy")]
                sea_orm::DatabaseConnection::ProxyDatabaseConnection(conn) => {
                    sea_orm::DatabaseConnection::ProxyDatabaseConnection(conn.clone())
                }
                sea_orm::DatabaseConnection::Disconnected => {
                    sea_orm::DatabaseConnection::Disconnected
                }
            },
        }
    }
}
