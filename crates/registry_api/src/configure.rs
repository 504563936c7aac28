use actix_web::web;
use registry_lib::{Database, counter::Counter};
use tracing_actix_web::{DefaultRootSpanBuilder, RootSpanBuilder as _};

pub struct RootSpanBuilder;

impl tracing_actix_web::RootSpanBuilder for RootSpanBuilder {
    fn on_request_start(request: &actix_web::dev::ServiceRequest) -> tracing::Span {
        let pool_size = {
            #[allow(unreachable_patterns)]
            match request.app_data::<Database>().map(|db| &db.sql_conn) {
                #[cfg(feature = "mysql")]
                Some(conn @ sea_orm::DatabaseConnection::SqlxMySqlPoolConnection(_)) => {
                    conn.get_mysql_connection_pool().size()
                }
                #[cfg(feature = "postgres")]
                Some(conn @ sea_orm::DatabaseConnection::SqlxPostgresPoolConnection(_)) => {
                    conn.get_postgres_connection_pool().size()
                }
                #[cfg(feature = "sqlite")]
                Some(conn @ sea_orm::DatabaseConnection::SqlxSqlitePoolConnection(_)) => {
                    conn.get_sqlite_connection_pool().size()
                }
                _ => 0,
            }
        };

        tracing_actix_web::root_span!(request, pool_size = pool_size)
    }

    fn on_request_end<B: actix_web::body::MessageBody>(
        span: tracing::Span,
        outcome: &Result<actix_web::dev::ServiceResponse<B>, actix_web::Error>,
    ) {
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}

/// Registers the JSON API, the pages and the shared resources of the server.
///
/// The unknown API routes respond with a JSON error, and the other unknown routes
/// with the 404 page.
pub fn configure(cfg: &mut web::ServiceConfig, db: Database, counter: Counter) {
    cfg.app_data(db)
        .app_data(counter)
        .service(crate::api_route())
        .configure(crate::pages_config)
        .default_service(web::to(crate::not_found));
}
