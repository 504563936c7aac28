//! The event registry server program.
//!
//! The program also includes a [library](registry_api_lib). Overall, it uses the [`registry_lib`]
//! crate as a main dependency.

use actix_cors::Cors;
use actix_web::{App, HttpServer};
use anyhow::Context;
use migration::MigratorTrait;
use mkenv::prelude::*;
use registry_api_lib::configure;
use registry_lib::{Database, counter::Counter};
use tracing::level_filters::LevelFilter;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// The main entry point.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Err(err) if !err.not_found() => return Err(err).context("cannot retrieve .env files"),
        _ => (),
    }
    registry_api_lib::init_env()?;
    let env = registry_api_lib::env();

    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let db = Database::from_db_url(env.db_env.db_url.db_url.get())
        .await
        .context("Cannot connect to the database")?;

    migration::Migrator::up(&db.sql_conn, None).await?;

    let counter = Counter::from_env();
    counter.ensure(&db.sql_conn).await?;

    let host = env.host.get();
    let port = env.port.get();
    tracing::info!("Listening on {host}:{port}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec!["accept", "content-type"])
            .max_age(3600);
        #[cfg(debug_assertions)]
        let cors = cors.allow_any_origin();

        App::new()
            .wrap(cors)
            .wrap(TracingLogger::<configure::RootSpanBuilder>::new())
            .configure(|cfg| configure::configure(cfg, db.clone(), counter.clone()))
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("Cannot bind {host}:{port} address"))?
    .run()
    .await
    .context("Cannot create actix-web server")?;

    Ok(())
}
