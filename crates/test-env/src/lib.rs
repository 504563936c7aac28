use anyhow::Context as _;
use migration::MigratorTrait as _;
use mkenv::prelude::*;
use registry_lib::{Database, LibEnv, counter::Counter};
use sea_orm::ConnectOptions;
use tracing_subscriber::fmt::TestWriter;

pub trait IntoResult {
    type Out;

    fn into_result(self) -> anyhow::Result<Self::Out>;
}

impl IntoResult for () {
    type Out = ();

    fn into_result(self) -> anyhow::Result<Self::Out> {
        Ok(())
    }
}

impl<T, E> IntoResult for Result<T, E>
where
    anyhow::Error: From<E>,
{
    type Out = T;

    fn into_result(self) -> anyhow::Result<Self::Out> {
        self.map_err(From::from)
    }
}

pub fn init_env() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Err(err) if !err.not_found() => return Err(err).context("cannot retrieve .env files"),
        _ => (),
    }

    let _ = tracing_subscriber::fmt()
        .with_writer(TestWriter::new())
        .try_init();

    let lib_env = LibEnv::define();
    lib_env
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    registry_lib::init_env(lib_env);

    Ok(())
}

/// Runs the provided test with a fresh in-memory SQLite database, with the schema created
/// and the counter row inserted.
pub async fn wrap<F, R>(test: F) -> anyhow::Result<<R as IntoResult>::Out>
where
    F: AsyncFnOnce(Database) -> R,
    R: IntoResult,
{
    init_env()?;

    // A single connection, otherwise each one would open its own in-memory database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = sea_orm::Database::connect(options)
        .await
        .context("couldn't create the test database")?;

    migration::Migrator::up(&db, None).await?;
    Counter::from_env().ensure(&db).await?;

    tracing::debug!("Created test database");

    test(Database::from(db)).await.into_result()
}
